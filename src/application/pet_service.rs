// Pet service - Use case for listing and looking up pets
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::pet::PetRecord;
use std::sync::Arc;

#[derive(Clone)]
pub struct PetService {
    repository: Arc<dyn TelemetryRepository>,
}

impl PetService {
    pub fn new(repository: Arc<dyn TelemetryRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_pets(&self) -> anyhow::Result<Vec<PetRecord>> {
        self.repository.list_pets().await
    }

    pub async fn get_pet(&self, id: &str) -> anyhow::Result<Option<PetRecord>> {
        let pets = self.repository.list_pets().await?;
        Ok(pets.into_iter().find(|p| p.id == id))
    }
}
