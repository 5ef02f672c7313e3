// Alert service - Use cases for the alerts and stats panels
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::alert::{geofence_alerts, health_alerts, Alert, Geofence};
use crate::domain::dashboard::Stats;
use crate::domain::pet::PetRecord;
use crate::domain::status::Severity;
use std::sync::Arc;

/// Alerts returned when the caller sets no limit
pub const DEFAULT_ALERT_LIMIT: usize = 50;

#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub pet_id: Option<String>,
    pub severity: Option<Severity>,
    pub limit: Option<usize>,
}

#[derive(Clone)]
pub struct AlertService {
    repository: Arc<dyn TelemetryRepository>,
    geofences: Vec<Geofence>,
}

impl AlertService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, geofences: Vec<Geofence>) -> Self {
        Self {
            repository,
            geofences,
        }
    }

    pub async fn list_alerts(&self, filter: &AlertFilter) -> anyhow::Result<Vec<Alert>> {
        let pets = self.repository.list_pets().await?;
        let alerts = self
            .alerts_for(&pets)
            .into_iter()
            .filter(|a| filter.pet_id.as_deref().is_none_or(|id| a.pet_id == id))
            .filter(|a| filter.severity.is_none_or(|s| a.severity == s))
            .take(filter.limit.unwrap_or(DEFAULT_ALERT_LIMIT))
            .collect();
        Ok(alerts)
    }

    pub async fn stats(&self) -> anyhow::Result<Stats> {
        let pets = self.repository.list_pets().await?;
        let alerts = self.alerts_for(&pets);
        Ok(Stats::new(&pets, &alerts))
    }

    fn alerts_for(&self, pets: &[PetRecord]) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for pet in pets {
            alerts.extend(health_alerts(pet));
            alerts.extend(geofence_alerts(pet, &self.geofences));
        }

        tracing::debug!("Derived {} alerts for {} pets", alerts.len(), pets.len());
        alerts
    }
}
