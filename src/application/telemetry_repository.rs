// Repository trait for telemetry data access
use crate::domain::pet::PetRecord;
use crate::domain::telemetry::SeriesPoint;
use async_trait::async_trait;

#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// Latest snapshot of every monitored pet, in display order
    async fn list_pets(&self) -> anyhow::Result<Vec<PetRecord>>;

    /// Vitals time series for a pet over the last `hours`, oldest first
    async fn vitals_history(&self, pet_id: &str, hours: i32) -> anyhow::Result<Vec<SeriesPoint>>;

    /// Whether the feed behind this repository is currently live
    async fn is_connected(&self) -> anyhow::Result<bool>;
}
