// In-memory repository serving a fixed telemetry snapshot
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::pet::{GeoPoint, PetRecord};
use crate::domain::telemetry::SeriesPoint;
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct MockRepository {
    pets: Vec<PetRecord>,
    series: Vec<SeriesPoint>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            pets: mock_pets(),
            series: mock_series(),
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

pub fn mock_pets() -> Vec<PetRecord> {
    vec![
        PetRecord {
            id: "1".to_string(),
            name: "Max".to_string(),
            heart_rate: 85.0,
            temperature: 38.5,
            activity_level: 75.0,
            location: GeoPoint::new(40.7128, -74.0060),
            last_update: "2 min ago".to_string(),
        },
        PetRecord {
            id: "2".to_string(),
            name: "Bella".to_string(),
            heart_rate: 78.0,
            temperature: 38.2,
            activity_level: 45.0,
            location: GeoPoint::new(40.7589, -73.9851),
            last_update: "5 min ago".to_string(),
        },
    ]
}

pub fn mock_series() -> Vec<SeriesPoint> {
    vec![
        SeriesPoint::new("00:00", 72.0, 38.1, 20.0),
        SeriesPoint::new("04:00", 68.0, 38.0, 10.0),
        SeriesPoint::new("08:00", 88.0, 38.4, 65.0),
        SeriesPoint::new("12:00", 95.0, 38.7, 80.0),
        SeriesPoint::new("16:00", 90.0, 38.6, 70.0),
        SeriesPoint::new("20:00", 78.0, 38.3, 35.0),
    ]
}

#[async_trait]
impl TelemetryRepository for MockRepository {
    async fn list_pets(&self) -> Result<Vec<PetRecord>> {
        Ok(self.pets.clone())
    }

    /// Same series for every pet and range
    async fn vitals_history(&self, _pet_id: &str, _hours: i32) -> Result<Vec<SeriesPoint>> {
        Ok(self.series.clone())
    }

    async fn is_connected(&self) -> Result<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pet_ids_unique() {
        let pets = mock_pets();
        let ids: HashSet<&str> = pets.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), pets.len());
    }

    #[tokio::test]
    async fn test_series_order_preserved() {
        let repo = MockRepository::new();
        let points = repo.vitals_history("1", 6).await.unwrap();

        let times: Vec<&str> = points.iter().map(|p| p.time.as_str()).collect();
        assert_eq!(times, vec!["00:00", "04:00", "08:00", "12:00", "16:00", "20:00"]);
    }
}
