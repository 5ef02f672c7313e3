// Pet domain model
use super::status::Metric;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Latest telemetry snapshot for one monitored pet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetRecord {
    pub id: String,
    pub name: String,
    /// Beats per minute
    pub heart_rate: f64,
    /// Degrees Celsius
    pub temperature: f64,
    /// 0-100 percent
    pub activity_level: f64,
    pub location: GeoPoint,
    pub last_update: String,
}

impl PetRecord {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::HeartRate => self.heart_rate,
            Metric::Temperature => self.temperature,
            Metric::ActivityLevel => self.activity_level,
        }
    }
}

/// Tab entry shown in the pet selector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetTab {
    pub id: String,
    pub name: String,
}

impl From<&PetRecord> for PetTab {
    fn from(pet: &PetRecord) -> Self {
        Self {
            id: pet.id.clone(),
            name: pet.name.clone(),
        }
    }
}

/// Resolve the active pet for a tab selection.
/// - A known id selects that pet
/// - No id, or an id that is not in the list, falls back to the first pet
/// - `None` only when the list is empty
pub fn resolve_selection<'a>(pets: &'a [PetRecord], selected: Option<&str>) -> Option<&'a PetRecord> {
    selected
        .and_then(|id| pets.iter().find(|p| p.id == id))
        .or_else(|| pets.first())
}
