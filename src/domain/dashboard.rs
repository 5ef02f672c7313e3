// Dashboard domain model
use super::alert::Alert;
use super::pet::{GeoPoint, PetRecord, PetTab};
use super::status::Severity;
use super::telemetry::{CardData, ChartData};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub online: bool,
    pub label: &'static str,
}

impl ConnectionStatus {
    pub fn new(online: bool) -> Self {
        let label = if online { "Online" } else { "Offline" };
        Self { online, label }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub title: String,
    pub pets: Vec<PetTab>,
    pub selected_pet_id: Option<String>,
    pub connection: ConnectionStatus,
    pub cards: Vec<CardData>,
    pub location: Option<GeoPoint>,
    pub last_update: Option<String>,
    pub charts: Vec<ChartData>,
}

/// Summary figures for the stats panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_pets: usize,
    pub active_alerts: usize,
    pub critical_alerts: usize,
    pub average_heart_rate: Option<f64>,
    pub average_activity: Option<f64>,
}

impl Stats {
    pub fn new(pets: &[PetRecord], alerts: &[Alert]) -> Self {
        let average = |f: fn(&PetRecord) -> f64| {
            (!pets.is_empty()).then(|| pets.iter().map(f).sum::<f64>() / pets.len() as f64)
        };

        Self {
            total_pets: pets.len(),
            active_alerts: alerts.len(),
            critical_alerts: alerts
                .iter()
                .filter(|a| a.severity == Severity::Critical)
                .count(),
            average_heart_rate: average(|p| p.heart_rate),
            average_activity: average(|p| p.activity_level),
        }
    }
}

pub fn dashboard_title(pet_name: Option<&str>) -> String {
    match pet_name {
        Some(name) => format!("{} Health Monitor", name),
        None => "Pet Health Monitor".to_string(),
    }
}
