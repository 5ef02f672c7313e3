// Dashboard service - Use case for building the dashboard view
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::dashboard::{dashboard_title, ConnectionStatus, DashboardView};
use crate::domain::pet::{resolve_selection, PetRecord, PetTab};
use crate::domain::status::{classify, vital_label};
use crate::domain::telemetry::{CardData, ChartData, ChartKind, SeriesBinding, SeriesPoint};
use crate::infrastructure::config::{CardConfig, ChartConfig, WidgetsConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn TelemetryRepository>,
    widgets_config: WidgetsConfig,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, widgets_config: WidgetsConfig) -> Self {
        Self {
            repository,
            widgets_config,
        }
    }

    pub async fn get_dashboard(&self, selected: Option<&str>, hours: i32) -> anyhow::Result<DashboardView> {
        let pets = self.repository.list_pets().await?;
        let pet = resolve_selection(&pets, selected);

        if let (Some(requested), Some(pet)) = (selected, pet) {
            if pet.id != requested {
                tracing::debug!("Unknown pet {}, falling back to {}", requested, pet.id);
            }
        }

        let connection = self.connection_status().await;

        let cards = match pet {
            Some(pet) => self
                .widgets_config
                .cards
                .iter()
                .map(|card| build_card(pet, card))
                .collect(),
            None => Vec::new(),
        };

        let charts = match self.fetch_history(pet.map(|p| p.id.as_str()), hours).await {
            Some(points) => self
                .widgets_config
                .charts
                .iter()
                .filter_map(|chart| build_chart(chart, &points))
                .collect(),
            None => Vec::new(),
        };

        Ok(DashboardView {
            title: dashboard_title(pet.map(|p| p.name.as_str())),
            pets: pets.iter().map(PetTab::from).collect(),
            selected_pet_id: pet.map(|p| p.id.clone()),
            connection,
            cards,
            location: pet.map(|p| p.location),
            last_update: pet.map(|p| p.last_update.clone()),
            charts,
        })
    }

    pub async fn connection_status(&self) -> ConnectionStatus {
        match self.repository.is_connected().await {
            Ok(online) => ConnectionStatus::new(online),
            Err(e) => {
                tracing::warn!("Error checking feed liveness: {}", e);
                ConnectionStatus::new(false)
            }
        }
    }

    async fn fetch_history(&self, pet_id: Option<&str>, hours: i32) -> Option<Vec<SeriesPoint>> {
        match self.repository.vitals_history(pet_id.unwrap_or_default(), hours).await {
            Ok(points) => Some(points),
            Err(e) => {
                tracing::warn!("Error fetching vitals history: {}", e);
                None
            }
        }
    }
}

pub fn build_card(pet: &PetRecord, card: &CardConfig) -> CardData {
    let value = pet.value(card.metric);

    CardData::new(
        card.id.clone(),
        card.title.clone(),
        card.unit.clone(),
        value,
        card.precision,
        vital_label(value, card.metric).to_string(),
        classify(value, card.metric),
    )
}

pub fn chart_bindings(chart: &ChartConfig) -> Vec<SeriesBinding> {
    chart
        .series
        .iter()
        .map(|s| SeriesBinding::new(s.id.clone(), s.name.clone(), s.color.clone(), s.metric))
        .collect()
}

/// Only charts with at least one bound series and some data are drawn
pub fn build_chart(chart: &ChartConfig, points: &[SeriesPoint]) -> Option<ChartData> {
    if chart.series.is_empty() || points.is_empty() {
        return None;
    }

    Some(ChartData::new(
        chart.id.clone(),
        chart.title.clone(),
        chart.unit.clone(),
        ChartKind::parse(&chart.kind),
        chart.y_min,
        chart.y_max,
        chart_bindings(chart),
        points.to_vec(),
    ))
}
