// Streaming dashboard service - Progressive loading over chunked JSON
use crate::application::dashboard_service::{build_card, build_chart, chart_bindings};
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::dashboard::{dashboard_title, ConnectionStatus};
use crate::domain::pet::{resolve_selection, PetRecord, PetTab};
use crate::domain::stream::{
    CardSkeleton, ChartSkeleton, ChartUpdate, CompletionEvent, DashboardSkeleton, StreamMessage,
};
use crate::domain::telemetry::ChartKind;
use crate::infrastructure::config::WidgetsConfig;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

const CHANNEL_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct StreamingDashboardService {
    repository: Arc<dyn TelemetryRepository>,
    widgets_config: WidgetsConfig,
}

impl StreamingDashboardService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, widgets_config: WidgetsConfig) -> Self {
        Self {
            repository,
            widgets_config,
        }
    }

    pub async fn stream_dashboard(&self, selected: Option<&str>, hours: i32) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let start_time = Instant::now();

        // 0. The selection decides the skeleton, so pets are fetched up front
        let pets = match self.repository.list_pets().await {
            Ok(pets) => pets,
            Err(e) => {
                tracing::warn!("Error fetching pets for stream: {}", e);
                Vec::new()
            }
        };
        let pet = resolve_selection(&pets, selected).cloned();

        let online = match self.repository.is_connected().await {
            Ok(online) => online,
            Err(e) => {
                tracing::warn!("Error checking feed liveness: {}", e);
                false
            }
        };

        // 1. Send skeleton immediately
        let skeleton = self.build_skeleton(&pets, pet.as_ref(), ConnectionStatus::new(online));
        let _ = tx.send(StreamMessage::Skeleton(skeleton)).await;

        // Each task yields how many widgets it actually delivered
        let mut tasks: JoinSet<usize> = JoinSet::new();

        // Without a selected pet there is nothing to fill in
        if let Some(pet) = pet {
            // 2. Card values come from the selected pet's snapshot
            {
                let tx = tx.clone();
                let cards = self.widgets_config.cards.clone();
                let pet = pet.clone();
                tasks.spawn(async move {
                    let mut sent = 0;
                    for card in &cards {
                        let update = StreamMessage::CardUpdate(build_card(&pet, card));
                        if tx.send(update).await.is_err() {
                            break;
                        }
                        sent += 1;
                    }
                    sent
                });
            }

            // 3. Charts share a single history fetch
            let tx = tx.clone();
            let repo = self.repository.clone();
            let charts = self.widgets_config.charts.clone();
            let pet_id = pet.id;
            tasks.spawn(async move {
                let points = match repo.vitals_history(&pet_id, hours).await {
                    Ok(points) => points,
                    Err(e) => {
                        tracing::warn!("Error fetching vitals history for {}: {}", pet_id, e);
                        return 0;
                    }
                };

                let mut sent = 0;
                for chart in charts.iter().filter_map(|c| build_chart(c, &points)) {
                    let update = StreamMessage::ChartUpdate(ChartUpdate {
                        chart_id: chart.id,
                        points: chart.points,
                    });
                    if tx.send(update).await.is_err() {
                        break;
                    }
                    sent += 1;
                }
                sent
            });
        }

        // 4. Complete once every fetch task has finished
        tokio::spawn(async move {
            let mut total_widgets = 0;
            while let Some(result) = tasks.join_next().await {
                match result {
                    Ok(sent) => total_widgets += sent,
                    Err(e) => tracing::error!("Dashboard stream task failed: {}", e),
                }
            }

            let duration_ms = start_time.elapsed().as_millis() as i64;
            tracing::debug!("Dashboard stream finished in {}ms", duration_ms);
            let complete = CompletionEvent {
                total_widgets,
                duration_ms,
            };
            let _ = tx.send(StreamMessage::Complete(complete)).await;
        });

        rx
    }

    fn build_skeleton(
        &self,
        pets: &[PetRecord],
        pet: Option<&PetRecord>,
        connection: ConnectionStatus,
    ) -> DashboardSkeleton {
        let cards = match pet {
            Some(_) => self
                .widgets_config
                .cards
                .iter()
                .map(|c| CardSkeleton {
                    id: c.id.clone(),
                    title: c.title.clone(),
                    unit: c.unit.clone(),
                    precision: c.precision,
                })
                .collect(),
            None => Vec::new(),
        };

        // Only include charts that bind at least one series, and only for a selected pet
        let charts = self
            .widgets_config
            .charts
            .iter()
            .filter(|c| pet.is_some() && !c.series.is_empty())
            .map(|c| ChartSkeleton {
                id: c.id.clone(),
                title: c.title.clone(),
                unit: c.unit.clone(),
                kind: ChartKind::parse(&c.kind),
                y_min: c.y_min,
                y_max: c.y_max,
                x_key: "time".to_string(),
                series: chart_bindings(c),
            })
            .collect();

        DashboardSkeleton {
            title: dashboard_title(pet.map(|p| p.name.as_str())),
            pets: pets.iter().map(PetTab::from).collect(),
            selected_pet_id: pet.map(|p| p.id.clone()),
            connection,
            cards,
            charts,
        }
    }
}
