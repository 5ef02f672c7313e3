// Application state for HTTP handlers
use crate::application::alert_service::AlertService;
use crate::application::dashboard_service::DashboardService;
use crate::application::pet_service::PetService;
use crate::application::streaming_service::StreamingDashboardService;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::alert::Geofence;
use crate::infrastructure::config::WidgetsConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pet_service: PetService,
    pub dashboard_service: DashboardService,
    pub streaming_service: StreamingDashboardService,
    pub alert_service: AlertService,
    pub default_hours: i32,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn TelemetryRepository>,
        widgets_config: WidgetsConfig,
        geofences: Vec<Geofence>,
        default_hours: i32,
    ) -> Self {
        Self {
            pet_service: PetService::new(repository.clone()),
            dashboard_service: DashboardService::new(repository.clone(), widgets_config.clone()),
            streaming_service: StreamingDashboardService::new(repository.clone(), widgets_config),
            alert_service: AlertService::new(repository, geofences),
            default_hours,
        }
    }
}
