// Application layer - Use cases over the telemetry repository
pub mod alert_service;
pub mod dashboard_service;
pub mod pet_service;
pub mod streaming_service;
pub mod telemetry_repository;
