// Domain layer - Pure models and rules, no I/O
pub mod alert;
pub mod dashboard;
pub mod pet;
pub mod status;
pub mod stream;
pub mod telemetry;
