use crate::domain::alert::Geofence;
use crate::domain::status::Metric;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub source: SourceSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Mock,
    Influx,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub kind: SourceKind,
    /// A feed is online while its newest sample is at most this old
    pub online_window_secs: i64,
    pub influx: Option<InfluxSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxSettings {
    pub host: String,
    pub token: String,
    pub database: String,
    pub retention_policy: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub default_hours: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetsConfig {
    #[serde(default)]
    pub cards: Vec<CardConfig>,
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CardConfig {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub precision: i32,
    pub metric: Metric,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: String,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub metric: Metric,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GeofencesConfig {
    #[serde(default)]
    pub geofences: Vec<Geofence>,
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        let card = |id: &str, title: &str, unit: &str, precision, metric| CardConfig {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.to_string(),
            precision,
            metric,
        };
        let series = |id: &str, name: &str, color: &str, metric| SeriesConfig {
            id: id.to_string(),
            name: name.to_string(),
            color: Some(color.to_string()),
            metric,
        };

        Self {
            cards: vec![
                card("heart_rate", "Heart Rate", "BPM", 0, Metric::HeartRate),
                card("temperature", "Temperature", "°C", 1, Metric::Temperature),
                card("activity", "Activity", "%", 0, Metric::ActivityLevel),
            ],
            charts: vec![
                ChartConfig {
                    id: "vitals".to_string(),
                    title: "Vital Signs".to_string(),
                    unit: None,
                    kind: "line".to_string(),
                    y_min: None,
                    y_max: None,
                    series: vec![
                        series("heart_rate", "Heart Rate", "#ef4444", Metric::HeartRate),
                        series("temperature", "Temperature", "#3b82f6", Metric::Temperature),
                    ],
                },
                ChartConfig {
                    id: "activity".to_string(),
                    title: "Activity Level".to_string(),
                    unit: Some("%".to_string()),
                    kind: "area".to_string(),
                    y_min: Some(0.0),
                    y_max: Some(100.0),
                    series: vec![series("activity", "Activity", "#10b981", Metric::ActivityLevel)],
                },
            ],
        }
    }
}

fn app_config_builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .set_default("source.kind", "mock")?
        .set_default("source.online_window_secs", 300)?
        .set_default("dashboard.default_hours", 6)?)
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = app_config_builder()?
        .add_source(config::File::with_name("config/petwatch").required(false))
        .add_source(config::Environment::with_prefix("PETWATCH").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Falls back to the built-in layout when `config/widgets` is absent
pub fn load_widgets_config() -> anyhow::Result<WidgetsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/widgets").required(false))
        .build()?;

    let widgets: WidgetsConfig = settings.try_deserialize()?;
    if widgets.cards.is_empty() && widgets.charts.is_empty() {
        tracing::info!("No widget layout configured, using the built-in one");
        return Ok(WidgetsConfig::default());
    }

    Ok(widgets)
}

pub fn load_geofences() -> anyhow::Result<Vec<Geofence>> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/geofences").required(false))
        .build()?;

    let parsed: GeofencesConfig = settings.try_deserialize()?;
    Ok(parsed.geofences)
}

/// Replace template variables in a query string
pub fn prepare_query(query: &str, vars: &HashMap<String, String>) -> String {
    let mut result = query.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_query() {
        let mut vars = HashMap::new();
        vars.insert("pet_id".to_string(), "2".to_string());
        vars.insert("hours".to_string(), "12".to_string());

        let query = "SELECT * FROM pet_vitals WHERE pet_id='${pet_id}' AND time >= now() - ${hours}h";
        let result = prepare_query(query, &vars);

        assert_eq!(result, "SELECT * FROM pet_vitals WHERE pet_id='2' AND time >= now() - 12h");
    }

    #[test]
    fn test_app_config_defaults() {
        let config: AppConfig = app_config_builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.source.kind, SourceKind::Mock);
        assert_eq!(config.source.online_window_secs, 300);
        assert!(config.source.influx.is_none());
        assert_eq!(config.dashboard.default_hours, 6);
    }

    #[test]
    fn test_widgets_from_toml() {
        let toml = r##"
            [[cards]]
            id = "hr"
            title = "Pulse"
            unit = "BPM"
            precision = 0
            metric = "heart_rate"

            [[charts]]
            id = "activity"
            title = "Activity"
            kind = "area"
            [[charts.series]]
            id = "activity"
            name = "Activity"
            color = "#10b981"
            metric = "activity_level"
        "##;

        let widgets: WidgetsConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(widgets.cards.len(), 1);
        assert_eq!(widgets.cards[0].metric, Metric::HeartRate);
        assert_eq!(widgets.charts[0].series[0].metric, Metric::ActivityLevel);
    }

    #[test]
    fn test_default_widgets_layout() {
        let widgets = WidgetsConfig::default();
        let ids: Vec<&str> = widgets.cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["heart_rate", "temperature", "activity"]);
        assert_eq!(widgets.charts[0].kind, "line");
        assert_eq!(widgets.charts[1].kind, "area");
    }
}
