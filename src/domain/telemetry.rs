// Telemetry data domain models
use super::status::{Metric, Severity};
use serde::Serialize;

/// One sample of the vitals time series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub time: String,
    pub heart_rate: f64,
    pub temperature: f64,
    pub activity: f64,
}

impl SeriesPoint {
    pub fn new(time: &str, heart_rate: f64, temperature: f64, activity: f64) -> Self {
        Self {
            time: time.to_string(),
            heart_rate,
            temperature,
            activity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CardData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub precision: i32,
    pub label: String,
    pub severity: Severity,
}

impl CardData {
    pub fn new(
        id: String,
        title: String,
        unit: String,
        value: f64,
        precision: i32,
        label: String,
        severity: Severity,
    ) -> Self {
        Self {
            id,
            title,
            unit,
            value,
            precision,
            label,
            severity,
        }
    }
}

/// Binds one plotted line/area to a key of `SeriesPoint`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesBinding {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub data_key: String,
}

impl SeriesBinding {
    pub fn new(id: String, name: String, color: Option<String>, metric: Metric) -> Self {
        Self {
            id,
            name,
            color,
            data_key: metric.data_key().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Area,
}

impl ChartKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "area" => ChartKind::Area,
            _ => ChartKind::Line,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub x_key: String,
    pub series: Vec<SeriesBinding>,
    pub points: Vec<SeriesPoint>,
}

impl ChartData {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        title: String,
        unit: Option<String>,
        kind: ChartKind,
        y_min: Option<f64>,
        y_max: Option<f64>,
        series: Vec<SeriesBinding>,
        points: Vec<SeriesPoint>,
    ) -> Self {
        Self {
            id,
            title,
            unit,
            kind,
            y_min,
            y_max,
            x_key: "time".to_string(),
            series,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_keys_address_point_fields() {
        let point = SeriesPoint::new("08:00", 88.0, 38.4, 65.0);
        let json = serde_json::to_value(&point).unwrap();

        assert_eq!(json[Metric::HeartRate.data_key()], 88.0);
        assert_eq!(json[Metric::Temperature.data_key()], 38.4);
        assert_eq!(json[Metric::ActivityLevel.data_key()], 65.0);
        assert_eq!(json["time"], "08:00");
    }

    #[test]
    fn test_chart_kind_parse() {
        assert_eq!(ChartKind::parse("area"), ChartKind::Area);
        assert_eq!(ChartKind::parse("line"), ChartKind::Line);
        assert_eq!(ChartKind::parse("multiLine"), ChartKind::Line);
    }
}
