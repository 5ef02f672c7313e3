// InfluxDB repository implementation
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::pet::{GeoPoint, PetRecord};
use crate::domain::telemetry::SeriesPoint;
use crate::infrastructure::config::prepare_query;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

const MAX_POINTS_PER_SERIES: usize = 150;

const LATEST_VITALS_QUERY: &str = "SELECT heart_rate, temperature, activity_level, latitude, longitude \
     FROM pet_vitals WHERE time >= now() - 24h GROUP BY pet_id, pet_name ORDER BY time DESC LIMIT 1";

const HISTORY_QUERY: &str = "SELECT mean(heart_rate) AS heart_rate, mean(temperature) AS temperature, \
     mean(activity_level) AS activity FROM pet_vitals \
     WHERE pet_id = '${pet_id}' AND time >= now() - ${hours}h \
     GROUP BY time(${interval}s) fill(none)";

const NEWEST_SAMPLE_QUERY: &str = "SELECT last(heart_rate) FROM pet_vitals WHERE time >= now() - 24h";

#[derive(Debug, Clone)]
pub struct InfluxRepository {
    host: String,
    token: String,
    database: String,
    retention_policy: String,
    online_window_secs: i64,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResponse {
    results: Vec<InfluxQLResult>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResult {
    #[serde(default)]
    series: Option<Vec<InfluxQLSeries>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLSeries {
    #[allow(dead_code)]
    name: String,
    columns: Vec<String>,
    values: Vec<Vec<serde_json::Value>>,
    #[serde(default)]
    tags: Option<HashMap<String, String>>,
}

impl InfluxQLSeries {
    fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn tag(&self, name: &str) -> Option<&str> {
        self.tags.as_ref()?.get(name).map(String::as_str)
    }
}

fn row_f64(row: &[serde_json::Value], idx: Option<usize>) -> Option<f64> {
    row.get(idx?)?.as_f64()
}

fn row_time(row: &[serde_json::Value], idx: Option<usize>) -> Option<DateTime<Utc>> {
    let raw = row.get(idx?)?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

impl InfluxQLResponse {
    fn into_series(self) -> Vec<InfluxQLSeries> {
        self.results
            .into_iter()
            .next()
            .and_then(|r| r.series)
            .unwrap_or_default()
    }
}

impl InfluxRepository {
    pub fn new(
        host: String,
        token: String,
        database: String,
        retention_policy: String,
        online_window_secs: i64,
    ) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            token,
            database,
            retention_policy,
            online_window_secs,
            client: reqwest::Client::new(),
        }
    }

    fn build_query_url(&self, query: &str) -> String {
        let encoded_query = urlencoding::encode(query);
        format!(
            "{}/query?db={}&rp={}&q={}",
            self.host, self.database, self.retention_policy, encoded_query
        )
    }

    async fn execute_query(&self, query: &str) -> Result<InfluxQLResponse> {
        let url = self.build_query_url(query);
        tracing::debug!("Executing InfluxQL query: {}", query);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to InfluxDB")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("InfluxDB query failed with status {}: {}", status, body);
        }

        let data = response
            .json::<InfluxQLResponse>()
            .await
            .context("Failed to parse InfluxDB response")?;

        if let Some(error) = data.results.first().and_then(|r| r.error.as_ref()) {
            anyhow::bail!("InfluxDB query error: {}", error);
        }

        Ok(data)
    }
}

#[async_trait]
impl TelemetryRepository for InfluxRepository {
    async fn list_pets(&self) -> Result<Vec<PetRecord>> {
        let response = self.execute_query(LATEST_VITALS_QUERY).await?;
        let pets = parse_latest_vitals(response.into_series(), Utc::now());

        tracing::debug!("Found {} pets in pet_vitals", pets.len());
        Ok(pets)
    }

    async fn vitals_history(&self, pet_id: &str, hours: i32) -> Result<Vec<SeriesPoint>> {
        let query = history_query(pet_id, hours);
        let response = self.execute_query(&query).await?;
        let points = parse_history(response.into_series());

        // Apply server-side downsampling if needed
        Ok(downsample_points(points, MAX_POINTS_PER_SERIES))
    }

    async fn is_connected(&self) -> Result<bool> {
        let response = self.execute_query(NEWEST_SAMPLE_QUERY).await?;
        let newest = response.into_series().into_iter().find_map(|s| {
            let time_idx = s.column("time");
            s.values.first().and_then(|row| row_time(row, time_idx))
        });

        Ok(is_fresh(newest, Utc::now(), self.online_window_secs))
    }
}

/// Feed is live while its newest sample is at most `window_secs` old.
/// A sample stamped ahead of `now` (clock skew) counts as fresh.
fn is_fresh(newest: Option<DateTime<Utc>>, now: DateTime<Utc>, window_secs: i64) -> bool {
    match newest {
        Some(time) => (now - time).num_seconds() <= window_secs,
        None => false,
    }
}

/// History query for a pet; ranges below one hour are raised to one hour
fn history_query(pet_id: &str, hours: i32) -> String {
    let hours = hours.max(1);
    let mut vars = HashMap::new();
    vars.insert("pet_id".to_string(), escape_tag_value(pet_id));
    vars.insert("hours".to_string(), hours.to_string());
    vars.insert("interval".to_string(), bucket_interval_secs(hours).to_string());
    prepare_query(HISTORY_QUERY, &vars)
}

fn parse_latest_vitals(series: Vec<InfluxQLSeries>, now: DateTime<Utc>) -> Vec<PetRecord> {
    let mut pets = Vec::new();

    for s in &series {
        let Some(id) = s.tag("pet_id") else {
            tracing::warn!("Skipping pet_vitals series without pet_id tag");
            continue;
        };
        let Some(row) = s.values.first() else {
            continue;
        };

        let value = |column: &str| row_f64(row, s.column(column));
        let (Some(heart_rate), Some(temperature)) = (value("heart_rate"), value("temperature")) else {
            tracing::warn!("Skipping pet {} with incomplete vitals", id);
            continue;
        };

        pets.push(PetRecord {
            id: id.to_string(),
            name: s.tag("pet_name").unwrap_or(id).to_string(),
            heart_rate,
            temperature,
            activity_level: value("activity_level").unwrap_or(0.0),
            location: GeoPoint::new(
                value("latitude").unwrap_or(0.0),
                value("longitude").unwrap_or(0.0),
            ),
            last_update: row_time(row, s.column("time"))
                .map(|t| format_age(now - t))
                .unwrap_or_else(|| "unknown".to_string()),
        });
    }

    pets
}

fn parse_history(series: Vec<InfluxQLSeries>) -> Vec<SeriesPoint> {
    let mut points = Vec::new();

    for s in &series {
        let time_idx = s.column("time");
        let (hr_idx, temp_idx, act_idx) = (
            s.column("heart_rate"),
            s.column("temperature"),
            s.column("activity"),
        );

        for row in &s.values {
            let Some(time) = row_time(row, time_idx) else {
                continue;
            };
            points.push(SeriesPoint::new(
                &time.format("%H:%M").to_string(),
                row_f64(row, hr_idx).unwrap_or(0.0),
                row_f64(row, temp_idx).unwrap_or(0.0),
                row_f64(row, act_idx).unwrap_or(0.0),
            ));
        }
    }

    points
}

/// GROUP BY bucket width so a range yields about `MAX_POINTS_PER_SERIES` buckets
fn bucket_interval_secs(hours: i32) -> i64 {
    let range_secs = i64::from(hours) * 3600;
    (range_secs / MAX_POINTS_PER_SERIES as i64).max(60)
}

fn escape_tag_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Display string for the age of the newest sample
fn format_age(age: chrono::Duration) -> String {
    let secs = age.num_seconds().max(0);
    match secs {
        0..60 => "just now".to_string(),
        60..3600 => format!("{} min ago", secs / 60),
        3600..86400 => format!("{} h ago", secs / 3600),
        _ => format!("{} d ago", secs / 86400),
    }
}

/// Downsample points using bucket averaging
fn downsample_points(points: Vec<SeriesPoint>, max_points: usize) -> Vec<SeriesPoint> {
    if points.is_empty() || points.len() <= max_points {
        return points;
    }

    let bucket_size = points.len().div_ceil(max_points);
    let mut downsampled = Vec::with_capacity(max_points);

    for chunk in points.chunks(bucket_size) {
        // Use middle point's label and average values
        let mid_idx = chunk.len() / 2;
        let n = chunk.len() as f64;
        let avg = |f: fn(&SeriesPoint) -> f64| chunk.iter().map(f).sum::<f64>() / n;

        downsampled.push(SeriesPoint::new(
            &chunk[mid_idx].time,
            avg(|p| p.heart_rate),
            avg(|p| p.temperature),
            avg(|p| p.activity),
        ));
    }

    downsampled
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(json: &str) -> Vec<InfluxQLSeries> {
        serde_json::from_str::<InfluxQLResponse>(json).unwrap().into_series()
    }

    #[test]
    fn test_parse_latest_vitals() {
        let series = parse(
            r#"{"results":[{"series":[{
                "name":"pet_vitals",
                "tags":{"pet_id":"7","pet_name":"Rex"},
                "columns":["time","heart_rate","temperature","activity_level","latitude","longitude"],
                "values":[["2026-10-18T10:00:00Z",92.0,38.9,55.0,51.5,-0.12]]
            }]}]}"#,
        );
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 10, 3, 30).unwrap();
        let pets = parse_latest_vitals(series, now);

        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].id, "7");
        assert_eq!(pets[0].name, "Rex");
        assert_eq!(pets[0].heart_rate, 92.0);
        assert_eq!(pets[0].location, GeoPoint::new(51.5, -0.12));
        assert_eq!(pets[0].last_update, "3 min ago");
    }

    #[test]
    fn test_parse_history_labels() {
        let series = parse(
            r#"{"results":[{"series":[{
                "name":"pet_vitals",
                "columns":["time","heart_rate","temperature","activity"],
                "values":[
                    ["2026-10-18T08:00:00Z",80.0,38.2,40.0],
                    ["2026-10-18T08:10:00Z",82.0,38.3,null]
                ]
            }]}]}"#,
        );
        let points = parse_history(series);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0], SeriesPoint::new("08:00", 80.0, 38.2, 40.0));
        assert_eq!(points[1].time, "08:10");
        assert_eq!(points[1].activity, 0.0);
    }

    #[test]
    fn test_downsample_points() {
        let points: Vec<SeriesPoint> = (0..10)
            .map(|i| SeriesPoint::new(&format!("{:02}:00", i), i as f64, 38.0, 50.0))
            .collect();

        let down = downsample_points(points.clone(), 5);
        assert_eq!(down.len(), 5);
        assert_eq!(down[0].heart_rate, 0.5);
        assert_eq!(down[0].time, "01:00");

        assert_eq!(downsample_points(points, 20).len(), 10);
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(chrono::Duration::seconds(5)), "just now");
        assert_eq!(format_age(chrono::Duration::seconds(150)), "2 min ago");
        assert_eq!(format_age(chrono::Duration::hours(3)), "3 h ago");
        assert_eq!(format_age(chrono::Duration::days(2)), "2 d ago");
        assert_eq!(format_age(chrono::Duration::seconds(-10)), "just now");
    }

    #[test]
    fn test_query_helpers() {
        assert_eq!(escape_tag_value("o'neil"), "o\\'neil");
        assert_eq!(bucket_interval_secs(6), 144);
        assert_eq!(bucket_interval_secs(1), 60);

        let repo = InfluxRepository::new(
            "http://influx:8086/".to_string(),
            "t".to_string(),
            "pets".to_string(),
            "autogen".to_string(),
            300,
        );
        assert_eq!(
            repo.build_query_url("SHOW MEASUREMENTS"),
            "http://influx:8086/query?db=pets&rp=autogen&q=SHOW%20MEASUREMENTS"
        );
    }

    #[test]
    fn test_history_query_clamps_range() {
        let query = history_query("1", -3);
        assert!(query.contains("time >= now() - 1h"));
        assert!(query.contains("GROUP BY time(60s)"));
        assert!(!query.contains("-3h"));

        let query = history_query("1", 0);
        assert!(query.contains("time >= now() - 1h"));

        let query = history_query("o'neil", 6);
        assert!(query.contains("pet_id = 'o\\'neil'"));
        assert!(query.contains("time >= now() - 6h"));
        assert!(query.contains("GROUP BY time(144s)"));
    }

    #[test]
    fn test_is_fresh_window_edges() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();

        assert!(is_fresh(Some(now - chrono::Duration::seconds(300)), now, 300));
        assert!(!is_fresh(Some(now - chrono::Duration::seconds(301)), now, 300));
        assert!(is_fresh(Some(now), now, 300));
        assert!(is_fresh(Some(now + chrono::Duration::seconds(30)), now, 300));
        assert!(!is_fresh(None, now, 300));
    }
}
