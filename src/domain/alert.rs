// Alert domain model - health and safety alerts derived from a pet snapshot
use super::pet::{GeoPoint, PetRecord};
use super::status::{classify, deviation, Deviation, Metric, Severity};
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Health,
    Safety,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub pet_id: String,
    pub kind: AlertKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<Metric>,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Circular safe zone around a point
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geofence {
    pub pet_id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub radius_m: f64,
}

impl Geofence {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Great-circle distance in meters (haversine)
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin() * EARTH_RADIUS_M
}

/// Alerts for vitals outside their normal band
pub fn health_alerts(pet: &PetRecord) -> Vec<Alert> {
    [
        (Metric::HeartRate, pet.heart_rate, "BPM"),
        (Metric::Temperature, pet.temperature, "°C"),
    ]
    .into_iter()
    .filter_map(|(metric, value, unit)| {
        let severity = classify(value, metric);
        if severity == Severity::Normal {
            return None;
        }
        let side = deviation(value, metric)?;
        let side_name = match side {
            Deviation::Low => "Low",
            Deviation::High => "High",
        };

        Some(Alert {
            pet_id: pet.id.clone(),
            kind: AlertKind::Health,
            metric: Some(metric),
            severity,
            title: format!("{} {}", side_name, metric.display_name()),
            description: format!(
                "{} {} is {} {}",
                pet.name,
                metric.display_name().to_lowercase(),
                value,
                unit
            ),
            recommendation: recommendation(metric, side).map(str::to_string),
        })
    })
    .collect()
}

fn recommendation(metric: Metric, side: Deviation) -> Option<&'static str> {
    match (metric, side) {
        (Metric::Temperature, Deviation::High) => {
            Some("Check for overheating - ensure pet has access to water and shade")
        }
        (Metric::HeartRate, Deviation::Low) => {
            Some("Monitor closely - low heart rate may indicate distress")
        }
        _ => None,
    }
}

/// Alerts for every geofence of this pet that it is currently outside of
pub fn geofence_alerts(pet: &PetRecord, geofences: &[Geofence]) -> Vec<Alert> {
    geofences
        .iter()
        .filter(|g| g.pet_id == pet.id)
        .filter_map(|g| {
            let distance = distance_m(pet.location, g.center());
            (distance > g.radius_m).then(|| Alert {
                pet_id: pet.id.clone(),
                kind: AlertKind::Safety,
                metric: None,
                severity: Severity::Critical,
                title: "Geofence Violation".to_string(),
                description: format!("Pet left safe zone: {}", g.name),
                recommendation: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(heart_rate: f64, temperature: f64) -> PetRecord {
        PetRecord {
            id: "1".to_string(),
            name: "Max".to_string(),
            heart_rate,
            temperature,
            activity_level: 50.0,
            location: GeoPoint::new(40.7128, -74.0060),
            last_update: "now".to_string(),
        }
    }

    #[test]
    fn test_distance() {
        let a = GeoPoint::new(40.7128, -74.0060);
        let b = GeoPoint::new(40.7589, -73.9851);
        assert_eq!(distance_m(a, a), 0.0);

        let d = distance_m(a, b);
        assert!(d > 5_000.0 && d < 6_000.0, "distance {}", d);
        assert!((distance_m(b, a) - d).abs() < 1e-6);
    }

    #[test]
    fn test_no_alerts_for_normal_vitals() {
        assert!(health_alerts(&pet(85.0, 38.5)).is_empty());
    }

    #[test]
    fn test_health_alerts() {
        let alerts = health_alerts(&pet(55.0, 39.2));
        assert_eq!(alerts.len(), 2);

        assert_eq!(alerts[0].title, "Low Heart Rate");
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(
            alerts[0].recommendation.as_deref(),
            Some("Monitor closely - low heart rate may indicate distress")
        );

        assert_eq!(alerts[1].title, "High Temperature");
        assert_eq!(alerts[1].severity, Severity::Warning);
        assert!(alerts[1].recommendation.as_deref().unwrap().contains("overheating"));
    }

    #[test]
    fn test_geofence_alerts() {
        let home = Geofence {
            pet_id: "1".to_string(),
            name: "Home".to_string(),
            lat: 40.7589,
            lng: -73.9851,
            radius_m: 500.0,
        };
        let other_pet = Geofence {
            pet_id: "2".to_string(),
            ..home.clone()
        };

        let alerts = geofence_alerts(&pet(85.0, 38.5), &[home.clone(), other_pet]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Safety);
        assert_eq!(alerts[0].description, "Pet left safe zone: Home");

        let wide = Geofence {
            radius_m: 10_000.0,
            ..home
        };
        assert!(geofence_alerts(&pet(85.0, 38.5), &[wide]).is_empty());
    }
}
