// Vital sign classification
use serde::{Deserialize, Serialize};

/// Severity band of a vital reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Severity::Normal),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            other => Err(other.to_string()),
        }
    }
}

/// Telemetry metric carried by a pet record and by each series point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    HeartRate,
    Temperature,
    #[serde(alias = "activity")]
    ActivityLevel,
}

impl Metric {
    /// Key of this metric in a serialized `SeriesPoint`
    pub fn data_key(&self) -> &'static str {
        match self {
            Metric::HeartRate => "heartRate",
            Metric::Temperature => "temperature",
            Metric::ActivityLevel => "activity",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::HeartRate => "Heart Rate",
            Metric::Temperature => "Temperature",
            Metric::ActivityLevel => "Activity",
        }
    }
}

/// Classify a reading into a severity band.
/// Metrics without thresholds are always `Normal`. NaN never crosses a
/// threshold so it is `Normal` too.
pub fn classify(value: f64, metric: Metric) -> Severity {
    let (critical_low, warning_low, warning_high, critical_high) = match metric {
        Metric::HeartRate => (60.0, 70.0, 100.0, 120.0),
        Metric::Temperature => (37.5, 38.0, 39.0, 39.5),
        Metric::ActivityLevel => return Severity::Normal,
    };

    if value < critical_low || value > critical_high {
        Severity::Critical
    } else if value < warning_low || value > warning_high {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

/// Which side of the normal band a reading falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deviation {
    Low,
    High,
}

pub fn deviation(value: f64, metric: Metric) -> Option<Deviation> {
    let (low, high) = match metric {
        Metric::HeartRate => (70.0, 100.0),
        Metric::Temperature => (38.0, 39.0),
        Metric::ActivityLevel => return None,
    };

    if value < low {
        Some(Deviation::Low)
    } else if value > high {
        Some(Deviation::High)
    } else {
        None
    }
}

pub fn activity_label(activity: f64) -> &'static str {
    if activity < 30.0 {
        "Resting"
    } else if activity > 70.0 {
        "Active"
    } else {
        "Moderate"
    }
}

/// Card caption for a reading
pub fn vital_label(value: f64, metric: Metric) -> &'static str {
    match metric {
        Metric::ActivityLevel => activity_label(value),
        _ => match deviation(value, metric) {
            Some(Deviation::Low) => "Low",
            Some(Deviation::High) => "High",
            None => "Normal",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_rate_bands() {
        assert_eq!(classify(59.9, Metric::HeartRate), Severity::Critical);
        assert_eq!(classify(60.0, Metric::HeartRate), Severity::Warning);
        assert_eq!(classify(69.9, Metric::HeartRate), Severity::Warning);
        assert_eq!(classify(70.0, Metric::HeartRate), Severity::Normal);
        assert_eq!(classify(85.0, Metric::HeartRate), Severity::Normal);
        assert_eq!(classify(100.0, Metric::HeartRate), Severity::Normal);
        assert_eq!(classify(100.5, Metric::HeartRate), Severity::Warning);
        assert_eq!(classify(120.0, Metric::HeartRate), Severity::Warning);
        assert_eq!(classify(120.1, Metric::HeartRate), Severity::Critical);
    }

    #[test]
    fn test_temperature_bands() {
        assert_eq!(classify(37.4, Metric::Temperature), Severity::Critical);
        assert_eq!(classify(37.5, Metric::Temperature), Severity::Warning);
        assert_eq!(classify(37.9, Metric::Temperature), Severity::Warning);
        assert_eq!(classify(38.0, Metric::Temperature), Severity::Normal);
        assert_eq!(classify(39.0, Metric::Temperature), Severity::Normal);
        assert_eq!(classify(39.2, Metric::Temperature), Severity::Warning);
        assert_eq!(classify(39.5, Metric::Temperature), Severity::Warning);
        assert_eq!(classify(39.6, Metric::Temperature), Severity::Critical);
    }

    #[test]
    fn test_unthresholded_metric_is_always_normal() {
        for value in [-1000.0, 0.0, 29.0, 100.0, 1e9, f64::INFINITY] {
            assert_eq!(classify(value, Metric::ActivityLevel), Severity::Normal);
        }
    }

    #[test]
    fn test_classify_is_total() {
        assert_eq!(classify(f64::NAN, Metric::HeartRate), Severity::Normal);
        assert_eq!(classify(f64::NEG_INFINITY, Metric::Temperature), Severity::Critical);
        assert_eq!(classify(f64::INFINITY, Metric::HeartRate), Severity::Critical);
    }

    #[test]
    fn test_activity_label() {
        assert_eq!(activity_label(0.0), "Resting");
        assert_eq!(activity_label(29.9), "Resting");
        assert_eq!(activity_label(30.0), "Moderate");
        assert_eq!(activity_label(45.0), "Moderate");
        assert_eq!(activity_label(70.0), "Moderate");
        assert_eq!(activity_label(70.1), "Active");
    }

    #[test]
    fn test_vital_label() {
        assert_eq!(vital_label(65.0, Metric::HeartRate), "Low");
        assert_eq!(vital_label(85.0, Metric::HeartRate), "Normal");
        assert_eq!(vital_label(105.0, Metric::HeartRate), "High");
        assert_eq!(vital_label(37.8, Metric::Temperature), "Low");
        assert_eq!(vital_label(38.2, Metric::Temperature), "Normal");
        assert_eq!(vital_label(39.3, Metric::Temperature), "High");
        assert_eq!(vital_label(75.0, Metric::ActivityLevel), "Active");
    }

    #[test]
    fn test_normal_label_implies_normal_severity() {
        let mut v = 50.0;
        while v < 140.0 {
            if vital_label(v, Metric::HeartRate) == "Normal" {
                assert_eq!(classify(v, Metric::HeartRate), Severity::Normal, "hr {}", v);
            }
            v += 0.5;
        }
    }

    #[test]
    fn test_severity_round_trips_through_str() {
        for severity in [Severity::Normal, Severity::Warning, Severity::Critical] {
            let name = serde_json::to_value(severity).unwrap();
            assert_eq!(name.as_str().unwrap().parse::<Severity>(), Ok(severity));
        }
        assert!("high".parse::<Severity>().is_err());
    }

    #[test]
    fn test_metric_deserializes_from_config_names() {
        let m: Metric = serde_json::from_str("\"heart_rate\"").unwrap();
        assert_eq!(m, Metric::HeartRate);
        let m: Metric = serde_json::from_str("\"activity\"").unwrap();
        assert_eq!(m, Metric::ActivityLevel);
    }
}
