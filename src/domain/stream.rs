// Progressive dashboard stream messages
use super::dashboard::ConnectionStatus;
use super::pet::PetTab;
use super::telemetry::{CardData, ChartKind, SeriesBinding, SeriesPoint};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CardSkeleton {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub precision: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSkeleton {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub x_key: String,
    pub series: Vec<SeriesBinding>,
}

/// Layout sent before any value is known
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSkeleton {
    pub title: String,
    pub pets: Vec<PetTab>,
    pub selected_pet_id: Option<String>,
    pub connection: ConnectionStatus,
    pub cards: Vec<CardSkeleton>,
    pub charts: Vec<ChartSkeleton>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartUpdate {
    pub chart_id: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    pub total_widgets: usize,
    pub duration_ms: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    Skeleton(DashboardSkeleton),
    CardUpdate(CardData),
    ChartUpdate(ChartUpdate),
    Complete(CompletionEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_tagged() {
        let msg = StreamMessage::Complete(CompletionEvent {
            total_widgets: 5,
            duration_ms: 12,
        });
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["type"], "complete");
        assert_eq!(json["totalWidgets"], 5);
        assert_eq!(json["durationMs"], 12);
    }
}
