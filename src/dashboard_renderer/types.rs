//! Display model produced by the renderer

use serde::Serialize;

/// Badge shown on every card
pub const WRONG_WAY_BADGE: &str = "WRONG WAY";

/// Full dashboard projection of one view state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub header: HeaderSummary,
    pub violations: ViolationPanel,
}

/// Header counters, shown as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderSummary {
    pub total_violations: u64,
    pub cameras_active: u64,
}

/// Either the card grid or the empty-state placeholder, never both
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationPanel {
    Empty(EmptyState),
    Cards { cards: Vec<ViolationCard> },
}

impl ViolationPanel {
    /// Number of cards (0 for the empty state)
    pub fn card_count(&self) -> usize {
        match self {
            ViolationPanel::Empty(_) => 0,
            ViolationPanel::Cards { cards } => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ViolationPanel::Empty(_))
    }
}

/// Placeholder shown when no violation has been recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub subtitle: String,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "No violations detected yet.".to_string(),
            subtitle: "System is monitoring traffic...".to_string(),
        }
    }
}

/// One rendered violation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationCard {
    pub event_id: String,
    pub badge: &'static str,
    pub camera_id: String,
    /// `#<track_id>`
    pub track_label: String,
    /// `HH:MM:SS` in the display zone
    pub time_of_day: String,
    /// `Mon DD, YYYY` in the display zone
    pub date: String,
    pub thumbnail: Thumbnail,
    pub evidence_path: String,
}

/// Evidence preview with its load-failure substitute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub src: String,
    /// Used by the presentation layer when `src` fails to load
    pub fallback_src: String,
}
