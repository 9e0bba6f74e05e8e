//! DashboardRenderer - View State Projection
//!
//! ## Responsibilities
//!
//! - Map the latest [`ViewState`] to a [`DashboardView`]
//! - Derive card fields (time, date, thumbnail URL, track label)
//!
//! Rendering is pure: no I/O, no internal state, and cards keep the order
//! the backend delivered.

mod derive;
mod types;

pub use derive::{thumbnail_file_name, thumbnail_url, DisplayZone, INVALID_DATE, INVALID_TIME};
pub use types::{
    DashboardView, EmptyState, HeaderSummary, Thumbnail, ViolationCard, ViolationPanel,
    WRONG_WAY_BADGE,
};

use crate::models::{ViewState, ViolationEvent};

/// Placeholder used when an evidence preview cannot be loaded
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://placehold.co/600x400/1e293b/FFF?text=No+Image";

/// Renderer settings
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Base URL of the evidence content server
    pub content_base: String,
    pub placeholder_url: String,
    pub zone: DisplayZone,
}

impl RenderConfig {
    pub fn new(content_base: impl Into<String>, zone: DisplayZone) -> Self {
        Self {
            content_base: content_base.into(),
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
            zone,
        }
    }

    pub fn with_placeholder(mut self, placeholder_url: impl Into<String>) -> Self {
        self.placeholder_url = placeholder_url.into();
        self
    }
}

/// Project a view state into the dashboard display model
pub fn render(view: &ViewState, config: &RenderConfig) -> DashboardView {
    let header = HeaderSummary {
        total_violations: view.stats.total_violations,
        cameras_active: view.stats.cameras_active,
    };

    let violations = if view.violations.is_empty() {
        ViolationPanel::Empty(EmptyState::default())
    } else {
        ViolationPanel::Cards {
            cards: view
                .violations
                .iter()
                .map(|event| render_card(event, config))
                .collect(),
        }
    };

    DashboardView { header, violations }
}

fn render_card(event: &ViolationEvent, config: &RenderConfig) -> ViolationCard {
    ViolationCard {
        event_id: event.event_id.clone(),
        badge: WRONG_WAY_BADGE,
        camera_id: event.camera_id.clone(),
        track_label: format!("#{}", event.track_id),
        time_of_day: config.zone.format_time_of_day(event.timestamp),
        date: config.zone.format_date(event.timestamp),
        thumbnail: Thumbnail {
            src: thumbnail_url(&config.content_base, &event.evidence_path),
            fallback_src: config.placeholder_url.clone(),
        },
        evidence_path: event.evidence_path.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stats;

    fn config() -> RenderConfig {
        RenderConfig::new("http://localhost:8000", DisplayZone::Named(chrono_tz::UTC))
    }

    fn event(id: &str, track_id: i64, timestamp: f64) -> ViolationEvent {
        ViolationEvent {
            event_id: id.to_string(),
            camera_id: "CAM-01".to_string(),
            track_id,
            timestamp,
            evidence_path: format!(r"C:\evd\{}.mp4", id),
        }
    }

    fn view(violations: Vec<ViolationEvent>) -> ViewState {
        ViewState {
            violations,
            stats: Stats {
                total_violations: 3,
                cameras_active: 2,
            },
        }
    }

    #[test]
    fn test_empty_list_renders_placeholder_only() {
        let rendered = render(&view(vec![]), &config());
        assert!(rendered.violations.is_empty());
        assert_eq!(rendered.violations.card_count(), 0);
        assert_eq!(rendered.violations, ViolationPanel::Empty(EmptyState::default()));
    }

    #[test]
    fn test_card_count_matches_sequence_length() {
        for len in 1..=5 {
            let events: Vec<_> = (0..len)
                .map(|i| event(&format!("e{}", i), i, 1_704_460_800.0))
                .collect();
            let rendered = render(&view(events), &config());
            assert!(!rendered.violations.is_empty());
            assert_eq!(rendered.violations.card_count(), len as usize);
        }
    }

    #[test]
    fn test_backend_order_is_kept() {
        // Deliberately not sorted by timestamp
        let events = vec![
            event("b", 1, 100.0),
            event("a", 2, 300.0),
            event("c", 3, 200.0),
        ];
        let rendered = render(&view(events), &config());
        let ViolationPanel::Cards { cards } = rendered.violations else {
            panic!("expected cards");
        };
        let ids: Vec<_> = cards.iter().map(|c| c.event_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_card_fields() {
        let rendered = render(&view(vec![event("cam1_20240105", 999, 1_704_460_800.0)]), &config());
        let ViolationPanel::Cards { cards } = rendered.violations else {
            panic!("expected cards");
        };
        let card = &cards[0];
        assert_eq!(card.badge, "WRONG WAY");
        assert_eq!(card.camera_id, "CAM-01");
        assert_eq!(card.track_label, "#999");
        assert_eq!(card.time_of_day, "13:20:00");
        assert_eq!(card.date, "Jan 05, 2024");
        assert_eq!(card.thumbnail.src, "http://localhost:8000/content/cam1_20240105.jpg");
        assert_eq!(card.thumbnail.fallback_src, DEFAULT_PLACEHOLDER_URL);
        assert_eq!(card.evidence_path, r"C:\evd\cam1_20240105.mp4");
    }

    #[test]
    fn test_header_is_direct_copy_of_stats() {
        let rendered = render(&view(vec![]), &config());
        assert_eq!(
            rendered.header,
            HeaderSummary {
                total_violations: 3,
                cameras_active: 2,
            }
        );
    }

    #[test]
    fn test_custom_placeholder() {
        let config = config().with_placeholder("http://localhost:8080/missing.png");
        let rendered = render(&view(vec![event("x", 1, 0.0)]), &config);
        let ViolationPanel::Cards { cards } = rendered.violations else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].thumbnail.fallback_src, "http://localhost:8080/missing.png");
    }

    #[test]
    fn test_render_is_deterministic() {
        let state = view(vec![event("a", 1, 1_704_460_800.5), event("b", -4, 0.0)]);
        assert_eq!(render(&state, &config()), render(&state, &config()));
    }

    #[test]
    fn test_negative_track_id_label() {
        let rendered = render(&view(vec![event("a", -4, 0.0)]), &config());
        let ViolationPanel::Cards { cards } = rendered.violations else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].track_label, "#-4");
    }

    #[test]
    fn test_panel_json_shape() {
        let rendered = render(&view(vec![]), &config());
        let json = serde_json::to_value(&rendered).unwrap();
        assert_eq!(json["violations"]["kind"], "empty");
        assert_eq!(json["header"]["total_violations"], 3);
    }
}
