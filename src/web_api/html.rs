//! HTML dashboard page
//!
//! Self-contained page (inline CSS) built from a [`DashboardView`]. Image
//! load failures swap in the placeholder on the client; no server round trip.

use crate::dashboard_renderer::{
    DashboardView, EmptyState, HeaderSummary, ViolationCard, ViolationPanel,
};

/// Render the dashboard as a full HTML document
///
/// The page reloads itself every `refresh_secs` seconds.
pub fn render_page(view: &DashboardView, refresh_secs: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta http-equiv="refresh" content="{refresh}">
    <title>Wrong-Way Detection System</title>
    <style>{css}</style>
</head>
<body>
    {header}
    <main>
        <h2>Recent Violations</h2>
        {panel}
    </main>
</body>
</html>"#,
        refresh = refresh_secs.max(1),
        css = inline_css(),
        header = render_header(&view.header),
        panel = render_panel(&view.violations),
    )
}

fn render_header(header: &HeaderSummary) -> String {
    format!(
        r#"<header>
        <div>
            <h1>Wrong-Way Detection System</h1>
            <p class="subtitle">Live Monitoring Dashboard</p>
        </div>
        <div class="counters">
            <div class="counter"><div class="value" id="total-violations">{total}</div><div class="label">Total Incidents</div></div>
            <div class="counter"><div class="value" id="cameras-active">{cameras}</div><div class="label">Active Cameras</div></div>
        </div>
    </header>"#,
        total = header.total_violations,
        cameras = header.cameras_active,
    )
}

fn render_panel(panel: &ViolationPanel) -> String {
    match panel {
        ViolationPanel::Empty(empty) => render_empty(empty),
        ViolationPanel::Cards { cards } => {
            let cards: String = cards.iter().map(render_card).collect();
            format!(r#"<div class="grid">{}</div>"#, cards)
        }
    }
}

fn render_empty(empty: &EmptyState) -> String {
    format!(
        r#"<div class="empty-state">
            <p class="title">{title}</p>
            <p class="hint">{subtitle}</p>
        </div>"#,
        title = html_escape(&empty.title),
        subtitle = html_escape(&empty.subtitle),
    )
}

fn render_card(card: &ViolationCard) -> String {
    format!(
        r#"
        <div class="card" data-event-id="{event_id}">
            <img src="{src}" data-fallback="{fallback}" onerror="this.onerror=null;this.src=this.dataset.fallback" alt="Violation">
            <div class="body">
                <div class="row"><span class="badge">{badge}</span><span class="time">{time}</span></div>
                <div class="row"><span>Camera:</span><span>{camera}</span></div>
                <div class="row"><span>Track ID:</span><span class="mono">{track}</span></div>
                <div class="row"><span>Date:</span><span>{date}</span></div>
                <div class="footer" title="{evidence}">ID: {event_id}</div>
            </div>
        </div>"#,
        event_id = html_escape(&card.event_id),
        src = html_escape(&card.thumbnail.src),
        fallback = html_escape(&card.thumbnail.fallback_src),
        badge = card.badge,
        time = html_escape(&card.time_of_day),
        camera = html_escape(&card.camera_id),
        track = html_escape(&card.track_label),
        date = html_escape(&card.date),
        evidence = html_escape(&card.evidence_path),
    )
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { min-height: 100vh; background: #0f172a; color: #fff; padding: 2rem; font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; }
header { display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid #334155; padding-bottom: 1rem; margin-bottom: 2rem; }
h1 { font-size: 1.875rem; color: #ef4444; }
h2 { font-size: 1.25rem; color: #e2e8f0; margin-bottom: 1rem; }
.subtitle { color: #94a3b8; margin-top: 0.25rem; }
.counters { display: flex; gap: 1rem; }
.counter { background: #1e293b; border: 1px solid #334155; border-radius: 0.5rem; padding: 1rem; }
.counter .value { font-size: 1.5rem; font-weight: 700; }
.counter .label { font-size: 0.75rem; color: #94a3b8; text-transform: uppercase; letter-spacing: 0.05em; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(320px, 1fr)); gap: 1.5rem; }
.card { background: #1e293b; border: 1px solid #334155; border-radius: 0.75rem; overflow: hidden; }
.card img { width: 100%; aspect-ratio: 16 / 9; object-fit: cover; background: #000; display: block; }
.card .body { padding: 1rem; font-size: 0.875rem; color: #cbd5e1; }
.card .row { display: flex; justify-content: space-between; margin-bottom: 0.25rem; }
.badge { background: #ef4444; color: #fff; font-size: 0.75rem; font-weight: 700; padding: 0.25rem 0.5rem; border-radius: 0.25rem; }
.time { color: #94a3b8; }
.mono { font-family: ui-monospace, monospace; color: #fff; }
.footer { margin-top: 1rem; padding-top: 0.75rem; border-top: 1px solid #334155; font-size: 0.75rem; color: #64748b; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.empty-state { padding: 5rem 0; text-align: center; color: #64748b; background: rgba(30, 41, 59, 0.5); border: 1px dashed #334155; border-radius: 0.75rem; }
.empty-state .title { font-size: 1.125rem; }
.empty-state .hint { font-size: 0.875rem; margin-top: 0.25rem; }
"#
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
