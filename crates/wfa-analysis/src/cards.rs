//! Tool recommendation cards.

use std::fmt::Write;

use wfa_renderer::escape_html;

use crate::tools::ToolRecommendation;

const BRIEFCASE_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="tool-card-icon"><rect x="2" y="7" width="20" height="14" rx="2" ry="2"></rect><path d="M16 21V5a2 2 0 0 0-2-2h-4a2 2 0 0 0-2 2v16"></path></svg>"#;

const CLOCK_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="tool-metric-icon"><circle cx="12" cy="12" r="10"></circle><polyline points="12 6 12 12 16 14"></polyline></svg>"#;

const DOLLAR_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="tool-metric-icon"><line x1="12" y1="1" x2="12" y2="23"></line><path d="M17 5H9.5a3.5 3.5 0 0 0 0 7h5a3.5 3.5 0 0 1 0 7H6"></path></svg>"#;

const ZAP_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="tool-metric-icon"><polygon points="13 2 3 14 12 14 11 22 21 10 12 10 13 2"></polygon></svg>"#;

/// Shown for a metric the model left out.
const MISSING_METRIC: &str = "N/A";

/// Render tool recommendations as a grid of cards, one per record in order.
///
/// An empty slice renders an empty grid.
#[must_use]
pub fn render_tool_cards(tools: &[ToolRecommendation]) -> String {
    let mut out = String::with_capacity(256 + tools.len() * 2048);
    out.push_str(r#"<div class="tool-grid">"#);
    for tool in tools {
        render_card(tool, &mut out);
    }
    out.push_str("</div>");
    out
}

fn render_card(tool: &ToolRecommendation, out: &mut String) {
    write!(
        out,
        r#"<div class="tool-card"><h4 class="tool-card-title">{BRIEFCASE_ICON}<span>{}</span></h4><p class="tool-card-summary">{}</p><div class="tool-card-metrics">"#,
        text_or_empty(tool.tool.as_deref()),
        text_or_empty(tool.helps.as_deref()),
    )
    .unwrap();
    metric(CLOCK_ICON, "Est. Time Saved", tool.time_saved.as_deref(), out);
    metric(DOLLAR_ICON, "Est. Cost", tool.cost.as_deref(), out);
    metric(ZAP_ICON, "Payback Period", tool.payback.as_deref(), out);
    out.push_str("</div></div>");
}

fn metric(icon: &str, label: &str, value: Option<&str>, out: &mut String) {
    write!(
        out,
        r#"<div class="tool-metric">{icon}<div><span class="tool-metric-label">{label}:</span> <span class="tool-metric-value">{}</span></div></div>"#,
        escape_html(value.unwrap_or(MISSING_METRIC))
    )
    .unwrap();
}

fn text_or_empty(value: Option<&str>) -> String {
    value.map(escape_html).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tool(name: &str) -> ToolRecommendation {
        ToolRecommendation {
            tool: Some(name.to_owned()),
            ..ToolRecommendation::default()
        }
    }

    #[test]
    fn test_empty_set_renders_empty_grid() {
        assert_eq!(render_tool_cards(&[]), r#"<div class="tool-grid"></div>"#);
    }

    #[test]
    fn test_missing_metrics_render_na() {
        let html = render_tool_cards(&[tool("X")]);
        assert_eq!(html.matches("tool-card\"").count(), 1);
        assert!(html.contains("<span>X</span>"));
        assert_eq!(html.matches(r#"<span class="tool-metric-value">N/A</span>"#).count(), 3);
        assert!(html.contains(r#"<p class="tool-card-summary"></p>"#));
    }

    #[test]
    fn test_metric_labels_in_order() {
        let html = render_tool_cards(&[tool("X")]);
        let time = html.find("Est. Time Saved:").unwrap();
        let cost = html.find("Est. Cost:").unwrap();
        let payback = html.find("Payback Period:").unwrap();
        assert!(time < cost && cost < payback);
    }

    #[test]
    fn test_cards_keep_input_order() {
        let html = render_tool_cards(&[tool("First"), tool("Second")]);
        assert!(html.find("First").unwrap() < html.find("Second").unwrap());
        assert_eq!(html.matches(r#"<div class="tool-card">"#).count(), 2);
    }

    #[test]
    fn test_fields_are_escaped() {
        let record = ToolRecommendation {
            tool: Some("<img src=x onerror=alert(1)>".to_owned()),
            helps: Some("A & B".to_owned()),
            cost: Some("<$50".to_owned()),
            ..ToolRecommendation::default()
        };
        let html = render_tool_cards(&[record]);
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("&lt;$50"));
    }

    #[test]
    fn test_full_card_values() {
        let record = ToolRecommendation {
            tool: Some("Zapier".to_owned()),
            helps: Some("Connects forms to CRM".to_owned()),
            time_saved: Some("5 hrs/week".to_owned()),
            cost: Some("$20/mo".to_owned()),
            payback: Some("2 weeks".to_owned()),
        };
        let html = render_tool_cards(&[record]);
        assert!(html.contains(r#"<span class="tool-metric-value">5 hrs/week</span>"#));
        assert!(html.contains(r#"<span class="tool-metric-value">$20/mo</span>"#));
        assert!(html.contains(r#"<span class="tool-metric-value">2 weeks</span>"#));
        assert!(!html.contains("N/A"));
    }
}
