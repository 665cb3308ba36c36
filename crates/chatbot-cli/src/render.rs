//! Terminal rendering of messages and the chart series

use chatbot_core::{ChartPoint, Message, Role};
use comfy_table::{Table, presets::UTF8_FULL};

const CHART_TITLE: &str = "Price Chart + RSI + MACD";

/// Format one chat bubble as a prefixed line
pub fn render_message(message: &Message) -> String {
    let prefix = match message.role() {
        Role::User => "you",
        Role::Bot => "bot",
    };
    format!("{prefix}> {}", message.text())
}

/// Render the last `max_rows` chart points as a table
///
/// Returns `None` for an empty chart, matching the hidden chart panel, or
/// when no rows are requested.
pub fn render_chart(points: &[ChartPoint], max_rows: usize) -> Option<String> {
    if points.is_empty() || max_rows == 0 {
        return None;
    }

    let shown = &points[points.len().saturating_sub(max_rows)..];

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Date", "Close", "RSI", "MACD"]);
    for point in shown {
        table.add_row(vec![
            point.date.clone(),
            format!("{:.2}", point.close),
            format!("{:.2}", point.rsi),
            format!("{:.3}", point.macd),
        ]);
    }

    let mut out = format!("{CHART_TITLE}\n{table}");
    if shown.len() < points.len() {
        out.push_str(&format!(
            "\n({} of {} points shown)",
            shown.len(),
            points.len()
        ));
    }
    Some(out)
}
