use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{quote::PriceQuote, session::Session};

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[must_use]
pub fn build_session_table(session: &Session<'_>) -> Table {
    let average_price = session.average_price();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Start", "End", "Price", "Threshold"]);
    for hour in session.hours() {
        let quote = hour.quote;
        let end_format =
            if quote.start.date_naive() == quote.end.date_naive() { "%H:%M" } else { DATE_TIME_FORMAT };
        table.add_row(vec![
            Cell::new(quote.start.format(DATE_TIME_FORMAT)),
            Cell::new(quote.end.format(end_format)).add_attribute(Attribute::Dim),
            Cell::new(format!("{:.4}", quote.price)).set_alignment(CellAlignment::Right).fg(
                if average_price.is_some_and(|average| quote.price > average) {
                    Color::Red
                } else {
                    Color::Green
                },
            ),
            Cell::new(format!("+{:.4}%", hour.threshold)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Format the period covered by the quotes, assuming they are sorted by start time.
#[must_use]
pub fn format_window(quotes: &[PriceQuote]) -> Option<String> {
    let (first, last) = (quotes.first()?, quotes.last()?);
    Some(format!(
        "{} - {}",
        first.start.format("%Y-%m-%d %H:%M:%S"),
        last.end.format("%Y-%m-%d %H:%M:%S"),
    ))
}
