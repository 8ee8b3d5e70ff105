// src/templates/pages/report.rs

use crate::domain::{Amount, InventoryRecord, ProductLines, RankedSelection};
use crate::templates::components::{empty_state, price_table};
use crate::templates::email_layout;
use chrono::NaiveDate;
use maud::{html, Markup};

pub const CURRENCY_SYMBOL: &str = "£";

/// One table row of the emailed report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub model: String,
    pub trim: String,
    pub year: Option<i64>,
    pub total_price: String,
}

impl ReportRow {
    fn from_record(record: &InventoryRecord, lines: &ProductLines) -> Self {
        let trim = record.trim_text().unwrap_or_default();
        let trim = match lines.display_name(&record.model) {
            Some(family) => strip_family_name(trim, family),
            None => trim.trim().to_string(),
        };

        Self {
            model: lines.pretty_name(&record.model).to_string(),
            trim,
            year: record.model_year(),
            total_price: record
                .total_price
                .as_ref()
                .and_then(Amount::as_f64)
                .map(format_currency)
                .unwrap_or_else(|| "—".to_string()),
        }
    }
}

pub fn report_rows(selection: &RankedSelection, lines: &ProductLines) -> Vec<ReportRow> {
    selection
        .records()
        .iter()
        .map(|record| ReportRow::from_record(record, lines))
        .collect()
}

pub fn report_subject(listings: usize, date: NaiveDate) -> String {
    format!(
        "Cheapest used inventory: {listings} listings ({})",
        date.format("%Y-%m-%d")
    )
}

/// HTML body of the report email, one row per ranked listing.
pub fn render_report(selection: &RankedSelection, lines: &ProductLines) -> Markup {
    let rows = report_rows(selection, lines);

    email_layout(
        "Cheapest used listings",
        html! {
            @if rows.is_empty() {
                (empty_state())
            } @else {
                p { "The " (rows.len()) " cheapest used listings across all product lines:" }
                (price_table(&rows))
            }
        },
    )
}

/// Removes the family name from a trim description ("Long Range Model 3" -> "Long Range").
pub fn strip_family_name(trim: &str, family: &str) -> String {
    if family.is_empty() {
        return trim.trim().to_string();
    }
    trim.replace(family, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `£39,500`, or `£39,500.50` when there are pence.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let scaled = (amount.abs() * 100.0).round();
    // Past u64 range the cast would saturate; print whole pounds without grouping.
    if scaled >= u64::MAX as f64 {
        return format!("{sign}{CURRENCY_SYMBOL}{:.0}", amount.abs());
    }
    let pence = scaled as u64;
    let (whole, frac) = (pence / 100, pence % 100);

    if frac == 0 {
        format!("{sign}{CURRENCY_SYMBOL}{}", group_thousands(whole))
    } else {
        format!("{sign}{CURRENCY_SYMBOL}{}.{frac:02}", group_thousands(whole))
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::listing;
    use serde_json::json;

    fn trimmed(model: &str, price: i64, trim: &str, year: i64) -> InventoryRecord {
        let mut r = listing(model, price);
        r.trim_name = Some(json!(trim));
        r.year = Some(json!(year));
        r
    }

    #[test]
    fn family_name_is_stripped_from_trim() {
        let selection =
            RankedSelection::from_ranked(vec![trimmed("m3", 39500, "Long Range Model 3", 2021)]);
        let rows = report_rows(&selection, &ProductLines::default());

        assert_eq!(
            rows,
            vec![ReportRow {
                model: "Model 3".to_string(),
                trim: "Long Range".to_string(),
                year: Some(2021),
                total_price: "£39,500".to_string(),
            }]
        );
        // The record itself keeps the full trim name.
        assert_eq!(
            selection.records()[0].trim_text(),
            Some("Long Range Model 3")
        );
    }

    #[test]
    fn strip_handles_position_and_spacing() {
        assert_eq!(strip_family_name("Model Y Performance", "Model Y"), "Performance");
        assert_eq!(strip_family_name("Plaid  Model S  Ludicrous", "Model S"), "Plaid Ludicrous");
        assert_eq!(strip_family_name("Standard Range Plus", "Model 3"), "Standard Range Plus");
        assert_eq!(strip_family_name("  Long Range ", ""), "Long Range");
    }

    #[test]
    fn unknown_model_shows_raw_code_and_full_trim() {
        let selection =
            RankedSelection::from_ranked(vec![trimmed("ct", 80000, "Cyberbeast ct", 2024)]);
        let rows = report_rows(&selection, &ProductLines::default());

        assert_eq!(rows[0].model, "ct");
        assert_eq!(rows[0].trim, "Cyberbeast ct");
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(39500.0), "£39,500");
        assert_eq!(format_currency(999.0), "£999");
        assert_eq!(format_currency(1234567.5), "£1,234,567.50");
        assert_eq!(format_currency(0.0), "£0");
        assert_eq!(format_currency(-1500.0), "-£1,500");
        assert_eq!(format_currency(1e18), "£1000000000000000000");
        assert_eq!(format_currency(-1e20), "-£100000000000000000000");
    }

    #[test]
    fn textual_year_is_shown_and_odd_trim_is_blank() {
        let mut r = listing("m3", 30000);
        r.year = Some(json!("2021"));
        r.trim_name = Some(json!(["LR"]));
        let rows = report_rows(&RankedSelection::from_ranked(vec![r]), &ProductLines::default());

        assert_eq!(rows[0].year, Some(2021));
        assert_eq!(rows[0].trim, "");
    }

    #[test]
    fn missing_total_price_renders_dash() {
        let mut r = listing("mx", 60000);
        r.total_price = None;
        let rows = report_rows(&RankedSelection::from_ranked(vec![r]), &ProductLines::default());
        assert_eq!(rows[0].total_price, "—");
    }

    #[test]
    fn empty_selection_renders_zero_rows() {
        let selection = RankedSelection::default();
        assert!(report_rows(&selection, &ProductLines::default()).is_empty());

        let html = render_report(&selection, &ProductLines::default()).into_string();
        assert!(html.contains("No used listings were found today."));
        assert!(!html.contains("<tbody>"));
    }

    #[test]
    fn html_contains_one_row_per_listing() {
        let selection = RankedSelection::from_ranked(vec![
            trimmed("m3", 39500, "Long Range Model 3", 2021),
            trimmed("ms", 41000, "<b>Plaid</b>", 2022),
        ]);
        let html = render_report(&selection, &ProductLines::default()).into_string();

        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("Model 3"));
        assert!(html.contains("Long Range"));
        assert!(html.contains("£41,000"));
        assert!(html.contains("&lt;b&gt;Plaid&lt;/b&gt;"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let selection =
            RankedSelection::from_ranked(vec![trimmed("my", 45000, "Model Y Long Range", 2023)]);
        let lines = ProductLines::default();

        assert_eq!(
            render_report(&selection, &lines).into_string(),
            render_report(&selection, &lines).into_string()
        );
    }

    #[test]
    fn subject_names_count_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            report_subject(5, date),
            "Cheapest used inventory: 5 listings (2026-10-19)"
        );
    }
}
