use crate::templates::ReportRow;
use maud::{html, Markup};

const CELL: &str = "padding: 6px 10px; border-bottom: 1px solid #eee; text-align: left;";

pub fn price_table(rows: &[ReportRow]) -> Markup {
    html! {
        table style="border-collapse: collapse; width: 100%;" {
            thead {
                tr {
                    th style=(CELL) { "Model" }
                    th style=(CELL) { "Trim" }
                    th style=(CELL) { "Year" }
                    th style=(CELL) { "Total price" }
                }
            }
            tbody {
                @for row in rows {
                    tr {
                        td style=(CELL) { (row.model) }
                        td style=(CELL) { (row.trim) }
                        td style=(CELL) {
                            @match row.year {
                                Some(year) => { (year) },
                                None => { "—" },
                            }
                        }
                        td style=(CELL) { strong { (row.total_price) } }
                    }
                }
            }
        }
    }
}

pub fn empty_state() -> Markup {
    html! {
        p style="color: #666;" { "No used listings were found today." }
    }
}
