use crate::core::{Ledger, ProjectionResult};

/// Soles with no decimals, es-PE grouping: `S/ 2,246`.
pub fn format_pen(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-S/ {grouped}")
    } else {
        format!("S/ {grouped}")
    }
}

pub fn format_rate(pct: f64) -> String {
    format!("{pct:.2}%")
}

const HEADERS: [&str; 6] = [
    "Year",
    "Rate",
    "Contribution",
    "Accumulated principal",
    "Interest for the year",
    "Accumulated balance",
];

/// Plain-text report for a projection: the error list when invalid, or
/// the totals followed by the per-year table.
pub fn render_ledger(result: &ProjectionResult) -> String {
    match result {
        ProjectionResult::Invalid { errors } => {
            let mut out = String::from("Fix the following:\n");
            for err in errors {
                out.push_str(&format!("  - {err}\n"));
            }
            out
        }
        ProjectionResult::Valid(ledger) => render_valid(ledger),
    }
}

fn render_valid(ledger: &Ledger) -> String {
    let totals = ledger.totals;
    let mut out = format!(
        "Total contributed:      {}\nTotal interest earned:  {}\nFinal balance:          {}\n\n",
        format_pen(totals.contributed),
        format_pen(totals.interest),
        format_pen(totals.final_balance),
    );

    let body = ledger
        .rows
        .iter()
        .map(|row| {
            [
                row.year.to_string(),
                format_rate(row.rate_pct),
                format_pen(row.contribution),
                format_pen(row.principal),
                format_pen(row.interest),
                format_pen(row.balance),
            ]
        })
        .collect::<Vec<_>>();

    let mut widths = HEADERS.map(str::len);
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = HEADERS.map(String::from);
    for cells in std::iter::once(&header).chain(body.iter()) {
        let line = cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (cell, width))| {
                if idx == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
