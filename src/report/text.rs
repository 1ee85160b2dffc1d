use std::fmt::Write;

use crate::pipeline::stage3_classify::{DisplayMode, GridCell, GridRow};
use crate::report::{RoundReport, SummaryData, format_f64_2, format_score};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Peer Review Heat Grid\n");
    out.push_str("=====================\n\n");
    let _ = writeln!(out, "Input: {}", data.input);
    let _ = writeln!(out, "Sort order: {}", data.sort_order.as_str());
    let _ = writeln!(out, "Rounds: {}\n", data.rounds.len());

    if !data.alerts.is_empty() {
        out.push_str("Alerts:\n");
        for alert in &data.alerts {
            let _ = writeln!(out, "  {alert}");
        }
        out.push('\n');
    }

    for round in &data.rounds {
        render_round(&mut out, round);
    }

    out
}

fn render_round(out: &mut String, round: &RoundReport) {
    match &round.name {
        Some(name) => {
            let _ = writeln!(out, "Round {} ({})", round.round_number, name);
        }
        None => {
            let _ = writeln!(out, "Round {}", round.round_number);
        }
    }
    let _ = writeln!(
        out,
        "Average peer review score: {}%",
        round.average_peer_review_score
    );
    if let Some(row) = round.grid.weakest_row() {
        let _ = writeln!(out, "Weakest item: {} ({})", row.item_number, row.row_color);
    }
    if round.validation_issues > 0 {
        let _ = writeln!(out, "Validation issues: {}", round.validation_issues);
    }

    let n_reviewers = round.grid.reviewer_count();
    out.push_str("Item\tMax\tAvg");
    for k in 0..n_reviewers {
        let _ = write!(out, "\tR{}", k + 1);
    }
    out.push('\n');

    for row in &round.grid.rows {
        render_row(out, row);
    }

    out.push_str("Col avg\t\t");
    for avg in &round.column_averages {
        let _ = write!(out, "\t{}", format_f64_2(*avg));
    }
    out.push('\n');

    if round.grid.display == DisplayMode::Tableau {
        render_comments(out, &round.grid.rows);
    }
    out.push('\n');
}

fn render_row(out: &mut String, row: &GridRow) {
    let _ = write!(
        out,
        "{}\t{}\t{} [{}]",
        row.item_number,
        format_score(row.max_score),
        format_f64_2(row.row_avg),
        row.row_color
    );
    for cell in &row.cells {
        let _ = write!(out, "\t{}", cell_label(cell));
    }
    out.push('\n');
}

pub fn cell_label(cell: &GridCell) -> String {
    let mut label = match (cell.score, cell.color) {
        (Some(score), _) if cell.checkmark => {
            if score >= 1.0 {
                "✓".to_string()
            } else {
                "✗".to_string()
            }
        }
        (Some(score), Some(color)) => format!("{} [{}]", format_score(score), color),
        _ => "-".to_string(),
    };
    if cell.underlined {
        label.push('_');
    }
    label
}

fn render_comments(out: &mut String, rows: &[GridRow]) {
    let mut any = false;
    for row in rows {
        for (k, cell) in row.cells.iter().enumerate() {
            if let Some(comment) = &cell.comment {
                if !any {
                    out.push_str("Comments:\n");
                    any = true;
                }
                let _ = writeln!(out, "  {} / R{}: {}", row.item_number, k + 1, comment.trim());
            }
        }
    }
}
