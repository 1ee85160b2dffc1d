use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::HeatgridError;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{SummaryData, format_f64_2, format_score};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Tsv,
    Json,
    #[default]
    All,
}

impl ReportFormat {
    fn wants(self, other: ReportFormat) -> bool {
        self == ReportFormat::All || self == other
    }
}

pub fn write_reports(
    data: &SummaryData,
    out_dir: &Path,
    format: ReportFormat,
) -> Result<(), HeatgridError> {
    fs::create_dir_all(out_dir)?;

    if format.wants(ReportFormat::Tsv) {
        let path = out_dir.join("heatgrid.tsv");
        write_heatgrid_tsv(data, &path)?;
        info!(path = %path.display(), "wrote heat grid table");
    }

    if format.wants(ReportFormat::Json) {
        let path = out_dir.join("summary.json");
        let json = render_summary_json(data)?;
        write_text(&path, &json)?;
        info!(path = %path.display(), "wrote summary");
    }

    if format.wants(ReportFormat::Text) {
        let path = out_dir.join("report.txt");
        write_text(&path, &render_report_text(data))?;
        info!(path = %path.display(), "wrote text report");
    }

    Ok(())
}

fn write_heatgrid_tsv(data: &SummaryData, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let n_reviewers = data
        .rounds
        .iter()
        .map(|r| r.grid.reviewer_count())
        .max()
        .unwrap_or(0);

    write!(w, "round\titem_number\titem_text\tmax_score\trow_avg\trow_class")?;
    for k in 0..n_reviewers {
        write!(w, "\treview_{}", k + 1)?;
    }
    writeln!(w)?;

    for round in &data.rounds {
        for row in &round.grid.rows {
            write!(
                w,
                "{}\t{}\t{}\t{}\t{}\t{}",
                round.round_number,
                row.item_number,
                sanitize_field(&row.item_text),
                format_score(row.max_score),
                format_f64_2(row.row_avg),
                row.row_color
            )?;
            for k in 0..n_reviewers {
                match row.cells.get(k).and_then(|c| c.score.zip(c.color)) {
                    Some((score, color)) => write!(w, "\t{}:{}", format_score(score), color)?,
                    None => write!(w, "\t")?,
                }
            }
            writeln!(w)?;
        }
    }
    w.flush()
}

fn sanitize_field(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
