//! CSV rendering of sample matrices.

use std::io::Write;

use anyhow::{Context, Result};
use contracts::{SampleMatrix, CHANNEL_LABELS};

/// Column headers for a matrix of `width` channels
fn headers(width: usize, with_time: bool) -> Vec<String> {
    let channels = (0..width).map(|j| {
        CHANNEL_LABELS
            .get(j)
            .map(|l| l.to_string())
            .unwrap_or_else(|| format!("channel{j}"))
    });
    if with_time {
        std::iter::once("time".to_string()).chain(channels).collect()
    } else {
        channels.collect()
    }
}

/// Write `matrix` as CSV, optionally prefixed by a time column
pub fn write_csv<W: Write>(writer: W, matrix: &SampleMatrix, time: Option<&[f64]>) -> Result<()> {
    if let Some(t) = time {
        anyhow::ensure!(
            t.len() == matrix.len(),
            "time column has {} points for {} rows",
            t.len(),
            matrix.len()
        );
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(headers(matrix.width(), time.is_some()))
        .context("Failed to write CSV header")?;

    for (i, row) in matrix.rows().enumerate() {
        let leading = time.map(|t| t[i].to_string());
        let record = leading
            .into_iter()
            .chain(row.iter().map(|v| v.to_string()));
        wtr.write_record(record).context("Failed to write CSV row")?;
    }

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}
