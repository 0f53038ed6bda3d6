use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::filter::{TIME_COLUMN, is_ignored};
use super::model::{Column, SignalTable};
use crate::error::ViewerError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a recording from a CSV file.
///
/// * Lines starting with `#` are skipped, including any before the header;
///   a `#` inside a line ends that line.
/// * Repeated header names get a `.1`, `.2`, ... suffix.
/// * The `Time` column is required; rows whose time is not a number are dropped.
/// * Rows are sorted by time (stable, so ties keep file order).
/// * Columns matching the ignore rules are dropped here and never classified.
pub fn load_file(path: &Path) -> Result<SignalTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    load_reader(file)
}

/// Same as [`load_file`] but from any reader.
pub fn load_reader<R: Read>(rdr: R) -> Result<SignalTable> {
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(rdr);

    let headers = dedupe_headers(
        uncommented(reader.headers().context("reading CSV headers")?)
            .into_iter()
            .map(|h| h.to_string())
            .collect(),
    );

    let time_idx = headers
        .iter()
        .position(|h| h == TIME_COLUMN)
        .ok_or_else(|| ViewerError::MissingTimeColumn {
            column: TIME_COLUMN.to_string(),
        })?;

    // (source index, name) of every column that survives the ignore rules
    let kept: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, h)| *i != time_idx && !is_ignored(h))
        .map(|(i, h)| (i, h.clone()))
        .collect();

    let mut rows: Vec<(f64, Vec<f64>)> = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells = uncommented(&record);

        let Some(t) = cells.get(time_idx).copied().and_then(parse_numeric) else {
            dropped += 1;
            continue;
        };

        let values = kept
            .iter()
            .map(|(i, _)| cells.get(*i).copied().and_then(parse_numeric).unwrap_or(f64::NAN))
            .collect();
        rows.push((t, values));
    }

    rows.sort_by(|a, b| a.0.total_cmp(&b.0));

    log::info!(
        "Loaded {} rows ({} dropped for missing time), {} data columns",
        rows.len(),
        dropped,
        kept.len()
    );
    for h in headers.iter().filter(|h| *h != TIME_COLUMN && is_ignored(h)) {
        log::debug!("Ignoring column '{h}'");
    }

    Ok(into_columns(rows, kept))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Cells of a record up to the first `#`; the rest of the line is a comment.
fn uncommented(record: &csv::StringRecord) -> Vec<&str> {
    let mut cells = Vec::with_capacity(record.len());
    for cell in record.iter() {
        match cell.find('#') {
            Some(pos) => {
                cells.push(&cell[..pos]);
                break;
            }
            None => cells.push(cell),
        }
    }
    cells
}

/// Rename repeated headers `Fz, Fz` to `Fz, Fz.1` so every column is unique.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    headers
        .into_iter()
        .map(|h| {
            let mut name = h.clone();
            let mut n = 0;
            while seen.contains(&name) {
                n += 1;
                name = format!("{h}.{n}");
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

/// Coerce a cell to a number. Empty, non-numeric and `NaN` cells are missing.
fn parse_numeric(s: &str) -> Option<f64> {
    let v = s.trim().parse::<f64>().ok()?;
    if v.is_nan() { None } else { Some(v) }
}

/// Transpose sorted rows into column vectors.
fn into_columns(rows: Vec<(f64, Vec<f64>)>, kept: Vec<(usize, String)>) -> SignalTable {
    let mut time = Vec::with_capacity(rows.len());
    let mut columns: Vec<Column> = kept
        .into_iter()
        .map(|(_, name)| Column {
            name,
            values: Vec::with_capacity(rows.len()),
        })
        .collect();

    for (t, values) in rows {
        time.push(t);
        for (col, v) in columns.iter_mut().zip(values) {
            col.values.push(v);
        }
    }

    SignalTable { time, columns }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Result<SignalTable> {
        load_reader(text.as_bytes())
    }

    fn values<'a>(table: &'a SignalTable, name: &str) -> Option<&'a Vec<f64>> {
        table.columns.iter().find(|c| c.name == name).map(|c| &c.values)
    }

    #[test]
    fn skips_comments_and_sorts_by_time() {
        let table = load(
            "# device: test\n\
             Time,Fz,Trigger\n\
             # mid-file note\n\
             0.2,3,0\n\
             0.0,1,0\n\
             0.1,2,1\n",
        )
        .unwrap();

        assert_eq!(table.time, vec![0.0, 0.1, 0.2]);
        assert_eq!(*values(&table, "Fz").unwrap(), vec![1.0, 2.0, 3.0]);
        assert!(values(&table, "Trigger").is_none());
    }

    #[test]
    fn drops_rows_with_bad_time() {
        let table = load("Time,Fz\n0.0,1\nabc,2\n,3\nNaN,4\n0.5,5\n").unwrap();

        assert_eq!(table.time, vec![0.0, 0.5]);
        assert_eq!(*values(&table, "Fz").unwrap(), vec![1.0, 5.0]);
    }

    #[test]
    fn bad_data_cells_become_nan() {
        let table = load("Time,Fz,Cz\n0.0,x,1\n1.0,2\n").unwrap();
        let fz = &*values(&table, "Fz").unwrap();
        let cz = values(&table, "Cz").unwrap();

        assert!(fz[0].is_nan());
        assert_eq!(fz[1], 2.0);
        assert_eq!(cz[0], 1.0);
        assert!(cz[1].is_nan());
    }

    #[test]
    fn ties_keep_file_order() {
        let table = load("Time,Fz\n1,10\n0,5\n1,20\n").unwrap();
        assert_eq!(table.time, vec![0.0, 1.0, 1.0]);
        assert_eq!(*values(&table, "Fz").unwrap(), vec![5.0, 10.0, 20.0]);
    }

    #[test]
    fn missing_time_column_is_schema_error() {
        let err = load("time,Fz\n0,1\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ViewerError>(),
            Some(ViewerError::MissingTimeColumn { .. })
        ));
    }

    #[test]
    fn inline_hash_ends_the_line() {
        let table = load("Time,Fz,Cz\n0,1 # note,5\n1,2,6\n").unwrap();

        assert_eq!(table.time, vec![0.0, 1.0]);
        assert_eq!(*values(&table, "Fz").unwrap(), vec![1.0, 2.0]);
        let cz = values(&table, "Cz").unwrap();
        assert!(cz[0].is_nan());
        assert_eq!(cz[1], 6.0);
    }

    #[test]
    fn repeated_headers_get_numbered() {
        let table = load("Time,Fz,Fz,Fz\n0,1,2,3\n").unwrap();
        assert_eq!(table.column_names(), vec!["Fz", "Fz.1", "Fz.2"]);
        assert_eq!(*values(&table, "Fz").unwrap(), vec![1.0]);
        assert_eq!(crate::data::filter::split_roles(&table).eeg.len(), 1);
    }

    #[test]
    fn ignore_prefix_columns_are_removed() {
        let table = load("Time,X3:AUX,X1:LEOG,ADC_Status\n0,1,2,3\n").unwrap();
        assert_eq!(table.column_names(), vec!["X1:LEOG"]);
    }
}
