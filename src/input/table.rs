//! CSV sweep tables
//!
//! One table holds one sweep: a header row naming the `vgs`, `vds` and
//! `ids` columns, then one operating point per row. Extra columns are
//! ignored, `#` starts a comment line and cells are trimmed.

use crate::domain::{Sweep, SweepKind, SweepPoint};
use crate::error::{AppError, ConfigError, DomainError};

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Header names of the three measurement columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub vgs: String,
    pub vds: String,
    pub ids: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            vgs: "vgs".to_string(),
            vds: "vds".to_string(),
            ids: "ids".to_string(),
        }
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, source: &str) -> Result<usize, DomainError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| DomainError::MalformedSweep(format!("{}: missing column '{}'", source, name)))
}

fn parse_cell(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    source: &str,
    line: u64,
) -> Result<f64, DomainError> {
    let cell = record.get(index).unwrap_or_default();
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DomainError::MalformedSweep(format!(
            "{}: line {}: column '{}' is not a finite number: '{}'",
            source, line, name, cell
        ))),
    }
}

/// Parse one sweep table from `reader`
///
/// `source` names the table in error messages and is stored on the sweep.
///
/// # Errors
/// Returns `DomainError::MalformedSweep` naming the source and line for a
/// missing column, a ragged row, or a cell that is not a finite number
pub fn parse_sweep<R: Read>(
    reader: R,
    kind: SweepKind,
    columns: &ColumnNames,
    source: &str,
) -> Result<Sweep, DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| DomainError::MalformedSweep(format!("{}: {}", source, e)))?
        .clone();

    let vgs = column_index(&headers, &columns.vgs, source)?;
    let vds = column_index(&headers, &columns.vds, source)?;
    let ids = column_index(&headers, &columns.ids, source)?;

    let mut points = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, |p| p.line());
            DomainError::MalformedSweep(format!("{}: line {}: {}", source, line, e))
        })?;
        let line = record.position().map_or(0, |p| p.line());

        points.push(SweepPoint::new(
            parse_cell(&record, vgs, &columns.vgs, source, line)?,
            parse_cell(&record, vds, &columns.vds, source, line)?,
            parse_cell(&record, ids, &columns.ids, source, line)?,
        ));
    }

    log::debug!("Parsed {} {} points from {}", points.len(), kind, source);
    Ok(Sweep::new(kind, points)?.with_source(source))
}

/// Read one sweep table from a CSV file
///
/// # Errors
/// - `ConfigError::FileNotFound` if the file cannot be opened
/// - `DomainError::MalformedSweep` if the table is malformed
pub fn read_sweep(path: &Path, kind: SweepKind, columns: &ColumnNames) -> Result<Sweep, AppError> {
    let file = std::fs::File::open(path)
        .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

    Ok(parse_sweep(
        std::io::BufReader::new(file),
        kind,
        columns,
        &path.display().to_string(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(text: &str) -> Result<Sweep, DomainError> {
        parse_sweep(text.as_bytes(), SweepKind::Gate, &ColumnNames::default(), "t.csv")
    }

    #[test]
    fn test_parse_basic_table() {
        let sweep = parse("vgs,vds,ids\n0.0,0.1,1e-9\n0.5,0.1,2e-6\n").unwrap();
        assert_eq!(sweep.len(), 2);
        assert_eq!(sweep.points()[1], SweepPoint::new(0.5, 0.1, 2e-6));
        assert_eq!(sweep.source(), Some("t.csv"));
        assert_eq!(sweep.kind(), SweepKind::Gate);
    }

    #[test]
    fn test_headers_case_insensitive_and_extra_columns() {
        let text = "# exported by the probe station\n  Time , IDS, VGS ,VDS\n1, -1e-12, 0.0, 0.05\n2, 3e-7, 0.4, 0.05\n";
        let sweep = parse(text).unwrap();
        assert_eq!(sweep.len(), 2);
        assert_eq!(sweep.points()[0], SweepPoint::new(0.0, 0.05, -1e-12));
    }

    #[test]
    fn test_column_overrides() {
        let columns = ColumnNames {
            vgs: "VG".to_string(),
            vds: "VD".to_string(),
            ids: "ID".to_string(),
        };
        let sweep =
            parse_sweep("VG,VD,ID\n1,2,3\n".as_bytes(), SweepKind::Drain, &columns, "x").unwrap();
        assert_eq!(sweep.points()[0], SweepPoint::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_missing_column() {
        let err = parse("vgs,vds\n0,0\n").unwrap_err();
        assert_eq!(
            err,
            DomainError::MalformedSweep("t.csv: missing column 'ids'".to_string())
        );
    }

    #[test]
    fn test_bad_cells_name_the_line() {
        let err = parse("vgs,vds,ids\n0,0,1e-9\n0.1,abc,1e-9\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 3"), "{}", message);
        assert!(message.contains("'vds'"));

        assert!(parse("vgs,vds,ids\n0,0,NaN\n").is_err());
        assert!(parse("vgs,vds,ids\n0,0,1e-9\n0,0\n").is_err());
    }

    #[test]
    fn test_empty_table_gives_empty_sweep() {
        let sweep = parse("vgs,vds,ids\n").unwrap();
        assert!(sweep.is_empty());
    }

    #[test]
    fn test_read_sweep_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("m1.csv");
        std::fs::write(&path, "vgs,vds,ids\n0,0.1,1e-9\n").unwrap();

        let sweep = read_sweep(&path, SweepKind::Gate, &ColumnNames::default()).unwrap();
        assert_eq!(sweep.len(), 1);

        let missing = read_sweep(&dir.path().join("nope.csv"), SweepKind::Gate, &ColumnNames::default());
        assert!(matches!(
            missing,
            Err(AppError::Config(ConfigError::FileNotFound(_)))
        ));
    }
}
