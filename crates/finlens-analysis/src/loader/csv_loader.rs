//! CSV reader mapping external column labels onto the typed record model.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use finlens_core::config::LoaderConfig;
use finlens_core::errors::{AnalysisError, LoadError};
use finlens_core::types::{normalize_label, Dataset, MetricName, Month, Record};
use tracing::{debug, info};

/// What a CSV column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Column {
    Year,
    Month,
    Department,
    Metric(MetricName),
    Ignored,
}

impl Column {
    fn resolve(header: &str) -> Option<Self> {
        match normalize_label(header).as_str() {
            "year" | "год" => Some(Self::Year),
            "month" | "месяц" => Some(Self::Month),
            "department" | "подразделение" => Some(Self::Department),
            _ => MetricName::from_label(header).map(Self::Metric),
        }
    }
}

/// Loads a [`Dataset`] from CSV with a header row.
///
/// Headers may use canonical metric identifiers, English labels or the
/// source-language labels. Year, month and department columns are
/// required. An unrecognised header is `InvalidSchema` unless unknown
/// columns are allowed. Empty metric cells leave that metric absent on the
/// record.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLoader {
    allow_unknown_columns: bool,
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new().allow_unknown_columns(config.effective_allow_unknown_columns())
    }

    /// Skip unrecognised columns instead of failing.
    pub fn allow_unknown_columns(mut self, allow: bool) -> Self {
        self.allow_unknown_columns = allow;
        self
    }

    pub fn load_path(&self, path: &Path) -> Result<Dataset, LoadError> {
        let file = File::open(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let dataset = self.load_reader(BufReader::new(file))?;
        info!(path = %path.display(), record_count = dataset.len(), "loaded dataset");
        Ok(dataset)
    }

    pub fn load_str(&self, content: &str) -> Result<Dataset, LoadError> {
        self.load_reader(content.as_bytes())
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Dataset, LoadError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = reader.headers().map_err(csv_error)?.clone();
        let columns = self.map_headers(&headers)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(csv_error)?;
            let line = row.position().map_or(0, |p| p.line());
            records.push(parse_row(&row, &columns, &headers, line)?);
        }

        debug!(columns = columns.len(), record_count = records.len(), "parsed csv rows");
        Ok(Dataset::new(records)?)
    }

    fn map_headers(&self, headers: &csv::StringRecord) -> Result<Vec<Column>, LoadError> {
        let mut seen = BTreeSet::new();
        let mut columns = Vec::with_capacity(headers.len());
        for header in headers {
            let column = match Column::resolve(header) {
                Some(c) => c,
                None if self.allow_unknown_columns => Column::Ignored,
                None => return Err(schema(format!("unrecognised column {header:?}"))),
            };
            if column != Column::Ignored && !seen.insert(column) {
                return Err(schema(format!("duplicate column {header:?}")));
            }
            columns.push(column);
        }

        for (required, name) in [
            (Column::Year, "year"),
            (Column::Month, "month"),
            (Column::Department, "department"),
        ] {
            if !seen.contains(&required) {
                return Err(schema(format!("missing required {name} column")));
            }
        }
        Ok(columns)
    }
}

fn parse_row(
    row: &csv::StringRecord,
    columns: &[Column],
    headers: &csv::StringRecord,
    line: u64,
) -> Result<Record, LoadError> {
    let mut year = None;
    let mut month = None;
    let mut department = None;
    let mut record_metrics = Vec::new();

    for (idx, (column, cell)) in columns.iter().zip(row.iter()).enumerate() {
        let bad_cell = |what: &str| {
            schema(format!(
                "line {line}, column {:?}: {what} {cell:?}",
                headers.get(idx).unwrap_or_default()
            ))
        };
        match column {
            Column::Year => year = Some(cell.parse::<i32>().map_err(|_| bad_cell("invalid year"))?),
            Column::Month => {
                month = Some(Month::from_label(cell).ok_or_else(|| bad_cell("invalid month"))?);
            }
            Column::Department => {
                if cell.is_empty() {
                    return Err(bad_cell("empty department"));
                }
                department = Some(cell.to_string());
            }
            Column::Metric(metric) => {
                if !cell.is_empty() {
                    let value = cell.parse::<f64>().map_err(|_| bad_cell("invalid number"))?;
                    record_metrics.push((*metric, value));
                }
            }
            Column::Ignored => {}
        }
    }

    let (Some(year), Some(month), Some(department)) = (year, month, department) else {
        return Err(schema(format!("line {line}: row is missing year, month or department")));
    };
    Ok(record_metrics
        .into_iter()
        .fold(Record::new(year, month, department), |r, (m, v)| r.with_metric(m, v)))
}

fn schema(message: String) -> LoadError {
    LoadError::Schema(AnalysisError::InvalidSchema(message))
}

fn csv_error(e: csv::Error) -> LoadError {
    LoadError::Csv {
        line: e.position().map_or(0, |p| p.line()),
        message: e.to_string(),
    }
}
