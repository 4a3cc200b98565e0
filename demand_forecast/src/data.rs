//! Historical demand records and CSV loading/export

use crate::error::{ForecastError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Columns every dataset must carry
pub const REQUIRED_COLUMNS: [&str; 4] = ["date", "store", "item", "sales"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of the historical dataset.
///
/// Records are immutable once built. The engineered feature columns are shared
/// with every other record of the same dataset, so cloning a record copies its
/// values but not the column names.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    date: NaiveDate,
    store: u32,
    item: u32,
    sales: f64,
    columns: Arc<[String]>,
    values: Box<[f64]>,
}

impl HistoryRecord {
    /// Create a record without engineered feature columns
    pub fn new(date: NaiveDate, store: u32, item: u32, sales: f64) -> Self {
        Self {
            date,
            store,
            item,
            sales,
            columns: Arc::from(Vec::<String>::new()),
            values: Box::new([]),
        }
    }

    /// Attach engineered feature values; `values` must line up with `columns`
    pub fn with_features(mut self, columns: Arc<[String]>, values: Vec<f64>) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(ForecastError::Data(format!(
                "Record has {} feature values but the dataset declares {} feature columns",
                values.len(),
                columns.len()
            )));
        }
        self.columns = columns;
        self.values = values.into_boxed_slice();
        Ok(self)
    }

    /// Calendar date of the record
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Store identifier
    pub fn store(&self) -> u32 {
        self.store
    }

    /// Item identifier
    pub fn item(&self) -> u32 {
        self.item
    }

    /// Units sold
    pub fn sales(&self) -> f64 {
        self.sales
    }

    /// Names of the engineered feature columns
    pub fn feature_names(&self) -> &[String] {
        &self.columns
    }

    /// Engineered feature values, in column order
    pub fn feature_values(&self) -> &[f64] {
        &self.values
    }

    /// Resolve a numeric attribute by name.
    ///
    /// `store`, `item` and `sales` resolve to the record's own fields; any
    /// other name is looked up among the engineered feature columns. `date` is
    /// not numeric and never resolves.
    pub fn feature(&self, name: &str) -> Option<f64> {
        match name {
            "store" => Some(f64::from(self.store)),
            "item" => Some(f64::from(self.item)),
            "sales" => Some(self.sales),
            _ => self
                .columns
                .iter()
                .position(|c| c == name)
                .map(|idx| self.values[idx]),
        }
    }

    /// A new record identical to this one except for its date
    pub fn with_date(&self, date: NaiveDate) -> Self {
        Self {
            date,
            ..self.clone()
        }
    }
}

/// The full historical dataset as loaded from the artifact store
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Every column in file order, required ones included
    header: Vec<String>,
    columns: Arc<[String]>,
    records: Vec<HistoryRecord>,
    /// Cell text of each record as read, `None` for records built in code
    cells: Vec<Option<csv::StringRecord>>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::with_feature_columns(Vec::new())
    }
}

impl Dataset {
    /// Create an empty dataset declaring the given engineered feature columns.
    ///
    /// The column order is `date,store,item,sales` followed by `columns`.
    pub fn with_feature_columns(columns: Vec<String>) -> Self {
        let header = REQUIRED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(columns.iter().cloned())
            .collect();
        Self::with_header(header, columns)
    }

    fn with_header(header: Vec<String>, columns: Vec<String>) -> Self {
        Self {
            header,
            columns: Arc::from(columns),
            records: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Append a record; `features` must line up with the declared feature columns
    pub fn push(
        &mut self,
        date: NaiveDate,
        store: u32,
        item: u32,
        sales: f64,
        features: Vec<f64>,
    ) -> Result<()> {
        self.push_with_cells(date, store, item, sales, features, None)
    }

    fn push_with_cells(
        &mut self,
        date: NaiveDate,
        store: u32,
        item: u32,
        sales: f64,
        features: Vec<f64>,
        cells: Option<csv::StringRecord>,
    ) -> Result<()> {
        let record =
            HistoryRecord::new(date, store, item, sales).with_features(self.columns.clone(), features)?;
        self.records.push(record);
        self.cells.push(cells);
        Ok(())
    }

    /// All column names in export order
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// All records in load order
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Names of the engineered feature columns
    pub fn feature_columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct store identifiers
    pub fn stores(&self) -> Vec<u32> {
        self.records
            .iter()
            .map(HistoryRecord::store)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted distinct item identifiers
    pub fn items(&self) -> Vec<u32> {
        self.records
            .iter()
            .map(HistoryRecord::item)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Earliest and latest date across the whole dataset
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(HistoryRecord::date).min()?;
        let last = self.records.iter().map(HistoryRecord::date).max()?;
        Some((first, last))
    }
}

/// Data loader for historical demand data
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a dataset from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a dataset from any CSV source with a header row.
    ///
    /// `date`, `store`, `item` and `sales` are required; every other column is
    /// read as a numeric feature where an empty cell means a missing value.
    pub fn from_reader<R: Read>(reader: R) -> Result<Dataset> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let position = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ForecastError::Data(format!("Missing required column '{}'", name)))
        };
        let date_idx = position("date")?;
        let store_idx = position("store")?;
        let item_idx = position("item")?;
        let sales_idx = position("sales")?;

        let feature_idx: Vec<usize> = (0..headers.len())
            .filter(|idx| ![date_idx, store_idx, item_idx, sales_idx].contains(idx))
            .collect();
        let columns = feature_idx
            .iter()
            .map(|&idx| headers[idx].to_string())
            .collect();
        let header = headers.iter().map(str::to_string).collect();

        let mut dataset = Dataset::with_header(header, columns);
        for (row, result) in rdr.records().enumerate() {
            let record = result?;
            // header is line 1
            let line = row + 2;
            let field = |idx: usize| record.get(idx).unwrap_or("");

            let date = parse_date(field(date_idx)).ok_or_else(|| {
                ForecastError::Data(format!("Line {}: invalid date '{}'", line, field(date_idx)))
            })?;
            let store = parse_required::<u32>(field(store_idx), "store", line)?;
            let item = parse_required::<u32>(field(item_idx), "item", line)?;
            let sales = parse_required::<f64>(field(sales_idx), "sales", line)?;

            let mut features = Vec::with_capacity(feature_idx.len());
            for &idx in &feature_idx {
                features.push(parse_feature(field(idx), &headers[idx], line)?);
            }

            dataset.push_with_cells(date, store, item, sales, features, Some(record))?;
        }

        debug!(
            records = dataset.len(),
            feature_columns = dataset.feature_columns().len(),
            "Parsed dataset CSV"
        );
        Ok(dataset)
    }

    /// Re-export a dataset to a CSV file.
    ///
    /// Columns keep the order they were loaded in. Records read from CSV are
    /// written with their original (trimmed) cell text; records built in code
    /// are formatted from their values. Exporting the same dataset twice
    /// produces identical files.
    pub fn export_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
        let file = File::create(path)?;
        Self::write_csv(dataset, file)
    }

    /// Write a dataset as CSV to any writer
    pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(dataset.header())?;

        for (record, cells) in dataset.records.iter().zip(&dataset.cells) {
            match cells {
                Some(cells) => wtr.write_record(cells)?,
                None => {
                    let row: Vec<String> = dataset
                        .header()
                        .iter()
                        .map(|column| format_cell(record, column))
                        .collect();
                    wtr.write_record(&row)?;
                }
            }
        }

        wtr.flush()?;
        Ok(())
    }
}

fn format_cell(record: &HistoryRecord, column: &str) -> String {
    if column == "date" {
        return record.date().format(DATE_FORMAT).to_string();
    }
    match record.feature(column) {
        Some(value) if !value.is_nan() => value.to_string(),
        _ => String::new(),
    }
}

/// Parse a calendar date, accepting a trailing time of day
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

fn parse_required<T: std::str::FromStr>(value: &str, column: &str, line: usize) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        ForecastError::Data(format!(
            "Line {}: invalid value '{}' in column '{}'",
            line, value, column
        ))
    })
}

fn parse_feature(value: &str, column: &str, line: usize) -> Result<f64> {
    if value.is_empty() {
        return Ok(f64::NAN);
    }
    parse_required(value, column, line)
}
