//! Per-entity history selection

use crate::data::{Dataset, HistoryRecord};
use chrono::NaiveDate;
use tracing::debug;

/// The records of one (store, item) pair, ordered by date ascending.
///
/// Borrows from the dataset it was selected from; records with equal dates
/// keep their dataset order.
#[derive(Debug, Clone)]
pub struct EntityHistory<'a> {
    store: u32,
    item: u32,
    records: Vec<&'a HistoryRecord>,
}

impl<'a> EntityHistory<'a> {
    /// Store identifier of the selection
    pub fn store(&self) -> u32 {
        self.store
    }

    /// Item identifier of the selection
    pub fn item(&self) -> u32 {
        self.item
    }

    /// Records in date order
    pub fn records(&self) -> &[&'a HistoryRecord] {
        &self.records
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&'a HistoryRecord> {
        self.records.last().copied()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the selection matched nothing
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last date of the selection
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.date(), last.date()))
    }

    /// The ordered (date, sales) series
    pub fn sales_series(&self) -> Vec<(NaiveDate, f64)> {
        self.records
            .iter()
            .map(|record| (record.date(), record.sales()))
            .collect()
    }
}

/// Select the history of one (store, item) pair.
///
/// No existence check is made on `store` or `item`; a pair that does not occur
/// yields an empty history.
pub fn select(dataset: &Dataset, store: u32, item: u32) -> EntityHistory<'_> {
    let mut records: Vec<&HistoryRecord> = dataset
        .records()
        .iter()
        .filter(|record| record.store() == store && record.item() == item)
        .collect();
    // stable: equal dates keep load order
    records.sort_by_key(|record| record.date());

    debug!(store, item, records = records.len(), "Selected entity history");
    EntityHistory {
        store,
        item,
        records,
    }
}
