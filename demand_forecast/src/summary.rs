//! What the presentation layer shows about a selected entity

use crate::selector::EntityHistory;
use chrono::NaiveDate;
use statrs::statistics::{Data, Distribution, Max, Median, Min};

/// Descriptive statistics of an entity's sales
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesStats {
    pub mean: f64,
    /// Sample standard deviation, `NaN` with fewer than two records
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// Overview of one entity's history
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySummary {
    pub store: u32,
    pub item: u32,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub record_count: usize,
    pub stats: SalesStats,
    /// (date, sales) in date order, for charting
    pub series: Vec<(NaiveDate, f64)>,
}

impl EntitySummary {
    /// Summarize a history; `None` when it is empty
    pub fn from_history(history: &EntityHistory<'_>) -> Option<Self> {
        let (first_date, last_date) = history.date_range()?;
        let series = history.sales_series();

        let sales = Data::new(series.iter().map(|&(_, s)| s).collect::<Vec<f64>>());
        let stats = SalesStats {
            mean: sales.mean().unwrap_or(f64::NAN),
            std_dev: sales.std_dev().unwrap_or(f64::NAN),
            min: sales.min(),
            max: sales.max(),
            median: sales.median(),
        };

        Some(Self {
            store: history.store(),
            item: history.item(),
            first_date,
            last_date,
            record_count: history.len(),
            stats,
            series,
        })
    }
}
