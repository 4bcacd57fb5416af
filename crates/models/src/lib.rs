use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One completed trade leg from a broker CSV export.
///
/// Records are created in bulk during an upload and are immutable
/// afterwards; there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Canonical timestamp, second precision.
    pub trade_date: NaiveDateTime,
    /// "Buy" or "Sell" in practice, but the source stores a free string.
    pub action: String,
    /// Contract count, sign not guaranteed by the source.
    pub amount: i64,
    pub instrument: String,
    pub average_open_price: f64,
    pub close_price: f64,
    pub gross_pl: f64,
    /// Net profit/loss after fees. This is what the calendar and chart sum.
    pub net_pl: f64,
    /// Correlates trade legs; not unique per record.
    pub close_trade_id: i64,
}

impl TradeRecord {
    /// Calendar day this trade belongs to, used as the grouping key
    /// for daily aggregation.
    pub fn day_key(&self) -> NaiveDate {
        self.trade_date.date()
    }
}

/// A rejected CSV row together with the reason it failed normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    /// The original row content as it appeared in the file.
    pub row: String,
    pub reason: String,
}

/// Result of normalizing one CSV batch.
///
/// Rows either end up fully validated in `imported` or rejected in
/// `errors`; a bad row never aborts the rest of the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: Vec<TradeRecord>,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
