use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};
use models::{ImportReport, RowError, TradeRecord};

use crate::dates::parse_trade_date;
use crate::dialect::detect_dialect;
use crate::error::NormalizeError;
use crate::numeric::clean_number;

/// Columns a broker export must carry, with the exact (case-sensitive)
/// names the export uses.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Date",
    "Action",
    "Amount",
    "Instrument",
    "AverageOpenPrice",
    "ClosePrice",
    "GrossPl",
    "NetPl",
    "CloseTradeId",
];

/// Header-position lookup for named column access on raw records.
struct ColumnIndex {
    idx: HashMap<String, usize>,
}

impl ColumnIndex {
    fn new(headers: &StringRecord) -> Self {
        let mut idx = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            let key = name.trim();
            if !key.is_empty() {
                idx.insert(key.to_string(), i);
            }
        }
        Self { idx }
    }

    fn get<'a>(&self, row: &'a StringRecord, col: &'static str) -> Result<&'a str, NormalizeError> {
        let i = *self
            .idx
            .get(col)
            .ok_or(NormalizeError::MissingColumn(col))?;
        row.get(i).ok_or(NormalizeError::MissingColumn(col))
    }
}

/// Normalizes a whole CSV batch into trades plus per-row errors.
///
/// The dialect is inferred from the text itself (comma fallback), then
/// every data row is normalized independently: a row that fails lands in
/// `errors` with its reason and the batch continues. This function never
/// fails as a whole.
pub fn parse_trades_csv(data: &str) -> ImportReport {
    let dialect = detect_dialect(data);
    let mut reader = ReaderBuilder::new()
        .delimiter(dialect.delimiter)
        .quote(dialect.quote)
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut report = ImportReport::default();

    let headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            report.errors.push(RowError {
                row: String::new(),
                reason: NormalizeError::Csv(e.to_string()).to_string(),
            });
            return report;
        }
    };
    let cols = ColumnIndex::new(&headers);

    for record in reader.records() {
        let row = match record {
            Ok(r) => r,
            Err(e) => {
                report.errors.push(RowError {
                    row: String::new(),
                    reason: NormalizeError::Csv(e.to_string()).to_string(),
                });
                continue;
            }
        };

        match normalize_row(&cols, &row) {
            Ok(trade) => report.imported.push(trade),
            Err(e) => report.errors.push(RowError {
                row: raw_row(&row, dialect.delimiter),
                reason: e.to_string(),
            }),
        }
    }

    report
}

/// Converts one raw record into a validated `TradeRecord`.
///
/// Any missing column or unparseable field rejects the whole row.
fn normalize_row(cols: &ColumnIndex, row: &StringRecord) -> Result<TradeRecord, NormalizeError> {
    let trade_date = parse_trade_date(cols.get(row, "Date")?)?;
    let action = cols.get(row, "Action")?.trim().to_string();
    let amount = parse_integer(cols.get(row, "Amount")?)?;
    let instrument = cols.get(row, "Instrument")?.trim().to_string();
    let average_open_price = clean_number(cols.get(row, "AverageOpenPrice")?)?;
    let close_price = clean_number(cols.get(row, "ClosePrice")?)?;
    let gross_pl = clean_number(cols.get(row, "GrossPl")?)?;
    let net_pl = clean_number(cols.get(row, "NetPl")?)?;
    let close_trade_id = parse_integer(cols.get(row, "CloseTradeId")?)?;

    Ok(TradeRecord {
        trade_date,
        action,
        amount,
        instrument,
        average_open_price,
        close_price,
        gross_pl,
        net_pl,
        close_trade_id,
    })
}

fn parse_integer(raw: &str) -> Result<i64, NormalizeError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| NormalizeError::BadInteger(raw.to_string()))
}

/// Reassembles a record into roughly its original form for error reporting.
fn raw_row(row: &StringRecord, delimiter: u8) -> String {
    let sep = (delimiter as char).to_string();
    row.iter().collect::<Vec<_>>().join(&sep)
}
