use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use models::TradeRecord;

/// Groups trades by calendar day and sums net P/L per day.
///
/// Input order does not matter; the resulting map is naturally ordered
/// by day. Empty input yields an empty map.
pub fn daily_net_pl(trades: &[TradeRecord]) -> BTreeMap<NaiveDate, f64> {
    let mut daily = BTreeMap::new();
    for trade in trades {
        *daily.entry(trade.day_key()).or_insert(0.0) += trade.net_pl;
    }
    daily
}

/// Sums the day totals whose day-key falls inside the given year/month.
///
/// Adjacent days outside the month (e.g. the last day of the prior
/// month) are excluded.
pub fn monthly_total(daily: &BTreeMap<NaiveDate, f64>, year: i32, month: u32) -> f64 {
    daily
        .iter()
        .filter(|(day, _)| day.year() == year && day.month() == month)
        .map(|(_, pl)| pl)
        .sum()
}

/// Week-by-week day grid for a month, Sunday first.
///
/// Each week holds seven day numbers with `0` padding for slots that
/// belong to the adjacent months. An invalid year/month yields no weeks.
pub fn month_grid(year: i32, month: u32) -> Vec<[u32; 7]> {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return Vec::new(),
    };

    let mut weeks = Vec::new();
    let mut week = [0u32; 7];
    let mut slot = first.weekday().num_days_from_sunday() as usize;

    for day in 1..=days_in_month(year, month) {
        week[slot] = day;
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [0u32; 7];
            slot = 0;
        }
    }
    if week.iter().any(|&d| d != 0) {
        weeks.push(week);
    }

    weeks
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(f), Some(n)) => n.signed_duration_since(f).num_days() as u32,
        _ => 0,
    }
}

/// One point of the net-P/L-over-time chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub trade_date: NaiveDateTime,
    pub net_pl: f64,
    /// Running total up to and including this trade, for the cumulative view.
    pub cumulative_net_pl: f64,
}

/// Time-ordered chart series over all trades.
pub fn chart_series(trades: &[TradeRecord]) -> Vec<ChartPoint> {
    let mut ordered: Vec<&TradeRecord> = trades.iter().collect();
    ordered.sort_by_key(|t| t.trade_date);

    let mut cumulative = 0.0;
    ordered
        .into_iter()
        .map(|trade| {
            cumulative += trade.net_pl;
            ChartPoint {
                trade_date: trade.trade_date,
                net_pl: trade.net_pl,
                cumulative_net_pl: cumulative,
            }
        })
        .collect()
}

/// Aggregated calendar view of one month, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCalendar {
    pub year: i32,
    pub month: u32,
    /// Sunday-first week grid, `0` for out-of-month slots.
    pub weeks: Vec<[u32; 7]>,
    /// Net P/L per day-key (`YYYY-MM-DD`), in-month days only.
    pub daily_net_pl: BTreeMap<String, f64>,
    pub monthly_total: f64,
}

/// Builds the calendar view for one month from the full trade collection.
pub fn calendar_month(trades: &[TradeRecord], year: i32, month: u32) -> MonthlyCalendar {
    let daily = daily_net_pl(trades);
    let in_month: BTreeMap<String, f64> = daily
        .iter()
        .filter(|(day, _)| day.year() == year && day.month() == month)
        .map(|(day, pl)| (day.format("%Y-%m-%d").to_string(), *pl))
        .collect();
    let total = in_month.values().sum();

    MonthlyCalendar {
        year,
        month,
        weeks: month_grid(year, month),
        daily_net_pl: in_month,
        monthly_total: total,
    }
}
