use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;
use super::user::Thresholds;

/// Color band for one day's cumulative balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStatus {
    Red,
    Yellow,
    Green,
    Unconfigured,
}

/// One day of the month with its running balance. Computed per request,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBalanceEntry {
    pub date: NaiveDate,
    pub balance_cents: i64,
    pub status: BalanceStatus,
}

/// Walks every calendar day of the month in order, accumulating a running
/// balance from the given transactions and classifying each day against the
/// user's thresholds. Days without activity still produce an entry; the
/// balance simply carries over. An inconsistent threshold triple marks every
/// day `Unconfigured` instead of failing.
pub fn daily_balances(
    year: i32,
    month: u32,
    transactions: &[Transaction],
    thresholds: Thresholds,
) -> Vec<DailyBalanceEntry> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let last = last_day_of_month(year, month);

    let mut by_date: HashMap<NaiveDate, Vec<&Transaction>> = HashMap::new();
    for txn in transactions {
        by_date.entry(txn.date).or_default().push(txn);
    }

    let bands = thresholds.configured();
    let mut entries = Vec::with_capacity(last.day() as usize);
    let mut balance = 0i64;
    let mut current = first;
    while current <= last {
        if let Some(day_txns) = by_date.get(&current) {
            for txn in day_txns {
                balance += txn.signed_cents();
            }
        }
        let status = match bands {
            None => BalanceStatus::Unconfigured,
            Some((_bad, ok, good)) => {
                if balance >= good {
                    BalanceStatus::Green
                } else if balance >= ok {
                    BalanceStatus::Yellow
                } else {
                    // At or below `bad` is still red: there is no band
                    // beneath it.
                    BalanceStatus::Red
                }
            }
        };
        entries.push(DailyBalanceEntry {
            date: current,
            balance_cents: balance,
            status,
        });
        current += Duration::days(1);
    }
    entries
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap())
        - Duration::days(1)
}
