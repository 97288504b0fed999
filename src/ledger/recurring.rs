use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transaction::{Transaction, TransactionKind};
use crate::errors::{CoreError, CoreResult};

/// Recurrence cadence unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

/// Template for a repeating transaction together with its materialization
/// cursor. `next_run_date` starts at `start_date` and only ever moves
/// forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringDefinition {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount_cents: i64,
    pub kind: TransactionKind,
    pub frequency: Frequency,
    pub interval: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Target weekday for weekly cadences, 0 = Monday .. 6 = Sunday.
    pub weekday: Option<u32>,
    /// Target day for monthly cadences, clamped to short months.
    pub day_of_month: Option<u32>,
    pub category_id: Option<Uuid>,
    pub next_run_date: NaiveDate,
}

impl RecurringDefinition {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: Uuid,
        description: impl Into<String>,
        amount_cents: i64,
        kind: TransactionKind,
        frequency: Frequency,
        interval: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            description: description.into(),
            amount_cents,
            kind,
            frequency,
            interval,
            start_date,
            end_date: None,
            weekday: None,
            day_of_month: None,
            category_id: None,
            next_run_date: start_date,
        }
    }

    /// Checks the structural invariants the advancer relies on. Called by
    /// the service layer before a definition is ever stored.
    pub fn validate(&self) -> CoreResult<()> {
        if self.interval < 1 {
            return Err(CoreError::Validation("interval must be at least 1".into()));
        }
        if self.amount_cents <= 0 {
            return Err(CoreError::Validation("amount must be positive".into()));
        }
        match self.frequency {
            Frequency::Weekly => match self.weekday {
                Some(w) if w <= 6 => {}
                Some(w) => {
                    return Err(CoreError::Validation(format!(
                        "weekday must be 0..=6, got {w}"
                    )))
                }
                None => {
                    return Err(CoreError::Validation(
                        "weekday is required for weekly frequency".into(),
                    ))
                }
            },
            Frequency::Monthly => match self.day_of_month {
                Some(d) if (1..=31).contains(&d) => {}
                Some(d) => {
                    return Err(CoreError::Validation(format!(
                        "day_of_month must be 1..=31, got {d}"
                    )))
                }
                None => {
                    return Err(CoreError::Validation(
                        "day_of_month is required for monthly frequency".into(),
                    ))
                }
            },
            Frequency::Daily => {}
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(CoreError::Validation(
                    "end_date must be on or after start_date".into(),
                ));
            }
        }
        Ok(())
    }

    /// Computes the occurrence after `from` for this cadence.
    ///
    /// Weekly cadences jump whole weeks and then walk forward (never
    /// backward) to the target weekday, so alignment can add up to six days.
    /// Monthly cadences carry the year on month overflow and clamp
    /// `day_of_month` to the target month's length.
    pub fn advance(&self, from: NaiveDate) -> NaiveDate {
        match self.frequency {
            Frequency::Daily => from + Duration::days(self.interval as i64),
            Frequency::Weekly => {
                let mut date = from + Duration::weeks(self.interval as i64);
                if let Some(weekday) = self.weekday {
                    while date.weekday().num_days_from_monday() != weekday {
                        date += Duration::days(1);
                    }
                }
                date
            }
            Frequency::Monthly => {
                let mut year = from.year();
                let mut month = from.month() as i32 + self.interval as i32;
                while month > 12 {
                    month -= 12;
                    year += 1;
                }
                let target = self.day_of_month.unwrap_or(from.day());
                let day = target.min(days_in_month(year, month as u32));
                // Components are in range after the clamp above.
                NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(from)
            }
        }
    }

    /// Emits one concrete transaction per due occurrence up to and including
    /// `up_to`, advancing `next_run_date` past the last one. The loop
    /// re-checks the bound after every advance, so arbitrarily many missed
    /// periods are caught up in a single pass, in strictly increasing date
    /// order. A repeat call with the same `up_to` yields nothing.
    pub fn materialize(&mut self, up_to: NaiveDate) -> Vec<Transaction> {
        debug_assert!(self.validate().is_ok(), "malformed recurring definition");
        let mut generated = Vec::new();
        while self.next_run_date <= up_to
            && self.end_date.map_or(true, |end| self.next_run_date <= end)
        {
            let mut txn = Transaction::new(
                self.user_id,
                self.description.clone(),
                self.amount_cents,
                self.kind,
                self.next_run_date,
            );
            txn.category_id = self.category_id;
            txn.recurring_id = Some(self.id);
            generated.push(txn);
            self.next_run_date = self.advance(self.next_run_date);
        }
        generated
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly(day_of_month: u32, start: NaiveDate) -> RecurringDefinition {
        let mut def = RecurringDefinition::new(
            Uuid::new_v4(),
            "Aluguel",
            1500_00,
            TransactionKind::Expense,
            Frequency::Monthly,
            1,
            start,
        );
        def.day_of_month = Some(day_of_month);
        def
    }

    #[test]
    fn daily_advance_adds_interval_days() {
        let def = RecurringDefinition::new(
            Uuid::new_v4(),
            "Cafe",
            6_00,
            TransactionKind::Expense,
            Frequency::Daily,
            3,
            date(2025, 1, 1),
        );
        def.validate().unwrap();
        assert_eq!(def.advance(date(2025, 1, 1)), date(2025, 1, 4));
        assert_eq!(def.advance(date(2025, 1, 30)), date(2025, 2, 2));
    }

    #[test]
    fn weekly_advance_aligns_forward_to_weekday() {
        let mut def = RecurringDefinition::new(
            Uuid::new_v4(),
            "Feira",
            80_00,
            TransactionKind::Expense,
            Frequency::Weekly,
            2,
            date(2025, 1, 6), // a Monday
        );
        def.weekday = Some(2); // Wednesday
        // Two weeks from Monday lands on Monday; alignment walks +2 days.
        assert_eq!(def.advance(date(2025, 1, 6)), date(2025, 1, 22));
        // Already on the target weekday: no extra days.
        assert_eq!(def.advance(date(2025, 1, 22)), date(2025, 2, 5));
    }

    #[test]
    fn monthly_advance_clamps_short_months() {
        let def = monthly(31, date(2025, 1, 31));
        assert_eq!(def.advance(date(2025, 1, 31)), date(2025, 2, 28));
        assert_eq!(def.advance(date(2025, 2, 28)), date(2025, 3, 31));
    }

    #[test]
    fn monthly_advance_clamps_to_leap_february() {
        let def = monthly(31, date(2024, 1, 31));
        assert_eq!(def.advance(date(2024, 1, 31)), date(2024, 2, 29));
    }

    #[test]
    fn monthly_advance_carries_year() {
        let def = monthly(15, date(2025, 11, 15));
        assert_eq!(def.advance(date(2025, 12, 15)), date(2026, 1, 15));
    }

    #[test]
    fn monthly_without_day_falls_back_to_cursor_day() {
        let mut def = monthly(15, date(2025, 1, 10));
        def.day_of_month = None;
        assert_eq!(def.advance(date(2025, 1, 10)), date(2025, 2, 10));
    }

    #[test]
    fn validate_rejects_malformed_definitions() {
        let base = date(2025, 1, 1);
        let mut def = RecurringDefinition::new(
            Uuid::new_v4(),
            "Assinatura",
            30_00,
            TransactionKind::Expense,
            Frequency::Weekly,
            1,
            base,
        );
        assert!(def.validate().is_err(), "weekly without weekday");
        def.weekday = Some(7);
        assert!(def.validate().is_err(), "weekday out of range");
        def.weekday = Some(0);
        def.validate().unwrap();

        def.interval = 0;
        assert!(def.validate().is_err(), "zero interval");
        def.interval = 1;

        def.end_date = Some(date(2024, 12, 31));
        assert!(def.validate().is_err(), "end before start");

        def.frequency = Frequency::Monthly;
        def.end_date = None;
        assert!(def.validate().is_err(), "monthly without day_of_month");
        def.day_of_month = Some(32);
        assert!(def.validate().is_err(), "day_of_month out of range");
    }
}
