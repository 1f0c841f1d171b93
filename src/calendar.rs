//! Month grid for the check-in calendar.

use std::collections::HashSet;

use chrono::{Datelike, Days, Local, Months, NaiveDate};

use crate::stats::last_day_of_month;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub checked_in: bool,
    pub is_today: bool,
}

impl CalendarDay {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn iso(&self) -> String {
        self.date.format("%F").to_string()
    }
}

#[derive(Debug, Clone)]
pub struct MonthView {
    pub first: NaiveDate,
    /// Weeks start on Sunday. `None` pads days outside the month.
    pub weeks: Vec<Vec<Option<CalendarDay>>>,
    pub checked_in_count: usize,
}

impl MonthView {
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn key(&self) -> String {
        month_key(self.first)
    }

    /// At the edge of the representable range the link points at this month.
    pub fn prev_key(&self) -> String {
        month_key(
            self.first
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first),
        )
    }

    pub fn next_key(&self) -> String {
        month_key(
            self.first
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first),
        )
    }
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// First day of the month named by `YYYY-MM`, or of the current month when
/// the value is missing or malformed.
pub fn parse_month(value: Option<&str>) -> NaiveDate {
    value
        .and_then(|v| strict_month(v.trim()))
        .unwrap_or_else(|| current_month_start(Local::now().date_naive()))
}

/// Exactly four year digits, a dash and two month digits. chrono's `%Y`
/// alone would also take signed and extended years.
fn strict_month(value: &str) -> Option<NaiveDate> {
    let (year, month) = value.split_once('-')?;
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(year, 4) || !digits(month, 2) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Whether a date can be addressed by a `YYYY-MM` calendar key.
pub fn is_calendar_date(date: NaiveDate) -> bool {
    (1..=9999).contains(&date.year())
}

fn current_month_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

pub fn month_view(first: NaiveDate, checked: &[NaiveDate], today: NaiveDate) -> MonthView {
    let first = current_month_start(first);
    let last = last_day_of_month(first);
    let checked: HashSet<NaiveDate> = checked.iter().copied().collect();

    let mut weeks = Vec::new();
    let mut week: Vec<Option<CalendarDay>> =
        vec![None; first.weekday().num_days_from_sunday() as usize];

    let mut day = first;
    while day <= last {
        week.push(Some(CalendarDay {
            date: day,
            checked_in: checked.contains(&day),
            is_today: day == today,
        }));
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
        day = match day.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    if !week.is_empty() {
        week.resize(7, None);
        weeks.push(week);
    }

    MonthView {
        first,
        weeks,
        checked_in_count: checked
            .iter()
            .filter(|d| **d >= first && **d <= last)
            .count(),
    }
}
