//! Calendar month windows for revenue bucketing.
//!
//! All revenue series are bucketed by calendar month in the server's local
//! time zone. The clock is injected so window math stays deterministic
//! under test; it reports local time as a fixed-offset instant, which has
//! no gaps or folds and therefore converts to UTC exactly.

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Source of "now" for month arithmetic.
pub trait Clock: Send + Sync {
    /// Current instant, carrying the local offset windows are computed in.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System clock in the server's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// One calendar month as a half-open UTC window `[start, end)`.
///
/// The current month is cut off at "now" rather than running to month-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    /// Local midnight on the first day of the month.
    pub start: DateTime<Utc>,
    /// Local midnight on the first day of the next month, or "now" for the
    /// current partial month.
    pub end: DateTime<Utc>,
    /// First day of the month, kept for labeling.
    pub first_day: NaiveDate,
}

impl MonthWindow {
    /// Whether an instant falls inside the window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Uppercase English month name, e.g. `"JANUARY"`.
    pub fn month_name(&self) -> String {
        self.first_day.format("%B").to_string().to_uppercase()
    }

    /// Calendar year the month falls in.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }
}

/// The last `months_back` calendar months up to `now`, oldest first.
///
/// The final window is the current partial month ending at `now`. Months
/// before the representable calendar range saturate to the earliest
/// representable date; nothing can fall inside them.
pub fn last_months(now: DateTime<FixedOffset>, months_back: u32) -> Vec<MonthWindow> {
    let today = now.date_naive();
    (0..months_back)
        .rev()
        .map(|i| {
            let first_day = shifted_month_first_day(today, -i64::from(i));
            let end = if i > 0 {
                local_midnight_utc(*now.offset(), shifted_month_first_day(today, 1 - i64::from(i)))
            } else {
                now.with_timezone(&Utc)
            };
            MonthWindow {
                start: local_midnight_utc(*now.offset(), first_day),
                end,
                first_day,
            }
        })
        .collect()
}

/// The full previous calendar month.
pub fn previous_month(now: DateTime<FixedOffset>) -> MonthWindow {
    let today = now.date_naive();
    let first_day = shifted_month_first_day(today, -1);
    MonthWindow {
        start: local_midnight_utc(*now.offset(), first_day),
        end: local_midnight_utc(*now.offset(), shifted_month_first_day(today, 0)),
        first_day,
    }
}

/// The current partial month, from its first day to `now`.
pub fn current_month(now: DateTime<FixedOffset>) -> MonthWindow {
    let today = now.date_naive();
    let first_day = shifted_month_first_day(today, 0);
    MonthWindow {
        start: local_midnight_utc(*now.offset(), first_day),
        end: now.with_timezone(&Utc),
        first_day,
    }
}

/// First day of the month `shift` months away from `today` (negative shifts
/// go back). Integer year/month arithmetic, so year boundaries are exact;
/// results outside the representable range saturate to [`NaiveDate::MIN`].
fn shifted_month_first_day(today: NaiveDate, shift: i64) -> NaiveDate {
    let index = i64::from(today.year()) * 12 + i64::from(today.month0()) + shift;
    let year = i32::try_from(index.div_euclid(12)).ok();
    let month = index.rem_euclid(12) as u32 + 1;
    year.and_then(|y| NaiveDate::from_ymd_opt(y, month, 1)).unwrap_or(NaiveDate::MIN)
}

/// UTC instant of local midnight on `day`. Fixed offsets have no gaps or
/// folds, so the conversion is exact; a `day` at the calendar floor clamps
/// to the earliest UTC instant instead of underflowing for east-of-UTC
/// offsets.
fn local_midnight_utc(offset: FixedOffset, day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN)
        .checked_sub_offset(offset)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
