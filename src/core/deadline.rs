use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::prelude::*;

/// Resolve when charging must be finished.
///
/// With an explicit end time, that is the nearest upcoming occurrence of it:
/// today, or tomorrow if the time has already passed today.
/// Otherwise, the end of tomorrow.
pub fn resolve(now: DateTime<Local>, end: Option<NaiveTime>) -> Result<DateTime<Local>> {
    let today = now.date_naive();
    match end {
        Some(end) => {
            let deadline = to_local(today.and_time(end))?;
            if now > deadline { to_local(tomorrow(today)?.and_time(end)) } else { Ok(deadline) }
        }
        None => {
            let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).context("invalid end of day")?;
            to_local(tomorrow(today)?.and_time(end_of_day))
        }
    }
}

/// Dates which price quotes are needed for: today and, if different, the deadline date.
pub fn dates(now: DateTime<Local>, deadline: DateTime<Local>) -> Vec<NaiveDate> {
    let mut dates = vec![now.date_naive()];
    if deadline.date_naive() != now.date_naive() {
        dates.push(deadline.date_naive());
    }
    dates
}

fn tomorrow(today: NaiveDate) -> Result<NaiveDate> {
    today.checked_add_days(Days::new(1)).context("the calendar has ended")
}

fn to_local(time: NaiveDateTime) -> Result<DateTime<Local>> {
    time.and_local_timezone(Local)
        .earliest()
        .with_context(|| format!("`{time}` does not exist in the local timezone"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2023, 1, day, hour, minute, 0).unwrap()
    }

    fn time(hour: u32, minute: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(hour, minute, 0)
    }

    #[test]
    fn test_end_time_already_passed_rolls_over() -> Result {
        assert_eq!(resolve(at(1, 13, 0), time(8, 0))?, at(2, 8, 0));
        Ok(())
    }

    #[test]
    fn test_end_time_later_today() -> Result {
        assert_eq!(resolve(at(1, 13, 0), time(16, 0))?, at(1, 16, 0));
        Ok(())
    }

    #[test]
    fn test_no_end_time() -> Result {
        assert_eq!(
            resolve(at(1, 13, 0), None)?,
            Local.with_ymd_and_hms(2023, 1, 2, 23, 59, 59).unwrap(),
        );
        Ok(())
    }

    #[test]
    fn test_dates() {
        assert_eq!(dates(at(1, 13, 0), at(1, 16, 0)), vec![at(1, 0, 0).date_naive()]);
        assert_eq!(
            dates(at(1, 13, 0), at(2, 8, 0)),
            vec![at(1, 0, 0).date_naive(), at(2, 0, 0).date_naive()],
        );
    }
}
