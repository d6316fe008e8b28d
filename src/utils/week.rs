use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

/// Calendar description of a GitHub statistics week.
///
/// Weeks are shown Monday to Sunday in UTC; the ISO week number and year are
/// taken from the Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekLabel {
    pub number: u32,
    pub year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekLabel {
    pub fn from_epoch(week_start: i64) -> Option<Self> {
        let date = DateTime::<Utc>::from_timestamp(week_start, 0)?.date_naive();
        // Near the ends of the calendar the week spills past NaiveDate::MIN/MAX
        let start =
            date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))?;
        let end = start.checked_add_days(Days::new(6))?;
        Some(Self {
            number: start.iso_week().week(),
            year: start.year(),
            start,
            end,
        })
    }

    pub fn title(&self) -> String {
        format!("Week #{} of {}", self.number, self.year)
    }

    pub fn range(&self) -> String {
        format!("{} - {}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sunday_week_start_maps_to_previous_monday() {
        // 2024-01-07 00:00:00 UTC, a Sunday as GitHub reports weeks
        let label = WeekLabel::from_epoch(1_704_585_600).unwrap();
        assert_eq!(label.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(label.end, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(label.number, 1);
        assert_eq!(label.title(), "Week #1 of 2024");
        assert_eq!(label.range(), "2024-01-01 - 2024-01-07");
    }

    #[test]
    fn test_monday_is_its_own_start() {
        // 2024-03-04 12:00:00 UTC, a Monday
        let label = WeekLabel::from_epoch(1_709_553_600).unwrap();
        assert_eq!(label.start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(label.number, 10);
    }

    #[test]
    fn test_out_of_range_timestamp() {
        assert_eq!(WeekLabel::from_epoch(i64::MAX), None);
    }

    #[test]
    fn test_calendar_edges_do_not_panic() {
        let epoch = |date: NaiveDate| date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();

        // NaiveDate::MIN is not a Monday, so its week starts before the calendar does
        assert_eq!(WeekLabel::from_epoch(epoch(NaiveDate::MIN)), None);
        // NaiveDate::MAX is not a Sunday, so its week ends after the calendar does
        assert_eq!(WeekLabel::from_epoch(epoch(NaiveDate::MAX)), None);
    }
}
