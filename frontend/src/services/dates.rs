use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};

/// Today's calendar date in the viewer's timezone
pub fn today() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1, // JavaScript months are 0-indexed
        now.get_date(),
    )
    .unwrap_or_else(|| Utc::now().date_naive())
}

/// The viewer's current UTC offset. `getTimezoneOffset` is minutes *west*
/// of UTC, so the sign flips.
pub fn viewer_offset() -> FixedOffset {
    use js_sys::Date;
    let minutes_west = Date::new_0().get_timezone_offset();
    FixedOffset::west_opt((minutes_west as i32) * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap())
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "January",
    }
}

pub fn weekday_short(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}

/// "Jun 3 - Jun 9, 2024" style range header for the week controls
pub fn format_week_range(monday: NaiveDate, sunday: NaiveDate) -> String {
    format!(
        "{} {} - {} {}, {}",
        &month_name(monday.month())[..3],
        monday.day(),
        &month_name(sunday.month())[..3],
        sunday.day(),
        sunday.year(),
    )
}

/// A slot's start instant in the viewer's wall clock, for confirmation text
pub fn format_slot_time(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = instant.with_timezone(&offset);
    format!(
        "{} {}, {} at {}",
        month_name(local.month()),
        local.day(),
        local.year(),
        local.format("%H:%M"),
    )
}
