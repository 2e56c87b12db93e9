use chrono::{Days, NaiveDate, NaiveDateTime};

/// Parses a configured report date.
///
/// Accepts ISO dates (`2024-01-31`), ISO date-times (the time part is
/// dropped), and the relative forms `today`, `yesterday`, `N day(s) ago`
/// and `N week(s) ago`, resolved against `today`.
pub fn parse_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let text = input.trim().to_ascii_lowercase();

    match text.as_str() {
        "" => return None,
        "today" | "now" => return Some(today),
        "yesterday" => return today.checked_sub_days(Days::new(1)),
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
        return Some(date);
    }
    for fmt in ["%Y-%m-%dt%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&text, fmt) {
            return Some(dt.date());
        }
    }

    parse_relative(&text, today)
}

fn parse_relative(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [count, unit, "ago"] = parts.as_slice() else {
        return None;
    };

    let count: u64 = count.parse().ok()?;
    let days = match *unit {
        "day" | "days" => count,
        "week" | "weeks" => count.checked_mul(7)?,
        _ => return None,
    };

    today.checked_sub_days(Days::new(days))
}
