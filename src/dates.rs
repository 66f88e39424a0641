use chrono::{Local, NaiveDate};

const STORED_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Today's local date in the stored, lexically sortable form.
pub fn today_string() -> String {
    Local::now().date_naive().format(STORED_FORMAT).to_string()
}

/// Accepts `DD/MM/YYYY` only and returns the stored `YYYY-MM-DD` form.
pub fn parse_user_date(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let bytes = trimmed.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !shaped {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, DISPLAY_FORMAT)
        .ok()
        .map(|date| date.format(STORED_FORMAT).to_string())
}

/// Renders a stored date as `DD/MM/YYYY`; anything not in stored form passes through.
pub fn format_display(date: &str) -> String {
    let bytes = date.as_bytes();
    let stored = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !stored {
        return date.to_string();
    }

    let (year, rest) = date.split_at(4);
    format!("{}/{}/{}", &rest[4..6], &rest[1..3], year)
}
