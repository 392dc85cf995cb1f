pub mod inventory;
pub mod planning;

use serde::Serialize;
use time::{Date, OffsetDateTime, macros::format_description};

use crate::error::{AppError, Result};

/// Parses a `YYYY-MM-DD` argument, defaulting to today (UTC).
pub fn parse_date_or_today(input: Option<&str>) -> Result<Date> {
    let Some(input) = input else {
        return Ok(OffsetDateTime::now_utc().date());
    };

    Date::parse(input.trim(), format_description!("[year]-[month]-[day]")).map_err(|source| {
        AppError::InvalidDate {
            input: input.to_owned(),
            source,
        }
    })
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}
