//! Value parsers shared by the subcommands.

use chrono::{NaiveDate, NaiveTime, Weekday};
use moon_core::habits::MAX_WINDOW_DAYS;
use moon_core::SettingKey;

pub fn date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("expected a date like 2026-10-19, got '{s}'"))
}

pub fn time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| format!("expected a time like 23:30, got '{s}'"))
}

pub fn weekday(s: &str) -> Result<Weekday, String> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| format!("expected a weekday like Mon, got '{s}'"))
}

pub fn setting(s: &str) -> Result<SettingKey, String> {
    s.parse::<SettingKey>().map_err(|e| e.to_string())
}

/// Habit window length, `1..=MAX_WINDOW_DAYS`.
pub fn window_days(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(days) if (1..=MAX_WINDOW_DAYS).contains(&days) => Ok(days),
        _ => Err(format!(
            "expected a number of days from 1 to {MAX_WINDOW_DAYS}, got '{s}'"
        )),
    }
}

/// Split a shell line into words. Double quotes group words; a backslash
/// escapes the next character.
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let next = chars.next().ok_or("dangling escape at end of line")?;
                current.push(next);
                in_word = true;
            }
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quoted {
        return Err("unterminated quote".into());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
