//! Field decoders: free text from table cells into canonical codes
//!
//! All functions here are pure. Keyword tables are matched by plain substring
//! containment, so both the Japanese and English spellings that show up on the
//! wiki pages are recognized.

use crate::types::{SeasonMask, WeatherMask};
use once_cell::sync::Lazy;
use regex::Regex;

/// Last minute of the day, used as the whole-day upper bound
pub const MINUTES_PER_DAY: u16 = 1440;

static NON_KEY_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]+").unwrap());

static FIRST_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

// "6:00", "19:30", "6時", "6時30"
static TIME_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{1,2})[:時]([0-9]{2})?").unwrap());

const SEASON_KEYWORDS: &[(SeasonMask, &[&str])] = &[
    (SeasonMask::SPRING, &["春", "春季", "Spring"]),
    (SeasonMask::SUMMER, &["夏", "夏季", "Summer"]),
    (SeasonMask::FALL, &["秋", "秋季", "Fall", "Autumn"]),
    (SeasonMask::WINTER, &["冬", "冬季", "Winter"]),
];

const WEATHER_KEYWORDS: &[(WeatherMask, &[&str])] = &[
    (WeatherMask::SUNNY, &["晴", "晴れ", "Sunny"]),
    (WeatherMask::RAIN, &["雨", "Rain"]),
    (WeatherMask::STORM, &["嵐", "Storm"]),
    (WeatherMask::WIND, &["風", "Wind"]),
    (WeatherMask::SNOW, &["雪", "Snow"]),
];

/// Derive the item/NPC key from a display name.
///
/// Lowercases, then collapses every run of characters outside `[a-z0-9_]`
/// into a single `_`. Idempotent.
pub fn key_from_name(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_KEY_CHARS.replace_all(&lower, "_").into_owned()
}

/// OR together the bits of every season whose keywords occur in `text`.
/// Returns an empty mask when nothing matches; callers pick the default.
pub fn season_mask_from_text(text: &str) -> SeasonMask {
    let mut mask = SeasonMask::NONE;
    for (bit, keywords) in SEASON_KEYWORDS {
        if keywords.iter().any(|k| text.contains(k)) {
            mask |= *bit;
        }
    }
    mask
}

/// OR together the bits of every weather whose keywords occur in `text`.
/// Falls back to all weather when nothing matches.
pub fn weather_mask_from_text(text: &str) -> WeatherMask {
    let mut mask = WeatherMask::NONE;
    for (bit, keywords) in WEATHER_KEYWORDS {
        if keywords.iter().any(|k| text.contains(k)) {
            mask |= *bit;
        }
    }
    if mask.is_empty() {
        WeatherMask::ALL
    } else {
        mask
    }
}

/// Decode a time window into `(start, end)` minutes of day.
///
/// Up to two `hour[:minute]` tokens are read in document order. One token gives
/// an instant (`start == end`); no token gives the whole day `(0, 1440)`.
/// The order of the two tokens is not checked.
pub fn time_range_from_text(text: &str) -> (u16, u16) {
    let text = text.replace(['–', '—'], "-");

    let mut tokens = TIME_TOKEN.captures_iter(&text).filter_map(|caps| {
        let hour: u16 = caps.get(1)?.as_str().parse().ok()?;
        let minute: u16 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        Some(hour * 60 + minute)
    });

    match (tokens.next(), tokens.next()) {
        (Some(start), Some(end)) => (start, end),
        (Some(at), None) => (at, at),
        _ => (0, MINUTES_PER_DAY),
    }
}

/// First run of ASCII digits in `text`, e.g. `"13日"` -> 13, `"100G"` -> 100.
/// A run too long for `i64` saturates to `i64::MAX`.
pub fn first_integer(text: &str) -> Option<i64> {
    let digits = FIRST_INTEGER.find(text)?.as_str();
    Some(digits.parse().unwrap_or(i64::MAX))
}
