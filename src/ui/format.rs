//! Display formatting for result rows: sizes, relative dates, path parts.
//!
//! All functions are pure; the current time is passed in so output is
//! reproducible.

use chrono::{DateTime, Local};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const SECONDS_PER_DAY: i64 = 86_400;

/// Formats a byte count as `B`, `KB`, `MB` or `GB`.
///
/// # Examples
///
/// ```
/// use flashfind::ui::format::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    match bytes {
        b if b < KB => format!("{b} B"),
        b if b < MB => format!("{:.1} KB", b as f64 / KB as f64),
        b if b < GB => format!("{:.1} MB", b as f64 / MB as f64),
        b => format!("{:.1} GB", b as f64 / GB as f64),
    }
}

/// Formats a modification time relative to `now` (both epoch seconds).
///
/// `Today`, `Yesterday`, `N days ago` under a week, `N weeks ago` under a
/// month, `N months ago` under a year, then the local calendar date.
/// Timestamps in the future count as today.
///
/// # Examples
///
/// ```
/// use flashfind::ui::format::format_modified;
///
/// let now = 1_700_000_000;
/// assert_eq!(format_modified(now as u64, now), "Today");
/// assert_eq!(format_modified((now - 3 * 86_400) as u64, now), "3 days ago");
/// assert_eq!(format_modified((now - 45 * 86_400) as u64, now), "1 months ago");
/// ```
#[must_use]
pub fn format_modified(modified: u64, now: i64) -> String {
    let modified = i64::try_from(modified).unwrap_or(i64::MAX);
    let days = now.saturating_sub(modified).max(0) / SECONDS_PER_DAY;

    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{d} days ago"),
        d if d < 30 => format!("{} weeks ago", d / 7),
        d if d < 365 => format!("{} months ago", d / 30),
        _ => calendar_date(modified),
    }
}

fn calendar_date(epoch_seconds: i64) -> String {
    DateTime::from_timestamp(epoch_seconds, 0).map_or_else(
        || "unknown".to_string(),
        |utc| utc.with_timezone(&Local).format("%Y-%m-%d").to_string(),
    )
}

/// Returns the last path component, splitting on both `/` and `\`.
///
/// A path with no separator, or a trailing separator, is returned whole.
#[must_use]
pub fn file_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(i) if i + 1 < path.len() => &path[i + 1..],
        _ => path,
    }
}

/// Returns everything before the last separator, or `""` if there is none.
#[must_use]
pub fn parent_dir(path: &str) -> &str {
    path.rfind(['/', '\\']).map_or("", |i| &path[..i])
}

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut out: String = text.chars().take(width - 3).collect();
    out.push_str("...");
    out
}
