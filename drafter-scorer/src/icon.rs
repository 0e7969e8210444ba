//! Icon resolution for recommendation results.

use drafter_core::ChampionRecord;

/// Placeholder returned when a record has no usable icon.
pub const DEFAULT_ICON: &str = "/static/icons/default.png";

const ALLOWED_PREFIXES: [&str; 3] = ["http://", "https://", "/"];

/// Return the record's icon when it is an absolute web or site-rooted URI.
///
/// Anything else yields `default_icon`: a missing or non-string value, a
/// blank string, a relative path or another scheme. The prefix check applies
/// to the raw value, so leading whitespace also falls back.
///
/// # Examples
/// ```
/// use drafter_core::ChampionRecord;
/// use drafter_scorer::{DEFAULT_ICON, resolve_icon};
///
/// let cdn = ChampionRecord::default().with_field("icon", "https://cdn/x.png");
/// assert_eq!(resolve_icon(&cdn, DEFAULT_ICON), "https://cdn/x.png");
///
/// let ftp = ChampionRecord::default().with_field("icon", "ftp://x");
/// assert_eq!(resolve_icon(&ftp, DEFAULT_ICON), DEFAULT_ICON);
/// ```
#[must_use]
pub fn resolve_icon(record: &ChampionRecord, default_icon: &str) -> String {
    record
        .icon()
        .filter(|icon| is_trusted(icon))
        .unwrap_or(default_icon)
        .to_owned()
}

fn is_trusted(icon: &str) -> bool {
    !icon.trim().is_empty() && ALLOWED_PREFIXES.iter().any(|prefix| icon.starts_with(prefix))
}
