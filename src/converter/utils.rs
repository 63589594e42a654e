use std::sync::OnceLock;

use anyhow::bail;
use chrono::{FixedOffset, Local, NaiveDateTime, TimeZone};
use log::debug;
use regex::Regex;

// Hexo dates are site-local time, UTC+8
const SITE_UTC_OFFSET_SECS: i32 = 8 * 3600;
const HEXO_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const HUGO_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
const QUOTED_MARKER: &str = "\u{0}";

fn quoted_item_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"'([^']*)'|"([^"]*)""#).unwrap())
}

pub(super) fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// `2025-10-24 15:30:00` -> `2025-10-24T15:30:00+08:00`. Anything else is returned as is.
pub(super) fn convert_date(raw: &str) -> String {
    let parsed = match NaiveDateTime::parse_from_str(raw.trim(), HEXO_DATE_FORMAT) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Keeping date {raw:?} unconverted: {e}");
            return raw.to_string();
        }
    };
    FixedOffset::east_opt(SITE_UTC_OFFSET_SECS)
        .and_then(|tz| tz.from_local_datetime(&parsed).single())
        .map_or_else(
            || raw.to_string(),
            |date| date.format(HUGO_DATE_FORMAT).to_string(),
        )
}

pub(super) fn now() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

// `/cs-61b/00-intro/` -> `cs-61b/00-intro`
pub(super) fn extract_slug(permalink: &str) -> Option<String> {
    let slug = permalink.trim_matches('/').trim();
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}

/// Parses an inline value of `categories` or `tags`.
/// `['a', 'b']` gives both items, a scalar gives a single item.
/// Quoted and bare items cannot be mixed.
pub(super) fn parse_list(value: &str) -> anyhow::Result<Vec<String>> {
    let value = unquote(value);
    match (value.starts_with('['), value.ends_with(']')) {
        (true, true) => {}
        (false, false) => return Ok(vec![value.to_string()]),
        _ => bail!("Unbalanced brackets in list: {value}"),
    }

    let inner = &value[1..value.len() - 1];
    let pattern = quoted_item_pattern();
    // every quoted item collapses to one marker so only the list layout is left
    let skeleton = pattern.replace_all(inner, QUOTED_MARKER);
    if skeleton.contains(['[', ']']) {
        bail!("Nested list is not supported: {value}");
    }

    let mut quoted = 0;
    let mut bare = 0;
    for piece in skeleton.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if piece == QUOTED_MARKER {
            quoted += 1;
        } else if piece.contains(QUOTED_MARKER) {
            bail!("Malformed list item in {value}");
        } else {
            bare += 1;
        }
    }
    if quoted > 0 && bare > 0 {
        bail!("Mixed quoted and bare items in list: {value}");
    }

    if bare > 0 {
        // [a, b]
        return Ok(inner
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect());
    }
    Ok(pattern
        .captures_iter(inner)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect())
}
