use std::{iter::Peekable, sync::OnceLock};

use anyhow::Context;
use log::debug;
use regex::{Regex, RegexBuilder};

use super::{
    data::HugoFrontMatter,
    utils::{convert_date, extract_slug, now, parse_list, unquote},
};

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        RegexBuilder::new(r"\A---\r?\n(.*?)\r?\n---\r?\n(.*)\z")
            .dot_matches_new_line(true)
            .build()
            .unwrap()
    })
}

/// Splits an article into its front matter block (without delimiters) and body.
pub(super) fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let caps = header_pattern().captures(content)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

// `tags:` followed by `- item` lines
fn block_sequence<'a, I>(lines: &mut Peekable<I>) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    let mut items = vec![];
    while let Some(&line) = lines.peek() {
        let Some(rest) = line.trim_start().strip_prefix('-') else {
            break;
        };
        if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
            break;
        }
        items.push(unquote(rest.trim()).to_string());
        lines.next();
    }
    if items.is_empty() {
        // `tags:` with nothing after it
        items.push(String::new());
    }
    items
}

impl HugoFrontMatter {
    pub fn from_hexo(header: &str) -> anyhow::Result<Self> {
        let mut title = None;
        let mut date = None;
        let mut categories = None;
        let mut tags = None;
        let mut slug = None;

        let mut lines = header.lines().peekable();
        while let Some(line) = lines.next() {
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();

            match name {
                "title" => title = Some(format!("\"{}\"", unquote(value))),
                "date" => date = Some(convert_date(value)),
                "categories" | "tags" => {
                    let items = if value.is_empty() {
                        block_sequence(&mut lines)
                    } else {
                        parse_list(value).with_context(|| format!("Invalid {name}"))?
                    };
                    if name == "categories" {
                        categories = Some(items);
                    } else {
                        tags = Some(items);
                    }
                }
                "permalink" => {
                    if let Some(s) = extract_slug(value) {
                        slug = Some(s);
                    }
                }
                // layout has no Hugo counterpart
                _ => debug!("Dropping {name:?}"),
            }
        }

        Ok(Self {
            title: title.unwrap_or_else(|| "\"Untitled\"".to_string()),
            date: date.unwrap_or_else(now),
            categories,
            tags,
            slug,
        })
    }
}
