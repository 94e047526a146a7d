//! Heading anchors.
//!
//! Slugs follow the GitHub heading-anchor scheme: lowercase, punctuation removed, each
//! whitespace character turned into `-`. A slug seen before gets `-1`, `-2`, ... appended,
//! skipping any suffixed form already taken by an earlier heading.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{M}\p{N}\p{Pc}\s-]").unwrap());

/// Slug used when a heading has no text that survives slugging.
const EMPTY_SLUG: &str = "section";

/// Per-document slug generator. Create one per document and drop it afterwards.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug `text`, unique among all slugs this instance has produced.
    pub fn slug(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = EMPTY_SLUG.to_string();
        }

        let mut slug = base.clone();
        while self.occurrences.contains_key(&slug) {
            let count = self.occurrences.entry(base.clone()).or_insert(0);
            *count += 1;
            slug = format!("{base}-{count}");
        }
        self.occurrences.insert(slug.clone(), 0);
        slug
    }
}

/// Slug `text` without disambiguation.
pub fn slugify(text: &str) -> String {
    DISALLOWED_RE
        .replace_all(&text.to_lowercase(), "")
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("What's new in v2.0?"), "whats-new-in-v20");
        assert_eq!(slugify("snake_case & kebab-case"), "snake_case--kebab-case");
        assert_eq!(slugify("Überblick"), "überblick");
        assert_eq!(slugify("  padded "), "--padded-");
    }

    #[test]
    fn test_duplicates_are_numbered_in_order() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Intro"), "intro");
        assert_eq!(slugger.slug("Intro"), "intro-1");
        assert_eq!(slugger.slug("Intro"), "intro-2");
        assert_eq!(slugger.slug("Other"), "other");
    }

    #[test]
    fn test_suffix_collisions_are_skipped() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("a-1"), "a-1");
        assert_eq!(slugger.slug("a"), "a");
        assert_eq!(slugger.slug("a"), "a-2");
    }

    #[test]
    fn test_empty_headings_still_get_an_id() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug(""), "section");
        assert_eq!(slugger.slug("???"), "section-1");
    }

    #[test]
    fn test_slugger_state_is_per_instance() {
        let mut first = Slugger::new();
        first.slug("Intro");
        let mut second = Slugger::new();
        assert_eq!(second.slug("Intro"), "intro");
    }
}
