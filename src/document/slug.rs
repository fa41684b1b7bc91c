//! Heading anchor slugification.
//!
//! Anchors follow the heading-id scheme used by GitHub-flavored renderers:
//! lowercase the text, keep alphanumerics, `-` and `_`, turn spaces into `-`,
//! and drop everything else. Repeated slugs in one document get numeric
//! suffixes.

use std::collections::HashMap;

/// Slugify heading text into an anchor.
///
/// # Rules
/// 1. Lowercase the entire string
/// 2. Replace each space with `-`
/// 3. Keep alphanumerics (any script), `-` and `_`
/// 4. Strip everything else
///
/// Consecutive dashes are not collapsed: `"A -- B"` becomes `"a----b"`.
#[must_use]
pub fn slugify(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c == ' ' {
                Some('-')
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

/// Tracks slugs already issued within one document.
#[derive(Debug, Default)]
pub struct SlugSet {
    seen: HashMap<String, usize>,
}

impl SlugSet {
    /// Create an empty slug set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `text`, appending `-1`, `-2`, ... for repeats.
    pub fn issue(&mut self, text: &str) -> String {
        let base = slugify(text);
        let Some(&count) = self.seen.get(&base) else {
            self.seen.insert(base.clone(), 1);
            return base;
        };

        // A literal heading like "Intro 1" can already own "intro-1".
        let mut n = count;
        let mut candidate = format!("{base}-{n}");
        while self.seen.contains_key(&candidate) {
            n += 1;
            candidate = format!("{base}-{n}");
        }
        self.seen.insert(base, n + 1);
        self.seen.insert(candidate.clone(), 1);
        candidate
    }
}
