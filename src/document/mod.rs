//! Document model for a Markdown corpus.
//!
//! A [`Document`] is one Markdown file, identified by its corpus-relative path.
//! Its outbound [`Link`]s are classified at parse time; resolution against the
//! rest of the corpus happens later in [`crate::graph`].

pub mod parse;
pub mod slug;

use serde::Serialize;

pub use parse::parse_document;
pub use slug::SlugSet;

/// A single Markdown document in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Corpus-relative path with `/` separators, e.g. `type-design/struct.md`.
    pub id: String,

    /// First level-1 heading, or the file stem when there is none.
    pub title: String,

    /// Headings in document order.
    pub sections: Vec<Section>,

    /// Code blocks in document order.
    pub code_samples: Vec<CodeSample>,

    /// Outbound links in document order.
    pub links: Vec<Link>,
}

impl Document {
    /// Topic folder of this document (`""` for documents at the corpus root).
    #[must_use]
    pub fn topic(&self) -> &str {
        self.id.rsplit_once('/').map_or("", |(dir, _)| dir)
    }

    /// Returns `true` if any heading in this document has the given anchor slug.
    #[must_use]
    pub fn has_anchor(&self, anchor: &str) -> bool {
        self.sections.iter().any(|s| s.anchor == anchor)
    }
}

/// A heading within a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading level, 1 through 6.
    pub level: u8,

    /// Plain heading text.
    pub text: String,

    /// Anchor slug other documents use to link here.
    pub anchor: String,

    /// 1-based source line.
    pub line: usize,
}

/// An embedded code sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSample {
    /// Info-string language of a fenced block, if any.
    pub language: Option<String>,

    /// 1-based source line of the opening fence.
    pub line: usize,
}

/// An outbound reference from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Destination exactly as written in the source.
    pub raw: String,

    /// 1-based source line.
    pub line: usize,

    /// Classification of the destination.
    pub kind: LinkKind,

    /// `true` for `![alt](src)` image references.
    pub image: bool,
}

/// What a link points at, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkKind {
    /// Relative or root-relative path to another Markdown document.
    Document {
        /// Path part, still percent-encoded.
        path: String,
        /// Fragment after `#`, if any.
        fragment: Option<String>,
    },

    /// Fragment-only reference into the linking document.
    Anchor {
        /// Fragment after `#`.
        fragment: String,
    },

    /// Relative path to a non-Markdown file (image, PDF, source file).
    Asset {
        /// Path part, still percent-encoded.
        path: String,
    },

    /// Absolute URL with a scheme (`https:`, `mailto:`, ...) or a
    /// protocol-relative `//host/path`, which is treated as `https`.
    External {
        /// URL scheme, lowercased.
        scheme: String,
    },
}

/// Scheme assumed for protocol-relative URLs.
pub const PROTOCOL_RELATIVE_SCHEME: &str = "https";

impl LinkKind {
    /// Classify a raw link destination.
    ///
    /// `extensions` lists the file extensions (without dot) that mark a path
    /// as a Markdown document.
    #[must_use]
    pub fn classify(raw: &str, extensions: &[String]) -> Self {
        if let Some(scheme) = url_scheme(raw) {
            return Self::External { scheme };
        }
        if raw.starts_with("//") {
            return Self::External {
                scheme: PROTOCOL_RELATIVE_SCHEME.to_string(),
            };
        }

        let (before_fragment, fragment) = match raw.split_once('#') {
            Some((head, frag)) => (head, Some(frag.to_string())),
            None => (raw, None),
        };
        let path = before_fragment
            .split_once('?')
            .map_or(before_fragment, |(p, _)| p);

        if path.is_empty() {
            return Self::Anchor {
                fragment: fragment.unwrap_or_default(),
            };
        }

        if is_document_path(path, extensions) {
            Self::Document {
                path: path.to_string(),
                fragment: fragment.filter(|f| !f.is_empty()),
            }
        } else {
            Self::Asset {
                path: path.to_string(),
            }
        }
    }
}

/// Extract a URL scheme (`https`, `mailto`, ...) from a destination.
///
/// A scheme is an ASCII letter followed by letters, digits, `+`, `-` or `.`,
/// terminated by `:`. Single-letter schemes are rejected so Windows drive
/// paths (`C:\docs`) are not mistaken for URLs.
fn url_scheme(raw: &str) -> Option<String> {
    let (scheme, _) = raw.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() || scheme.len() < 2 {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(scheme.to_ascii_lowercase())
    } else {
        None
    }
}

/// Returns `true` when the path names a Markdown document or a folder.
///
/// Folder links (`patterns/`) count as document links because they resolve to
/// the folder's `README.md` or `index.md`.
fn is_document_path(path: &str, extensions: &[String]) -> bool {
    if path.ends_with('/') {
        return true;
    }
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((_, ext)) => extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md() -> Vec<String> {
        vec!["md".to_string(), "markdown".to_string()]
    }

    #[test]
    fn classify_relative_document() {
        assert_eq!(
            LinkKind::classify("../patterns/observer.md#usage", &md()),
            LinkKind::Document {
                path: "../patterns/observer.md".to_string(),
                fragment: Some("usage".to_string()),
            }
        );
    }

    #[test]
    fn classify_anchor_only() {
        assert_eq!(
            LinkKind::classify("#naming", &md()),
            LinkKind::Anchor {
                fragment: "naming".to_string()
            }
        );
    }

    #[test]
    fn classify_external() {
        assert_eq!(
            LinkKind::classify("https://example.com/a.md", &md()),
            LinkKind::External {
                scheme: "https".to_string()
            }
        );
        assert_eq!(
            LinkKind::classify("MAILTO:someone@example.com", &md()),
            LinkKind::External {
                scheme: "mailto".to_string()
            }
        );
    }

    #[test]
    fn classify_protocol_relative_as_external() {
        assert_eq!(
            LinkKind::classify("//example.com/page", &md()),
            LinkKind::External {
                scheme: "https".to_string()
            }
        );
        assert!(matches!(
            LinkKind::classify("/guide.md", &md()),
            LinkKind::Document { .. }
        ));
    }

    #[test]
    fn classify_asset() {
        assert_eq!(
            LinkKind::classify("img/diagram.png", &md()),
            LinkKind::Asset {
                path: "img/diagram.png".to_string()
            }
        );
    }

    #[test]
    fn classify_folder_and_extensionless_as_document() {
        assert!(matches!(
            LinkKind::classify("patterns/", &md()),
            LinkKind::Document { .. }
        ));
        assert!(matches!(
            LinkKind::classify("patterns/README", &md()),
            LinkKind::Document { .. }
        ));
    }

    #[test]
    fn classify_strips_query() {
        assert_eq!(
            LinkKind::classify("guide.md?plain=1#top", &md()),
            LinkKind::Document {
                path: "guide.md".to_string(),
                fragment: Some("top".to_string()),
            }
        );
    }

    #[test]
    fn classify_empty_fragment_dropped() {
        assert_eq!(
            LinkKind::classify("guide.md#", &md()),
            LinkKind::Document {
                path: "guide.md".to_string(),
                fragment: None,
            }
        );
    }

    #[test]
    fn drive_letter_is_not_a_scheme() {
        assert!(!matches!(
            LinkKind::classify("C:/docs/a.md", &md()),
            LinkKind::External { .. }
        ));
    }

    #[test]
    fn topic_of_nested_and_root_documents() {
        let mut doc = Document {
            id: "type-design/struct.md".to_string(),
            title: "Struct".to_string(),
            sections: vec![],
            code_samples: vec![],
            links: vec![],
        };
        assert_eq!(doc.topic(), "type-design");
        doc.id = "README.md".to_string();
        assert_eq!(doc.topic(), "");
    }
}
