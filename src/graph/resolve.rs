//! Link path resolution.
//!
//! Turns the path part of a relative link into a normalized corpus-relative
//! id: percent-escapes decoded, `.` and `..` folded, root-relative (`/x.md`)
//! paths anchored at the corpus root.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Resolution of a link path against the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResolution {
    /// Normalized corpus-relative path (`""` is the corpus root itself).
    Inside(String),

    /// The path climbs above the corpus root.
    OutsideRoot,
}

/// Resolve `link_path` as written in the document `source_id`.
#[must_use]
pub fn resolve_path(source_id: &str, link_path: &str) -> PathResolution {
    let decoded = percent_decode(link_path);

    let base: Vec<&str> = if decoded.starts_with('/') {
        Vec::new()
    } else {
        source_id
            .rsplit_once('/')
            .map(|(dir, _)| dir.split('/').collect())
            .unwrap_or_default()
    };

    fold_segments(base, &decoded)
}

/// Normalize a root-relative path typed by a user (no percent-decoding).
///
/// `\` separators become `/`, and `.` and `..` segments are folded.
#[must_use]
pub fn normalize_path(path: &str) -> PathResolution {
    fold_segments(Vec::new(), &path.replace('\\', "/"))
}

fn fold_segments<'a>(mut segments: Vec<&'a str>, path: &'a str) -> PathResolution {
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return PathResolution::OutsideRoot;
                }
            }
            other => segments.push(other),
        }
    }

    PathResolution::Inside(segments.join("/"))
}

/// Decode `%XX` escapes. Escapes that do not form valid UTF-8 leave the input
/// untouched.
#[must_use]
pub fn percent_decode(input: &str) -> String {
    percent_decode_str(input)
        .decode_utf8()
        .map_or_else(|_| input.to_string(), Cow::into_owned)
}
