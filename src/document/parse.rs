//! Markdown parsing into a [`Document`].
//!
//! Uses `pulldown-cmark`'s offset iterator so every heading, code block and
//! link carries the 1-based line it starts on. Links inside code never reach
//! us as link events, so they are ignored for free.

use pulldown_cmark::{
    CodeBlockKind, Event, LinkType, MetadataBlockKind, Options, Parser, Tag, TagEnd,
};
use serde::Deserialize;

use super::slug::SlugSet;
use super::{CodeSample, Document, Link, LinkKind, Section};

/// The subset of YAML front matter `docgraph` reads.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    title: Option<String>,
}

/// Heading being accumulated between its start and end events.
struct OpenHeading {
    level: u8,
    line: usize,
    custom_id: Option<String>,
    text: String,
}

/// Parse Markdown `source` into a [`Document`] identified by `id`.
///
/// Title precedence: front-matter `title`, then the first level-1 heading,
/// then the file stem of `id`.
#[must_use]
pub fn parse_document(id: &str, source: &str, extensions: &[String]) -> Document {
    let lines = LineIndex::new(source);
    let parser = Parser::new_ext(source, parser_options());

    let mut slugs = SlugSet::new();
    let mut sections = Vec::new();
    let mut code_samples = Vec::new();
    let mut links = Vec::new();
    let mut front_matter_title = None;

    let mut heading: Option<OpenHeading> = None;
    let mut in_metadata = false;

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)) => in_metadata = true,
            Event::End(TagEnd::MetadataBlock(_)) => in_metadata = false,
            Event::Text(text) if in_metadata => {
                front_matter_title = serde_yaml::from_str::<FrontMatter>(&text)
                    .ok()
                    .and_then(|fm| fm.title)
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty());
            }
            Event::Start(Tag::Heading {
                level,
                id: custom_id,
                ..
            }) => {
                heading = Some(OpenHeading {
                    level: level as u8,
                    line: lines.line_of(range.start),
                    custom_id: custom_id.map(|i| i.to_string()),
                    text: String::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(open) = heading.take() {
                    let text = open.text.trim().to_string();
                    let anchor = match open.custom_id {
                        Some(custom) => {
                            slugs.issue(&custom);
                            custom
                        }
                        None => slugs.issue(&text),
                    };
                    sections.push(Section {
                        level: open.level,
                        text,
                        anchor,
                        line: open.line,
                    });
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(open) = heading.as_mut() {
                    open.text.push_str(&text);
                }
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|lang| lang.trim_matches(|c| c == '{' || c == '}').to_string())
                        .filter(|lang| !lang.is_empty()),
                    CodeBlockKind::Indented => None,
                };
                code_samples.push(CodeSample {
                    language,
                    line: lines.line_of(range.start),
                });
            }
            Event::Start(Tag::Link {
                link_type, dest_url, ..
            }) => {
                let line = lines.line_of(range.start);
                links.push(make_link(link_type, &dest_url, line, false, extensions));
            }
            Event::Start(Tag::Image {
                link_type, dest_url, ..
            }) => {
                let line = lines.line_of(range.start);
                links.push(make_link(link_type, &dest_url, line, true, extensions));
            }
            _ => {}
        }
    }

    let title = front_matter_title
        .or_else(|| {
            sections
                .iter()
                .find(|s| s.level == 1 && !s.text.is_empty())
                .map(|s| s.text.clone())
        })
        .unwrap_or_else(|| file_stem(id).to_string());

    Document {
        id: id.to_string(),
        title,
        sections,
        code_samples,
        links,
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

fn make_link(
    link_type: LinkType,
    dest_url: &str,
    line: usize,
    image: bool,
    extensions: &[String],
) -> Link {
    let raw = if link_type == LinkType::Email && !dest_url.contains(':') {
        format!("mailto:{dest_url}")
    } else {
        dest_url.trim().to_string()
    };
    let kind = LinkKind::classify(&raw, extensions);
    Link {
        raw,
        line,
        kind,
        image,
    }
}

fn file_stem(id: &str) -> &str {
    let name = id.rsplit('/').next().unwrap_or(id);
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

/// Maps byte offsets to 1-based line numbers.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }
}
