//! Documents laid out as rows with heading anchors
//!
//! A document is plain text with markdown-style headings. Level 1 and 2
//! headings become [`Section`]s, the anchors the tracker follows; deeper
//! headings are shown but not tracked.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Deepest heading level that becomes a tracked section
pub const MAX_SECTION_LEVEL: u8 = 2;

/// Most rows a document can lay out; row positions are `u16`
pub const MAX_ROWS: usize = u16::MAX as usize;

/// Fallback id when a title has nothing to slug
const EMPTY_SLUG: &str = "section";

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read document {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Document needs {rows} rows, at most {} can be laid out", MAX_ROWS)]
    TooLong { rows: usize },
}

/// What a laid-out row shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Heading title at the given level
    Heading(u8),
    /// Rule drawn under a heading
    Underline(u8),
    Body,
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub text: String,
}

/// A tracked heading anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub level: u8,
    /// First row of the heading
    pub y: u16,
    /// Rows taken by the heading, underline included
    pub height: u16,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    rows: Vec<Row>,
    sections: Vec<Section>,
    /// Section id -> index into `sections`
    index: HashMap<String, usize>,
}

impl Document {
    /// Read and lay out a document from disk
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::try_parse(&text)?;
        tracing::debug!(
            "DOC: loaded {} ({} rows, {} sections)",
            path.display(),
            document.height(),
            document.sections.len()
        );
        Ok(document)
    }

    /// Lay out document text, failing when it does not fit in [`MAX_ROWS`]
    pub fn try_parse(text: &str) -> Result<Self, DocumentError> {
        let (document, rows) = Self::layout(text);
        if rows > MAX_ROWS {
            return Err(DocumentError::TooLong { rows });
        }
        Ok(document)
    }

    /// Lay out document text
    ///
    /// Lines past [`MAX_ROWS`] are dropped with a warning. A heading is never
    /// split from its underline.
    pub fn parse(text: &str) -> Self {
        let (document, rows) = Self::layout(text);
        if rows > MAX_ROWS {
            tracing::warn!(
                "DOC: {} rows needed, stopped laying out at row {}",
                rows,
                document.height()
            );
        }
        document
    }

    /// Returns the laid-out document and the rows the full text needs
    fn layout(text: &str) -> (Self, usize) {
        let mut rows = Vec::new();
        let mut sections = Vec::new();
        let mut used_ids = HashSet::new();
        let mut needed = 0usize;

        for line in text.lines() {
            let heading = parse_heading(line);
            let line_rows = match heading {
                Some((level, _)) if underline_char(level).is_some() => 2,
                _ => 1,
            };
            needed += line_rows;
            if needed > MAX_ROWS {
                continue;
            }

            let Some((level, raw_title)) = heading else {
                rows.push(Row {
                    kind: RowKind::Body,
                    text: line.trim_end().to_string(),
                });
                continue;
            };

            let (title, explicit_id) = split_explicit_id(raw_title);
            let y = row_index(rows.len());

            rows.push(Row {
                kind: RowKind::Heading(level),
                text: title.to_string(),
            });
            if let Some(rule) = underline_char(level) {
                let width = unicode_width::UnicodeWidthStr::width(title).max(1);
                rows.push(Row {
                    kind: RowKind::Underline(level),
                    text: rule.to_string().repeat(width),
                });
            }

            if level <= MAX_SECTION_LEVEL {
                let base = explicit_id.map(str::to_string).unwrap_or_else(|| slugify(title));
                let id = unique_id(base, &mut used_ids);
                sections.push(Section {
                    id,
                    title: title.to_string(),
                    level,
                    y,
                    height: row_index(rows.len()) - y,
                });
            }
        }

        let index = sections
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();

        let document = Self {
            rows,
            sections,
            index,
        };
        (document, needed)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section ids in document order
    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.index.get(id).map(|i| &self.sections[*i])
    }

    /// Total height in rows
    pub fn height(&self) -> u16 {
        row_index(self.rows.len())
    }
}

/// Row counts never exceed [`MAX_ROWS`] once laid out
fn row_index(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

/// `# Title` -> (1, "Title"); needs a space after the hashes
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let trimmed = line.trim_end();
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &trimmed[hashes..];
    let title = rest.strip_prefix(' ')?.trim();
    if title.is_empty() {
        return None;
    }
    Some((hashes as u8, title))
}

/// `Title {#custom}` -> ("Title", Some("custom"))
fn split_explicit_id(title: &str) -> (&str, Option<&str>) {
    if let Some(stripped) = title.strip_suffix('}') {
        if let Some(start) = stripped.rfind("{#") {
            let id = stripped[start + 2..].trim();
            if !id.is_empty() && !id.contains(char::is_whitespace) {
                return (stripped[..start].trim_end(), Some(id));
            }
        }
    }
    (title, None)
}

fn underline_char(level: u8) -> Option<char> {
    match level {
        1 => Some('═'),
        2 => Some('─'),
        _ => None,
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// Suffix `-1`, `-2`, ... until `base` is unused
fn unique_id(base: String, used: &mut HashSet<String>) -> String {
    if used.insert(base.clone()) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}", base, n);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
