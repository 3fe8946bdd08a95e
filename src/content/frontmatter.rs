//! Front-matter parsing
//!
//! Content files carry a `---` delimited header of `key: value` lines.
//! Bracketed values become lists and `difficulty` is read as an integer;
//! everything else is kept as text. The parser only knows about this
//! syntax, typed per-domain fields live in `metadata`.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Key whose value is coerced to an integer
pub const DIFFICULTY_KEY: &str = "difficulty";

lazy_static! {
    /// First `---` line, lazily matched up to the next `---` line
    static ref HEADER_BLOCK: Regex =
        Regex::new(r"(?ms)^---[ \t\r]*\n(.*?)^---[ \t\r]*$").expect("valid header regex");
}

/// Front-matter parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no `---` delimited header block found")]
    MissingHeader,

    #[error("line {line}: expected `key: value`, found {text:?}")]
    MalformedLine { line: usize, text: String },

    #[error("`{key}` must be a base-10 integer, found {value:?}")]
    NumericCoercion { key: String, value: String },
}

/// A single header value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Integer(i64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "list",
            FieldValue::Integer(_) => "integer",
        }
    }
}

impl fmt::Display for FieldValue {
    /// Writes the value the way it appears in a header line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) if needs_quotes(s) => write!(f, "\"{}\"", s),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{}'", item)?;
                }
                f.write_str("]")
            }
            FieldValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

/// Header fields in the order they were declared
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, FieldValue>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. A repeated key replaces the value but keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Remove a field, keeping the order of the others
    pub fn take(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn into_fields(self) -> IndexMap<String, FieldValue> {
        self.fields
    }
}

impl FromIterator<(String, FieldValue)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A content file split into its header and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub front_matter: FrontMatter,
    /// Everything outside the header block, trimmed
    pub content: String,
}

impl Document {
    /// Parse a raw content file
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let captures = HEADER_BLOCK
            .captures(raw)
            .ok_or(ParseError::MissingHeader)?;
        let block = captures.get(0).ok_or(ParseError::MissingHeader)?;
        let header = captures.get(1).map(|m| m.as_str()).unwrap_or_default();

        let mut front_matter = FrontMatter::new();
        for (idx, line) in header.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (key, value) = parse_line(idx + 1, line)?;
            front_matter.insert(key, value);
        }

        let mut content = String::with_capacity(raw.len() - (block.end() - block.start()));
        content.push_str(&raw[..block.start()]);
        content.push_str(&raw[block.end()..]);

        Ok(Self {
            front_matter,
            content: content.trim().to_string(),
        })
    }

    /// Serialize back into the content file format.
    ///
    /// For any document produced by [`Document::parse`], parsing the output
    /// yields the same document again.
    pub fn to_source(&self) -> String {
        let mut out = String::from("---\n");
        for (key, value) in self.front_matter.iter() {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        out.push_str("---\n");
        if !self.content.is_empty() {
            out.push('\n');
            out.push_str(&self.content);
            out.push('\n');
        }
        out
    }
}

/// Split one header line on the first `": "` and type its value
fn parse_line(line_no: usize, line: &str) -> Result<(String, FieldValue), ParseError> {
    let malformed = || ParseError::MalformedLine {
        line: line_no,
        text: line.trim().to_string(),
    };

    // A bare `key:` with nothing after it is an empty value
    let (key, value) = match line.split_once(": ") {
        Some(pair) => pair,
        None => (line.trim_end().strip_suffix(':').ok_or_else(malformed)?, ""),
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(malformed());
    }
    let value = value.trim();

    let (value, quoted) = match strip_quotes(value) {
        Some(inner) => (inner, true),
        None => (value, false),
    };

    let field = if key == DIFFICULTY_KEY {
        let n = value
            .trim()
            .parse::<i64>()
            .map_err(|_| ParseError::NumericCoercion {
                key: key.to_string(),
                value: value.to_string(),
            })?;
        FieldValue::Integer(n)
    } else if !quoted && is_bracketed(value) {
        FieldValue::List(parse_list(value))
    } else {
        FieldValue::Text(value.to_string())
    };

    Ok((key.to_string(), field))
}

/// Inner text of a value wrapped in one matching pair of straight quotes
fn strip_quotes(value: &str) -> Option<&str> {
    let first = value.chars().next()?;
    if value.len() >= 2 && (first == '"' || first == '\'') && value.ends_with(first) {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

fn is_bracketed(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('[') && value.ends_with(']')
}

fn parse_list(value: &str) -> Vec<String> {
    value[1..value.len() - 1]
        .split(',')
        .map(|item| item.trim().replace(['\'', '"'], ""))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Whether a text value has to be quoted to survive a re-parse
fn needs_quotes(s: &str) -> bool {
    s.is_empty() || s.trim() != s || strip_quotes(s).is_some() || is_bracketed(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn list(items: &[&str]) -> FieldValue {
        FieldValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_parse_article_header() {
        let raw = r#"---
title: 'Hello World'
publishedAt: 2024-01-15
summary: "A first post"
tags: ['rust', "go", web]
---

This is the content.
"#;

        let doc = Document::parse(raw).unwrap();
        assert_eq!(doc.front_matter.get("title"), Some(&text("Hello World")));
        assert_eq!(doc.front_matter.get("publishedAt"), Some(&text("2024-01-15")));
        assert_eq!(doc.front_matter.get("summary"), Some(&text("A first post")));
        assert_eq!(doc.front_matter.get("tags"), Some(&list(&["rust", "go", "web"])));
        assert_eq!(doc.content, "This is the content.");
    }

    #[test]
    fn test_value_keeps_later_separators() {
        let raw = "---\ntitle: Rust: the good parts: vol 1\n---\nbody";
        let doc = Document::parse(raw).unwrap();
        assert_eq!(
            doc.front_matter.get("title"),
            Some(&text("Rust: the good parts: vol 1"))
        );
    }

    #[test]
    fn test_only_one_matching_quote_pair_is_stripped() {
        let raw = "---\na: \"'quoted'\"\nb: 'open\"\nc: \"\"\n---\n";
        let doc = Document::parse(raw).unwrap();
        assert_eq!(doc.front_matter.get("a"), Some(&text("'quoted'")));
        assert_eq!(doc.front_matter.get("b"), Some(&text("'open\"")));
        assert_eq!(doc.front_matter.get("c"), Some(&text("")));
    }

    #[test]
    fn test_list_drops_empty_items_and_quotes() {
        let raw = "---\ntags: [ 'a' , , \"b\", it's ,'' ]\n---\n";
        let doc = Document::parse(raw).unwrap();
        assert_eq!(doc.front_matter.get("tags"), Some(&list(&["a", "b", "its"])));
    }

    #[test]
    fn test_duplicates_in_list_are_kept() {
        let raw = "---\ntags: [go, go]\n---\n";
        let doc = Document::parse(raw).unwrap();
        assert_eq!(doc.front_matter.get("tags"), Some(&list(&["go", "go"])));
    }

    #[test]
    fn test_quoted_brackets_stay_text() {
        let raw = "---\ntitle: \"[draft]\"\n---\n";
        let doc = Document::parse(raw).unwrap();
        assert_eq!(doc.front_matter.get("title"), Some(&text("[draft]")));
    }

    #[test]
    fn test_difficulty_is_integer() {
        let raw = "---\ndifficulty: 3\nother: 3\n---\n";
        let doc = Document::parse(raw).unwrap();
        assert_eq!(doc.front_matter.get("difficulty"), Some(&FieldValue::Integer(3)));
        assert_eq!(doc.front_matter.get("other"), Some(&text("3")));

        let quoted = Document::parse("---\ndifficulty: '4'\n---\n").unwrap();
        assert_eq!(quoted.front_matter.get("difficulty"), Some(&FieldValue::Integer(4)));
    }

    #[test]
    fn test_non_numeric_difficulty_is_rejected() {
        let err = Document::parse("---\ndifficulty: hard\n---\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::NumericCoercion {
                key: "difficulty".to_string(),
                value: "hard".to_string()
            }
        );
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            Document::parse("just a body").unwrap_err(),
            ParseError::MissingHeader
        );
        assert_eq!(
            Document::parse("---\ntitle: unterminated\n").unwrap_err(),
            ParseError::MissingHeader
        );
    }

    #[test]
    fn test_line_without_separator_is_rejected() {
        let err = Document::parse("---\ntitle: ok\nbroken\n---\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedLine {
                line: 2,
                text: "broken".to_string()
            }
        );
    }

    #[test]
    fn test_bare_key_is_empty_text() {
        let raw = "---\ntitle: T\npublishedAt: 2024-01-01\nthumbnail:\nimage:  \t\n---\nbody";
        let doc = Document::parse(raw).unwrap();
        assert_eq!(doc.front_matter.get("thumbnail"), Some(&text("")));
        assert_eq!(doc.front_matter.get("image"), Some(&text("")));
        assert_eq!(doc.content, "body");
        assert_eq!(Document::parse(&doc.to_source()).unwrap(), doc);

        assert!(matches!(
            Document::parse("---\n:\n---\n").unwrap_err(),
            ParseError::MalformedLine { line: 1, .. }
        ));
    }

    #[test]
    fn test_first_closing_marker_wins() {
        let raw = "---\ntitle: A\n---\nintro\n\n---\n\nmore: text\n";
        let doc = Document::parse(raw).unwrap();
        assert_eq!(doc.front_matter.len(), 1);
        assert_eq!(doc.content, "intro\n\n---\n\nmore: text");
    }

    #[test]
    fn test_content_never_contains_header_block() {
        let raw = "---\r\ntitle: Windows\r\n---\r\n\r\nbody line\r\n";
        let doc = Document::parse(raw).unwrap();
        assert_eq!(doc.front_matter.get("title"), Some(&text("Windows")));
        assert!(!doc.content.contains("title: Windows"));
        assert_eq!(doc.content, "body line");
    }

    #[test]
    fn test_repeated_key_overwrites_in_place() {
        let raw = "---\ntitle: first\nsummary: s\ntitle: second\n---\n";
        let doc = Document::parse(raw).unwrap();
        let keys: Vec<_> = doc.front_matter.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["title", "summary"]);
        assert_eq!(doc.front_matter.get("title"), Some(&text("second")));
    }

    #[test]
    fn test_canonical_writer_round_trip() {
        let raw = r#"---
title: 'Two Sum: revisited'
date: 2024-03-01
platform: LeetCode
difficulty: 2
languages: ['rust', 'go']
tags: [arrays, hashing]
summary: ' padded '
note: "[not a list]"
empty: ''
---

# Heading

---

Body with a rule above.
"#;
        let doc = Document::parse(raw).unwrap();
        let again = Document::parse(&doc.to_source()).unwrap();
        assert_eq!(doc, again);
    }

    #[test]
    fn test_empty_header_and_body_round_trip() {
        let doc = Document::parse("---\n---\n").unwrap();
        assert!(doc.front_matter.is_empty());
        assert_eq!(doc.content, "");
        assert_eq!(doc.to_source(), "---\n---\n");
        assert_eq!(Document::parse(&doc.to_source()).unwrap(), doc);
    }
}
