//! Front-matter parsing
//!
//! An article file may open with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Writing clean code
//! date: 2024-01-15
//! ---
//! Body text...
//! ```
//!
//! The block is kept as an untyped, order-preserving mapping. Interpreting
//! individual fields (title, date, cover...) is left to the caller.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;
use thiserror::Error;

const DELIMITER: &str = "---";

/// Errors raised while splitting or decoding a front-matter block
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front-matter opened with `---` but never closed")]
    Unterminated,

    #[error("invalid YAML in front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front-matter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<FrontValue>),
    Map(IndexMap<String, FrontValue>),
}

impl FrontValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FrontValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FrontValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FrontValue::Integer(i) => Some(*i as f64),
            FrontValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FrontValue]> {
        match self {
            FrontValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Interpret a string value as a date
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        self.as_str().and_then(parse_date_string)
    }

    /// Render scalars as display text; lists and maps have no text form
    pub fn to_text(&self) -> Option<String> {
        match self {
            FrontValue::String(s) => Some(s.clone()),
            FrontValue::Integer(i) => Some(i.to_string()),
            FrontValue::Float(f) => Some(f.to_string()),
            FrontValue::Bool(b) => Some(b.to_string()),
            FrontValue::Null | FrontValue::List(_) | FrontValue::Map(_) => None,
        }
    }
}

impl From<YamlValue> for FrontValue {
    fn from(value: YamlValue) -> Self {
        match value {
            YamlValue::Null => FrontValue::Null,
            YamlValue::Bool(b) => FrontValue::Bool(b),
            YamlValue::Number(n) => match n.as_i64() {
                Some(i) => FrontValue::Integer(i),
                None => FrontValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            YamlValue::String(s) => FrontValue::String(s),
            YamlValue::Sequence(items) => {
                FrontValue::List(items.into_iter().map(FrontValue::from).collect())
            }
            YamlValue::Mapping(map) => FrontValue::Map(
                map.into_iter()
                    .map(|(k, v)| (key_to_string(k), FrontValue::from(v)))
                    .collect(),
            ),
            YamlValue::Tagged(tagged) => FrontValue::from(tagged.value),
        }
    }
}

/// Parsed front-matter of one article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, FrontValue>,
}

impl FrontMatter {
    /// Split `input` into front-matter and the remaining body.
    ///
    /// Input without an opening `---` line has no front-matter: the mapping is
    /// empty and the whole input is returned as the body.
    pub fn parse(input: &str) -> Result<(Self, &str), FrontMatterError> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);

        let (first, block) = split_line(input);
        if !is_delimiter(first) {
            return Ok((FrontMatter::default(), input));
        }

        let mut remaining = block;
        while !remaining.is_empty() {
            let (line, next) = split_line(remaining);
            if is_delimiter(line) {
                let yaml = &block[..block.len() - remaining.len()];
                return Ok((Self::from_yaml(yaml)?, next));
            }
            remaining = next;
        }

        Err(FrontMatterError::Unterminated)
    }

    /// Decode the text between the delimiters
    pub fn from_yaml(yaml: &str) -> Result<Self, FrontMatterError> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        let mut value: YamlValue = serde_yaml::from_str(yaml)?;
        while let YamlValue::Tagged(tagged) = value {
            value = tagged.value;
        }

        match value {
            YamlValue::Null => Ok(FrontMatter::default()),
            YamlValue::Mapping(map) => Ok(Self {
                fields: map
                    .into_iter()
                    .map(|(k, v)| (key_to_string(k), FrontValue::from(v)))
                    .collect(),
            }),
            other => Err(FrontMatterError::NotAMapping(yaml_kind(&other))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FrontValue> {
        self.fields.get(key)
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

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FrontValue)> {
        self.fields.iter()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FrontValue) -> Option<FrontValue> {
        self.fields.insert(key.into(), value)
    }

    pub fn into_inner(self) -> IndexMap<String, FrontValue> {
        self.fields
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    /// Raw `date` value as written
    pub fn date(&self) -> Option<&str> {
        self.get_str("date")
    }

    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        self.get("date").and_then(FrontValue::as_date)
    }

    /// Path of the cover image, relative to the static asset root
    pub fn cover(&self) -> Option<&str> {
        self.get_str("cover")
    }

    /// Reading time as written, e.g. "9 min read"
    pub fn time(&self) -> Option<&str> {
        self.get_str("time")
    }

    pub fn summary(&self) -> Option<&str> {
        self.get_str("summary")
    }

    pub fn featured(&self) -> bool {
        self.get("featured")
            .and_then(FrontValue::as_bool)
            .unwrap_or(false)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FrontValue::as_str)
    }
}

impl From<IndexMap<String, FrontValue>> for FrontMatter {
    fn from(fields: IndexMap<String, FrontValue>) -> Self {
        Self { fields }
    }
}

/// Returns the line without its terminator and the text after the terminator
fn split_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(pos) => (s[..pos].trim_end_matches('\r'), &s[pos + 1..]),
        None => (s, ""),
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn key_to_string(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        YamlValue::Tagged(tagged) => key_to_string(tagged.value),
        other => serde_json::to_string(&other).unwrap_or_default(),
    }
}

fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a list",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, kept in its own wall-clock time
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    None
}
