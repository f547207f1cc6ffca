//! Front-matter parsing

use serde_yaml::{Mapping, Value};

use crate::error::{ContentError, Result};

const DELIMITER: &str = "---";

/// Front-matter data from a post, kept as an ordered YAML mapping so that
/// keys nobody knows about can be passed through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    data: Mapping,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// A file that does not open with a `---` line has no front-matter and is
    /// returned whole as the body. A block that is never closed runs to the
    /// end of the file, leaving an empty body.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let Some((yaml, body)) = split(content) else {
            return Ok((FrontMatter::default(), content));
        };

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(data) => Ok((Self { data }, body)),
            Value::Null => Ok((FrontMatter::default(), body)),
            _ => Err(ContentError::NotAMapping),
        }
    }

    /// Raw value of a key, with YAML tags stripped
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut value = self.data.get(key)?;
        while let Value::Tagged(tagged) = value {
            value = &tagged.value;
        }
        Some(value)
    }

    /// A scalar key rendered as a string. Sequences, mappings and nulls
    /// count as absent.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Split `---\n<yaml>\n---\n<body>` into its two halves. Without a closing
/// line everything after the opening one is YAML.
fn split(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = strip_delimiter_line(rest)?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    Some((rest, ""))
}

/// Strip the opening `---` line, returning what follows it.
fn strip_delimiter_line(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(DELIMITER)?;
    if let Some(rest) = rest.strip_prefix("\r\n") {
        return Some(rest);
    }
    rest.strip_prefix('\n')
}
