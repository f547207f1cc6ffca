//! Post and Category models

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::path::{Path, PathBuf};

use super::FrontMatter;
use crate::helpers::{now_iso, parse_date_string};

/// File extension of post files
pub const POST_EXTENSION: &str = "md";

/// Author used when a post does not name one
pub const DEFAULT_AUTHOR: &str = "Admin";

/// `status` value of a published post
pub const STATUS_PUBLISHED: i64 = 1;

/// `status` given to placeholder records built from broken front-matter
pub const STATUS_BROKEN: i64 = 0;

/// Address of a post: its file stem plus the category directory it lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostSlug {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl PostSlug {
    /// A slug with no known category
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            category: None,
        }
    }

    /// A slug stored under `category`
    pub fn in_category(slug: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            category: Some(category.into()),
        }
    }

    /// Path of the backing markdown file under `root`
    pub fn path_in(&self, root: &Path) -> PathBuf {
        let file = format!("{}.{}", self.slug, POST_EXTENSION);
        match &self.category {
            Some(category) => root.join(category).join(file),
            None => root.join(file),
        }
    }

    /// Slug with hyphens turned into spaces, used as a fallback title
    pub fn humanized(&self) -> String {
        self.slug.replace('-', " ")
    }
}

impl fmt::Display for PostSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.category {
            Some(category) => write!(f, "{}/{}", category, self.slug),
            None => f.write_str(&self.slug),
        }
    }
}

/// A field a caller can ask the loader to materialise
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Slug,
    Category,
    Title,
    Description,
    Date,
    Author,
    Status,
    Image,
    Content,
    /// Any other front-matter key, passed through verbatim
    Other(String),
}

impl Field {
    /// Every field with a dedicated slot on [`Post`]
    pub const ALL: &'static [Field] = &[
        Field::Slug,
        Field::Category,
        Field::Title,
        Field::Description,
        Field::Date,
        Field::Author,
        Field::Status,
        Field::Image,
        Field::Content,
    ];

    /// Parse a comma separated list such as `"title,date,slug"`
    pub fn parse_list(list: &str) -> Vec<Field> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Field::from)
            .collect()
    }

    pub fn name(&self) -> &str {
        match self {
            Field::Slug => "slug",
            Field::Category => "category",
            Field::Title => "title",
            Field::Description => "description",
            Field::Date => "date",
            Field::Author => "author",
            Field::Status => "status",
            Field::Image => "image",
            Field::Content => "content",
            Field::Other(name) => name,
        }
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        match name {
            "slug" => Field::Slug,
            "category" => Field::Category,
            "title" => Field::Title,
            "description" => Field::Description,
            "date" => Field::Date,
            "author" => Field::Author,
            "status" => Field::Status,
            "image" => Field::Image,
            "content" => Field::Content,
            other => Field::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A post as handed to page rendering.
///
/// Only the fields the caller asked for are populated; everything else stays
/// `None` and is left out when serialised. `category` is filled whenever the
/// post lives in a category directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Publication date as written in the front-matter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// `1` is published, anything else is a draft
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Raw markdown body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Requested front-matter keys without a dedicated slot, plus an `image`
    /// that is a list or mapping rather than a plain path
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,

    /// Parsed date used for ordering, kept even when `date` was not requested
    #[serde(skip)]
    pub(crate) sort_date: Option<DateTime<Utc>>,
}

impl Post {
    /// Whether the post carries the published status
    pub fn is_published(&self) -> bool {
        self.status == Some(STATUS_PUBLISHED)
    }

    /// Date used to order listings
    pub fn sort_date(&self) -> Option<DateTime<Utc>> {
        self.sort_date
    }

    /// Stand-in for a post whose front-matter could not be parsed
    pub fn placeholder(post_slug: &PostSlug, fields: &[Field]) -> Self {
        let now = Utc::now();
        let mut post = Post {
            category: post_slug.category.clone(),
            sort_date: Some(now),
            ..Default::default()
        };

        for field in fields {
            match field {
                Field::Slug => post.slug = Some(post_slug.slug.clone()),
                Field::Category => {}
                Field::Title => {
                    post.title = Some(format!("{} (YAML Error)", post_slug.humanized()))
                }
                Field::Description => {
                    post.description = Some("This post has YAML parsing errors".to_string())
                }
                Field::Content => {
                    post.content =
                        Some("Content has YAML errors. Please fix front matter.".to_string())
                }
                Field::Date => post.date = Some(now_iso(now)),
                Field::Status => post.status = Some(STATUS_BROKEN),
                Field::Author => post.author = Some(String::new()),
                Field::Image => post.image = Some(String::new()),
                Field::Other(key) => {
                    post.extra.insert(key.clone(), Value::String(String::new()));
                }
            }
        }

        post
    }
}

/// Front-matter with the site's defaults applied
#[derive(Debug, Clone)]
pub struct SanitizedFrontMatter<'a> {
    front_matter: &'a FrontMatter,
    pub status: i64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub author: String,
}

impl<'a> SanitizedFrontMatter<'a> {
    pub fn new(post_slug: &PostSlug, front_matter: &'a FrontMatter) -> Self {
        let trimmed = |key: &str| {
            front_matter
                .get_string(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            front_matter,
            status: parse_status(front_matter.get("status")),
            title: trimmed("title").unwrap_or_else(|| post_slug.humanized()),
            description: trimmed("description").unwrap_or_default(),
            date: front_matter
                .get_string("date")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| now_iso(Utc::now())),
            author: trimmed("author").unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == STATUS_PUBLISHED
    }

    /// Build a post holding only `fields`.
    ///
    /// `slug` comes from the file name and `content` from the body; a
    /// front-matter key of the same name is ignored.
    pub fn project(&self, post_slug: &PostSlug, body: &str, fields: &[Field]) -> Post {
        let mut post = Post {
            category: post_slug.category.clone(),
            sort_date: parse_date_string(&self.date),
            ..Default::default()
        };

        for field in fields {
            match field {
                Field::Slug => post.slug = Some(post_slug.slug.clone()),
                Field::Content => post.content = Some(body.to_string()),
                Field::Category => {}
                Field::Title => post.title = Some(self.title.clone()),
                Field::Description => post.description = Some(self.description.clone()),
                Field::Date => post.date = Some(self.date.clone()),
                Field::Author => post.author = Some(self.author.clone()),
                Field::Status => post.status = Some(self.status),
                Field::Image => match self.front_matter.get("image") {
                    Some(value) if value.is_sequence() || value.is_mapping() => {
                        post.extra.insert("image".to_string(), value.clone());
                    }
                    _ => post.image = self.front_matter.get_string("image"),
                },
                Field::Other(key) => {
                    if let Some(value) = self.front_matter.get(key).filter(|v| !v.is_null()) {
                        post.extra.insert(key.clone(), value.clone());
                    }
                }
            }
        }

        post
    }
}

/// Absent or null means published; integers and integer strings are taken
/// as-is; anything else is a draft.
fn parse_status(value: Option<&Value>) -> i64 {
    match value {
        None | Some(Value::Null) => STATUS_PUBLISHED,
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .unwrap_or(STATUS_BROKEN),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(STATUS_BROKEN),
        Some(_) => STATUS_BROKEN,
    }
}

/// A category directory with its optional `__info__.json` metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Display name, never empty
    pub name: String,
    /// Directory name
    pub slug: String,
    /// Remaining keys from `__info__.json`
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Category {
    /// A category with no metadata: the slug doubles as its name
    pub fn bare(slug: &str) -> Self {
        Self {
            name: slug.to_string(),
            slug: slug.to_string(),
            extra: IndexMap::new(),
        }
    }

    /// Merge metadata over the bare record. `slug` always wins, and `name`
    /// falls back to the slug unless the metadata has a non-empty string.
    pub fn with_info(slug: &str, mut info: IndexMap<String, serde_json::Value>) -> Self {
        let name = match info.shift_remove("name") {
            Some(serde_json::Value::String(name)) if !name.is_empty() => name,
            _ => slug.to_string(),
        };
        info.shift_remove("slug");

        Self {
            name,
            slug: slug.to_string(),
            extra: info,
        }
    }
}
