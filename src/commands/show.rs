//! Show a single post

use anyhow::Result;

use crate::content::{Field, MarkdownRenderer, Post, PostSlug};
use crate::helpers::display_date;
use crate::Site;

/// How the post should be printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShowFormat {
    /// Header lines followed by the markdown body
    #[default]
    Text,
    /// Header lines followed by the body rendered to HTML
    Html,
    /// The post record as pretty JSON
    Json,
}

/// Fields shown when the caller does not pick any
pub fn default_fields() -> Vec<Field> {
    let mut fields = Field::ALL.to_vec();
    fields.push(Field::Other("tags".to_string()));
    fields
}

/// Load a post, with or without drafts, for display
pub fn load(
    site: &Site,
    slug: &str,
    category: Option<&str>,
    drafts: bool,
    fields: &[Field],
) -> Result<Post> {
    let post_slug = PostSlug {
        slug: slug.to_string(),
        category: category.map(str::to_string),
    };

    match site.content().post_by_slug(&post_slug, fields, !drafts) {
        Some(post) => Ok(post),
        None => anyhow::bail!("Post not found: {}", post_slug),
    }
}

/// Print a post
pub fn run(
    site: &Site,
    slug: &str,
    category: Option<&str>,
    drafts: bool,
    fields: &[Field],
    format: ShowFormat,
) -> Result<()> {
    let post = load(site, slug, category, drafts, fields)?;
    println!("{}", render(&post, format)?);
    Ok(())
}

fn render(post: &Post, format: ShowFormat) -> Result<String> {
    if format == ShowFormat::Json {
        return Ok(serde_json::to_string_pretty(post)?);
    }

    let mut out = String::new();
    let header = [
        ("Title", post.title.clone()),
        ("Category", post.category.clone()),
        ("Date", Some(display_date(post.date.as_deref(), "MMMM DD, YYYY"))),
        ("Author", post.author.clone()),
        ("Status", post.status.map(|s| s.to_string())),
        ("Image", post.image.clone()),
        ("Description", post.description.clone()),
    ];
    for (label, value) in header {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            out.push_str(&format!("{}: {}\n", label, value));
        }
    }
    out.push('\n');

    let body = post.content.as_deref().unwrap_or_default();
    match format {
        ShowFormat::Html => out.push_str(&MarkdownRenderer::new().render(body)),
        _ => out.push_str(body),
    }

    Ok(out)
}
