//! List site content

use anyhow::Result;

use crate::content::{Category, Field, Post};
use crate::helpers::{display_date, filter_posts, sort_posts, Paginator, SortOrder};
use crate::Site;

/// Date format used in listings
const LIST_DATE_FORMAT: &str = "MMM DD, YYYY";

/// What the `list` command should show
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub category: Option<String>,
    pub drafts: bool,
    pub search: Option<String>,
    pub sort: SortOrder,
    pub page: usize,
    pub per_page: usize,
}

/// List site content by type
pub fn run(site: &Site, content_type: &str, options: &ListOptions) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = load_posts(site, options);
            let paginator = Paginator::from(posts.as_slice(), options.per_page);
            if paginator.page_count() == 0 {
                println!("Posts (0):");
                return Ok(());
            }

            let page = paginator.get_page(options.page).map_err(anyhow::Error::msg)?;
            println!(
                "Posts ({}), page {}/{}:",
                posts.len(),
                options.page,
                paginator.page_count()
            );
            for post in page {
                println!("  {}", format_post(post));
            }
        }
        "category" | "categories" => {
            let categories = site.content().categories();
            println!("Categories ({}):", categories.len());
            for category in &categories {
                println!("  {}", format_category(site, category));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}

/// Load, search and order the posts the options ask for
fn load_posts(site: &Site, options: &ListOptions) -> Vec<Post> {
    let repo = site.content();
    let fields = [
        Field::Slug,
        Field::Title,
        Field::Description,
        Field::Date,
        Field::Status,
    ];
    let only_published = !options.drafts;

    let posts = match &options.category {
        Some(category) => repo.posts_by_category(category, &fields, only_published),
        None => repo.all_posts(&fields, only_published),
    };

    let mut posts: Vec<Post> = match &options.search {
        Some(term) => filter_posts(&posts, term).into_iter().cloned().collect(),
        None => posts,
    };
    sort_posts(&mut posts, options.sort);
    posts
}

fn format_post(post: &Post) -> String {
    let date = display_date(post.date.as_deref(), LIST_DATE_FORMAT);
    let title = post.title.as_deref().unwrap_or_default();
    let path = match (&post.category, &post.slug) {
        (Some(category), Some(slug)) => format!("{}/{}", category, slug),
        (None, Some(slug)) => slug.clone(),
        _ => String::new(),
    };
    let draft = if post.is_published() { "" } else { " (draft)" };
    format!("{} - {} [{}]{}", date, title, path, draft)
}

fn format_category(site: &Site, category: &Category) -> String {
    let count = site.content().post_slugs(Some(&category.slug)).len();
    if category.name == category.slug {
        format!("{} ({})", category.slug, count)
    } else {
        format!("{} - {} ({})", category.slug, category.name, count)
    }
}
