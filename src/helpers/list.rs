//! List helper functions for the blog gallery: search, ordering and paging

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::content::Post;

/// Posts shown per gallery page
pub const DEFAULT_PER_PAGE: usize = 12;

/// Keep posts whose title, description or category contains `term`,
/// ignoring case. A blank term keeps everything.
pub fn filter_posts<'a>(posts: &'a [Post], term: &str) -> Vec<&'a Post> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return posts.iter().collect();
    }

    let matches = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(&term))
    };

    posts
        .iter()
        .filter(|post| matches(&post.title) || matches(&post.description) || matches(&post.category))
        .collect()
}

/// Gallery ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first
    #[default]
    Latest,
    /// Oldest first
    Oldest,
    /// Alphabetical by title
    Title,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(SortOrder::Latest),
            "oldest" => Ok(SortOrder::Oldest),
            "title" => Ok(SortOrder::Title),
            other => Err(format!(
                "Unknown sort order: {}. Available: latest, oldest, title",
                other
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Latest => "latest",
            SortOrder::Oldest => "oldest",
            SortOrder::Title => "title",
        })
    }
}

/// Sort posts in place. Posts without a readable date go last for both date
/// orders; ties keep their current order.
pub fn sort_posts<P: AsRef<Post>>(posts: &mut [P], order: SortOrder) {
    match order {
        SortOrder::Latest => posts.sort_by(|a, b| newest_first(a.as_ref(), b.as_ref())),
        SortOrder::Oldest => posts.sort_by(|a, b| oldest_first(a.as_ref(), b.as_ref())),
        SortOrder::Title => posts.sort_by(|a, b| {
            let a = a.as_ref().title.as_deref().unwrap_or_default();
            let b = b.as_ref().title.as_deref().unwrap_or_default();
            a.to_lowercase().cmp(&b.to_lowercase())
        }),
    }
}

/// Comparator for listings: most recent date first
pub fn newest_first(a: &Post, b: &Post) -> Ordering {
    match (a.sort_date(), b.sort_date()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn oldest_first(a: &Post, b: &Post) -> Ordering {
    match (a.sort_date(), b.sort_date()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl AsRef<Post> for Post {
    fn as_ref(&self) -> &Post {
        self
    }
}

/// Splits a list into fixed-size pages, numbered from 1
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
    page_count: usize,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Paginator {
            items,
            page_size,
            page_count: items.len().div_ceil(page_size),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn get_page(&self, page: usize) -> Result<&'a [T], String> {
        match page {
            0 => return Err("Page has to be greater than 0".to_string()),
            x if x > self.page_count => {
                return Err(format!(
                    "Page has to be less than page_count ({})",
                    self.page_count
                ))
            }
            _ => {}
        };

        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.items.len());
        Ok(&self.items[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::parse_date_string;

    fn post(title: &str, description: &str, category: Option<&str>, date: Option<&str>) -> Post {
        Post {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            category: category.map(str::to_string),
            date: date.map(str::to_string),
            sort_date: date.and_then(parse_date_string),
            ..Default::default()
        }
    }

    fn titles<P: AsRef<Post>>(posts: &[P]) -> Vec<&str> {
        posts
            .iter()
            .map(|p| p.as_ref().title.as_deref().unwrap())
            .collect()
    }

    #[test]
    fn test_filter_posts() {
        let posts = vec![
            post("Visa guide", "Work permits", Some("immigration"), None),
            post("Hiring", "Find talent", Some("hr"), None),
            post("Brand", "Marketing VISA tips", None, None),
        ];

        assert_eq!(titles(&filter_posts(&posts, "visa")), vec!["Visa guide", "Brand"]);
        assert_eq!(titles(&filter_posts(&posts, "HR")), vec!["Hiring"]);
        assert_eq!(filter_posts(&posts, "  ").len(), 3);
        assert!(filter_posts(&posts, "nothing").is_empty());
    }

    #[test]
    fn test_sort_orders() {
        let mut posts = vec![
            post("b", "", None, Some("2023-01-01")),
            post("c", "", None, None),
            post("a", "", None, Some("2024-06-01")),
        ];

        sort_posts(&mut posts, SortOrder::Latest);
        assert_eq!(titles(&posts), vec!["a", "b", "c"]);

        sort_posts(&mut posts, SortOrder::Oldest);
        assert_eq!(titles(&posts), vec!["b", "a", "c"]);

        posts[2].title = Some("Z".to_string());
        sort_posts(&mut posts, SortOrder::Title);
        assert_eq!(titles(&posts), vec!["a", "b", "Z"]);
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("oldest".parse::<SortOrder>(), Ok(SortOrder::Oldest));
        assert!("random".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::default().to_string(), "latest");
    }

    #[test]
    fn test_paginator() {
        let items: Vec<u32> = (1..=13).collect();
        let paginator = Paginator::from(items.as_slice(), 3);
        assert_eq!(paginator.page_count(), 5);
        assert_eq!(paginator.get_page(1), Ok(&[1, 2, 3][..]));
        assert_eq!(paginator.get_page(5), Ok(&[13][..]));
        assert_eq!(
            paginator.get_page(0),
            Err("Page has to be greater than 0".to_string())
        );
        assert_eq!(
            paginator.get_page(6),
            Err("Page has to be less than page_count (5)".to_string())
        );
    }

    #[test]
    fn test_paginator_empty() {
        let items: Vec<u32> = vec![];
        let paginator = Paginator::from(items.as_slice(), DEFAULT_PER_PAGE);
        assert_eq!(paginator.page_count(), 0);
        assert!(paginator.get_page(1).is_err());
    }
}
