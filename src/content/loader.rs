//! Content loader - reads posts and categories from the posts directory
//!
//! The directory tree is the store: every call reads it afresh and nothing is
//! cached. Failures never reach the caller. Listing functions log and return
//! what they could read, and the single-post loader answers `None`.

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::post::POST_EXTENSION;
use super::{Category, Field, FrontMatter, Post, PostSlug, SanitizedFrontMatter};
use crate::error::{ContentError, Result};
use crate::helpers::newest_first;

/// Name of the per-category metadata file
pub const CATEGORY_INFO_FILE: &str = "__info__.json";

/// Loads posts and categories from a posts directory
#[derive(Debug, Clone)]
pub struct ContentRepository {
    posts_dir: PathBuf,
}

impl ContentRepository {
    /// Create a repository rooted at `posts_dir`
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Names of every category directory
    pub fn category_ids(&self) -> Vec<String> {
        match read_entries(&self.posts_dir) {
            Ok(entries) => entries
                .iter()
                .filter(|e| e.file_type().is_dir())
                .filter_map(entry_name)
                .collect(),
            Err(e) => {
                tracing::error!("Error reading category directories: {}", e);
                Vec::new()
            }
        }
    }

    /// Raw `__info__.json` of a category, or `None` when it is missing or
    /// unreadable
    pub fn category(&self, slug: &str) -> Option<IndexMap<String, serde_json::Value>> {
        self.read_category_info(slug).ok()
    }

    /// Every category with its metadata merged in
    pub fn categories(&self) -> Vec<Category> {
        let ids = match read_entries(&self.posts_dir) {
            Ok(entries) => entries
                .iter()
                .filter(|e| e.file_type().is_dir())
                .filter_map(entry_name)
                .collect::<Vec<_>>(),
            Err(e) => {
                tracing::error!("Error loading categories: {}", e);
                return Vec::new();
            }
        };

        ids.iter()
            .map(|slug| match self.read_category_info(slug) {
                Ok(info) => Category::with_info(slug, info),
                Err(e) => {
                    tracing::warn!("Error loading category {}: {}", slug, e);
                    Category::bare(slug)
                }
            })
            .collect()
    }

    fn read_category_info(&self, slug: &str) -> Result<IndexMap<String, serde_json::Value>> {
        let path = self.posts_dir.join(slug).join(CATEGORY_INFO_FILE);
        let content = fs::read_to_string(&path).map_err(|e| ContentError::io(&path, e))?;
        serde_json::from_str(&content).map_err(|e| ContentError::json(&path, e))
    }

    /// Slugs of every post, or only those in `category`.
    ///
    /// Markdown files directly in the posts directory are uncategorized and
    /// only listed when no category is given. A category directory that
    /// cannot be read is skipped.
    pub fn post_slugs(&self, category: Option<&str>) -> Vec<PostSlug> {
        let entries = match read_entries(&self.posts_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Error getting post slugs: {}", e);
                return Vec::new();
            }
        };

        let mut slugs = Vec::new();

        for entry in &entries {
            let Some(name) = entry_name(entry) else {
                continue;
            };

            if entry.file_type().is_file() {
                if category.is_none() {
                    if let Some(slug) = post_stem(&name) {
                        slugs.push(PostSlug::new(slug));
                    }
                }
                continue;
            }

            if !entry.file_type().is_dir() || category.is_some_and(|c| c != name) {
                continue;
            }

            match read_entries(entry.path()) {
                Ok(posts) => slugs.extend(
                    posts
                        .iter()
                        .filter(|p| p.file_type().is_file())
                        .filter_map(entry_name)
                        .filter_map(|file| post_stem(&file).map(str::to_string))
                        .map(|slug| PostSlug::in_category(slug, name.as_str())),
                ),
                Err(e) => {
                    tracing::warn!("Error reading posts in {}: {}", name, e);
                }
            }
        }

        slugs
    }

    /// Load one post with only `fields` populated.
    ///
    /// Returns `None` when the file is missing or unreadable, when
    /// `only_published` is set and the post is a draft, and when
    /// `only_published` is set and the front-matter is broken. Without
    /// `only_published` a broken post comes back as a placeholder whose
    /// title ends in "(YAML Error)".
    pub fn post_by_slug(
        &self,
        post_slug: &PostSlug,
        fields: &[Field],
        only_published: bool,
    ) -> Option<Post> {
        let resolved;
        let post_slug = if post_slug.category.is_none() {
            resolved = self.resolve_category(&post_slug.slug);
            &resolved
        } else {
            post_slug
        };

        let content = fs::read_to_string(post_slug.path_in(&self.posts_dir)).ok()?;

        let (front_matter, body) = match FrontMatter::parse(&content) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("YAML parsing error in {}: {}", post_slug.slug, e);
                if only_published {
                    return None;
                }
                return Some(Post::placeholder(post_slug, fields));
            }
        };

        let sanitized = SanitizedFrontMatter::new(post_slug, &front_matter);
        if only_published && !sanitized.is_published() {
            return None;
        }

        Some(sanitized.project(post_slug, body, fields))
    }

    /// Find the category of a bare slug by scanning every post; the first
    /// match in enumeration order wins
    fn resolve_category(&self, slug: &str) -> PostSlug {
        match self.post_slugs(None).into_iter().find(|p| p.slug == slug) {
            Some(found) => {
                tracing::debug!("Resolved {} to {}", slug, found);
                found
            }
            None => PostSlug::new(slug),
        }
    }

    /// Posts of one category, newest first
    pub fn posts_by_category(
        &self,
        category: &str,
        fields: &[Field],
        only_published: bool,
    ) -> Vec<Post> {
        self.load_sorted(self.post_slugs(Some(category)), fields, only_published)
    }

    /// Every post, newest first
    pub fn all_posts(&self, fields: &[Field], only_published: bool) -> Vec<Post> {
        self.load_sorted(self.post_slugs(None), fields, only_published)
    }

    fn load_sorted(&self, slugs: Vec<PostSlug>, fields: &[Field], only_published: bool) -> Vec<Post> {
        let mut posts: Vec<Post> = slugs
            .iter()
            .filter_map(|slug| self.post_by_slug(slug, fields, only_published))
            .collect();

        posts.sort_by(newest_first);
        posts
    }
}

/// Direct children of `dir`, sorted by file name. Failing to open `dir`
/// itself is an error; a single unreadable child is logged and skipped.
fn read_entries(dir: &Path) -> Result<Vec<DirEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(e) if e.depth() == 0 => return Err(ContentError::from(e)),
            Err(e) => tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, e),
        }
    }

    Ok(entries)
}

fn entry_name(entry: &DirEntry) -> Option<String> {
    entry.file_name().to_str().map(str::to_string)
}

/// File stem of a post file, `None` for anything that is not markdown
fn post_stem(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(POST_EXTENSION)
        .and_then(|stem| stem.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn post_file(title: &str, date: &str, status: i64) -> String {
        format!(
            "---\ntitle: {}\ndate: {}\nstatus: {}\n---\nBody of {}\n",
            title, date, status, title
        )
    }

    /// news/ (two published, one draft), events/ (one published, info file),
    /// one uncategorized post, one stray non-markdown file
    fn fixture() -> (TempDir, ContentRepository) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "welcome.md", &post_file("Welcome", "2023-01-01", 1));
        write(root, "notes.txt", "not a post");
        write(root, "news/launch.md", &post_file("Launch", "2024-06-01", 1));
        write(root, "news/old-news.md", &post_file("Old", "2022-12-31", 1));
        write(root, "news/secret.md", &post_file("Secret", "2025-01-01", 0));
        write(root, "events/meetup.md", &post_file("Meetup", "2024-01-01", 1));
        write(
            root,
            "events/__info__.json",
            r#"{"name": "Sự kiện", "description": "Upcoming events"}"#,
        );
        let repo = ContentRepository::new(root);
        (dir, repo)
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_deref().unwrap()).collect()
    }

    #[test]
    fn test_category_ids() {
        let (_dir, repo) = fixture();
        assert_eq!(repo.category_ids(), vec!["events", "news"]);
    }

    #[test]
    fn test_categories_merge_info_and_fall_back() {
        let (_dir, repo) = fixture();
        let categories = repo.categories();
        assert_eq!(categories.len(), 2);

        assert_eq!(categories[0].slug, "events");
        assert_eq!(categories[0].name, "Sự kiện");
        assert_eq!(categories[0].extra["description"], "Upcoming events");

        assert_eq!(categories[1], Category::bare("news"));
    }

    #[test]
    fn test_category_with_broken_info_falls_back() {
        let (dir, repo) = fixture();
        write(dir.path(), "news/__info__.json", "{ not json");

        assert!(repo.category("news").is_none());
        assert_eq!(repo.categories()[1], Category::bare("news"));
    }

    #[test]
    fn test_category_info() {
        let (_dir, repo) = fixture();
        let info = repo.category("events").unwrap();
        assert_eq!(info["name"], "Sự kiện");
        assert!(repo.category("news").is_none());
        assert!(repo.category("missing").is_none());
    }

    #[test]
    fn test_post_slugs() {
        let (_dir, repo) = fixture();
        let all = repo.post_slugs(None);
        assert_eq!(
            all,
            vec![
                PostSlug::in_category("meetup", "events"),
                PostSlug::in_category("launch", "news"),
                PostSlug::in_category("old-news", "news"),
                PostSlug::in_category("secret", "news"),
                PostSlug::new("welcome"),
            ]
        );

        let news = repo.post_slugs(Some("news"));
        assert_eq!(news.len(), 3);
        assert!(news.iter().all(|p| p.category.as_deref() == Some("news")));
        assert!(repo.post_slugs(Some("nope")).is_empty());
    }

    #[test]
    fn test_missing_root_yields_empty_lists() {
        let dir = TempDir::new().unwrap();
        let repo = ContentRepository::new(dir.path().join("does-not-exist"));
        assert!(repo.category_ids().is_empty());
        assert!(repo.categories().is_empty());
        assert!(repo.post_slugs(None).is_empty());
        assert!(repo.all_posts(Field::ALL, true).is_empty());
        assert!(repo.post_by_slug(&PostSlug::new("x"), Field::ALL, false).is_none());
    }

    #[test]
    fn test_round_trip_requested_fields() {
        let (_dir, repo) = fixture();
        let post = repo
            .post_by_slug(
                &PostSlug::new("welcome"),
                &[Field::Title, Field::Date, Field::Status],
                true,
            )
            .unwrap();

        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            serde_json::json!({"title": "Welcome", "date": "2023-01-01", "status": 1})
        );
    }

    #[test]
    fn test_bare_slug_resolves_category() {
        let (_dir, repo) = fixture();
        let post = repo
            .post_by_slug(&PostSlug::new("launch"), &[Field::Slug, Field::Content], true)
            .unwrap();
        assert_eq!(post.category.as_deref(), Some("news"));
        assert_eq!(post.slug.as_deref(), Some("launch"));
        assert_eq!(post.content.as_deref(), Some("Body of Launch\n"));
    }

    #[test]
    fn test_wrong_category_is_not_found() {
        let (_dir, repo) = fixture();
        let slug = PostSlug::in_category("launch", "events");
        assert!(repo.post_by_slug(&slug, Field::ALL, false).is_none());
    }

    #[test]
    fn test_drafts_hidden_when_only_published() {
        let (_dir, repo) = fixture();
        let slug = PostSlug::in_category("secret", "news");
        assert!(repo.post_by_slug(&slug, &[Field::Title], true).is_none());

        let draft = repo.post_by_slug(&slug, &[Field::Status], false).unwrap();
        assert_eq!(draft.status, Some(0));
    }

    #[test]
    fn test_default_filling() {
        let (dir, repo) = fixture();
        write(dir.path(), "empty-front-matter.md", "---\n{}\n---\nHello");

        let post = repo
            .post_by_slug(
                &PostSlug::new("empty-front-matter"),
                &[Field::Title, Field::Description, Field::Author, Field::Status],
                true,
            )
            .unwrap();

        assert_eq!(post.title.as_deref(), Some("empty front matter"));
        assert_eq!(post.description.as_deref(), Some(""));
        assert_eq!(post.author.as_deref(), Some("Admin"));
        assert_eq!(post.status, Some(1));
    }

    #[test]
    fn test_malformed_yaml() {
        let (dir, repo) = fixture();
        write(dir.path(), "news/broken.md", "---\ntitle: [oops\n---\nBody");
        let slug = PostSlug::in_category("broken", "news");

        assert!(repo.post_by_slug(&slug, &[Field::Title], true).is_none());

        let post = repo
            .post_by_slug(&slug, &[Field::Title, Field::Status], false)
            .unwrap();
        assert!(post.title.unwrap().contains("YAML Error"));
        assert_eq!(post.status, Some(0));

        let titles: Vec<_> = repo
            .posts_by_category("news", &[Field::Slug], true)
            .into_iter()
            .map(|p| p.slug.unwrap())
            .collect();
        assert!(!titles.contains(&"broken".to_string()));
    }

    #[test]
    fn test_unclosed_front_matter_is_not_published() {
        let (dir, repo) = fixture();
        write(
            dir.path(),
            "news/secret-plan.md",
            "---\ntitle: Secret plan\nstatus: 2\n",
        );
        write(dir.path(), "news/dangling.md", "---\ntitle: [oops\n");

        let secret = PostSlug::in_category("secret-plan", "news");
        assert!(repo.post_by_slug(&secret, &[Field::Title], true).is_none());
        let draft = repo
            .post_by_slug(&secret, &[Field::Title, Field::Status, Field::Content], false)
            .unwrap();
        assert_eq!(draft.title.as_deref(), Some("Secret plan"));
        assert_eq!(draft.status, Some(2));
        assert_eq!(draft.content.as_deref(), Some(""));

        let dangling = PostSlug::in_category("dangling", "news");
        assert!(repo.post_by_slug(&dangling, &[Field::Title], true).is_none());
        assert_eq!(repo.posts_by_category("news", &[Field::Slug], true).len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entries_are_skipped() {
        use std::os::unix::fs::symlink;

        let (dir, repo) = fixture();
        symlink("missing", dir.path().join("ghost")).unwrap();
        symlink("missing.md", dir.path().join("news/ghost.md")).unwrap();

        assert_eq!(repo.category_ids(), vec!["events", "news"]);
        assert_eq!(repo.post_slugs(None).len(), 5);
        assert_eq!(repo.post_slugs(Some("news")).len(), 3);
        assert_eq!(repo.all_posts(&[Field::Slug], true).len(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_category_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, repo) = fixture();
        let locked = dir.path().join("news");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let still_readable = fs::read_dir(&locked).is_ok();

        let slugs = repo.post_slugs(None);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Permission bits do not apply to root
        if !still_readable {
            assert_eq!(
                slugs,
                vec![PostSlug::in_category("meetup", "events"), PostSlug::new("welcome")]
            );
        }
    }

    #[test]
    fn test_all_posts_sorted_and_published() {
        let (_dir, repo) = fixture();
        let posts = repo.all_posts(&[Field::Slug, Field::Date, Field::Status], true);

        assert_eq!(slugs(&posts), vec!["launch", "meetup", "welcome", "old-news"]);
        assert!(posts.iter().all(|p| p.status == Some(1)));

        let with_drafts = repo.all_posts(&[Field::Slug], false);
        assert_eq!(with_drafts.len(), 5);
        assert_eq!(with_drafts[0].slug.as_deref(), Some("secret"));
    }

    #[test]
    fn test_sorting_without_date_field() {
        let (_dir, repo) = fixture();
        let posts = repo.posts_by_category("news", &[Field::Slug], true);
        assert_eq!(slugs(&posts), vec!["launch", "old-news"]);
        assert!(posts.iter().all(|p| p.date.is_none()));
    }

    #[test]
    fn test_posts_by_category_is_scoped() {
        let (_dir, repo) = fixture();
        let posts = repo.posts_by_category("events", &[Field::Slug], true);
        assert_eq!(slugs(&posts), vec!["meetup"]);
        assert!(posts.iter().all(|p| p.category.as_deref() == Some("events")));
    }

    #[test]
    fn test_loading_is_idempotent() {
        let (_dir, repo) = fixture();
        let slug = PostSlug::in_category("launch", "news");
        let first = repo.post_by_slug(&slug, Field::ALL, true);
        let second = repo.post_by_slug(&slug, Field::ALL, true);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_post_stem() {
        assert_eq!(post_stem("hello.md"), Some("hello"));
        assert_eq!(post_stem("hello.md.bak"), None);
        assert_eq!(post_stem("readme"), None);
        assert_eq!(post_stem("xmd"), None);
        assert_eq!(post_stem(".md"), None);
    }
}
