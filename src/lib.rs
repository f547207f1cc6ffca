//! site-content: the content layer of a consulting company's marketing site
//!
//! Blog posts are markdown files with YAML front-matter under
//! `_data/posts/`, optionally grouped into category directories, and the
//! site-wide settings live in `_data/config.json`. Everything is read from
//! disk on each call and nothing here ever writes to the tree.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;

use std::path::{Path, PathBuf};

use content::{ContentRepository, Field, Post, PostSlug};

/// Directory holding the site's data, relative to the base directory
pub const DATA_DIR: &str = "_data";

/// A site checkout: where its data lives and how to read it
#[derive(Debug, Clone)]
pub struct Site {
    /// Base directory
    pub base_dir: PathBuf,
    /// `_data` directory
    pub data_dir: PathBuf,
    /// `_data/posts` directory
    pub posts_dir: PathBuf,
    /// `_data/config.json`
    pub config_path: PathBuf,
}

impl Site {
    /// Resolve the data paths of a site rooted at `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let data_dir = base_dir.join(DATA_DIR);
        let posts_dir = data_dir.join("posts");
        let config_path = data_dir.join("config.json");

        Self {
            base_dir,
            data_dir,
            posts_dir,
            config_path,
        }
    }

    /// Repository over the posts directory
    pub fn content(&self) -> ContentRepository {
        ContentRepository::new(&self.posts_dir)
    }

    /// Site configuration, read afresh on every call
    pub fn config(&self) -> config::DataConfig {
        config::load_config(&self.config_path)
    }

    /// Published posts listed under `blogs.slugs` in the configuration, in
    /// that order. Slugs that do not resolve to a published post are skipped.
    pub fn featured_posts(&self, fields: &[Field]) -> Vec<Post> {
        let repo = self.content();
        self.config()
            .blogs
            .slugs
            .iter()
            .filter_map(|slug| {
                let post = repo.post_by_slug(&PostSlug::new(slug.as_str()), fields, true);
                if post.is_none() {
                    tracing::warn!("Featured post {} not found", slug);
                }
                post
            })
            .collect()
    }
}
