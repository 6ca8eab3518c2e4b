use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

#[cfg(any(feature = "ssr", feature = "rss"))]
use gray_matter::{engine::YAML, Matter};
#[cfg(any(feature = "ssr", feature = "rss"))]
use regex::RegexBuilder;

#[cfg(any(feature = "ssr", feature = "rss"))]
use crate::markdown::render_markdown;
#[cfg(any(feature = "ssr", feature = "rss"))]
use crate::reading::calculate_advanced_read_time;

pub static GLOBAL_POST_CACHE: LazyLock<DashMap<String, Option<Post>>> = LazyLock::new(DashMap::new);
pub static GLOBAL_META_CACHE: LazyLock<DashMap<String, Vec<PostMeta>>> =
    LazyLock::new(DashMap::new);

#[derive(Embed)]
#[folder = "blog"]
#[cfg_attr(feature = "hydrate", metadata_only = true)]
pub struct Assets;

#[cfg(any(feature = "ssr", feature = "rss"))]
#[derive(Deserialize, Debug, Default)]
struct FrontMatter {
    title: String,
    description: String,
    author: String,
    date: DateTime<Utc>,
    tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMeta {
    pub name: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
    /// Minutes, from the markdown-aware estimate.
    pub read_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u8,
    pub id: String,
    pub title: String,
}

#[derive(Error, Debug, Clone)]
pub enum BlogError {
    #[error("Blog post not found")]
    NotFound,
    #[error("Couldn't parse blog posts")]
    ParseError,
}

/// Post names are file names without the `.md` extension.
pub fn post_names() -> Vec<String> {
    Assets::iter()
        .filter_map(|s| s.strip_suffix(".md").map(str::to_string))
        .collect()
}

#[cfg(any(feature = "ssr", feature = "rss"))]
fn read_asset(file: &str) -> Result<String, BlogError> {
    let content = Assets::get(file).ok_or(BlogError::NotFound)?;
    String::from_utf8(content.data.into()).map_err(|_| BlogError::ParseError)
}

#[cfg(any(feature = "ssr", feature = "rss"))]
fn parse_meta(file: &str, content: &str) -> Result<PostMeta, BlogError> {
    let matter = Matter::<YAML>::new();
    let fm = matter
        .parse_with_struct::<FrontMatter>(content)
        .ok_or(BlogError::ParseError)?;
    Ok(PostMeta {
        name: file.trim_end_matches(".md").to_string(),
        title: fm.data.title,
        description: fm.data.description,
        author: fm.data.author,
        date: fm.data.date,
        tags: fm.data.tags,
        read_time: calculate_advanced_read_time(&fm.content).minutes,
    })
}

#[cfg(any(feature = "ssr", feature = "rss"))]
pub async fn get_meta(pattern: String) -> Option<Vec<PostMeta>> {
    let cache = &*GLOBAL_META_CACHE;
    let is_base = pattern.is_empty();
    if is_base {
        if let Some(r) = cache.get(&pattern) {
            return Some(r.clone());
        }
    }
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .ok()?;
    let posts = Assets::iter()
        .map(|s| read_asset(&s).map(|content| (s, content)))
        .filter(|res| match res {
            Ok((_, content)) => is_base || re.is_match(content),
            Err(_) => true,
        })
        .map(|res| res.and_then(|(s, content)| parse_meta(&s, &content)))
        .collect::<Result<Vec<PostMeta>, BlogError>>();
    let posts = match posts {
        Ok(mut pv) => {
            pv.sort_by(|a, b| b.date.cmp(&a.date));
            Some(pv)
        }
        Err(e) => {
            tracing::warn!(error = %e, "couldn't list blog posts");
            None
        }
    };
    if is_base {
        cache.insert(pattern, posts.clone().unwrap_or_default());
    }

    posts
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub meta: PostMeta,
    pub content: String,
    pub toc: Vec<TocEntry>,
}

#[cfg(any(feature = "ssr", feature = "rss"))]
pub async fn get_post(name: String) -> Option<Post> {
    let cache = &*GLOBAL_POST_CACHE;
    if let Some(post) = cache.get(&name) {
        return post.clone();
    }

    let post = read_asset(&name)
        .and_then(|content| {
            let meta = parse_meta(&name, &content)?;
            let rendered = render_markdown(&content);
            Ok(Post {
                meta,
                content: rendered.html,
                toc: rendered.toc,
            })
        })
        .inspect_err(|e| tracing::debug!(%name, error = %e, "couldn't load post"))
        .ok();
    cache.insert(name, post.clone());
    post
}
