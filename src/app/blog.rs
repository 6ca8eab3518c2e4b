use leptos::prelude::*;
use leptos::server_fn::codec::GetUrl;
use leptos_meta::Title;
use leptos_router::{components::*, hooks::*};

use super::work::{TableOfContents, TagList};
#[cfg(feature = "ssr")]
use crate::blog::{get_meta, get_post};
use crate::blog::{Post, PostMeta, GLOBAL_META_CACHE, GLOBAL_POST_CACHE};
use crate::config::SiteConfig;

const SEARCH_PARAM: &str = "q";

#[server(input = GetUrl)]
pub async fn get_meta_server(pattern: String) -> Result<Vec<PostMeta>, ServerFnError> {
    get_meta(pattern.clone()).await.ok_or_else(|| {
        tracing::warn!(%pattern, "blog listing failed");
        ServerFnError::new("Couldn't parse blog posts")
    })
}

#[server(input = GetUrl)]
pub async fn get_post_server(name: String) -> Result<Post, ServerFnError> {
    get_post(format!("{name}.md"))
        .await
        .ok_or_else(|| ServerFnError::new(format!("No post named {name}")))
}

/// Line shown above the post list, e.g. `2 posts matching "rust"`.
fn listing_summary(count: usize, search: &str) -> String {
    let noun = if count == 1 { "post" } else { "posts" };
    if search.is_empty() {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun} matching \"{search}\"")
    }
}

fn read_time_label(minutes: u32) -> String {
    format!("{minutes} min read")
}

#[component]
pub fn BlogWrapper() -> impl IntoView {
    let site = SiteConfig::global();
    view! {
        <Title text="Writing" />
        <div class="text-center mb-8">
            <h1 class="font-bold text-3xl lg:text-4xl mb-4 section-content">
                <a href="/blog" class="hover:text-purple transition-colors duration-200">
                    "Writing"
                </a>
                <a
                    href="/rss.xml"
                    target="_blank"
                    class="relative top-1 ml-4 text-brightYellow hover:text-yellow transition-colors duration-200"
                    aria-label="RSS Feed"
                >
                    <i class="extra-rss" />
                </a>
            </h1>
            <div class="max-w-2xl mx-auto text-lg font-medium text-muted section-content">
                {format!("Notes from {} on building and measuring products.", site.author)}
            </div>
        </div>
        <div class="w-full max-w-4xl mx-auto text-left">
            <Outlet />
        </div>
    }
}

#[component]
pub fn BlogIndex() -> impl IntoView {
    let query = use_query_map();
    let search = move || query.get().get(SEARCH_PARAM).unwrap_or_default();
    let posts = Resource::new(search, move |search| async move {
        let cache = &*GLOBAL_META_CACHE;
        if let Some(s) = cache.get(&search) {
            return (*s).clone();
        }
        let meta = get_meta_server(search.clone()).await.unwrap_or_default();
        #[cfg(feature = "hydrate")]
        cache.insert(search, meta.clone());
        meta
    });

    view! {
        <Title text="Posts" />
        <form method="get" action="/blog" class="flex gap-3 mb-6 section-content">
            <input
                name=SEARCH_PARAM
                value=search
                aria-label="Search posts (regex)"
                placeholder="Search posts, regex welcome"
                class="flex-grow px-4 py-2 rounded-md border border-muted/30 bg-background text-foreground placeholder-muted focus:outline-none focus:ring-2 focus:ring-cyan"
            />
            <button
                type="submit"
                class="bg-cyan/20 hover:bg-cyan/30 text-cyan px-4 py-2 rounded-md font-medium border border-cyan/30 transition-all duration-200"
            >
                "Search"
            </button>
        </form>
        <Transition fallback=move || view! { <div class="loading-skeleton h-24 rounded"></div> }>
            {move || Suspend::new(async move {
                let posts = posts.await;
                view! {
                    <p class="text-sm text-muted mb-4">{listing_summary(posts.len(), &search())}</p>
                    <div class="grid gap-6 md:grid-cols-2 section-content">
                        {posts.into_iter().map(|post| view! { <PostCard post=post /> }).collect_view()}
                    </div>
                }
            })}
        </Transition>
    }
}

#[component]
fn PostCard(post: PostMeta) -> impl IntoView {
    view! {
        <A
            attr:class="block p-4 rounded-md border border-muted/30 hover:bg-brightBlack/20 transition-colors duration-200"
            href=post.name
        >
            <div class="text-sm text-muted">
                {post.date.format("%b %e, %Y").to_string()} " · " {read_time_label(post.read_time)}
            </div>
            <div class="text-lg text-blue font-medium mt-1">{post.title}</div>
            <p class="mt-2 text-sm">{post.description}</p>
            <TagList tags=post.tags />
        </A>
    }
}

#[component]
pub fn PostView() -> impl IntoView {
    let params = use_params_map();
    let name = move || params.get().get("post").unwrap_or_default();
    let post = Resource::new(name, move |name| async move {
        let cache = &*GLOBAL_POST_CACHE;
        if let Some(p) = cache.get(&name) {
            return (*p)
                .clone()
                .ok_or(ServerFnError::new("Couldn't get blog post"));
        }
        let post = get_post_server(name.clone()).await;
        // only cache on the browser, the server keeps its own post cache
        #[cfg(feature = "hydrate")]
        cache.insert(name, post.clone().ok());
        post
    });

    view! {
        <Suspense fallback=move || view! { <div class="loading-skeleton h-48 rounded"></div> }>
            {move || Suspend::new(async move {
                post.await
                    .map(|p| {
                        let meta = p.meta;
                        view! {
                            <Title text=meta.title.clone() />
                            <article class="section-content">
                                <div class="text-sm text-muted mb-2">
                                    {meta.author} " · "
                                    {meta.date.format("%B %e, %Y").to_string()} " · "
                                    {read_time_label(meta.read_time)}
                                </div>
                                <h2 class="text-2xl font-bold mb-4">{meta.title}</h2>
                                <p class="text-lg mb-2">{meta.description}</p>
                                <div class="mb-6">
                                    <TagList tags=meta.tags />
                                </div>
                                <TableOfContents toc=p.toc />
                                <div class="prose prose-invert max-w-none" inner_html=p.content></div>
                            </article>
                        }
                    })
            })}
        </Suspense>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_summary() {
        assert_eq!(listing_summary(0, ""), "0 posts");
        assert_eq!(listing_summary(1, ""), "1 post");
        assert_eq!(listing_summary(2, "rust"), "2 posts matching \"rust\"");
        assert_eq!(listing_summary(1, "pwa|wasm"), "1 post matching \"pwa|wasm\"");
    }

    #[test]
    fn test_read_time_label() {
        assert_eq!(read_time_label(1), "1 min read");
        assert_eq!(read_time_label(12), "12 min read");
    }
}
