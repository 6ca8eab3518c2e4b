mod blog;
mod counter;
mod homepage;
mod work;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::config::SiteConfig;
use crate::manifest::{FAVICON_PATH, MANIFEST_PATH, SMALL_ICON_PATH};
use blog::{BlogIndex, BlogWrapper, PostView};
use homepage::HomePage;
use work::{CaseStudyView, WorkIndex, WorkWrapper};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    let site = SiteConfig::global();
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <meta name="description" content=site.description.clone() />
                <meta name="theme-color" content=site.theme_color.clone() />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="manifest" href=MANIFEST_PATH />
                <link rel="apple-touch-icon" href=SMALL_ICON_PATH />
                <link rel="shortcut icon" type="image/ico" href=FAVICON_PATH />
                <link rel="alternate" type="application/rss+xml" href="/rss.xml" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body class="font-mono bg-background text-foreground">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    let name = SiteConfig::global().name.clone();

    view! {
        <Title formatter=move |title| format!("{name} - {title}") />
        <Router>
            <Nav />
            <main class="flex flex-col flex-grow items-center mx-auto w-full max-w-7xl px-4 py-8">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=HomePage />
                    <ParentRoute path=path!("/blog") view=BlogWrapper>
                        <Route path=path!("") view=BlogIndex />
                        <Route path=path!(":post") view=PostView />
                    </ParentRoute>
                    <ParentRoute path=path!("/work") view=WorkWrapper>
                        <Route path=path!("") view=WorkIndex />
                        <Route path=path!(":slug") view=CaseStudyView />
                    </ParentRoute>
                </Routes>
            </main>
            <Footer />
        </Router>
    }
}

#[component]
fn Nav() -> impl IntoView {
    let site = SiteConfig::global();
    view! {
        <header class="bg-gray-800 shadow">
            <nav class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8 py-4 flex items-center justify-between">
                <A href="/" attr:class="text-2xl font-bold text-teal-400">
                    {site.short_name.clone()}
                </A>
                <div class="flex gap-6 text-lg">
                    <A href="/work" attr:class="hover:text-cyan">"Work"</A>
                    <A href="/blog" attr:class="hover:text-cyan">"Blog"</A>
                    <a href=format!("mailto:{}", site.contact_email) class="hover:text-cyan">
                        "Contact"
                    </a>
                </div>
            </nav>
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let site = SiteConfig::global();
    view! {
        <footer class="text-center text-sm text-muted py-6">
            {format!("© {} · built {}", site.author, env!("BUILD_TIME"))}
        </footer>
    }
}
