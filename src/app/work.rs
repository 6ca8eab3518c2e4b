use leptos::prelude::*;
use leptos::server_fn::codec::GetUrl;
use leptos_meta::Title;
use leptos_router::{components::*, hooks::*};

use super::counter::MetricCounter;
use crate::blog::TocEntry;
use crate::content::{CaseStudy, CaseStudyPage, GLOBAL_CASE_STUDY_CACHE};
use crate::projects::Project;

const MORE_WORK_COUNT: usize = 3;

#[server(input = GetUrl)]
pub async fn get_case_studies_server() -> Result<Vec<CaseStudy>, ServerFnError> {
    crate::content::load_case_studies().map_err(|e| {
        tracing::warn!(error = %e, "couldn't load case studies");
        ServerFnError::new(e.to_string())
    })
}

#[server(input = GetUrl)]
pub async fn get_case_study_server(slug: String) -> Result<CaseStudyPage, ServerFnError> {
    let study = crate::content::get_case_study(&slug)
        .ok_or_else(|| ServerFnError::new(format!("No case study named {slug}")))?;
    let rendered = crate::markdown::render_markdown(&study.body);
    Ok(CaseStudyPage {
        study,
        body_html: rendered.html,
        toc: rendered.toc,
    })
}

#[server(input = GetUrl)]
pub async fn get_random_projects_server(
    count: usize,
    exclude: Option<String>,
) -> Result<Vec<Project>, ServerFnError> {
    Ok(crate::projects::random_projects(count, exclude.as_deref()))
}

#[server(input = GetUrl)]
pub async fn get_featured_projects_server(count: usize) -> Result<Vec<Project>, ServerFnError> {
    Ok(crate::projects::featured_projects(count))
}

#[component]
pub fn WorkWrapper() -> impl IntoView {
    view! {
        <Title text="Work" />
        <div class="text-center mb-8">
            <h1 class="font-bold text-3xl lg:text-4xl mb-4 section-content">
                <a href="/work" class="hover:text-purple transition-colors duration-200">
                    "Selected Work"
                </a>
            </h1>
            <div class="max-w-2xl mx-auto text-lg font-medium text-muted section-content">
                "Case studies with the numbers that mattered to the people who paid for them."
            </div>
        </div>
        <div class="w-full max-w-4xl mx-auto text-left">
            <Outlet />
        </div>
    }
}

#[component]
pub fn WorkIndex() -> impl IntoView {
    let studies = Resource::new(
        || (),
        |_| async move { get_case_studies_server().await.unwrap_or_default() },
    );

    view! {
        <Title text="Case Studies" />
        <Transition fallback=move || view! { <div class="loading-skeleton h-24 rounded"></div> }>
            {move || Suspend::new(async move {
                let studies = studies.await;
                view! {
                    <div class="grid gap-6 md:grid-cols-2 section-content">
                        {studies
                            .into_iter()
                            .map(|study| {
                                let headline = study.metrics.first().cloned();
                                view! {
                                    <A
                                        attr:class="block p-4 rounded-md border border-muted/30 hover:bg-brightBlack/20 transition-colors duration-200"
                                        href=study.slug
                                    >
                                        <div class="text-sm text-muted">
                                            {study.client} " · "
                                            {study.date.format("%b %Y").to_string()}
                                        </div>
                                        <div class="text-lg text-blue font-medium mt-1">
                                            {study.title}
                                        </div>
                                        <p class="mt-2 text-sm">{study.summary}</p>
                                        {headline
                                            .map(|m| {
                                                view! {
                                                    <div class="mt-3 text-cyan font-bold">
                                                        {m.value} " " <span class="text-muted font-normal">{m.label}</span>
                                                    </div>
                                                }
                                            })}
                                    </A>
                                }
                            })
                            .collect_view()}
                    </div>
                }
            })}
        </Transition>
    }
}

#[component]
pub fn CaseStudyView() -> impl IntoView {
    let params = use_params_map();
    let slug = move || params.get().get("slug").unwrap_or_default();
    let page = Resource::new(slug, move |slug| async move {
        let cache = &*GLOBAL_CASE_STUDY_CACHE;
        if let Some(s) = cache.get(&slug) {
            return (*s)
                .clone()
                .ok_or(ServerFnError::new("Couldn't get case study"));
        }
        let page = get_case_study_server(slug.clone()).await;
        // only cache on the browser, the server keeps its own content cache
        #[cfg(feature = "hydrate")]
        cache.insert(slug, page.clone().ok());
        page
    });
    let more = Resource::new(slug, move |slug| async move {
        get_random_projects_server(MORE_WORK_COUNT, Some(slug))
            .await
            .unwrap_or_default()
    });

    view! {
        <Title text="Case Study" />
        <Suspense>
            {move || Suspend::new(async move {
                let page = page.await;
                page.map(|p| {
                    let study = p.study;
                    view! {
                        <article class="section-content">
                            <div class="text-sm text-muted mb-2">
                                {study.client} " · " {study.date.format("%B %Y").to_string()}
                            </div>
                            <h2 class="text-2xl font-bold mb-4">{study.title}</h2>
                            <p class="text-lg mb-6">{study.summary}</p>
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-4 mb-8">
                                {study
                                    .metrics
                                    .into_iter()
                                    .map(|m| view! { <MetricCounter value=m.value label=m.label /> })
                                    .collect_view()}
                            </div>
                            <TableOfContents toc=p.toc />
                            <div class="prose prose-invert max-w-none" inner_html=p.body_html></div>
                        </article>
                    }
                })
            })}
        </Suspense>
        <Transition>
            {move || Suspend::new(async move {
                let projects = more.await;
                (!projects.is_empty())
                    .then(|| {
                        view! {
                            <section class="mt-12">
                                <h3 class="text-xl font-bold mb-4">"More work"</h3>
                                <div class="grid gap-4 md:grid-cols-3">
                                    {projects
                                        .into_iter()
                                        .map(|p| view! { <ProjectCard project=p /> })
                                        .collect_view()}
                                </div>
                            </section>
                        }
                    })
            })}
        </Transition>
    }
}

#[component]
pub fn ProjectCard(project: Project) -> impl IntoView {
    let href = project.url.clone().or_else(|| {
        project
            .case_study
            .then(|| format!("/work/{}", project.slug))
    });
    view! {
        <a
            href=href
            class="block p-4 rounded-md border border-muted/30 hover:bg-brightBlack/20 transition-colors duration-200"
        >
            <div class="font-medium text-blue">{project.title}</div>
            <p class="mt-1 text-sm">{project.summary}</p>
            <TagList tags=project.tags />
        </a>
    }
}

#[component]
pub fn TagList(tags: Vec<String>) -> impl IntoView {
    view! {
        <div class="mt-2">
            {tags
                .into_iter()
                .map(|t| {
                    view! { <span class="rounded-md px-2 py-1 bg-brightBlack mr-2 text-xs">{t}</span> }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn TableOfContents(toc: Vec<TocEntry>) -> impl IntoView {
    (!toc.is_empty()).then(|| {
        view! {
            <nav class="mb-6 p-4 bg-brightBlack/20 rounded-md border border-muted/30 text-sm">
                <div class="font-medium text-green mb-2">"Contents"</div>
                <ul class="space-y-1">
                    {toc
                        .into_iter()
                        .map(|entry| {
                            let class = if entry.level > 2 { "ml-4" } else { "" };
                            view! {
                                <li class=class>
                                    <a href=format!("#{}", entry.id) class="hover:text-cyan">
                                        {entry.title}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </nav>
        }
    })
}
