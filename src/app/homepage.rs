use leptos::prelude::*;
use leptos_meta::Title;

use super::counter::MetricCounter;
use super::work::{get_case_studies_server, get_featured_projects_server, ProjectCard};
use crate::config::SiteConfig;

const HOME_PROJECT_COUNT: usize = 3;

const HEADLINE_METRICS: &[(&str, &str)] = &[
    ("$184.4M", "revenue influenced"),
    ("10K+", "experiments shipped"),
    ("<10%", "error budget used"),
    ("4.8★", "team rating"),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let site = SiteConfig::global();
    let projects = Resource::new(
        || (),
        |_| async move {
            get_featured_projects_server(HOME_PROJECT_COUNT)
                .await
                .unwrap_or_default()
        },
    );
    let latest = Resource::new(
        || (),
        |_| async move {
            get_case_studies_server()
                .await
                .ok()
                .and_then(|studies| studies.into_iter().next())
        },
    );

    view! {
        <Title text="Home" />
        <div class="max-w-6xl mx-auto page-content">
            <section class="text-center section-content">
                <h1 class="text-3xl lg:text-4xl font-bold my-8">
                    {format!("Hi, I'm {}", site.author)}
                </h1>
                <p class="max-w-2xl mx-auto text-lg text-muted">{site.description.clone()}</p>
            </section>
            <section class="grid grid-cols-2 md:grid-cols-4 gap-4 my-12 section-content">
                {HEADLINE_METRICS
                    .iter()
                    .map(|(value, label)| view! { <MetricCounter value=*value label=*label /> })
                    .collect_view()}
            </section>
            <Transition>
                {move || Suspend::new(async move {
                    latest
                        .await
                        .map(|study| {
                            view! {
                                <section class="bg-brightBlack/30 p-6 rounded-lg border border-muted/30 mb-12">
                                    <p class="text-sm text-purple mb-2 font-medium">"Latest case study"</p>
                                    <a href=format!("/work/{}", study.slug) class="text-xl font-bold hover:text-cyan">
                                        {study.title}
                                    </a>
                                    <p class="mt-2">{study.summary}</p>
                                </section>
                            }
                        })
                })}
            </Transition>
            <section class="section-content">
                <h2 class="text-xl font-bold my-8">"Featured projects"</h2>
                <Transition>
                    {move || Suspend::new(async move {
                        view! {
                            <div class="grid gap-4 md:grid-cols-3">
                                {projects
                                    .await
                                    .into_iter()
                                    .map(|p| view! { <ProjectCard project=p /> })
                                    .collect_view()}
                            </div>
                        }
                    })}
                </Transition>
            </section>
            <section class="flex justify-center items-center mt-12 section-content">
                <div class="w-full max-w-2xl text-center bg-brightBlack/30 p-6 rounded-lg border border-muted/30">
                    <h3 class="text-xl font-bold mb-4">"Let's Connect"</h3>
                    <a
                        href=format!("mailto:{}", site.contact_email)
                        class="bg-cyan/20 hover:bg-cyan/30 text-cyan px-6 py-3 rounded-md font-medium transition-all duration-200 border border-cyan/30"
                    >
                        {format!("📧 {}", site.contact_email)}
                    </a>
                </div>
            </section>
        </div>
    }
}
