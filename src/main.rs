#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::{routing::get, Router};
    use http::header::CONTENT_TYPE;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use portfolio_site::app::*;
    use portfolio_site::config::SiteConfig;
    use portfolio_site::manifest::{WebManifest, MANIFEST_CONTENT_TYPE, MANIFEST_PATH};
    use portfolio_site::security::security_headers;
    use tower_http::set_header::SetResponseHeaderLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let conf = get_configuration(None).expect("leptos config should load");
    let addr = conf.leptos_options.site_addr;
    let leptos_options = conf.leptos_options;
    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);

    let site = SiteConfig::global();
    let manifest = WebManifest::from_config(site).to_json();
    let headers = security_headers(&site.security).expect("security headers should be valid");

    let mut app = Router::new()
        .route(
            MANIFEST_PATH,
            get(move || {
                let body = manifest.clone();
                async move { ([(CONTENT_TYPE, MANIFEST_CONTENT_TYPE)], body) }
            }),
        )
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    for (name, value) in headers {
        app = app.layer(SetResponseHeaderLayer::overriding(name, value));
    }

    tracing::info!(%addr, base_url = %site.base_url, "portfolio-site listening");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("should be able to bind site address");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server failed");
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}
