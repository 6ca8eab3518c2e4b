use portfolio_site::{blog::get_meta, config::SiteConfig, rss::build_channel};
use std::fs::File;

#[tokio::main]
async fn main() {
    let cfg = SiteConfig::global();
    let posts = get_meta("".to_string())
        .await
        .expect("Should be able to get blog posts");
    let channel = build_channel(posts, cfg);

    let file = File::create("public/rss.xml").expect("Should be able to create RSS feed file");
    channel
        .pretty_write_to(file, b' ', 2)
        .expect("Should be able to write RSS feed");
}
