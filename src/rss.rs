use rss::{
    extension::atom::{AtomExtensionBuilder, Link},
    Channel, ChannelBuilder, GuidBuilder, ItemBuilder,
};

use crate::blog::PostMeta;
use crate::config::SiteConfig;

pub const FEED_PATH: &str = "rss.xml";

pub fn build_channel(posts: Vec<PostMeta>, cfg: &SiteConfig) -> Channel {
    let items = posts
        .into_iter()
        .map(|p| {
            let link = cfg.url(&format!("blog/{}", p.name));
            let guid = GuidBuilder::default().value(&link).permalink(true).build();
            let author = format!("{} ({})", cfg.contact_email, p.author);
            ItemBuilder::default()
                .title(p.title)
                .description(p.description)
                .author(author)
                .categories(
                    p.tags
                        .into_iter()
                        .map(|t| rss::CategoryBuilder::default().name(t).build())
                        .collect::<Vec<_>>(),
                )
                .pub_date(p.date.to_rfc2822())
                .link(link)
                .guid(guid)
                .build()
        })
        .collect::<Vec<_>>();

    let mut atom_link = Link::default();
    atom_link.set_rel("self");
    atom_link.set_href(cfg.url(FEED_PATH));
    atom_link.set_mime_type("application/rss+xml".to_string());

    ChannelBuilder::default()
        .title(format!("{}'s Blog", cfg.name))
        .description(cfg.description.clone())
        .link(cfg.url("blog"))
        .language("en-us".to_string())
        .ttl("60".to_string())
        .atom_ext(AtomExtensionBuilder::default().links(vec![atom_link]).build())
        .items(items)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(name: &str) -> PostMeta {
        PostMeta {
            name: name.to_string(),
            title: "Title".to_string(),
            description: "Desc".to_string(),
            author: "Maya".to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            tags: vec!["rust".to_string()],
            read_time: 3,
        }
    }

    #[test]
    fn test_channel_links_use_base_url() {
        let cfg = SiteConfig::default();
        let channel = build_channel(vec![post("hello")], &cfg);
        assert_eq!(channel.link(), "http://localhost:3000/blog");
        let item = &channel.items()[0];
        assert_eq!(item.link(), Some("http://localhost:3000/blog/hello"));
        assert_eq!(item.author(), Some("contact@localhost (Maya)"));
        assert_eq!(item.categories()[0].name(), "rust");
        assert_eq!(
            channel.atom_ext().unwrap().links()[0].href(),
            "http://localhost:3000/rss.xml"
        );
    }
}
