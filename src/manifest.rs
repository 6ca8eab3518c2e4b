use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;

pub const MANIFEST_PATH: &str = "/manifest.webmanifest";
pub const MANIFEST_CONTENT_TYPE: &str = "application/manifest+json";
pub const FAVICON_PATH: &str = "/favicon.ico";
/// Also used as the apple-touch-icon.
pub const SMALL_ICON_PATH: &str = "/icons/icon-192.png";

/// Public path of the square PNG icon of the given size, served from `public/`.
pub fn icon_path(size: u32) -> String {
    format!("/icons/icon-{size}.png")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// Web app manifest that makes the site installable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub scope: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

impl WebManifest {
    pub fn from_config(cfg: &SiteConfig) -> Self {
        let icon = |size: u32, purpose: Option<&str>| ManifestIcon {
            src: icon_path(size),
            sizes: format!("{size}x{size}"),
            mime_type: "image/png".to_string(),
            purpose: purpose.map(str::to_string),
        };
        Self {
            name: cfg.name.clone(),
            short_name: cfg.short_name.clone(),
            description: cfg.description.clone(),
            start_url: "/".to_string(),
            scope: "/".to_string(),
            display: "standalone".to_string(),
            background_color: cfg.background_color.clone(),
            theme_color: cfg.theme_color.clone(),
            icons: vec![icon(192, None), icon(512, Some("any maskable"))],
        }
    }

    pub fn to_json(&self) -> String {
        // a struct of strings always serializes
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_from_config() {
        let cfg = SiteConfig::default();
        let manifest = WebManifest::from_config(&cfg);
        assert_eq!(manifest.name, cfg.name);
        assert_eq!(manifest.start_url, "/");
        assert_eq!(manifest.display, "standalone");
        assert_eq!(manifest.icons.len(), 2);
        assert_eq!(manifest.icons[1].sizes, "512x512");
    }

    #[test]
    fn test_manifest_json_shape() {
        let json = WebManifest::from_config(&SiteConfig::default()).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["icons"][0]["type"], "image/png");
        assert!(value["icons"][0].get("purpose").is_none());
        assert_eq!(value["icons"][1]["purpose"], "any maskable");
        assert_eq!(value["theme_color"], "#0f172a");
    }

    fn public_file(path: &str) -> Vec<u8> {
        let file = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("public")
            .join(path.trim_start_matches('/'));
        std::fs::read(&file).unwrap_or_else(|e| panic!("{} is not served: {e}", file.display()))
    }

    #[test]
    fn test_manifest_icons_exist_with_declared_size() {
        let manifest = WebManifest::from_config(&SiteConfig::default());
        for icon in &manifest.icons {
            let data = public_file(&icon.src);
            assert_eq!(&data[..8], b"\x89PNG\r\n\x1a\n", "{} is not a png", icon.src);
            let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
            let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
            assert_eq!(format!("{width}x{height}"), icon.sizes);
        }
        assert_eq!(icon_path(192), SMALL_ICON_PATH);
    }

    #[test]
    fn test_favicon_exists() {
        let data = public_file(FAVICON_PATH);
        // ICONDIR header: reserved 0, type 1 (icon), at least one image
        assert_eq!(&data[..4], &[0, 0, 1, 0]);
        assert!(u16::from_le_bytes([data[4], data[5]]) >= 1);
    }
}
