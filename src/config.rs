use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::security::SecurityConfig;

const SITE_YAML: &str = include_str!("../site.yaml");

pub static SITE_CONFIG: LazyLock<SiteConfig> = LazyLock::new(|| {
    SiteConfig::load().unwrap_or_else(|e| {
        log::error!("falling back to default site config: {e}");
        SiteConfig::default()
    })
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Couldn't parse site config: {0}")]
    Parse(String),
    #[error("Invalid site config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub author: String,
    pub base_url: String,
    pub contact_email: String,
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default)]
    pub security: SecurityConfig,
}

fn default_theme_color() -> String {
    "#0f172a".to_string()
}

fn default_background_color() -> String {
    "#020617".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Portfolio".to_string(),
            short_name: "Portfolio".to_string(),
            description: String::new(),
            author: "Site Owner".to_string(),
            base_url: "http://localhost:3000".to_string(),
            contact_email: "contact@localhost".to_string(),
            theme_color: default_theme_color(),
            background_color: default_background_color(),
            security: SecurityConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn global() -> &'static SiteConfig {
        &SITE_CONFIG
    }

    /// The embedded `site.yaml` with environment overrides applied.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = Self::from_yaml(SITE_YAML)?;
        cfg.apply_overrides(|key| std::env::var(key).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(s: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// `SITE_BASE_URL` replaces the base URL and `SITE_ENFORCE_HTTPS` (`true`/`1`
    /// or `false`/`0`) toggles HTTPS-only headers.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("SITE_BASE_URL") {
            self.base_url = url;
        }
        if let Some(flag) = var("SITE_ENFORCE_HTTPS") {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.security.enforce_https = true,
                "0" | "false" | "no" => self.security.enforce_https = false,
                other => log::warn!("ignoring SITE_ENFORCE_HTTPS={other}"),
            }
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("name must not be empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.contact_email.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "contact_email must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_embedded_config_is_valid() {
        let cfg = SiteConfig::from_yaml(SITE_YAML).expect("embedded site.yaml should parse");
        assert!(cfg.validate().is_ok());
        assert!(!cfg.security.frame_sources.is_empty());
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let cfg = SiteConfig::from_yaml(
            "name: a\nshort_name: a\ndescription: d\nauthor: x\nbase_url: https://a.dev\ncontact_email: a@a.dev\n",
        )
        .unwrap();
        assert_eq!(cfg.theme_color, "#0f172a");
        assert_eq!(cfg.security, SecurityConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let err = SiteConfig::from_yaml("name: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            ("SITE_BASE_URL", "https://staging.example.com/"),
            ("SITE_ENFORCE_HTTPS", "false"),
        ]);
        let mut cfg = SiteConfig::default();
        cfg.security.enforce_https = true;
        cfg.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.base_url, "https://staging.example.com");
        assert!(!cfg.security.enforce_https);
    }

    #[test]
    fn test_unknown_https_flag_is_ignored() {
        let mut cfg = SiteConfig::default();
        cfg.security.enforce_https = true;
        cfg.apply_overrides(|k| (k == "SITE_ENFORCE_HTTPS").then(|| "maybe".to_string()));
        assert!(cfg.security.enforce_https);
    }

    #[test]
    fn test_validate() {
        let mut cfg = SiteConfig::default();
        assert!(cfg.validate().is_ok());

        cfg.base_url = "ftp://example.com".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

        cfg.base_url = "https://example.com".to_string();
        cfg.name = "  ".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

        cfg.name = "Site".to_string();
        cfg.contact_email = String::new();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_url_joins_paths() {
        let cfg = SiteConfig::default();
        assert_eq!(cfg.url("/blog/post"), "http://localhost:3000/blog/post");
        assert_eq!(cfg.url("rss.xml"), "http://localhost:3000/rss.xml");
    }
}
