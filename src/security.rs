use http::{
    header::{
        CONTENT_SECURITY_POLICY, REFERRER_POLICY, STRICT_TRANSPORT_SECURITY,
        X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
    },
    HeaderName, HeaderValue,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub enforce_https: bool,
    pub hsts_max_age: u64,
    /// Origins allowed to be framed, e.g. video embeds.
    pub frame_sources: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enforce_https: false,
            hsts_max_age: 31_536_000,
            frame_sources: Vec::new(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    #[error("Invalid value for {name} header: {reason}")]
    InvalidHeader { name: String, reason: String },
}

pub fn content_security_policy(cfg: &SecurityConfig) -> String {
    let frame_src = if cfg.frame_sources.is_empty() {
        "frame-src 'none'".to_string()
    } else {
        format!("frame-src {}", cfg.frame_sources.join(" "))
    };

    let mut directives = vec![
        "default-src 'self'".to_string(),
        // hydration needs the inline bootstrap script and wasm compilation
        "script-src 'self' 'wasm-unsafe-eval' 'unsafe-inline'".to_string(),
        "style-src 'self' 'unsafe-inline'".to_string(),
        "img-src 'self' data: https:".to_string(),
        "font-src 'self' data:".to_string(),
        "connect-src 'self'".to_string(),
        frame_src,
        "frame-ancestors 'none'".to_string(),
        "base-uri 'self'".to_string(),
        "form-action 'self'".to_string(),
    ];
    if cfg.enforce_https {
        directives.push("upgrade-insecure-requests".to_string());
    }
    directives.join("; ")
}

/// Headers attached to every response the server sends.
pub fn security_headers(
    cfg: &SecurityConfig,
) -> Result<Vec<(HeaderName, HeaderValue)>, SecurityError> {
    check_frame_sources(&cfg.frame_sources)?;
    let mut headers = vec![
        (
            CONTENT_SECURITY_POLICY,
            header_value(&CONTENT_SECURITY_POLICY, content_security_policy(cfg))?,
        ),
        (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
        (
            REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ),
        (
            PERMISSIONS_POLICY,
            HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
        ),
    ];
    if cfg.enforce_https {
        let hsts = format!("max-age={}; includeSubDomains", cfg.hsts_max_age);
        headers.push((
            STRICT_TRANSPORT_SECURITY,
            header_value(&STRICT_TRANSPORT_SECURITY, hsts)?,
        ));
    }
    Ok(headers)
}

/// Each frame source must be a single CSP source expression, so it can't end
/// the `frame-src` directive or start another one.
fn check_frame_sources(sources: &[String]) -> Result<(), SecurityError> {
    for source in sources {
        if source.is_empty() || source.contains([';', ',']) || source.contains(char::is_whitespace)
        {
            return Err(SecurityError::InvalidHeader {
                name: CONTENT_SECURITY_POLICY.to_string(),
                reason: format!("frame source {source:?} is not a single source expression"),
            });
        }
    }
    Ok(())
}

fn header_value(name: &HeaderName, value: String) -> Result<HeaderValue, SecurityError> {
    HeaderValue::try_from(value).map_err(|e| SecurityError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(headers: &'a [(HeaderName, HeaderValue)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .and_then(|(_, v)| v.to_str().ok())
    }

    #[test]
    fn test_default_csp() {
        let csp = content_security_policy(&SecurityConfig::default());
        assert!(csp.starts_with("default-src 'self'; "));
        assert!(csp.contains("frame-src 'none'"));
        assert!(csp.contains("frame-ancestors 'none'"));
        assert!(!csp.contains("upgrade-insecure-requests"));
        assert!(!csp.ends_with("; "));
    }

    #[test]
    fn test_csp_with_embeds_and_https() {
        let cfg = SecurityConfig {
            enforce_https: true,
            hsts_max_age: 10,
            frame_sources: vec![
                "https://www.youtube-nocookie.com".to_string(),
                "https://player.vimeo.com".to_string(),
            ],
        };
        let csp = content_security_policy(&cfg);
        assert!(csp.contains("frame-src https://www.youtube-nocookie.com https://player.vimeo.com"));
        assert!(csp.ends_with("upgrade-insecure-requests"));
    }

    #[test]
    fn test_headers_without_https() {
        let headers = security_headers(&SecurityConfig::default()).unwrap();
        assert_eq!(headers.len(), 5);
        assert_eq!(find(&headers, "x-content-type-options"), Some("nosniff"));
        assert_eq!(find(&headers, "x-frame-options"), Some("DENY"));
        assert_eq!(
            find(&headers, "referrer-policy"),
            Some("strict-origin-when-cross-origin")
        );
        assert!(find(&headers, "permissions-policy").is_some());
        assert!(find(&headers, "strict-transport-security").is_none());
    }

    #[test]
    fn test_hsts_when_https_enforced() {
        let cfg = SecurityConfig {
            enforce_https: true,
            hsts_max_age: 600,
            frame_sources: vec![],
        };
        let headers = security_headers(&cfg).unwrap();
        assert_eq!(
            find(&headers, "strict-transport-security"),
            Some("max-age=600; includeSubDomains")
        );
    }

    #[test]
    fn test_invalid_frame_source() {
        let cfg = SecurityConfig {
            frame_sources: vec!["https://ok.example\nX-Injected: 1".to_string()],
            ..SecurityConfig::default()
        };
        let err = security_headers(&cfg).unwrap_err();
        let SecurityError::InvalidHeader { name, .. } = err;
        assert_eq!(name, "content-security-policy");
    }

    #[test]
    fn test_frame_source_cannot_add_directives() {
        for bad in [
            "https://x; script-src *",
            "https://x,https://y",
            "https://x https://y",
            "",
        ] {
            let cfg = SecurityConfig {
                frame_sources: vec!["https://ok.example".to_string(), bad.to_string()],
                ..SecurityConfig::default()
            };
            let err = security_headers(&cfg).unwrap_err();
            let SecurityError::InvalidHeader { name, reason } = err;
            assert_eq!(name, "content-security-policy");
            assert!(reason.contains("frame source"), "{bad:?}: {reason}");
        }
    }

    #[test]
    fn test_valid_frame_sources_accepted() {
        let cfg = SecurityConfig {
            frame_sources: vec![
                "https://www.youtube-nocookie.com".to_string(),
                "https://*.vimeo.com".to_string(),
                "'self'".to_string(),
            ],
            ..SecurityConfig::default()
        };
        let headers = security_headers(&cfg).unwrap();
        let csp = find(&headers, "content-security-policy").unwrap();
        assert!(csp.contains("frame-src https://www.youtube-nocookie.com https://*.vimeo.com 'self';"));
        assert!(!csp.contains("script-src *"));
    }
}
