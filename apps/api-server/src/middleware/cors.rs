//! CORS policy built from the configured origin allow-list.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::{Method, header};

/// One entry of the origin allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginRule {
    /// Matches the origin exactly.
    Exact(String),
    /// `scheme://*.domain`: any subdomain of `domain` over `scheme`.
    Subdomain { scheme: String, suffix: String },
}

impl OriginRule {
    pub fn parse(entry: &str) -> Self {
        let entry = entry.trim().trim_end_matches('/');
        match entry.split_once("*.") {
            Some((scheme, domain)) if !domain.is_empty() => OriginRule::Subdomain {
                scheme: scheme.to_string(),
                suffix: format!(".{domain}"),
            },
            _ => OriginRule::Exact(entry.to_string()),
        }
    }

    pub fn matches(&self, origin: &str) -> bool {
        match self {
            OriginRule::Exact(allowed) => allowed == origin,
            OriginRule::Subdomain { scheme, suffix } => origin
                .strip_prefix(scheme.as_str())
                .and_then(|rest| rest.strip_suffix(suffix.as_str()))
                .is_some_and(|label| !label.is_empty() && !label.contains('/')),
        }
    }
}

/// Allowed origins, compiled once at startup.
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    rules: Vec<OriginRule>,
}

impl OriginPolicy {
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        Self {
            rules: entries
                .iter()
                .map(|e| OriginRule::parse(e.as_ref()))
                .collect(),
        }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(origin))
    }
}

/// Build the actix CORS middleware for `policy`.
///
/// Requests without an `Origin` header are not subject to CORS and pass.
pub fn cors(policy: Arc<OriginPolicy>) -> Cors {
    Cors::default()
        .allowed_origin_fn(move |origin, _head| {
            origin
                .to_str()
                .map(|origin| policy.is_allowed(origin))
                .unwrap_or(false)
        })
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{TestRequest, call_service, init_service};
    use actix_web::{App, HttpResponse, http::StatusCode, web};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[test]
    fn test_exact_origin() {
        let policy = OriginPolicy::new(&["http://localhost:3000"]);

        assert!(policy.is_allowed("http://localhost:3000"));
        assert!(!policy.is_allowed("http://localhost:3001"));
        assert!(!policy.is_allowed("https://localhost:3000"));
    }

    #[test]
    fn test_subdomain_wildcard() {
        let policy = OriginPolicy::new(&["https://*.vercel.app"]);

        assert!(policy.is_allowed("https://idea-board.vercel.app"));
        assert!(policy.is_allowed("https://preview-42.idea-board.vercel.app"));
        assert!(!policy.is_allowed("http://idea-board.vercel.app"));
        assert!(!policy.is_allowed("https://vercel.app"));
        assert!(!policy.is_allowed("https://evil.com/.vercel.app"));
        assert!(!policy.is_allowed("https://notvercel.app"));
    }

    #[test]
    fn test_parse_rules() {
        assert_eq!(
            OriginRule::parse("https://*.example.com"),
            OriginRule::Subdomain {
                scheme: "https://".to_string(),
                suffix: ".example.com".to_string(),
            }
        );
        assert_eq!(
            OriginRule::parse(" https://app.example.com/ "),
            OriginRule::Exact("https://app.example.com".to_string())
        );
    }

    #[actix_web::test]
    async fn test_allowed_origin_gets_cors_headers() {
        let policy = Arc::new(OriginPolicy::new(&["http://localhost:3000"]));
        let app = init_service(
            App::new()
                .wrap(cors(policy))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .to_request();
        let resp = call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }

    #[actix_web::test]
    async fn test_request_without_origin_passes() {
        let policy = Arc::new(OriginPolicy::new(&["http://localhost:3000"]));
        let app = init_service(
            App::new()
                .wrap(cors(policy))
                .route("/", web::get().to(ok)),
        )
        .await;

        let resp = call_service(&app, TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
