//! Shared HTTP plumbing: authenticated client, base-URL normalization and
//! RFC 5988 `Link`-driven pagination.

use std::time::Duration;

use reqwest::header::LINK;
use reqwest::{Client, Method, RequestBuilder, Response};

use crate::provider::{ProviderError, Result};

/// Per-request timeout applied to every call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How the API token is presented on the wire.
#[derive(Debug, Clone)]
pub enum Auth {
    /// GitLab's `PRIVATE-TOKEN` header.
    PrivateToken(String),
    /// GitHub's `Authorization: token <t>` scheme, plus the preview media
    /// type its milestone endpoints ask for.
    Token(String),
}

impl Auth {
    fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            Self::PrivateToken(token) => req.header("PRIVATE-TOKEN", token),
            Self::Token(token) => req
                .header("Authorization", format!("token {token}"))
                .header("Accept", "application/vnd.github.inertia-preview+json"),
        }
    }
}

/// A thin authenticated wrapper over [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    auth: Auth,
}

impl RestClient {
    pub fn new(auth: Auth) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, auth })
    }

    /// Start an authenticated request; callers add bodies and send it.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.auth.apply(self.http.request(method, url))
    }

    /// Send an authenticated GET and return the raw response. Status handling
    /// is up to the caller.
    pub async fn get(&self, url: &str) -> Result<Response> {
        Ok(self.request(Method::GET, url).send().await?)
    }

    /// GET `url` and follow `Link: rel="next"` headers until exhausted,
    /// returning one body per page in fetch order.
    pub async fn paginate(&self, url: &str) -> Result<Vec<String>> {
        let mut pages = Vec::new();
        let mut next = Some(url.to_string());
        while let Some(url) = next {
            let response = self.get(&url).await?;
            // The Link header must be read before the body consumes the
            // response.
            next = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_next_link);
            let body = response
                .text()
                .await
                .map_err(|err| ProviderError::network(err.to_string()))?;
            pages.push(body);
        }
        Ok(pages)
    }
}

/// Extract the `rel="next"` target from a `Link` header value, if any.
pub fn parse_next_link(header: &str) -> Option<String> {
    for part in header.split(',') {
        let mut url = None;
        let mut rel = None;
        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(value) = segment.strip_prefix("rel=") {
                rel = Some(value.trim_matches('"'));
            }
        }
        if let (Some(url), Some("next")) = (url, rel) {
            return Some(url.to_string());
        }
    }
    None
}

/// Normalize a user-supplied base URL: default the scheme to https and drop
/// any trailing slash.
pub fn normalize_base_url(base_url: &str) -> String {
    let with_scheme = if base_url.contains("://") {
        base_url.to_string()
    } else {
        format!("https://{base_url}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_next_link_single_relation() {
        let header = r#"<https://example.com/items?page=2>; rel="next""#;
        assert_eq!(
            parse_next_link(header).as_deref(),
            Some("https://example.com/items?page=2")
        );
    }

    #[test]
    fn test_parse_next_link_among_multiple_relations() {
        let header = concat!(
            r#"<https://example.com/items?page=1>; rel="first", "#,
            r#"<https://example.com/items?page=3>; rel="next", "#,
            r#"<https://example.com/items?page=9>; rel="last""#,
        );
        assert_eq!(
            parse_next_link(header).as_deref(),
            Some("https://example.com/items?page=3")
        );
    }

    #[test]
    fn test_parse_next_link_absent() {
        let header = r#"<https://example.com/items?page=9>; rel="last""#;
        assert_eq!(parse_next_link(header), None);
    }

    #[test]
    fn test_parse_next_link_unquoted_rel() {
        let header = "<https://example.com/items?page=2>; rel=next";
        assert_eq!(
            parse_next_link(header).as_deref(),
            Some("https://example.com/items?page=2")
        );
    }

    #[test]
    fn test_parse_next_link_garbage() {
        assert_eq!(parse_next_link("not a link header"), None);
        assert_eq!(parse_next_link(""), None);
    }

    #[test]
    fn test_normalize_base_url_adds_scheme() {
        assert_eq!(normalize_base_url("gitlab.com"), "https://gitlab.com");
    }

    #[test]
    fn test_normalize_base_url_keeps_explicit_scheme() {
        assert_eq!(
            normalize_base_url("http://localhost:8080"),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_normalize_base_url_trims_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://gitlab.example.com/"),
            "https://gitlab.example.com"
        );
    }
}
