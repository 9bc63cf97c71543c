//! API flavor detection for a user-supplied base URL.

use crate::http::{normalize_base_url, Auth, RestClient};
use crate::provider::{ProviderError, ProviderKind, Result};

/// Figure out whether `base_url` fronts a GitLab or a GitHub-style API.
///
/// Probes each platform's cheapest authenticated endpoint in a fixed order
/// (GitLab first) and picks the first that answers 200. Transport failures
/// propagate immediately; non-200 answers just move the probe along.
pub async fn detect_provider(
    base_url: &str,
    token: &str,
    namespace: &str,
    project: &str,
) -> Result<ProviderKind> {
    let base = normalize_base_url(base_url);
    let candidates = [
        (
            ProviderKind::GitLab,
            Auth::PrivateToken(token.to_string()),
            format!("{base}/api/v4/version"),
        ),
        (
            ProviderKind::GitHub,
            Auth::Token(token.to_string()),
            format!("{base}/repos/{namespace}/{project}"),
        ),
    ];

    for (kind, auth, url) in candidates {
        let rest = RestClient::new(auth)?;
        let response = rest.get(&url).await?;
        if response.status() == reqwest::StatusCode::OK {
            tracing::debug!(%kind, %url, "API flavor detected");
            return Ok(kind);
        }
    }
    Err(ProviderError::api("could not access GitLab or GitHub APIs"))
}
