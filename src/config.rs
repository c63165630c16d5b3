//! Client configuration and asset URL resolution.

use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:5005/api";
const DEFAULT_POLL_SECS: u64 = 30;

/// Placeholder shown for products that were uploaded without images.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=Product+Image";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the marketplace API, including the `/api` prefix.
    pub base_url: String,
    /// How often the background poller refreshes the cart and
    /// notification badges.
    pub badge_poll_interval: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            badge_poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
        }
    }

    /// Reads configuration from the environment, falling back to the local
    /// development server. `UNIMART_API_URL` sets the API base URL and
    /// `UNIMART_POLL_SECS` the badge polling interval in seconds.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url = env::var("UNIMART_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let poll_secs = env::var("UNIMART_POLL_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_POLL_SECS);

        tracing::debug!(%base_url, poll_secs, "Resolved API configuration");

        ApiConfig {
            base_url,
            badge_poll_interval: Duration::from_secs(poll_secs),
        }
    }

    /// Root the image host is served from. Uploaded image paths are
    /// relative to the server root, not the `/api` prefix.
    pub fn asset_base(&self) -> String {
        self.base_url.replacen("/api", "", 1)
    }

    /// Resolves a product image reference to a displayable URL. Absolute
    /// URLs pass through untouched; server-relative paths are joined onto
    /// the asset root; a missing path yields the placeholder.
    #[allow(dead_code)]
    pub fn image_url(&self, path: &str) -> String {
        if path.is_empty() {
            return PLACEHOLDER_IMAGE.to_string();
        }
        if path.starts_with("http") {
            return path.to_string();
        }
        format!("{}{}", self.asset_base(), path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_image_yields_placeholder() {
        let config = ApiConfig::default();
        assert_eq!(config.image_url(""), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn absolute_image_urls_pass_through() {
        let config = ApiConfig::default();
        let url = "https://cdn.example.com/p/1.jpg";
        assert_eq!(config.image_url(url), url);
    }

    #[test]
    fn relative_paths_join_the_asset_root() {
        let config = ApiConfig::new("http://localhost:5005/api");
        assert_eq!(
            config.image_url("/uploads/phone.jpg"),
            "http://localhost:5005/uploads/phone.jpg"
        );
    }

    #[test]
    fn only_the_api_prefix_is_stripped() {
        // A host that itself contains "/api" further along must keep it.
        let config = ApiConfig::new("http://shop.test/api/v1/api");
        assert_eq!(config.asset_base(), "http://shop.test/v1/api");
    }
}
