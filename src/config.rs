use std::path::Path;

use anyhow::Context;

use crate::github::GithubRepoName;

const DEFAULT_IMAGE_URL: &str =
    "https://ecs7.tokopedia.net/blog-tokopedia-com/uploads/2015/08/tokopedia.png";
const DEFAULT_ICON_URL: &str = "https://ecs.tokopedia.com/img/footer/toped.png";

/// Static look of the review request messages, optionally loaded from a TOML file.
///
/// ```toml
/// color = "#2eb886"
/// footer = "PokeTheReviewer"
/// image_url = "https://example.com/banner.png"
/// ```
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BrandingConfig {
    pub color: String,
    pub text: String,
    pub footer: String,
    pub image_url: Option<String>,
    pub thumb_url: Option<String>,
    pub footer_icon: Option<String>,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            color: "#2eb886".to_string(),
            text: "Please kindly review / check my latest app.".to_string(),
            footer: "PokeTheReviewer".to_string(),
            image_url: Some(DEFAULT_IMAGE_URL.to_string()),
            thumb_url: Some(DEFAULT_ICON_URL.to_string()),
            footer_icon: Some(DEFAULT_ICON_URL.to_string()),
        }
    }
}

impl BrandingConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read branding file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Cannot parse branding file {}", path.display()))
    }
}

/// Configuration of the relay, created once at startup.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Repository whose pull requests are looked up.
    pub repository: GithubRepoName,
    /// Domain of the reviewer email addresses, e.g. `tokopedia.com`.
    pub reviewer_domain: String,
    pub branding: BrandingConfig,
}
