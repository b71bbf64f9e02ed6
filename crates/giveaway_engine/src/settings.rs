use std::time::Duration;

use giveaway_core::SkipReporting;
use url::Url;

use crate::{TransportError, TransportFailure};

pub const DEFAULT_SITE_URL: &str = "http://www.steamgifts.com/";

/// How to reach the site. Timeouts default to `None`: requests wait for as
/// long as the server takes.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SITE_URL.to_string(),
            connect_timeout: None,
            request_timeout: None,
            redirect_limit: 10,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl SiteSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Site root with a trailing slash, so relative paths join beneath it.
    pub fn site_root(&self) -> Result<Url, TransportError> {
        let mut root = Url::parse(self.base_url.trim())
            .map_err(|err| TransportError::new(TransportFailure::InvalidUrl, err.to_string()))?;
        if root.cannot_be_a_base() {
            return Err(TransportError::new(
                TransportFailure::InvalidUrl,
                format!("{} cannot be a base url", self.base_url),
            ));
        }
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        Ok(root)
    }
}

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Upper bound on title tasks running at once. `None` runs every title at once.
    pub max_concurrent_titles: Option<usize>,
    /// Outcome channel capacity. 1 keeps producers in lockstep with the consumer.
    pub stream_capacity: usize,
    /// Also scan the giveaways listed on the homepage.
    pub include_homepage: bool,
    pub skip_reporting: SkipReporting,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            max_concurrent_titles: None,
            stream_capacity: 1,
            include_homepage: false,
            skip_reporting: SkipReporting::Silent,
        }
    }
}
