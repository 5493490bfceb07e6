use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;
use log::{debug, warn};

use crate::config::ScraperConfig;
use crate::error::FetchError;

/// Status and body of a completed GET.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// A blocking GET. Any status is a successful fetch; only transport failures are errors.
pub trait HttpFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

impl<T: HttpFetcher + ?Sized> HttpFetcher for &T {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        (**self).get(url)
    }
}

/// One reused reqwest session with a browser User-Agent and a cookie jar.
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        let user_agent = HeaderValue::from_str(&config.user_agent).unwrap_or_else(|e| {
            warn!("Invalid user agent {:?} ({}). Falling back to Mozilla/5.0", config.user_agent, e);
            HeaderValue::from_static("Mozilla/5.0")
        });
        headers.insert(USER_AGENT, user_agent);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(FetchError::Client)?;

        Ok(ReqwestFetcher { client })
    }
}

impl HttpFetcher for ReqwestFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source: Box::new(e),
        };

        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(transport)?;
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(FetchResponse { status, body })
    }
}
