use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use url::Url;

use crate::settings::Settings;

/// The outbound HTTP capability the redirect followers rely on.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues one GET with redirects disabled and returns the `Location`
    /// header, made absolute against `url`. `Ok(None)` means no redirect.
    async fn resolve_location(&self, url: &str) -> Result<Option<String>>;

    /// Fetches a page body, following redirects.
    async fn fetch_page(&self, url: &str, headers: &[(&str, &str)]) -> Result<String>;
}

pub struct HttpFetcher {
    no_redirect: reqwest::Client,
    follow: reqwest::Client,
    max_page_size: usize,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.http_timeout_secs);

        let no_redirect = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(settings.user_agent.as_str())
            .redirect(Policy::none())
            .build()
            .context("Failed to create HTTP client")?;

        let follow = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            no_redirect,
            follow,
            max_page_size: settings.max_page_size,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn resolve_location(&self, url: &str) -> Result<Option<String>> {
        debug!("Requesting {} without following redirects", url);

        let response = self
            .no_redirect
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", url))?;

        debug!("Received response with status: {}", response.status());

        let location = match response.headers().get(LOCATION) {
            Some(value) => value
                .to_str()
                .with_context(|| format!("Unreadable Location header from {}", url))?,
            None => return Ok(None),
        };

        let absolute = Url::parse(url)
            .and_then(|base| base.join(location))
            .with_context(|| format!("Invalid Location header '{}' from {}", location, url))?;

        Ok(Some(absolute.into()))
    }

    async fn fetch_page(&self, url: &str, headers: &[(&str, &str)]) -> Result<String> {
        debug!("Fetching page {}", url);

        let mut request = self.follow.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let mut response = request
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?
        {
            if body.len() + chunk.len() > self.max_page_size {
                bail!("Page {} exceeds {} bytes", url, self.max_page_size);
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
