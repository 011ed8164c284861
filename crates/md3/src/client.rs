//! Byte fetching for model sources.
//!
//! `http://` and `https://` locators go over HTTP; `file://` locators and
//! bare paths are read from the local filesystem on native targets. Decoding
//! happens in one synchronous pass once the bytes are available.

use md3_decode::{DecodedModel, decode_model};

use crate::cache::{Cache, NoCache};
use crate::error::{Error, Result};

/// Fetches model bytes, optionally through a [`Cache`].
#[derive(Debug)]
pub struct Client<C = NoCache> {
    http: reqwest::Client,
    cache: C,
}

impl Client<NoCache> {
    /// Create a client without caching.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache(NoCache)
    }
}

impl Default for Client<NoCache> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cache> Client<C> {
    /// Create a client that stores fetched bytes in `cache`.
    pub fn with_cache(cache: C) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Fetch the raw bytes behind `url`.
    pub async fn fetch_bytes_from_url(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(bytes) = self.cache.get(url) {
            tracing::debug!("Cache hit for {}", url);
            return Ok(bytes);
        }

        let bytes = if url.starts_with("http://") || url.starts_with("https://") {
            self.fetch_http(url).await?
        } else {
            read_local(url).await?
        };

        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);
        self.cache.insert(url, &bytes);
        Ok(bytes)
    }

    /// Fetch and decode the model behind `url`.
    pub async fn fetch_model(&self, url: &str) -> Result<DecodedModel> {
        let bytes = self.fetch_bytes_from_url(url).await?;
        Ok(decode_model(&bytes)?)
    }

    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(not(target_family = "wasm"))]
async fn read_local(url: &str) -> Result<Vec<u8>> {
    let path = std::path::Path::new(url.strip_prefix("file://").unwrap_or(url));
    tokio::fs::read(path).await.map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// The browser has no filesystem; only HTTP locators can be fetched.
#[cfg(target_family = "wasm")]
#[allow(clippy::unused_async)]
async fn read_local(url: &str) -> Result<Vec<u8>> {
    Err(Error::UnsupportedLocator {
        url: url.to_string(),
    })
}
