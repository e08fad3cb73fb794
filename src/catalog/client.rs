use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;

use crate::catalog::model::{
    QuoteCategory, SOUNDS_URL, Sound, WALLPAPERS_URL, Wallpaper, parse_quotes, parse_sounds,
    parse_wallpapers,
};
use crate::foundation::error::{PostreelError, PostreelResult};
use crate::foundation::math::Fnv1a64;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client for the catalog endpoints and remote media.
///
/// There is no retry: a failed request surfaces as [`PostreelError::Fetch`].
pub struct CatalogClient {
    http: reqwest::blocking::Client,
    wallpapers_url: String,
    sounds_url: String,
}

impl CatalogClient {
    pub fn new() -> PostreelResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> PostreelResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("postreel/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PostreelError::fetch(format!("failed to build http client: {e}")))?;
        Ok(Self {
            http,
            wallpapers_url: WALLPAPERS_URL.to_owned(),
            sounds_url: SOUNDS_URL.to_owned(),
        })
    }

    /// GET `url` and return the body, failing on non-2xx statuses.
    #[tracing::instrument(skip(self))]
    pub fn get_bytes(&self, url: &str) -> PostreelResult<Vec<u8>> {
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| PostreelError::fetch(format!("GET {url}: {e}")))?;
        let resp = resp
            .error_for_status()
            .map_err(|e| PostreelError::fetch(format!("GET {url}: {e}")))?;
        let body = resp
            .bytes()
            .map_err(|e| PostreelError::fetch(format!("GET {url}: reading body: {e}")))?;
        tracing::debug!(bytes = body.len(), "fetched");
        Ok(body.to_vec())
    }

    pub fn wallpapers(&self) -> PostreelResult<Vec<Wallpaper>> {
        parse_wallpapers(&self.get_bytes(&self.wallpapers_url)?)
    }

    pub fn sounds(&self) -> PostreelResult<Vec<Sound>> {
        parse_sounds(&self.get_bytes(&self.sounds_url)?)
    }

    pub fn quotes(&self, category: QuoteCategory) -> PostreelResult<Vec<String>> {
        parse_quotes(&self.get_bytes(&category.url())?)
    }

    /// Download `url` into `dir`, reusing an earlier download of the same URL.
    pub fn download_to(&self, url: &str, dir: &Path) -> PostreelResult<PathBuf> {
        let dest = dir.join(cache_file_name(url));
        if dest.is_file() {
            tracing::debug!(path = %dest.display(), "reusing cached download");
            return Ok(dest);
        }

        let body = self.get_bytes(url)?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create download directory '{}'", dir.display()))?;
        write_then_rename(&dest, &body)?;
        tracing::info!(url, path = %dest.display(), "downloaded");
        Ok(dest)
    }
}

/// Write `bytes` next to `dest` and move them into place, so `dest` only ever holds a
/// complete file.
pub(crate) fn write_then_rename(dest: &Path, bytes: &[u8]) -> PostreelResult<()> {
    let mut partial = dest.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    if let Err(e) = std::fs::write(&partial, bytes) {
        let _ = std::fs::remove_file(&partial);
        return Err(anyhow::Error::new(e)
            .context(format!("failed to write download '{}'", partial.display()))
            .into());
    }
    std::fs::rename(&partial, dest).with_context(|| {
        format!(
            "failed to move '{}' to '{}'",
            partial.display(),
            dest.display()
        )
    })?;
    Ok(())
}

/// Stable file name for a URL: a hash of the URL plus the original extension.
pub(crate) fn cache_file_name(url: &str) -> String {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(url.as_bytes());

    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = path
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match ext {
        Some(ext) => format!("{:016x}.{}", h.finish(), ext.to_ascii_lowercase()),
        None => format!("{:016x}", h.finish()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/client.rs"]
mod tests;
