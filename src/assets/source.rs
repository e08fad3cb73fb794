use std::path::{Path, PathBuf};

use crate::catalog::client::CatalogClient;
use crate::foundation::error::{PostreelError, PostreelResult};

/// Where an image or sound comes from: a local file or an `http(s)` URL.
///
/// Serialized as a plain string; anything starting with `http://` or `https://` is a URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaSource {
    Path(PathBuf),
    Url(String),
}

impl MediaSource {
    pub fn parse(s: &str) -> PostreelResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PostreelError::validation("media source must be non-empty"));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_owned()))
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    /// Anchor relative paths at `root`; URLs and absolute paths are unchanged.
    pub fn resolved_against(&self, root: &Path) -> Self {
        match self {
            Self::Path(p) if p.is_relative() => Self::Path(root.join(p)),
            other => other.clone(),
        }
    }

    /// Return a local file for this source, downloading URLs into `cache_dir` first.
    pub fn materialize(
        &self,
        client: Option<&CatalogClient>,
        cache_dir: &Path,
    ) -> PostreelResult<PathBuf> {
        match self {
            Self::Path(p) => {
                if !p.is_file() {
                    return Err(PostreelError::validation(format!(
                        "media file '{}' does not exist",
                        p.display()
                    )));
                }
                Ok(p.clone())
            }
            Self::Url(url) => {
                let client = client.ok_or_else(|| {
                    PostreelError::fetch(format!("no http client available to download {url}"))
                })?;
                client.download_to(url, cache_dir)
            }
        }
    }
}

impl std::fmt::Display for MediaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

impl serde::Serialize for MediaSource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for MediaSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
