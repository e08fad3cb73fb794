use std::str::FromStr;

use crate::foundation::error::{PostreelError, PostreelResult};

/// Background image endpoint.
pub const WALLPAPERS_URL: &str = "https://gamedrivne.github.io/wallpapers-api/data.json";
/// Soundtrack endpoint.
pub const SOUNDS_URL: &str = "https://gamedrivne.github.io/Sounds/sounds.json";
/// Quote endpoints live under this prefix as `<category>.json`.
pub const QUOTES_BASE_URL: &str = "https://gamedrivne.github.io/qts/api";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Wallpaper {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photographer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Sound {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Sound {
    /// Title, else name, else the file URL.
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.file)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteCategory {
    Hikam,
    Love,
    Women,
    Dunya,
}

impl QuoteCategory {
    pub const ALL: [QuoteCategory; 4] = [Self::Hikam, Self::Love, Self::Women, Self::Dunya];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Hikam => "hikam",
            Self::Love => "love",
            Self::Women => "women",
            Self::Dunya => "dunya",
        }
    }

    pub fn url(self) -> String {
        format!("{QUOTES_BASE_URL}/{}.json", self.slug())
    }
}

impl std::fmt::Display for QuoteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for QuoteCategory {
    type Err = PostreelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == needle)
            .ok_or_else(|| PostreelError::validation(format!("unknown quote category \"{s}\"")))
    }
}

// Endpoint payloads. A missing top-level array reads as empty.

#[derive(Debug, Default, serde::Deserialize)]
struct WallpapersDoc {
    #[serde(default)]
    wallpapers: Vec<Wallpaper>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct SoundsDoc {
    #[serde(default)]
    sounds: Vec<Sound>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct QuotesDoc {
    #[serde(default)]
    quotes: Vec<String>,
}

pub fn parse_wallpapers(bytes: &[u8]) -> PostreelResult<Vec<Wallpaper>> {
    let doc: WallpapersDoc = serde_json::from_slice(bytes)
        .map_err(|e| PostreelError::serde(format!("wallpapers payload: {e}")))?;
    Ok(doc.wallpapers)
}

pub fn parse_sounds(bytes: &[u8]) -> PostreelResult<Vec<Sound>> {
    let doc: SoundsDoc = serde_json::from_slice(bytes)
        .map_err(|e| PostreelError::serde(format!("sounds payload: {e}")))?;
    Ok(doc.sounds)
}

pub fn parse_quotes(bytes: &[u8]) -> PostreelResult<Vec<String>> {
    let doc: QuotesDoc = serde_json::from_slice(bytes)
        .map_err(|e| PostreelError::serde(format!("quotes payload: {e}")))?;
    Ok(doc.quotes)
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
