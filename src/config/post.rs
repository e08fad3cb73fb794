use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::source::MediaSource;
use crate::catalog::model::QuoteCategory;
use crate::config::presets;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{PostreelError, PostreelResult};
use crate::particles::kind::AnimationKind;

/// How the background image is mapped onto the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundFit {
    /// Stretch to the canvas, ignoring aspect ratio.
    #[default]
    Stretch,
    /// Scale uniformly to cover the canvas, cropping the overflow.
    Cover,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PostStyle {
    /// TTF/OTF file used for the quote text.
    pub font: PathBuf,
    #[serde(default = "default_color")]
    pub color: Rgba8,
    /// Size in preview pixels, see [`presets::FONT_SIZES`].
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default)]
    pub animation: AnimationKind,
    #[serde(default = "default_duration")]
    pub duration_secs: u32,
    #[serde(default)]
    pub fit: BackgroundFit,
}

fn default_color() -> Rgba8 {
    Rgba8::WHITE
}

fn default_font_size() -> u32 {
    40
}

fn default_duration() -> u32 {
    20
}

fn default_fps() -> u32 {
    30
}

fn default_seed() -> u64 {
    1
}

/// Everything needed to render one post.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PostConfig {
    #[serde(default)]
    pub image: Option<MediaSource>,
    #[serde(default)]
    pub sound: Option<MediaSource>,
    #[serde(default)]
    pub quotes: Vec<String>,
    /// Fetch quotes from this category when `quotes` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<QuoteCategory>,
    pub style: PostStyle,
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl PostConfig {
    /// Read a JSON config and anchor its relative paths at the file's directory.
    pub fn from_path(path: &Path) -> PostreelResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg: PostConfig = serde_json::from_slice(&bytes)
            .map_err(|e| PostreelError::serde(format!("{}: {e}", path.display())))?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.resolve_paths(root);
        Ok(cfg)
    }

    pub fn resolve_paths(&mut self, root: &Path) {
        self.image = self.image.take().map(|s| s.resolved_against(root));
        self.sound = self.sound.take().map(|s| s.resolved_against(root));
        if self.style.font.is_relative() {
            self.style.font = root.join(&self.style.font);
        }
    }

    pub fn fps(&self) -> PostreelResult<Fps> {
        Fps::whole(self.fps)
    }

    pub fn image(&self) -> PostreelResult<&MediaSource> {
        self.image
            .as_ref()
            .ok_or_else(|| PostreelError::validation("no background image selected"))
    }

    pub fn sound(&self) -> PostreelResult<&MediaSource> {
        self.sound
            .as_ref()
            .ok_or_else(|| PostreelError::validation("no sound selected"))
    }

    /// Check that every selection exists and style scalars are usable.
    pub fn validate(&self) -> PostreelResult<()> {
        self.image()?;
        self.sound()?;
        if self.quotes.iter().all(|q| q.trim().is_empty()) {
            return Err(PostreelError::validation("no quotes selected"));
        }
        self.validate_style()
    }

    /// Like [`PostConfig::validate`] but without requiring a sound, for still frames.
    pub fn validate_for_still(&self) -> PostreelResult<()> {
        self.image()?;
        if self.quotes.iter().all(|q| q.trim().is_empty()) {
            return Err(PostreelError::validation("no quotes selected"));
        }
        self.validate_style()
    }

    fn validate_style(&self) -> PostreelResult<()> {
        self.canvas.validate()?;
        self.fps()?;
        if self.style.font_size == 0 {
            return Err(PostreelError::validation("font_size must be > 0"));
        }
        if self.style.duration_secs == 0 {
            return Err(PostreelError::validation("duration_secs must be > 0"));
        }
        if !presets::is_preset_duration(self.style.duration_secs) {
            tracing::warn!(
                duration_secs = self.style.duration_secs,
                "duration is not one of the preset lengths"
            );
        }
        Ok(())
    }

    /// Quotes with blank entries removed.
    pub fn usable_quotes(&self) -> Vec<String> {
        self.quotes
            .iter()
            .filter(|q| !q.trim().is_empty())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/post.rs"]
mod tests;
