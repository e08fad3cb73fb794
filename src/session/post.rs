use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::decode::{PreparedImage, decode_image_file};
use crate::catalog::client::CatalogClient;
use crate::config::post::PostConfig;
use crate::encode::ffmpeg::{Container, FfmpegSink, FfmpegSinkOpts, default_output_name};
use crate::encode::sink::AudioInputConfig;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PostreelError, PostreelResult};
use crate::particles::field::ParticleField;
use crate::render::backend::FrameRGBA;
use crate::render::cpu::{CpuRenderSettings, CpuRenderer};
use crate::session::plan::RecordingPlan;
use crate::session::recorder::{
    Recorder, RecorderOpts, RecordingOutcome, RecordingStatus, render_still,
};

/// A post whose media is on local disk and decoded, ready to render.
pub struct PreparedPost {
    pub config: PostConfig,
    /// Non-blank quotes in display order.
    pub quotes: Vec<String>,
    pub background: PreparedImage,
    /// Local soundtrack file; `None` for still frames.
    pub sound: Option<PathBuf>,
    pub font_bytes: Vec<u8>,
}

/// Resolve quotes, download remote media into `cache_dir`, and decode the background.
///
/// The soundtrack is only required when `with_sound` is set.
#[tracing::instrument(skip(cfg, client))]
pub fn prepare_post(
    cfg: &PostConfig,
    client: Option<&CatalogClient>,
    cache_dir: &Path,
    with_sound: bool,
) -> PostreelResult<PreparedPost> {
    let mut cfg = cfg.clone();
    if cfg.usable_quotes().is_empty()
        && let Some(category) = cfg.category
    {
        let client = client.ok_or_else(|| {
            PostreelError::fetch(format!("no http client available to fetch {category} quotes"))
        })?;
        cfg.quotes = client.quotes(category)?;
        tracing::info!(%category, count = cfg.quotes.len(), "fetched quotes");
    }

    if with_sound {
        cfg.validate()?;
    } else {
        cfg.validate_for_still()?;
    }
    let quotes = cfg.usable_quotes();

    let image_path = cfg.image()?.materialize(client, cache_dir)?;
    let background = decode_image_file(&image_path)?;
    tracing::debug!(
        width = background.width,
        height = background.height,
        "decoded background"
    );

    let sound = if with_sound {
        Some(cfg.sound()?.materialize(client, cache_dir)?)
    } else {
        None
    };

    let font_bytes = std::fs::read(&cfg.style.font)
        .with_context(|| format!("read font '{}'", cfg.style.font.display()))?;

    Ok(PreparedPost {
        config: cfg,
        quotes,
        background,
        sound,
        font_bytes,
    })
}

impl PreparedPost {
    pub fn plan(&self) -> PostreelResult<RecordingPlan> {
        RecordingPlan::new(self.config.fps()?, self.config.style.duration_secs)
    }

    pub fn renderer(&self) -> PostreelResult<CpuRenderer> {
        CpuRenderer::new(
            CpuRenderSettings::from_config(&self.config),
            Some(&self.background),
            self.font_bytes.clone(),
        )
    }

    pub fn particle_field(&self) -> ParticleField {
        ParticleField::new(
            self.config.style.animation,
            self.config.canvas,
            self.config.seed,
        )
    }

    /// One frame of the recording, as it would appear at `at`.
    pub fn render_frame(&self, at: FrameIndex) -> PostreelResult<FrameRGBA> {
        let plan = self.plan()?;
        let mut renderer = self.renderer()?;
        let mut field = self.particle_field();
        render_still(&mut renderer, &mut field, &plan, &self.quotes, at)
    }
}

/// Where and how a recording is written.
#[derive(Clone, Debug, Default)]
pub struct RecordOpts {
    /// Explicit output file. Its extension picks the container.
    pub out_path: Option<PathBuf>,
    /// Directory for the generated `post-<millis>-<secs>s.<ext>` name.
    pub out_dir: PathBuf,
    /// Container for generated names.
    pub container: Container,
    pub recorder: RecorderOpts,
}

impl RecordOpts {
    /// The file a recording of `duration_secs` would be written to, stamped with `unix_millis`.
    pub fn output_path(&self, duration_secs: u32, unix_millis: u128) -> PathBuf {
        match &self.out_path {
            Some(p) => p.clone(),
            None => self
                .out_dir
                .join(default_output_name(unix_millis, duration_secs, self.container)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordingReport {
    pub path: PathBuf,
    pub outcome: RecordingOutcome,
}

/// Record `post` to a video file through the system `ffmpeg`.
#[tracing::instrument(skip_all, fields(animation = %post.config.style.animation))]
pub fn record_post(
    post: &PreparedPost,
    opts: RecordOpts,
    on_status: impl FnMut(&RecordingStatus),
) -> PostreelResult<RecordingReport> {
    let plan = post.plan()?;
    let path = opts.output_path(post.config.style.duration_secs, unix_millis());

    let mut sink_opts = FfmpegSinkOpts::new(&path);
    if opts.out_path.is_none() {
        sink_opts.container = opts.container;
    }
    let mut sink = FfmpegSink::new(sink_opts);

    let mut renderer = post.renderer()?;
    let mut field = post.particle_field();
    let audio = post
        .sound
        .as_ref()
        .map(|p| AudioInputConfig { path: p.clone() });

    tracing::info!(
        out = %path.display(),
        frames = plan.total_frames,
        quotes = post.quotes.len(),
        "recording"
    );
    let outcome = Recorder::new(plan, post.config.canvas, opts.recorder)
        .on_status(on_status)
        .run(&mut renderer, &mut field, &post.quotes, audio, &mut sink)?;

    Ok(RecordingReport { path, outcome })
}

fn unix_millis() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/session/post.rs"]
mod tests;
