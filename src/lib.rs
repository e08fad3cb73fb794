//! Postreel renders short portrait "quote posts": a background picture under a dark veil, an
//! animated particle layer, and a rotating quote in a user-supplied (often Arabic) font,
//! recorded together with a soundtrack into a WebM or MP4 file.
//!
//! The usual flow is:
//!
//! - Load a [`PostConfig`] (JSON) and resolve its media with [`prepare_post`]
//! - Preview single frames with [`PreparedPost::render_frame`]
//! - Record the video with [`record_post`], which streams frames into `ffmpeg`
//!
//! Lower-level pieces ([`ParticleField`], [`CpuRenderer`], [`Recorder`], [`FrameSink`]) can be
//! combined directly, e.g. to record into an [`InMemorySink`] in tests.
#![forbid(unsafe_code)]

pub mod assets;
pub mod catalog;
pub mod config;
pub mod encode;
mod foundation;
pub mod particles;
pub mod render;
pub mod session;
pub mod text;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Vec2};
pub use crate::foundation::error::{PostreelError, PostreelResult};

pub use crate::assets::source::MediaSource;
pub use crate::catalog::client::CatalogClient;
pub use crate::catalog::model::{QuoteCategory, Sound, Wallpaper};
pub use crate::config::post::{BackgroundFit, PostConfig, PostStyle};
pub use crate::encode::ffmpeg::{Container, FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::particles::field::{Particle, ParticleField};
pub use crate::particles::kind::AnimationKind;
pub use crate::render::backend::{FrameRGBA, FrameRenderer, FrameScene};
pub use crate::render::cpu::{CpuRenderSettings, CpuRenderer};
pub use crate::session::plan::RecordingPlan;
pub use crate::session::post::{
    PreparedPost, RecordOpts, RecordingReport, prepare_post, record_post,
};
pub use crate::session::recorder::{
    CancelToken, Recorder, RecorderOpts, RecordingOutcome, RecordingStatus, StopReason,
};
