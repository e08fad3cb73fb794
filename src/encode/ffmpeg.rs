use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PostreelError, PostreelResult};
use crate::render::backend::FrameRGBA;
use crate::render::composite::flatten_premul_over_bg;

/// Video bitrate used for every container.
pub const VIDEO_BITRATE_BPS: u32 = 2_500_000;
/// Audio bitrate used for every container.
pub const AUDIO_BITRATE_BPS: u32 = 128_000;

/// Output file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    /// VP9 (or VP8) with Opus.
    #[default]
    Webm,
    /// H.264 with AAC.
    Mp4,
}

impl Container {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
        }
    }

    /// Guess from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "webm" => Some(Self::Webm),
            "mp4" | "m4v" => Some(Self::Mp4),
            _ => None,
        }
    }

    fn audio_encoder(self) -> &'static str {
        match self {
            Self::Webm => "libopus",
            Self::Mp4 => "aac",
        }
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for Container {
    type Err = PostreelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "webm" => Ok(Self::Webm),
            "mp4" => Ok(Self::Mp4),
            other => Err(PostreelError::validation(format!(
                "unknown container '{other}' (expected webm or mp4)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoCodec {
    Vp9,
    Vp8,
    H264,
}

impl VideoCodec {
    /// Name of the ffmpeg encoder.
    pub fn encoder(self) -> &'static str {
        match self {
            Self::Vp9 => "libvpx-vp9",
            Self::Vp8 => "libvpx",
            Self::H264 => "libx264",
        }
    }

    /// Preferred codec for `container`, given which encoders the ffmpeg build has.
    pub fn pick(container: Container, has_encoder: impl Fn(&str) -> bool) -> Self {
        match container {
            Container::Mp4 => Self::H264,
            Container::Webm if has_encoder(Self::Vp9.encoder()) => Self::Vp9,
            Container::Webm => Self::Vp8,
        }
    }
}

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
    pub container: Container,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Background color used to flatten alpha (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
    pub video_bitrate_bps: u32,
    pub audio_bitrate_bps: u32,
}

impl FfmpegSinkOpts {
    /// Options for writing `out_path`; the container follows its extension, WebM otherwise.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        let out_path = out_path.into();
        let container = Container::from_path(&out_path).unwrap_or_default();
        Self {
            out_path,
            container,
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
            video_bitrate_bps: VIDEO_BITRATE_BPS,
            audio_bitrate_bps: AUDIO_BITRATE_BPS,
        }
    }
}

/// Streams raw frames into a system `ffmpeg` process.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }
}

impl FrameSink for FfmpegSink {
    #[tracing::instrument(skip_all, fields(out = %self.opts.out_path.display()))]
    fn begin(&mut self, cfg: SinkConfig) -> PostreelResult<()> {
        validate_sink_config(&cfg)?;
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(PostreelError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(PostreelError::encode(
                "ffmpeg is required for video output, but was not found on PATH",
            ));
        }

        let codec = VideoCodec::pick(self.opts.container, ffmpeg_has_encoder);
        tracing::info!(
            container = %self.opts.container,
            video = codec.encoder(),
            audio = cfg.audio.is_some(),
            "starting ffmpeg"
        );
        let args = ffmpeg_args(&cfg, &self.opts, codec)?;

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PostreelError::encode(format!("failed to spawn ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PostreelError::encode("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| PostreelError::encode("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        self.scratch = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PostreelResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| PostreelError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(PostreelError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(PostreelError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(PostreelError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        // ffmpeg has no notion of premultiplied input.
        flatten_premul_over_bg(&mut self.scratch, &frame.data, self.opts.bg_rgba)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(PostreelError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            PostreelError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> PostreelResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| PostreelError::encode("ffmpeg sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| PostreelError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| PostreelError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| PostreelError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        self.cfg = None;
        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(PostreelError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }
        tracing::info!(out = %self.opts.out_path.display(), "video finalized");
        Ok(())
    }
}

fn validate_sink_config(cfg: &SinkConfig) -> PostreelResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(PostreelError::validation("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(PostreelError::validation(
            "ffmpeg sink width/height must be non-zero",
        ));
    }
    // yuv420p subsamples chroma 2x2.
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(PostreelError::validation(
            "ffmpeg sink width/height must be even",
        ));
    }
    if !cfg.duration_secs.is_finite() || cfg.duration_secs <= 0.0 {
        return Err(PostreelError::validation("duration must be > 0"));
    }
    Ok(())
}

/// Full ffmpeg argument list: raw RGBA on stdin, optional soundtrack, encoder settings.
pub fn ffmpeg_args(
    cfg: &SinkConfig,
    opts: &FfmpegSinkOpts,
    codec: VideoCodec,
) -> PostreelResult<Vec<OsString>> {
    validate_sink_config(cfg)?;
    if (opts.container == Container::Mp4) != (codec == VideoCodec::H264) {
        return Err(PostreelError::validation(format!(
            "{} cannot carry {}",
            opts.container,
            codec.encoder()
        )));
    }

    let mut args: Vec<OsString> = Vec::new();
    let mut push = |items: &[&str]| args.extend(items.iter().map(OsString::from));

    push(&[if opts.overwrite { "-y" } else { "-n" }]);
    push(&["-hide_banner", "-loglevel", "error"]);
    push(&[
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
        "-s",
        &format!("{}x{}", cfg.width, cfg.height),
        "-r",
        &format!("{}/{}", cfg.fps.num, cfg.fps.den),
        "-i",
        "pipe:0",
    ]);

    if let Some(audio) = &cfg.audio {
        args.push("-i".into());
        args.push(audio.path.clone().into_os_string());
    }
    let mut push = |items: &[&str]| args.extend(items.iter().map(OsString::from));

    push(&["-map", "0:v:0"]);
    push(&[
        "-c:v",
        codec.encoder(),
        "-pix_fmt",
        "yuv420p",
        "-b:v",
        &opts.video_bitrate_bps.to_string(),
    ]);
    match codec {
        VideoCodec::Vp9 => push(&["-row-mt", "1", "-deadline", "good", "-cpu-used", "4"]),
        VideoCodec::Vp8 => push(&["-deadline", "good", "-cpu-used", "4"]),
        VideoCodec::H264 => push(&["-preset", "medium"]),
    }

    if cfg.audio.is_some() {
        // Short soundtracks are padded with silence, long ones are cut at the video end.
        push(&[
            "-map",
            "1:a:0",
            "-c:a",
            opts.container.audio_encoder(),
            "-b:a",
            &opts.audio_bitrate_bps.to_string(),
            "-af",
            "apad",
            "-shortest",
        ]);
    } else {
        push(&["-an"]);
    }
    push(&["-t", &format!("{:.3}", cfg.duration_secs)]);
    if opts.container == Container::Mp4 {
        push(&["-movflags", "+faststart"]);
    }

    args.push(opts.out_path.clone().into_os_string());
    Ok(args)
}

/// `post-<unix-millis>-<duration>s.<ext>`
pub fn default_output_name(unix_millis: u128, duration_secs: u32, container: Container) -> String {
    format!(
        "post-{unix_millis}-{duration_secs}s.{}",
        container.extension()
    )
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> PostreelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Whether the `ffmpeg` on `PATH` lists `encoder` in `-encoders`.
pub fn ffmpeg_has_encoder(encoder: &str) -> bool {
    let Ok(out) = Command::new("ffmpeg")
        .args(["-hide_banner", "-encoders"])
        .stderr(Stdio::null())
        .output()
    else {
        return false;
    };
    encoder_listed(&String::from_utf8_lossy(&out.stdout), encoder)
}

fn encoder_listed(listing: &str, encoder: &str) -> bool {
    listing
        .lines()
        .any(|line| line.split_whitespace().nth(1) == Some(encoder))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
