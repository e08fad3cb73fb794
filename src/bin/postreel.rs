use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use postreel::config::presets;

#[derive(Parser, Debug)]
#[command(name = "postreel", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame of a post as a PNG.
    Frame(FrameArgs),
    /// Record a post to WebM or MP4 (requires `ffmpeg` on PATH).
    Record(RecordArgs),
    /// List what the online catalog offers.
    Catalog {
        #[command(subcommand)]
        what: CatalogCommand,
    },
    /// Print the built-in font sizes, colors, durations and animations.
    Presets,
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Background wallpapers.
    Images,
    /// Soundtracks.
    Sounds,
    /// Quotes of one category.
    Quotes {
        /// hikam, love, women or dunya.
        category: postreel::QuoteCategory,
    },
}

/// Flags shared by `frame` and `record` that override the post config.
#[derive(Parser, Debug)]
struct PostArgs {
    /// Input post config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory for downloaded media.
    #[arg(long, default_value = ".postreel-cache")]
    cache_dir: PathBuf,

    #[arg(long)]
    animation: Option<postreel::AnimationKind>,

    /// Preset name (e.g. `gold`) or hex color.
    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    font_size: Option<u32>,

    #[arg(long)]
    font: Option<PathBuf>,

    /// Recording length in seconds.
    #[arg(long)]
    duration: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    post: PostArgs,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    at: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RecordArgs {
    #[command(flatten)]
    post: PostArgs,

    /// Output file; the extension picks the container.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for a generated `post-<millis>-<secs>s.<ext>` file.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Container for generated file names (webm or mp4).
    #[arg(long, default_value = "webm")]
    container: postreel::Container,

    /// Stop and finalize after this many wall-clock seconds.
    #[arg(long)]
    watchdog_secs: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Record(args) => cmd_record(args),
        Command::Catalog { what } => cmd_catalog(what),
        Command::Presets => cmd_presets(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_config(args: &PostArgs) -> anyhow::Result<postreel::PostConfig> {
    let mut cfg = postreel::PostConfig::from_path(&args.in_path)?;
    if let Some(kind) = args.animation {
        cfg.style.animation = kind;
    }
    if let Some(color) = args.color.as_deref() {
        cfg.style.color = match presets::color_by_name(color) {
            Some(c) => c,
            None => color
                .parse()
                .with_context(|| format!("unknown color '{color}'"))?,
        };
    }
    if let Some(size) = args.font_size {
        cfg.style.font_size = size;
    }
    if let Some(font) = &args.font {
        cfg.style.font = font.clone();
    }
    if let Some(secs) = args.duration {
        cfg.style.duration_secs = secs;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    Ok(cfg)
}

/// Only build an HTTP client when the config actually points at remote data.
fn client_for(cfg: &postreel::PostConfig) -> anyhow::Result<Option<postreel::CatalogClient>> {
    let remote_media = [cfg.image.as_ref(), cfg.sound.as_ref()]
        .into_iter()
        .flatten()
        .any(postreel::MediaSource::is_remote);
    let remote_quotes = cfg.usable_quotes().is_empty() && cfg.category.is_some();
    if remote_media || remote_quotes {
        Ok(Some(postreel::CatalogClient::new()?))
    } else {
        Ok(None)
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.post)?;
    let client = client_for(&cfg)?;
    let post = postreel::prepare_post(&cfg, client.as_ref(), &args.post.cache_dir, false)?;
    let frame = post.render_frame(postreel::FrameIndex(args.at))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.post)?;
    let client = client_for(&cfg)?;
    let post = postreel::prepare_post(&cfg, client.as_ref(), &args.post.cache_dir, true)?;

    let opts = postreel::RecordOpts {
        out_path: args.out,
        out_dir: args.out_dir,
        container: args.container,
        recorder: postreel::RecorderOpts {
            watchdog: args.watchdog_secs.map(Duration::from_secs),
            ..postreel::RecorderOpts::default()
        },
    };

    let report = postreel::record_post(&post, opts, |status| match status {
        postreel::RecordingStatus::Recording {
            frame,
            total,
            elapsed,
        } => eprintln!(
            "recording {frame}/{total} frames ({:.1}s)",
            elapsed.as_secs_f64()
        ),
        postreel::RecordingStatus::Failed(msg) => eprintln!("recording failed: {msg}"),
        _ => {}
    })?;

    if report.outcome.stop != postreel::StopReason::Completed {
        eprintln!(
            "stopped early ({:?}) after {} frames",
            report.outcome.stop, report.outcome.frames_written
        );
    }
    eprintln!("wrote {}", report.path.display());
    Ok(())
}

fn cmd_catalog(what: CatalogCommand) -> anyhow::Result<()> {
    let client = postreel::CatalogClient::new()?;
    match what {
        CatalogCommand::Images => {
            for w in client.wallpapers()? {
                match (&w.category, &w.photographer) {
                    (Some(c), Some(p)) => println!("{}\t{c}\t{p}", w.url),
                    (Some(c), None) => println!("{}\t{c}", w.url),
                    (None, Some(p)) => println!("{}\t\t{p}", w.url),
                    (None, None) => println!("{}", w.url),
                }
            }
        }
        CatalogCommand::Sounds => {
            for s in client.sounds()? {
                println!("{}\t{}", s.file, s.label());
            }
        }
        CatalogCommand::Quotes { category } => {
            for q in client.quotes(category)? {
                println!("{q}");
            }
        }
    }
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    println!("font sizes:");
    for (name, px) in presets::FONT_SIZES {
        println!("  {name}: {px}");
    }
    println!("colors:");
    for (name, c) in presets::COLORS {
        println!("  {name}: {}", c.to_hex());
    }
    println!("durations:");
    for (name, secs) in presets::DURATIONS {
        println!("  {name}: {secs}s");
    }
    println!("animations:");
    for kind in postreel::AnimationKind::ALL {
        println!("  {kind}");
    }
    println!("fonts:");
    for family in presets::ARABIC_FONTS {
        println!("  {family}");
    }
    Ok(())
}
