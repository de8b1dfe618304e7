use std::path::{Path, PathBuf};

use anyhow::Context as _;
use broken_lines::capture::ensure_parent_dir;
use broken_lines::{
    BrokenLines, CaptureConfig, CaptureFormat, Engine, EngineOpts, FrameIndex, Preset,
    RenderConfig, TextMaskBuilder,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "broken-lines", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Record one full loop as a PNG sequence or MP4 (MP4 requires `ffmpeg` on PATH).
    Record(RecordArgs),
    /// Write the text mask as a grayscale PNG.
    Mask(MaskArgs),
    /// Print a preset's configuration as JSON.
    Preset(PresetArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Configuration JSON (may name a base `preset`).
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Preset to use when no config file is given.
    #[arg(long)]
    preset: Option<Preset>,

    /// Seed for reproducible picks.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RecordArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory (png) or file (mp4). Overrides the config's `capture.out`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output format. Inferred from the `--out` extension when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// MP4 frame rate.
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Parser, Debug)]
struct MaskArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Preset name.
    #[arg(long, default_value = "broken_lines")]
    name: Preset,

    /// Write to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Mp4,
}

impl From<FormatChoice> for CaptureFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Png => CaptureFormat::Png,
            FormatChoice::Mp4 => CaptureFormat::Mp4,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Record(args) => cmd_record(args),
        Command::Mask(args) => cmd_mask(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn load_config(source: &SourceArgs) -> anyhow::Result<RenderConfig> {
    let mut cfg = match &source.config {
        Some(path) => RenderConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => source.preset.unwrap_or(Preset::BrokenLines).config(),
    };
    if source.seed.is_some() {
        cfg.seed = source.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.source)?;
    cfg.recording = false;

    let opts = EngineOpts::from_config(&cfg);
    let mut engine = Engine::new(BrokenLines::new(cfg.clone())?, cfg.canvas, opts)?;
    engine.seek(FrameIndex(args.frame));
    let frame = engine.step()?;
    let img = frame.to_rgba_image()?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    if let Some(stats) = engine.sketch().last_stats() {
        tracing::info!(
            frame = args.frame,
            picked = stats.picked,
            cells = stats.cells,
            "frame rendered"
        );
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.source)?;
    cfg.recording = true;

    if let Some(out) = args.out {
        let format = args
            .format
            .map(CaptureFormat::from)
            .unwrap_or_else(|| infer_format(&out));
        let fps = args
            .fps
            .or(cfg.capture.as_ref().map(|c| c.fps))
            .unwrap_or(60);
        cfg.capture = Some(CaptureConfig { format, out, fps });
    } else if let Some(capture) = cfg.capture.as_mut() {
        if let Some(format) = args.format {
            capture.format = format.into();
        }
        if let Some(fps) = args.fps {
            capture.fps = fps;
        }
    }
    let Some(capture) = cfg.capture.clone() else {
        anyhow::bail!("record needs --out or a `capture` section in the config");
    };
    cfg.validate()?;

    let opts = EngineOpts::from_config(&cfg);
    let duration = cfg.duration;
    let mut engine = Engine::new(BrokenLines::from_config(cfg.clone())?, cfg.canvas, opts)?;
    engine
        .run_until(duration + 1, |s| !s.is_recording())
        .context("record loop")?;
    if engine.sketch().is_recording() {
        anyhow::bail!("recording did not finish within {} frames", duration + 1);
    }

    eprintln!("wrote {}", capture.out.display());
    Ok(())
}

fn infer_format(out: &Path) -> CaptureFormat {
    match out.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("mp4") => CaptureFormat::Mp4,
        _ => CaptureFormat::Png,
    }
}

fn cmd_mask(args: MaskArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.source)?;
    let mask = TextMaskBuilder::from_config(&cfg).build(cfg.canvas)?;

    ensure_parent_dir(&args.out)?;
    mask.to_luma_image()
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} points)", args.out.display(), mask.len());
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&args.name.config()).context("serialize preset")?;
    match args.out {
        Some(out) => {
            ensure_parent_dir(&out)?;
            std::fs::write(&out, json + "\n")
                .with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
