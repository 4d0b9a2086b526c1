use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stellate", version, about = "Compass-and-straightedge star constructions")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dump a construction script (or its step snapshots) as JSON.
    Script(ScriptArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render one PNG per construction step.
    Stills(StillsArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Construction to script.
    #[arg(long, value_enum, default_value_t = stellate::StarKind::SixPoint)]
    star: stellate::StarKind,

    /// Circle radius in scene units (defaults to the construction's own).
    #[arg(long)]
    radius: Option<f64>,
}

impl SceneArgs {
    fn build(&self) -> anyhow::Result<stellate::ConstructionScript> {
        let mut config = self.star.default_config();
        if let Some(r) = self.radius {
            config.radius = r;
        }
        stellate::build_script(self.star, &config)
            .with_context(|| format!("build {} script", self.star.slug()))
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Render settings JSON; CLI flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Paper texture scaled to the frame height.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Directory of extra fonts for captions and titles.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,
}

impl OutputArgs {
    fn settings(&self) -> anyhow::Result<stellate::RenderSettings> {
        let mut settings = match &self.config {
            Some(path) => stellate::RenderSettings::from_path(path)?,
            None => stellate::RenderSettings::default(),
        };
        if let Some(bg) = &self.background {
            settings.background = Some(bg.clone());
        }
        if let Some(dir) = &self.fonts_dir {
            settings.fonts_dir = Some(dir.clone());
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Parser, Debug)]
struct ScriptArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Dump the state at the end of every step instead of the script.
    #[arg(long)]
    snapshots: bool,

    /// Output JSON path (stdout when absent).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Write the scene SVG instead of a PNG.
    #[arg(long)]
    svg: bool,
}

#[derive(Parser, Debug)]
struct StillsArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Fail instead of replacing an existing file.
    #[arg(long)]
    no_overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Script(args) => cmd_script(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Stills(args) => cmd_stills(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_script(args: ScriptArgs) -> anyhow::Result<()> {
    let script = args.scene.build()?;
    let json = if args.snapshots {
        serde_json::to_string_pretty(&script.snapshots()?)
    } else {
        serde_json::to_string_pretty(&script)
    }
    .context("serialize script JSON")?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let script = args.scene.build()?;
    let settings = args.output.settings()?;
    let renderer = stellate::FrameRenderer::new(&script, &settings)?;

    let total = renderer.timeline().duration_frames();
    if args.frame >= total {
        anyhow::bail!("frame {} is past the end of the animation ({total} frames)", args.frame);
    }
    let frame = stellate::FrameIndex(args.frame);

    if args.svg {
        let svg = renderer.svg_at(frame)?;
        if let Some(parent) = args.out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&args.out, svg)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    } else {
        stellate::save_png(&renderer.render_frame(frame)?, &args.out)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_stills(args: StillsArgs) -> anyhow::Result<()> {
    let script = args.scene.build()?;
    let settings = args.output.settings()?;
    let written = stellate::render_stills(&script, &settings, &args.out_dir)?;
    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let script = args.scene.build()?;
    let settings = args.output.settings()?;
    let opts = stellate::RenderToMp4Opts {
        overwrite: !args.no_overwrite,
        ..stellate::RenderToMp4Opts::default()
    };
    let stats = stellate::render_to_mp4(&script, &args.out, opts, &settings)?;
    eprintln!(
        "wrote {} ({} frames, {} rendered, {} reused)",
        args.out.display(),
        stats.frames_total,
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}
