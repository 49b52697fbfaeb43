use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "veneer", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an element's atlas as a PNG.
    Atlas(AtlasArgs),
}

#[derive(Parser, Debug)]
struct AtlasArgs {
    /// Input element JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,

    /// Write only the region for this interaction state instead of the whole atlas.
    #[arg(long, value_enum)]
    state: Option<StateChoice>,

    /// Print every registered atlas key with its rectangle.
    #[arg(long)]
    dump_regions: bool,

    /// Allocation budget for a single surface, in bytes.
    #[arg(long)]
    max_surface_bytes: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StateChoice {
    Idle,
    Text,
    Hover,
    Pressed,
    Focused,
}

impl From<StateChoice> for veneer::DrawId {
    fn from(value: StateChoice) -> Self {
        match value {
            StateChoice::Idle => veneer::DrawId::Idle,
            StateChoice::Text => veneer::DrawId::Text,
            StateChoice::Hover => veneer::DrawId::Hover,
            StateChoice::Pressed => veneer::DrawId::Pressed,
            StateChoice::Focused => veneer::DrawId::Focused,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Atlas(args) => cmd_atlas(args),
    }
}

fn read_element_json(path: &Path) -> anyhow::Result<veneer::ElementSpec> {
    let f = File::open(path).with_context(|| format!("open element '{}'", path.display()))?;
    let r = BufReader::new(f);
    let spec: veneer::ElementSpec =
        serde_json::from_reader(r).with_context(|| "parse element JSON")?;
    Ok(spec)
}

fn make_backend(
    choice: BackendChoice,
    max_surface_bytes: Option<usize>,
) -> Box<dyn veneer::RenderBackend> {
    let kind = match choice {
        BackendChoice::Cpu => veneer::BackendKind::Cpu,
    };
    let mut opts = veneer::CpuBackendOpts::default();
    if let Some(max) = max_surface_bytes {
        opts.max_surface_bytes = max;
    }
    veneer::create_backend(kind, opts)
}

fn cmd_atlas(args: AtlasArgs) -> anyhow::Result<()> {
    let spec = read_element_json(&args.in_path)?;
    spec.validate()?;

    let root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let mut element = spec.build(root)?;

    let mut backend = make_backend(args.backend, args.max_surface_bytes);
    let mut text = veneer::ParleyRasterizer::new();
    let atlas = element.refresh(backend.as_mut(), &mut text)?;

    if args.dump_regions {
        for (key, rect) in atlas.regions() {
            eprintln!(
                "{key}: x={} y={} w={} h={}",
                rect.x, rect.y, rect.width, rect.height
            );
        }
    }

    let surface = match args.state {
        Some(state) => {
            let draw = veneer::DrawId::from(state);
            atlas
                .crop(draw.key())
                .with_context(|| format!("element has no {state:?} region"))?
        }
        None => atlas.surface().clone(),
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let img = surface.to_image();
    image::save_buffer_with_format(
        &args.out,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
