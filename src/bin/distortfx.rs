use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use distortfx::{
    ARC_IDENTIFIER, ArcParams, EffectHost, FrameBuffer, MIRROR_IDENTIFIER, MIRROR_MODES,
    MemoryClip, MemoryHost, MemoryParamSet, MirrorMode, PluginBundle, RenderArguments,
    TILE_IDENTIFIER, VirtualPixelMethod,
};

#[derive(Parser, Debug)]
#[command(name = "distortfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bend an image along an arc.
    Arc(ArcArgs),
    /// Mirror part of an image over the rest.
    Mirror(MirrorArgs),
    /// Repeat a shrunken copy of an image on a grid.
    Tile(TileArgs),
    /// Print plugin descriptors as JSON.
    Describe(DescribeArgs),
}

#[derive(Parser, Debug)]
struct IoArgs {
    /// Input image (any format the `image` crate reads).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Frame time passed to the effect.
    #[arg(long, default_value_t = 0.0)]
    time: f64,
}

#[derive(Parser, Debug)]
struct ArcArgs {
    #[command(flatten)]
    io: IoArgs,

    /// JSON preset with arc parameters; flags below override it.
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Arc span in degrees.
    #[arg(long)]
    angle: Option<f64>,

    /// Arc rotation in degrees.
    #[arg(long)]
    rotate: Option<f64>,

    /// Top radius in pixels.
    #[arg(long)]
    top: Option<f64>,

    /// Bottom radius in pixels.
    #[arg(long)]
    bottom: Option<f64>,

    /// Flip the image around the distortion.
    #[arg(long, default_value_t = false)]
    flip: bool,

    /// Discard source alpha first.
    #[arg(long, default_value_t = false)]
    matte: bool,

    /// Virtual pixel method, e.g. `transparent`, `edge`, `mirror`.
    #[arg(long, value_parser = parse_virtual_pixel)]
    pixel: Option<VirtualPixelMethod>,

    /// Let the engine use every CPU.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Parser, Debug)]
struct MirrorArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Region to keep, e.g. `north`, `south-east`.
    #[arg(long, value_parser = parse_mirror_mode, default_value = "north")]
    mode: MirrorMode,

    /// Discard source alpha first.
    #[arg(long, default_value_t = false)]
    matte: bool,
}

#[derive(Parser, Debug)]
struct TileArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Tile rows.
    #[arg(long, default_value_t = 2)]
    rows: i32,

    /// Tile columns.
    #[arg(long, default_value_t = 2)]
    cols: i32,

    /// Discard source alpha first.
    #[arg(long, default_value_t = false)]
    matte: bool,
}

#[derive(Parser, Debug)]
struct DescribeArgs {
    /// Plugin identifier; all plugins when omitted.
    #[arg(long)]
    plugin: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let bundle = PluginBundle::new();
    match cli.cmd {
        Command::Arc(args) => cmd_arc(&bundle, args),
        Command::Mirror(args) => cmd_mirror(&bundle, args),
        Command::Tile(args) => cmd_tile(&bundle, args),
        Command::Describe(args) => cmd_describe(&bundle, args),
    }
}

fn cmd_arc(bundle: &PluginBundle, args: ArcArgs) -> anyhow::Result<()> {
    let mut p = match &args.preset {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read preset '{}'", path.display()))?;
            ArcParams::from_json(&json)?
        }
        None => ArcParams::default(),
    };
    p.angle = args.angle.unwrap_or(p.angle);
    p.rotate = args.rotate.unwrap_or(p.rotate);
    p.top_radius = args.top.unwrap_or(p.top_radius);
    p.bottom_radius = args.bottom.unwrap_or(p.bottom_radius);
    p.flip |= args.flip;
    p.matte |= args.matte;
    p.virtual_pixel = args.pixel.unwrap_or(p.virtual_pixel);
    p.parallel |= args.parallel;
    p.validate()?;

    let mut params = MemoryParamSet::from_descriptor(&bundle.describe(ARC_IDENTIFIER)?);
    params.set_double("angle", p.angle);
    params.set_double("rotate", p.rotate);
    params.set_double("top", p.top_radius);
    params.set_double("bottom", p.bottom_radius);
    params.set_boolean("flip", p.flip);
    params.set_boolean("matte", p.matte);
    params.set_choice("pixel", p.virtual_pixel.index());
    params.set_boolean("openmp", p.parallel);
    run_effect(bundle, ARC_IDENTIFIER, params, &args.io)
}

fn cmd_mirror(bundle: &PluginBundle, args: MirrorArgs) -> anyhow::Result<()> {
    let mut params = MemoryParamSet::from_descriptor(&bundle.describe(MIRROR_IDENTIFIER)?);
    params.set_choice("mirror", args.mode.index());
    params.set_boolean("matte", args.matte);
    run_effect(bundle, MIRROR_IDENTIFIER, params, &args.io)
}

fn cmd_tile(bundle: &PluginBundle, args: TileArgs) -> anyhow::Result<()> {
    let mut params = MemoryParamSet::from_descriptor(&bundle.describe(TILE_IDENTIFIER)?);
    params.set_int("rows", args.rows);
    params.set_int("cols", args.cols);
    params.set_boolean("matte", args.matte);
    run_effect(bundle, TILE_IDENTIFIER, params, &args.io)
}

fn cmd_describe(bundle: &PluginBundle, args: DescribeArgs) -> anyhow::Result<()> {
    let json = match args.plugin {
        Some(id) => bundle.describe(&id)?.to_json_pretty()?,
        None => serde_json::to_string_pretty(&bundle.describe_all())
            .context("serialize descriptors")?,
    };
    println!("{json}");
    Ok(())
}

fn run_effect(
    bundle: &PluginBundle,
    identifier: &str,
    params: MemoryParamSet,
    io: &IoArgs,
) -> anyhow::Result<()> {
    let input = image::open(&io.in_path)
        .with_context(|| format!("read image '{}'", io.in_path.display()))?
        .to_rgba32f();
    let (width, height) = input.dimensions();
    let source = FrameBuffer::from_rgba_top_down(width, height, input.as_raw())?;
    let output = FrameBuffer::rgba_f32(source.props().bounds);
    let window = source.props().bounds;

    let host = Arc::new(
        MemoryHost::new(params)
            .with_source(MemoryClip::new(source))
            .with_output(MemoryClip::new(output)),
    );
    let effect = bundle.create_instance(identifier, host.clone() as Arc<dyn EffectHost>)?;
    effect.render(&RenderArguments::new(io.time, window))?;

    let frame = host
        .output_frame()
        .context("output frame is unavailable after render")?;
    let out = image::Rgba32FImage::from_raw(width, height, frame.to_rgba_top_down())
        .context("output buffer does not match image size")?;

    if let Some(parent) = io.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::DynamicImage::ImageRgba32F(out)
        .to_rgba8()
        .save_with_format(&io.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", io.out.display()))?;

    eprintln!("wrote {}", io.out.display());
    Ok(())
}

fn parse_virtual_pixel(s: &str) -> Result<VirtualPixelMethod, String> {
    VirtualPixelMethod::from_label(s).ok_or_else(|| format!("unknown virtual pixel method '{s}'"))
}

fn parse_mirror_mode(s: &str) -> Result<MirrorMode, String> {
    let wanted: String = s
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();
    MIRROR_MODES
        .iter()
        .copied()
        .find(|m| m.label().to_ascii_lowercase() == wanted)
        .ok_or_else(|| format!("unknown mirror mode '{s}'"))
}
