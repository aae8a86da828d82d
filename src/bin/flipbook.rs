use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use flipbook::{
    Aspect, Background, ColorBars, Colorfade, DiscFormat, Fade, FontFace, FrameIndex, FrameRange,
    ImageFormat, KeyFunction, Label, Layer, Movement, RenderOpts, RenderThreading, SafeArea,
    ScaleMode, Shape, Size, Spectrum, Text, TextAlign, TvSystem, VideoStandard, Whirl,
};

#[derive(Parser, Debug)]
#[command(name = "flipbook", version, about = "Render the built-in demo menu scene")]
struct Cli {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Disc format the scene is sized for.
    #[arg(long, global = true, default_value = "dvd", value_parser = parse_format)]
    format: DiscFormat,

    /// TV system (ntsc or pal).
    #[arg(long, global = true, default_value = "ntsc", value_parser = parse_tv)]
    tv: TvSystem,

    /// Display aspect ratio, e.g. 4:3 or 16:9.
    #[arg(long, global = true, default_value = "4:3", value_parser = parse_aspect)]
    aspect: Aspect,

    /// Length of the scene in seconds.
    #[arg(long, global = true, default_value_t = 4.0)]
    seconds: f64,

    /// TTF/OTF font for titles and button labels (text is omitted without one).
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    /// Overlay the 90% title-safe area outline.
    #[arg(long, global = true)]
    safe_area: bool,

    /// Draw color bars instead of the menu background.
    #[arg(long, global = true)]
    bars: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as an image.
    Frame(FrameArgs),
    /// Render every frame into a directory of numbered images.
    Render(RenderArgs),
    /// Print a frame's command buffer as JSON.
    Commands(CommandsArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Frame number (1-based).
    #[arg(long, default_value_t = 1)]
    frame: u64,

    /// Output image path (.png or .jpg).
    #[arg(long)]
    out: PathBuf,

    /// Output width; defaults to the canvas width.
    #[arg(long)]
    width: Option<u32>,

    /// Output height; defaults to the canvas height.
    #[arg(long)]
    height: Option<u32>,

    /// Render at the display aspect (square pixels) instead of the encoded size.
    #[arg(long)]
    display: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Directory receiving 00000001.png, 00000002.png, ...
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    image_format: FormatChoice,

    /// First frame to render (1-based, inclusive).
    #[arg(long)]
    first: Option<u64>,

    /// Last frame to render (inclusive).
    #[arg(long)]
    last: Option<u64>,

    /// Render frames on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads (implies --parallel).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel batch.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct CommandsArgs {
    /// Frame number (1-based).
    #[arg(long, default_value_t = 1)]
    frame: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
}

fn parse_format(s: &str) -> Result<DiscFormat, String> {
    s.parse().map_err(|e: flipbook::FlipbookError| e.to_string())
}

fn parse_tv(s: &str) -> Result<TvSystem, String> {
    s.parse().map_err(|e: flipbook::FlipbookError| e.to_string())
}

fn parse_aspect(s: &str) -> Result<Aspect, String> {
    s.parse().map_err(|e: flipbook::FlipbookError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let book = demo_scene(&cli.scene)?;
    match cli.cmd {
        Command::Frame(args) => cmd_frame(&book, args),
        Command::Render(args) => cmd_render(&book, args),
        Command::Commands(args) => cmd_commands(&book, args),
    }
}

fn cmd_frame(book: &flipbook::Flipbook, args: FrameArgs) -> anyhow::Result<()> {
    let frame = FrameIndex(args.frame);
    let drawing = book.get_frame(frame)?;
    let raster = if args.display {
        let height = args.height.unwrap_or(book.canvas().height);
        drawing.render_display(height)?
    } else {
        let canvas = book.canvas();
        drawing.render_with(
            args.width.unwrap_or(canvas.width),
            args.height.unwrap_or(canvas.height),
            ScaleMode::Fit,
            None,
        )?
    };

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let format = match args.out.extension().and_then(|e| e.to_str()) {
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        _ => ImageFormat::Png,
    };
    raster.save(&args.out, format)?;
    eprintln!(
        "wrote frame {} ({}x{}) to {}",
        args.frame,
        raster.width,
        raster.height,
        args.out.display()
    );
    Ok(())
}

fn cmd_render(book: &flipbook::Flipbook, args: RenderArgs) -> anyhow::Result<()> {
    let first = args.first.unwrap_or(1);
    let last = args.last.unwrap_or(book.frame_count());
    let range = FrameRange::inclusive(FrameIndex(first), FrameIndex(last))?;

    let opts = RenderOpts {
        format: match args.image_format {
            FormatChoice::Png => ImageFormat::Png,
            FormatChoice::Jpeg => ImageFormat::Jpeg,
        },
        threading: RenderThreading {
            parallel: args.parallel || args.threads.is_some(),
            chunk_size: args.chunk_size,
            threads: args.threads,
        },
        ..RenderOpts::default()
    };

    let mut sink = flipbook::ImageDirSink::new(&args.out_dir, opts.format);
    let stats = book.render_frames(range, &mut sink, &opts)?;
    eprintln!(
        "wrote {} frames to {}",
        stats.frames_rendered,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_commands(book: &flipbook::Flipbook, args: CommandsArgs) -> anyhow::Result<()> {
    let drawing = book.get_frame(FrameIndex(args.frame))?;
    println!("{}", drawing.to_json()?);
    Ok(())
}

/// A DVD-style menu: background, a title, three buttons fading in, and a spinning marker.
fn demo_scene(args: &SceneArgs) -> anyhow::Result<flipbook::Flipbook> {
    let standard = VideoStandard::new(args.format, args.tv);
    let mut book = flipbook::Flipbook::for_standard(args.seconds, standard, args.aspect)?;
    let Size { width, height } = book.canvas();
    let (w, h) = (f64::from(width), f64::from(height));
    let last = book.frame_count();

    let font = args
        .font
        .as_ref()
        .map(FontFace::open)
        .transpose()
        .context("load --font")?;

    if args.bars {
        book.add(Layer::new(ColorBars).named("bars"), (0.0, 0.0));
    } else {
        book.add(
            Layer::new(Background::color("#101c33")?)
                .named("background")
                .with_effect(KeyFunction::named(
                    "fill_opacity",
                    [(1.0, 0.6), (last as f64, 1.0)],
                    "cosine",
                )?),
            (0.0, 0.0),
        );
    }

    if let Some(font) = &font {
        let title = Text::new("Main Menu", font.clone())
            .with_size(h / 10.0)?
            .with_align(TextAlign::Center);
        book.add(
            Layer::new(title)
                .named("title")
                .with_effect(Colorfade::new(1, last, "white", "gold")?),
            (w / 2.0, h * 0.2),
        );
    }

    let mut buttons = Layer::group()
        .named("buttons")
        .with_effect(Fade::in_out(1, last, last / 4)?);
    for (i, caption) in ["Play", "Chapters", "Extras"].into_iter().enumerate() {
        let y = h * (0.38 + 0.16 * i as f64);
        let button = match &font {
            Some(font) => Layer::new(Label::new(
                Text::new(caption, font.clone())
                    .with_size(h / 16.0)?
                    .with_color("white")?
                    .with_align(TextAlign::Center),
            )?),
            None => Layer::new(
                Shape::new(flipbook::ShapeKind::Rectangle {
                    width: w * 0.3,
                    height: h * 0.1,
                    radius: h * 0.02,
                })
                .with_fill("#2d4f8a")?
                .with_stroke("white", 2.0)?,
            ),
        };
        let offset = if font.is_some() {
            (w / 2.0, y)
        } else {
            (w * 0.35, y - h * 0.06)
        };
        buttons.add_sublayer(button.named(caption), offset);
    }
    book.add(buttons, (0.0, 0.0));

    let marker = Layer::new(Shape::polygon([(-12.0, -12.0), (12.0, 0.0), (-12.0, 12.0)]))
        .named("marker")
        .with_effect(Movement::new(1, last, (w * 0.2, h * 0.4), (w * 0.2, h * 0.72))?)
        .with_effect(Whirl::new(1, last, (0.0, 0.0), 0.0, 360.0)?)
        .with_effect(Spectrum::new(1, last)?);
    book.add(marker, (0.0, 0.0));

    if args.safe_area {
        book.add(Layer::new(SafeArea::new(90.0)?).named("safe area"), (0.0, 0.0));
    }

    tracing::info!(
        frames = book.frame_count(),
        standard = %standard,
        "demo scene built"
    );
    Ok(book)
}
