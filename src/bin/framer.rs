use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framer", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a photo into a frame and write a PNG.
    Compose(ComposeArgs),
    /// Print the photo window of a frame (and the cover-fit size for a photo).
    Window(WindowArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Frame artwork (PNG, JPEG, SVG, ...).
    #[arg(long)]
    frame: PathBuf,

    /// Photo to place inside the frame.
    #[arg(long)]
    photo: PathBuf,

    /// JSON array of input events to replay before exporting.
    #[arg(long)]
    edits: Option<PathBuf>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path. Defaults to a timestamped name in the configured output dir.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct WindowArgs {
    /// Frame artwork.
    #[arg(long)]
    frame: PathBuf,

    /// Optional photo to report the cover-fit draw size for.
    #[arg(long)]
    photo: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Window(args) => cmd_window(args),
    }
}

fn read_edits(path: &Path) -> anyhow::Result<Vec<framer::InputEvent>> {
    let f = File::open(path).with_context(|| format!("open edits '{}'", path.display()))?;
    let events: Vec<framer::InputEvent> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse edits JSON")?;
    Ok(events)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<framer::FramerConfig> {
    let cfg = match path {
        Some(p) => framer::FramerConfig::from_json_file(p)?,
        None => framer::FramerConfig::default(),
    };
    Ok(cfg.with_env_overrides())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let frame = framer::FrameAsset::from_path(&args.frame)?;
    let mut session = framer::EditorSession::new(frame, config)?;

    let photo_bytes = std::fs::read(&args.photo)
        .with_context(|| format!("read photo '{}'", args.photo.display()))?;
    session.load_photo_bytes(&photo_bytes)?;

    if let Some(edits) = &args.edits {
        for event in read_edits(edits)? {
            session.handle_input(event);
        }
    }

    let exported = session.download(chrono::Utc::now())?;
    let out = args
        .out
        .unwrap_or_else(|| session.config().output_dir.join(&exported.filename));
    framer::export::write_png(&out, &exported.png)?;

    for notice in session.take_notices() {
        tracing::info!(kind = ?notice.level, "{}", notice.message);
    }
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_window(args: WindowArgs) -> anyhow::Result<()> {
    let frame = framer::FrameAsset::from_path(&args.frame)?;
    let canvas = frame.canvas();
    let window = frame.window_rect();

    println!("frame:  {}x{}", canvas.width, canvas.height);
    println!(
        "window: x={:.1} y={:.1} w={:.1} h={:.1}",
        window.x0,
        window.y0,
        window.width(),
        window.height()
    );

    if let Some(path) = &args.photo {
        let bytes =
            std::fs::read(path).with_context(|| format!("read photo '{}'", path.display()))?;
        let photo = framer::assets::decode::decode_image(&bytes)?;
        let (w, h) = framer::cover_fit(photo.canvas(), window);
        println!("photo:  {}x{}", photo.width, photo.height);
        println!("draw:   {w:.1}x{h:.1}");
    }
    Ok(())
}
