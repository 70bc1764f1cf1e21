use crate::batch::{BatchRequest, OutputFormat, generate_batch};
use crate::config::{Config, StrategyKind, load_config};
use crate::pool::ImagePool;
use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "collage",
    version,
    about = "Synthesize labeled image/text collages"
)]
pub struct Args {
    /// Image directory, or a text file listing one image path per line
    #[arg(short = 'i', long = "images")]
    pub images: PathBuf,

    /// Output directory (jsons/, images/ and labels/ are created inside)
    #[arg(short = 'o', long = "output", default_value = "out")]
    pub output: PathBuf,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "png")]
    pub output_format: OutputFormat,

    /// Config JSON/JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<i32>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<i32>,

    /// Layout strategy
    #[arg(short = 's', long = "strategy", value_enum)]
    pub strategy: Option<StrategyKind>,

    /// Number of collages to generate
    #[arg(short = 'n', long = "count", default_value_t = 1)]
    pub count: usize,

    #[arg(long = "num-images")]
    pub num_images: Option<usize>,

    #[arg(long = "num-texts")]
    pub num_texts: Option<usize>,

    #[arg(long)]
    pub rows: Option<usize>,

    #[arg(long)]
    pub cols: Option<usize>,

    /// Gap between grid cells, in pixels
    #[arg(long)]
    pub spacing: Option<u32>,

    /// Reserve a caption band above the grid (`--with-title false` turns a
    /// config setting off)
    #[arg(long = "with-title", num_args = 0..=1, default_missing_value = "true")]
    pub with_title: Option<bool>,

    /// Grid: captions in the left column, images in the right
    #[arg(long = "text-left", num_args = 0..=1, default_missing_value = "true")]
    pub text_left: Option<bool>,

    /// Grid: captions in the right column, images in the left
    #[arg(long = "text-right", num_args = 0..=1, default_missing_value = "true")]
    pub text_right: Option<bool>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write detector labels (one line per image box)
    #[arg(long)]
    pub yolo: bool,

    /// File name prefix for generated collages
    #[arg(long, default_value = "collage")]
    pub prefix: String,
}

pub fn run() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let pool = ImagePool::open(&args.images)?;
    if pool.is_empty() {
        return Err(anyhow::anyhow!(
            "No images found in {}",
            args.images.display()
        ));
    }

    let request = BatchRequest {
        output_dir: args.output.clone(),
        format: args.output_format,
        count: args.count,
        prefix: args.prefix.clone(),
        yolo: args.yolo,
    };
    let outputs = generate_batch(&config, &pool, &request)?;
    info!(
        "wrote {} collages to {} ({} images unused)",
        outputs.len(),
        args.output.display(),
        pool.remaining()
    );
    Ok(())
}

/// Command-line flags win over the config file.
fn apply_overrides(config: &mut Config, args: &Args) {
    let layout = &mut config.layout;
    if let Some(width) = args.width {
        layout.canvas_width = width;
    }
    if let Some(height) = args.height {
        layout.canvas_height = height;
    }
    if let Some(strategy) = args.strategy {
        layout.strategy = strategy;
    }
    if let Some(num_images) = args.num_images {
        layout.num_images = num_images;
    }
    if let Some(num_texts) = args.num_texts {
        layout.num_texts = num_texts;
    }
    if args.seed.is_some() {
        layout.seed = args.seed;
    }
    if let Some(rows) = args.rows {
        layout.grid.rows = rows;
        layout.overlay.rows = rows;
    }
    if let Some(cols) = args.cols {
        layout.grid.cols = cols;
        layout.overlay.cols = cols;
    }
    if let Some(spacing) = args.spacing {
        layout.grid.spacing = spacing;
        layout.overlay.spacing = spacing;
    }
    if let Some(with_title) = args.with_title {
        layout.grid.with_title = with_title;
        layout.overlay.with_title = with_title;
    }
    if let Some(text_left) = args.text_left {
        layout.grid.text_only_on_left = text_left;
    }
    if let Some(text_right) = args.text_right {
        layout.grid.text_only_on_right = text_right;
    }
}
