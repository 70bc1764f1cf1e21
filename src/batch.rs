use crate::config::Config;
use crate::label::{write_label, write_yolo_labels};
use crate::layout::{LayoutGenerator, Strategy};
use crate::pool::ImagePool;
use crate::render::{render_svg, write_output_svg};
use anyhow::{Context, Result};
use log::{debug, info};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Svg,
    Png,
    /// Label documents only, no raster.
    Json,
}

impl OutputFormat {
    fn extension(self) -> Option<&'static str> {
        match self {
            OutputFormat::Svg => Some("svg"),
            OutputFormat::Png => Some("png"),
            OutputFormat::Json => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub count: usize,
    pub prefix: String,
    pub yolo: bool,
}

/// Files written for one collage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollageOutput {
    pub label: PathBuf,
    pub raster: Option<PathBuf>,
    pub yolo: Option<PathBuf>,
}

pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Generates `request.count` collages, drawing image references from
/// `pool`, and writes label JSON, raster and optional detector labels
/// under `request.output_dir`.
pub fn generate_batch(
    config: &Config,
    pool: &ImagePool,
    request: &BatchRequest,
) -> Result<Vec<CollageOutput>> {
    let layout = &config.layout;
    let strategy = Strategy::from_config(layout.strategy, layout);
    let mut rng = seeded_rng(layout.seed);

    let json_dir = request.output_dir.join("jsons");
    let image_dir = request.output_dir.join("images");
    let yolo_dir = request.output_dir.join("labels");
    std::fs::create_dir_all(&json_dir)?;
    if request.format.extension().is_some() {
        std::fs::create_dir_all(&image_dir)?;
    }
    if request.yolo {
        std::fs::create_dir_all(&yolo_dir)?;
    }

    let mut outputs = Vec::with_capacity(request.count);
    for idx in 0..request.count {
        let name = format!("{}_{:04}", request.prefix, idx + 1);
        let image_refs = pool.take(layout.num_images)?;
        let root = strategy
            .generate(
                layout.canvas_width,
                layout.canvas_height,
                layout.num_images,
                layout.num_texts,
                &image_refs,
                &mut rng as &mut dyn RngCore,
            )
            .with_context(|| format!("Failed to lay out {name}"))?;
        debug!("{name}:\n{root}");

        let label = root.label();
        let label_path = json_dir.join(format!("{name}.json"));
        write_label(&label_path, &label)?;

        let raster = match request.format.extension() {
            Some(ext) => {
                let path = image_dir.join(format!("{name}.{ext}"));
                let svg = render_svg(&root, &config.theme, &config.render);
                if request.format == OutputFormat::Png {
                    write_png(&svg, &path, config)?;
                } else {
                    write_output_svg(&svg, Some(&path))?;
                }
                Some(path)
            }
            None => None,
        };

        let yolo = if request.yolo {
            let path = yolo_dir.join(format!("{name}.txt"));
            let canvas = (
                layout.canvas_width.max(0) as u32,
                layout.canvas_height.max(0) as u32,
            );
            write_yolo_labels(&path, &label, canvas)?;
            Some(path)
        } else {
            None
        };

        info!(
            "{name}: {} images, {} texts",
            root.image_count(),
            root.text_count()
        );
        outputs.push(CollageOutput {
            label: label_path,
            raster,
            yolo,
        });
    }
    Ok(outputs)
}

#[cfg(feature = "png")]
fn write_png(svg: &str, path: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, path, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _path: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyKind;
    use crate::label::{LabelNode, read_label};

    fn request(dir: &Path, format: OutputFormat, count: usize) -> BatchRequest {
        BatchRequest {
            output_dir: dir.to_path_buf(),
            format,
            count,
            prefix: "collage".to_string(),
            yolo: true,
        }
    }

    fn pool(n: usize) -> ImagePool {
        ImagePool::from_paths((0..n).map(|i| format!("/missing/{i}.png")).collect())
    }

    #[test]
    fn batch_writes_labels_rasters_and_yolo() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.layout.seed = Some(42);
        config.layout.num_images = 4;

        let outputs =
            generate_batch(&config, &pool(8), &request(dir.path(), OutputFormat::Svg, 2)).unwrap();
        assert_eq!(outputs.len(), 2);
        let first = &outputs[0];
        assert!(first.label.ends_with("jsons/collage_0001.json"));
        let raster = first.raster.as_ref().unwrap();
        assert!(std::fs::read_to_string(raster).unwrap().contains("<svg"));
        let yolo = std::fs::read_to_string(first.yolo.as_ref().unwrap()).unwrap();
        assert_eq!(yolo.lines().count(), 4);

        let label = read_label(&first.label).unwrap();
        assert!(matches!(label, LabelNode::Container { .. }));
    }

    #[test]
    fn json_format_skips_raster() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.layout.strategy = StrategyKind::Single;
        config.layout.num_images = 1;
        config.layout.num_texts = 2;
        config.layout.seed = Some(1);

        let outputs =
            generate_batch(&config, &pool(1), &request(dir.path(), OutputFormat::Json, 1)).unwrap();
        assert!(outputs[0].raster.is_none());
        assert!(!dir.path().join("images").exists());
    }

    #[test]
    fn depleted_pool_stops_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let err = generate_batch(&config, &pool(5), &request(dir.path(), OutputFormat::Json, 2))
            .unwrap_err();
        assert!(err.to_string().contains("depleted"));
    }

    #[test]
    fn same_seed_reproduces_labels() {
        let mut config = Config::default();
        config.layout.strategy = StrategyKind::Overlay;
        config.layout.num_texts = 3;
        config.layout.seed = Some(7);

        let mut labels = Vec::new();
        for _ in 0..2 {
            let dir = tempfile::tempdir().unwrap();
            let outputs =
                generate_batch(&config, &pool(4), &request(dir.path(), OutputFormat::Json, 1))
                    .unwrap();
            labels.push(read_label(&outputs[0].label).unwrap());
        }
        assert_eq!(labels[0], labels[1]);
    }
}
