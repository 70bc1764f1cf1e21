mod captions;
mod grid;
mod overlay;
mod single;

pub use captions::CaptionSource;
pub use grid::GridLayout;
pub use overlay::TextOverlayLayout;
pub use single::SingleImageLayout;

use rand::{Rng, RngCore};

use crate::config::{LayoutConfig, StrategyKind};
use crate::error::{LayoutError, LayoutResult};
use crate::region::Region;

/// Builds a complete region tree for one collage.
///
/// Implementations draw every random decision from `rng`, so a seeded
/// generator reproduces the same tree.
pub trait LayoutGenerator {
    fn generate(
        &self,
        canvas_width: i32,
        canvas_height: i32,
        num_images: usize,
        num_texts: usize,
        image_refs: &[String],
        rng: &mut dyn RngCore,
    ) -> LayoutResult<Region>;
}

/// Runtime-selected layout strategy.
#[derive(Debug, Clone)]
pub enum Strategy {
    Single(SingleImageLayout),
    Grid(GridLayout),
    Overlay(TextOverlayLayout),
}

impl Strategy {
    pub fn from_config(kind: StrategyKind, config: &LayoutConfig) -> Self {
        let captions = CaptionSource::from_config(&config.captions);
        match kind {
            StrategyKind::Single => Strategy::Single(SingleImageLayout::new(captions)),
            StrategyKind::Grid => Strategy::Grid(GridLayout::new(config.grid.clone(), captions)),
            StrategyKind::Overlay => {
                Strategy::Overlay(TextOverlayLayout::new(config.overlay.clone(), captions))
            }
        }
    }
}

impl LayoutGenerator for Strategy {
    fn generate(
        &self,
        canvas_width: i32,
        canvas_height: i32,
        num_images: usize,
        num_texts: usize,
        image_refs: &[String],
        rng: &mut dyn RngCore,
    ) -> LayoutResult<Region> {
        match self {
            Strategy::Single(inner) => inner.generate(
                canvas_width,
                canvas_height,
                num_images,
                num_texts,
                image_refs,
                rng,
            ),
            Strategy::Grid(inner) => inner.generate(
                canvas_width,
                canvas_height,
                num_images,
                num_texts,
                image_refs,
                rng,
            ),
            Strategy::Overlay(inner) => inner.generate(
                canvas_width,
                canvas_height,
                num_images,
                num_texts,
                image_refs,
                rng,
            ),
        }
    }
}

fn check_supply(num_images: usize, image_refs: &[String]) -> LayoutResult<()> {
    if num_images == 0 {
        return Err(LayoutError::InsufficientInput(
            "at least one image is required".to_string(),
        ));
    }
    if image_refs.len() < num_images {
        return Err(LayoutError::InsufficientInput(format!(
            "{} image references supplied for {} images",
            image_refs.len(),
            num_images
        )));
    }
    Ok(())
}

/// Inclusive integer draw; a collapsed range yields its lower bound.
fn randint(rng: &mut dyn RngCore, lo: i32, hi: i32) -> i32 {
    if hi <= lo {
        return lo;
    }
    rng.gen_range(lo..=hi)
}

/// Height of the optional title band across the top of a grid.
fn title_height(rng: &mut dyn RngCore, canvas_height: i32, rows: usize) -> i32 {
    let bands = rows as i32 + 1;
    randint(rng, canvas_height / (3 * bands), canvas_height / bands)
}

/// Integer cell geometry shared by the grid strategies.
#[derive(Debug, Clone, Copy)]
struct CellGrid {
    cell_width: i32,
    cell_height: i32,
    top: i32,
    spacing: i32,
}

impl CellGrid {
    fn new(canvas_width: i32, canvas_height: i32, rows: usize, cols: usize, top: i32, spacing: u32) -> Self {
        Self {
            cell_width: canvas_width / cols as i32,
            cell_height: (canvas_height - top) / rows as i32,
            top,
            spacing: spacing as i32,
        }
    }

    /// `(x, y, width, height)` of a cell with the gutter removed.
    fn cell(&self, row: usize, col: usize) -> (i32, i32, i32, i32) {
        let half = self.spacing / 2;
        (
            col as i32 * self.cell_width + half,
            row as i32 * self.cell_height + half + self.top,
            self.cell_width - self.spacing,
            self.cell_height - self.spacing,
        )
    }
}

fn check_grid_shape(rows: usize, cols: usize) -> LayoutResult<()> {
    if rows == 0 || cols == 0 {
        return Err(LayoutError::InvalidConfig(format!(
            "grid needs at least one row and column, got {rows}x{cols}"
        )));
    }
    Ok(())
}
