use log::debug;
use rand::{Rng, RngCore};

use super::{
    CaptionSource, CellGrid, LayoutGenerator, check_grid_shape, check_supply, randint,
    title_height,
};
use crate::config::OverlayConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::region::Region;

/// Grid where every cell holds an image and some cells carry a caption
/// drawn over that image.
#[derive(Debug, Clone)]
pub struct TextOverlayLayout {
    config: OverlayConfig,
    captions: CaptionSource,
}

impl TextOverlayLayout {
    pub fn new(config: OverlayConfig, captions: CaptionSource) -> Self {
        Self { config, captions }
    }
}

impl LayoutGenerator for TextOverlayLayout {
    fn generate(
        &self,
        canvas_width: i32,
        canvas_height: i32,
        num_images: usize,
        num_texts: usize,
        image_refs: &[String],
        rng: &mut dyn RngCore,
    ) -> LayoutResult<Region> {
        let (rows, cols) = (self.config.rows, self.config.cols);
        check_grid_shape(rows, cols)?;
        check_supply(num_images, image_refs)?;
        let cells = rows * cols;
        if num_images < cells {
            return Err(LayoutError::InsufficientInput(format!(
                "{num_images} images cannot fill a {rows}x{cols} grid"
            )));
        }

        let mut root = Region::container(0, 0, canvas_width, canvas_height)?;
        let title = if self.config.with_title {
            let th = title_height(rng, canvas_height, rows);
            root.add_child(Region::text(0, 0, canvas_width, th, self.captions.caption(rng))?)?;
            th
        } else {
            0
        };

        let grid = CellGrid::new(
            canvas_width,
            canvas_height,
            rows,
            cols,
            title,
            self.config.spacing,
        );
        let mut images_left = num_images;
        let mut texts_left = num_texts.min(num_images);
        let mut image_refs = image_refs.iter();

        for row in 0..rows {
            for col in 0..cols {
                let (x, y, w, h) = grid.cell(row, col);
                let Some(image_ref) = image_refs.next() else {
                    break;
                };
                let image = Region::image(x, y, w, h, image_ref.as_str())?;

                let weight = (texts_left + images_left) as u32;
                let overlay = texts_left > 0 && rng.gen_ratio(texts_left as u32, weight);
                if overlay {
                    let th = randint(rng, h / 4, h / 2);
                    let tw = randint(rng, w / 3, w);
                    let tx = randint(rng, x, x + w - tw);
                    let ty = randint(rng, y, y + h - th);
                    debug!("overlay layout: caption over cell ({row}, {col})");
                    let text = Region::text(tx, ty, tw, th, self.captions.caption(rng))?;
                    let mut cell = Region::container(x, y, w, h)?;
                    cell.add_child(image)?;
                    cell.add_child(text)?;
                    root.add_child(cell)?;
                    texts_left -= 1;
                } else {
                    root.add_child(image)?;
                }
                images_left -= 1;
            }
        }

        Ok(root)
    }
}
