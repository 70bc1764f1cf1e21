use log::debug;
use rand::{Rng, RngCore};

use super::{
    CaptionSource, CellGrid, LayoutGenerator, check_grid_shape, check_supply, title_height,
};
use crate::config::GridConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::region::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnOrder {
    Mixed,
    TextLeft,
    TextRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellContent {
    Image,
    Text,
    Empty,
}

/// Uniform `rows x cols` grid of image and text cells.
#[derive(Debug, Clone)]
pub struct GridLayout {
    config: GridConfig,
    captions: CaptionSource,
}

impl GridLayout {
    pub fn new(config: GridConfig, captions: CaptionSource) -> Self {
        Self { config, captions }
    }

    fn column_order(&self) -> LayoutResult<ColumnOrder> {
        match (self.config.text_only_on_left, self.config.text_only_on_right) {
            (true, true) => Err(LayoutError::InvalidConfig(
                "text_only_on_left and text_only_on_right are mutually exclusive".to_string(),
            )),
            (true, false) => Ok(ColumnOrder::TextLeft),
            (false, true) => Ok(ColumnOrder::TextRight),
            (false, false) => Ok(ColumnOrder::Mixed),
        }
    }
}

fn pick_content(
    order: ColumnOrder,
    col: usize,
    images_left: usize,
    texts_left: usize,
    rng: &mut dyn RngCore,
) -> CellContent {
    match (order, col) {
        (ColumnOrder::TextLeft, 0) | (ColumnOrder::TextRight, 1) => return CellContent::Text,
        (ColumnOrder::TextLeft, _) | (ColumnOrder::TextRight, _) => return CellContent::Image,
        (ColumnOrder::Mixed, _) => {}
    }
    if images_left > 0 && (texts_left == 0 || rng.gen_bool(0.5)) {
        CellContent::Image
    } else if texts_left > 0 {
        CellContent::Text
    } else {
        CellContent::Empty
    }
}

impl LayoutGenerator for GridLayout {
    fn generate(
        &self,
        canvas_width: i32,
        canvas_height: i32,
        num_images: usize,
        num_texts: usize,
        image_refs: &[String],
        rng: &mut dyn RngCore,
    ) -> LayoutResult<Region> {
        check_supply(num_images, image_refs)?;
        let order = self.column_order()?;
        let (rows, cols) = match order {
            ColumnOrder::Mixed => (self.config.rows, self.config.cols),
            _ => (num_images.min(num_texts), 2),
        };
        if order != ColumnOrder::Mixed && rows == 0 {
            return Err(LayoutError::InsufficientInput(
                "text column layouts need at least one text".to_string(),
            ));
        }
        check_grid_shape(rows, cols)?;
        debug!("grid layout: {rows}x{cols}, order {order:?}");

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
        let mut images = image_refs.iter().take(num_images);
        let mut texts_left = num_texts;

        for row in 0..rows {
            for col in 0..cols {
                let (x, y, w, h) = grid.cell(row, col);
                match pick_content(order, col, images.len(), texts_left, rng) {
                    CellContent::Image => {
                        if let Some(image_ref) = images.next() {
                            root.add_child(Region::image(x, y, w, h, image_ref.as_str())?)?;
                        }
                    }
                    CellContent::Text => {
                        root.add_child(Region::text(x, y, w, h, self.captions.caption(rng))?)?;
                        texts_left = texts_left.saturating_sub(1);
                    }
                    CellContent::Empty => {}
                }
            }
        }

        Ok(root)
    }
}
