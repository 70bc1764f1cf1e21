use log::debug;
use rand::RngCore;
use rand::seq::SliceRandom;

use super::{CaptionSource, LayoutGenerator, check_supply, randint};
use crate::error::LayoutResult;
use crate::region::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BannerPlacement {
    Top,
    Bottom,
    Left,
    Right,
    Inside,
}

const PLACEMENTS: [BannerPlacement; 5] = [
    BannerPlacement::Top,
    BannerPlacement::Bottom,
    BannerPlacement::Left,
    BannerPlacement::Right,
    BannerPlacement::Inside,
];

/// One dominant image, optionally with a caption banner beside it and
/// captions scattered over it.
#[derive(Debug, Clone, Default)]
pub struct SingleImageLayout {
    captions: CaptionSource,
}

impl SingleImageLayout {
    pub fn new(captions: CaptionSource) -> Self {
        Self { captions }
    }

    fn scatter_captions(
        &self,
        image_area: &Region,
        count: usize,
        group: &mut Region,
        rng: &mut dyn RngCore,
    ) -> LayoutResult<()> {
        let area = *image_area.bounds();
        let (ix, iy, iw, ih) = (area.x(), area.y(), area.width(), area.height());
        let band = ih / count as i32;
        for i in 0..count as i32 {
            let th = randint(rng, (band / 10).max(1), band.min(ih / 2));
            let tw = randint(rng, (iw / 4).max(1), iw);
            let tx = randint(rng, ix, ix + iw - tw);
            let ty = randint(rng, iy + i * band, iy + (i + 1) * band - th);
            group.add_child(Region::text(tx, ty, tw, th, self.captions.caption(rng))?)?;
        }
        Ok(())
    }
}

impl LayoutGenerator for SingleImageLayout {
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
        let mut root = Region::container(0, 0, canvas_width, canvas_height)?;
        let image_ref = image_refs[0].as_str();

        if num_texts == 0 {
            root.add_child(Region::image(0, 0, canvas_width, canvas_height, image_ref)?)?;
            return Ok(root);
        }

        let placement = *PLACEMENTS.choose(rng).unwrap_or(&BannerPlacement::Inside);
        debug!("single-image layout: banner placement {placement:?}");

        let (w, h) = (canvas_width, canvas_height);
        // (banner, image area) as (x, y, width, height)
        let (banner, image_area) = match placement {
            BannerPlacement::Top => {
                let th = randint(rng, h / 10, h / 2);
                (Some((0, 0, w, th)), (0, th, w, h - th))
            }
            BannerPlacement::Bottom => {
                let th = randint(rng, h / 10, h / 2);
                (Some((0, h - th, w, th)), (0, 0, w, h - th))
            }
            BannerPlacement::Left => {
                let tw = randint(rng, w / 4, w / 2);
                (Some((0, 0, tw, h)), (tw, 0, w - tw, h))
            }
            BannerPlacement::Right => {
                let tw = randint(rng, w / 4, w / 2);
                (Some((w - tw, 0, tw, h)), (0, 0, w - tw, h))
            }
            BannerPlacement::Inside => (None, (0, 0, w, h)),
        };

        let mut remaining = num_texts;
        if let Some((tx, ty, tw, th)) = banner {
            root.add_child(Region::text(tx, ty, tw, th, self.captions.caption(rng))?)?;
            remaining -= 1;
        }

        let (ix, iy, iw, ih) = image_area;
        let image = Region::image(ix, iy, iw, ih, image_ref)?;
        if remaining == 0 {
            root.add_child(image)?;
            return Ok(root);
        }

        // Scattered captions share a container with the image so the
        // overlap rule pushes the image behind them.
        let mut group = Region::container(ix, iy, iw, ih)?;
        self.scatter_captions(&image, remaining, &mut group, rng)?;
        group.add_child(image)?;
        root.add_child(group)?;
        Ok(root)
    }
}
