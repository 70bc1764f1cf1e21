mod text;

pub use text::{FittedText, fit_text, wrap_chars};

use crate::config::RenderConfig;
use crate::region::{Bounds, Region, RegionKind};
use crate::theme::Theme;
use anyhow::Result;
use log::warn;
use std::path::Path;

/// Renders a region tree to SVG.
///
/// Frames and image content are painted in depth-first order, then every
/// caption is painted on top, so text always stays visible over the images
/// it annotates. Images cover their box (aspect preserved, anchored at the
/// top-left corner) and are clipped to it. An image that cannot be read is
/// drawn as an empty box.
pub fn render_svg(root: &Region, theme: &Theme, config: &RenderConfig) -> String {
    let canvas = root.bounds();
    let (x, y, width, height) = (canvas.x(), canvas.y(), canvas.width(), canvas.height());
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{width}\" height=\"{height}\" viewBox=\"{x} {y} {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"{}\"/>",
        config.canvas_fill(theme)
    ));

    let mut painter = Painter {
        svg,
        theme,
        config,
        clip_ids: 0,
        captions: Vec::new(),
    };
    painter.paint(root, true);

    let captions = std::mem::take(&mut painter.captions);
    for (bounds, caption) in captions {
        painter.paint_caption(&bounds, caption);
    }

    let mut svg = painter.svg;
    svg.push_str("</svg>");
    svg
}

struct Painter<'a> {
    svg: String,
    theme: &'a Theme,
    config: &'a RenderConfig,
    clip_ids: usize,
    captions: Vec<(Bounds, &'a str)>,
}

impl<'a> Painter<'a> {
    fn paint(&mut self, region: &'a Region, is_root: bool) {
        let bounds = *region.bounds();
        match region.kind() {
            RegionKind::Container(children) => {
                self.frame(&bounds, is_root);
                for child in children {
                    self.paint(child, false);
                }
            }
            RegionKind::Image { path } => {
                self.paint_image(&bounds, path);
                self.frame(&bounds, is_root);
            }
            RegionKind::Text { text } => {
                self.frame(&bounds, is_root);
                self.captions.push((bounds, text.as_str()));
            }
        }
    }

    fn frame(&mut self, bounds: &Bounds, is_root: bool) {
        if !self.config.draw_frames {
            return;
        }
        let stroke_width = if is_root {
            self.theme.root_frame_width
        } else {
            self.theme.frame_width
        };
        self.svg.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{stroke_width:.2}\"/>",
            bounds.x(),
            bounds.y(),
            bounds.width(),
            bounds.height(),
            self.theme.frame_color,
        ));
    }

    fn paint_image(&mut self, bounds: &Bounds, path: &str) {
        let dims = match image::image_dimensions(path) {
            Ok(dims) => dims,
            Err(err) => {
                warn!("could not read image {path}: {err}");
                self.svg.push_str(&format!(
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                    bounds.x(),
                    bounds.y(),
                    bounds.width(),
                    bounds.height(),
                    self.theme.missing_image_fill,
                ));
                return;
            }
        };

        let (draw_w, draw_h) = cover_size(dims, (bounds.width(), bounds.height()));
        let href = std::fs::canonicalize(path)
            .map(|abs| abs.to_string_lossy().into_owned())
            .unwrap_or_else(|_| path.to_string());
        self.clip_ids += 1;
        let clip_id = format!("clip-{}", self.clip_ids);
        self.svg.push_str(&format!(
            "<clipPath id=\"{clip_id}\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></clipPath>",
            bounds.x(),
            bounds.y(),
            bounds.width(),
            bounds.height(),
        ));
        self.svg.push_str(&format!(
            "<image x=\"{}\" y=\"{}\" width=\"{draw_w:.2}\" height=\"{draw_h:.2}\" preserveAspectRatio=\"none\" clip-path=\"url(#{clip_id})\" xlink:href=\"{}\"/>",
            bounds.x(),
            bounds.y(),
            escape_xml(&href),
        ));
    }

    fn paint_caption(&mut self, bounds: &Bounds, caption: &str) {
        let fitted = fit_text(
            caption,
            bounds.width() as f32,
            bounds.height() as f32,
            self.theme,
            self.config,
        );
        let center_x = bounds.x() as f32 + bounds.width() as f32 / 2.0;
        let center_y = bounds.y() as f32 + bounds.height() as f32 / 2.0;
        let line_step = fitted.font_size * self.config.line_height;
        let start_y = center_y - fitted.height / 2.0 + fitted.font_size * 0.8;

        self.svg.push_str(&format!(
            "<text x=\"{center_x:.2}\" y=\"{start_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{:.1}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\" stroke-linejoin=\"round\" paint-order=\"stroke\">",
            escape_xml(&self.theme.font_family),
            fitted.font_size,
            self.theme.text_color,
            self.theme.text_outline_color,
            self.theme.text_outline_width,
        ));
        for (idx, line) in fitted.lines.iter().enumerate() {
            let dy = if idx == 0 { 0.0 } else { line_step };
            self.svg.push_str(&format!(
                "<tspan x=\"{center_x:.2}\" dy=\"{dy:.2}\">{}</tspan>",
                escape_xml(line)
            ));
        }
        self.svg.push_str("</text>");
    }
}

/// Size of an image scaled to cover a box while keeping its aspect ratio.
pub fn cover_size(image: (u32, u32), target: (i32, i32)) -> (f32, f32) {
    let (img_w, img_h) = (image.0.max(1) as f32, image.1.max(1) as f32);
    let (box_w, box_h) = (target.0 as f32, target.1 as f32);
    if img_w / img_h > box_w / box_h {
        (box_h * img_w / img_h, box_h)
    } else {
        (box_w, box_w * img_h / img_w)
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.resources_dir = std::env::current_dir().ok();
    if let Some(family) = theme
        .font_family
        .split(',')
        .map(|part| part.trim().trim_matches('"'))
        .find(|part| !part.is_empty())
    {
        opt.font_family = family.to_string();
    }
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captioned_tree() -> Region {
        let mut root = Region::container(0, 0, 200, 100).unwrap();
        root.add_child(Region::text(0, 0, 200, 30, "Tom & <Jerry>").unwrap())
            .unwrap();
        root.add_child(Region::image(0, 30, 200, 70, "/nonexistent/photo.png").unwrap())
            .unwrap();
        root
    }

    #[test]
    fn render_svg_basic() {
        let svg = render_svg(&captioned_tree(), &Theme::impact(), &RenderConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("viewBox=\"0 0 200 100\""));
        assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
    }

    #[test]
    fn captions_are_painted_after_images() {
        let mut root = Region::container(0, 0, 200, 100).unwrap();
        root.add_child(Region::text(10, 10, 50, 20, "first").unwrap())
            .unwrap();
        root.add_child(Region::image(0, 0, 200, 100, "/nonexistent/a.png").unwrap())
            .unwrap();
        let svg = render_svg(&root, &Theme::impact(), &RenderConfig::default());
        let text_at = svg.find("<text").unwrap();
        let last_rect = svg.rfind("<rect").unwrap();
        assert!(text_at > last_rect);
    }

    #[test]
    fn unreadable_image_degrades_to_empty_box() {
        let svg = render_svg(&captioned_tree(), &Theme::plain(), &RenderConfig::default());
        assert!(!svg.contains("<image"));
        assert!(svg.contains(&format!("fill=\"{}\"", Theme::plain().missing_image_fill)));
    }

    #[test]
    fn readable_image_is_clipped_to_its_box() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbImage::new(40, 10).save(&path).unwrap();

        let mut root = Region::container(0, 0, 100, 100).unwrap();
        root.add_child(Region::image(0, 0, 100, 100, path.to_string_lossy()).unwrap())
            .unwrap();
        let svg = render_svg(&root, &Theme::impact(), &RenderConfig::default());
        assert!(svg.contains("<clipPath id=\"clip-1\">"));
        assert!(svg.contains("width=\"400.00\" height=\"100.00\""));
    }

    #[test]
    fn frames_can_be_disabled() {
        let config = RenderConfig {
            draw_frames: false,
            ..RenderConfig::default()
        };
        let svg = render_svg(&captioned_tree(), &Theme::impact(), &config);
        assert!(!svg.contains("fill=\"none\" stroke="));
    }

    #[test]
    fn canvas_uses_theme_background_by_default() {
        let theme = Theme {
            background: "#000000".to_string(),
            ..Theme::impact()
        };
        let svg = render_svg(&captioned_tree(), &theme, &RenderConfig::default());
        assert!(svg.contains("height=\"100\" fill=\"#000000\"/>"));

        let config = RenderConfig {
            background: Some("#ABCDEF".to_string()),
            ..RenderConfig::default()
        };
        let svg = render_svg(&captioned_tree(), &theme, &config);
        assert!(svg.contains("height=\"100\" fill=\"#ABCDEF\"/>"));
    }

    #[test]
    fn cover_size_fills_the_box() {
        assert_eq!(cover_size((40, 10), (100, 100)), (400.0, 100.0));
        assert_eq!(cover_size((10, 40), (100, 100)), (100.0, 400.0));
        assert_eq!(cover_size((200, 100), (100, 50)), (100.0, 50.0));
    }

    #[test]
    fn svg_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        write_output_svg("<svg></svg>", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<svg></svg>");
    }
}
