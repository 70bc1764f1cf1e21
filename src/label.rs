use crate::region::{Region, RegionKind};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Class id written for image boxes in detector label lines.
pub const IMAGE_CLASS_ID: u32 = 0;

/// Nested label document describing a region tree in absolute canvas
/// coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LabelNode {
    Container {
        bbox: [i32; 4],
        depth: u32,
        children: Vec<LabelNode>,
    },
    Image {
        bbox: [i32; 4],
        depth: u32,
        image_path: String,
    },
    Text {
        bbox: [i32; 4],
        depth: u32,
        text: String,
    },
}

impl LabelNode {
    pub fn from_region(region: &Region) -> Self {
        let bbox = region.bounds().bbox();
        let depth = region.depth();
        match region.kind() {
            RegionKind::Container(children) => LabelNode::Container {
                bbox,
                depth,
                children: children.iter().map(LabelNode::from_region).collect(),
            },
            RegionKind::Image { path } => LabelNode::Image {
                bbox,
                depth,
                image_path: path.clone(),
            },
            RegionKind::Text { text } => LabelNode::Text {
                bbox,
                depth,
                text: text.clone(),
            },
        }
    }

    pub fn bbox(&self) -> [i32; 4] {
        match self {
            LabelNode::Container { bbox, .. }
            | LabelNode::Image { bbox, .. }
            | LabelNode::Text { bbox, .. } => *bbox,
        }
    }

    pub fn depth(&self) -> u32 {
        match self {
            LabelNode::Container { depth, .. }
            | LabelNode::Image { depth, .. }
            | LabelNode::Text { depth, .. } => *depth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    Image,
    Text,
}

/// A leaf of the label document with containers flattened away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafBox {
    pub kind: LeafKind,
    pub bbox: [i32; 4],
    pub depth: u32,
}

/// Walks containers depth-first and returns one box per image/text leaf.
pub fn flatten_boxes(label: &LabelNode) -> Vec<LeafBox> {
    let mut out = Vec::new();
    flatten_into(label, &mut out);
    out
}

fn flatten_into(label: &LabelNode, out: &mut Vec<LeafBox>) {
    match label {
        LabelNode::Container { children, .. } => {
            for child in children {
                flatten_into(child, out);
            }
        }
        LabelNode::Image { bbox, depth, .. } => out.push(LeafBox {
            kind: LeafKind::Image,
            bbox: *bbox,
            depth: *depth,
        }),
        LabelNode::Text { bbox, depth, .. } => out.push(LeafBox {
            kind: LeafKind::Text,
            bbox: *bbox,
            depth: *depth,
        }),
    }
}

/// Box in normalized center/size form, every component in `[0, 1]` for
/// boxes inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YoloBox {
    pub x_center: f32,
    pub y_center: f32,
    pub width: f32,
    pub height: f32,
}

impl YoloBox {
    pub fn from_bbox(canvas: (u32, u32), bbox: [i32; 4]) -> Self {
        let (canvas_w, canvas_h) = (canvas.0.max(1) as f32, canvas.1.max(1) as f32);
        let [x0, y0, x1, y1] = bbox.map(|v| v as f32);
        Self {
            x_center: (x0 + x1) / 2.0 / canvas_w,
            y_center: (y0 + y1) / 2.0 / canvas_h,
            width: (x1 - x0) / canvas_w,
            height: (y1 - y0) / canvas_h,
        }
    }
}

/// Detector label lines (`class cx cy w h`) for every image leaf.
pub fn yolo_lines(label: &LabelNode, canvas: (u32, u32)) -> Vec<String> {
    flatten_boxes(label)
        .into_iter()
        .filter(|leaf| leaf.kind == LeafKind::Image)
        .map(|leaf| {
            let b = YoloBox::from_bbox(canvas, leaf.bbox);
            format!(
                "{IMAGE_CLASS_ID} {:.6} {:.6} {:.6} {:.6}",
                b.x_center, b.y_center, b.width, b.height
            )
        })
        .collect()
}

pub fn write_label(path: &Path, label: &LabelNode) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, label)?;
    Ok(())
}

pub fn read_label(path: &Path) -> anyhow::Result<LabelNode> {
    let file = File::open(path)?;
    let label = serde_json::from_reader(BufReader::new(file))?;
    Ok(label)
}

pub fn write_yolo_labels(path: &Path, label: &LabelNode, canvas: (u32, u32)) -> anyhow::Result<()> {
    let mut body = yolo_lines(label, canvas).join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    std::fs::write(path, body)?;
    Ok(())
}
