mod bounds;
mod depth;

pub use bounds::Bounds;

use std::fmt;

use crate::error::{LayoutError, LayoutResult};
use crate::label::LabelNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionType {
    Container,
    Image,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionKind {
    Container(Vec<Region>),
    Image { path: String },
    Text { text: String },
}

/// A node of the collage layout tree.
///
/// Containers own their children; there are no parent links. The only way
/// to mutate a tree is [`Region::add_child`], which validates containment
/// and re-resolves stacking depth below the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    bounds: Bounds,
    depth: u32,
    kind: RegionKind,
}

impl Region {
    /// Creates a region of the requested type. `payload` is the image
    /// reference for images and the caption for text; containers ignore it.
    pub fn new(
        region_type: RegionType,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        payload: Option<String>,
    ) -> LayoutResult<Self> {
        let bounds = Bounds::new(x, y, width, height)?;
        let payload = payload.unwrap_or_default();
        let kind = match region_type {
            RegionType::Container => RegionKind::Container(Vec::new()),
            RegionType::Image => RegionKind::Image { path: payload },
            RegionType::Text => RegionKind::Text { text: payload },
        };
        Ok(Self {
            bounds,
            depth: 0,
            kind,
        })
    }

    pub fn container(x: i32, y: i32, width: i32, height: i32) -> LayoutResult<Self> {
        Self::new(RegionType::Container, x, y, width, height, None)
    }

    pub fn image(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        path: impl Into<String>,
    ) -> LayoutResult<Self> {
        Self::new(RegionType::Image, x, y, width, height, Some(path.into()))
    }

    pub fn text(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        text: impl Into<String>,
    ) -> LayoutResult<Self> {
        Self::new(RegionType::Text, x, y, width, height, Some(text.into()))
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn kind(&self) -> &RegionKind {
        &self.kind
    }

    pub fn region_type(&self) -> RegionType {
        match self.kind {
            RegionKind::Container(_) => RegionType::Container,
            RegionKind::Image { .. } => RegionType::Image,
            RegionKind::Text { .. } => RegionType::Text,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, RegionKind::Container(_))
    }

    /// Children in insertion order; empty for leaves.
    pub fn children(&self) -> &[Region] {
        match &self.kind {
            RegionKind::Container(children) => children,
            _ => &[],
        }
    }

    /// Appends `child` to this container and re-resolves depth for the
    /// subtree rooted here.
    pub fn add_child(&mut self, child: Region) -> LayoutResult<()> {
        if !self.bounds.contains(&child.bounds) {
            return Err(LayoutError::Containment {
                child: child.heading(),
                container: self.heading(),
            });
        }
        let RegionKind::Container(children) = &mut self.kind else {
            return Err(LayoutError::NotAContainer);
        };
        children.push(child);
        self.resolve_depth(self.depth);
        Ok(())
    }

    pub fn image_count(&self) -> usize {
        match &self.kind {
            RegionKind::Container(children) => children.iter().map(Region::image_count).sum(),
            RegionKind::Image { .. } => 1,
            RegionKind::Text { .. } => 0,
        }
    }

    pub fn text_count(&self) -> usize {
        match &self.kind {
            RegionKind::Container(children) => children.iter().map(Region::text_count).sum(),
            RegionKind::Image { .. } => 0,
            RegionKind::Text { .. } => 1,
        }
    }

    /// Image and text leaves in depth-first order.
    pub fn leaves(&self) -> Vec<&Region> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Region>) {
        match &self.kind {
            RegionKind::Container(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
            _ => out.push(self),
        }
    }

    /// Nested label document for this subtree.
    pub fn label(&self) -> LabelNode {
        LabelNode::from_region(self)
    }

    fn heading(&self) -> String {
        let name = match self.kind {
            RegionKind::Container(_) => "Container",
            RegionKind::Image { .. } => "Image",
            RegionKind::Text { .. } => "Text",
        };
        format!("{name} ({}, depth={})", self.bounds, self.depth)
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        write!(f, "{pad}{}", self.heading())?;
        if let RegionKind::Container(children) = &self.kind {
            write!(f, "\n{pad}[")?;
            for child in children {
                writeln!(f)?;
                child.write_outline(f, indent + 1)?;
            }
            write!(f, "\n{pad}]")?;
        }
        Ok(())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_invalid_geometry() {
        assert!(matches!(
            Region::new(RegionType::Image, 0, 0, 0, 5, None),
            Err(LayoutError::InvalidGeometry { .. })
        ));
        assert!(Region::text(0, 0, 5, -2, "x").is_err());
        assert!(Region::container(0, 0, 5, 5).is_ok());
    }

    #[test]
    fn payload_lands_in_the_variant() {
        let image = Region::new(RegionType::Image, 0, 0, 4, 4, Some("a.png".into())).unwrap();
        assert_eq!(
            image.kind(),
            &RegionKind::Image {
                path: "a.png".to_string()
            }
        );
        let text = Region::new(RegionType::Text, 0, 0, 4, 4, None).unwrap();
        assert_eq!(
            text.kind(),
            &RegionKind::Text {
                text: String::new()
            }
        );
        assert_eq!(text.region_type(), RegionType::Text);
    }

    #[test]
    fn add_child_rejects_escaping_boxes() {
        let mut root = Region::container(0, 0, 100, 100).unwrap();
        let err = root
            .add_child(Region::image(50, 50, 60, 10, "a.png").unwrap())
            .unwrap_err();
        assert!(matches!(err, LayoutError::Containment { .. }));
        assert!(root.children().is_empty());
    }

    #[test]
    fn add_child_to_leaf_fails() {
        let mut image = Region::image(0, 0, 10, 10, "a.png").unwrap();
        let err = image
            .add_child(Region::text(0, 0, 5, 5, "hi").unwrap())
            .unwrap_err();
        assert_eq!(err, LayoutError::NotAContainer);
    }

    #[test]
    fn counts_sum_over_subtree() {
        let mut root = Region::container(0, 0, 100, 100).unwrap();
        let mut group = Region::container(0, 0, 100, 50).unwrap();
        group
            .add_child(Region::image(0, 0, 50, 50, "a.png").unwrap())
            .unwrap();
        group
            .add_child(Region::image(50, 0, 50, 50, "b.png").unwrap())
            .unwrap();
        root.add_child(group).unwrap();
        root.add_child(Region::text(0, 60, 100, 20, "caption").unwrap())
            .unwrap();

        assert_eq!(root.image_count(), 2);
        assert_eq!(root.text_count(), 1);
        assert_eq!(root.leaves().len(), 3);
    }

    #[test]
    fn display_renders_nested_outline() {
        let mut root = Region::container(0, 0, 10, 10).unwrap();
        root.add_child(Region::image(0, 0, 10, 10, "a.png").unwrap())
            .unwrap();
        let outline = root.to_string();
        assert!(outline.starts_with("Container (x=0, y=0, 10x10, depth=0)"));
        assert!(outline.contains("  Image (x=0, y=0, 10x10, depth=1)"));
        assert!(outline.ends_with(']'));
    }
}
