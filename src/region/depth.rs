use super::{Region, RegionKind};

impl Region {
    /// Assigns `depth` to this region and recomputes stacking for every
    /// descendant.
    ///
    /// Children sit one level below their container, except that a
    /// container whose only child is another container passes its depth
    /// through. An image overlapped by a text sibling is pushed one extra
    /// level back; further overlapping captions do not push it again.
    pub fn resolve_depth(&mut self, depth: u32) {
        self.depth = depth;
        let RegionKind::Container(children) = &mut self.kind else {
            return;
        };

        if let [only] = children.as_mut_slice()
            && only.is_container()
        {
            only.resolve_depth(depth);
            return;
        }

        let child_depths: Vec<u32> = (0..children.len())
            .map(|idx| {
                if covered_by_text(children, idx) {
                    depth + 2
                } else {
                    depth + 1
                }
            })
            .collect();

        for (child, child_depth) in children.iter_mut().zip(child_depths) {
            child.resolve_depth(child_depth);
        }
    }
}

fn covered_by_text(siblings: &[Region], idx: usize) -> bool {
    let target = &siblings[idx];
    if !matches!(target.kind, RegionKind::Image { .. }) {
        return false;
    }
    siblings.iter().any(|other| {
        matches!(other.kind, RegionKind::Text { .. }) && other.bounds.overlaps(&target.bounds)
    })
}
