use collage_synth::config::{GridConfig, LayoutConfig, OverlayConfig, RenderConfig, StrategyKind};
use collage_synth::label::{LeafKind, flatten_boxes, yolo_lines};
use collage_synth::layout::{CaptionSource, GridLayout, SingleImageLayout, TextOverlayLayout};
use collage_synth::{LayoutError, LayoutGenerator, Region, RegionKind, Strategy, Theme, render_svg};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn refs(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("/pool/{i:03}.jpg")).collect()
}

fn assert_contained(region: &Region) {
    for child in region.children() {
        assert!(
            region.bounds().contains(child.bounds()),
            "{} escapes {}",
            child.bounds(),
            region.bounds()
        );
        assert_contained(child);
    }
}

fn snapshot(region: &Region) -> Vec<(u32, [i32; 4])> {
    let mut out = vec![(region.depth(), region.bounds().bbox())];
    for child in region.children() {
        out.extend(snapshot(child));
    }
    out
}

fn strategies() -> Vec<(StrategyKind, Strategy)> {
    let config = LayoutConfig::default();
    [StrategyKind::Single, StrategyKind::Grid, StrategyKind::Overlay]
        .into_iter()
        .map(|kind| (kind, Strategy::from_config(kind, &config)))
        .collect()
}

#[test]
fn add_child_keeps_children_inside_or_fails() {
    let mut root = Region::container(0, 0, 100, 100).unwrap();
    root.add_child(Region::image(0, 0, 100, 100, "a.png").unwrap())
        .unwrap();
    let err = root
        .add_child(Region::text(60, 60, 50, 10, "too far").unwrap())
        .unwrap_err();
    assert!(matches!(err, LayoutError::Containment { .. }));
    assert_eq!(root.children().len(), 1);
    assert_contained(&root);
}

#[test]
fn every_strategy_builds_contained_trees() {
    for (kind, strategy) in strategies() {
        for seed in 0..25 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let root = strategy
                .generate(800, 600, 4, 2, &refs(4), &mut rng)
                .unwrap_or_else(|err| panic!("{kind:?} seed {seed}: {err}"));
            assert_eq!(root.bounds().bbox(), [0, 0, 800, 600]);
            assert_contained(&root);
        }
    }
}

#[test]
fn leaf_counts_match_requested_supply() {
    let grid = GridLayout::new(
        GridConfig {
            rows: 2,
            cols: 3,
            ..GridConfig::default()
        },
        CaptionSource::default(),
    );
    let single = SingleImageLayout::default();
    for seed in 0..25 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let root = grid.generate(800, 600, 4, 2, &refs(4), &mut rng).unwrap();
        assert_eq!((root.image_count(), root.text_count()), (4, 2));

        let root = single.generate(800, 600, 1, 2, &refs(1), &mut rng).unwrap();
        assert_eq!((root.image_count(), root.text_count()), (1, 2));
    }
}

#[test]
fn depth_resolution_is_idempotent() {
    for (_, strategy) in strategies() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut root = strategy
            .generate(800, 600, 4, 3, &refs(4), &mut rng)
            .unwrap();
        let before = snapshot(&root);
        root.resolve_depth(0);
        root.resolve_depth(0);
        assert_eq!(snapshot(&root), before);
    }
}

#[test]
fn sole_container_child_shares_parent_depth() {
    let mut root = Region::container(0, 0, 100, 100).unwrap();
    let mut inner = Region::container(10, 10, 80, 80).unwrap();
    inner
        .add_child(Region::image(10, 10, 40, 40, "a.png").unwrap())
        .unwrap();
    root.add_child(inner).unwrap();

    let inner = &root.children()[0];
    assert_eq!(inner.depth(), root.depth());
    assert_eq!(inner.children()[0].depth(), root.depth() + 1);
}

#[test]
fn overlapping_caption_pushes_image_two_levels_down() {
    let mut root = Region::container(0, 0, 200, 100).unwrap();
    root.add_child(Region::image(0, 0, 100, 100, "covered.png").unwrap())
        .unwrap();
    root.add_child(Region::image(100, 0, 100, 100, "clear.png").unwrap())
        .unwrap();
    root.add_child(Region::text(20, 20, 40, 20, "caption").unwrap())
        .unwrap();

    let depths: Vec<u32> = root.children().iter().map(Region::depth).collect();
    assert_eq!(depths, vec![2, 1, 1]);
}

#[test]
fn two_by_two_grid_of_images_tiles_the_canvas() {
    let grid = GridLayout::new(GridConfig::default(), CaptionSource::default());
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let root = grid.generate(800, 600, 4, 0, &refs(4), &mut rng).unwrap();

    let boxes: Vec<[i32; 4]> = root.children().iter().map(|c| c.bounds().bbox()).collect();
    assert_eq!(
        boxes,
        vec![
            [0, 0, 400, 300],
            [400, 0, 800, 300],
            [0, 300, 400, 600],
            [400, 300, 800, 600],
        ]
    );
    for (i, a) in root.children().iter().enumerate() {
        assert!(matches!(a.kind(), RegionKind::Image { .. }));
        for b in &root.children()[i + 1..] {
            assert!(!a.bounds().overlaps(b.bounds()));
        }
    }
}

#[test]
fn single_image_without_text_fills_the_canvas() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let root = SingleImageLayout::default()
        .generate(640, 480, 1, 0, &refs(1), &mut rng)
        .unwrap();
    let leaves = root.leaves();
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].bounds().bbox(), [0, 0, 640, 480]);
}

#[test]
fn overlay_rejects_more_cells_than_images() {
    let overlay = TextOverlayLayout::new(OverlayConfig::default(), CaptionSource::default());
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let err = overlay
        .generate(800, 600, 3, 1, &refs(3), &mut rng)
        .unwrap_err();
    assert!(matches!(err, LayoutError::InsufficientInput(_)));
}

#[test]
fn label_leaves_stay_on_the_canvas() {
    for (_, strategy) in strategies() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let root = strategy
            .generate(800, 600, 4, 2, &refs(4), &mut rng)
            .unwrap();
        let label = root.label();
        let leaves = flatten_boxes(&label);
        assert_eq!(leaves.len(), root.leaves().len());
        for leaf in &leaves {
            let [x0, y0, x1, y1] = leaf.bbox;
            assert!(0 <= x0 && x0 < x1 && x1 <= 800, "{leaf:?}");
            assert!(0 <= y0 && y0 < y1 && y1 <= 600, "{leaf:?}");
        }

        let images = leaves
            .iter()
            .filter(|leaf| leaf.kind == LeafKind::Image)
            .count();
        assert_eq!(yolo_lines(&label, (800, 600)).len(), images);
    }
}

#[test]
fn label_json_uses_type_tags() {
    let mut root = Region::container(0, 0, 100, 50).unwrap();
    root.add_child(Region::text(0, 0, 100, 50, "hello").unwrap())
        .unwrap();
    let json = serde_json::to_value(root.label()).unwrap();
    assert_eq!(json["type"], "container");
    assert_eq!(json["bbox"], serde_json::json!([0, 0, 100, 50]));
    assert_eq!(json["children"][0]["type"], "text");
    assert_eq!(json["children"][0]["depth"], 1);
    assert_eq!(json["children"][0]["text"], "hello");
}

#[test]
fn generated_collage_renders_to_svg() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let strategy = Strategy::from_config(StrategyKind::Overlay, &LayoutConfig::default());
    let root = strategy
        .generate(800, 600, 4, 2, &refs(4), &mut rng)
        .unwrap();
    let svg = render_svg(&root, &Theme::impact(), &RenderConfig::default());
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches("<text").count(), root.text_count());
}
