use approx::assert_relative_eq;
use vizprep::core::{
    Canvas, ForceLayoutConfig, LayoutEdge, LayoutPositions, Position, force_layout,
};

fn ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("n{i}")).collect()
}

fn mean_pairwise_distance(positions: &LayoutPositions) -> f64 {
    let points: Vec<_> = positions.values().copied().collect();
    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            total += points[i].distance_to(points[j]);
            pairs += 1;
        }
    }
    total / pairs as f64
}

#[test]
fn empty_input_yields_empty_layout() {
    let layout = force_layout::<String>(&[], &[], &ForceLayoutConfig::default()).expect("layout");
    assert!(layout.is_empty());
}

#[test]
fn single_node_sits_at_canvas_center() {
    let layout = force_layout(&["only"], &[], &ForceLayoutConfig::default()).expect("layout");
    let position = layout["only"];
    assert_relative_eq!(position.x, 400.0);
    assert_relative_eq!(position.y, 300.0);
}

#[test]
fn two_nodes_sit_on_horizontal_thirds() {
    let config = ForceLayoutConfig::new(Canvas::new(900, 600));
    let layout = force_layout(&["a", "b"], &[LayoutEdge::new("a", "b")], &config).expect("layout");
    assert_relative_eq!(layout["a"].x, 300.0);
    assert_relative_eq!(layout["b"].x, 600.0);
    assert_relative_eq!(layout["a"].y, 300.0);
    assert_relative_eq!(layout["b"].y, 300.0);
}

#[test]
fn every_coordinate_stays_inside_the_margin_box() {
    let canvas = Canvas::new(800, 600);
    for count in [3, 10, 40] {
        for iterations in [0, 1, 50] {
            let config = ForceLayoutConfig::new(canvas)
                .with_iterations(iterations)
                .with_seed(count as u64 * 31 + iterations as u64);
            let edges: Vec<LayoutEdge> = (1..count)
                .map(|i| LayoutEdge::new(format!("n{}", i - 1), format!("n{i}")))
                .collect();
            let layout = force_layout(&ids(count), &edges, &config).expect("layout");
            assert_eq!(layout.len(), count);
            for position in layout.values() {
                assert!(
                    canvas.contains_within_margin(*position),
                    "{position:?} escaped the canvas margin"
                );
            }
        }
    }
}

#[test]
fn tiny_canvas_keeps_a_non_empty_margin_box() {
    let canvas = Canvas::new(10, 10);
    assert_relative_eq!(canvas.margin(), 2.5);
    let config = ForceLayoutConfig::new(canvas).with_seed(5);
    let layout = force_layout(&ids(6), &[], &config).expect("layout");
    for position in layout.values() {
        assert!(canvas.contains_within_margin(*position));
    }
}

#[test]
fn dangling_edges_and_self_loops_are_skipped() {
    let config = ForceLayoutConfig::default().with_seed(9);
    let edges = vec![
        LayoutEdge::new("n0", "ghost"),
        LayoutEdge::new("ghost", "n1"),
        LayoutEdge::new("n2", "n2"),
    ];
    let with_dangling = force_layout(&ids(4), &edges, &config).expect("layout");
    let without = force_layout(&ids(4), &[], &config).expect("layout");

    assert_eq!(with_dangling.len(), 4);
    assert!(!with_dangling.contains_key("ghost"));
    assert_eq!(with_dangling, without);
}

#[test]
fn duplicate_ids_collapse_to_first_occurrence() {
    let config = ForceLayoutConfig::default().with_seed(1);
    let layout = force_layout(&["a", "b", "a", "c"], &[], &config).expect("layout");
    let keys: Vec<&str> = layout.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn seeded_layouts_are_reproducible() {
    let config = ForceLayoutConfig::default().with_seed(42).with_iterations(60);
    let edges = vec![LayoutEdge::new("n0", "n1"), LayoutEdge::new("n1", "n2")];
    let first = force_layout(&ids(7), &edges, &config).expect("layout");
    let second = force_layout(&ids(7), &edges, &config).expect("layout");
    assert_eq!(first, second);
}

#[test]
fn repulsion_spreads_unconnected_nodes_apart() {
    let canvas = Canvas::new(800, 600);
    let seeds = 0..24u64;
    let mut initial_mean = 0.0;
    let mut final_pair = 0.0;
    for seed in seeds.clone() {
        let initial = ForceLayoutConfig::new(canvas).with_seed(seed).with_iterations(0);
        let relaxed = ForceLayoutConfig::new(canvas).with_seed(seed).with_iterations(60);
        let start = force_layout(&ids(8), &[], &initial).expect("initial layout");
        let end = force_layout(&ids(8), &[], &relaxed).expect("relaxed layout");
        initial_mean += mean_pairwise_distance(&start);
        final_pair += end["n0"].distance_to(end["n1"]);
    }
    let runs = seeds.count() as f64;
    assert!(
        final_pair / runs > initial_mean / runs,
        "unconnected pair collapsed: {} <= {}",
        final_pair / runs,
        initial_mean / runs
    );
}

#[test]
fn edges_pull_connected_nodes_closer_than_unconnected_ones() {
    let count = 10;
    let edges: Vec<LayoutEdge> = (1..count)
        .map(|i| LayoutEdge::new(format!("n{}", i - 1), format!("n{i}")))
        .collect();
    let mut connected = 0.0;
    let mut all_pairs = 0.0;
    for seed in 0..8u64 {
        let config = ForceLayoutConfig::default().with_seed(seed);
        let layout = force_layout(&ids(count), &edges, &config).expect("layout");
        connected += edges
            .iter()
            .map(|edge| layout[edge.source.as_str()].distance_to(layout[edge.target.as_str()]))
            .sum::<f64>()
            / edges.len() as f64;
        all_pairs += mean_pairwise_distance(&layout);
    }
    assert!(connected < all_pairs);
}

#[test]
fn invalid_canvas_fails_fast() {
    let config = ForceLayoutConfig::new(Canvas::new(0, 0));
    let err = force_layout(&ids(3), &[], &config).expect_err("zero canvas must fail");
    assert!(format!("{err}").contains("invalid canvas size"));
}

#[test]
fn fitted_box_stays_on_the_canvas() {
    let canvas = Canvas::new(800, 600);

    let corner = canvas.fit_box(Position::new(36.0, 36.0), 300.0, 280.0);
    assert_eq!((corner.x, corner.y), (150.0, 140.0));

    let far = canvas.fit_box(Position::new(764.0, 564.0), 300.0, 280.0);
    assert_eq!((far.x, far.y), (650.0, 460.0));

    let inside = canvas.fit_box(Position::new(400.0, 300.0), 300.0, 280.0);
    assert_eq!((inside.x, inside.y), (400.0, 300.0));

    let oversized = canvas.fit_box(Position::new(36.0, 36.0), 300.0, 700.0);
    assert_eq!((oversized.x, oversized.y), (150.0, 300.0));
}
