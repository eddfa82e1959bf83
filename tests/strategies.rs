//! Scenario tests for every strategy through the public dispatch API.

use narrative_plane::graph::{
	Color, Connections, EdgeKind, NarrativeRecord, Point, Snapshot, Strategy, Tag, VisibleEntry, connect,
	parse_narratives,
};
use pretty_assertions::assert_eq;

fn record(name: &str, tags: &[(&str, f64)]) -> NarrativeRecord {
	NarrativeRecord::new(name, tags.iter().map(|(t, w)| Tag::new(*t, *w)).collect())
}

fn entries(n: usize) -> Vec<VisibleEntry> {
	(0..n)
		.map(|i| VisibleEntry::new(i, Point::new(100.0 * i as f64, 0.0)))
		.collect()
}

fn run(narratives: &[NarrativeRecord], strategy: Strategy, threshold: f64) -> Connections {
	let entries = entries(narratives.len());
	connect(&Snapshot {
		narratives,
		entries: &entries,
		strategy,
		threshold,
	})
}

fn pair() -> Vec<NarrativeRecord> {
	vec![
		record("A", &[("tag1", 2.0), ("tag2", 3.0)]),
		record("B", &[("tag1", 1.0), ("tag2", 1.0)]),
	]
}

#[test]
fn weighted_pair_scores_sum_of_weights() {
	let out = run(&pair(), Strategy::Weight, 1.0);
	assert_eq!(out.edges.len(), 1);
	let edge = &out.edges[0];
	assert_eq!(edge.tooltip, "Shared tags: tag1, tag2 - score: 7.0");
	assert_eq!((edge.a, edge.b), (Point::new(0.0, 0.0), Point::new(100.0, 0.0)));
	// one edge: degenerate range, lowest colour
	assert_eq!(edge.stroke_width, 1.0);
	assert_eq!(edge.kind, EdgeKind::Pair);
	assert!(out.h_index.is_none());
}

#[test]
fn hindex_pair_scores_mean_of_weights() {
	let out = run(&pair(), Strategy::HIndex, 1.0);
	assert_eq!(out.edges.len(), 1);
	let edge = &out.edges[0];
	assert_eq!(
		edge.tooltip,
		"A ↔ B\nScore: 3.5\nShared tags: tag1, tag2\nH(A)=1, H(B)=1\nCluster 0"
	);
	assert_eq!(
		edge.color,
		Color::Hsl {
			hue: 0,
			saturation: 70,
			lightness: 45
		}
	);
	assert_eq!(edge.stroke_width, 1.5 + 4.5_f64.ln());
	let h = out.h_index.unwrap();
	assert_eq!(h.get(&0), Some(&1));
	assert_eq!(h.get(&1), Some(&1));
}

#[test]
fn hindex_threshold_filters_and_isolates() {
	let out = run(&pair(), Strategy::HIndex, 4.0);
	assert!(out.edges.is_empty());
	let clusters = out.clusters.unwrap();
	assert_eq!(clusters.len(), 2);
	assert_eq!(out.h_index.unwrap().values().copied().collect::<Vec<_>>(), vec![0, 0]);
}

#[test]
fn hindex_clusters_get_distinct_hues() {
	let narratives = vec![
		record("A", &[("x", 2.0)]),
		record("B", &[("y", 2.0)]),
		record("C", &[("x", 2.0)]),
		record("D", &[("y", 2.0)]),
	];
	let out = run(&narratives, Strategy::HIndex, 1.0);
	let hues: Vec<String> = out.edges.iter().map(|e| e.color.to_string()).collect();
	assert_eq!(hues, vec!["hsl(0, 70%, 45%)", "hsl(137, 70%, 45%)"]);
	let members: Vec<Vec<usize>> = out.clusters.unwrap().into_iter().map(|c| c.members).collect();
	assert_eq!(members, vec![vec![0, 2], vec![1, 3]]);
}

#[test]
fn disjoint_narratives_have_no_edges_under_any_strategy() {
	let narratives = vec![
		record("A", &[("a", 3.0)]),
		record("B", &[("b", 3.0)]),
		record("C", &[("c", 3.0)]),
	];
	for strategy in [Strategy::Tag, Strategy::Weight, Strategy::HIndex, Strategy::Stepwise] {
		assert!(run(&narratives, strategy, 1.0).is_empty(), "{strategy}");
	}
	let clusters = run(&narratives, Strategy::HIndex, 1.0).clusters.unwrap();
	assert_eq!(clusters.len(), 3);
	assert!(clusters.iter().all(|c| c.members.len() == 1));
}

#[test]
fn tag_strategy_links_important_tags_only() {
	let narratives = vec![
		record("A", &[("trust", 2.0), ("privacy", 1.0)]),
		record("B", &[("trust", 3.0), ("privacy", 3.0)]),
		record("C", &[("privacy", 2.0)]),
	];
	let out = run(&narratives, Strategy::Tag, 1.0);
	let tips: Vec<&str> = out.edges.iter().map(|e| e.tooltip.as_str()).collect();
	assert_eq!(tips, vec!["A ↔ B\nShared tag: trust", "B ↔ C\nShared tag: privacy"]);
	assert!(out.edges.iter().all(|e| e.stroke_width == 3.0));
	assert_eq!(out.edges[0].color.to_string(), "rgba(0,0,255,0.3)");
}

#[test]
fn stepwise_draws_seed_and_second_order_edges() {
	let five = ["a", "b", "c", "d", "e"];
	let strong = |name: &str| record(name, &five.map(|t| (t, 2.0)));
	let narratives = vec![
		strong("S1"),
		record("Other", &[("a", 1.0)]),
		strong("S2"),
		record("Loner", &[("z", 3.0)]),
	];
	let out = run(&narratives, Strategy::Stepwise, 1.0);
	assert_eq!(out.edges.len(), 2);

	let seed = &out.edges[0];
	assert_eq!(seed.kind, EdgeKind::Seed);
	assert_eq!(seed.color, Color::Named("red"));
	assert_eq!(seed.stroke_width, 13.0);
	assert_eq!((seed.a, seed.b), (Point::new(0.0, 0.0), Point::new(200.0, 0.0)));

	let second = &out.edges[1];
	assert_eq!(second.kind, EdgeKind::SecondOrder);
	assert_eq!(second.a, Point::new(100.0, 0.0));
	assert_eq!(second.b, Point::new(100.0, 0.0));
	assert_eq!(second.stroke_width, 5.0);
	assert_eq!(second.tooltip, "Second-order ↔ Other\nShared tags: a\nScore: 1");
}

#[test]
fn stepwise_without_strong_seed_is_empty() {
	let narratives = vec![
		record("A", &[("a", 3.0), ("b", 3.0), ("c", 3.0), ("d", 3.0)]),
		record("B", &[("a", 3.0), ("b", 3.0), ("c", 3.0), ("d", 3.0)]),
	];
	assert!(run(&narratives, Strategy::Stepwise, 1.0).is_empty());
}

#[test]
fn malformed_dataset_degrades_silently() {
	let narratives = parse_narratives(
		r#"[
			{"name": "A", "tags": [{"name": "x", "weight": "3"}, {"name": "y", "weight": "lots"}]},
			{"tags": [{"name": "x", "weight": 2}, {"name": "y", "weight": 5}]},
			{"name": "C", "tags": null}
		]"#,
	)
	.unwrap();
	let out = run(&narratives, Strategy::Weight, 1.0);
	assert_eq!(out.edges.len(), 1);
	assert_eq!(out.edges[0].tooltip, "Shared tags: x - score: 5.0");

	let out = run(&narratives, Strategy::HIndex, 1.0);
	assert!(out.edges[0].tooltip.starts_with("A ↔ Untitled"));
}

#[test]
fn dangling_entries_are_ignored() {
	let narratives = pair();
	let entries = vec![
		VisibleEntry::new(0, Point::default()),
		VisibleEntry::new(7, Point::default()),
		VisibleEntry::new(1, Point::default()),
	];
	let out = connect(&Snapshot {
		narratives: &narratives,
		entries: &entries,
		strategy: Strategy::Weight,
		threshold: 1.0,
	});
	assert_eq!(out.edges.len(), 1);
}

#[test]
fn entry_order_does_not_change_connections() {
	let five = ["a", "b", "c", "d", "e"];
	let narratives = vec![
		record("A", &[("x", 1.0), ("y", 1.0)]),
		record("B", &[("y", 1.0), ("x", 1.0)]),
		record("S1", &five.map(|t| (t, 2.0))),
		record("S2", &five.map(|t| (t, 2.0))),
		record("C", &[("x", 2.0), ("a", 1.0)]),
	];
	let forward = entries(narratives.len());
	let reversed: Vec<_> = forward.iter().rev().cloned().collect();
	for strategy in [Strategy::Tag, Strategy::Weight, Strategy::HIndex, Strategy::Stepwise] {
		let expected = connect(&Snapshot {
			narratives: &narratives,
			entries: &forward,
			strategy,
			threshold: 1.0,
		});
		let shuffled = connect(&Snapshot {
			narratives: &narratives,
			entries: &reversed,
			strategy,
			threshold: 1.0,
		});
		assert_eq!(expected, shuffled, "{strategy}");
	}
	let out = run(&narratives[..2], Strategy::Weight, 1.0);
	assert_eq!(out.edges[0].tooltip, "Shared tags: x, y - score: 4.0");
}
