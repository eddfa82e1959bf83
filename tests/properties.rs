//! Property-based tests for the relationship engine
//!
//! Run with: cargo test --test properties

use narrative_plane::graph::cluster::component_ids;
use narrative_plane::graph::metrics::h_index;
use narrative_plane::graph::nodes::build_nodes;
use narrative_plane::graph::scoring::{ScoreRule, score_edges, score_pair, shared_tags};
use narrative_plane::graph::stepwise::expand;
use narrative_plane::graph::tag_links::tag_links;
use narrative_plane::graph::Strategy as Connector;
use narrative_plane::graph::{NarrativeRecord, Node, Point, Snapshot, Tag, VisibleEntry, connect};
use proptest::prelude::*;

const TAG_POOL: [&str; 7] = ["privacy", "safety", "trust", "dignity", "fairness", "autonomy", "justice"];

fn narrative(max_weight: u8) -> impl Strategy<Value = NarrativeRecord> {
	prop::collection::vec((0..TAG_POOL.len(), 0..=max_weight), 0..8).prop_map(|tags| {
		NarrativeRecord::new(
			"n",
			tags.into_iter()
				.map(|(t, w)| Tag::new(TAG_POOL[t], w as f64))
				.collect(),
		)
	})
}

fn dataset(max_weight: u8) -> impl Strategy<Value = Vec<NarrativeRecord>> {
	prop::collection::vec(narrative(max_weight), 0..9)
}

/// One entry per narrative at distinct positions.
fn entries(narratives: &[NarrativeRecord]) -> Vec<VisibleEntry> {
	(0..narratives.len())
		.map(|i| VisibleEntry::new(i, Point::new(10.0 * i as f64, 7.0 * i as f64)))
		.collect()
}

fn nodes(narratives: &[NarrativeRecord]) -> Vec<Node> {
	build_nodes(narratives, &entries(narratives))
}

fn snapshot<'a>(
	narratives: &'a [NarrativeRecord],
	entries: &'a [VisibleEntry],
	strategy: Connector,
) -> Snapshot<'a> {
	Snapshot {
		narratives,
		entries,
		strategy,
		threshold: 1.0,
	}
}

fn strategy_of(i: usize) -> Connector {
	[Connector::Tag, Connector::Weight, Connector::HIndex, Connector::Stepwise][i % 4]
}

// ============================================================================
// EDGE STRUCTURE
// ============================================================================

proptest! {
	/// Invariant: no edge joins a node to itself
	#[test]
	fn no_self_loops(data in dataset(3)) {
		let nodes = nodes(&data);
		for rule in [ScoreRule::Sum, ScoreRule::Mean] {
			for edge in score_edges(&nodes, rule, |e| e.score > 0.0) {
				prop_assert!(edge.a < edge.b);
			}
		}
		for link in tag_links(&data, &entries(&data)) {
			prop_assert_ne!(link.a.dataset_index, link.b.dataset_index);
		}
		let entries = entries(&data);
		for strategy in [Connector::Weight, Connector::HIndex] {
			for edge in connect(&snapshot(&data, &entries, strategy)).edges {
				prop_assert_ne!(edge.a, edge.b);
			}
		}
	}

	/// Invariant: shared tags and scores do not depend on pair order
	#[test]
	fn pair_symmetry(data in dataset(3)) {
		let nodes = nodes(&data);
		for i in 0..nodes.len() {
			for j in 0..nodes.len() {
				let mut ab = shared_tags(&nodes[i], &nodes[j]);
				let mut ba = shared_tags(&nodes[j], &nodes[i]);
				ab.sort();
				ba.sort();
				prop_assert_eq!(ab, ba);
				for rule in [ScoreRule::Sum, ScoreRule::Mean] {
					prop_assert_eq!(
						score_pair(&nodes, i, j, rule).score,
						score_pair(&nodes, j, i, rule).score
					);
				}
			}
		}
	}

	/// Invariant: scores follow the per-tag sum and mean formulas
	#[test]
	fn score_formulas(data in dataset(3)) {
		let nodes = nodes(&data);
		for edge in score_edges(&nodes, ScoreRule::Sum, |_| true) {
			let (a, b) = (&nodes[edge.a], &nodes[edge.b]);
			let sum: f64 = edge.shared_tags.iter().map(|t| a.tag_weights[t] + b.tag_weights[t]).sum();
			prop_assert_eq!(edge.score, sum);
			let mean = score_pair(&nodes, edge.a, edge.b, ScoreRule::Mean).score;
			prop_assert_eq!(mean * 2.0, sum);
		}
	}

	/// Invariant: identical input gives identical output
	#[test]
	fn deterministic(data in dataset(3), pick in 0usize..4) {
		let entries = entries(&data);
		let snap = snapshot(&data, &entries, strategy_of(pick));
		prop_assert_eq!(connect(&snap), connect(&snap));
	}
}

// ============================================================================
// CLUSTERS AND METRICS
// ============================================================================

fn find(parent: &mut [usize], x: usize) -> usize {
	let mut root = x;
	while parent[root] != root {
		root = parent[root];
	}
	root
}

proptest! {
	/// Invariant: components are exactly the connectivity classes of the kept edges
	#[test]
	fn components_partition(data in dataset(3), threshold in 0.5f64..4.0) {
		let nodes = nodes(&data);
		let edges = score_edges(&nodes, ScoreRule::Mean, |e| e.score >= threshold);
		let ids = component_ids(nodes.len(), &edges);
		prop_assert_eq!(ids.len(), nodes.len());

		let mut parent: Vec<usize> = (0..nodes.len()).collect();
		for edge in &edges {
			let (ra, rb) = (find(&mut parent, edge.a), find(&mut parent, edge.b));
			parent[ra] = rb;
		}
		for i in 0..nodes.len() {
			for j in 0..nodes.len() {
				let connected = find(&mut parent, i) == find(&mut parent, j);
				prop_assert_eq!(ids[i] == ids[j], connected);
			}
		}
		for edge in &edges {
			prop_assert_eq!(ids[edge.a], ids[edge.b]);
		}
	}

	/// Invariant: h is the largest value with at least h scores >= h
	#[test]
	fn h_index_definition(scores in prop::collection::vec(0.0f64..12.0, 0..20)) {
		let h = h_index(&scores);
		let at_least = |v: f64| scores.iter().filter(|s| **s >= v).count();
		prop_assert!(at_least(h as f64) >= h as usize);
		prop_assert!(at_least(h as f64 + 1.0) < h as usize + 1);
	}

	/// Invariant: without any weight >= 2 no seed exists, so stepwise draws nothing
	#[test]
	fn stepwise_needs_strong_seed(data in dataset(1)) {
		prop_assert!(expand(&nodes(&data)).is_none());
		let entries = entries(&data);
		prop_assert!(connect(&snapshot(&data, &entries, Connector::Stepwise)).is_empty());
	}

	/// Invariant: expanded nodes are never seed endpoints and never repeat
	#[test]
	fn stepwise_members_unique(data in dataset(3)) {
		if let Some(cluster) = expand(&nodes(&data)) {
			let mut members = cluster.members();
			let total = members.len();
			members.sort_unstable();
			members.dedup();
			prop_assert_eq!(members.len(), total);
			for expansion in &cluster.expansions {
				prop_assert!(!expansion.shared_tags.is_empty());
			}
		}
	}
}
