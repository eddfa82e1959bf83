//! Seeded expansion: grow one cluster outward from the strongest edge.

use indexmap::IndexSet;
use log::debug;

use super::scoring::{ScoreRule, score_edges};
use super::types::{Edge, Node, Point};

/// Minimum shared tags for a seed candidate.
pub const SEED_MIN_SHARED_TAGS: usize = 5;
/// Minimum weight, on both endpoints, of every shared tag of a seed.
pub const SEED_MIN_WEIGHT: f64 = 2.0;
/// Minimum weight a node needs on a cluster tag to join.
pub const EXPANSION_MIN_WEIGHT: f64 = 1.0;

/// A node admitted during expansion.
#[derive(Clone, Debug, PartialEq)]
pub struct Expansion {
	/// Build-order index of the admitted node.
	pub node: usize,
	/// Cluster tags that admitted it, in cluster tag order.
	pub shared_tags: Vec<String>,
}

impl Expansion {
	/// Number of tags driving admission.
	pub fn score(&self) -> f64 {
		self.shared_tags.len() as f64
	}
}

/// Result of one stepwise run.
#[derive(Clone, Debug, PartialEq)]
pub struct SeededCluster {
	/// Strongest qualifying edge.
	pub seed: Edge,
	/// Midpoint between the seed's endpoints.
	pub anchor: Point,
	/// Admitted nodes in admission order.
	pub expansions: Vec<Expansion>,
	/// Tags of the cluster once expansion has settled.
	pub tags: IndexSet<String>,
}

impl SeededCluster {
	/// Build-order indices of every member, seed endpoints first.
	pub fn members(&self) -> Vec<usize> {
		let mut members = vec![self.seed.a, self.seed.b];
		members.extend(self.expansions.iter().map(|e| e.node));
		members
	}
}

/// Whether `edge` may seed a cluster.
pub fn is_strong(nodes: &[Node], edge: &Edge) -> bool {
	let (a, b) = (&nodes[edge.a], &nodes[edge.b]);
	edge.shared_tags.len() >= SEED_MIN_SHARED_TAGS
		&& edge.shared_tags.iter().all(|tag| {
			a.weight(tag).is_some_and(|w| w >= SEED_MIN_WEIGHT)
				&& b.weight(tag).is_some_and(|w| w >= SEED_MIN_WEIGHT)
		})
}

/// Highest-scoring strong edge; the first one encountered wins ties.
pub fn select_seed(nodes: &[Node], edges: &[Edge]) -> Option<Edge> {
	let mut best: Option<&Edge> = None;
	for edge in edges.iter().filter(|e| is_strong(nodes, e)) {
		if best.is_none_or(|b| edge.score > b.score) {
			best = Some(edge);
		}
	}
	best.cloned()
}

/// Run seed selection then expansion to a fixed point.
///
/// Returns `None` when no pair shares a tag or no pair is strong enough to
/// seed; both mean there is nothing to draw.
pub fn expand(nodes: &[Node]) -> Option<SeededCluster> {
	let edges = score_edges(nodes, ScoreRule::Mean, |e| e.score > 0.0);
	if edges.is_empty() {
		debug!("Stepwise - no scored pairs among {} nodes", nodes.len());
		return None;
	}

	let Some(seed) = select_seed(nodes, &edges) else {
		debug!("Stepwise - no strong seed among {} edges", edges.len());
		return None;
	};

	let mut in_cluster = vec![false; nodes.len()];
	in_cluster[seed.a] = true;
	in_cluster[seed.b] = true;
	let mut tags: IndexSet<String> = seed.shared_tags.iter().cloned().collect();
	let mut expansions = Vec::new();

	loop {
		let mut admitted = false;
		for (i, node) in nodes.iter().enumerate() {
			if in_cluster[i] {
				continue;
			}
			let shared: Vec<String> = tags
				.iter()
				.filter(|tag| node.weight(tag).is_some_and(|w| w >= EXPANSION_MIN_WEIGHT))
				.cloned()
				.collect();
			if shared.is_empty() {
				continue;
			}
			in_cluster[i] = true;
			tags.extend(shared.iter().cloned());
			expansions.push(Expansion {
				node: i,
				shared_tags: shared,
			});
			admitted = true;
		}
		if !admitted {
			break;
		}
	}

	let anchor = nodes[seed.a].position.midpoint(nodes[seed.b].position);
	debug!(
		"Stepwise - seed=({}, {}) score={} expanded={}",
		nodes[seed.a].index,
		nodes[seed.b].index,
		seed.score,
		expansions.len()
	);

	Some(SeededCluster {
		seed,
		anchor,
		expansions,
		tags,
	})
}
