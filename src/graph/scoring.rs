//! Pairwise edge scoring from shared tags.

use super::types::{Edge, Node};

/// How the two weights of a shared tag contribute to a pair's score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreRule {
	/// `wa + wb` per shared tag.
	Sum,
	/// `(wa + wb) / 2` per shared tag.
	Mean,
}

impl ScoreRule {
	fn contribution(self, wa: f64, wb: f64) -> f64 {
		match self {
			ScoreRule::Sum => wa + wb,
			ScoreRule::Mean => (wa + wb) / 2.0,
		}
	}
}

/// Tags present in both nodes, in `a`'s tag order.
pub fn shared_tags(a: &Node, b: &Node) -> Vec<String> {
	a.tag_weights
		.keys()
		.filter(|tag| b.tag_weights.contains_key(*tag))
		.cloned()
		.collect()
}

/// Score a single pair. `a` and `b` are positions in `nodes`.
pub fn score_pair(nodes: &[Node], a: usize, b: usize, rule: ScoreRule) -> Edge {
	let (na, nb) = (&nodes[a], &nodes[b]);
	let mut score = 0.0;
	let mut shared = Vec::new();
	for (tag, &wa) in &na.tag_weights {
		if let Some(&wb) = nb.tag_weights.get(tag) {
			score += rule.contribution(wa, wb);
			shared.push(tag.clone());
		}
	}
	Edge {
		a,
		b,
		score,
		shared_tags: shared,
	}
}

/// Score every pair `i < j` and keep those accepted by `keep`.
///
/// Output order is row-major over build order, so identical inputs always
/// give identical edge lists.
pub fn score_edges(nodes: &[Node], rule: ScoreRule, keep: impl Fn(&Edge) -> bool) -> Vec<Edge> {
	let mut edges = Vec::new();
	for i in 0..nodes.len() {
		for j in (i + 1)..nodes.len() {
			let edge = score_pair(nodes, i, j, rule);
			if keep(&edge) {
				edges.push(edge);
			}
		}
	}
	edges
}

/// Min and max score over `edges`, or `None` when there are none.
pub fn score_range(edges: &[Edge]) -> Option<(f64, f64)> {
	edges.iter().fold(None, |range, e| match range {
		None => Some((e.score, e.score)),
		Some((lo, hi)) => Some((lo.min(e.score), hi.max(e.score))),
	})
}

/// Position of `score` within `[min, max]`, using a span of 1 when the
/// range is degenerate.
pub fn normalized(score: f64, min: f64, max: f64) -> f64 {
	let span = max - min;
	let span = if span == 0.0 || !span.is_finite() { 1.0 } else { span };
	(score - min) / span
}
