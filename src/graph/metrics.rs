//! Per-node H-index over incident edge scores.

use super::types::Edge;

/// Largest `h` such that at least `h` of `scores` are `>= h`.
pub fn h_index(scores: &[f64]) -> u32 {
	let mut sorted = scores.to_vec();
	sorted.sort_by(|a, b| b.total_cmp(a));
	let mut h = 0;
	for (i, score) in sorted.iter().enumerate() {
		let rank = (i + 1) as f64;
		if *score >= rank {
			h = i as u32 + 1;
		}
	}
	h
}

/// H-index of every node over the scores of its incident edges.
///
/// Indexed by build order; isolated nodes score 0.
pub fn node_h_indices(node_count: usize, edges: &[Edge]) -> Vec<u32> {
	let mut incident: Vec<Vec<f64>> = vec![Vec::new(); node_count];
	for edge in edges {
		incident[edge.a].push(edge.score);
		incident[edge.b].push(edge.score);
	}
	incident.iter().map(|scores| h_index(scores)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn worked_example() {
		assert_eq!(h_index(&[5.0, 3.0, 3.0, 1.0]), 3);
		assert_eq!(h_index(&[1.0, 3.0, 5.0, 3.0]), 3);
	}

	#[test]
	fn edge_cases() {
		assert_eq!(h_index(&[]), 0);
		assert_eq!(h_index(&[0.5, 0.9]), 0);
		assert_eq!(h_index(&[1.0]), 1);
		assert_eq!(h_index(&[10.0, 10.0]), 2);
		assert_eq!(h_index(&[2.5, 2.5, 2.5]), 2);
	}

	#[test]
	fn per_node_indices() {
		let edge = |a, b, score| Edge {
			a,
			b,
			score,
			shared_tags: Vec::new(),
		};
		let edges = vec![edge(0, 1, 4.0), edge(0, 2, 2.0), edge(1, 2, 1.0)];
		assert_eq!(node_h_indices(4, &edges), vec![2, 1, 1, 0]);
	}
}
