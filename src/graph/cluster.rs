//! Connected-component labeling over a kept edge set.

use super::types::Edge;

/// Component id for each node (by build order), assigned in discovery
/// order starting at 0. Every node gets exactly one id.
pub fn component_ids(node_count: usize, edges: &[Edge]) -> Vec<usize> {
	let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
	for edge in edges {
		adjacency[edge.a].push(edge.b);
		adjacency[edge.b].push(edge.a);
	}

	let mut ids: Vec<Option<usize>> = vec![None; node_count];
	let mut next_id = 0;
	let mut stack = Vec::new();

	for start in 0..node_count {
		if ids[start].is_some() {
			continue;
		}
		stack.push(start);
		while let Some(node) = stack.pop() {
			if ids[node].is_some() {
				continue;
			}
			ids[node] = Some(next_id);
			// reversed so neighbours are visited in edge order
			for &next in adjacency[node].iter().rev() {
				if ids[next].is_none() {
					stack.push(next);
				}
			}
		}
		next_id += 1;
	}

	ids.into_iter().map(|id| id.unwrap_or_default()).collect()
}

/// A component: its id and member nodes in build order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
	/// Component id; also picks the hue.
	pub id: usize,
	/// Member nodes.
	pub members: Vec<usize>,
}

/// Group nodes by component id.
pub fn clusters(ids: &[usize]) -> Vec<Cluster> {
	let count = ids.iter().max().map_or(0, |m| m + 1);
	let mut out: Vec<Cluster> = (0..count)
		.map(|id| Cluster {
			id,
			members: Vec::new(),
		})
		.collect();
	for (node, &id) in ids.iter().enumerate() {
		out[id].members.push(node);
	}
	out
}

/// Hue for a component, spreading neighbours by the golden angle.
pub fn cluster_hue(id: usize) -> u32 {
	((id * 137) % 360) as u32
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn edge(a: usize, b: usize) -> Edge {
		Edge {
			a,
			b,
			score: 1.0,
			shared_tags: Vec::new(),
		}
	}

	#[test]
	fn isolated_nodes_get_singletons() {
		assert_eq!(component_ids(3, &[]), vec![0, 1, 2]);
	}

	#[test]
	fn ids_follow_discovery_order() {
		// 0-3 and 1-2 ; 4 alone
		let ids = component_ids(5, &[edge(1, 2), edge(0, 3)]);
		assert_eq!(ids, vec![0, 1, 1, 0, 2]);
		assert_eq!(
			clusters(&ids),
			vec![
				Cluster {
					id: 0,
					members: vec![0, 3]
				},
				Cluster {
					id: 1,
					members: vec![1, 2]
				},
				Cluster {
					id: 2,
					members: vec![4]
				},
			]
		);
	}

	#[test]
	fn transitive_paths_join() {
		let ids = component_ids(4, &[edge(0, 1), edge(2, 3), edge(1, 2)]);
		assert_eq!(ids, vec![0, 0, 0, 0]);
	}

	#[test]
	fn golden_angle_hues() {
		assert_eq!(cluster_hue(0), 0);
		assert_eq!(cluster_hue(1), 137);
		assert_eq!(cluster_hue(3), 51);
	}
}
