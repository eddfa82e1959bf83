//! Strategy dispatch: one call turns a snapshot of the plane into the edges
//! a renderer draws.

use std::collections::BTreeMap;

use log::debug;
use serde::Deserialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::cluster::{Cluster, cluster_hue, clusters, component_ids};
use super::metrics::node_h_indices;
use super::nodes::build_nodes;
use super::scoring::{ScoreRule, normalized, score_edges, score_range};
use super::stepwise::expand;
use super::tag_links::tag_links;
use super::types::{Color, EdgeKind, NarrativeRecord, Node, VisibleEntry, VisualEdge};

/// How relationships between narratives are computed.
#[derive(
	Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Strategy {
	/// Link every pair of narratives sharing an important tag.
	#[default]
	Tag,
	/// Sum of both weights over shared tags.
	Weight,
	/// Mean weight over shared tags, thresholded and clustered.
	HIndex,
	/// Grow a single cluster from the strongest seed edge.
	Stepwise,
}

impl Strategy {
	/// Human-readable name for menus.
	pub fn label(self) -> &'static str {
		match self {
			Strategy::Tag => "Tag Connections",
			Strategy::Weight => "Weight Connections",
			Strategy::HIndex => "H-Index Connections",
			Strategy::Stepwise => "Stepwise Connections",
		}
	}

	/// Whether the score threshold affects this strategy.
	pub fn uses_threshold(self) -> bool {
		self == Strategy::HIndex
	}
}

/// Everything one computation reads. The engine keeps nothing between calls.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
	/// The whole dataset.
	pub narratives: &'a [NarrativeRecord],
	/// Narratives currently on the plane.
	pub entries: &'a [VisibleEntry],
	/// Active strategy.
	pub strategy: Strategy,
	/// Minimum score for the H-index strategy.
	pub threshold: f64,
}

/// Output of one computation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Connections {
	/// Edges to draw, in draw order.
	pub edges: Vec<VisualEdge>,
	/// H-index per dataset index; H-index strategy only.
	pub h_index: Option<BTreeMap<usize, u32>>,
	/// Components over dataset indices; H-index strategy only.
	pub clusters: Option<Vec<Cluster>>,
}

impl Connections {
	/// Whether nothing is drawn.
	pub fn is_empty(&self) -> bool {
		self.edges.is_empty()
	}
}

/// Recompute all edges for `snapshot` from scratch.
pub fn connect(snapshot: &Snapshot<'_>) -> Connections {
	let out = match snapshot.strategy {
		Strategy::Tag => tag_connections(snapshot),
		Strategy::Weight => weight_connections(&build_nodes(snapshot.narratives, snapshot.entries)),
		Strategy::HIndex => hindex_connections(
			&build_nodes(snapshot.narratives, snapshot.entries),
			snapshot.threshold,
		),
		Strategy::Stepwise => stepwise_connections(&build_nodes(snapshot.narratives, snapshot.entries)),
	};
	debug!(
		"Connections - strategy={}, entries={}, edges={}",
		snapshot.strategy,
		snapshot.entries.len(),
		out.edges.len()
	);
	out
}

fn tag_connections(snapshot: &Snapshot<'_>) -> Connections {
	let edges = tag_links(snapshot.narratives, snapshot.entries)
		.into_iter()
		.map(|link| VisualEdge {
			a: link.a.point,
			b: link.b.point,
			color: Color::Rgba {
				r: 0,
				g: 0,
				b: 255,
				a: 0.3,
			},
			stroke_width: 3.0,
			tooltip: format!(
				"{} ↔ {}\nShared tag: {}",
				link.a.display_name, link.b.display_name, link.tag
			),
			kind: EdgeKind::TagLink,
		})
		.collect();
	Connections {
		edges,
		..Default::default()
	}
}

/// Colour and width for a weighted edge from its squared normalized score.
pub fn weight_visuals(score: f64, min: f64, max: f64) -> (Color, f64) {
	let ratio = normalized(score, min, max).powi(2);
	let color = Color::Rgba {
		r: (200.0 * ratio).round() as u8,
		g: (128.0 * (1.0 - ratio)).round() as u8,
		b: 0,
		a: 0.65,
	};
	(color, 1.0 + ratio * 15.0)
}

fn weight_connections(nodes: &[Node]) -> Connections {
	let edges = score_edges(nodes, ScoreRule::Sum, |e| e.score > 0.0);
	let Some((min, max)) = score_range(&edges) else {
		return Connections::default();
	};
	let edges = edges
		.iter()
		.map(|edge| {
			let (color, stroke_width) = weight_visuals(edge.score, min, max);
			VisualEdge {
				a: nodes[edge.a].position,
				b: nodes[edge.b].position,
				color,
				stroke_width,
				tooltip: format!(
					"Shared tags: {} - score: {:.1}",
					edge.shared_tags.join(", "),
					edge.score
				),
				kind: EdgeKind::Pair,
			}
		})
		.collect();
	Connections {
		edges,
		..Default::default()
	}
}

fn hindex_connections(nodes: &[Node], threshold: f64) -> Connections {
	let edges = score_edges(nodes, ScoreRule::Mean, |e| e.score >= threshold);
	let h = node_h_indices(nodes.len(), &edges);
	let ids = component_ids(nodes.len(), &edges);

	let visual = edges
		.iter()
		.filter(|edge| ids[edge.a] == ids[edge.b])
		.map(|edge| {
			let (a, b) = (&nodes[edge.a], &nodes[edge.b]);
			let cluster = ids[edge.a];
			let shared = if edge.shared_tags.is_empty() {
				"—".to_string()
			} else {
				edge.shared_tags.join(", ")
			};
			VisualEdge {
				a: a.position,
				b: b.position,
				color: Color::Hsl {
					hue: cluster_hue(cluster),
					saturation: 70,
					lightness: 45,
				},
				stroke_width: 1.5 + (edge.score + 1.0).ln(),
				tooltip: format!(
					"{} ↔ {}\nScore: {}\nShared tags: {}\nH(A)={}, H(B)={}\nCluster {}",
					a.display_name, b.display_name, edge.score, shared, h[edge.a], h[edge.b], cluster
				),
				kind: EdgeKind::Pair,
			}
		})
		.collect();

	let h_index = nodes.iter().zip(&h).map(|(n, &h)| (n.index, h)).collect();
	let groups = clusters(&ids)
		.into_iter()
		.map(|c| Cluster {
			id: c.id,
			members: c.members.iter().map(|&m| nodes[m].index).collect(),
		})
		.collect();

	Connections {
		edges: visual,
		h_index: Some(h_index),
		clusters: Some(groups),
	}
}

fn stepwise_connections(nodes: &[Node]) -> Connections {
	let Some(cluster) = expand(nodes) else {
		return Connections::default();
	};
	let seed = &cluster.seed;
	let (a, b) = (&nodes[seed.a], &nodes[seed.b]);

	let mut edges = vec![VisualEdge {
		a: a.position,
		b: b.position,
		color: Color::Named("red"),
		stroke_width: 3.0 + seed.score,
		tooltip: format!(
			"{} ↔ {}\nShared tags: {}\nScore: {}",
			a.display_name,
			b.display_name,
			seed.shared_tags.join(", "),
			seed.score
		),
		kind: EdgeKind::Seed,
	}];
	edges.extend(cluster.expansions.iter().map(|expansion| {
		let node = &nodes[expansion.node];
		VisualEdge {
			a: cluster.anchor,
			b: node.position,
			color: Color::Rgba {
				r: 255,
				g: 165,
				b: 0,
				a: 0.7,
			},
			stroke_width: 2.0 + 3.0 * expansion.score(),
			tooltip: format!(
				"Second-order ↔ {}\nShared tags: {}\nScore: {}",
				node.display_name,
				expansion.shared_tags.join(", "),
				expansion.score()
			),
			kind: EdgeKind::SecondOrder,
		}
	}));

	Connections {
		edges,
		..Default::default()
	}
}
