//! Maximal tag clusters over a whole dataset.
//!
//! A cluster is a set of narratives together with every tag they all carry.
//! Candidates come from single tags and tag pairs shared by at least two
//! narratives; only clusters not dominated by a larger one are reported.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::{IndexMap, IndexSet};
use log::debug;

use super::nodes::tag_weights;
use super::types::NarrativeRecord;

/// Default minimum number of common tags for a cluster.
pub const DEFAULT_MIN_COMMON_TAGS: usize = 2;

/// A maximal group of narratives sharing a common tag set.
#[derive(Clone, Debug, PartialEq)]
pub struct MaximalCluster {
	/// `cluster_<n>` label.
	pub id: String,
	/// Dataset indices, ascending.
	pub narratives: Vec<usize>,
	/// Common tag to summed weight over all members.
	pub common_tags: BTreeMap<String, f64>,
	/// Sum of `common_tags` values.
	pub total_weight: f64,
	/// `total_weight` per common tag.
	pub avg_weight_per_tag: f64,
	/// `total_weight` per narrative.
	pub avg_weight_per_narrative: f64,
	/// `total_weight` per narrative-tag pair.
	pub density: f64,
}

fn round2(x: f64) -> f64 {
	(x * 100.0).round() / 100.0
}

/// Find maximal clusters with at least `min_common_tags` common tags,
/// densest first.
pub fn maximal_clusters(narratives: &[NarrativeRecord], min_common_tags: usize) -> Vec<MaximalCluster> {
	let weights: Vec<IndexMap<String, f64>> = narratives.iter().map(tag_weights).collect();

	let mut tag_to_narratives: IndexMap<&str, BTreeSet<usize>> = IndexMap::new();
	for (i, tags) in weights.iter().enumerate() {
		for tag in tags.keys() {
			tag_to_narratives.entry(tag.as_str()).or_default().insert(i);
		}
	}

	let mut candidates: IndexSet<BTreeSet<usize>> = IndexSet::new();
	for members in tag_to_narratives.values() {
		if members.len() >= 2 {
			candidates.insert(members.clone());
		}
	}
	let groups: Vec<&BTreeSet<usize>> = tag_to_narratives.values().collect();
	for i in 0..groups.len() {
		for j in (i + 1)..groups.len() {
			let both: BTreeSet<usize> = groups[i].intersection(groups[j]).copied().collect();
			if both.len() >= 2 {
				candidates.insert(both);
			}
		}
	}

	let mut found: Vec<(BTreeSet<usize>, BTreeSet<String>, MaximalCluster)> = Vec::new();
	for members in candidates {
		let Some(&first) = members.first() else {
			continue;
		};
		let common: BTreeSet<String> = weights[first]
			.keys()
			.filter(|tag| members.iter().all(|&m| weights[m].contains_key(*tag)))
			.cloned()
			.collect();
		if common.len() < min_common_tags || common.is_empty() {
			continue;
		}

		let common_tags: BTreeMap<String, f64> = common
			.iter()
			.map(|tag| {
				let sum = members.iter().map(|&m| weights[m][tag.as_str()]).sum();
				(tag.clone(), sum)
			})
			.collect();
		let total_weight: f64 = common_tags.values().sum();
		let (tag_count, member_count) = (common.len() as f64, members.len() as f64);

		let cluster = MaximalCluster {
			id: String::new(),
			narratives: members.iter().copied().collect(),
			common_tags,
			total_weight,
			avg_weight_per_tag: round2(total_weight / tag_count),
			avg_weight_per_narrative: round2(total_weight / member_count),
			density: round2(total_weight / (tag_count * member_count)),
		};
		found.push((members, common, cluster));
	}

	let mut maximal: Vec<MaximalCluster> = found
		.iter()
		.enumerate()
		.filter(|(i, (members, tags, _))| {
			!found.iter().enumerate().any(|(j, (other_members, other_tags, _))| {
				*i != j
					&& members.is_subset(other_members)
					&& tags.is_subset(other_tags)
					&& (other_members.len() > members.len() || other_tags.len() > tags.len())
			})
		})
		.map(|(_, (_, _, cluster))| cluster.clone())
		.collect();

	for (n, cluster) in maximal.iter_mut().enumerate() {
		cluster.id = format!("cluster_{}", n + 2);
	}
	maximal.sort_by(|a, b| b.density.total_cmp(&a.density));

	debug!(
		"Maximal clusters - narratives={}, candidates={}, maximal={}",
		narratives.len(),
		found.len(),
		maximal.len()
	);
	maximal
}
