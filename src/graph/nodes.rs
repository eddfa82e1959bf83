//! Node building from visible entries.

use indexmap::IndexMap;
use log::warn;

use super::types::{NarrativeRecord, Node, VisibleEntry};

/// Tag name to weight for one narrative.
///
/// Later occurrences of a tag name overwrite earlier ones; weights that are
/// missing, non-numeric or not strictly positive are left out.
pub fn tag_weights(record: &NarrativeRecord) -> IndexMap<String, f64> {
	let mut weights = IndexMap::new();
	for tag in &record.tags {
		if let Some(w) = tag.effective_weight() {
			weights.insert(tag.name.clone(), w);
		}
	}
	weights
}

/// Visible entries in dataset order.
///
/// The sort is stable, so entries sharing a dataset index keep their
/// relative order.
pub fn dataset_order(entries: &[VisibleEntry]) -> Vec<&VisibleEntry> {
	let mut ordered: Vec<&VisibleEntry> = entries.iter().collect();
	ordered.sort_by_key(|entry| entry.dataset_index);
	ordered
}

/// Build one node per visible entry, in dataset order regardless of the
/// order of `entries`.
///
/// Entries pointing outside the dataset are skipped.
pub fn build_nodes(narratives: &[NarrativeRecord], entries: &[VisibleEntry]) -> Vec<Node> {
	dataset_order(entries)
		.into_iter()
		.filter_map(|entry| {
			let Some(record) = narratives.get(entry.dataset_index) else {
				warn!(
					"visible entry refers to narrative {} but the dataset has {}",
					entry.dataset_index,
					narratives.len()
				);
				return None;
			};
			Some(Node {
				index: entry.dataset_index,
				position: entry.position,
				tag_weights: tag_weights(record),
				display_name: record.display_name().to_string(),
			})
		})
		.collect()
}
