//! Tag-anchored links: every pair of narratives carrying the same important
//! tag is joined, independently of any pair score.

use indexmap::{IndexMap, IndexSet};

use super::nodes::dataset_order;
use super::types::{NarrativeRecord, Point, VisibleEntry};

/// Minimum weight for a tag occurrence to be linked.
pub const TAG_LINK_MIN_WEIGHT: f64 = 2.0;

/// One occurrence of a tag on the plane.
#[derive(Clone, Debug, PartialEq)]
pub struct TagAnchor {
	/// Narrative carrying the tag.
	pub dataset_index: usize,
	/// Its display name.
	pub display_name: String,
	/// Chip or entry location.
	pub point: Point,
}

/// A link between two occurrences of the same tag.
#[derive(Clone, Debug, PartialEq)]
pub struct TagLink {
	/// Shared tag name.
	pub tag: String,
	/// Earlier occurrence.
	pub a: TagAnchor,
	/// Later occurrence.
	pub b: TagAnchor,
}

/// Anchors per tag name, tags ordered by first appearance in dataset order.
///
/// Each entry contributes at most one anchor per tag; the anchor sits on the
/// entry's chip for that tag when known, else on the entry itself. Two
/// entries for the same narrative are two separate occurrences.
pub fn anchors_by_tag(
	narratives: &[NarrativeRecord],
	entries: &[VisibleEntry],
) -> IndexMap<String, Vec<TagAnchor>> {
	let mut by_tag: IndexMap<String, Vec<TagAnchor>> = IndexMap::new();
	for entry in dataset_order(entries) {
		let Some(record) = narratives.get(entry.dataset_index) else {
			continue;
		};
		let mut anchored: IndexSet<&str> = IndexSet::new();
		for tag in &record.tags {
			if !tag.weight.is_some_and(|w| w >= TAG_LINK_MIN_WEIGHT) {
				continue;
			}
			if !anchored.insert(tag.name.as_str()) {
				continue;
			}
			let point = entry
				.tag_anchors
				.get(&tag.name)
				.copied()
				.unwrap_or(entry.position);
			by_tag.entry(tag.name.clone()).or_default().push(TagAnchor {
				dataset_index: entry.dataset_index,
				display_name: record.display_name().to_string(),
				point,
			});
		}
	}
	by_tag
}

/// Every pair of anchors within each tag group.
pub fn tag_links(narratives: &[NarrativeRecord], entries: &[VisibleEntry]) -> Vec<TagLink> {
	let mut links = Vec::new();
	for (tag, anchors) in anchors_by_tag(narratives, entries) {
		for i in 0..anchors.len() {
			for j in (i + 1)..anchors.len() {
				links.push(TagLink {
					tag: tag.clone(),
					a: anchors[i].clone(),
					b: anchors[j].clone(),
				});
			}
		}
	}
	links
}
