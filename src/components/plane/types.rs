use indexmap::IndexMap;

use crate::graph::{NarrativeRecord, Point, VisibleEntry, weight_label};

pub const CARD_WIDTH: f64 = 300.0;
pub const HEADER_HEIGHT: f64 = 30.0;
pub const CONTEXT_HEIGHT: f64 = 22.0;
pub const CHIP_HEIGHT: f64 = 20.0;
pub const CARD_PADDING: f64 = 8.0;

/// A tag chip inside a card.
#[derive(Clone, Debug)]
pub struct Chip {
	pub tag: String,
	pub label: String,
	pub center: Point,
}

/// On-plane geometry of one visible narrative.
#[derive(Clone, Debug)]
pub struct Card {
	pub index: usize,
	pub top_left: Point,
	pub height: f64,
	pub name: String,
	pub context: String,
	pub chips: Vec<Chip>,
}

impl Card {
	pub fn layout(index: usize, record: &NarrativeRecord, top_left: Point) -> Self {
		let chips_top = top_left.y + HEADER_HEIGHT + CONTEXT_HEIGHT;
		let chips: Vec<Chip> = record
			.tags
			.iter()
			.enumerate()
			.map(|(row, tag)| Chip {
				tag: tag.name.clone(),
				label: format!("{} ({})", tag.name, weight_label(tag.weight)),
				center: Point::new(
					top_left.x + CARD_WIDTH / 2.0,
					chips_top + row as f64 * CHIP_HEIGHT + CHIP_HEIGHT / 2.0,
				),
			})
			.collect();
		let height = HEADER_HEIGHT + CONTEXT_HEIGHT + chips.len() as f64 * CHIP_HEIGHT + CARD_PADDING;
		Self {
			index,
			top_left,
			height,
			name: record.display_name().to_string(),
			context: record
				.context
				.clone()
				.unwrap_or_else(|| "No context provided".into()),
			chips,
		}
	}

	pub fn center(&self) -> Point {
		Point::new(
			self.top_left.x + CARD_WIDTH / 2.0,
			self.top_left.y + self.height / 2.0,
		)
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.top_left.x
			&& p.x <= self.top_left.x + CARD_WIDTH
			&& p.y >= self.top_left.y
			&& p.y <= self.top_left.y + self.height
	}

	/// Engine input for this card; the first chip of a tag anchors it.
	pub fn entry(&self) -> VisibleEntry {
		let mut tag_anchors = IndexMap::new();
		for chip in &self.chips {
			tag_anchors.entry(chip.tag.clone()).or_insert(chip.center);
		}
		VisibleEntry {
			dataset_index: self.index,
			position: self.center(),
			tag_anchors,
		}
	}
}
