//! Grid auto-placement of narrative cards.

use serde::Deserialize;

use super::types::Point;

/// Auto-placement grid for narratives that have not been dragged yet.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridLayout {
	/// Cards per row.
	pub columns: usize,
	/// Card width.
	pub entry_width: f64,
	/// Gap between columns.
	pub horizontal_spacing: f64,
	/// Distance between row tops.
	pub vertical_spacing: f64,
	/// Top of the first row.
	pub start_y: f64,
	/// Rows wrap back to the top after this many.
	pub rows: usize,
}

impl Default for GridLayout {
	fn default() -> Self {
		Self {
			columns: 4,
			entry_width: 300.0,
			horizontal_spacing: 50.0,
			vertical_spacing: 150.0,
			start_y: 50.0,
			rows: 5,
		}
	}
}

impl GridLayout {
	/// Total width of a full row.
	pub fn grid_width(&self) -> f64 {
		self.columns as f64 * (self.entry_width + self.horizontal_spacing) - self.horizontal_spacing
	}

	/// Top-left corner of the `slot`-th visible entry in a container of
	/// `container_width`.
	pub fn place(&self, slot: usize, container_width: f64) -> Point {
		let columns = self.columns.max(1);
		let rows = self.rows.max(1);
		let start_x = ((container_width - self.grid_width()) / 2.0).max(0.0);
		let (col, row) = (slot % columns, slot / columns);
		Point::new(
			start_x + col as f64 * (self.entry_width + self.horizontal_spacing),
			self.start_y + (row % rows) as f64 * self.vertical_spacing,
		)
	}

	/// Positions for every visible narrative: stored ones win, the rest are
	/// placed on the grid in dataset order.
	pub fn arrange(&self, stored: &[Option<Point>], visible: &[bool], container_width: f64) -> Vec<Option<Point>> {
		let mut slot = 0;
		visible
			.iter()
			.enumerate()
			.map(|(i, &shown)| {
				if !shown {
					return None;
				}
				let placed = stored
					.get(i)
					.copied()
					.flatten()
					.unwrap_or_else(|| self.place(slot, container_width));
				slot += 1;
				Some(placed)
			})
			.collect()
	}
}
