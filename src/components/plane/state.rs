use log::debug;

use crate::graph::{Connections, GridLayout, NarrativeRecord, PlaneConfig, Point, Snapshot, Strategy, connect};

use super::types::Card;

/// Screen distance within which an edge counts as hovered.
pub const EDGE_HIT_TOLERANCE: f64 = 5.0;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub card: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub card_start: Point,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub edge: Option<usize>,
	/// Pointer in screen coordinates, where the tooltip is drawn.
	pub pointer: Point,
}

/// Everything the plane canvas needs between frames.
///
/// Connections are only recomputed from `tick`, once per frame, after
/// something marked the state dirty; intermediate drag positions between two
/// frames are never computed.
pub struct PlaneState {
	pub narratives: Vec<NarrativeRecord>,
	pub visible: Vec<bool>,
	pub cards: Vec<Card>,
	pub connections: Connections,
	pub strategy: Strategy,
	pub threshold: f64,
	pub lines_visible: bool,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub revision: u64,
	stored: Vec<Option<Point>>,
	layout: GridLayout,
	dirty: bool,
}

impl PlaneState {
	pub fn new(narratives: Vec<NarrativeRecord>, config: &PlaneConfig, width: f64, height: f64) -> Self {
		let count = narratives.len();
		let mut state = Self {
			narratives,
			visible: vec![true; count],
			cards: Vec::new(),
			connections: Connections::default(),
			strategy: config.strategy,
			threshold: config.threshold,
			lines_visible: true,
			transform: ViewTransform { x: 0.0, y: 0.0, k: 1.0 },
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			revision: 0,
			stored: vec![None; count],
			layout: config.layout.clone(),
			dirty: true,
		};
		state.recompute();
		state
	}

	fn rebuild_cards(&mut self) {
		let placed = self.layout.arrange(&self.stored, &self.visible, self.width);
		self.cards = placed
			.iter()
			.enumerate()
			.filter_map(|(i, p)| p.map(|top_left| Card::layout(i, &self.narratives[i], top_left)))
			.collect();
	}

	/// Rebuild card geometry and every connection from the current state.
	pub fn recompute(&mut self) {
		self.rebuild_cards();
		let entries: Vec<_> = self.cards.iter().map(Card::entry).collect();
		self.connections = connect(&Snapshot {
			narratives: &self.narratives,
			entries: &entries,
			strategy: self.strategy,
			threshold: self.threshold,
		});
		if self.hover.edge.is_some_and(|e| e >= self.connections.edges.len()) {
			self.hover.edge = None;
		}
		self.revision += 1;
		self.dirty = false;
	}

	pub fn mark_dirty(&mut self) {
		self.dirty = true;
	}

	/// Per-frame update; returns whether connections were recomputed.
	pub fn tick(&mut self) -> bool {
		if !self.dirty {
			return false;
		}
		self.recompute();
		true
	}

	pub fn set_strategy(&mut self, strategy: Strategy) {
		if self.strategy != strategy {
			debug!("Strategy changed - {} -> {}", self.strategy, strategy);
			self.strategy = strategy;
			self.hover.edge = None;
			self.mark_dirty();
		}
	}

	pub fn set_threshold(&mut self, threshold: f64) {
		if self.threshold != threshold {
			self.threshold = threshold;
			if self.strategy.uses_threshold() {
				self.mark_dirty();
			}
		}
	}

	/// Show or hide one narrative; hidden narratives leave the grid and
	/// every strategy's input.
	pub fn set_visible(&mut self, index: usize, shown: bool) {
		let Some(slot) = self.visible.get_mut(index) else {
			return;
		};
		if *slot == shown {
			return;
		}
		*slot = shown;
		if !shown && self.drag.card == Some(index) {
			self.drag.active = false;
			self.drag.card = None;
		}
		self.hover.edge = None;
		self.mark_dirty();
	}

	/// Apply a whole visibility list, one flag per narrative.
	pub fn set_visibility(&mut self, flags: &[bool]) {
		for (index, &shown) in flags.iter().enumerate() {
			self.set_visible(index, shown);
		}
	}

	pub fn set_lines_visible(&mut self, visible: bool) {
		self.lines_visible = visible;
		if !visible {
			self.hover.edge = None;
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Point {
		Point::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Dataset index of the topmost card under a screen position.
	pub fn card_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let p = self.screen_to_graph(sx, sy);
		self.cards.iter().rev().find(|card| card.contains(p)).map(|card| card.index)
	}

	pub fn card(&self, index: usize) -> Option<&Card> {
		self.cards.iter().find(|card| card.index == index)
	}

	/// Store a dragged position for a card.
	pub fn move_card(&mut self, index: usize, top_left: Point) {
		if let Some(slot) = self.stored.get_mut(index) {
			*slot = Some(top_left);
			self.mark_dirty();
		}
	}

	/// Index into `connections.edges` of the edge under a screen position.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		if !self.lines_visible {
			return None;
		}
		let p = self.screen_to_graph(sx, sy);
		let mut best: Option<(usize, f64)> = None;
		for (i, edge) in self.connections.edges.iter().enumerate() {
			let reach = (edge.stroke_width / 2.0).max(EDGE_HIT_TOLERANCE / self.transform.k);
			let d = distance_to_segment(p, edge.a, edge.b);
			if d <= reach && best.is_none_or(|(_, bd)| d < bd) {
				best = Some((i, d));
			}
		}
		best.map(|(i, _)| i)
	}

	pub fn set_hover(&mut self, edge: Option<usize>, pointer: Point) {
		self.hover.edge = edge;
		self.hover.pointer = pointer;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.mark_dirty();
	}
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let len2 = dx * dx + dy * dy;
	let t = if len2 < f64::EPSILON {
		0.0
	} else {
		(((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.x + t * dx, a.y + t * dy);
	((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}
