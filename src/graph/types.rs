//! Data shapes shared by the engine and the canvas.

use std::fmt;

use indexmap::IndexMap;

/// A point on the plane, in plane (not screen) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Halfway between `self` and `other`.
	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}
}

/// A single weighted tag as it appears in a narrative's tag list.
///
/// `weight` is `None` when the source value was not a number at all.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
	/// Tag label; equal names are the same tag.
	pub name: String,
	/// Salience weight after coercion.
	pub weight: Option<f64>,
}

impl Tag {
	/// Tag with a numeric weight.
	pub fn new(name: impl Into<String>, weight: f64) -> Self {
		Self {
			name: name.into(),
			weight: Some(weight),
		}
	}

	/// The weight if it takes part in scoring (strictly positive).
	pub fn effective_weight(&self) -> Option<f64> {
		self.weight.filter(|w| *w > 0.0)
	}
}

/// A tagged narrative record, owned by the dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NarrativeRecord {
	/// Title, if the source had a string one.
	pub name: Option<String>,
	/// Free-text context shown under the title.
	pub context: Option<String>,
	/// Tags in source order; names may repeat.
	pub tags: Vec<Tag>,
}

impl NarrativeRecord {
	/// Named record without context.
	pub fn new(name: impl Into<String>, tags: Vec<Tag>) -> Self {
		Self {
			name: Some(name.into()),
			context: None,
			tags,
		}
	}

	/// Name for display, `"Untitled"` when missing or empty.
	pub fn display_name(&self) -> &str {
		match self.name.as_deref() {
			Some(name) if !name.is_empty() => name,
			_ => "Untitled",
		}
	}
}

/// A narrative currently placed on the plane.
///
/// `tag_anchors` optionally maps tag names to the on-screen location of that
/// tag's chip; tag-anchored links use them when present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibleEntry {
	/// Index of the narrative in the dataset.
	pub dataset_index: usize,
	/// Where the narrative sits on the plane.
	pub position: Point,
	/// Chip location per tag name.
	pub tag_anchors: IndexMap<String, Point>,
}

impl VisibleEntry {
	/// Entry without chip anchors.
	pub fn new(dataset_index: usize, position: Point) -> Self {
		Self {
			dataset_index,
			position,
			tag_anchors: IndexMap::new(),
		}
	}
}

/// A graph node derived from one visible narrative.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Index of the narrative in the source dataset.
	pub index: usize,
	/// Position of the visible entry.
	pub position: Point,
	/// Tag name to weight, insertion ordered, only weights > 0.
	pub tag_weights: IndexMap<String, f64>,
	/// Name used in tooltips.
	pub display_name: String,
}

impl Node {
	/// Weight of `tag` on this node, if it carries it.
	pub fn weight(&self, tag: &str) -> Option<f64> {
		self.tag_weights.get(tag).copied()
	}
}

/// A scored relationship between two nodes, referenced by build order.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// First endpoint, always the earlier node.
	pub a: usize,
	/// Second endpoint.
	pub b: usize,
	/// Strategy-specific pair score.
	pub score: f64,
	/// Shared tag names in the first node's tag order.
	pub shared_tags: Vec<String>,
}

/// Stroke colour of a visual edge, rendered as CSS.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
	/// `hsl(h, s%, l%)`
	Hsl {
		/// Degrees, 0 to 359.
		hue: u32,
		/// Percent.
		saturation: u8,
		/// Percent.
		lightness: u8,
	},
	/// `rgba(r,g,b,a)`
	Rgba {
		/// Red channel.
		r: u8,
		/// Green channel.
		g: u8,
		/// Blue channel.
		b: u8,
		/// Opacity, 0 to 1.
		a: f64,
	},
	/// A CSS colour keyword.
	Named(&'static str),
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Color::Hsl {
				hue,
				saturation,
				lightness,
			} => write!(f, "hsl({hue}, {saturation}%, {lightness}%)"),
			Color::Rgba { r, g, b, a } => write!(f, "rgba({r},{g},{b},{a})"),
			Color::Named(name) => f.write_str(name),
		}
	}
}

/// What produced a visual edge; lets the renderer style families of edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
	/// Tag-anchored link between two occurrences of one tag.
	TagLink,
	/// Direct node-to-node edge.
	Pair,
	/// The stepwise seed edge.
	Seed,
	/// Stepwise expansion edge drawn from the seed midpoint.
	SecondOrder,
}

/// Rendering-ready edge record.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualEdge {
	/// Start of the line.
	pub a: Point,
	/// End of the line.
	pub b: Point,
	/// Stroke colour.
	pub color: Color,
	/// Stroke width in plane units.
	pub stroke_width: f64,
	/// Multi-line hover text.
	pub tooltip: String,
	/// Edge family.
	pub kind: EdgeKind,
}
