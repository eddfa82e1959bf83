use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::graph::EdgeKind;

use super::state::PlaneState;
use super::types::{CARD_PADDING, CARD_WIDTH, CHIP_HEIGHT, CONTEXT_HEIGHT, Card, HEADER_HEIGHT};

const BACKGROUND: &str = "#1a1a2e";
const TOOLTIP_LINE_HEIGHT: f64 = 16.0;

pub fn render(state: &PlaneState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	for card in &state.cards {
		draw_card(state, card, ctx);
	}
	if state.lines_visible {
		draw_edges(state, ctx);
	}
	ctx.restore();
	draw_tooltip(state, ctx);
}

fn draw_card(state: &PlaneState, card: &Card, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (x, y) = (card.top_left.x, card.top_left.y);
	let dragging = state.drag.active && state.drag.card == Some(card.index);

	ctx.set_fill_style_str(if dragging { "#2e2e52" } else { "#24243e" });
	ctx.fill_rect(x, y, CARD_WIDTH, card.height);
	ctx.set_stroke_style_str("rgba(100, 180, 255, 0.6)");
	ctx.set_line_width(1.0 / k);
	ctx.stroke_rect(x, y, CARD_WIDTH, card.height);

	ctx.set_fill_style_str("white");
	ctx.set_font("bold 13px sans-serif");
	let _ = ctx.fill_text_with_max_width(
		&card.name,
		x + CARD_PADDING,
		y + HEADER_HEIGHT - 10.0,
		CARD_WIDTH - 2.0 * CARD_PADDING,
	);

	ctx.set_fill_style_str("rgba(255, 255, 255, 0.6)");
	ctx.set_font("11px sans-serif");
	let _ = ctx.fill_text_with_max_width(
		&card.context,
		x + CARD_PADDING,
		y + HEADER_HEIGHT + CONTEXT_HEIGHT - 8.0,
		CARD_WIDTH - 2.0 * CARD_PADDING,
	);

	ctx.set_font("11px sans-serif");
	for chip in &card.chips {
		let top = chip.center.y - CHIP_HEIGHT / 2.0;
		ctx.set_fill_style_str("rgba(100, 180, 255, 0.15)");
		ctx.fill_rect(x + CARD_PADDING, top + 2.0, CARD_WIDTH - 2.0 * CARD_PADDING, CHIP_HEIGHT - 4.0);
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.85)");
		let _ = ctx.fill_text(&chip.label, x + 2.0 * CARD_PADDING, chip.center.y + 4.0);
	}
}

fn draw_edges(state: &PlaneState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let dash = js_sys::Array::of2(&JsValue::from_f64(8.0 / k), &JsValue::from_f64(4.0 / k));

	for (i, edge) in state.connections.edges.iter().enumerate() {
		let hovered = state.hover.edge == Some(i);
		ctx.set_stroke_style_str(&edge.color.to_string());
		ctx.set_line_width(if hovered {
			edge.stroke_width + 2.0 / k
		} else {
			edge.stroke_width
		});
		if edge.kind == EdgeKind::SecondOrder {
			let _ = ctx.set_line_dash(&dash);
		}
		ctx.begin_path();
		ctx.move_to(edge.a.x, edge.a.y);
		ctx.line_to(edge.b.x, edge.b.y);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}
}

fn draw_tooltip(state: &PlaneState, ctx: &CanvasRenderingContext2d) {
	let Some(edge) = state.hover.edge.and_then(|i| state.connections.edges.get(i)) else {
		return;
	};
	let lines: Vec<&str> = edge.tooltip.lines().collect();
	ctx.set_font("12px sans-serif");
	let text_width = lines
		.iter()
		.filter_map(|line| ctx.measure_text(line).ok())
		.map(|m| m.width())
		.fold(0.0, f64::max);

	let (w, h) = (
		text_width + 16.0,
		lines.len() as f64 * TOOLTIP_LINE_HEIGHT + 12.0,
	);
	// keep the box on screen
	let x = (state.hover.pointer.x + 12.0).min(state.width - w).max(0.0);
	let y = (state.hover.pointer.y + 12.0).min(state.height - h).max(0.0);

	ctx.set_fill_style_str("rgba(0, 0, 0, 0.8)");
	ctx.fill_rect(x, y, w, h);
	ctx.set_fill_style_str("white");
	for (row, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, x + 8.0, y + 6.0 + (row as f64 + 1.0) * TOOLTIP_LINE_HEIGHT - 4.0);
	}
}
