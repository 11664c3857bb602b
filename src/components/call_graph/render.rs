use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{CallGraphState, Fade, HIGHLIGHT_COLOR, NODE_RADIUS, NodeInfo, START_COLOR};
use crate::traversal::{Mark, NodeShape};

const BACKGROUND: &str = "#ffffff";
const EDGE_COLOR: &str = "#dddddd";
const LABEL_COLOR: &str = "#333333";
const EDGE_WIDTH: f64 = 4.0;
const ARROW_SIZE: f64 = 12.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &CallGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &CallGraphState, ctx: &CanvasRenderingContext2d) {
	state.graph.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let fade = state.edge_fade(edge.user_data.element);
		let (ux, uy) = (dx / dist, dy / dist);

		let stroke = |color: &str, alpha: f64| {
			ctx.set_global_alpha(alpha);
			ctx.set_stroke_style_str(color);
			ctx.set_fill_style_str(color);
			ctx.set_line_width(EDGE_WIDTH);

			ctx.begin_path();
			ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
			ctx.line_to(
				x2 - ux * (NODE_RADIUS + ARROW_SIZE),
				y2 - uy * (NODE_RADIUS + ARROW_SIZE),
			);
			ctx.stroke();

			let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
			let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
			let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		};

		stroke(EDGE_COLOR, 1.0);
		if fade.t > 0.0 {
			stroke(HIGHLIGHT_COLOR, ease_out_cubic(fade.t));
		}
	});

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		for &element in &node.data.user_data.loops {
			draw_self_loop(ctx, x, y, EDGE_COLOR, 1.0);
			let fade = state.edge_fade(element);
			if fade.t > 0.0 {
				draw_self_loop(ctx, x, y, HIGHLIGHT_COLOR, ease_out_cubic(fade.t));
			}
		}
	});
	ctx.set_global_alpha(1.0);
}

/// Loop through the node's top and right boundary points, arrow entering
/// from the right.
fn draw_self_loop(ctx: &CanvasRenderingContext2d, x: f64, y: f64, color: &str, alpha: f64) {
	ctx.set_global_alpha(alpha);
	ctx.set_stroke_style_str(color);
	ctx.set_fill_style_str(color);
	ctx.set_line_width(EDGE_WIDTH);

	let (cx, cy) = (x + NODE_RADIUS, y - NODE_RADIUS);
	ctx.begin_path();
	let _ = ctx.arc(cx, cy, NODE_RADIUS, PI, 0.5 * PI);
	ctx.stroke();

	let (tip_x, tip_y) = (x + NODE_RADIUS, y);
	let back_x = tip_x + ARROW_SIZE;
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x, tip_y - ARROW_SIZE * 0.5);
	ctx.line_to(back_x, tip_y + ARROW_SIZE * 0.5);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(state: &CallGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);

		ctx.set_global_alpha(1.0);
		trace_shape(ctx, info.shape, x, y, NODE_RADIUS);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		let fade = state.node_fade(info.element);
		if fade.t > 0.0 {
			ctx.set_global_alpha(ease_out_cubic(fade.t));
			trace_shape(ctx, info.shape, x, y, NODE_RADIUS);
			ctx.set_fill_style_str(overlay_color(info, fade));
			ctx.fill();
			ctx.set_global_alpha(1.0);
		}

		if let Some(label) = &info.label {
			ctx.set_fill_style_str(LABEL_COLOR);
			ctx.set_font(&format!("{}px sans-serif", 12.0 / k.max(0.5)));
			ctx.set_text_align("center");
			let _ = ctx.fill_text(label, x, y - NODE_RADIUS - 5.0);
		}
	});
	ctx.set_text_align("start");
}

fn overlay_color(info: &NodeInfo, fade: Fade) -> &str {
	match fade.mark {
		Mark::Start => START_COLOR,
		_ => &info.highlight_color,
	}
}

fn trace_shape(ctx: &CanvasRenderingContext2d, shape: NodeShape, x: f64, y: f64, r: f64) {
	ctx.begin_path();
	match shape {
		NodeShape::Ellipse => {
			let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		}
		NodeShape::Rectangle => ctx.rect(x - r, y - r, 2.0 * r, 2.0 * r),
		NodeShape::Triangle => {
			ctx.move_to(x, y - r);
			ctx.line_to(x + r, y + r);
			ctx.line_to(x - r, y + r);
			ctx.close_path();
		}
		NodeShape::Diamond => {
			ctx.move_to(x, y - r);
			ctx.line_to(x + r, y);
			ctx.line_to(x, y + r);
			ctx.line_to(x - r, y);
			ctx.close_path();
		}
	}
}
