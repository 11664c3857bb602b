use std::collections::VecDeque;

use crate::traversal::CallGraph;

pub const LAYER_SPACING: f64 = 90.0;
pub const NODE_SPACING: f64 = 70.0;

/// Depth of every node below `root`, following outgoing edges. Nodes the
/// walk never reaches go one layer below the deepest reached one.
pub fn layers(graph: &CallGraph, root: usize) -> Vec<usize> {
	let count = graph.nodes().len();
	let mut depth = vec![None; count];
	if root >= count {
		return vec![0; count];
	}

	let mut queue = VecDeque::from([root]);
	depth[root] = Some(0);
	while let Some(node) = queue.pop_front() {
		let next_depth = depth[node].map_or(0, |d| d + 1);
		for &edge in graph.traversable_edges(node, true) {
			if let Some(next) = graph.opposite(edge, node) {
				if depth[next].is_none() {
					depth[next] = Some(next_depth);
					queue.push_back(next);
				}
			}
		}
	}

	let orphan_layer = depth.iter().flatten().max().map_or(0, |d| d + 1);
	depth.into_iter().map(|d| d.unwrap_or(orphan_layer)).collect()
}

/// Starting positions: one row per layer, rows centered on `(cx, cy)`.
pub fn seed_positions(layers: &[usize], cx: f64, cy: f64) -> Vec<(f32, f32)> {
	let Some(&deepest) = layers.iter().max() else {
		return Vec::new();
	};
	let mut widths = vec![0usize; deepest + 1];
	for &layer in layers {
		widths[layer] += 1;
	}

	let top = cy - deepest as f64 * LAYER_SPACING / 2.0;
	let mut placed = vec![0usize; deepest + 1];
	layers
		.iter()
		.map(|&layer| {
			let slot = placed[layer];
			placed[layer] += 1;
			let left = cx - (widths[layer] - 1) as f64 * NODE_SPACING / 2.0;
			(
				(left + slot as f64 * NODE_SPACING) as f32,
				(top + layer as f64 * LAYER_SPACING) as f32,
			)
		})
		.collect()
}
