use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::layout;
use crate::traversal::{CallGraph, ElementRef, HighlightConfig, Highlighter, Mark, NodeShape};

pub const NODE_RADIUS: f64 = 15.0;
pub const HIT_RADIUS: f64 = 17.0;
/// Screen pixels a press may travel and still count as a tap.
pub const TAP_SLOP: f64 = 4.0;

pub const DEFAULT_NODE_COLOR: &str = "#999999";
pub const ARTIFACT_NODE_COLOR: &str = "#FF0000";
pub const HIGHLIGHT_COLOR: &str = "#61bffc";
pub const START_COLOR: &str = "#00FF00";

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub element: usize,
	pub label: Option<String>,
	pub color: String,
	pub highlight_color: String,
	pub shape: NodeShape,
	/// Self-loop edges, drawn at the node instead of being simulated.
	pub loops: Vec<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub element: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Fade of one element toward the color of its latest mark.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Fade {
	pub mark: Mark,
	pub t: f64,
}

impl Fade {
	fn step(&mut self, current: Mark, dt: f64, transition: f64) {
		let rate = if transition > 0.0 { dt / transition } else { 1.0 };
		if current == Mark::Unmarked {
			self.t = (self.t - rate).max(0.0);
		} else {
			// a switch between start and highlighted restarts the fade
			if current != self.mark {
				self.mark = current;
				self.t = 0.0;
			}
			self.t = (self.t + rate).min(1.0);
		}
	}
}

pub struct CallGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub highlighter: Highlighter,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	node_fades: Vec<Fade>,
	edge_fades: Vec<Fade>,
}

impl CallGraphState {
	pub fn new(
		call_graph: CallGraph,
		config: HighlightConfig,
		width: f64,
		height: f64,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 1200.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let layers = layout::layers(&call_graph, 0);
		let positions = layout::seed_positions(&layers, 0.0, 0.0);
		let mut handles = Vec::with_capacity(call_graph.nodes().len());

		let mut loops = vec![Vec::new(); call_graph.nodes().len()];
		for (element, edge) in call_graph.edges().iter().enumerate() {
			if edge.source == edge.target {
				loops[edge.source].push(element);
			}
		}

		let nodes = call_graph.nodes().iter().zip(&positions).zip(loops);
		for (element, ((node, &(x, y)), loops)) in nodes.enumerate() {
			let color = node.color.clone().unwrap_or_else(|| {
				if node.is_artifact() {
					ARTIFACT_NODE_COLOR.into()
				} else {
					DEFAULT_NODE_COLOR.into()
				}
			});
			let highlight_color = node
				.color_highlight
				.clone()
				.unwrap_or_else(|| HIGHLIGHT_COLOR.into());

			handles.push(graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					element,
					label: node.label.clone(),
					color,
					highlight_color,
					shape: node.shape,
					loops,
				},
			}));
		}

		// the layout simulation cannot hold an edge from a node to itself
		let linking = call_graph
			.edges()
			.iter()
			.enumerate()
			.filter(|(_, e)| e.source != e.target);
		for (element, edge) in linking {
			if let (Some(&src), Some(&tgt)) =
				(handles.get(edge.source), handles.get(edge.target))
			{
				graph.add_edge(src, tgt, EdgeData {
					user_data: EdgeInfo { element },
				});
			}
		}

		Self {
			graph,
			node_fades: vec![Fade::default(); call_graph.nodes().len()],
			edge_fades: vec![Fade::default(); call_graph.edges().len()],
			highlighter: Highlighter::new(call_graph, config),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Call graph node index behind a layout node.
	pub fn element_of(&self, idx: DefaultNodeIdx) -> Option<usize> {
		let mut element = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				element = Some(node.data.user_data.element);
			}
		});
		element
	}

	pub fn node_fade(&self, element: usize) -> Fade {
		self.node_fades.get(element).copied().unwrap_or_default()
	}

	pub fn edge_fade(&self, element: usize) -> Fade {
		self.edge_fades.get(element).copied().unwrap_or_default()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);

		let transition = self.highlighter.config().transition.as_secs_f64();
		let dt = dt as f64;
		for (idx, fade) in self.node_fades.iter_mut().enumerate() {
			fade.step(self.highlighter.mark(ElementRef::Node(idx)), dt, transition);
		}
		for (idx, fade) in self.edge_fades.iter_mut().enumerate() {
			fade.step(self.highlighter.mark(ElementRef::Edge(idx)), dt, transition);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
