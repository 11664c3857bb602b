//! Indexed call graph that traversal and drawing run over.

use std::collections::{HashMap, HashSet};

use log::warn;

use super::elements::GraphElements;
use super::error::GraphError;

/// A node or edge, by position in [`CallGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementRef {
	/// Index into [`CallGraph::nodes`].
	Node(usize),
	/// Index into [`CallGraph::edges`].
	Edge(usize),
}

/// Drawing shape of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeShape {
	/// Circle; the default.
	#[default]
	Ellipse,
	/// Square, also used for round rectangles.
	Rectangle,
	/// Upward triangle.
	Triangle,
	/// Square rotated by 45 degrees.
	Diamond,
}

impl NodeShape {
	/// Shape from its attribute name. Unknown names draw as ellipses.
	pub fn from_name(name: &str) -> Self {
		match name.to_ascii_lowercase().as_str() {
			"rectangle" | "roundrectangle" | "square" => Self::Rectangle,
			"triangle" => Self::Triangle,
			"diamond" => Self::Diamond,
			_ => Self::Ellipse,
		}
	}
}

/// A validated node.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique element id.
	pub id: String,
	/// Display label.
	pub label: Option<String>,
	/// The `type` attribute.
	pub node_type: Option<String>,
	/// Fill color.
	pub color: Option<String>,
	/// Fill color while highlighted.
	pub color_highlight: Option<String>,
	/// Drawing shape.
	pub shape: NodeShape,
}

impl GraphNode {
	/// Use case and test case nodes are artifacts linked to the code, not code.
	pub fn is_artifact(&self) -> bool {
		matches!(self.node_type.as_deref(), Some("UseCase" | "TestCase"))
	}
}

/// A validated edge whose endpoints are node indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// Unique element id.
	pub id: String,
	/// Index of the calling node.
	pub source: usize,
	/// Index of the called node.
	pub target: usize,
}

/// Validated graph with adjacency lists in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallGraph {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	index: HashMap<String, usize>,
	outgoing: Vec<Vec<usize>>,
	incident: Vec<Vec<usize>>,
}

impl CallGraph {
	/// Build the graph, rejecting empty or duplicate ids. Edges pointing at
	/// unknown nodes are dropped with a warning.
	pub fn from_elements(elements: &GraphElements) -> Result<Self, GraphError> {
		let mut graph = Self::default();
		let mut seen = HashSet::new();

		for element in &elements.nodes {
			let data = &element.data;
			if data.id.is_empty() {
				return Err(GraphError::EmptyId("node"));
			}
			if !seen.insert(data.id.as_str()) {
				return Err(GraphError::DuplicateId(data.id.clone()));
			}
			graph.index.insert(data.id.clone(), graph.nodes.len());
			graph.nodes.push(GraphNode {
				id: data.id.clone(),
				label: data.label.clone(),
				node_type: data.node_type.clone(),
				color: data.color.clone(),
				color_highlight: data.color_highlight.clone(),
				shape: data.shape.as_deref().map(NodeShape::from_name).unwrap_or_default(),
			});
		}
		graph.outgoing = vec![Vec::new(); graph.nodes.len()];
		graph.incident = vec![Vec::new(); graph.nodes.len()];

		for element in &elements.edges {
			let data = &element.data;
			if data.id.is_empty() {
				return Err(GraphError::EmptyId("edge"));
			}
			if !seen.insert(data.id.as_str()) {
				return Err(GraphError::DuplicateId(data.id.clone()));
			}
			let (Some(&source), Some(&target)) =
				(graph.index.get(&data.source), graph.index.get(&data.target))
			else {
				warn!(
					"skipping edge `{}`: unknown endpoint in {} -> {}",
					data.id, data.source, data.target
				);
				continue;
			};

			let idx = graph.edges.len();
			graph.outgoing[source].push(idx);
			graph.incident[source].push(idx);
			if target != source {
				graph.incident[target].push(idx);
			}
			graph.edges.push(GraphEdge {
				id: data.id.clone(),
				source,
				target,
			});
		}

		Ok(graph)
	}

	/// Nodes in input order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Kept edges in input order.
	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	/// Node at `idx`.
	pub fn node(&self, idx: usize) -> Option<&GraphNode> {
		self.nodes.get(idx)
	}

	/// Edge at `idx`.
	pub fn edge(&self, idx: usize) -> Option<&GraphEdge> {
		self.edges.get(idx)
	}

	/// Index of the node with this id.
	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Id of a node or edge.
	pub fn element_id(&self, element: ElementRef) -> Option<&str> {
		match element {
			ElementRef::Node(idx) => self.node(idx).map(|n| n.id.as_str()),
			ElementRef::Edge(idx) => self.edge(idx).map(|e| e.id.as_str()),
		}
	}

	/// Edges a walk may leave `node` by: outgoing only when `directed`,
	/// otherwise every incident edge.
	pub fn traversable_edges(&self, node: usize, directed: bool) -> &[usize] {
		let lists = if directed { &self.outgoing } else { &self.incident };
		lists.get(node).map(Vec::as_slice).unwrap_or(&[])
	}

	/// The endpoint of `edge` that is not `from`. Self-loops return `from`.
	pub fn opposite(&self, edge: usize, from: usize) -> Option<usize> {
		self.edge(edge)
			.map(|e| if e.source == from { e.target } else { e.source })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::traversal::elements::{EdgeElement, NodeElement};

	fn elements(nodes: &[&str], edges: &[(&str, &str, &str)]) -> GraphElements {
		GraphElements {
			nodes: nodes.iter().map(|id| NodeElement::new(*id)).collect(),
			edges: edges
				.iter()
				.map(|(id, s, t)| EdgeElement::new(*id, *s, *t))
				.collect(),
		}
	}

	#[test]
	fn builds_adjacency_in_input_order() {
		let graph = CallGraph::from_elements(&elements(
			&["a", "b", "c"],
			&[("ab", "a", "b"), ("ca", "c", "a"), ("ac", "a", "c")],
		))
		.unwrap();

		assert_eq!(graph.traversable_edges(0, true), &[0, 2]);
		assert_eq!(graph.traversable_edges(0, false), &[0, 1, 2]);
		assert_eq!(graph.traversable_edges(2, true), &[1]);
		assert_eq!(graph.opposite(1, 0), Some(2));
		assert_eq!(graph.element_id(ElementRef::Edge(2)), Some("ac"));
	}

	#[test]
	fn self_loop_is_incident_once() {
		let graph =
			CallGraph::from_elements(&elements(&["a"], &[("aa", "a", "a")])).unwrap();
		assert_eq!(graph.traversable_edges(0, false), &[0]);
		assert_eq!(graph.opposite(0, 0), Some(0));
	}

	#[test]
	fn drops_edges_with_unknown_endpoints() {
		let graph = CallGraph::from_elements(&elements(
			&["a", "b"],
			&[("ax", "a", "x"), ("ab", "a", "b")],
		))
		.unwrap();
		assert_eq!(graph.edges().len(), 1);
		assert_eq!(graph.edges()[0].id, "ab");
		assert_eq!(graph.traversable_edges(0, true), &[0]);
	}

	#[test]
	fn rejects_duplicate_ids_across_nodes_and_edges() {
		let err = CallGraph::from_elements(&elements(&["a", "b"], &[("a", "a", "b")]))
			.unwrap_err();
		assert!(matches!(err, GraphError::DuplicateId(id) if id == "a"));

		let err = CallGraph::from_elements(&elements(&["a", "a"], &[])).unwrap_err();
		assert!(matches!(err, GraphError::DuplicateId(_)));
	}

	#[test]
	fn rejects_empty_ids() {
		let err = CallGraph::from_elements(&elements(&[""], &[])).unwrap_err();
		assert!(matches!(err, GraphError::EmptyId("node")));
	}

	#[test]
	fn reads_shapes_and_artifact_types() {
		let mut input = elements(&["m", "uc"], &[]);
		input.nodes[0].data.shape = Some("Rectangle".into());
		input.nodes[1] = NodeElement::new("uc").with_type("UseCase");
		let graph = CallGraph::from_elements(&input).unwrap();

		assert_eq!(graph.nodes()[0].shape, NodeShape::Rectangle);
		assert!(!graph.nodes()[0].is_artifact());
		assert_eq!(graph.nodes()[1].shape, NodeShape::Ellipse);
		assert!(graph.nodes()[1].is_artifact());
	}
}
