use std::collections::VecDeque;

use super::graph::{CallGraph, ElementRef};

/// Which edges a traversal path contains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeCoverage {
	/// Only the edge each node was discovered through.
	TreeOnly,
	/// Every traversable edge of every visited node.
	#[default]
	All,
}

/// How [`breadth_first`] walks the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraversalOptions {
	/// Follow outgoing edges only.
	pub directed: bool,
	/// Which edges end up in the path.
	pub edges: EdgeCoverage,
}

impl Default for TraversalOptions {
	fn default() -> Self {
		Self {
			directed: true,
			edges: EdgeCoverage::default(),
		}
	}
}

/// Breadth-first path from `root` over nodes and edges.
///
/// A dequeued node is preceded by the edge that discovered it. With
/// [`EdgeCoverage::All`] its remaining traversable edges follow it. Each
/// element appears at most once; an unknown root yields an empty path.
pub fn breadth_first(
	graph: &CallGraph,
	root: usize,
	options: TraversalOptions,
) -> Vec<ElementRef> {
	let mut path = Vec::new();
	if graph.node(root).is_none() {
		return path;
	}

	let mut visited = vec![false; graph.nodes().len()];
	let mut emitted = vec![false; graph.edges().len()];
	let mut queue = VecDeque::from([(root, None)]);
	visited[root] = true;

	while let Some((node, via)) = queue.pop_front() {
		if let Some(edge) = via {
			path.push(ElementRef::Edge(edge));
		}
		path.push(ElementRef::Node(node));

		let mut extra = Vec::new();
		for &edge in graph.traversable_edges(node, options.directed) {
			if emitted[edge] {
				continue;
			}
			let Some(next) = graph.opposite(edge, node) else {
				continue;
			};
			if !visited[next] {
				visited[next] = true;
				emitted[edge] = true;
				queue.push_back((next, Some(edge)));
			} else if options.edges == EdgeCoverage::All {
				emitted[edge] = true;
				extra.push(ElementRef::Edge(edge));
			}
		}
		path.extend(extra);
	}

	path
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::traversal::elements::{EdgeElement, GraphElements, NodeElement};

	fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> CallGraph {
		let elements = GraphElements {
			nodes: nodes.iter().map(|id| NodeElement::new(*id)).collect(),
			edges: edges
				.iter()
				.map(|(s, t)| EdgeElement::new(format!("{s}{t}"), *s, *t))
				.collect(),
		};
		CallGraph::from_elements(&elements).unwrap()
	}

	fn sample() -> CallGraph {
		graph(
			&["a", "b", "c", "d", "e"],
			&[
				("a", "e"),
				("a", "b"),
				("b", "e"),
				("b", "c"),
				("c", "e"),
				("c", "d"),
				("d", "e"),
			],
		)
	}

	fn ids(graph: &CallGraph, path: &[ElementRef]) -> Vec<String> {
		path.iter()
			.map(|el| graph.element_id(*el).unwrap().to_string())
			.collect()
	}

	#[test]
	fn sample_graph_all_edges() {
		let g = sample();
		let path = breadth_first(&g, 0, TraversalOptions::default());
		assert_eq!(
			ids(&g, &path),
			["a", "ae", "e", "ab", "b", "be", "bc", "c", "ce", "cd", "d", "de"]
		);
	}

	#[test]
	fn sample_graph_tree_edges() {
		let g = sample();
		let options = TraversalOptions {
			edges: EdgeCoverage::TreeOnly,
			..Default::default()
		};
		let path = breadth_first(&g, 0, options);
		assert_eq!(
			ids(&g, &path),
			["a", "ae", "e", "ab", "b", "bc", "c", "cd", "d"]
		);
	}

	#[test]
	fn covers_reachable_elements_exactly_once() {
		let g = sample();
		for root in 0..g.nodes().len() {
			let path = breadth_first(&g, root, TraversalOptions::default());
			assert_eq!(path[0], ElementRef::Node(root));
			let unique: HashSet<_> = path.iter().collect();
			assert_eq!(unique.len(), path.len());
		}
		let from_a = breadth_first(&g, 0, TraversalOptions::default());
		assert_eq!(from_a.len(), g.nodes().len() + g.edges().len());
	}

	#[test]
	fn directed_walk_stops_at_sinks() {
		let g = sample();
		let path = breadth_first(&g, 4, TraversalOptions::default());
		assert_eq!(path, vec![ElementRef::Node(4)]);
	}

	#[test]
	fn undirected_walk_follows_incoming_edges() {
		let g = sample();
		let options = TraversalOptions {
			directed: false,
			..Default::default()
		};
		let path = breadth_first(&g, 4, options);
		assert_eq!(path.len(), g.nodes().len() + g.edges().len());
		assert_eq!(ids(&g, &path)[..5], ["e", "ae", "a", "ab", "be"]);
	}

	#[test]
	fn unreachable_nodes_are_left_out() {
		let g = graph(&["a", "b", "x"], &[("a", "b")]);
		let path = breadth_first(&g, 0, TraversalOptions::default());
		assert_eq!(ids(&g, &path), ["a", "ab", "b"]);
	}

	#[test]
	fn self_loops_and_parallel_edges() {
		let elements = GraphElements {
			nodes: vec![NodeElement::new("a"), NodeElement::new("b")],
			edges: vec![
				EdgeElement::new("loop", "a", "a"),
				EdgeElement::new("ab1", "a", "b"),
				EdgeElement::new("ab2", "a", "b"),
			],
		};
		let g = CallGraph::from_elements(&elements).unwrap();
		let path = breadth_first(&g, 0, TraversalOptions::default());
		assert_eq!(ids(&g, &path), ["a", "loop", "ab2", "ab1", "b"]);
	}

	#[test]
	fn unknown_root_or_empty_graph_yields_nothing() {
		assert!(breadth_first(&sample(), 99, TraversalOptions::default()).is_empty());
		assert!(breadth_first(&CallGraph::default(), 0, TraversalOptions::default()).is_empty());
	}
}
