//! Highlight state and staged reveal of a traversal path.
//!
//! The [`Highlighter`] is the only writer of element marks. A traversal is
//! started with [`Highlighter::begin`], which hands out a [`SequenceToken`];
//! each later [`Highlighter::reveal_next`] call must present that token, so a
//! timer left over from an older sequence can no longer change any mark.

use std::time::Duration;

use super::bfs::{EdgeCoverage, TraversalOptions, breadth_first};
use super::graph::{CallGraph, ElementRef, GraphNode};

/// Highlight marker of one element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mark {
	/// Not part of the latest traversal, or not revealed yet.
	#[default]
	Unmarked,
	/// Where the latest traversal began.
	Start,
	/// Revealed by the latest traversal.
	Highlighted,
}

/// Decides which tapped nodes start a traversal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Eligibility {
	/// Every node.
	#[default]
	AnyNode,
	/// Only nodes whose `type` attribute equals this value.
	NodeType(String),
}

impl Eligibility {
	/// Whether a tap on `node` may start a traversal.
	pub fn permits(&self, node: &GraphNode) -> bool {
		match self {
			Self::AnyNode => true,
			Self::NodeType(kind) => node.node_type.as_deref() == Some(kind.as_str()),
		}
	}
}

/// Traversal and reveal settings.
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightConfig {
	/// Nodes that start a traversal when tapped.
	pub eligibility: Eligibility,
	/// Follow outgoing edges only.
	pub directed: bool,
	/// Which edges the path contains.
	pub edges: EdgeCoverage,
	/// Delay between two reveals.
	pub interval: Duration,
	/// Duration of the color fade when a mark changes.
	pub transition: Duration,
}

impl Default for HighlightConfig {
	fn default() -> Self {
		Self {
			eligibility: Eligibility::AnyNode,
			directed: true,
			edges: EdgeCoverage::All,
			interval: Duration::from_millis(100),
			transition: Duration::from_millis(500),
		}
	}
}

impl HighlightConfig {
	fn traversal(&self) -> TraversalOptions {
		TraversalOptions {
			directed: self.directed,
			edges: self.edges,
		}
	}
}

/// Identifies one reveal sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceToken(u64);

/// Outcome of one reveal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reveal {
	/// This element was just highlighted; more may follow.
	Marked(ElementRef),
	/// The path is exhausted.
	Finished,
	/// The token no longer belongs to the running sequence.
	Stale,
}

/// Owns the marks of every element of one call graph.
pub struct Highlighter {
	graph: CallGraph,
	config: HighlightConfig,
	node_marks: Vec<Mark>,
	edge_marks: Vec<Mark>,
	path: Vec<ElementRef>,
	cursor: usize,
	generation: u64,
	running: Option<SequenceToken>,
}

impl Highlighter {
	/// Highlighter with every element unmarked.
	pub fn new(graph: CallGraph, config: HighlightConfig) -> Self {
		Self {
			node_marks: vec![Mark::Unmarked; graph.nodes().len()],
			edge_marks: vec![Mark::Unmarked; graph.edges().len()],
			graph,
			config,
			path: Vec::new(),
			cursor: 0,
			generation: 0,
			running: None,
		}
	}

	/// The graph being highlighted.
	pub fn graph(&self) -> &CallGraph {
		&self.graph
	}

	/// Settings in use.
	pub fn config(&self) -> &HighlightConfig {
		&self.config
	}

	/// Start a traversal at `node`.
	///
	/// Returns `None`, leaving every mark untouched, when the node is unknown
	/// or not eligible. Otherwise clears all marks, marks `node` as the start,
	/// computes the path and invalidates any earlier token.
	pub fn begin(&mut self, node: usize) -> Option<SequenceToken> {
		let eligible = self
			.graph
			.node(node)
			.is_some_and(|n| self.config.eligibility.permits(n));
		if !eligible {
			return None;
		}

		self.clear_marks();
		self.set_mark(ElementRef::Node(node), Mark::Start);
		self.path = breadth_first(&self.graph, node, self.config.traversal());
		self.cursor = 0;

		self.generation = self.generation.wrapping_add(1);
		let token = SequenceToken(self.generation);
		self.running = Some(token);
		Some(token)
	}

	/// Highlight the next element of the running sequence.
	pub fn reveal_next(&mut self, token: SequenceToken) -> Reveal {
		if self.running != Some(token) {
			return Reveal::Stale;
		}
		match self.path.get(self.cursor).copied() {
			Some(element) => {
				self.set_mark(element, Mark::Highlighted);
				self.cursor += 1;
				Reveal::Marked(element)
			}
			None => {
				self.running = None;
				Reveal::Finished
			}
		}
	}

	/// Stop the running sequence. Marks already applied stay.
	pub fn cancel(&mut self) {
		self.running = None;
	}

	/// Whether a sequence is still revealing.
	pub fn is_running(&self) -> bool {
		self.running.is_some()
	}

	/// Current mark of `element`; unknown elements read as unmarked.
	pub fn mark(&self, element: ElementRef) -> Mark {
		match element {
			ElementRef::Node(idx) => self.node_marks.get(idx),
			ElementRef::Edge(idx) => self.edge_marks.get(idx),
		}
		.copied()
		.unwrap_or_default()
	}

	/// The start node of the latest traversal.
	pub fn start(&self) -> Option<usize> {
		self.node_marks.iter().position(|m| *m == Mark::Start)
	}

	/// Path of the latest traversal.
	pub fn path(&self) -> &[ElementRef] {
		&self.path
	}

	/// Revealed and total element counts of the latest traversal.
	pub fn progress(&self) -> (usize, usize) {
		(self.cursor, self.path.len())
	}

	/// Elements currently marked highlighted, nodes first.
	pub fn highlighted(&self) -> impl Iterator<Item = ElementRef> + '_ {
		let nodes = marked(&self.node_marks, Mark::Highlighted).map(ElementRef::Node);
		let edges = marked(&self.edge_marks, Mark::Highlighted).map(ElementRef::Edge);
		nodes.chain(edges)
	}

	fn clear_marks(&mut self) {
		let nodes = (0..self.node_marks.len()).map(ElementRef::Node);
		let edges = (0..self.edge_marks.len()).map(ElementRef::Edge);
		for element in nodes.chain(edges).collect::<Vec<_>>() {
			self.set_mark(element, Mark::Unmarked);
		}
	}

	// Start wins over highlighted until the next clear.
	fn set_mark(&mut self, element: ElementRef, mark: Mark) {
		let slot = match element {
			ElementRef::Node(idx) => self.node_marks.get_mut(idx),
			ElementRef::Edge(idx) => self.edge_marks.get_mut(idx),
		};
		if let Some(slot) = slot {
			if !(*slot == Mark::Start && mark == Mark::Highlighted) {
				*slot = mark;
			}
		}
	}
}

fn marked(marks: &[Mark], mark: Mark) -> impl Iterator<Item = usize> + '_ {
	marks
		.iter()
		.enumerate()
		.filter(move |(_, m)| **m == mark)
		.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::traversal::elements::{EdgeElement, GraphElements, NodeElement};

	fn sample_graph() -> CallGraph {
		let nodes = ["a", "b", "c", "d", "e"]
			.into_iter()
			.map(|id| {
				let kind = if id == "e" { "TestCase" } else { "Normal" };
				NodeElement::new(id).with_type(kind)
			})
			.collect();
		let edges = [
			("a", "e"),
			("a", "b"),
			("b", "e"),
			("b", "c"),
			("c", "e"),
			("c", "d"),
			("d", "e"),
		]
		.into_iter()
		.map(|(s, t)| EdgeElement::new(format!("{s}{t}"), s, t))
		.collect();
		CallGraph::from_elements(&GraphElements { nodes, edges }).unwrap()
	}

	fn highlighter() -> Highlighter {
		Highlighter::new(sample_graph(), HighlightConfig::default())
	}

	fn run_to_end(h: &mut Highlighter, token: SequenceToken) -> Vec<ElementRef> {
		let mut revealed = Vec::new();
		loop {
			match h.reveal_next(token) {
				Reveal::Marked(el) => revealed.push(el),
				Reveal::Finished => return revealed,
				Reveal::Stale => panic!("token went stale"),
			}
		}
	}

	fn start_count(h: &Highlighter) -> usize {
		let g = h.graph();
		(0..g.nodes().len())
			.map(ElementRef::Node)
			.chain((0..g.edges().len()).map(ElementRef::Edge))
			.filter(|el| h.mark(*el) == Mark::Start)
			.count()
	}

	#[test]
	fn begin_marks_start_without_revealing() {
		let mut h = highlighter();
		let _token = h.begin(0).unwrap();

		assert_eq!(h.start(), Some(0));
		assert_eq!(h.mark(ElementRef::Node(0)), Mark::Start);
		assert_eq!(h.highlighted().count(), 0);
		assert_eq!(h.path()[0], ElementRef::Node(0));
		assert_eq!(h.progress(), (0, 12));
	}

	#[test]
	fn reveals_whole_path_in_order() {
		let mut h = highlighter();
		let token = h.begin(0).unwrap();
		let revealed = run_to_end(&mut h, token);

		assert_eq!(revealed, h.path());
		assert_eq!(h.progress(), (12, 12));
		assert!(!h.is_running());
		// the start node keeps its own mark once revealed
		assert_eq!(h.mark(ElementRef::Node(0)), Mark::Start);
		assert_eq!(h.highlighted().count(), 11);
		assert_eq!(h.reveal_next(token), Reveal::Stale);
	}

	#[test]
	fn new_traversal_resets_marks_and_invalidates_old_token() {
		let mut h = highlighter();
		let first = h.begin(0).unwrap();
		for _ in 0..6 {
			h.reveal_next(first);
		}

		let second = h.begin(2).unwrap();
		assert_ne!(first, second);
		assert_eq!(h.reveal_next(first), Reveal::Stale);
		assert_eq!(start_count(&h), 1);
		assert_eq!(h.start(), Some(2));
		assert_eq!(h.highlighted().count(), 0);

		h.reveal_next(second);
		h.reveal_next(second);
		let path: HashSet<_> = h.path().iter().copied().collect();
		assert!(h.highlighted().all(|el| path.contains(&el)));
		assert_eq!(start_count(&h), 1);
	}

	#[test]
	fn ineligible_node_changes_nothing() {
		let config = HighlightConfig {
			eligibility: Eligibility::NodeType("Normal".into()),
			..Default::default()
		};
		let mut h = Highlighter::new(sample_graph(), config);
		let token = h.begin(0).unwrap();
		h.reveal_next(token);
		h.reveal_next(token);

		assert_eq!(h.begin(4), None);
		assert_eq!(h.start(), Some(0));
		assert_eq!(h.highlighted().count(), 1);
		assert!(matches!(h.reveal_next(token), Reveal::Marked(_)));
	}

	#[test]
	fn any_node_eligibility_accepts_untyped_nodes() {
		let mut h = highlighter();
		assert!(h.begin(4).is_some());
		assert_eq!(h.path(), &[ElementRef::Node(4)]);
	}

	#[test]
	fn unknown_node_or_empty_graph() {
		let mut h = highlighter();
		assert_eq!(h.begin(42), None);

		let mut empty = Highlighter::new(CallGraph::default(), HighlightConfig::default());
		assert_eq!(empty.begin(0), None);
		assert!(empty.path().is_empty());
	}

	#[test]
	fn cancel_stops_reveals_but_keeps_marks() {
		let mut h = highlighter();
		let token = h.begin(0).unwrap();
		h.reveal_next(token);
		h.reveal_next(token);
		h.cancel();

		assert_eq!(h.reveal_next(token), Reveal::Stale);
		assert_eq!(h.highlighted().collect::<Vec<_>>(), vec![ElementRef::Edge(0)]);
		assert_eq!(h.progress(), (2, 12));
	}

	#[test]
	fn tree_only_coverage_reveals_fewer_edges() {
		let config = HighlightConfig {
			edges: EdgeCoverage::TreeOnly,
			..Default::default()
		};
		let mut h = Highlighter::new(sample_graph(), config);
		let token = h.begin(0).unwrap();
		let revealed = run_to_end(&mut h, token);
		assert_eq!(revealed.len(), 9);
	}
}
