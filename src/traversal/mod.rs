//! Call graph model and the breadth-first highlight sequencer.

mod bfs;
mod elements;
mod error;
mod graph;
mod highlighter;

pub use bfs::{EdgeCoverage, TraversalOptions, breadth_first};
pub use elements::{EdgeElement, EdgeFields, GraphElements, NodeElement, NodeFields};
pub use error::GraphError;
pub use graph::{CallGraph, ElementRef, GraphEdge, GraphNode, NodeShape};
pub use highlighter::{
	Eligibility, HighlightConfig, Highlighter, Mark, Reveal, SequenceToken,
};
