use thiserror::Error;

/// Errors raised while loading a call graph.
#[derive(Debug, Error)]
pub enum GraphError {
	/// The element list is not valid JSON or misses required fields.
	#[error("invalid graph data: {0}")]
	Parse(#[from] serde_json::Error),
	/// A node or edge has an empty id.
	#[error("{0} with an empty id")]
	EmptyId(&'static str),
	/// Two elements share an id. Nodes and edges share one id space.
	#[error("duplicate element id `{0}`")]
	DuplicateId(String),
}
