//! Serializable element list, in the `{ nodes: [{ data }], edges: [{ data }] }`
//! shape produced by the call graph exporter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::GraphError;

/// The raw nodes and edges of a call graph, before validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphElements {
	/// Node elements, in input order.
	#[serde(default)]
	pub nodes: Vec<NodeElement>,
	/// Edge elements, in input order.
	#[serde(default)]
	pub edges: Vec<EdgeElement>,
}

impl GraphElements {
	/// Parse an element list from JSON.
	pub fn from_json(json: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(json)?)
	}
}

/// A node wrapped in its `data` object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeElement {
	/// Node fields.
	pub data: NodeFields,
}

impl NodeElement {
	/// A node with only an id.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			data: NodeFields {
				id: id.into(),
				label: None,
				node_type: None,
				color: None,
				color_highlight: None,
				shape: None,
				attributes: BTreeMap::new(),
			},
		}
	}

	/// Set the display label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.data.label = Some(label.into());
		self
	}

	/// Set the `type` attribute.
	pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
		self.data.node_type = Some(node_type.into());
		self
	}
}

/// Fields of a node. Unrecognized keys are kept in `attributes`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeFields {
	/// Unique element id.
	pub id: String,
	/// Display label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Node kind, e.g. `Normal`, `UseCase` or `TestCase`.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub node_type: Option<String>,
	/// Fill color.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	/// Fill color while highlighted.
	#[serde(
		default,
		rename = "colorHighlight",
		skip_serializing_if = "Option::is_none"
	)]
	pub color_highlight: Option<String>,
	/// Shape name, e.g. `ellipse` or `rectangle`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub shape: Option<String>,
	/// Any other attributes.
	#[serde(flatten)]
	pub attributes: BTreeMap<String, Value>,
}

/// An edge wrapped in its `data` object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeElement {
	/// Edge fields.
	pub data: EdgeFields,
}

impl EdgeElement {
	/// A directed edge `source -> target`.
	pub fn new(
		id: impl Into<String>,
		source: impl Into<String>,
		target: impl Into<String>,
	) -> Self {
		Self {
			data: EdgeFields {
				id: id.into(),
				source: source.into(),
				target: target.into(),
				attributes: BTreeMap::new(),
			},
		}
	}
}

/// Fields of an edge. Unrecognized keys are kept in `attributes`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeFields {
	/// Unique element id.
	pub id: String,
	/// Id of the calling node.
	pub source: String,
	/// Id of the called node.
	pub target: String,
	/// Any other attributes.
	#[serde(flatten)]
	pub attributes: BTreeMap<String, Value>,
}
