use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::{error, info};

use crate::components::call_graph::CallGraphCanvas;
use crate::traversal::{
	CallGraph, EdgeElement, Eligibility, GraphElements, GraphError, HighlightConfig, NodeElement,
};

/// Window global the host page may set to a JSON element list.
const DATA_GLOBAL: &str = "CALL_GRAPH_DATA";

/// Five-node sample shown when the host page supplies no graph.
fn sample_elements() -> GraphElements {
	let nodes = ["a", "b", "c", "d", "e"]
		.into_iter()
		.map(|id| NodeElement::new(id).with_label(format!("label de {id}")))
		.collect();
	let edges = [
		("a\"e", "a", "e"),
		("ab", "a", "b"),
		("be", "b", "e"),
		("bc", "b", "c"),
		("ce", "c", "e"),
		("cd", "c", "d"),
		("de", "d", "e"),
	]
	.into_iter()
	.map(|(id, source, target)| EdgeElement::new(id, source, target))
	.collect();
	GraphElements { nodes, edges }
}

fn supplied_json() -> Option<String> {
	let window = web_sys::window()?;
	js_sys::Reflect::get(&window, &DATA_GLOBAL.into())
		.ok()?
		.as_string()
}

fn parse_supplied(json: &str) -> Result<CallGraph, GraphError> {
	CallGraph::from_elements(&GraphElements::from_json(json)?)
}

fn load_graph() -> CallGraph {
	if let Some(json) = supplied_json() {
		match parse_supplied(&json) {
			Ok(graph) => {
				info!(
					"loaded {} nodes and {} edges from {DATA_GLOBAL}",
					graph.nodes().len(),
					graph.edges().len()
				);
				return graph;
			}
			Err(e) => error!("ignoring {DATA_GLOBAL}: {e}"),
		}
	}
	CallGraph::from_elements(&sample_elements()).unwrap_or_else(|e| {
		error!("sample graph rejected: {e}");
		CallGraph::default()
	})
}

/// `?gate=<type>` restricts traversal starts to nodes of that type.
fn eligibility(gate: Option<String>) -> Eligibility {
	match gate {
		Some(kind) if !kind.is_empty() => Eligibility::NodeType(kind),
		_ => Eligibility::AnyNode,
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(load_graph);
	let query = use_query_map();
	let config = HighlightConfig {
		eligibility: eligibility(query.with_untracked(|q| q.get("gate"))),
		..Default::default()
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<CallGraphCanvas data=graph_data config=config fullscreen=true />
				<div class="graph-overlay">
					<h1>"Call Graph"</h1>
					<p class="subtitle">"Click a method to trace what it calls. Drag nodes to reposition. Scroll to zoom. Drag background to pan."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_graph_is_valid() {
		let graph = CallGraph::from_elements(&sample_elements()).unwrap();
		assert_eq!(graph.nodes().len(), 5);
		assert_eq!(graph.edges().len(), 7);
		assert_eq!(graph.node_index("a"), Some(0));
	}

	#[test]
	fn gate_query_selects_node_type() {
		assert_eq!(eligibility(None), Eligibility::AnyNode);
		assert_eq!(eligibility(Some(String::new())), Eligibility::AnyNode);
		assert_eq!(
			eligibility(Some("Normal".into())),
			Eligibility::NodeType("Normal".into())
		);
	}

	#[test]
	fn supplied_json_errors_surface() {
		assert!(matches!(parse_supplied("not json"), Err(GraphError::Parse(_))));
		let dup = r#"{ "nodes": [ { "data": { "id": "a" } }, { "data": { "id": "a" } } ] }"#;
		assert!(matches!(parse_supplied(dup), Err(GraphError::DuplicateId(_))));
	}
}
