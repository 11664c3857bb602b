//! Browser entry point for the call graph viewer.

// dependencies are used by the library target
#![allow(unused_crate_dependencies)]

use calltrack_viewer::{App, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();

	mount_to_body(|| {
		view! { <App /> }
	})
}
