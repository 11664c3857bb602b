//! Timer chain that reveals a traversal one element per interval.
//!
//! Only one timeout is pending at a time; starting a traversal cancels it.
//! Callbacks also carry their [`SequenceToken`], so one that fires after a
//! newer traversal began is turned away by the highlighter.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use log::{debug, info};

use super::state::CallGraphState;
use crate::traversal::{Reveal, SequenceToken};

pub type SharedState = Rc<RefCell<Option<CallGraphState>>>;
pub type TimerSlot = Rc<RefCell<Option<Timeout>>>;

/// Start a traversal at call graph node `node` and reveal its first element
/// right away. Taps on ineligible nodes are ignored.
pub fn begin_traversal(state: &SharedState, timer: &TimerSlot, node: usize) {
	let started = state.borrow_mut().as_mut().and_then(|s| {
		let token = s.highlighter.begin(node)?;
		let id = s.highlighter.graph().node(node).map(|n| n.id.clone());
		Some((token, s.highlighter.config().interval, id))
	});
	let Some((token, interval, id)) = started else {
		debug!("node {node} is not traversal-eligible");
		return;
	};

	if let Some(pending) = timer.borrow_mut().take() {
		pending.cancel();
	}
	info!("tapped {}", id.unwrap_or_default());
	reveal(state.clone(), timer.clone(), token, interval);
}

fn reveal(state: SharedState, timer: TimerSlot, token: SequenceToken, interval: Duration) {
	let step = match state.borrow_mut().as_mut() {
		Some(s) => {
			let step = s.highlighter.reveal_next(token);
			if let Reveal::Marked(element) = step {
				debug!(
					"highlighted {}",
					s.highlighter.graph().element_id(element).unwrap_or("?")
				);
			}
			step
		}
		None => return,
	};

	match step {
		Reveal::Marked(_) => {
			let millis = u32::try_from(interval.as_millis()).unwrap_or(u32::MAX);
			let next = Timeout::new(millis, {
				let (state, timer) = (state.clone(), timer.clone());
				move || reveal(state, timer, token, interval)
			});
			*timer.borrow_mut() = Some(next);
		}
		Reveal::Finished => debug!("traversal finished"),
		Reveal::Stale => debug!("dropping reveal of a superseded traversal"),
	}
}
