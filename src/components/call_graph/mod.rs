mod component;
mod layout;
mod render;
mod scheduler;
mod state;

pub use component::CallGraphCanvas;
