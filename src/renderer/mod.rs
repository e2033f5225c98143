//! Rendering collaborator
//!
//! Turns environment state into draw data. Nothing here feeds back into the
//! simulation.

pub mod frame;
pub mod shapes;
pub mod vertex;

pub use frame::{Frame, Rect};
pub use vertex::Vertex;
