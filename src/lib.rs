//! Geometric data of a renderable surface: typed per-vertex attribute buffers, an optional index
//! stream, a primitive [Mode], coarser level-of-detail index streams, and a bounding volume.
//!
//! The [Mesh] caches its vertex and element counts; call [Mesh::update_counts] after changing
//! its buffers, and [Mesh::update_bound] to refit its bound. Triangles (or, in general,
//! elements) are decoded on demand with [Mesh::triangle] and friends.
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod buffer;
mod clone;
mod error;
pub mod mesh;
mod mode;
pub mod spatial;

pub use buffer::*;
pub use clone::*;
pub use error::*;
pub use mesh::*;
pub use mode::*;
pub use spatial::*;
