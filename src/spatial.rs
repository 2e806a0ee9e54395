//! Bounding volumes enclosing the vertices of a mesh.

mod bounding_box;
mod bounding_sphere;
mod traits;
mod volume;

pub use bounding_box::*;
pub use bounding_sphere::*;
pub use traits::*;
pub use volume::*;
