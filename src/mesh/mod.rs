pub mod soup;
pub mod winding;

pub use soup::{FacetTriangle, TriangleSoup};
pub use winding::{edge_winding, opposite_vertex, SignedFacetRef};
