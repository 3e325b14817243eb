pub mod closest_facet;
pub mod order_edge_fan;

pub use closest_facet::{ClosestFacetResolver, FacetHit};
pub use order_edge_fan::order_facets_around_edge;
