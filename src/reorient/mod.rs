pub mod patches;
pub mod raycast;

pub use patches::{Patches, extract_patches};
pub use raycast::{ReorientParams, reorient_facets_raycast};
