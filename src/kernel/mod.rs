pub mod predicates;

pub use predicates::{are_collinear, orient2d, orient3d};
