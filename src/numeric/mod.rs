pub mod approx_f64;
pub mod exact_rational;
pub mod scalar;

pub use approx_f64::ApproxF64;
pub use exact_rational::ExactRational;
pub use scalar::Scalar;
