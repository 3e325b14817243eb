pub mod abs;
pub mod one;
pub mod zero;

pub use abs::Abs;
pub use one::One;
pub use zero::Zero;
