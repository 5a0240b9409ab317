mod anchored_vector;
mod parse;
mod point;
mod vector;

pub use anchored_vector::AnchoredVector;
pub use point::Point;
pub use vector::Vector;
