// Color-to-note sequencing

pub mod mapper;
pub mod sequence;
pub mod similarity;

pub use mapper::*;
pub use sequence::*;
pub use similarity::*;
