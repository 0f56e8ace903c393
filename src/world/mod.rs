mod bounds;
pub(crate) mod random;

pub use bounds::Bounds;
pub use random::{GardenRng, RandomSource};
