use crate::*;
use ndarray::Array2;

pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces the mine mask for a board of the given configuration.
pub trait MinePlacer {
    fn mine_mask(self, config: GameConfig) -> Result<Array2<bool>>;
}
