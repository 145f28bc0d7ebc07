use super::*;

/// Places mines at an explicit list of positions.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinePlacer<'a> {
    mine_coords: &'a [Coord2],
}

impl<'a> FixedMinePlacer<'a> {
    pub fn new(mine_coords: &'a [Coord2]) -> Self {
        Self { mine_coords }
    }

    pub fn mine_count(&self) -> usize {
        self.mine_coords.len()
    }
}

impl MinePlacer for FixedMinePlacer<'_> {
    fn mine_mask(self, config: GameConfig) -> Result<Array2<bool>> {
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());

        for &coords in self.mine_coords {
            if coords.0 >= config.rows() || coords.1 >= config.cols() {
                return Err(GameError::InvalidConfiguration);
            }
            mines[coords.to_nd_index()] = true;
        }

        Ok(mines)
    }
}
