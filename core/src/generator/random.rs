use super::*;

/// Purely random placement, optionally keeping one position (usually the first click) free of
/// mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinePlacer {
    seed: u64,
    excluding: Option<Coord2>,
}

impl RandomMinePlacer {
    pub fn new(seed: u64, excluding: Option<Coord2>) -> Self {
        Self { seed, excluding }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn mine_mask(self, config: GameConfig) -> Result<Array2<bool>> {
        use rand::prelude::*;

        let total_cells = config.total_cells();
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());

        let excluding = match self.excluding {
            Some(coords) if config.mines() + 1 > total_cells => {
                log::warn!("Cannot keep {:?} free of mines, fallback to random", coords);
                None
            }
            excluding => excluding,
        };

        // pre-mark the excluded cell so the draw skips it
        let mut free_cells = match excluding {
            Some(coords) => {
                mines[coords.to_nd_index()] = true;
                total_cells - 1
            }
            None => total_cells,
        };
        let mut mines_placed = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let cells = mines
                .as_slice_mut()
                .ok_or(GameError::InvalidConfiguration)?;
            while mines_placed < config.mines() {
                if free_cells == 0 {
                    break;
                }
                let mut place: CellCount = rng.random_range(0..free_cells);
                for (i, cell) in cells.iter_mut().enumerate() {
                    let i = i as CellCount;
                    if *cell {
                        place += 1;
                    }
                    if i == place {
                        *cell = true;
                        mines_placed += 1;
                        free_cells -= 1;
                        break;
                    }
                }
            }
        }

        if let Some(coords) = excluding {
            mines[coords.to_nd_index()] = false;
        }

        log::debug!(
            "Placed {} mines on a {}x{} grid",
            mines_placed,
            config.rows(),
            config.cols()
        );
        Ok(mines)
    }
}
