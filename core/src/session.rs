use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// A first reveal that hits a mine or clears the board passes through
/// `InProgress` within the same action.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Nothing revealed yet, timer not running
    #[default]
    NotStarted,
    /// Timer running
    InProgress,
    /// Every safe cell revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// The board is frozen, no more moves are accepted
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Player input, as routed from the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Left click
    Reveal,
    /// Right click
    Mark,
    /// Both buttons or middle click
    Chord,
}

/// What an action did, for the presentation layer to render.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    NoChange,
    Revealed(CellCount),
    HitMine,
    MarkerChanged(Marker),
}

impl Outcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl From<RevealResult> for Outcome {
    fn from(result: RevealResult) -> Self {
        match result {
            RevealResult::NoChange => Self::NoChange,
            RevealResult::Revealed(count) => Self::Revealed(count),
            RevealResult::HitMine => Self::HitMine,
        }
    }
}

impl From<MarkOutcome> for Outcome {
    fn from(outcome: MarkOutcome) -> Self {
        match outcome {
            MarkOutcome::NoChange => Self::NoChange,
            MarkOutcome::Changed { marker, .. } => Self::MarkerChanged(marker),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub outcome: Outcome,
    /// Session state after the action was applied.
    pub state: GameState,
}

/// One game from first click to win or loss. Restarting replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    difficulty: Option<Difficulty>,
    options: SessionOptions,
    seed: u64,
    mines_placed: bool,
    state: GameState,
    elapsed_secs: u32,
    flags_placed: CellCount,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    /// New game on a preset with the reference options.
    pub fn new(difficulty: Difficulty, seed: u64) -> Result<Self> {
        Self::with_options(difficulty.config(), SessionOptions::default(), seed)
    }

    pub fn with_options(config: GameConfig, options: SessionOptions, seed: u64) -> Result<Self> {
        let mut session = Self::fresh(Board::new(config), options, seed);
        session.difficulty = Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.config() == config);

        if matches!(options.first_click, FirstClick::Unprotected) {
            session.place_mines(None)?;
        }
        Ok(session)
    }

    /// New game on the preset called `name`.
    pub fn named(name: &str, seed: u64) -> Result<Self> {
        name.parse().and_then(|difficulty| Self::new(difficulty, seed))
    }

    /// Plays on a board whose mines are already in place and that has nothing revealed yet.
    ///
    /// Flags already on the board count toward the flag budget.
    pub fn from_board(mut board: Board, options: SessionOptions) -> Result<Self> {
        let placed = board.cells().iter().filter(|cell| cell.is_mine()).count();
        let any_revealed = board.cells().iter().any(Cell::is_revealed);
        if placed != usize::from(board.mine_count()) || any_revealed {
            return Err(GameError::InvalidConfiguration);
        }
        board.compute_adjacency();

        let mut session = Self::fresh(board, options, 0);
        session.flags_placed = session.board.flagged_count();
        session.mines_placed = true;
        Ok(session)
    }

    fn fresh(board: Board, options: SessionOptions, seed: u64) -> Self {
        Self {
            board,
            difficulty: None,
            options,
            seed,
            mines_placed: false,
            state: GameState::NotStarted,
            elapsed_secs: 0,
            flags_placed: 0,
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_final()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.board.config()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Seconds spent in `InProgress`, frozen once the game ends.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// Display value, negative when over-flagged.
    pub fn mines_remaining(&self) -> isize {
        (self.board.mine_count() as isize) - (self.flags_placed as isize)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.board.revealed_count()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.board.cell_at(coords)
    }

    /// The cell as the player may see it; mines are only exposed once revealed or after the game
    /// ends.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let cell = self.board.cell_at(coords)?;

        if cell.is_revealed() {
            return Ok(match (cell.is_mine(), self.triggered_mine) {
                (true, Some(triggered)) if triggered == coords => CellView::TriggeredMine,
                (true, _) => CellView::Mine,
                (false, _) => CellView::Revealed(cell.adjacent_mine_count()),
            });
        }

        Ok(match (self.state, cell.marker(), cell.is_mine()) {
            (GameState::Lost, Marker::Flagged, false) => CellView::Misflagged,
            (GameState::Lost, Marker::Flagged, true) => CellView::Flagged,
            (GameState::Lost, _, true) => CellView::Mine,
            (GameState::Won, _, true) => CellView::Flagged,
            (_, Marker::Flagged, _) => CellView::Flagged,
            (_, Marker::Questioned, _) => CellView::Questioned,
            (_, Marker::None, _) => CellView::Hidden,
        })
    }

    pub fn apply(&mut self, action: Action, coords: Coord2) -> Result<ActionOutcome> {
        match action {
            Action::Reveal => self.on_cell_left_click(coords),
            Action::Mark => self.on_cell_right_click(coords),
            Action::Chord => self.on_cell_both_click(coords),
        }
    }

    /// Reveals a cell, starting the game on the first reveal.
    pub fn on_cell_left_click(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.state.is_final() {
            return Ok(self.report(Outcome::NoChange));
        }

        if !self.mines_placed {
            self.place_mines(Some(coords))?;
        }

        let result = reveal(&mut self.board, coords)?;
        self.settle(result, coords);
        Ok(self.report(result.into()))
    }

    /// Cycles the marker on a hidden cell. Does not start the timer.
    pub fn on_cell_right_click(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.state.is_final() {
            return Ok(self.report(Outcome::NoChange));
        }

        let outcome = cycle_marker(&mut self.board, coords, self.options.question_marks)?;
        match outcome.flag_delta() {
            1 => self.flags_placed += 1,
            -1 => self.flags_placed -= 1,
            _ => {}
        }
        Ok(self.report(outcome.into()))
    }

    /// Chords around a revealed number.
    pub fn on_cell_both_click(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.state.is_final() {
            return Ok(self.report(Outcome::NoChange));
        }

        let result = chord(&mut self.board, coords)?;
        if matches!(result, RevealResult::HitMine) {
            let triggered = self
                .board
                .iter_neighbors(coords)
                .find(|&pos| self.board[pos].is_mine() && self.board[pos].is_revealed())
                .unwrap_or(coords);
            self.settle(result, triggered);
        } else {
            self.settle(result, coords);
        }
        Ok(self.report(result.into()))
    }

    /// Advances the timer by one second while the game is in progress.
    pub fn tick(&mut self) -> u32 {
        if matches!(self.state, GameState::InProgress) {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
        self.elapsed_secs
    }

    /// Replaces this session with a fresh game on `difficulty`, keeping the options.
    pub fn restart(&mut self, difficulty: Difficulty) -> Result<()> {
        *self = Self::with_options(difficulty.config(), self.options, self.next_seed())?;
        Ok(())
    }

    /// Restarts on the preset called `name`, leaving this session untouched if the name is unknown.
    pub fn restart_named(&mut self, name: &str) -> Result<()> {
        self.restart(name.parse()?)
    }

    /// Restarts with the same dimensions, mine count and options.
    pub fn restart_current(&mut self) -> Result<()> {
        *self = Self::with_options(self.config(), self.options, self.next_seed())?;
        Ok(())
    }

    fn next_seed(&self) -> u64 {
        self.seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407)
    }

    fn place_mines(&mut self, excluding: Option<Coord2>) -> Result<()> {
        self.board.place_mines(self.seed, excluding)?;
        self.board.compute_adjacency();
        self.mines_placed = true;
        Ok(())
    }

    /// Applies the state machine to the result of a reveal or chord.
    fn settle(&mut self, result: RevealResult, coords: Coord2) {
        match result {
            RevealResult::NoChange => {}
            RevealResult::HitMine => {
                self.mark_started();
                self.triggered_mine = Some(coords);
                self.mark_ended(false);
            }
            RevealResult::Revealed(_) => {
                self.mark_started();
                if self.board.revealed_count() == self.board.safe_cell_count() {
                    self.mark_ended(true);
                }
            }
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_initial() {
            log::debug!("Game started");
            self.state = GameState::InProgress;
        }
    }

    fn mark_ended(&mut self, won: bool) {
        if self.state.is_final() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!(
            "Game ended as {:?} after {}s",
            self.state,
            self.elapsed_secs
        );
    }

    fn report(&self, outcome: Outcome) -> ActionOutcome {
        ActionOutcome {
            outcome,
            state: self.state,
        }
    }
}
