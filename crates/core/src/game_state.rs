//! Game state module - the immutable game value and its transitions
//!
//! `GameState` is `Copy`. Every transition reads `&self` and builds a new value
//! with struct-update syntax, so successive snapshots never share anything.
//!
//! The engine does not look at `game_over` before applying an action. Stopping
//! the action stream once a terminal state shows up is the caller's job (see the
//! pipeline crate); applying more actions to a terminal state keeps running the
//! physics.

use crate::board::Board;
use crate::piece::PieceInstance;
use crate::rng::PieceSelector;
use crate::types::{
    Action, GRID_HEIGHT, GRID_WIDTH, INITIAL_SPEED, LEVEL_SCORE_STEP, MAX_LEVEL, MIN_LEVEL,
    SPEED_BASE,
};

/// Complete game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub game_over: bool,
    /// Throttle countdown; a tick only moves the piece once `speed < level`
    pub speed: u8,
    pub board: Board,
    pub level: u8,
    pub score: u32,
    pub highscore: u32,
    /// The falling piece
    pub current: PieceInstance,
    /// Preview piece, becomes `current` on the next lock
    pub next: PieceInstance,
    /// Held piece, empty until the first hold
    pub inventory: Option<PieceInstance>,
    /// Whether a hold is allowed right now (reset on every lock)
    pub reservable: bool,
    pub selector: PieceSelector,
}

impl GameState {
    /// Create a new game with the given selector seed
    pub fn new(seed: u32) -> Self {
        Self::with_highscore(PieceSelector::new(seed), 0)
    }

    /// Create a new game seeded from the wall clock
    pub fn from_wall_clock() -> Self {
        Self::with_highscore(PieceSelector::from_wall_clock(), 0)
    }

    /// Create a new game that carries a highscore from an earlier run
    pub fn with_highscore(selector: PieceSelector, highscore: u32) -> Self {
        let (current, selector) = selector.draw(0);
        let (next, selector) = selector.draw(1);

        Self {
            game_over: false,
            speed: INITIAL_SPEED,
            board: Board::new(),
            level: MIN_LEVEL,
            score: 0,
            highscore,
            current: PieceInstance::new(current),
            next: PieceInstance::new(next),
            inventory: None,
            reservable: true,
            selector,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.game_over
    }

    /// Apply one action and return the resulting state
    pub fn apply(&self, action: Action) -> GameState {
        match action {
            Action::Tick => self.fall(),
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::Hold => self.hold(),
        }
    }

    /// Shift the falling piece one column left, or return the state unchanged
    pub fn move_left(&self) -> GameState {
        self.shift(-1)
    }

    /// Shift the falling piece one column right, or return the state unchanged
    pub fn move_right(&self) -> GameState {
        self.shift(1)
    }

    fn shift(&self, dx: i8) -> GameState {
        let blocked = self.current.cells().iter().any(|&(x, y)| {
            let tx = x + dx;
            tx < 0 || tx >= GRID_WIDTH as i8 || self.board.is_occupied(tx, y)
        });
        if blocked {
            return *self;
        }

        GameState {
            current: PieceInstance {
                x: self.current.x + dx,
                ..self.current
            },
            ..*self
        }
    }

    /// Timer step: throttle, game-over check, then either lock or descend
    pub fn fall(&self) -> GameState {
        if self.level <= self.speed {
            return GameState {
                speed: self.speed - 1,
                ..*self
            };
        }

        if self.board.is_occupied(0, 0) {
            return GameState {
                game_over: true,
                highscore: self.highscore.max(self.score),
                ..*self
            };
        }

        if self.is_resting() {
            return self.lock();
        }

        GameState {
            current: PieceInstance {
                y: self.current.y + 1,
                ..self.current
            },
            level: self.level_after(),
            speed: self.speed_after(),
            highscore: self.highscore.max(self.score),
            ..*self
        }
    }

    /// Whether any cell of the falling piece sits on the floor or a settled cell
    pub fn is_resting(&self) -> bool {
        self.current
            .cells()
            .iter()
            .any(|&(x, y)| y + 1 >= GRID_HEIGHT as i8 || self.board.is_occupied(x, y + 1))
    }

    fn lock(&self) -> GameState {
        let stamped = self.board.stamp(&self.current);
        let flags = stamped.completed_rows();
        let cleared: u32 = flags.iter().map(|&f| f as u32).sum();
        let score = self.score + cleared;
        let (next, selector) = self.selector.draw(0);

        GameState {
            board: stamped.compact(&flags),
            score,
            level: self.level_after(),
            speed: self.speed_after(),
            highscore: self.highscore.max(score),
            current: self.next,
            next: PieceInstance::new(next),
            reservable: true,
            selector,
            ..*self
        }
    }

    /// Put the falling piece aside, or swap it with the held piece once per lock
    pub fn hold(&self) -> GameState {
        match self.inventory {
            None => {
                let (next, selector) = self.selector.draw(0);
                GameState {
                    current: self.next,
                    next: PieceInstance::new(next),
                    inventory: Some(self.current.reset()),
                    reservable: false,
                    selector,
                    ..*self
                }
            }
            Some(held) if self.reservable => GameState {
                current: held.reset(),
                inventory: Some(self.current.reset()),
                reservable: false,
                ..*self
            },
            Some(_) => *self,
        }
    }

    /// Level after this state's score is taken into account (one step at most)
    pub fn level_after(&self) -> u8 {
        if self.level < MAX_LEVEL && self.score >= self.level as u32 * LEVEL_SCORE_STEP {
            self.level + 1
        } else {
            self.level
        }
    }

    fn speed_after(&self) -> u8 {
        SPEED_BASE.saturating_sub(self.level)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
