use chrono::prelude::*;
use tracing::{debug, info, trace};

use crate::attacks::in_check;
use crate::board::Position;
use crate::executor::apply;
use crate::legality::legal_moves;
use crate::status::{evaluate, status_text};
use crate::types::*;

/// What the controller has selected between clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Idle,
    Selected(Square),
}

/// Outcome of a `select_or_move` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A piece of the side to move is now selected
    Selected(Square),
    /// The selected square was clicked again
    Deselected,
    Moved(Move),
    /// The destination was not legal for the selected piece. Nothing changed but the selection.
    Rejected { from: Square, to: Square },
    /// Nothing selectable was clicked, or the game is over
    Ignored,
}

/// Moves played so far, for display. Never consulted for rules.
#[derive(Debug, Clone)]
pub struct GameRecord {
    moves: Vec<Move>,
    started_at: DateTime<Local>,
}

impl GameRecord {
    fn new() -> Self {
        Self {
            moves: Vec::new(),
            started_at: Local::now(),
        }
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Numbered move list, one full move per line.
    pub fn to_human(&self) -> String {
        let mut text = String::new();
        for (i, m) in self.moves.iter().enumerate() {
            if i % 2 == 0 {
                text.push_str(&format!("{}. {}", i / 2 + 1, m));
            } else {
                text.push_str(&format!(", {}\n", m));
            }
        }
        if self.moves.len() % 2 == 1 {
            text.push('\n');
        }
        text
    }
}

/// Read only view of the controller for a rendering layer.
#[derive(Debug, Clone, Copy)]
pub struct GameState<'a> {
    pub position: &'a Position,
    pub status: Status,
    pub selection: Selection,
    pub record: &'a GameRecord,
}

/// Owns the live position and drives it from discrete select/move and reset commands.
#[derive(Debug, Clone)]
pub struct GameController {
    position: Position,
    status: Status,
    selection: Selection,
    record: GameRecord,
}

impl Default for GameController {
    fn default() -> Self {
        GameController::new()
    }
}

impl GameController {
    pub fn new() -> Self {
        Self {
            position: Position::new(),
            status: Status::InProgress,
            selection: Selection::Idle,
            record: GameRecord::new(),
        }
    }

    /// Start from an arbitrary position instead of the standard one. `reset` still goes back
    /// to the standard start.
    pub fn from_position(position: Position) -> Self {
        Self {
            status: evaluate(&position),
            position,
            selection: Selection::Idle,
            record: GameRecord::new(),
        }
    }

    /// Select a piece, deselect it, or move the selected piece to `square`.
    pub fn select_or_move(&mut self, square: Square) -> Transition {
        if self.status.is_over() {
            trace!(%square, "game is over, ignoring input");
            return Transition::Ignored;
        }

        let selection = self.selection;
        let transition = match selection {
            Selection::Idle => {
                if self.is_own_piece(square) {
                    self.selection = Selection::Selected(square);
                    Transition::Selected(square)
                } else {
                    Transition::Ignored
                }
            }
            Selection::Selected(from) if from == square => {
                self.selection = Selection::Idle;
                Transition::Deselected
            }
            Selection::Selected(_) if self.is_own_piece(square) => {
                self.selection = Selection::Selected(square);
                Transition::Selected(square)
            }
            Selection::Selected(from) => {
                self.selection = Selection::Idle;
                self.try_move(from, square)
            }
        };
        debug!(?transition, selection = ?self.selection, "select_or_move");
        transition
    }

    fn try_move(&mut self, from: Square, to: Square) -> Transition {
        let result = Move::infer(&self.position, from, to)
            .and_then(|m| apply(&self.position, &m).map(|next| (m, next)));
        match result {
            Ok((selected_move, next)) => {
                self.position = next;
                self.status = evaluate(&self.position);
                self.record.moves.push(selected_move);
                if self.status.is_over() {
                    info!(status = ?self.status, moves = self.record.len(), "game over");
                }
                Transition::Moved(selected_move)
            }
            Err(err) => {
                trace!(%err, "rejected move");
                Transition::Rejected { from, to }
            }
        }
    }

    /// Back to the standard start: empty record, no selection, game in progress.
    pub fn reset(&mut self) {
        info!(moves = self.record.len(), "resetting game");
        *self = GameController::new();
    }

    pub fn state(&self) -> GameState<'_> {
        GameState {
            position: &self.position,
            status: self.status,
            selection: self.selection,
            record: &self.record,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    /// Legal destinations of the piece on `square`, if it belongs to the side to move and the
    /// game is still going. A renderer can tell captures from quiet moves by looking at what
    /// stands on the destination.
    pub fn legal_destinations(&self, square: Square) -> Vec<Square> {
        if self.status.is_over() || !self.is_own_piece(square) {
            return vec![];
        }
        legal_moves(&self.position, square)
    }

    /// Destinations of the current selection, empty when nothing is selected.
    pub fn selected_destinations(&self) -> Vec<Square> {
        match self.selection {
            Selection::Selected(square) => self.legal_destinations(square),
            Selection::Idle => vec![],
        }
    }

    pub fn in_check(&self) -> bool {
        in_check(&self.position, self.position.side_to_move())
    }

    pub fn status_text(&self) -> String {
        status_text(self.status, self.position.side_to_move(), self.in_check())
    }

    fn is_own_piece(&self, square: Square) -> bool {
        self.position
            .piece_at(square)
            .is_some_and(|p| p.color == self.position.side_to_move())
    }
}
