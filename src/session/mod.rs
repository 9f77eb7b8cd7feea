//! Game session: the consumer-facing API.
//!
//! `GameSession` composes the grid engine with score, spawn mode, undo
//! history and the save hook. Input arrives as method calls or as
//! `InputEvent`s through `handle`, which answers with a `Frame`.

mod event;
mod game;

pub use event::{Frame, InputEvent, MoveOutcome};
pub use game::GameSession;
