//! Game session: board, score, spawn mode, undo history and saving.

use tracing::{debug, info, instrument, warn};

use super::event::{Frame, InputEvent, MoveOutcome};
use crate::core::{Direction, GameRng, SessionConfig, SpawnMode, TileIdAllocator};
use crate::grid::Grid;
use crate::history::HistoryStack;
use crate::persistence::{decode, encode, DecodeError, SessionSnapshot, SnapshotStore};

/// A single game in progress.
///
/// Owns all mutable state and processes one operation at a time; callers
/// serialize input. Every operation that changes the board or score writes
/// an encoded snapshot to the store. Store failures are logged and never
/// interrupt play.
///
/// ```
/// use rust_2048::{Direction, GameSession, MemoryStore, SessionConfig};
///
/// let mut session = GameSession::new(SessionConfig::default().with_seed(7), MemoryStore::new());
/// assert_eq!(session.grid().tile_count(), 2);
///
/// let outcome = session.apply_move(Direction::Left);
/// if outcome.moved {
///     assert_eq!(session.store().write_count(), 1);
/// }
/// ```
#[derive(Debug)]
pub struct GameSession<S: SnapshotStore> {
    config: SessionConfig,
    grid: Grid,
    score: i64,
    best_score: i64,
    ids: TileIdAllocator,
    spawn_mode: SpawnMode,
    history: HistoryStack,
    rng: GameRng,
    store: S,
}

impl<S: SnapshotStore> GameSession<S> {
    /// Open a session against a store, seeding the RNG from the config.
    ///
    /// A valid save in the store is restored; an absent or unreadable one
    /// gives a fresh board. Opening never writes.
    pub fn new(config: SessionConfig, store: S) -> Self {
        let rng = GameRng::from_seed_or_entropy(config.seed);
        Self::with_rng(config, store, rng)
    }

    /// Open a session with an explicit random source.
    pub fn with_rng(config: SessionConfig, store: S, rng: GameRng) -> Self {
        let mut session = Self {
            grid: Grid::new(),
            score: 0,
            best_score: 0,
            ids: TileIdAllocator::new(),
            spawn_mode: config.spawn_mode,
            history: HistoryStack::new(config.history_capacity),
            rng,
            store,
            config,
        };

        match session.store.read() {
            Some(bytes) => match session.load(&bytes) {
                Ok(()) => info!(score = session.score, "restored saved game"),
                Err(err) => {
                    warn!(error = %err, "ignoring unreadable save");
                    session.start_fresh();
                }
            },
            None => {
                info!("no saved game, starting fresh");
                session.start_fresh();
            }
        }

        session
    }

    /// Replace the session state with a decoded save.
    ///
    /// Clears history. On error the session is left unchanged.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let snapshot = decode(bytes)?;
        self.apply_snapshot(&snapshot);
        self.best_score = self.best_score.max(self.score);
        self.history.clear();
        Ok(())
    }

    /// Slide the board, then score, spawn and save if anything moved.
    ///
    /// An unmoved board leaves the session exactly as it was, history included.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let mut ids = self.ids;
        let slide = self.grid.slide(direction, &mut ids);

        if !slide.moved {
            debug!("board did not move");
            return MoveOutcome::default();
        }

        let before = self.snapshot();
        self.history.push(before);
        self.grid = slide.grid;
        self.ids = ids;
        self.add_score(slide.score_delta);

        if self
            .grid
            .spawn_tile(self.spawn_mode, &mut self.ids, &mut self.rng)
            .is_none()
        {
            debug!("no empty cell to spawn into");
        }

        let became_terminal = self.grid.is_terminal();
        debug!(
            score_delta = slide.score_delta,
            score = self.score,
            terminal = became_terminal,
            "move applied"
        );
        self.save();

        MoveOutcome {
            moved: true,
            score_delta: slide.score_delta,
            became_terminal,
        }
    }

    /// Roll back to the most recent history entry.
    ///
    /// Returns false, doing nothing, when history is empty.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            debug!("nothing to undo");
            return false;
        };

        let best_before = self.best_score;
        self.apply_snapshot(&snapshot);
        if !self.config.restore_best_on_undo {
            self.best_score = self.best_score.max(best_before);
        }

        debug!(score = self.score, remaining = self.history.len(), "undone");
        self.save();
        true
    }

    /// Start a new game, keeping best score and spawn mode.
    ///
    /// The abandoned game goes onto the history stack, so restart can be undone.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        let abandoned = self.snapshot();
        self.history.push(abandoned);
        self.start_fresh();
        info!(best_score = self.best_score, "game restarted");
        self.save();
    }

    /// Delete the tile at a cell, subtracting its value from the score.
    ///
    /// Returns the (negative) score change, or `None` for an empty or
    /// out-of-range cell. The score is not clamped and may go negative.
    /// History is untouched.
    #[instrument(skip(self))]
    pub fn remove_tile(&mut self, row: usize, col: usize) -> Option<i64> {
        let tile = self.grid.take(row, col)?;
        let delta = -tile.score();
        self.add_score(delta);
        debug!(id = %tile.id, score = self.score, "tile removed");
        self.save();
        Some(delta)
    }

    /// Advance the spawn mode. Does not save.
    pub fn cycle_spawn_mode(&mut self) -> SpawnMode {
        self.spawn_mode = self.spawn_mode.next();
        debug!(mode = %self.spawn_mode, "spawn mode changed");
        self.spawn_mode
    }

    /// Dispatch an input event and describe the result.
    #[instrument(skip(self))]
    pub fn handle(&mut self, event: InputEvent) -> Frame {
        let score_before = self.score;
        let changed = match event {
            InputEvent::Move(direction) => self.apply_move(direction).moved,
            InputEvent::Undo => self.undo(),
            InputEvent::Restart => {
                self.restart();
                true
            }
            InputEvent::RemoveTile { row, col } => self.remove_tile(row, col).is_some(),
            InputEvent::CycleMode => {
                self.cycle_spawn_mode();
                false
            }
        };
        self.frame(changed, self.score.saturating_sub(score_before))
    }

    /// Current state as a frame.
    #[must_use]
    pub fn frame(&self, moved: bool, score_delta: i64) -> Frame {
        Frame {
            grid: self.grid,
            score: self.score,
            best_score: self.best_score,
            spawn_mode: self.spawn_mode,
            moved,
            score_delta,
            terminal: self.grid.is_terminal(),
        }
    }

    /// Capture the session for history or storage.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: self.grid,
            score: self.score,
            best_score: self.best_score,
            tile_id_counter: self.ids.peek(),
            spawn_mode: self.spawn_mode,
        }
    }

    /// Encode the current state and hand it to the store.
    ///
    /// Returns whether the write succeeded. Failures are logged only.
    pub fn save(&mut self) -> bool {
        let bytes = match encode(&self.snapshot()) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(error = %err, "skipping save");
                return false;
            }
        };

        match self.store.write(&bytes) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "save failed");
                false
            }
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn best_score(&self) -> i64 {
        self.best_score
    }

    #[must_use]
    pub fn spawn_mode(&self) -> SpawnMode {
        self.spawn_mode
    }

    /// Next tile id to be allocated.
    #[must_use]
    pub fn tile_id_counter(&self) -> u64 {
        self.ids.peek()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// No empty cell and no neighbours that could merge.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.grid.is_terminal()
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // === Internals ===

    /// Saturates, since a loaded score can sit anywhere in `i64`.
    fn add_score(&mut self, delta: i64) {
        self.score = self.score.saturating_add(delta);
        self.best_score = self.best_score.max(self.score);
    }

    fn apply_snapshot(&mut self, snapshot: &SessionSnapshot) {
        self.grid = snapshot.grid;
        self.score = snapshot.score;
        self.best_score = snapshot.best_score;
        self.ids = TileIdAllocator::starting_at(snapshot.tile_id_counter);
        self.spawn_mode = snapshot.spawn_mode;
    }

    /// Empty board, zero score, id counter reset, initial tiles spawned.
    fn start_fresh(&mut self) {
        self.grid = Grid::new();
        self.score = 0;
        self.ids = TileIdAllocator::new();
        for _ in 0..self.config.initial_tiles {
            if self
                .grid
                .spawn_tile(self.spawn_mode, &mut self.ids, &mut self.rng)
                .is_none()
            {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Tile, TileId};
    use crate::persistence::{MemoryStore, StoreError};

    fn session() -> GameSession<MemoryStore> {
        GameSession::new(
            SessionConfig::default().with_seed(42).with_initial_tiles(0),
            MemoryStore::new(),
        )
    }

    /// Put a fixed board into a session.
    fn set_board(session: &mut GameSession<MemoryStore>, values: [[u32; 4]; 4]) {
        let mut ids = TileIdAllocator::new();
        session.grid = Grid::from_values(values, &mut ids);
        session.ids = ids;
    }

    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn read(&self) -> Option<Vec<u8>> {
            None
        }

        fn write(&mut self, _bytes: &[u8]) -> Result<(), StoreError> {
            Err(StoreError::new("disk full"))
        }
    }

    #[test]
    fn test_fresh_session_spawns_initial_tiles() {
        let session = GameSession::new(SessionConfig::default().with_seed(1), MemoryStore::new());
        assert_eq!(session.grid().tile_count(), 2);
        assert_eq!(session.tile_id_counter(), 2);
        assert_eq!(session.score(), 0);
        assert!(!session.can_undo());
        assert_eq!(session.store().write_count(), 0);
    }

    #[test]
    fn test_move_merges_scores_and_spawns() {
        let mut s = session();
        set_board(&mut s, [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);

        let outcome = s.apply_move(Direction::Left);

        assert!(outcome.moved);
        assert_eq!(outcome.score_delta, 4);
        assert!(!outcome.became_terminal);
        assert_eq!(s.score(), 4);
        assert_eq!(s.best_score(), 4);
        assert_eq!(s.grid().get(0, 0), Some(Tile::new(TileId(2), 4)));
        // Merged tile plus one spawn
        assert_eq!(s.grid().tile_count(), 2);
        assert_eq!(s.tile_id_counter(), 4);
        assert_eq!(s.history_len(), 1);
        assert_eq!(s.store().write_count(), 1);
    }

    #[test]
    fn test_unmoved_leaves_everything_alone() {
        let mut s = session();
        set_board(&mut s, [[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = s.snapshot();

        let outcome = s.apply_move(Direction::Left);

        assert_eq!(outcome, MoveOutcome::default());
        assert_eq!(s.snapshot(), before);
        assert_eq!(s.history_len(), 0);
        assert_eq!(s.store().write_count(), 0);
    }

    #[test]
    fn test_unmoved_at_capacity_keeps_oldest_entry() {
        let mut s = GameSession::new(
            SessionConfig::default()
                .with_seed(5)
                .with_initial_tiles(0)
                .with_history_capacity(2),
            MemoryStore::new(),
        );
        set_board(&mut s, [[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        s.apply_move(Direction::Right);
        set_board(&mut s, [[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        s.apply_move(Direction::Down);
        assert_eq!(s.history_len(), 2);
        let newest = s.history.peek().copied();

        // Collapsed to the left: nothing moves
        set_board(&mut s, [[2, 4, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]]);
        assert!(!s.apply_move(Direction::Left).moved);

        assert_eq!(s.history_len(), 2);
        assert_eq!(s.history.peek().copied(), newest);
        assert!(s.undo());
        assert!(s.undo());
        assert!(!s.undo());
    }

    #[test]
    fn test_move_into_terminal() {
        let mut s = session();
        // Sliding right merges the 2s at the end of row 0; the spawn fills (0, 0)
        set_board(
            &mut s,
            [[4, 8, 2, 2], [8, 16, 32, 64], [4, 8, 16, 32], [8, 16, 32, 64]],
        );
        s.spawn_mode = SpawnMode::Cheat512;

        let outcome = s.apply_move(Direction::Right);

        assert!(outcome.moved);
        assert_eq!(s.grid().values()[0], [512, 4, 8, 4]);
        assert!(outcome.became_terminal);
        assert!(s.is_terminal());
        for direction in Direction::ALL {
            assert!(!s.apply_move(direction).moved);
        }
    }

    #[test]
    fn test_undo_restores_everything() {
        let mut s = session();
        set_board(&mut s, [[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
        let before = s.snapshot();

        s.apply_move(Direction::Left);
        assert!(s.undo());

        assert_eq!(s.snapshot(), before);
        assert_eq!(s.history_len(), 0);
        assert_eq!(s.store().write_count(), 2);
    }

    #[test]
    fn test_undo_restores_spawn_mode() {
        let mut s = session();
        set_board(&mut s, [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);

        s.apply_move(Direction::Left);
        s.cycle_spawn_mode();
        assert_eq!(s.spawn_mode(), SpawnMode::AlwaysTwo);

        s.undo();
        assert_eq!(s.spawn_mode(), SpawnMode::Normal);
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut s = session();
        assert!(!s.undo());
        assert_eq!(s.store().write_count(), 0);
    }

    #[test]
    fn test_keep_best_on_undo() {
        let mut s = GameSession::new(
            SessionConfig::default()
                .with_seed(42)
                .with_initial_tiles(0)
                .keep_best_on_undo(),
            MemoryStore::new(),
        );
        set_board(&mut s, [[8, 8, 0, 0], [0; 4], [0; 4], [0; 4]]);

        s.apply_move(Direction::Left);
        assert_eq!(s.best_score(), 16);

        s.undo();
        assert_eq!(s.score(), 0);
        assert_eq!(s.best_score(), 16);
    }

    #[test]
    fn test_restart_preserves_best_and_mode() {
        let mut s = GameSession::new(SessionConfig::default().with_seed(3), MemoryStore::new());
        set_board(&mut s, [[16, 16, 0, 0], [0; 4], [0; 4], [0; 4]]);
        s.apply_move(Direction::Left);
        s.cycle_spawn_mode();
        let writes = s.store().write_count();

        s.restart();

        assert_eq!(s.score(), 0);
        assert_eq!(s.best_score(), 32);
        assert_eq!(s.spawn_mode(), SpawnMode::AlwaysTwo);
        assert_eq!(s.grid().tile_count(), 2);
        assert_eq!(s.tile_id_counter(), 2);
        assert!(s.grid().tiles().all(|p| p.tile.value == 2));
        assert_eq!(s.history_len(), 2);
        assert_eq!(s.store().write_count(), writes + 1);

        // Restart is undoable
        assert!(s.undo());
        assert_eq!(s.score(), 32);
    }

    #[test]
    fn test_remove_tile() {
        let mut s = session();
        set_board(&mut s, [[8, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);

        assert_eq!(s.remove_tile(0, 0), Some(-8));
        assert_eq!(s.score(), -8);
        assert_eq!(s.best_score(), 0);
        assert_eq!(s.grid().tile_count(), 0);
        assert_eq!(s.history_len(), 0);
        assert_eq!(s.store().write_count(), 1);
    }

    #[test]
    fn test_remove_tile_noop_cases() {
        let mut s = session();
        set_board(&mut s, [[8, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);

        assert_eq!(s.remove_tile(0, 1), None);
        assert_eq!(s.remove_tile(4, 0), None);
        assert_eq!(s.remove_tile(0, 99), None);
        assert_eq!(s.score(), 0);
        assert_eq!(s.store().write_count(), 0);
    }

    #[test]
    fn test_cycle_mode_does_not_save() {
        let mut s = session();
        assert_eq!(s.cycle_spawn_mode(), SpawnMode::AlwaysTwo);
        assert_eq!(s.cycle_spawn_mode(), SpawnMode::AlwaysFour);
        assert_eq!(s.cycle_spawn_mode(), SpawnMode::Cheat512);
        assert_eq!(s.cycle_spawn_mode(), SpawnMode::Normal);
        assert_eq!(s.store().write_count(), 0);
        assert_eq!(s.history_len(), 0);
    }

    #[test]
    fn test_store_failure_does_not_interrupt_play() {
        let mut s = GameSession::new(
            SessionConfig::default().with_seed(8).with_initial_tiles(0),
            FailingStore,
        );
        s.grid = Grid::from_values([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], &mut s.ids);

        let outcome = s.apply_move(Direction::Left);
        assert!(outcome.moved);
        assert_eq!(s.score(), 4);
        assert!(!s.save());
    }

    #[test]
    fn test_score_saturates_at_extremes() {
        let mut s = session();
        set_board(&mut s, [[2, 2, 8, 0], [0; 4], [0; 4], [0; 4]]);
        s.score = i64::MAX;
        s.best_score = i64::MAX;

        let outcome = s.apply_move(Direction::Left);
        assert_eq!(outcome.score_delta, 4);
        assert_eq!(s.score(), i64::MAX);
        assert_eq!(s.best_score(), i64::MAX);

        s.score = i64::MIN;
        let frame = s.handle(InputEvent::RemoveTile { row: 0, col: 1 });
        assert!(frame.moved);
        assert_eq!(s.score(), i64::MIN);
        assert_eq!(frame.score_delta, 0);

        let frame = s.handle(InputEvent::Restart);
        assert_eq!(frame.score, 0);
        assert_eq!(frame.score_delta, i64::MAX);
    }

    #[test]
    fn test_config_is_kept() {
        let s = GameSession::new(
            SessionConfig::default().with_seed(5).with_history_capacity(3),
            MemoryStore::new(),
        );
        assert_eq!(s.config().history_capacity, 3);
        assert_eq!(s.config().seed, Some(5));
    }

    #[test]
    fn test_host_can_rewrite_store() {
        let mut s = session();
        set_board(&mut s, [[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let bytes = encode(&s.snapshot()).unwrap();

        s.apply_move(Direction::Left);
        s.store_mut().write(&bytes).unwrap();

        let reopened = GameSession::new(SessionConfig::default().with_seed(42), s.store().clone());
        assert_eq!(reopened.grid().values()[0], [4, 4, 0, 0]);
        assert_eq!(reopened.score(), 0);
    }

    #[test]
    fn test_handle_dispatch() {
        let mut s = session();
        set_board(&mut s, [[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);

        let frame = s.handle(InputEvent::Move(Direction::Left));
        assert!(frame.moved);
        assert_eq!(frame.score_delta, 8);
        assert_eq!(frame.score, 8);
        assert_eq!(frame.tiles().count(), 2);

        let frame = s.handle(InputEvent::Undo);
        assert!(frame.moved);
        assert_eq!(frame.score_delta, -8);
        assert_eq!(frame.score, 0);

        let frame = s.handle(InputEvent::RemoveTile { row: 0, col: 0 });
        assert!(frame.moved);
        assert_eq!(frame.score_delta, -4);

        let frame = s.handle(InputEvent::CycleMode);
        assert!(!frame.moved);
        assert_eq!(frame.spawn_mode, SpawnMode::AlwaysTwo);

        let frame = s.handle(InputEvent::Restart);
        assert!(frame.moved);
        assert_eq!(frame.score, 0);
        assert_eq!(frame.score_delta, 4);
        assert!(!frame.terminal);
    }
}
