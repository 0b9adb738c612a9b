//! Highscore store trait

/// Persistent storage for the single highscore value.
///
/// Both operations are deliberately infallible at this seam: storage
/// problems must never stall or kill the render loop. Implementations log
/// failures and move on.
pub trait HighscoreStore {
    /// Load the persisted highscore. Missing or corrupt storage reads as 0.
    fn load(&mut self) -> u32;

    /// Persist a new highscore, best-effort. On failure the in-memory value
    /// remains authoritative for the running session.
    fn save(&mut self, value: u32);
}
