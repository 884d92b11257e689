//! Best-score storage boundary
//!
//! The simulation only needs to read and write one integer. Where it lives
//! (a database, LocalStorage, a file) is up to the embedder, who implements
//! [`PersistenceGateway`]. [`MemoryGateway`] keeps it in memory.

use crate::error::PersistenceError;

/// Read/write access to the single best-score record
pub trait PersistenceGateway {
    /// Current best score, `None` if no record exists yet
    fn fetch_best(&mut self) -> Result<Option<u32>, PersistenceError>;

    /// Create or overwrite the best-score record
    fn save_best(&mut self, score: u32) -> Result<(), PersistenceError>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for &mut G {
    fn fetch_best(&mut self) -> Result<Option<u32>, PersistenceError> {
        (**self).fetch_best()
    }

    fn save_best(&mut self, score: u32) -> Result<(), PersistenceError> {
        (**self).save_best(score)
    }
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for Box<G> {
    fn fetch_best(&mut self) -> Result<Option<u32>, PersistenceError> {
        (**self).fetch_best()
    }

    fn save_best(&mut self, score: u32) -> Result<(), PersistenceError> {
        (**self).save_best(score)
    }
}

/// In-memory best score, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    best: Option<u32>,
    /// Number of successful saves (handy for embedders' diagnostics)
    saves: u32,
}

impl MemoryGateway {
    /// Empty store, no record
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds a record
    pub fn with_best(score: u32) -> Self {
        Self {
            best: Some(score),
            saves: 0,
        }
    }

    pub fn best(&self) -> Option<u32> {
        self.best
    }

    pub fn save_count(&self) -> u32 {
        self.saves
    }
}

impl PersistenceGateway for MemoryGateway {
    fn fetch_best(&mut self) -> Result<Option<u32>, PersistenceError> {
        Ok(self.best)
    }

    fn save_best(&mut self, score: u32) -> Result<(), PersistenceError> {
        self.best = Some(score);
        self.saves += 1;
        Ok(())
    }
}
