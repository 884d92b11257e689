//! Best-score tracking
//!
//! A single record that only ever goes up. Committed once per finished run.

use serde::{Deserialize, Serialize};

use crate::persistence::PersistenceGateway;

/// The persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u32,
}

impl HighScoreRecord {
    pub fn new(score: u32) -> Self {
        Self { score }
    }

    /// Whether `score` would replace this record
    pub fn beaten_by(&self, score: u32) -> bool {
        score > self.score
    }
}

/// What the commit at game over did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitOutcome {
    /// No record existed, one was created
    Created { score: u32 },
    /// The run beat the record
    Updated { previous: u32, score: u32 },
    /// The record stands
    Kept { best: u32 },
    /// Storage failed; the record may be stale
    Failed,
}

impl CommitOutcome {
    /// True if this run set a new best
    pub fn is_new_best(&self) -> bool {
        matches!(self, CommitOutcome::Created { .. } | CommitOutcome::Updated { .. })
    }

    /// Best score known after the commit (None if storage failed)
    pub fn best(&self) -> Option<u32> {
        match *self {
            CommitOutcome::Created { score } | CommitOutcome::Updated { score, .. } => Some(score),
            CommitOutcome::Kept { best } => Some(best),
            CommitOutcome::Failed => None,
        }
    }
}

/// Read-modify-write the best score for a finished run
///
/// Fetches once and saves at most once. Failures are logged and reported as
/// [`CommitOutcome::Failed`]; they never propagate to the simulation.
pub fn commit_best_score<G: PersistenceGateway + ?Sized>(
    gateway: &mut G,
    score: u32,
) -> CommitOutcome {
    let current = match gateway.fetch_best() {
        Ok(current) => current.map(HighScoreRecord::new),
        Err(e) => {
            log::warn!("Could not read best score: {e}");
            return CommitOutcome::Failed;
        }
    };

    let outcome = match current {
        None => CommitOutcome::Created { score },
        Some(record) if record.beaten_by(score) => CommitOutcome::Updated {
            previous: record.score,
            score,
        },
        Some(record) => return CommitOutcome::Kept { best: record.score },
    };

    match gateway.save_best(score) {
        Ok(()) => {
            match outcome {
                CommitOutcome::Created { .. } => {
                    log::info!("No best score found, created one: {score}")
                }
                _ => log::info!("Best score updated: {score}"),
            }
            outcome
        }
        Err(e) => {
            log::warn!("Could not save best score {score}: {e}");
            CommitOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use crate::persistence::MemoryGateway;

    /// Gateway that fails on demand
    struct Broken {
        fail_fetch: bool,
        saves: u32,
    }

    impl PersistenceGateway for Broken {
        fn fetch_best(&mut self) -> Result<Option<u32>, PersistenceError> {
            if self.fail_fetch {
                Err(PersistenceError::Unavailable)
            } else {
                Ok(Some(1))
            }
        }

        fn save_best(&mut self, _score: u32) -> Result<(), PersistenceError> {
            self.saves += 1;
            Err(PersistenceError::Backend("disk full".into()))
        }
    }

    #[test]
    fn test_creates_record_when_missing() {
        let mut store = MemoryGateway::new();
        let outcome = commit_best_score(&mut store, 7);
        assert_eq!(outcome, CommitOutcome::Created { score: 7 });
        assert_eq!(store.best(), Some(7));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_creates_record_even_for_zero() {
        let mut store = MemoryGateway::new();
        assert_eq!(commit_best_score(&mut store, 0), CommitOutcome::Created { score: 0 });
        assert_eq!(store.best(), Some(0));
    }

    #[test]
    fn test_updates_only_when_strictly_greater() {
        let mut store = MemoryGateway::with_best(5);
        assert_eq!(commit_best_score(&mut store, 5), CommitOutcome::Kept { best: 5 });
        assert_eq!(commit_best_score(&mut store, 3), CommitOutcome::Kept { best: 5 });
        assert_eq!(store.save_count(), 0);

        let outcome = commit_best_score(&mut store, 6);
        assert_eq!(outcome, CommitOutcome::Updated { previous: 5, score: 6 });
        assert!(outcome.is_new_best());
        assert_eq!(store.best(), Some(6));
    }

    #[test]
    fn test_fetch_failure_skips_save() {
        let mut store = Broken {
            fail_fetch: true,
            saves: 0,
        };
        assert_eq!(commit_best_score(&mut store, 10), CommitOutcome::Failed);
        assert_eq!(store.saves, 0);
    }

    #[test]
    fn test_save_failure_reported() {
        let mut store = Broken {
            fail_fetch: false,
            saves: 0,
        };
        let outcome = commit_best_score(&mut store, 10);
        assert_eq!(outcome, CommitOutcome::Failed);
        assert_eq!(outcome.best(), None);
        assert_eq!(store.saves, 1);
    }
}
