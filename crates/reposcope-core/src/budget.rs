//! Whole-run wall-clock budget.

use std::time::{Duration, Instant};

use crate::errors::RepoScopeError;

/// A deadline started at the beginning of a run and checked between stages
/// and before every hosting-API call.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn start(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// The instant the budget runs out, handed to host clients so a single
    /// call cannot outlive the run.
    pub fn expires_at(&self) -> Instant {
        Instant::now() + self.remaining()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.elapsed())
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed() >= self.budget
    }

    /// # Errors
    /// Returns [`RepoScopeError::BudgetExceeded`] once the budget is spent.
    pub fn check(&self) -> Result<(), RepoScopeError> {
        if self.is_expired() {
            return Err(RepoScopeError::BudgetExceeded {
                budget_secs: self.budget.as_secs(),
                elapsed_ms: self.elapsed().as_millis(),
            });
        }
        Ok(())
    }
}
