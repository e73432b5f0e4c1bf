//! Run State Machine
//!
//! Tracks the progress of a single reorder run. Stages only move forward, one
//! at a time; any non-terminal stage may fall into `Failed`.
//!
//! ```text
//! Start → Read → Extract → Layout → LocateBoundaries → Splice → Write → Done
//!
//! (Any non-terminal stage can transition to Failed)
//! ```
//!
//! Nothing is written before `Write`, so a run that fails earlier leaves the
//! document exactly as it was.

use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Stages of a run in sequential order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RunStage {
    Start = 0,
    /// Reading the whole document into memory
    Read = 1,
    /// Extracting every section by its anchor
    Extract = 2,
    /// Normalizing and directing each section's layout
    Layout = 3,
    /// Locating the splice region in the original document
    LocateBoundaries = 4,
    /// Building the rebuilt document
    Splice = 5,
    /// Writing the document back in place
    Write = 6,
    /// Completed successfully (terminal state)
    Done = 7,
    /// Aborted (terminal state)
    Failed = 255,
}

impl RunStage {
    #[inline]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// Returns true if this is a terminal state (Done or Failed)
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// The stage that follows this one on the success path
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::Read),
            Self::Read => Some(Self::Extract),
            Self::Extract => Some(Self::Layout),
            Self::Layout => Some(Self::LocateBoundaries),
            Self::LocateBoundaries => Some(Self::Splice),
            Self::Splice => Some(Self::Write),
            Self::Write => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Read => "read",
            Self::Extract => "extract",
            Self::Layout => "layout",
            Self::LocateBoundaries => "locate-boundaries",
            Self::Splice => "splice",
            Self::Write => "write",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rejected stage transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid run transition {from} -> {to}")]
pub struct StageTransitionError {
    pub from: RunStage,
    pub to: RunStage,
}

/// Owns the current stage of one run
#[derive(Debug, Clone)]
pub struct RunContext {
    stage: RunStage,
    failed_at: Option<RunStage>,
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RunContext {
    pub const fn new() -> Self {
        Self {
            stage: RunStage::Start,
            failed_at: None,
        }
    }

    pub const fn stage(&self) -> RunStage {
        self.stage
    }

    /// The stage that was in progress when the run failed
    pub const fn failed_at(&self) -> Option<RunStage> {
        self.failed_at
    }

    /// Move to `next`, which must directly follow the current stage
    pub fn advance(&mut self, next: RunStage) -> Result<(), StageTransitionError> {
        if self.stage.next() != Some(next) {
            return Err(StageTransitionError {
                from: self.stage,
                to: next,
            });
        }
        debug!(from = %self.stage, to = %next, "run stage transition");
        self.stage = next;
        Ok(())
    }

    /// Mark the run as failed. Terminal stages are left as they are.
    pub fn fail(&mut self) {
        if !self.stage.is_terminal() {
            debug!(from = %self.stage, "run failed");
            self.failed_at = Some(self.stage);
            self.stage = RunStage::Failed;
        }
    }
}
