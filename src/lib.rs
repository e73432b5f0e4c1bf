//! section-reorder library
//!
//! Reorders the numbered engine sections of a landing page into a fixed
//! sequence and alternates their image/text layout through responsive
//! ordering classes.

pub mod cli;
pub mod engine;
pub mod error;
pub mod profile;
pub mod report;
pub mod run_state;
pub mod runner;
pub mod types;

pub use engine::{ReorderPlan, Reorderer, Section, SectionReport};
pub use error::{ReorderError, Result};
pub use profile::{ReorderProfile, SectionSpec};
pub use run_state::{RunContext, RunStage, StageTransitionError};
pub use runner::{RunOptions, RunReport, run};
pub use types::Layout;
