//! File-level reorder run.
//!
//! Reads the document, plans it, and writes it back in place. The write is the
//! last step and happens only when planning succeeded, so any failure leaves
//! the file exactly as it was.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::engine::{Reorderer, SectionReport};
use crate::error::Result;
use crate::run_state::{RunContext, RunStage};

/// Options for a single run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Plan only; never write the document
    pub dry_run: bool,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub path: PathBuf,
    /// Sections in target order
    pub sections: Vec<SectionReport>,
    /// Byte range of the source document that was replaced
    pub region: Range<usize>,
    /// Whether the rebuilt document differs from the original
    pub changed: bool,
    /// Whether the document was written back
    pub written: bool,
    pub dry_run: bool,
}

/// Reorder the document at `path` in place, driving `ctx` from `Start`.
///
/// On error `ctx` is left in `Failed` with [`RunContext::failed_at`] naming
/// the stage that was in progress.
pub fn run(
    path: &Path,
    reorderer: &Reorderer,
    options: RunOptions,
    ctx: &mut RunContext,
) -> Result<RunReport> {
    let result = run_in(path, reorderer, options, ctx);
    if result.is_err() {
        ctx.fail();
    }
    result
}

fn run_in(
    path: &Path,
    reorderer: &Reorderer,
    options: RunOptions,
    ctx: &mut RunContext,
) -> Result<RunReport> {
    ctx.advance(RunStage::Read)?;
    let original = fs::read_to_string(path)?;
    info!(path = %path.display(), bytes = original.len(), "read document");

    let plan = reorderer.plan_in(&original, ctx)?;

    ctx.advance(RunStage::Write)?;
    let written = if options.dry_run {
        info!("dry run: document not written");
        false
    } else if !plan.changed {
        info!("document already in target order and layout; nothing to write");
        false
    } else {
        fs::write(path, &plan.document)?;
        info!(path = %path.display(), bytes = plan.document.len(), "wrote document");
        true
    };
    ctx.advance(RunStage::Done)?;

    Ok(RunReport {
        path: path.to_path_buf(),
        sections: plan.sections,
        region: plan.region,
        changed: plan.changed,
        written,
        dry_run: options.dry_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReorderError;
    use crate::profile::ReorderProfile;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let reorderer = Reorderer::new(ReorderProfile::default()).unwrap();
        let mut ctx = RunContext::new();
        let err = run(
            &dir.path().join("index.html"),
            &reorderer,
            RunOptions::default(),
            &mut ctx,
        )
        .unwrap_err();
        assert!(matches!(err, ReorderError::Io(_)));
        assert_eq!(ctx.stage(), RunStage::Failed);
        assert_eq!(ctx.failed_at(), Some(RunStage::Read));
    }

    #[test]
    fn test_document_without_sections_is_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "<html></html>").unwrap();

        let reorderer = Reorderer::new(ReorderProfile::default()).unwrap();
        let mut ctx = RunContext::new();
        let err = run(&path, &reorderer, RunOptions::default(), &mut ctx).unwrap_err();

        assert_eq!(err.missing_labels().len(), 7);
        assert_eq!(ctx.failed_at(), Some(RunStage::Extract));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }
}
