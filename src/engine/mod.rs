//! Section reorder engine
//!
//! Turns a document into a [`ReorderPlan`]: sections extracted by anchor,
//! relaid out by target position, and spliced back in target order.
//!
//! # Design
//!
//! - **Pure logic**: No I/O; the runner owns reading and writing
//! - **All or nothing**: any failure returns an error and no document
//! - **Re-runnable**: planning an already reordered document yields it unchanged

pub mod extract;
pub mod layout;
pub mod patterns;
pub mod splice;

use tracing::{debug, warn};

use crate::error::Result;
use crate::profile::ReorderProfile;
use crate::run_state::{RunContext, RunStage};
use crate::types::Layout;

pub use extract::Section;
pub use layout::DirectOutcome;
pub use patterns::SectionPatterns;

/// Outcome for one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub label: String,
    pub source_index: usize,
    pub target_position: usize,
    pub layout: Layout,
    pub outcome: DirectOutcome,
}

impl SectionReport {
    /// Whether every ordering token the layout calls for was placed
    pub fn layout_applied(&self) -> bool {
        self.outcome.is_complete(self.layout)
    }
}

/// Result of planning a document
#[derive(Debug, Clone)]
pub struct ReorderPlan {
    /// The rebuilt document
    pub document: String,
    /// Reports in target order
    pub sections: Vec<SectionReport>,
    /// Byte range of the replaced region in the source document
    pub region: std::ops::Range<usize>,
    /// Whether `document` differs from the source
    pub changed: bool,
}

/// Validated profile plus its compiled patterns
#[derive(Debug, Clone)]
pub struct Reorderer {
    profile: ReorderProfile,
    patterns: SectionPatterns,
}

impl Reorderer {
    pub fn new(profile: ReorderProfile) -> Result<Self> {
        profile.validate()?;
        let patterns = SectionPatterns::compile(&profile)?;
        Ok(Self { profile, patterns })
    }

    pub fn profile(&self) -> &ReorderProfile {
        &self.profile
    }

    /// Plan `doc` from a fresh run context.
    pub fn plan(&self, doc: &str) -> Result<ReorderPlan> {
        let mut ctx = RunContext::new();
        ctx.advance(RunStage::Read)?;
        self.plan_in(doc, &mut ctx)
    }

    /// Plan `doc`, advancing `ctx` from `Read` through `Splice`.
    pub fn plan_in(&self, doc: &str, ctx: &mut RunContext) -> Result<ReorderPlan> {
        ctx.advance(RunStage::Extract)?;
        let sections = extract::extract_all(doc, &self.profile, &self.patterns)?;

        ctx.advance(RunStage::Layout)?;
        let mut bodies = Vec::with_capacity(sections.len());
        let mut reports = Vec::with_capacity(sections.len());
        for section in &sections {
            let layout = Layout::for_position(section.target_position);
            let (body, outcome) = layout::apply_layout(section.text(doc), layout, &self.patterns);
            if !outcome.is_complete(layout) {
                warn!(
                    label = %section.label,
                    text = outcome.text_containers,
                    visual = outcome.visual_containers,
                    "container marker not found; ordering tokens not placed"
                );
            }
            debug!(
                label = %section.label,
                %layout,
                position = section.target_position,
                "laid out section"
            );
            bodies.push(body);
            reports.push(SectionReport {
                label: section.label.clone(),
                source_index: section.source_index,
                target_position: section.target_position,
                layout,
                outcome,
            });
        }

        ctx.advance(RunStage::LocateBoundaries)?;
        let region = splice::locate_region(doc, &sections, &self.profile.region_end)?;
        debug!(start = region.start, end = region.end, "located engine region");

        ctx.advance(RunStage::Splice)?;
        let document = splice::splice(
            doc,
            region.clone(),
            &bodies,
            &self.profile.separator,
            &self.profile.trailer,
        );
        let changed = document != doc;

        Ok(ReorderPlan {
            document,
            sections: reports,
            region,
            changed,
        })
    }
}
