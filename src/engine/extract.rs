//! Section Extractor
//!
//! A section runs from its anchor up to the whitespace preceding the next
//! section anchor, or preceding the closing tag that ends the engine region.
//! Matching is textual: a misspelled anchor or a missing terminator yields no
//! section rather than a partial one.

use regex_lite::Regex;
use std::ops::Range;
use tracing::{info, warn};

use super::patterns::SectionPatterns;
use crate::error::{ReorderError, Result};
use crate::profile::ReorderProfile;

/// A section located in the source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: String,
    /// 1-based position in the rebuilt document
    pub target_position: usize,
    /// 0-based position among the sections as they appear in the source
    pub source_index: usize,
    /// Byte range in the source document
    pub range: Range<usize>,
}

impl Section {
    pub fn text<'doc>(&self, doc: &'doc str) -> &'doc str {
        &doc[self.range.clone()]
    }
}

/// Byte range of the section opened by `anchor`, if both the anchor and a
/// terminator can be found.
pub fn extract_section(doc: &str, anchor: &str, stop: &Regex) -> Option<Range<usize>> {
    let start = doc.find(anchor)?;
    let end = stop.find_at(doc, start + anchor.len())?.start();
    Some(start..end)
}

/// Extract every profile section, returned in target order.
///
/// Fails with [`ReorderError::SectionCount`] naming each label that could not
/// be extracted; no partial result is returned.
pub fn extract_all(
    doc: &str,
    profile: &ReorderProfile,
    patterns: &SectionPatterns,
) -> Result<Vec<Section>> {
    let expected = profile.expected_sections();
    let mut sections = Vec::with_capacity(expected);
    let mut missing = Vec::new();

    for (index, spec) in profile.sections.iter().enumerate() {
        match extract_section(doc, &spec.anchor, &patterns.stop) {
            Some(range) => {
                info!(
                    label = %spec.label,
                    offset = range.start,
                    bytes = range.len(),
                    "extracted section"
                );
                sections.push(Section {
                    label: spec.label.clone(),
                    target_position: index + 1,
                    source_index: 0,
                    range,
                });
            }
            None => {
                warn!(
                    label = %spec.label,
                    anchor = %spec.anchor,
                    "section anchor or terminator not found"
                );
                missing.push(spec.label.clone());
            }
        }
    }

    if !missing.is_empty() {
        return Err(ReorderError::SectionCount {
            found: sections.len(),
            expected,
            missing,
        });
    }

    let mut by_offset: Vec<usize> = (0..sections.len()).collect();
    by_offset.sort_by_key(|&i| sections[i].range.start);
    for (source_index, i) in by_offset.into_iter().enumerate() {
        sections[i].source_index = source_index;
    }

    Ok(sections)
}
