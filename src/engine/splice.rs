//! Reassembler: locates the engine region and replaces it with the reordered
//! sections.

use std::ops::Range;

use super::extract::Section;
use crate::error::{ReorderError, Result};

/// Locate the region of `doc` that the rebuilt sections replace.
///
/// The region starts at the earliest section anchor and ends at the first
/// verbatim `region_end` after it. Every section must lie inside the region
/// and sections must not overlap.
pub fn locate_region(doc: &str, sections: &[Section], region_end: &str) -> Result<Range<usize>> {
    let mut ranges: Vec<&Range<usize>> = sections.iter().map(|s| &s.range).collect();
    ranges.sort_by_key(|range| range.start);

    let start = ranges
        .first()
        .map(|range| range.start)
        .ok_or_else(|| ReorderError::boundary("no sections to splice"))?;

    let end = doc[start..]
        .find(region_end)
        .map(|offset| start + offset)
        .ok_or_else(|| {
            ReorderError::boundary(format!(
                "end marker {:?} not found after the first section",
                region_end
            ))
        })?;

    for pair in ranges.windows(2) {
        if pair[0].end > pair[1].start {
            return Err(ReorderError::boundary(format!(
                "sections at offsets {} and {} overlap",
                pair[0].start, pair[1].start
            )));
        }
    }
    if let Some(last) = ranges.last() {
        if last.end > end {
            return Err(ReorderError::boundary(format!(
                "section at offset {} extends past the end marker at {}",
                last.start, end
            )));
        }
    }

    Ok(start..end)
}

/// Replace `region` with `bodies` joined by `separator`, followed by `trailer`.
pub fn splice(
    doc: &str,
    region: Range<usize>,
    bodies: &[String],
    separator: &str,
    trailer: &str,
) -> String {
    let joined = bodies.join(separator);
    let mut out = String::with_capacity(doc.len() - region.len() + joined.len() + trailer.len());
    out.push_str(&doc[..region.start]);
    out.push_str(&joined);
    out.push_str(trailer);
    out.push_str(&doc[region.end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(label: &str, range: Range<usize>) -> Section {
        Section {
            label: label.to_string(),
            target_position: 1,
            source_index: 0,
            range,
        }
    }

    #[test]
    fn test_region_spans_earliest_section_to_end_marker() {
        let doc = "head [B] [A] </end> tail";
        let sections = [section("A", 9..12), section("B", 5..8)];
        let region = locate_region(doc, &sections, "</end>").unwrap();
        assert_eq!(region, 5..13);
    }

    #[test]
    fn test_missing_end_marker_is_boundary_error() {
        let doc = "head [A] tail";
        let err = locate_region(doc, &[section("A", 5..8)], "</end>").unwrap_err();
        assert!(matches!(err, ReorderError::Boundary(_)));
    }

    #[test]
    fn test_end_marker_before_sections_is_ignored() {
        let doc = "</end> [A] tail";
        assert!(locate_region(doc, &[section("A", 7..10)], "</end>").is_err());
    }

    #[test]
    fn test_section_past_end_marker_is_rejected() {
        let doc = "[A] </end> [B]";
        let sections = [section("A", 0..3), section("B", 11..14)];
        let err = locate_region(doc, &sections, "</end>").unwrap_err();
        assert!(err.to_string().contains("extends past"));
    }

    #[test]
    fn test_overlapping_sections_are_rejected() {
        let doc = "[AAAA] </end>";
        let sections = [section("A", 0..6), section("B", 2..4)];
        assert!(locate_region(doc, &sections, "</end>").is_err());
    }

    #[test]
    fn test_splice_joins_with_separator_and_trailer() {
        let doc = "head [B] [A] </end> tail";
        let out = splice(
            doc,
            5..13,
            &["[A]".to_string(), "[B]".to_string()],
            " | ",
            "\n",
        );
        assert_eq!(out, "head [A] | [B]\n</end> tail");
    }
}
