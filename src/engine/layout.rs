//! Layout Normalizer and Layout Director
//!
//! Both work on the opening `<div>` tag that follows each container marker
//! (`{/* 左侧文案区 */}` for text, `{/* 右侧视觉区 */}` for the visual). Only the
//! double-quoted `className` value of those tags is touched.

use regex_lite::Regex;
use std::ops::Range;
use tracing::debug;

use super::patterns::{CLASS_ATTR_RE, SectionPatterns};
use crate::types::{Layout, ORDER_TOKEN_PAIRS, TEXT_FIRST_TOKENS, VISUAL_SECOND_TOKENS};

/// How a container's `className` is written
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassAttr {
    /// `className="..."`, value range in section coordinates
    Quoted(Range<usize>),
    /// `className={...}`; left alone
    Expression,
    Absent,
}

/// Opening tag of a container `<div>`
#[derive(Debug, Clone, PartialEq, Eq)]
struct ContainerTag {
    /// Offset of `<div`
    start: usize,
    class: ClassAttr,
}

/// Which containers received ordering tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectOutcome {
    pub text_containers: usize,
    pub visual_containers: usize,
}

impl DirectOutcome {
    /// True when `layout` needed no tokens, or both containers got theirs
    pub fn is_complete(&self, layout: Layout) -> bool {
        !layout.swaps_containers() || (self.text_containers > 0 && self.visual_containers > 0)
    }
}

/// Strip ordering tokens from both containers.
pub fn normalize(section: &str, patterns: &SectionPatterns) -> String {
    let mut edits = Vec::new();
    for opener in [&patterns.text_opener, &patterns.visual_opener] {
        for tag in container_tags(section, opener) {
            if let ClassAttr::Quoted(value) = tag.class {
                if let Some(stripped) = strip_order_tokens(&section[value.clone()]) {
                    debug!(
                        before = %&section[value.clone()],
                        after = %stripped,
                        "stripped ordering tokens"
                    );
                    edits.push((value, stripped));
                }
            }
        }
    }
    apply_edits(section, edits)
}

/// Insert the ordering tokens `layout` calls for.
///
/// A container whose marker or `<div` cannot be found is skipped without error;
/// the returned outcome says which containers were actually edited.
pub fn direct(
    section: &str,
    layout: Layout,
    patterns: &SectionPatterns,
) -> (String, DirectOutcome) {
    let mut outcome = DirectOutcome::default();
    if !layout.swaps_containers() {
        return (section.to_string(), outcome);
    }

    let mut edits = Vec::new();
    for tag in container_tags(section, &patterns.text_opener) {
        if let Some(edit) = add_token(section, &tag, TEXT_FIRST_TOKENS) {
            edits.push(edit);
            outcome.text_containers += 1;
        }
    }
    for tag in container_tags(section, &patterns.visual_opener) {
        if let Some(edit) = add_token(section, &tag, VISUAL_SECOND_TOKENS) {
            edits.push(edit);
            outcome.visual_containers += 1;
        }
    }

    (apply_edits(section, edits), outcome)
}

/// Normalize, then direct.
pub fn apply_layout(
    section: &str,
    layout: Layout,
    patterns: &SectionPatterns,
) -> (String, DirectOutcome) {
    direct(&normalize(section, patterns), layout, patterns)
}

/// Remove every ordering token pair from a class list.
///
/// Pairs exposed by an earlier removal are removed too. Returns `None` when
/// the list has no pair, so untouched attributes keep their exact spacing.
pub fn strip_order_tokens(classes: &str) -> Option<String> {
    let mut kept: Vec<&str> = Vec::new();
    let mut removed = false;
    for token in classes.split_whitespace() {
        match kept.last() {
            Some(&previous) if is_order_pair(previous, token) => {
                kept.pop();
                removed = true;
            }
            _ => kept.push(token),
        }
    }
    removed.then(|| kept.join(" "))
}

fn is_order_pair(first: &str, second: &str) -> bool {
    ORDER_TOKEN_PAIRS
        .iter()
        .any(|pair| pair.split_once(' ') == Some((first, second)))
}

fn add_token(section: &str, tag: &ContainerTag, token: &str) -> Option<(Range<usize>, String)> {
    match &tag.class {
        ClassAttr::Quoted(value) => {
            // Single-spaced, so a later strip-and-append yields the same text
            let updated = section[value.clone()]
                .split_whitespace()
                .chain([token])
                .collect::<Vec<_>>()
                .join(" ");
            Some((value.clone(), updated))
        }
        ClassAttr::Absent => {
            let at = tag.start + "<div".len();
            Some((at..at, format!(" className=\"{}\"", token)))
        }
        ClassAttr::Expression => {
            debug!(offset = tag.start, "container className is an expression; skipped");
            None
        }
    }
}

fn container_tags(section: &str, opener: &Regex) -> Vec<ContainerTag> {
    opener
        .captures_iter(section)
        .filter_map(|caps| {
            let start = caps.get(1)?.start();
            let end = tag_end(section, start)?;
            Some(ContainerTag {
                start,
                class: class_attr(section, start..end),
            })
        })
        .collect()
}

fn class_attr(section: &str, tag: Range<usize>) -> ClassAttr {
    let text = &section[tag.clone()];
    if let Some(value) = CLASS_ATTR_RE.captures(text).and_then(|caps| caps.get(1)) {
        ClassAttr::Quoted(tag.start + value.start()..tag.start + value.end())
    } else if text.contains("className=") {
        ClassAttr::Expression
    } else {
        ClassAttr::Absent
    }
}

/// Offset just past the `>` closing the tag that starts at `start`.
/// Quoted values and `{...}` expressions may contain `>`.
fn tag_end(text: &str, start: usize) -> Option<usize> {
    let mut quote = None;
    let mut depth = 0usize;
    for (offset, ch) in text[start..].char_indices() {
        match quote {
            Some(open) => {
                if ch == open {
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\'' if depth == 0 => quote = Some(ch),
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => return Some(start + offset + 1),
                _ => {}
            },
        }
    }
    None
}

fn apply_edits(text: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    if edits.is_empty() {
        return text.to_string();
    }
    edits.sort_by_key(|(range, _)| range.start);
    let mut out = String::with_capacity(text.len() + 64);
    let mut cursor = 0;
    for (range, replacement) in edits {
        out.push_str(&text[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    out
}
