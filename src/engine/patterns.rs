//! Patterns used to find sections and container tags.
//!
//! Profile-dependent patterns are compiled once per [`SectionPatterns`]; the
//! attribute pattern is fixed and cached with `LazyLock`.

use regex_lite::{Regex, escape};
use std::sync::LazyLock;

use crate::error::Result;
use crate::profile::ReorderProfile;

/// Matches a double-quoted `className` attribute inside an opening tag
pub static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\sclassName="([^"]*)""#).expect("className pattern is valid")
});

/// Patterns compiled from a profile
#[derive(Debug, Clone)]
pub struct SectionPatterns {
    /// Where a section stops: optional whitespace, then the next anchor or the
    /// closing tag / trailing comment pair. Group-free; the match start is the
    /// section end.
    pub stop: Regex,
    /// Text marker followed by its `<div` opener (group 1 is `<div`)
    pub text_opener: Regex,
    /// Visual marker followed by its `<div` opener (group 1 is `<div`)
    pub visual_opener: Regex,
}

impl SectionPatterns {
    pub fn compile(profile: &ReorderProfile) -> Result<Self> {
        let stop = Regex::new(&format!(
            r"\s*(?:{}|{}\s*\n\s*{})",
            escape(&profile.section_prefix),
            escape(&profile.closing_tag),
            escape(&profile.trailing_comment),
        ))?;

        Ok(Self {
            stop,
            text_opener: container_opener(&profile.text_marker)?,
            visual_opener: container_opener(&profile.visual_marker)?,
        })
    }
}

fn container_opener(marker: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"{}\s*(<div)(?:\s|/|>)", escape(marker)))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_matches_next_anchor_with_leading_whitespace() {
        let patterns = SectionPatterns::compile(&ReorderProfile::default()).unwrap();
        let text = "</div>\n\n    {/* 引擎三:营销内容生成 */}";
        let m = patterns.stop.find(text).unwrap();
        assert_eq!(m.start(), "</div>".len());
    }

    #[test]
    fn test_stop_matches_terminal_sequence() {
        let patterns = SectionPatterns::compile(&ReorderProfile::default()).unwrap();
        let text = "</div>\n  </section>\n\n  {/* 企业级定制·AI中枢 */}";
        let m = patterns.stop.find(text).unwrap();
        assert_eq!(m.start(), "</div>".len());
    }

    #[test]
    fn test_stop_ignores_closing_tag_without_trailing_comment() {
        let patterns = SectionPatterns::compile(&ReorderProfile::default()).unwrap();
        assert!(patterns.stop.find("</div>\n</section>\n<footer>").is_none());
    }

    #[test]
    fn test_opener_captures_div() {
        let patterns = SectionPatterns::compile(&ReorderProfile::default()).unwrap();
        let text = "{/* 左侧文案区 */}\n   <div className=\"a\">";
        let caps = patterns.text_opener.captures(text).unwrap();
        let div = caps.get(1).unwrap();
        assert_eq!(&text[div.start()..div.end()], "<div");
        assert!(patterns.visual_opener.captures(text).is_none());
    }

    #[test]
    fn test_opener_rejects_other_tags() {
        let patterns = SectionPatterns::compile(&ReorderProfile::default()).unwrap();
        assert!(patterns.text_opener.find("{/* 左侧文案区 */} <divider>").is_none());
    }

    #[test]
    fn test_class_attr_pattern() {
        let caps = CLASS_ATTR_RE
            .captures(r#"<div id="x" className="relative order-1">"#)
            .unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "relative order-1");
    }
}
