//! Reorder profile: every anchor, marker and separator the tool relies on.
//!
//! The built-in [`ReorderProfile::default`] describes the seven-engine landing
//! page. A JSON file can replace any subset of the fields; omitted fields keep
//! their built-in values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::ReorderError;

/// Built-in engine sections in target order: (label, anchor)
const ENGINE_SECTIONS: [(&str, &str); 7] = [
    ("一", "{/* 引擎一:AI数字人·7x24直播 */"),
    ("二", "{/* 引擎二:AI智能选品 */"),
    ("三", "{/* 引擎三:营销内容生成 */"),
    ("四", "{/* 引擎四:AI广告投放优化 */"),
    ("五", "{/* 引擎五:AI矩阵运营·品牌资产 */"),
    ("六", "{/* 引擎六:AI售后提效·智能客服 */"),
    ("七", "{/* 引擎七:智慧经营·决策分析 */"),
];

/// One section the profile expects to find
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Short label used in reports (e.g. `一`)
    pub label: String,
    /// Comment anchor that opens the section, matched verbatim
    pub anchor: String,
}

impl SectionSpec {
    pub fn new(label: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            anchor: anchor.into(),
        }
    }
}

/// Constants driving extraction, layout and splicing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderProfile {
    /// Sections in target order; position N in this list is target position N+1
    pub sections: Vec<SectionSpec>,

    // Extraction
    /// Prefix shared by every section anchor; a section ends where the next one starts
    pub section_prefix: String,
    /// Closing tag of the section container that follows the last section
    pub closing_tag: String,
    /// Comment that opens the region after the closing tag
    pub trailing_comment: String,

    // Splicing
    /// Verbatim end boundary of the editable region
    pub region_end: String,
    /// Inserted between consecutive sections
    pub separator: String,
    /// Inserted between the last section and `region_end`
    pub trailer: String,

    // Containers
    /// Comment preceding the text container `<div>`
    pub text_marker: String,
    /// Comment preceding the visual container `<div>`
    pub visual_marker: String,
}

impl Default for ReorderProfile {
    fn default() -> Self {
        Self {
            sections: ENGINE_SECTIONS
                .iter()
                .map(|(label, anchor)| SectionSpec::new(*label, *anchor))
                .collect(),
            section_prefix: "{/* 引擎".to_string(),
            closing_tag: "</section>".to_string(),
            trailing_comment: "{/* 企业级定制".to_string(),
            region_end: "</section>\n\n          {/* 企业级定制·AI中枢 */".to_string(),
            separator: "\n\n              ".to_string(),
            trailer: "\n            ".to_string(),
            text_marker: "{/* 左侧文案区 */}".to_string(),
            visual_marker: "{/* 右侧视觉区 */}".to_string(),
        }
    }
}

impl ReorderProfile {
    /// Save profile to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize profile to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write profile to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load profile from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile from {:?}", path.as_ref()))?;

        let profile: Self =
            serde_json::from_str(&content).context("Failed to parse profile JSON")?;

        profile.validate()?;
        Ok(profile)
    }

    /// Number of sections every document must contain
    pub fn expected_sections(&self) -> usize {
        self.sections.len()
    }

    /// Validate the profile
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.sections.is_empty() {
            return Err(ReorderError::profile("at least one section is required"));
        }
        if self.section_prefix.is_empty() {
            return Err(ReorderError::profile("section prefix must not be empty"));
        }

        let mut labels = HashSet::new();
        let mut anchors = HashSet::new();
        for section in &self.sections {
            if section.label.trim().is_empty() {
                return Err(ReorderError::profile("section labels must not be empty"));
            }
            if !labels.insert(section.label.as_str()) {
                return Err(ReorderError::profile(format!(
                    "duplicate section label {}",
                    section.label
                )));
            }
            if !anchors.insert(section.anchor.as_str()) {
                return Err(ReorderError::profile(format!(
                    "duplicate anchor for section {}",
                    section.label
                )));
            }
            // A section only ends where the next anchor begins
            if !section.anchor.starts_with(&self.section_prefix) {
                return Err(ReorderError::profile(format!(
                    "anchor of section {} does not start with {:?}",
                    section.label, self.section_prefix
                )));
            }
        }

        let required = [
            ("closing tag", &self.closing_tag),
            ("trailing comment", &self.trailing_comment),
            ("region end", &self.region_end),
            ("text marker", &self.text_marker),
            ("visual marker", &self.visual_marker),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(ReorderError::profile(format!("{} must not be empty", name)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_profile_has_seven_engines() {
        let profile = ReorderProfile::default();
        assert_eq!(profile.expected_sections(), 7);
        let labels: Vec<&str> = profile.sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["一", "二", "三", "四", "五", "六", "七"]);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let mut profile = ReorderProfile::default();
        profile.separator = "\n\n".to_string();

        let temp_file = NamedTempFile::new().unwrap();
        profile.save_to_file(temp_file.path()).unwrap();

        let loaded = ReorderProfile::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"separator": "\n"}}"#).unwrap();

        let loaded = ReorderProfile::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.separator, "\n");
        assert_eq!(loaded.sections, ReorderProfile::default().sections);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ReorderProfile::load_from_file("/nonexistent/profile.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{{ not json").unwrap();
        assert!(ReorderProfile::load_from_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_load_rejects_invalid_profile() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"sections": []}}"#).unwrap();
        assert!(ReorderProfile::load_from_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_validation_duplicate_label() {
        let mut profile = ReorderProfile::default();
        profile.sections[1].label = "一".to_string();
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate section label"));
    }

    #[test]
    fn test_validation_duplicate_anchor() {
        let mut profile = ReorderProfile::default();
        profile.sections[2].anchor = profile.sections[0].anchor.clone();
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validation_anchor_without_prefix() {
        let mut profile = ReorderProfile::default();
        profile.sections[0].anchor = "{/* engine one */".to_string();
        let err = profile.validate().unwrap_err();
        assert!(matches!(err, ReorderError::Profile(_)));
    }

    #[test]
    fn test_validation_empty_marker() {
        let mut profile = ReorderProfile::default();
        profile.visual_marker.clear();
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("visual marker"));
    }
}
