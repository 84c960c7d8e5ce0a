// Parsed classifier output: one JSON file per document
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::{Result, ViewerError};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParsedResult {
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    pub page_number: usize,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Section {
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Subject {
    pub name: String,
    #[serde(default)]
    pub gpa_term_1: Option<f64>,
    #[serde(default)]
    pub gpa_term_2: Option<f64>,
    #[serde(default)]
    pub gpa_cn: Option<f64>,
    /// Any other per-subject fields the classifier emitted.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ParsedResult {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|source| ViewerError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// First page record whose `page_number` equals `page`.
    pub fn page(&self, page: usize) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_number == page)
    }
}

impl Page {
    /// Only the first section is shown.
    pub fn primary_section(&self) -> Option<&Section> {
        self.sections.first()
    }
}

impl Section {
    pub fn grade_label(&self) -> &str {
        self.grade.as_deref().unwrap_or("N/A")
    }

    /// Subject names that occur more than once, in first-seen order.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        let mut dups: Vec<&str> = Vec::new();
        for subject in &self.subjects {
            let name = subject.name.as_str();
            if seen.contains(&name) {
                if !dups.contains(&name) {
                    dups.push(name);
                }
            } else {
                seen.push(name);
            }
        }
        dups
    }
}
