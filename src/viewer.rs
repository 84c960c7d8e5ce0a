// Documents under review and the page lookup that feeds both panes
use std::path::PathBuf;

use crate::config::ViewerConfig;
use crate::image_cache::{CacheStatus, ImageCache};
use crate::model::{Page, ParsedResult};
use crate::rasterizer::Rasterizer;
use crate::table::{render_subject_table, SubjectTableView};
use crate::types::{Result, ViewerError};

pub const NO_DATA: &str = "No data available for this page.";
pub const NO_SUBJECTS: &str = "No subject data available for this page.";
pub const NO_PAGES: &str = "No cached pages for this document.";

/// One PDF/JSON pair. `index` is 1-based.
#[derive(Debug)]
pub struct Document {
    pub index: usize,
    pub label: String,
    pub pdf_path: PathBuf,
    pub result: ParsedResult,
    pub cache: ImageCache,
    page_count: usize,
}

impl Document {
    pub fn new(
        index: usize,
        label: impl Into<String>,
        pdf_path: impl Into<PathBuf>,
        result: ParsedResult,
        cache: ImageCache,
    ) -> Self {
        Self {
            index,
            label: label.into(),
            pdf_path: pdf_path.into(),
            result,
            cache,
            page_count: 0,
        }
    }

    /// Build the cache if its directory is missing, then count what is there.
    pub fn ensure_image_cache(&mut self, rasterizer: &dyn Rasterizer) -> Result<CacheStatus> {
        log::info!("Processing {}", self.pdf_path.display());
        let status = self.cache.ensure(rasterizer, &self.pdf_path)?;
        self.sync_page_count()?;
        Ok(status)
    }

    /// Re-read the cached image count from disk.
    pub fn sync_page_count(&mut self) -> Result<usize> {
        self.page_count = self.cache.page_count()?;
        Ok(self.page_count)
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn image_path(&self, page: usize) -> PathBuf {
        self.cache.image_path(page)
    }
}

#[derive(Debug)]
pub struct PageSelection<'a> {
    pub page: usize,
    pub image_path: PathBuf,
    pub record: Option<&'a Page>,
}

impl PageSelection<'_> {
    pub fn panel(&self) -> PanelContent {
        PanelContent::from_record(self.record)
    }

    /// Subject names listed more than once in the section the pane shows.
    pub fn duplicate_subjects(&self) -> Vec<&str> {
        self.record
            .and_then(Page::primary_section)
            .map(|section| section.duplicate_names())
            .unwrap_or_default()
    }

    /// Warn about repeated subjects. Called when the page is entered, not per frame.
    pub fn warn_duplicates(&self) {
        let duplicates = self.duplicate_subjects();
        if !duplicates.is_empty() {
            log::warn!(
                "Page {} lists subjects more than once: {}",
                self.page,
                duplicates.join(", ")
            );
        }
    }
}

/// What the results pane shows for one page.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    NoData,
    Section {
        grade: String,
        table: SubjectTableView,
        skipped_sections: usize,
    },
}

impl PanelContent {
    pub fn from_record(record: Option<&Page>) -> Self {
        let Some(page) = record else {
            return PanelContent::NoData;
        };
        let Some(section) = page.primary_section() else {
            return PanelContent::NoData;
        };

        PanelContent::Section {
            grade: section.grade_label().to_string(),
            table: render_subject_table(section),
            skipped_sections: page.sections.len() - 1,
        }
    }

    pub fn render_lines(&self) -> Vec<String> {
        match self {
            PanelContent::NoData => vec![NO_DATA.to_string()],
            PanelContent::Section { grade, table, skipped_sections } => {
                let mut lines = vec![format!("Grade: {}", grade), String::new()];
                match table {
                    SubjectTableView::Table(table) => lines.extend(table.render_lines()),
                    SubjectTableView::Empty => lines.push(NO_SUBJECTS.to_string()),
                }
                if *skipped_sections > 0 {
                    lines.push(String::new());
                    lines.push(format!("(+{} more sections not shown)", skipped_sections));
                }
                lines
            }
        }
    }
}

pub struct Viewer {
    pub title: String,
    pub about: String,
    documents: Vec<Document>,
}

impl Viewer {
    pub fn new(
        title: impl Into<String>,
        about: impl Into<String>,
        documents: Vec<Document>,
    ) -> Self {
        Self {
            title: title.into(),
            about: about.into(),
            documents,
        }
    }

    /// Load every configured result file. Image caches are not touched.
    pub fn from_config(config: &ViewerConfig) -> Result<Self> {
        let mut documents = Vec::with_capacity(config.documents.len());
        for (i, doc) in config.documents.iter().enumerate() {
            let result = ParsedResult::load(&doc.result)?;
            log::info!(
                "Loaded {} pages of results from {}",
                result.pages.len(),
                doc.result.display()
            );
            let cache = ImageCache::new(doc.image_dir(), config.render.jpeg_quality);
            documents.push(Document::new(i + 1, doc.label.clone(), doc.pdf.clone(), result, cache));
        }
        Ok(Self::new(config.title.clone(), config.about.clone(), documents))
    }

    pub fn ensure_image_caches(&mut self, rasterizer: &dyn Rasterizer) -> Result<()> {
        for document in &mut self.documents {
            match document.ensure_image_cache(rasterizer)? {
                CacheStatus::Created { pages } => {
                    log::info!("{}: cached {} pages", document.label, pages)
                }
                CacheStatus::AlreadyPresent => {
                    log::info!("{}: using {} cached pages", document.label, document.page_count())
                }
            }
        }
        Ok(())
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn document(&self, index: usize) -> Result<&Document> {
        index
            .checked_sub(1)
            .and_then(|i| self.documents.get(i))
            .ok_or(ViewerError::UnknownDocument(index))
    }

    /// Image path and result record for a 1-based page of a 1-based document.
    pub fn select_page(&self, index: usize, page: usize) -> Result<PageSelection<'_>> {
        let document = self.document(index)?;
        let max = document.page_count();
        if page == 0 || page > max {
            return Err(ViewerError::PageOutOfRange { page, max });
        }
        Ok(PageSelection {
            page,
            image_path: document.image_path(page),
            record: document.result.page(page),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(json: &str) -> Page {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_record_is_no_data() {
        assert_eq!(PanelContent::from_record(None), PanelContent::NoData);
        assert_eq!(PanelContent::NoData.render_lines(), vec![NO_DATA.to_string()]);
    }

    #[test]
    fn record_without_sections_is_no_data() {
        let p = page(r#"{"page_number": 2, "sections": []}"#);
        assert_eq!(PanelContent::from_record(Some(&p)), PanelContent::NoData);
    }

    #[test]
    fn empty_subjects_show_notice() {
        let p = page(r#"{"page_number": 2, "sections": [{"grade": "11", "subjects": []}]}"#);
        let panel = PanelContent::from_record(Some(&p));
        assert_eq!(
            panel.render_lines(),
            vec!["Grade: 11".to_string(), String::new(), NO_SUBJECTS.to_string()]
        );
    }

    #[test]
    fn extra_sections_are_noted() {
        let p = page(r#"{"page_number": 1, "sections": [{"grade": "10"}, {"grade": "11"}]}"#);
        let panel = PanelContent::from_record(Some(&p));
        match &panel {
            PanelContent::Section { grade, skipped_sections, .. } => {
                assert_eq!(grade, "10");
                assert_eq!(*skipped_sections, 1);
            }
            other => panic!("unexpected panel {:?}", other),
        }
        assert_eq!(panel.render_lines().last().unwrap(), "(+1 more sections not shown)");
    }

    #[test]
    fn repeated_subjects_come_from_the_shown_section() {
        let p = page(
            r#"{"page_number": 3, "sections": [
                {"grade": "10", "subjects": [{"name": "Toán"}, {"name": "Văn"}, {"name": "Toán"}]},
                {"grade": "11", "subjects": [{"name": "Văn"}, {"name": "Văn"}]}
            ]}"#,
        );
        let selection = PageSelection {
            page: 3,
            image_path: PathBuf::from("page_3.jpg"),
            record: Some(&p),
        };
        assert_eq!(selection.duplicate_subjects(), vec!["Toán"]);

        let empty = PageSelection { record: None, ..selection };
        assert!(empty.duplicate_subjects().is_empty());
    }

    #[test]
    fn unknown_document_is_error() {
        let viewer = Viewer::new("t", "a", Vec::new());
        assert!(matches!(viewer.document(0), Err(ViewerError::UnknownDocument(0))));
        assert!(matches!(viewer.select_page(1, 1), Err(ViewerError::UnknownDocument(1))));
    }
}
