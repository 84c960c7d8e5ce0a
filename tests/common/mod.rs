// Shared fixtures: an in-memory rasterizer and report card JSON
#![allow(dead_code)]

use hocba_viewer::{Rasterizer, Result};
use image::{DynamicImage, Rgb, RgbImage};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

/// Stands in for pdftoppm: every page is a small solid image.
pub struct FakeRasterizer {
    pub pages: usize,
    pub count_calls: Cell<usize>,
    pub render_calls: Cell<usize>,
}

impl FakeRasterizer {
    pub fn new(pages: usize) -> Self {
        Self {
            pages,
            count_calls: Cell::new(0),
            render_calls: Cell::new(0),
        }
    }
}

impl Rasterizer for FakeRasterizer {
    fn page_count(&self, _pdf_path: &Path) -> Result<usize> {
        self.count_calls.set(self.count_calls.get() + 1);
        Ok(self.pages)
    }

    fn render_page(&self, _pdf_path: &Path, page: usize) -> Result<DynamicImage> {
        self.render_calls.set(self.render_calls.get() + 1);
        let shade = (page * 20 % 255) as u8;
        Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 24, Rgb([shade, shade, shade]))))
    }
}

pub const REPORT_CARD: &str = r#"{
    "pages": [
        {"page_number": 1, "sections": [
            {"grade": "10", "subjects": [
                {"name": "Math", "gpa_cn": 8.96},
                {"name": "Physics", "gpa_term_1": 7.25, "gpa_term_2": 8.95, "gpa_cn": 8.35},
                {"name": "Literature", "gpa_term_1": 6.5, "gpa_term_2": null, "gpa_cn": 7}
            ]}
        ]},
        {"page_number": 2, "sections": [{"grade": "11", "subjects": []}]},
        {"page_number": 4, "sections": []}
    ]
}"#;

/// Write JSON results and return their path.
pub fn write_result(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, json).unwrap();
    path
}

/// Pre-populate an image cache directory with `pages` JPEGs.
pub fn write_cache(dir: &Path, pages: usize) {
    fs::create_dir_all(dir).unwrap();
    for page in 1..=pages {
        RgbImage::from_pixel(8, 8, Rgb([255, 255, 255]))
            .save(dir.join(format!("page_{}.jpg", page)))
            .unwrap();
    }
}
