// PDF rasterization: pdftoppm renders, lopdf counts pages
use image::DynamicImage;
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use crate::types::{Result, ViewerError};

/// Turns PDF pages into bitmaps. Page numbers are 1-based.
pub trait Rasterizer {
    fn page_count(&self, pdf_path: &Path) -> Result<usize>;
    fn render_page(&self, pdf_path: &Path, page: usize) -> Result<DynamicImage>;
}

pub struct PdftoppmRasterizer {
    program: PathBuf,
    dpi: u32,
}

impl PdftoppmRasterizer {
    pub fn new(program: impl Into<PathBuf>, dpi: u32) -> Self {
        Self {
            program: program.into(),
            dpi,
        }
    }
}

impl Rasterizer for PdftoppmRasterizer {
    fn page_count(&self, pdf_path: &Path) -> Result<usize> {
        pdf_page_count(pdf_path)
    }

    fn render_page(&self, pdf_path: &Path, page: usize) -> Result<DynamicImage> {
        log::debug!(
            "pdftoppm: rendering page {} of {} at {} dpi",
            page,
            pdf_path.display(),
            self.dpi
        );

        let temp_dir = TempDir::new()?;
        let output_prefix = temp_dir.path().join("page");
        let page_arg = page.to_string();
        let dpi_arg = self.dpi.to_string();

        // -singlefile drops the page suffix so the output name is fixed
        let output = Command::new(&self.program)
            .arg("-png")
            .arg("-singlefile")
            .args(["-r", dpi_arg.as_str()])
            .args(["-f", page_arg.as_str(), "-l", page_arg.as_str()])
            .arg(pdf_path)
            .arg(&output_prefix)
            .output()
            .map_err(|e| {
                ViewerError::Rasterize(format!("could not run {}: {}", self.program.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ViewerError::Rasterize(format!(
                "pdftoppm failed on page {}: {}",
                page,
                stderr.trim()
            )));
        }

        let output_file = temp_dir.path().join("page.png");
        if !output_file.exists() {
            return Err(ViewerError::Rasterize(format!(
                "output file not found at {}",
                output_file.display()
            )));
        }

        let image = image::open(&output_file)?;
        log::debug!("pdftoppm: page {} rendered at {}x{}", page, image.width(), image.height());
        Ok(image)
    }
}

pub fn pdf_page_count(pdf_path: &Path) -> Result<usize> {
    let document = Document::load(pdf_path)
        .map_err(|e| ViewerError::Pdf(format!("{}: {}", pdf_path.display(), e)))?;
    Ok(document.get_pages().len())
}
