// On-disk page image cache: page_<n>.jpg, written once per document
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::rasterizer::Rasterizer;
use crate::types::Result;

static PAGE_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^page_(\d+)\.jpg$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    AlreadyPresent,
    Created { pages: usize },
}

#[derive(Debug, Clone)]
pub struct ImageCache {
    dir: PathBuf,
    jpeg_quality: u8,
}

impl ImageCache {
    pub fn new(dir: impl Into<PathBuf>, jpeg_quality: u8) -> Self {
        Self {
            dir: dir.into(),
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Rasterize every page of `pdf_path` unless the cache directory exists.
    ///
    /// Directory existence is the only check: a cache left half-written by an
    /// interrupted run counts as complete.
    pub fn ensure(&self, rasterizer: &dyn Rasterizer, pdf_path: &Path) -> Result<CacheStatus> {
        if self.dir.exists() {
            log::debug!("Image cache {} already present", self.dir.display());
            return Ok(CacheStatus::AlreadyPresent);
        }

        fs::create_dir_all(&self.dir)?;
        let pages = rasterizer.page_count(pdf_path)?;
        log::info!("Rasterizing {} pages of {}", pages, pdf_path.display());

        for page in 1..=pages {
            let image = rasterizer.render_page(pdf_path, page)?;
            self.write_page(page, &image)?;
        }

        log::info!("Wrote {} page images to {}", pages, self.dir.display());
        Ok(CacheStatus::Created { pages })
    }

    /// Number of cached page images. A missing directory counts as empty.
    pub fn page_count(&self) -> Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut count = 0;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if PAGE_FILE.is_match(&entry.file_name().to_string_lossy()) {
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn image_path(&self, page: usize) -> PathBuf {
        self.dir.join(format!("page_{}.jpg", page))
    }

    fn write_page(&self, page: usize, image: &DynamicImage) -> Result<()> {
        let path = self.image_path(page);
        let mut writer = BufWriter::new(File::create(&path)?);
        JpegEncoder::new_with_quality(&mut writer, self.jpeg_quality)
            .encode_image(&image.to_rgb8())?;
        // Dropping the BufWriter would swallow a failed final write
        writer.flush()?;
        Ok(())
    }
}
