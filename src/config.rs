// Viewer configuration: TOML file with built-in defaults for the three report cards
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{Result, ViewerError};

pub const CONFIG_ENV: &str = "HOCBA_VIEWER_CONFIG";
pub const LOCAL_CONFIG: &str = "hocba-viewer.toml";

// Log screen buffer
pub const MAX_DEBUG_LOGS: usize = 1000;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewerConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_about")]
    pub about: String,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default = "default_documents")]
    pub documents: Vec<DocumentConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    #[serde(default = "default_pdftoppm")]
    pub pdftoppm: PathBuf,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(default)]
    pub dark_mode: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutConfig {
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentConfig {
    pub label: String,
    pub pdf: PathBuf,
    pub result: PathBuf,
    /// Defaults to `<pdf dir>/<label>_images`.
    #[serde(default)]
    pub images: Option<PathBuf>,
}

fn default_title() -> String {
    "Document Classifier Results".to_string()
}

fn default_about() -> String {
    "This viewer displays the results of the document classifier for hocba1.pdf, hocba2.pdf, \
     and hocba3.pdf."
        .to_string()
}

fn default_pdftoppm() -> PathBuf {
    PathBuf::from("pdftoppm")
}

fn default_dpi() -> u32 {
    200
}

fn default_jpeg_quality() -> u8 {
    75
}

fn default_sidebar_width() -> u16 {
    28
}

fn default_documents() -> Vec<DocumentConfig> {
    (1..=3)
        .map(|idx| DocumentConfig {
            label: format!("hocba{}", idx),
            pdf: PathBuf::from(format!("./resources/hocba_test{}.pdf", idx)),
            result: PathBuf::from(format!("./data/hocba_{}_result_full.json", idx)),
            images: None,
        })
        .collect()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pdftoppm: default_pdftoppm(),
            dpi: default_dpi(),
            jpeg_quality: default_jpeg_quality(),
            dark_mode: false,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { sidebar_width: default_sidebar_width() }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            about: default_about(),
            render: RenderConfig::default(),
            layout: LayoutConfig::default(),
            documents: default_documents(),
        }
    }
}

impl DocumentConfig {
    pub fn image_dir(&self) -> PathBuf {
        match &self.images {
            Some(dir) => dir.clone(),
            None => {
                let parent = self.pdf.parent().unwrap_or_else(|| Path::new("."));
                parent.join(format!("{}_images", self.label))
            }
        }
    }
}

impl ViewerConfig {
    /// Explicit path, then `$HOCBA_VIEWER_CONFIG`, then `./hocba-viewer.toml`,
    /// then the user config dir, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit) {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            None => {
                log::info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("hocba-viewer").join("config.toml"))
            .filter(|path| path.exists())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ViewerError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ViewerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.documents.is_empty() {
            return Err(ViewerError::Config("at least one document is required".to_string()));
        }
        if self.render.dpi == 0 {
            return Err(ViewerError::Config("render.dpi must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_three_report_cards() {
        let config = ViewerConfig::default();
        assert_eq!(config.documents.len(), 3);
        assert_eq!(config.documents[1].label, "hocba2");
        assert_eq!(config.documents[1].pdf, PathBuf::from("./resources/hocba_test2.pdf"));
        assert_eq!(
            config.documents[1].result,
            PathBuf::from("./data/hocba_2_result_full.json")
        );
        assert_eq!(config.documents[1].image_dir(), PathBuf::from("./resources/hocba2_images"));
        assert_eq!(config.render.dpi, 200);
        assert_eq!(config.render.jpeg_quality, 75);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config = ViewerConfig::from_toml("").unwrap();
        assert_eq!(config.title, "Document Classifier Results");
        assert_eq!(config.documents.len(), 3);
        assert_eq!(config.layout.sidebar_width, 28);
    }

    #[test]
    fn partial_toml_overrides() {
        let config = ViewerConfig::from_toml(
            r#"
            title = "Review"
            [render]
            dpi = 150
            [[documents]]
            label = "term1"
            pdf = "scans/term1.pdf"
            result = "out/term1.json"
            images = "cache/term1"
            "#,
        )
        .unwrap();
        assert_eq!(config.title, "Review");
        assert_eq!(config.render.dpi, 150);
        assert_eq!(config.render.jpeg_quality, 75);
        assert_eq!(config.documents.len(), 1);
        assert_eq!(config.documents[0].image_dir(), PathBuf::from("cache/term1"));
    }

    #[test]
    fn empty_document_list_is_rejected() {
        let err = ViewerConfig::from_toml("documents = []").unwrap_err();
        assert!(matches!(err, ViewerError::Config(_)));
    }
}
