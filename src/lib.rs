//! Terminal viewer that pairs rasterized report-card pages with the grades
//! and subject scores a classifier extracted from them.

pub mod config;
pub mod debug_log;
pub mod debug_panel;
pub mod image_cache;
pub mod keyboard;
pub mod model;
pub mod rasterizer;
pub mod screen_mode;
pub mod session;
pub mod table;
pub mod theme;
pub mod types;
pub mod ui_renderer;
pub mod viewer;
pub mod viuer_display;

pub use config::ViewerConfig;
pub use image_cache::{CacheStatus, ImageCache};
pub use model::{Page, ParsedResult, Section, Subject};
pub use rasterizer::{PdftoppmRasterizer, Rasterizer};
pub use session::{Action, PageView, Response, Session};
pub use table::{render_subject_table, SubjectTable, SubjectTableView};
pub use types::{Result, ViewerError};
pub use viewer::{Document, PageSelection, PanelContent, Viewer};
