// Screen composition: header, tabs, sidebar, page image, parsing results, status bar
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::debug_panel::DebugPanel;
use crate::debug_log;
use crate::screen_mode::ScreenMode;
use crate::session::{PageView, Session};
use crate::theme;
use crate::viewer::{Viewer, NO_PAGES};
use crate::viuer_display::{self, Graphics};

const MIN_PANE_WIDTH: u16 = 20;

/// Last page image, decoded and converted for viuer once per page.
#[derive(Default)]
pub struct PageImageSlot {
    dark_mode: bool,
    path: Option<PathBuf>,
    image: Option<image_0_24::DynamicImage>,
}

impl PageImageSlot {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            ..Default::default()
        }
    }

    /// A path that failed stays failed until a different page is loaded.
    pub fn load(&mut self, path: &Path) -> Option<&image_0_24::DynamicImage> {
        if self.path.as_deref() != Some(path) {
            self.path = Some(path.to_path_buf());
            self.image = match image::open(path) {
                Ok(page) => viuer_display::prepare_page_image(&page, self.dark_mode),
                Err(e) => {
                    log::error!("Failed to load {}: {}", path.display(), e);
                    None
                }
            };
        }
        self.image.as_ref()
    }
}

pub struct Layout {
    pub sidebar: u16,
    pub image_x: u16,
    pub image_width: u16,
    pub results_x: u16,
    pub results_width: u16,
    pub body_y: u16,
    pub body_height: u16,
}

impl Layout {
    pub fn compute(width: u16, height: u16, sidebar_width: u16) -> Self {
        // Sidebar collapses before the panes get too narrow
        let needed = sidebar_width.saturating_add(2 * MIN_PANE_WIDTH);
        let sidebar = if sidebar_width > 0 && width >= needed {
            sidebar_width
        } else {
            0
        };
        let remaining = width - sidebar;
        let image_width = remaining / 2;
        Self {
            sidebar,
            image_x: sidebar,
            image_width,
            results_x: sidebar + image_width,
            results_width: remaining - image_width,
            body_y: 2,
            body_height: height.saturating_sub(3),
        }
    }
}

pub struct Frame<'a> {
    pub viewer: &'a Viewer,
    pub session: &'a Session,
    pub sidebar_width: u16,
    pub graphics: Graphics,
}

pub fn draw(
    stdout: &mut io::Stdout,
    frame: &Frame,
    images: &mut PageImageSlot,
    width: u16,
    height: u16,
) -> Result<()> {
    viuer_display::clear_graphics(stdout, frame.graphics)?;
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    match frame.session.screen {
        ScreenMode::Viewer => {
            render_panel_header(stdout, 0, 0, width, &frame.viewer.title, theme::HEADER_TITLE)?;
            render_tabs(stdout, frame.viewer, frame.session, width)?;
            draw_viewer(stdout, frame, images, width, height)?;
        }
        ScreenMode::Log => {
            let title = "LOG - Up/Down to scroll, F2 to return";
            render_panel_header(stdout, 0, 0, width, title, theme::HEADER_LOG)?;
            let panel = DebugPanel::new(debug_log::snapshot());
            let rows = height.saturating_sub(2);
            panel.render(stdout, 0, 1, width, rows, frame.session.log_scroll)?;
        }
    }

    render_status_bar(stdout, frame.viewer, frame.session, width, height)?;
    stdout.flush()?;
    Ok(())
}

fn draw_viewer(
    stdout: &mut io::Stdout,
    frame: &Frame,
    images: &mut PageImageSlot,
    width: u16,
    height: u16,
) -> Result<()> {
    let layout = Layout::compute(width, height, frame.sidebar_width);

    if layout.sidebar > 0 {
        render_sidebar(stdout, &frame.viewer.about, &layout)?;
    }

    let bottom = layout.body_y + layout.body_height;
    let notice_x = layout.image_x + 1;
    let notice_y = layout.body_y + 1;
    match frame.session.view(frame.viewer) {
        PageView::NoPages => {
            write_line(stdout, notice_x, notice_y, NO_PAGES, layout.image_width, theme::TEXT_DIM)?;
        }
        PageView::Page(selection) => {
            let image_height = layout.body_height.saturating_sub(2);
            match images.load(&selection.image_path) {
                Some(image) => {
                    if let Err(e) = viuer_display::display_page_image(
                        image,
                        frame.graphics,
                        layout.image_x,
                        layout.body_y,
                        layout.image_width.saturating_sub(1),
                        image_height,
                    ) {
                        log::error!("Failed to display page {}: {}", selection.page, e);
                    }
                }
                None => {
                    let text = "Image unavailable";
                    write_line(stdout, notice_x, notice_y, text, layout.image_width, theme::ERROR)?;
                }
            }
            let caption = format!("Page {}", selection.page);
            let caption_x =
                layout.image_x + layout.image_width.saturating_sub(caption.len() as u16) / 2;
            let caption_y = bottom.saturating_sub(1);
            let caption_width = layout.image_width;
            write_line(stdout, caption_x, caption_y, &caption, caption_width, theme::TEXT_DIM)?;

            let x = layout.results_x + 1;
            let w = layout.results_width.saturating_sub(2);
            execute!(stdout, SetAttribute(Attribute::Bold))?;
            write_line(stdout, x, layout.body_y, "Parsing Results", w, theme::TEXT_PRIMARY)?;
            execute!(stdout, SetAttribute(Attribute::Reset))?;

            let lines = selection.panel().render_lines();
            for (i, line) in lines.iter().enumerate() {
                let y = layout.body_y + 2 + i as u16;
                if y >= bottom {
                    break;
                }
                write_line(stdout, x, y, line, w, theme::TEXT_SECONDARY)?;
            }
        }
    }

    for y in layout.body_y..bottom {
        execute!(
            stdout,
            MoveTo(layout.results_x, y),
            SetForegroundColor(theme::BORDER),
            Print('│'),
            ResetColor
        )?;
    }
    Ok(())
}

fn render_panel_header(
    stdout: &mut io::Stdout,
    x: u16,
    y: u16,
    width: u16,
    title: &str,
    color: Color,
) -> Result<()> {
    execute!(stdout, MoveTo(x, y))?;
    execute!(stdout, SetBackgroundColor(color))?;
    execute!(stdout, SetForegroundColor(Color::Black))?;

    let header_text = format!(" {} ", truncate(title, width as usize));
    write!(stdout, "{:^width$}", header_text, width = width as usize)?;

    execute!(stdout, ResetColor)?;
    Ok(())
}

fn render_tabs(
    stdout: &mut io::Stdout,
    viewer: &Viewer,
    session: &Session,
    width: u16,
) -> Result<()> {
    execute!(stdout, MoveTo(0, 1))?;
    let mut used = 0usize;
    for document in viewer.documents() {
        let label = format!(" {} ", document.label);
        if used + label.chars().count() + 1 > width as usize {
            break;
        }
        let bg = if document.index == session.active_document() {
            theme::TAB_ACTIVE
        } else {
            theme::TAB_INACTIVE
        };
        let fg = if document.index == session.active_document() {
            Color::Black
        } else {
            theme::TEXT_SECONDARY
        };
        execute!(
            stdout,
            SetBackgroundColor(bg),
            SetForegroundColor(fg),
            Print(&label),
            ResetColor,
            Print(' ')
        )?;
        used += label.chars().count() + 1;
    }
    Ok(())
}

fn render_sidebar(stdout: &mut io::Stdout, about: &str, layout: &Layout) -> Result<()> {
    let inner = layout.sidebar.saturating_sub(2) as usize;
    let mut lines = vec!["About".to_string(), String::new()];
    lines.extend(wrap_text(about, inner));

    for row in 0..layout.body_height {
        let text = lines.get(row as usize).map(String::as_str).unwrap_or("");
        execute!(stdout, MoveTo(0, layout.body_y + row), SetBackgroundColor(theme::SIDEBAR_BG))?;
        if row == 0 {
            execute!(stdout, SetAttribute(Attribute::Bold))?;
        }
        execute!(stdout, SetForegroundColor(theme::INFO))?;
        write!(stdout, " {:<inner$} ", truncate(text, inner), inner = inner)?;
        execute!(stdout, SetAttribute(Attribute::Reset), ResetColor)?;
    }
    Ok(())
}

fn render_status_bar(
    stdout: &mut io::Stdout,
    viewer: &Viewer,
    session: &Session,
    width: u16,
    height: u16,
) -> Result<()> {
    execute!(stdout, MoveTo(0, height.saturating_sub(1)))?;
    execute!(stdout, SetBackgroundColor(theme::STATUS_BG))?;
    execute!(stdout, SetForegroundColor(theme::STATUS_FG))?;

    let status = status_line(viewer, session);
    let status = truncate(&status, width as usize);
    let status_len = status.chars().count();
    execute!(stdout, Print(&status))?;
    execute!(stdout, Print(" ".repeat((width as usize).saturating_sub(status_len))))?;
    execute!(stdout, ResetColor)?;

    Ok(())
}

pub fn status_line(viewer: &Viewer, session: &Session) -> String {
    let label = viewer
        .document(session.active_document())
        .map(|d| d.label.as_str())
        .unwrap_or("-");
    let max = session.max_page(viewer);
    let page = if max == 0 { 0 } else { session.current_page() };

    let message = match session.pending_input() {
        Some(input) => format!("Go to page: {}_", input),
        None if session.status_message.is_empty() => "Ready".to_string(),
        None => session.status_message.clone(),
    };

    format!(
        " {} | {} | Page {}/{} | {} | Tab: Document | 0-9 Enter: Page | ←/→: Step | F2: Log | q: Quit ",
        session.screen.name(),
        label,
        page,
        max,
        message
    )
}

/// Plain-text rendering of the active page, for `--print`.
pub fn page_text(viewer: &Viewer, session: &Session) -> String {
    let mut out = String::new();
    out.push_str(&viewer.title);
    out.push('\n');

    let tabs: Vec<String> = viewer
        .documents()
        .iter()
        .map(|d| {
            if d.index == session.active_document() {
                format!("[{}]", d.label)
            } else {
                d.label.clone()
            }
        })
        .collect();
    out.push_str(&tabs.join(" "));
    out.push_str("\n\n");

    match session.view(viewer) {
        PageView::NoPages => {
            out.push_str(NO_PAGES);
            out.push('\n');
        }
        PageView::Page(selection) => {
            out.push_str(&format!(
                "Page {}/{} ({})\n\nParsing Results\n",
                selection.page,
                session.max_page(viewer),
                selection.image_path.display()
            ));
            for line in selection.panel().render_lines() {
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }
    }
    out
}

fn write_line(
    stdout: &mut io::Stdout,
    x: u16,
    y: u16,
    text: &str,
    width: u16,
    color: Color,
) -> Result<()> {
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(color),
        Print(truncate(text, width as usize)),
        ResetColor
    )?;
    Ok(())
}

pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Greedy word wrap; words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() { 0 } else { current.chars().count() + 1 };
        if needed + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_text("This viewer displays the results", 12),
            vec!["This viewer", "displays the", "results"]
        );
        assert_eq!(wrap_text("hocba1.pdf,hocba2.pdf", 10), vec!["hocba1.pdf", ",hocba2.pd", "f"]);
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate("Parsing Results", 7), "Parsin…");
        assert_eq!(truncate("Page 3", 10), "Page 3");
    }

    #[test]
    fn sidebar_collapses_on_narrow_terminals() {
        let wide = Layout::compute(120, 40, 28);
        assert_eq!(wide.sidebar, 28);
        assert_eq!(wide.image_width + wide.results_width, 92);

        let narrow = Layout::compute(60, 40, 28);
        assert_eq!(narrow.sidebar, 0);
        assert_eq!(narrow.image_width, 30);
    }

    #[test]
    fn oversized_sidebar_width_collapses() {
        let layout = Layout::compute(200, 40, u16::MAX);
        assert_eq!(layout.sidebar, 0);
        assert_eq!(layout.image_width + layout.results_width, 200);
    }

    #[test]
    fn unreadable_page_is_not_decoded_again() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("page_1.jpg");
        std::fs::write(&broken, b"not a jpeg").unwrap();
        let mut slot = PageImageSlot::new(false);

        assert!(slot.load(&broken).is_none());
        assert!(slot.load(&dir.path().join("page_2.jpg")).is_none());

        // A valid file at the last failed path is not picked up by redraws
        let missing = dir.path().join("page_3.jpg");
        assert!(slot.load(&missing).is_none());
        image::RgbImage::new(8, 8).save(&missing).unwrap();
        assert!(slot.load(&missing).is_none());

        // Moving to another page and back decodes it
        assert!(slot.load(&broken).is_none());
        assert!(slot.load(&missing).is_some());
    }
}
