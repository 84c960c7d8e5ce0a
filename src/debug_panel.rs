// Log screen: the in-memory log buffer, scrollable
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

use crate::theme;

pub struct DebugPanel {
    pub logs: Vec<String>,
}

impl DebugPanel {
    pub fn new(logs: Vec<String>) -> Self {
        Self { logs }
    }

    /// Largest useful scroll offset for a panel of `height` rows.
    pub fn max_scroll(&self, height: u16) -> usize {
        self.logs.len().saturating_sub(height as usize)
    }

    pub fn render(
        &self,
        stdout: &mut io::Stdout,
        start_x: u16,
        start_y: u16,
        width: u16,
        height: u16,
        scroll_offset: usize,
    ) -> io::Result<()> {
        let offset = scroll_offset.min(self.max_scroll(height));

        for y in 0..height {
            execute!(stdout, MoveTo(start_x, start_y + y))?;
            match self.logs.get(offset + y as usize) {
                Some(log) => {
                    let color = if log.contains("ERROR") {
                        theme::ERROR
                    } else if log.contains("WARN") {
                        theme::INFO
                    } else {
                        theme::TEXT_SECONDARY
                    };
                    execute!(stdout, SetForegroundColor(color))?;
                    let line: String = log.chars().take(width as usize).collect();
                    write!(stdout, "{:<width$}", line, width = width as usize)?;
                    execute!(stdout, ResetColor)?;
                }
                None => write!(stdout, "{:width$}", "", width = width as usize)?,
            }
        }

        stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_stops_at_last_page() {
        let panel = DebugPanel::new((0..25).map(|i| format!("line {}", i)).collect());
        assert_eq!(panel.max_scroll(10), 15);
        assert_eq!(panel.max_scroll(40), 0);
    }
}
