// Page image pane: converts cached JPEGs for viuer and places them in the layout
use anyhow::Result;
use std::io::{self, Write};
use viuer::{print, Config, KittySupport};

/// Inline graphics protocol of the hosting terminal, detected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Graphics {
    Kitty,
    ITerm,
    Blocks,
}

impl Graphics {
    pub fn detect() -> Self {
        if viuer::get_kitty_support() != KittySupport::None {
            Graphics::Kitty
        } else if viuer::is_iterm_supported() {
            Graphics::ITerm
        } else {
            Graphics::Blocks
        }
    }

    /// Escape that drops images the terminal keeps outside the text grid.
    /// iTerm and block images live in cells and go away with a screen clear.
    pub fn clear_sequence(self) -> Option<&'static str> {
        match self {
            Graphics::Kitty => Some("\x1b_Ga=d\x1b\\"),
            Graphics::ITerm | Graphics::Blocks => None,
        }
    }
}

/// Convert a decoded page for viuer, which is still on image 0.24.
/// Runs once per page, not per frame.
pub fn prepare_page_image(
    page: &image::DynamicImage,
    dark_mode: bool,
) -> Option<image_0_24::DynamicImage> {
    let mut rgba = page.to_rgba8();
    if dark_mode {
        image::imageops::invert(&mut rgba);
    }
    let (width, height) = rgba.dimensions();
    image_0_24::RgbaImage::from_raw(width, height, rgba.into_raw())
        .map(image_0_24::DynamicImage::ImageRgba8)
}

/// Fit a prepared page into the cell rectangle at (`x`, `y`), keeping its aspect ratio.
pub fn display_page_image(
    page: &image_0_24::DynamicImage,
    graphics: Graphics,
    x: u16,
    y: u16,
    max_width: u16,
    max_height: u16,
) -> Result<()> {
    let config = Config {
        absolute_offset: true,
        x,
        y: y as i16,
        restore_cursor: true,
        width: Some(max_width as u32),
        height: Some(max_height as u32),
        use_kitty: graphics == Graphics::Kitty,
        use_iterm: graphics == Graphics::ITerm,
        ..Default::default()
    };
    print(page, &config)?;
    Ok(())
}

pub fn clear_graphics(out: &mut impl Write, graphics: Graphics) -> io::Result<()> {
    if let Some(sequence) = graphics.clear_sequence() {
        out.write_all(sequence.as_bytes())?;
        out.flush()?;
    }
    Ok(())
}
