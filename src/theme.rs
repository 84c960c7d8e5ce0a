// Colour palette for the viewer
use crossterm::style::Color;

// Headers - soft colors, not electric
pub const HEADER_TITLE: Color = Color::Rgb { r: 219, g: 112, b: 147 };  // Soft pink
pub const HEADER_LOG: Color = Color::Rgb { r: 152, g: 195, b: 121 };    // Soft green
pub const TAB_ACTIVE: Color = Color::Rgb { r: 176, g: 196, b: 222 };    // Light steel blue
pub const TAB_INACTIVE: Color = Color::Rgb { r: 68, g: 71, b: 90 };

// Text colors
pub const TEXT_PRIMARY: Color = Color::Rgb { r: 248, g: 248, b: 242 };
pub const TEXT_SECONDARY: Color = Color::Rgb { r: 180, g: 180, b: 180 };
pub const TEXT_DIM: Color = Color::Rgb { r: 120, g: 120, b: 120 };

// UI elements
pub const BORDER: Color = Color::Rgb { r: 100, g: 100, b: 100 };
pub const SIDEBAR_BG: Color = Color::Rgb { r: 36, g: 36, b: 42 };
pub const STATUS_BG: Color = Color::Rgb { r: 40, g: 40, b: 46 };
pub const STATUS_FG: Color = Color::Rgb { r: 200, g: 200, b: 200 };

// Status colors
pub const ERROR: Color = Color::Rgb { r: 255, g: 85, b: 85 };
pub const INFO: Color = Color::Rgb { r: 139, g: 233, b: 253 };
