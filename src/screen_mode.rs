// Screen mode management for hocba-viewer

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenMode {
    #[default]
    Viewer, // Page image + parsing results
    Log,    // Full screen log output
}

impl ScreenMode {
    pub fn next(self) -> Self {
        match self {
            ScreenMode::Viewer => ScreenMode::Log,
            ScreenMode::Log => ScreenMode::Viewer,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScreenMode::Viewer => "VIEWER",
            ScreenMode::Log => "LOG",
        }
    }
}
