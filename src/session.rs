// Per-session state and the handler run for every interaction event
use crate::screen_mode::ScreenMode;
use crate::viewer::{PageSelection, Viewer};

const MAX_INPUT_DIGITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NextDocument,
    PrevDocument,
    /// 1-based tab number
    SelectDocument(usize),
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    InputDigit(char),
    InputBackspace,
    CommitInput,
    CancelInput,
    ScrollLog(isize),
    ToggleScreen,
    Quit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    pub redraw: bool,
    /// The active document or its page moved.
    pub page_changed: bool,
    pub quit: bool,
}

impl Response {
    const UNCHANGED: Response = Response {
        redraw: false,
        page_changed: false,
        quit: false,
    };
    const REDRAW: Response = Response {
        redraw: true,
        page_changed: false,
        quit: false,
    };
    const PAGE_CHANGED: Response = Response {
        redraw: true,
        page_changed: true,
        quit: false,
    };
    const QUIT: Response = Response {
        redraw: false,
        page_changed: false,
        quit: true,
    };

    fn redraw_if(changed: bool) -> Self {
        if changed {
            Self::REDRAW
        } else {
            Self::UNCHANGED
        }
    }
}

/// What the viewer screen shows for the active tab.
#[derive(Debug)]
pub enum PageView<'a> {
    NoPages,
    Page(PageSelection<'a>),
}

#[derive(Debug, Clone)]
pub struct Session {
    active: usize,
    pages: Vec<usize>,
    input: String,
    pub screen: ScreenMode,
    pub status_message: String,
    pub log_scroll: usize,
}

impl Session {
    pub fn new(viewer: &Viewer) -> Self {
        Self {
            active: 0,
            pages: vec![1; viewer.len()],
            input: String::new(),
            screen: ScreenMode::default(),
            status_message: String::new(),
            log_scroll: 0,
        }
    }

    /// Start on a 1-based document and page, both clamped.
    pub fn starting_at(viewer: &Viewer, document: usize, page: usize) -> Self {
        let mut session = Self::new(viewer);
        if !session.pages.is_empty() {
            session.active = document.clamp(1, session.pages.len()) - 1;
            let max = session.max_page(viewer);
            session.pages[session.active] = clamp_page(page, max);
        }
        session
    }

    pub fn active_document(&self) -> usize {
        self.active + 1
    }

    pub fn current_page(&self) -> usize {
        self.pages.get(self.active).copied().unwrap_or(1)
    }

    pub fn pending_input(&self) -> Option<&str> {
        if self.input.is_empty() {
            None
        } else {
            Some(&self.input)
        }
    }

    pub fn max_page(&self, viewer: &Viewer) -> usize {
        viewer
            .document(self.active_document())
            .map(|d| d.page_count())
            .unwrap_or(0)
    }

    pub fn handle(&mut self, viewer: &Viewer, action: Action) -> Response {
        match action {
            Action::Quit => Response::QUIT,
            Action::ToggleScreen => {
                self.screen = self.screen.next();
                log::debug!("Switched to {:?} screen", self.screen);
                Response::REDRAW
            }
            Action::ScrollLog(delta) => {
                let before = self.log_scroll;
                self.log_scroll = self.log_scroll.saturating_add_signed(delta);
                Response::redraw_if(before != self.log_scroll)
            }
            Action::NextDocument => self.switch_document(self.active + 1),
            Action::PrevDocument => self.switch_document(self.active + self.pages.len().max(1) - 1),
            Action::SelectDocument(n) if n >= 1 && n <= self.pages.len() => {
                self.switch_document(n - 1)
            }
            Action::SelectDocument(_) => Response::UNCHANGED,
            Action::NextPage => self.step_page(viewer, 1),
            Action::PrevPage => self.step_page(viewer, -1),
            Action::FirstPage => self.set_page(viewer, 1),
            Action::LastPage => {
                let max = self.max_page(viewer);
                self.set_page(viewer, max)
            }
            Action::InputDigit(d) => {
                if !d.is_ascii_digit()
                    || self.max_page(viewer) == 0
                    || self.input.len() >= MAX_INPUT_DIGITS
                {
                    return Response::UNCHANGED;
                }
                self.input.push(d);
                Response::REDRAW
            }
            Action::InputBackspace => Response::redraw_if(self.input.pop().is_some()),
            Action::CancelInput => {
                let had_input = !self.input.is_empty();
                self.input.clear();
                Response::redraw_if(had_input)
            }
            Action::CommitInput => self.commit_input(viewer),
        }
    }

    /// Recompute the active tab's view from scratch.
    pub fn view<'a>(&self, viewer: &'a Viewer) -> PageView<'a> {
        match viewer.select_page(self.active_document(), self.current_page()) {
            Ok(selection) => PageView::Page(selection),
            Err(_) => PageView::NoPages,
        }
    }

    /// Log what is worth knowing about the page just entered.
    pub fn enter_page(&self, viewer: &Viewer) {
        if let PageView::Page(selection) = self.view(viewer) {
            selection.warn_duplicates();
        }
    }

    fn switch_document(&mut self, target: usize) -> Response {
        if self.pages.is_empty() {
            return Response::UNCHANGED;
        }
        let target = target % self.pages.len();
        if target == self.active {
            return Response::UNCHANGED;
        }
        self.active = target;
        self.input.clear();
        self.status_message.clear();
        Response::PAGE_CHANGED
    }

    fn step_page(&mut self, viewer: &Viewer, delta: isize) -> Response {
        let target = self.current_page().saturating_add_signed(delta);
        self.set_page(viewer, target)
    }

    fn set_page(&mut self, viewer: &Viewer, page: usize) -> Response {
        let max = self.max_page(viewer);
        if max == 0 {
            return Response::UNCHANGED;
        }
        let page = clamp_page(page, max);
        match self.pages.get_mut(self.active) {
            Some(current) if *current != page => {
                *current = page;
                Response::PAGE_CHANGED
            }
            _ => Response::UNCHANGED,
        }
    }

    fn commit_input(&mut self, viewer: &Viewer) -> Response {
        if self.input.is_empty() {
            return Response::UNCHANGED;
        }
        let requested = self.input.parse::<usize>().unwrap_or(usize::MAX);
        self.input.clear();

        let max = self.max_page(viewer);
        let page = clamp_page(requested, max);
        self.status_message = if page != requested {
            format!("Page {} clamped to {}", requested, page)
        } else {
            String::new()
        };
        let moved = self.set_page(viewer, page);
        Response {
            redraw: true,
            ..moved
        }
    }
}

fn clamp_page(page: usize, max: usize) -> usize {
    page.clamp(1, max.max(1))
}
