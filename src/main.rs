// hocba-viewer - report card scans next to their parsed grades
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event},
    execute,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::{io, path::PathBuf, time::Duration};

use hocba_viewer::debug_log;
use hocba_viewer::debug_panel::DebugPanel;
use hocba_viewer::keyboard;
use hocba_viewer::types::AppFlags;
use hocba_viewer::ui_renderer::{self, Frame, PageImageSlot};
use hocba_viewer::viuer_display::{self, Graphics};
use hocba_viewer::{PdftoppmRasterizer, Session, Viewer, ViewerConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse report card scans next to their parsed grades")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Document tab to open (1-based)
    #[arg(short, long, default_value_t = 1)]
    document: usize,
    /// Page to open (1-based)
    #[arg(short, long, default_value_t = 1)]
    page: usize,
    /// Build missing image caches and exit
    #[arg(long)]
    prepare: bool,
    /// Print the selected page's parsing results and exit
    #[arg(long, conflicts_with = "prepare")]
    print: bool,
    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

pub struct App {
    pub viewer: Viewer,
    pub session: Session,
    pub images: PageImageSlot,
    pub flags: AppFlags,
    pub sidebar_width: u16,
    pub graphics: Graphics,
}

fn main() -> Result<()> {
    let args = Args::parse();
    debug_log::init(args.verbose);

    let config = ViewerConfig::load(args.config.as_deref()).context("Failed to load config")?;
    let mut viewer = Viewer::from_config(&config).context("Failed to load classifier results")?;

    let rasterizer = PdftoppmRasterizer::new(&config.render.pdftoppm, config.render.dpi);
    viewer
        .ensure_image_caches(&rasterizer)
        .context("Failed to prepare page images")?;

    if args.prepare {
        for document in viewer.documents() {
            println!(
                "{}: {} pages in {}",
                document.label,
                document.page_count(),
                document.cache.dir().display()
            );
        }
        return Ok(());
    }

    let session = Session::starting_at(&viewer, args.document, args.page);
    session.enter_page(&viewer);

    if args.print {
        print!("{}", ui_renderer::page_text(&viewer, &session));
        return Ok(());
    }

    let mut app = App {
        viewer,
        session,
        images: PageImageSlot::new(config.render.dark_mode),
        flags: AppFlags::REDRAW,
        sidebar_width: config.layout.sidebar_width,
        graphics: Graphics::detect(),
    };
    log::debug!("Terminal graphics: {:?}", app.graphics);

    setup_terminal()?;
    debug_log::set_stderr_mirror(false);
    let result = run_app(&mut app);
    debug_log::set_stderr_mirror(true);
    restore_terminal(app.graphics)?;

    result
}

fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;
    Ok(())
}

fn restore_terminal(graphics: Graphics) -> Result<()> {
    let mut stdout = io::stdout();
    viuer_display::clear_graphics(&mut stdout, graphics)?;
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    execute!(stdout, Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn run_app(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();

    loop {
        let (term_width, term_height) = terminal::size()?;

        if app.flags.contains(AppFlags::REDRAW) {
            // Keep the log scroll inside what the log screen can show
            let max_scroll = DebugPanel::new(debug_log::snapshot())
                .max_scroll(term_height.saturating_sub(2));
            app.session.log_scroll = app.session.log_scroll.min(max_scroll);

            let frame = Frame {
                viewer: &app.viewer,
                session: &app.session,
                sidebar_width: app.sidebar_width,
                graphics: app.graphics,
            };
            ui_renderer::draw(&mut stdout, &frame, &mut app.images, term_width, term_height)?;
            app.flags.remove(AppFlags::REDRAW);
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                let Some(action) = keyboard::map_key(app.session.screen, key) else {
                    continue;
                };
                let response = app.session.handle(&app.viewer, action);
                if response.quit {
                    app.flags.insert(AppFlags::EXIT);
                }
                if response.page_changed {
                    app.session.enter_page(&app.viewer);
                }
                if response.redraw {
                    app.flags.insert(AppFlags::REDRAW);
                }
            }
            Event::Resize(_, _) => app.flags.insert(AppFlags::REDRAW),
            _ => {}
        }

        if app.flags.contains(AppFlags::EXIT) {
            break;
        }
    }

    Ok(())
}
