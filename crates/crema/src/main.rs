use std::io::stdout;
use std::time::{Duration, Instant};

use crema_config::Config;
use crema_core::{CELL_HEIGHT_PX, CELL_WIDTH_PX, Point, Viewport};
use crema_scene::{Page, PageContext};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, info, warn};

mod logging;

/// Frame budget while waiting for input.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;
    info!(path = %log_path.display(), "starting crema");

    let config = load_config();
    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture)
        .map_err(color_eyre::Report::from)
        .and_then(|()| App::new(config, &terminal))
        .and_then(|app| app.run(terminal));
    if let Err(err) = execute!(stdout(), DisableMouseCapture) {
        warn!(%err, "could not disable mouse capture");
    }
    ratatui::restore();
    result
}

/// Load the config file; an unreadable or invalid file falls back to defaults.
fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, "could not load config, using defaults");
            Config::default()
        }
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    context: PageContext,
    page: Page,
    /// Requested scroll offset in page px.
    scroll: f32,
    last_tick: Instant,
}

impl App {
    /// Build the page for the current terminal size.
    pub fn new(config: Config, terminal: &DefaultTerminal) -> color_eyre::Result<Self> {
        let size = terminal.size()?;
        let viewport = Viewport::from_cells(size.width, size.height);
        let context = PageContext::new(viewport, config.clone());
        let page = Page::build(&context, 0.0)?;
        Ok(Self {
            running: false,
            config,
            context,
            page,
            scroll: 0.0,
            last_tick: Instant::now(),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
            self.tick();
        }
        info!("quitting");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let status = format!(
            "{:>3.0}%  theme {}  speed {}   j/k scroll  c theme  s speed  q quit",
            self.page.scroll_fraction() * 100.0,
            self.config.theme.label(),
            self.config.scroll_speed.label(),
        );
        crema_scene::render(frame, &self.page, self.config.theme, &status);
    }

    /// Advance every playhead by the time since the last frame.
    fn tick(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.page.update(self.scroll, dt);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => self.on_resize(width, height)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let step = self.config.scroll_speed.scroll_step_px();
        let page = self.context.viewport.height * 0.9;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('j') | KeyCode::Down) => self.scroll_by(step),
            (_, KeyCode::Char('k') | KeyCode::Up) => self.scroll_by(-step),
            (_, KeyCode::PageDown | KeyCode::Char(' ')) => self.scroll_by(page),
            (_, KeyCode::PageUp) => self.scroll_by(-page),
            (_, KeyCode::Home) => self.scroll_to(0.0),
            (_, KeyCode::End) => self.scroll_to(self.page.max_scroll()),
            (_, KeyCode::Char('c')) => self.cycle_theme(),
            (_, KeyCode::Char('s')) => self.cycle_scroll_speed(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let step = self.config.scroll_speed.scroll_step_px();
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(step),
            MouseEventKind::ScrollUp => self.scroll_by(-step),
            MouseEventKind::Moved => {
                // Center of the hovered cell.
                let pointer = Point::new(
                    (mouse.column as f32 + 0.5) * CELL_WIDTH_PX,
                    (mouse.row as f32 + 0.5) * CELL_HEIGHT_PX,
                );
                self.page.pointer_move(pointer);
            }
            _ => {}
        }
    }

    /// Rebuild the page for the new size, keeping the relative scroll position.
    fn on_resize(&mut self, width: u16, height: u16) -> color_eyre::Result<()> {
        self.context.viewport = Viewport::from_cells(width, height);
        self.page = Page::rebuild(&self.context, &self.page)?;
        self.scroll = self.page.scroll();
        debug!(width, height, scroll = self.scroll, "page rebuilt after resize");
        Ok(())
    }

    fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.scroll + delta);
    }

    fn scroll_to(&mut self, scroll: f32) {
        self.scroll = scroll.clamp(0.0, self.page.max_scroll());
    }

    /// Cycle through the roast themes and remember the choice.
    fn cycle_theme(&mut self) {
        self.config.theme = self.config.theme.next();
        info!(theme = self.config.theme.label(), "theme changed");
        self.persist();
    }

    fn cycle_scroll_speed(&mut self) {
        self.config.scroll_speed = self.config.scroll_speed.next();
        info!(speed = self.config.scroll_speed.label(), "scroll speed changed");
        self.persist();
    }

    fn persist(&mut self) {
        self.context.config = self.config.clone();
        if let Err(err) = self.config.save() {
            warn!(%err, "could not save config");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
