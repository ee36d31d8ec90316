use std::time::{Duration, Instant};

use chrono::{Local, TimeZone, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glint_config::{Config, FileStore};
use glint_core::{ColorTheme, CountdownTimer, MemoryStore, TargetStore, resolve_target};
use glint_effects::{IconCloud, ParticleSystem, SparkleSystem};
use glint_fonts::{DIGIT_HEIGHT, build_caption_line, build_countdown_art};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};
use tracing::{info, warn};

mod logging;

/// Poll timeout between frames; roughly one display refresh.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Countdown refresh interval, independent of the frame rate.
const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

/// Share of the width given to the icon cloud.
const CLOUD_PERCENT: u16 = 45;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&config.log_level);
    if let Err(e) = &loaded {
        warn!(error = %e, "using default configuration");
    }

    let mut store: Box<dyn TargetStore> = match FileStore::open_default() {
        Ok(store) => {
            info!(path = %store.path().display(), "countdown target store");
            Box::new(store)
        }
        Err(e) => {
            warn!(error = %e, "countdown target will not persist");
            Box::new(MemoryStore::new())
        }
    };

    let app = App::start(&config, store.as_mut(), now_ms());
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// Current wall-clock time as Unix milliseconds.
fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// The splash screen: four independent effects and the main loop.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current color theme.
    color_theme: ColorTheme,
    particles: ParticleSystem,
    sparkles: SparkleSystem,
    icon_cloud: IconCloud,
    countdown: CountdownTimer,
    /// When the countdown last ticked.
    last_tick: Instant,
}

impl App {
    /// Construct the four components from `config`.
    ///
    /// The countdown target comes from `store`, or is created and stored
    /// there on first run.
    pub fn start(config: &Config, store: &mut dyn TargetStore, now_ms: i64) -> Self {
        let target_ms = resolve_target(store, now_ms);
        info!(
            target_ms,
            particles = config.particle_count,
            sparkle_density = config.sparkle_density,
            icons = config.icons.len(),
            "starting"
        );

        Self {
            running: false,
            color_theme: config.color_theme,
            particles: ParticleSystem::new(config.particle_count),
            sparkles: SparkleSystem::new(config.sparkle_density),
            // The container exists but is measured on the first frame.
            icon_cloud: IconCloud::new(config.icons.iter().cloned(), Some(Rect::default())),
            countdown: CountdownTimer::start(target_ms, now_ms),
            last_tick: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
            self.tick_countdown(Instant::now(), now_ms());
        }
        Ok(())
    }

    /// Tick the countdown once per [`COUNTDOWN_INTERVAL`] while it runs.
    fn tick_countdown(&mut self, now: Instant, now_ms: i64) {
        if !self.countdown.is_running() || now.duration_since(self.last_tick) < COUNTDOWN_INTERVAL
        {
            return;
        }
        // Keep to the one-second grid; resync only after a long stall.
        self.last_tick += COUNTDOWN_INTERVAL;
        if now.duration_since(self.last_tick) >= COUNTDOWN_INTERVAL {
            self.last_tick = now;
        }
        self.countdown.tick(now_ms);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let color = self.color_theme.color();

        self.particles.render(frame, area);

        let rows = Layout::vertical([
            Constraint::Fill(1),   // Effects
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let columns = Layout::horizontal([
            Constraint::Percentage(CLOUD_PERCENT),
            Constraint::Percentage(100 - CLOUD_PERCENT),
        ])
        .split(rows[0]);

        self.icon_cloud.render(frame, columns[0], self.color_theme);
        self.sparkles.render(frame, columns[1]);
        self.render_countdown(frame, columns[1]);

        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, rows[1]);
    }

    /// Render the title, block digits, captions and target date.
    fn render_countdown(&self, frame: &mut Frame, area: Rect) {
        let color = self.color_theme.color();
        let display = self.countdown.display();

        let chunks = Layout::vertical([
            Constraint::Fill(1),                    // Top padding
            Constraint::Length(1),                  // Title
            Constraint::Length(1),                  // Spacing
            Constraint::Length(DIGIT_HEIGHT as u16), // Block digits
            Constraint::Length(1),                  // Captions
            Constraint::Length(1),                  // Spacing
            Constraint::Length(1),                  // Target date
            Constraint::Fill(1),                    // Bottom padding
        ])
        .split(area);

        let title = if self.countdown.is_running() {
            "AUDITIONS CLOSE IN"
        } else {
            "AUDITIONS ARE CLOSED"
        };
        frame.render_widget(
            Paragraph::new(title.bold().fg(color)).alignment(Alignment::Center),
            chunks[1],
        );

        let digits: Vec<Line> = build_countdown_art(display)
            .into_iter()
            .map(|s| Line::from(s).style(Style::new().fg(color)))
            .collect();
        frame.render_widget(
            Paragraph::new(digits).alignment(Alignment::Center),
            chunks[3],
        );

        frame.render_widget(
            Paragraph::new(build_caption_line(display).dark_gray()).alignment(Alignment::Center),
            chunks[4],
        );

        if let Some(target) = Local
            .timestamp_millis_opt(self.countdown.target_ms())
            .single()
        {
            let date = target.format("%A, %B %d, %Y %H:%M").to_string();
            frame.render_widget(
                Paragraph::new(date)
                    .style(Style::new().fg(color))
                    .alignment(Alignment::Center),
                chunks[6],
            );
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls for at most one frame so the effects keep animating.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                // Effects rebuild themselves when their area changes size.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            _ => {}
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
