//! TUI module for jamstage
//!
//! Drives the session once per drawn frame and shows the resulting poses.

mod stage_view;
pub mod state;
mod transport;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};

use jamstage::{
    engine::Session,
    timing::{RemoteTransport, Transport},
};

pub use state::{FrameState, StageInfo};

use stage_view::render_stage;
use transport::render_transport;

/// How long the finished stage stays on screen before the app exits
const LINGER: Duration = Duration::from_secs(1);

/// UI application state
pub struct UiApp {
    session: Session<RemoteTransport>,
    info: StageInfo,
    state: FrameState,
    last_frame: Option<Instant>,
    finished_at: Option<Instant>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(session: Session<RemoteTransport>, info: StageInfo) -> Self {
        Self {
            session,
            info,
            state: FrameState::default(),
            last_frame: None,
            finished_at: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.step();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if self
                .finished_at
                .is_some_and(|at| at.elapsed() >= LINGER)
            {
                self.should_quit = true;
            }
        }

        self.session.stop();
        Ok(())
    }

    /// Advance the session by the wall time since the previous frame
    fn step(&mut self) {
        let now = Instant::now();
        let delta = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f64());
        self.last_frame = Some(now);

        let report = self.session.frame(delta);
        self.state.update(&report);
        self.state.running = self.session.driver().transport().is_running();

        if self.state.finished && self.finished_at.is_none() {
            self.finished_at = Some(now);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if let KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc = key {
            self.should_quit = true;
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: transport, stage, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(6),    // Stage
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_transport(frame, chunks[0], &self.info, &self.state);

        let visible = self.state.poses.iter().filter(|p| p.visible).count();
        let stage_block = Block::default()
            .title(format!(
                " Stage ({}/{} on stage) ",
                visible,
                self.info.instruments.len()
            ))
            .borders(Borders::ALL);
        let stage_inner = stage_block.inner(chunks[1]);
        frame.render_widget(stage_block, chunks[1]);
        render_stage(frame, stage_inner, &self.info, &self.state);

        let help = Paragraph::new(" [Q] Quit").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
