//! Transport bar widget - shows time, position, tempo, and play state

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{FrameState, StageInfo};

/// Render the transport bar
pub fn render_transport(frame: &mut Frame, area: Rect, info: &StageInfo, state: &FrameState) {
    let block = Block::default().title(" jamstage ").borders(Borders::ALL);

    let ticks_per_beat = info.resolution.max(1) as u64;
    let ticks_per_bar = ticks_per_beat * 4; // Assuming 4/4 time
    let current_bar = state.tick / ticks_per_bar + 1;
    let current_beat = (state.tick % ticks_per_bar) / ticks_per_beat + 1;

    let (symbol, label, color) = if state.finished {
        ("■", "Finished", Color::DarkGray)
    } else if state.running {
        ("▶", "Playing", Color::Green)
    } else if state.time < 0.0 {
        ("…", "Count-in", Color::Yellow)
    } else {
        ("⏸", "Stopped", Color::Yellow)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} {}  ", symbol, label),
            Style::default().fg(color),
        ),
        Span::styled(
            format!("{:>6.1}s / {:.1}s  ", state.time, info.duration),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("BPM: {:.1}  ", state.bpm),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Bar {} | Beat {}  ", current_bar, current_beat),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("tick {}", state.tick),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
