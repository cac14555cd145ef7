//! Stage widget - one row per instrument, one gauge line per voice

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use jamstage::animation::Pose;

use super::{FrameState, StageInfo};

const LABEL_WIDTH: usize = 16;
const GAUGE_WIDTH: usize = 10;

/// Largest values the gauges are scaled to
const MAX_STICK_ANGLE: f64 = 50.0;
const MAX_RECOIL: f64 = 2.0;
const MAX_WOBBLE: f64 = 0.5;

pub fn render_stage(frame: &mut Frame, area: Rect, info: &StageInfo, state: &FrameState) {
    if area.height == 0 || area.width < 20 {
        return;
    }

    let mut lines = Vec::new();
    for (instrument, pose) in info.instruments.iter().zip(&state.poses) {
        let program = instrument
            .program
            .map_or_else(|| "kit".to_string(), |p| format!("p{:<3}", p));
        let header_style = if pose.visible {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:<20}", instrument.name), header_style),
            Span::styled(
                format!("ch{:<3}{}  ", instrument.channel + 1, program),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("slot {:.2}", pose.stack_index),
                Style::default().fg(Color::Magenta),
            ),
        ]));

        if !pose.visible {
            continue;
        }
        for (name, voice) in instrument.voices.iter().zip(&pose.voices) {
            lines.push(voice_line(name, voice));
        }
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, area);
}

fn voice_line(name: &str, voice: &Pose) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("  {:<width$.width$}", name, width = LABEL_WIDTH))];

    if let Some(stick) = voice.stick {
        // Full bar = stick down on the strike
        let down = MAX_STICK_ANGLE - stick.angle;
        spans.push(Span::styled(
            format!("stick {} ", gauge(down, MAX_STICK_ANGLE)),
            Style::default().fg(if stick.visible {
                Color::Yellow
            } else {
                Color::DarkGray
            }),
        ));
    }
    spans.push(Span::styled(
        format!("recoil {} ", gauge(-voice.offset, MAX_RECOIL)),
        Style::default().fg(Color::Cyan),
    ));
    if voice.rotation != 0.0 {
        spans.push(Span::styled(
            format!("wobble {}", gauge(voice.rotation.abs(), MAX_WOBBLE)),
            Style::default().fg(Color::Green),
        ));
    }
    Line::from(spans)
}

fn gauge(value: f64, max: f64) -> String {
    let filled = ((value / max).clamp(0.0, 1.0) * GAUGE_WIDTH as f64).round() as usize;
    format!("{}{}", "▓".repeat(filled), "░".repeat(GAUGE_WIDTH - filled))
}
