//! UI rendering helpers for the terminal user interface.
//!
//! The session is observed read-only every frame; nothing here mutates state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::catalog::TrackSource;
use crate::config::UiSettings;
use crate::keys::LEGEND;
use crate::media::MediaBackend;
use crate::session::{PlayerSession, VolumeIcon};

#[cfg(test)]
mod tests;

/// Format seconds as `m:ss`. NaN, non-positive and infinite inputs render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

fn format_duration(d: Duration) -> String {
    format_time(d.as_secs_f64())
}

fn controls_text() -> String {
    LEGEND
        .iter()
        .map(|(key, what)| format!("[{key}] {what}"))
        .collect::<Vec<_>>()
        .join(" • ")
}

fn volume_text(icon: VolumeIcon, level: f32) -> String {
    let glyph = match icon {
        VolumeIcon::Muted => "🔇",
        VolumeIcon::Low => "🔉",
        VolumeIcon::High => "🔊",
    };
    format!("{glyph} {:>3}%", (level * 100.0).round() as u32)
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// Fraction of the track already played, in `[0, 1]`.
fn progress_ratio(position: Duration, duration: Option<Duration>) -> f64 {
    match duration {
        Some(total) if !total.is_zero() => {
            (position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

/// Bottom-anchored rectangle of `height` rows inside `r`.
fn bottom_rect(height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    Rect {
        x: r.x,
        y: r.y + r.height - height,
        width: r.width,
        height,
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI. `prompt` carries the song-id input while it has focus.
pub fn draw<M: MediaBackend, S: TrackSource>(
    frame: &mut Frame,
    session: &PlayerSession<M, S>,
    prompt: Option<&str>,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cantor ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let mut lines: Vec<Line> = Vec::new();
    match session.current_track() {
        Some(track) => {
            lines.push(Line::from(track.title.clone()).bold());
            lines.push(Line::from(track.artist.clone()));
            lines.push(Line::from(
                track.album.clone().unwrap_or_else(|| "Unknown album".to_string()),
            ));
            if let Some(cover) = &track.cover {
                lines.push(Line::from(format!("Cover: {cover}")).dim());
            }
            if let Some(label) = &track.duration_label {
                lines.push(Line::from(format!("Length: {label}")).dim());
            }
        }
        None => lines.push(Line::from("Nothing loaded").dim()),
    }
    let mut title = " now playing ".to_string();
    if session.is_loading() {
        title = " now playing (loading…) ".to_string();
    }
    let now_playing = Paragraph::new(lines)
        .block(Block::bordered().padding(left_pad()).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[1]);

    // Progress
    let position = session.position();
    let duration = session.duration();
    let total = duration.map(format_duration).unwrap_or_else(|| "0:00".to_string());
    let gauge = Gauge::default()
        .block(Block::bordered().title(" progress "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(progress_ratio(position, duration))
        .label(format!("{} / {}", format_duration(position), total));
    frame.render_widget(gauge, chunks[2]);

    // Playlist
    {
        let entries = session.playlist().entries();
        let items: Vec<ListItem> = entries
            .iter()
            .map(|entry| match &entry.title {
                Some(t) => ListItem::new(format!("{t} (#{})", entry.id)),
                None => ListItem::new(format!("Song #{}", entry.id)),
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(session.playlist().cursor());
        frame.render_stateful_widget(list, chunks[3], &mut state);

        let notes: Vec<Line> = session
            .notifications()
            .iter()
            .map(|n| Line::from(format!("⚠ {}", n.message())).fg(Color::Red))
            .collect();
        if !notes.is_empty() {
            let area = bottom_rect(notes.len() as u16 + 2, chunks[3]);
            frame.render_widget(Clear, area);
            let popup = Paragraph::new(notes)
                .block(Block::bordered().padding(left_pad()).title(" notice "));
            frame.render_widget(popup, area);
        }
    }

    // Status or prompt
    let status = match prompt {
        Some(text) => Paragraph::new(format!("Song ids: {text}▏"))
            .block(Block::bordered().padding(left_pad()).title(" open (enter/esc) ")),
        None => {
            let parts = [
                session.phase().label().to_string(),
                format!("Shuffle: {}", on_off(session.is_shuffle())),
                format!("Repeat: {}", on_off(session.is_repeat())),
                volume_text(session.volume_icon(), session.live_volume()),
            ];
            Paragraph::new(parts.join(" • "))
                .block(Block::bordered().padding(left_pad()).title(" status "))
        }
    };
    frame.render_widget(status, chunks[4]);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}
