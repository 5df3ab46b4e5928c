//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::{App, Grab};
use crate::config::ControlsSettings;
use crate::playback::Track;
use crate::sync::{SliderControl, ValueControl};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "down/up".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("s".to_string(), "grab position".to_string());
    map.insert("v".to_string(), "grab volume".to_string());
    // h/l and -/= are filled dynamically from config.
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the key steps.
fn controls_text(controls: &ControlsSettings) -> String {
    let order = ["j/k", "space/p", "s", "v", "h/l", "-/=", "q"];
    order
        .iter()
        .filter_map(|k| match *k {
            "h/l" => Some(format!("[h/l] move/scrub -/+{}%", controls.scrub_step)),
            "-/=" => Some(format!("[-/=] volume -/+{}%", controls.volume_step)),
            _ => CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `elapsed / total`, or just `elapsed` while the length is unknown.
fn time_text(track: &Track) -> String {
    let elapsed = format_mmss(track.current_time());
    match track.state().duration {
        Some(total) => format!("{} / {}", elapsed, format_mmss(total)),
        None => format!("{} / --:--", elapsed),
    }
}

fn slider_gauge<'a>(title: String, control: &SliderControl, grabbed: bool) -> Gauge<'a> {
    let title = if grabbed {
        format!(" {title} (grabbed) ")
    } else {
        format!(" {title} ")
    };
    let style = if control.is_disabled() {
        Style::default().add_modifier(Modifier::DIM)
    } else if grabbed {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let percent = control.value().round().clamp(0.0, 100.0) as u16;
    let label = if control.is_disabled() {
        "--".to_string()
    } else {
        format!("{percent}%")
    };

    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(style)
        .percent(percent)
        .label(label)
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, controls: &ControlsSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());
    // Header
    let header = Paragraph::new("playback controller")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let selected = app.selected();
    let button = if selected.status().accepts_toggle() {
        format!(" [{}]", app.label())
    } else {
        format!(" [{}] (inactive)", app.label())
    };
    let status = [
        button,
        format!("Track: {}", selected.name()),
        selected.status().to_string(),
        time_text(selected),
    ]
    .join(" • ");

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Main list
    {
        let items: Vec<ListItem> = app
            .tracks()
            .iter()
            .map(|t| ListItem::new(format!("{}  [{}]", t.name(), t.status())))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(app.selected_id()));
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Sliders
    {
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(chunks[3]);
        render_sliders(frame, app, row[0], row[1]);
    }

    let footer = Paragraph::new(controls_text(controls))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true })
        .dim();

    frame.render_widget(footer, chunks[4]);
}

fn render_sliders(frame: &mut Frame, app: &App, position_area: Rect, volume_area: Rect) {
    let position = slider_gauge(
        "position".to_string(),
        app.position_control(),
        app.grabbed() == Some(Grab::Position),
    );
    frame.render_widget(position, position_area);

    let volume = slider_gauge(
        "volume".to_string(),
        app.volume_control(),
        app.grabbed() == Some(Grab::Volume),
    );
    frame.render_widget(volume, volume_area);
}
