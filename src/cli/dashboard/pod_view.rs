use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points, Rectangle},
        Block, BorderType, Borders, Paragraph,
    },
    Frame,
};

use super::app::App;
use super::draw::emphasis_color;
use crate::batch::card::progress_bar;
use crate::batch::resolve;
use crate::pod::{PodScene, LIVE_METRICS, POD_HEIGHT, POD_WIDTH};

const COCOA: Color = Color::Rgb(0x6b, 0x3e, 0x26);
const LASER: Color = Color::Rgb(0xff, 0x4d, 0x4d);

/// Beans projected onto the canvas plane, split by temperature.
fn project(scene: &PodScene) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let (sin, cos) = scene.sway().sin_cos();
    let lift = scene.bob() - POD_HEIGHT / 2.0;

    let mut hot = Vec::new();
    let mut cold = Vec::new();
    for bean in scene.beans() {
        let point = (bean.x * cos + bean.z * sin, bean.y + lift);
        if bean.hot {
            hot.push(point);
        } else {
            cold.push(point);
        }
    }
    (hot, cold)
}

pub fn draw_pod_view(frame: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::horizontal([Constraint::Min(30), Constraint::Length(32)]).split(area);

    let Some(scene) = app.pod() else {
        let empty = Paragraph::new(Span::styled(
            " No batches yet. Press n to start one.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(Block::default().borders(Borders::ALL).title(" Pod "));
        frame.render_widget(empty, area);
        return;
    };

    draw_canvas(frame, cols[0], scene);
    draw_side_panel(frame, cols[1], app, scene);
}

fn draw_canvas(frame: &mut Frame, area: Rect, scene: &PodScene) {
    let snapshot = scene.snapshot();
    let accent = emphasis_color(resolve(snapshot.stage).emphasis);
    let (hot, cold) = project(scene);
    let half_w = POD_WIDTH / 2.0;
    let half_h = POD_HEIGHT / 2.0;
    let fill_y = snapshot.fill_height() - half_h + scene.bob();
    let laser_y = scene.laser_y();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Fermentation Pod "),
        )
        .marker(Marker::Braille)
        .x_bounds([-half_w - 0.5, half_w + 0.5])
        .y_bounds([-half_h - 0.3, half_h + 0.3])
        .paint(move |ctx| {
            ctx.draw(&Rectangle {
                x: -half_w,
                y: -half_h,
                width: POD_WIDTH,
                height: POD_HEIGHT,
                color: Color::Gray,
            });
            ctx.draw(&Points {
                coords: &cold,
                color: COCOA,
            });
            ctx.draw(&Points {
                coords: &hot,
                color: accent,
            });
            ctx.draw(&CanvasLine {
                x1: -half_w,
                y1: fill_y,
                x2: half_w,
                y2: fill_y,
                color: accent,
            });
            ctx.layer();
            ctx.draw(&CanvasLine {
                x1: -half_w,
                y1: laser_y,
                x2: half_w,
                y2: laser_y,
                color: LASER,
            });
        });
    frame.render_widget(canvas, area);
}

fn draw_side_panel(frame: &mut Frame, area: Rect, app: &App, scene: &PodScene) {
    let snapshot = scene.snapshot();
    let status = resolve(snapshot.stage);
    let accent = emphasis_color(status.emphasis);
    let label = app.active_batch().map(|b| b.label().to_string()).unwrap_or_default();

    let mut lines = vec![
        Line::from(Span::styled(label, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            status.label,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(progress_bar(snapshot.progress, 16), Style::default().fg(accent)),
            Span::raw(format!(" {}%", snapshot.progress.percent())),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "LIVE METRICS",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )),
    ];

    for (name, value) in LIVE_METRICS {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<13}", name), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Monitor "),
    );
    frame.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{Progress, Stage};
    use crate::pod::PodSnapshot;

    #[test]
    fn test_projection_splits_hot_and_cold() {
        let scene = PodScene::new(PodSnapshot {
            stage: Stage::Fermenting,
            progress: Progress::new(60).unwrap(),
        });
        let (hot, cold) = project(&scene);
        assert_eq!(hot.len() + cold.len(), scene.beans().len());
        assert!(!hot.is_empty());
        assert!(!cold.is_empty());
    }

    #[test]
    fn test_projection_stays_inside_pod_at_rest() {
        let scene = PodScene::new(PodSnapshot {
            stage: Stage::Ready,
            progress: Progress::COMPLETE,
        });
        let (hot, cold) = project(&scene);
        for (x, y) in hot.iter().chain(cold.iter()) {
            assert!(x.abs() <= POD_WIDTH / 2.0);
            assert!(*y >= -POD_HEIGHT / 2.0 && *y <= POD_HEIGHT / 2.0);
        }
    }
}
