//! Bloch sphere drawn on a braille canvas.
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders,
    },
    Frame,
};

use crate::core::bloch::{great_circle, BlochVector, Camera, Circle};
use crate::core::QubitState;

const CIRCLE_SAMPLES: usize = 160;
/// Margin around the unit sphere, in sphere radii.
const PAD: f64 = 1.3;
const LABEL_RADIUS: f64 = 1.12;

/// Front/back split of a projected wireframe, in screen coordinates.
#[derive(Debug, Default)]
pub struct Wireframe {
    pub front: Vec<(f64, f64)>,
    pub back: Vec<(f64, f64)>,
}

pub fn wireframe(camera: &Camera) -> Wireframe {
    let mut w = Wireframe::default();
    for circle in [Circle::Equator, Circle::MeridianXZ, Circle::MeridianYZ] {
        for p in great_circle(circle, CIRCLE_SAMPLES) {
            let q = camera.project(&p);
            if q.is_front() {
                w.front.push((q.u, q.v));
            } else {
                w.back.push((q.u, q.v));
            }
        }
    }
    w
}

/// Canvas bounds that keep the sphere round: a terminal cell is about twice
/// as tall as it is wide.
pub fn bounds(area: Rect) -> ([f64; 2], [f64; 2]) {
    let w = area.width.saturating_sub(2).max(1) as f64;
    let h = (area.height.saturating_sub(2).max(1) as f64) * 2.0;
    if w >= h {
        let k = PAD * w / h;
        ([-k, k], [-PAD, PAD])
    } else {
        let k = PAD * h / w;
        ([-PAD, PAD], [-k, k])
    }
}

pub fn draw(f: &mut Frame<'_>, area: Rect, state: &QubitState, camera: &Camera, accent: Color) {
    let frame = wireframe(camera);
    let bloch = state.bloch();
    let tip = camera.project(&bloch);
    let axes: Vec<(BlochVector, &str)> = vec![
        (BlochVector::new(1.0, 0.0, 0.0), "x"),
        (BlochVector::new(0.0, 1.0, 0.0), "y"),
        (BlochVector::new(0.0, 0.0, 1.0), "|0⟩"),
        (BlochVector::new(0.0, 0.0, -1.0), "|1⟩"),
    ];
    let (xb, yb) = bounds(area);

    let title = Span::styled(
        format!(" Bloch Sphere  (az {:.0}°, el {:.0}°) ", camera.azimuth, camera.elevation),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    );
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(Marker::Braille)
        .x_bounds(xb)
        .y_bounds(yb)
        .paint(move |ctx| {
            ctx.draw(&Points { coords: &frame.back, color: Color::Rgb(70, 70, 90) });
            ctx.draw(&Points { coords: &frame.front, color: Color::Rgb(150, 150, 175) });
            for (axis, _) in &axes {
                let a = camera.project(axis);
                let b = camera.project(&BlochVector::new(-axis.x, -axis.y, -axis.z));
                ctx.draw(&CanvasLine {
                    x1: b.u,
                    y1: b.v,
                    x2: a.u,
                    y2: a.v,
                    color: Color::Rgb(90, 90, 110),
                });
            }
            ctx.layer();
            for (axis, label) in &axes {
                let p = camera.project(&BlochVector::new(
                    axis.x * LABEL_RADIUS,
                    axis.y * LABEL_RADIUS,
                    axis.z * LABEL_RADIUS,
                ));
                let style = Style::default().fg(Color::Rgb(190, 190, 200));
                ctx.print(p.u, p.v, Span::styled(*label, style));
            }
            let color = if tip.is_front() {
                Color::Rgb(255, 240, 0)
            } else {
                Color::Rgb(160, 140, 0)
            };
            ctx.draw(&CanvasLine { x1: 0.0, y1: 0.0, x2: tip.u, y2: tip.v, color });
            ctx.draw(&Points { coords: &[(tip.u, tip.v)], color: Color::Rgb(225, 0, 180) });
            let psi = Style::default().fg(Color::Rgb(225, 0, 180)).add_modifier(Modifier::BOLD);
            ctx.print(tip.u, tip.v, Span::styled("ψ", psi));
        });
    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn wireframe_splits_front_and_back() {
        let w = wireframe(&Camera::default());
        assert_eq!(w.front.len() + w.back.len(), 3 * CIRCLE_SAMPLES);
        assert!(!w.front.is_empty() && !w.back.is_empty());
    }

    #[test]
    fn bounds_follow_cell_aspect() {
        // 82 wide, 22 tall → 80 × 40 sub-units: x range is twice y
        let (xb, yb) = bounds(Rect::new(0, 0, 82, 22));
        assert!((xb[1] / yb[1] - 2.0).abs() < 1e-9);
        let (xb, yb) = bounds(Rect::new(0, 0, 12, 42));
        assert_eq!(xb, [-PAD, PAD]);
        assert!(yb[1] > PAD);
    }

    #[test]
    fn draws_pole_labels_and_state_marker() {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        let camera = Camera::default();
        terminal
            .draw(|f| {
                let area = f.size();
                draw(f, area, &QubitState::excited(), &camera, Color::White)
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        let text: String = buf.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("|0⟩"));
        assert!(text.contains('ψ'));
        assert!(text.contains("az 60°"));
    }
}
