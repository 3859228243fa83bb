//! Offline backdrop: graticule and a simplified outline of France

use egui::{Align2, FontId, Painter, Pos2, Rect, Shape, Stroke};
use estate_core::Coordinates;

use super::camera::{world_size, Camera};
use crate::style;

/// Mainland France, clockwise from Dunkerque, as `(lng, lat)`
const MAINLAND: &[(f64, f64)] = &[
    (2.54, 51.09),
    (4.15, 49.98),
    (5.90, 49.50),
    (8.20, 48.97),
    (7.60, 47.58),
    (6.85, 47.00),
    (6.00, 46.15),
    (7.00, 45.90),
    (6.63, 45.10),
    (7.00, 44.20),
    (7.52, 43.78),
    (6.60, 43.15),
    (5.00, 43.40),
    (4.20, 43.45),
    (3.10, 43.10),
    (3.17, 42.43),
    (1.70, 42.50),
    (-0.20, 42.80),
    (-1.78, 43.37),
    (-1.25, 44.60),
    (-1.20, 46.00),
    (-2.20, 47.10),
    (-4.37, 47.80),
    (-4.77, 48.40),
    (-3.00, 48.80),
    (-1.60, 48.65),
    (-1.95, 49.70),
    (-1.26, 49.69),
    (0.10, 49.45),
    (1.40, 50.10),
    (1.60, 50.90),
];

const CORSICA: &[(f64, f64)] = &[
    (9.40, 43.00),
    (9.56, 42.15),
    (9.20, 41.37),
    (8.60, 41.90),
    (8.70, 42.60),
];

/// Graticule spacings in degrees, finest first
const GRID_STEPS: &[f64] = &[
    0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 45.0,
];

/// Minimum distance between graticule lines
const MIN_GRID_SPACING_PX: f64 = 80.0;

/// Finest graticule spacing that keeps lines at least 80px apart
pub fn graticule_step(zoom: f64) -> f64 {
    let px_per_degree = world_size(zoom) / 360.0;
    GRID_STEPS
        .iter()
        .copied()
        .find(|step| step * px_per_degree >= MIN_GRID_SPACING_PX)
        .unwrap_or(45.0)
}

pub fn draw(painter: &Painter, camera: &Camera, rect: Rect) {
    painter.rect_filled(rect, 0.0, style::MAP_LAND);
    draw_graticule(painter, camera, rect);

    let stroke = Stroke::new(1.5, style::MAP_BORDER);
    for outline in [MAINLAND, CORSICA] {
        let points: Vec<Pos2> = outline
            .iter()
            .map(|&(lng, lat)| camera.project(Coordinates::new(lng, lat), rect))
            .collect();
        painter.add(Shape::closed_line(points, stroke));
    }
}

fn draw_graticule(painter: &Painter, camera: &Camera, rect: Rect) {
    let step = graticule_step(camera.zoom);
    let north_west = camera.unproject(rect.left_top(), rect);
    let south_east = camera.unproject(rect.right_bottom(), rect);
    let stroke = Stroke::new(0.5, style::MAP_GRID);
    let font = FontId::proportional(10.0);

    let mut lng = (north_west.lng / step).floor() * step;
    while lng <= south_east.lng {
        let x = camera.project(Coordinates::new(lng, 0.0), rect).x;
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        painter.text(
            Pos2::new(x + 2.0, rect.bottom() - 2.0),
            Align2::LEFT_BOTTOM,
            format_degrees(lng),
            font.clone(),
            style::MUTED_TEXT,
        );
        lng += step;
    }

    let mut lat = (south_east.lat / step).floor() * step;
    while lat <= north_west.lat {
        let y = camera.project(Coordinates::new(camera.center.lng, lat), rect).y;
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        painter.text(
            Pos2::new(rect.left() + 2.0, y - 2.0),
            Align2::LEFT_BOTTOM,
            format_degrees(lat),
            font.clone(),
            style::MUTED_TEXT,
        );
        lat += step;
    }
}

fn format_degrees(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}°", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graticule_step_follows_zoom() {
        assert_eq!(graticule_step(5.0), 5.0);
        assert_eq!(graticule_step(2.0), 30.0);
        assert_eq!(graticule_step(14.0), 0.01);
        assert!(graticule_step(8.0) < graticule_step(6.0));
    }

    #[test]
    fn test_outlines_are_inside_france_bounds() {
        for &(lng, lat) in MAINLAND.iter().chain(CORSICA) {
            assert!((-5.0..=9.6).contains(&lng));
            assert!((41.3..=51.1).contains(&lat));
        }
    }
}
