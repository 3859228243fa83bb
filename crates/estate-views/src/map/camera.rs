//! Web Mercator camera and fly-to animation

use std::f64::consts::PI;

use egui::{Pos2, Rect, Vec2};
use estate_core::Coordinates;
use serde::{Deserialize, Serialize};

/// Size of the world in pixels at zoom 0
pub const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: f64 = 2.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Latitude where the Mercator square ends
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Normalized Mercator position, both axes in `0..=1`, y pointing south
pub fn mercator(coordinates: Coordinates) -> [f64; 2] {
    let lat = coordinates.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (coordinates.lng + 180.0) / 360.0;
    let y = 0.5 - (PI / 4.0 + lat / 2.0).tan().ln() / (2.0 * PI);
    [x, y]
}

pub fn inverse_mercator([x, y]: [f64; 2]) -> Coordinates {
    let lng = x * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
    Coordinates::new(lng, lat)
}

/// World width in pixels at a zoom level
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

/// Where the map looks and how close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub center: Coordinates,
    pub zoom: f64,
}

impl Camera {
    pub fn new(center: Coordinates, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    fn center_world(&self) -> [f64; 2] {
        let [x, y] = mercator(self.center);
        let size = world_size(self.zoom);
        [x * size, y * size]
    }

    /// Screen position of a coordinate inside `rect`
    pub fn project(&self, coordinates: Coordinates, rect: Rect) -> Pos2 {
        let [x, y] = mercator(coordinates);
        let size = world_size(self.zoom);
        let [cx, cy] = self.center_world();
        let c = rect.center();
        Pos2::new(
            c.x + (x * size - cx) as f32,
            c.y + (y * size - cy) as f32,
        )
    }

    /// Coordinate under a screen position inside `rect`
    pub fn unproject(&self, pos: Pos2, rect: Rect) -> Coordinates {
        let size = world_size(self.zoom);
        let [cx, cy] = self.center_world();
        let c = rect.center();
        let x = (cx + (pos.x - c.x) as f64) / size;
        let y = (cy + (pos.y - c.y) as f64) / size;
        inverse_mercator([x.rem_euclid(1.0), y.clamp(0.0, 1.0)])
    }

    /// Move the map by a screen-space drag
    pub fn pan(&mut self, delta: Vec2) {
        let size = world_size(self.zoom);
        let [cx, cy] = self.center_world();
        let x = (cx - delta.x as f64) / size;
        let y = (cy - delta.y as f64) / size;
        self.center = inverse_mercator([x.rem_euclid(1.0), y.clamp(0.0, 1.0)]);
    }

    /// Change the zoom by `delta` levels, keeping the point under `anchor` fixed
    pub fn zoom_at(&mut self, delta: f64, anchor: Pos2, rect: Rect) {
        let target = self.unproject(anchor, rect);
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);

        let drift = self.project(target, rect) - anchor;
        self.pan(-drift);
    }

    /// Camera `t` of the way towards `to`, moving in Mercator space
    pub fn lerp(&self, to: &Camera, t: f64) -> Camera {
        let [ax, ay] = mercator(self.center);
        let [bx, by] = mercator(to.center);
        Camera {
            center: inverse_mercator([ax + (bx - ax) * t, ay + (by - ay) * t]),
            zoom: self.zoom + (to.zoom - self.zoom) * t,
        }
    }
}

/// Cubic ease-in-out over `0..=1`
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// An eased camera transition, advanced once per frame
#[derive(Debug, Clone)]
pub struct FlyTo {
    from: Camera,
    to: Camera,
    duration: f64,
    elapsed: f64,
}

impl FlyTo {
    pub fn new(from: Camera, to: Camera, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            duration: duration_ms as f64 / 1000.0,
            elapsed: 0.0,
        }
    }

    pub fn target(&self) -> &Camera {
        &self.to
    }

    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` seconds and return the camera for this frame
    pub fn advance(&mut self, dt: f64) -> Camera {
        self.elapsed += dt.max(0.0);
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(&self.to, ease_in_out(self.progress()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(800.0, 600.0))
    }

    fn close(a: Coordinates, b: Coordinates) -> bool {
        (a.lng - b.lng).abs() < 1e-4 && (a.lat - b.lat).abs() < 1e-4
    }

    #[test]
    fn test_mercator_round_trip() {
        for c in [
            Coordinates::new(2.3522, 48.8566),
            Coordinates::new(-1.5534, 47.2184),
            Coordinates::new(0.0, 0.0),
            Coordinates::new(-179.0, -60.0),
        ] {
            assert!(close(inverse_mercator(mercator(c)), c));
        }
        assert_eq!(mercator(Coordinates::new(0.0, 0.0)), [0.5, 0.5]);
    }

    #[test]
    fn test_center_projects_to_rect_center() {
        let camera = Camera::new(Coordinates::new(2.3522, 46.6033), 5.0);
        let pos = camera.project(camera.center, rect());
        assert!((pos - rect().center()).length() < 1e-3);
    }

    #[test]
    fn test_project_unproject_round_trip() {
        let camera = Camera::new(Coordinates::new(2.3522, 46.6033), 6.0);
        let lyon = Coordinates::new(4.8357, 45.7640);
        let pos = camera.project(lyon, rect());
        assert!(pos.x > rect().center().x, "Lyon is east of the center");
        assert!(close(camera.unproject(pos, rect()), lyon));
    }

    #[test]
    fn test_each_zoom_level_doubles_distances() {
        let paris = Coordinates::new(2.3522, 48.8566);
        let mut camera = Camera::new(Coordinates::new(2.3522, 46.6033), 5.0);
        let d5 = (camera.project(paris, rect()) - rect().center()).length();
        camera.zoom = 6.0;
        let d6 = (camera.project(paris, rect()) - rect().center()).length();
        assert!((d6 / d5 - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_at_keeps_anchor_fixed() {
        let mut camera = Camera::new(Coordinates::new(2.3522, 46.6033), 5.0);
        let anchor = Pos2::new(600.0, 200.0);
        let before = camera.unproject(anchor, rect());
        camera.zoom_at(1.5, anchor, rect());
        assert_eq!(camera.zoom, 6.5);
        assert!((camera.project(before, rect()) - anchor).length() < 0.5);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::new(Coordinates::new(0.0, 0.0), 40.0);
        assert_eq!(camera.zoom, MAX_ZOOM);
        camera.zoom_at(-100.0, rect().center(), rect());
        assert_eq!(camera.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_pan_moves_center_against_drag() {
        let mut camera = Camera::new(Coordinates::new(2.0, 46.0), 5.0);
        camera.pan(Vec2::new(100.0, 0.0));
        assert!(camera.center.lng < 2.0);
        assert!((camera.center.lat - 46.0).abs() < 1e-6);
    }

    #[test]
    fn test_easing_endpoints_and_symmetry() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }

    #[test]
    fn test_fly_to_reaches_target() {
        let from = Camera::new(Coordinates::new(2.3522, 46.6033), 5.0);
        let to = Camera::new(Coordinates::new(4.8357, 45.7640), 14.0);
        let mut flight = FlyTo::new(from, to, 1500);

        let halfway = flight.advance(0.75);
        assert!(!flight.is_finished());
        assert!((halfway.zoom - 9.5).abs() < 1e-9);

        let end = flight.advance(1.0);
        assert!(flight.is_finished());
        assert_eq!(end, to);
    }

    #[test]
    fn test_zero_duration_flight_jumps() {
        let from = Camera::new(Coordinates::new(0.0, 0.0), 3.0);
        let to = Camera::new(Coordinates::new(1.0, 1.0), 8.0);
        let mut flight = FlyTo::new(from, to, 0);
        assert_eq!(flight.advance(0.0), to);
    }
}
