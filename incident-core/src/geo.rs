//! Geolocation fallback and web-mercator tile math for the map view.

use crate::error::GeoError;
use crate::incident::Coordinates;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 18;
pub const DEFAULT_ZOOM: u8 = 10;
pub const FOCUS_ZOOM: u8 = 15;
pub const ATTRIBUTION: &str = "\u{a9} OpenStreetMap contributors";

const MAX_MERCATOR_LAT: f64 = 85.051_128_78;
const REPORT_JITTER_DEG: f64 = 0.01;

pub fn resolve_location(fix: Result<Coordinates, GeoError>, fallback: Coordinates) -> Coordinates {
    match fix {
        Ok(coords) if coords.is_valid() => coords,
        Ok(coords) => {
            tracing::warn!(?coords, "geolocation returned invalid coordinates, using fallback");
            fallback
        }
        Err(err) => {
            tracing::warn!(%err, "geolocation failed, using fallback");
            fallback
        }
    }
}

/// Where a new report is pinned: the user's position, or a small random
/// offset around `fallback` so repeated reports don't stack.
pub fn report_location<R: Rng + ?Sized>(
    user: Option<Coordinates>,
    fallback: Coordinates,
    rng: &mut R,
) -> Coordinates {
    match user {
        Some(coords) => coords,
        None => Coordinates::new(
            fallback.latitude + (rng.gen::<f64>() - 0.5) * REPORT_JITTER_DEG,
            fallback.longitude + (rng.gen::<f64>() - 0.5) * REPORT_JITTER_DEG,
        ),
    }
}

pub fn marker_radius_px(affected_radius_m: u32) -> f64 {
    (f64::from(affected_radius_m) / 100.0).clamp(5.0, 20.0)
}

pub fn tile_url(template: &str, z: u8, x: u32, y: u32) -> String {
    template
        .replace("{z}", &z.to_string())
        .replace("{x}", &x.to_string())
        .replace("{y}", &y.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * f64::from(1u32 << zoom)
}

pub fn project(coords: Coordinates, zoom: u8) -> WorldPoint {
    let size = world_size(zoom);
    let lat = coords.latitude.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    WorldPoint {
        x: (coords.longitude + 180.0) / 360.0 * size,
        y: (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size,
    }
}

pub fn unproject(point: WorldPoint, zoom: u8) -> Coordinates {
    let size = world_size(zoom);
    let longitude = point.x / size * 360.0 - 180.0;
    let n = PI - 2.0 * PI * point.y / size;
    let latitude = n.sinh().atan().to_degrees();
    Coordinates::new(latitude, longitude)
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedTile {
    pub z: u8,
    pub x: u32,
    pub y: u32,
    pub left: f64,
    pub top: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: u8,
}

impl Viewport {
    pub fn new(center: Coordinates, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    pub fn overview(center: Coordinates) -> Self {
        Self::new(center, DEFAULT_ZOOM)
    }

    pub fn focus(center: Coordinates) -> Self {
        Self::new(center, FOCUS_ZOOM)
    }

    #[must_use]
    pub fn zoomed(self, delta: i8) -> Self {
        let zoom = (i16::from(self.zoom) + i16::from(delta))
            .clamp(i16::from(MIN_ZOOM), i16::from(MAX_ZOOM));
        Self::new(self.center, zoom as u8)
    }

    #[must_use]
    pub fn panned(self, dx: f64, dy: f64) -> Self {
        let c = project(self.center, self.zoom);
        let moved = unproject(
            WorldPoint {
                x: c.x + dx,
                y: c.y + dy,
            },
            self.zoom,
        );
        Self::new(moved, self.zoom)
    }

    /// Position of `coords` in a `width` x `height` viewport, origin top-left.
    pub fn to_screen(&self, coords: Coordinates, width: f64, height: f64) -> (f64, f64) {
        let c = project(self.center, self.zoom);
        let p = project(coords, self.zoom);
        (p.x - c.x + width / 2.0, p.y - c.y + height / 2.0)
    }

    pub fn visible_tiles(&self, width: f64, height: f64) -> Vec<PlacedTile> {
        let c = project(self.center, self.zoom);
        let left = c.x - width / 2.0;
        let top = c.y - height / 2.0;
        let n = 1i64 << self.zoom;

        let x0 = (left / TILE_SIZE).floor() as i64;
        let x1 = ((left + width) / TILE_SIZE).floor() as i64;
        let y0 = ((top / TILE_SIZE).floor() as i64).max(0);
        let y1 = (((top + height) / TILE_SIZE).floor() as i64).min(n - 1);

        let mut tiles = Vec::new();
        for ty in y0..=y1 {
            for tx in x0..=x1 {
                tiles.push(PlacedTile {
                    z: self.zoom,
                    x: tx.rem_euclid(n) as u32,
                    y: ty as u32,
                    left: tx as f64 * TILE_SIZE - left,
                    top: ty as f64 * TILE_SIZE - top,
                });
            }
        }
        tiles
    }
}
