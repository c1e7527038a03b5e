//! Pairwise distance formulas.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres used by [`Metric::GreatCircle`] by default.
pub const EARTH_RADIUS_KM: f64 = 6370.7;

/// Distance formula applied to point coordinate pairs.
///
/// The metric is fixed once per [`Instance`](crate::models::Instance) and baked
/// into its [`DistanceMatrix`](super::DistanceMatrix), so every heuristic reads
/// distances computed the same way.
///
/// # Examples
///
/// ```
/// use depot_routing::distance::Metric;
///
/// let d = Metric::Euclidean.distance((0.0, 0.0), (3.0, 4.0));
/// assert!((d - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Planar straight-line distance on raw coordinates.
    #[default]
    Euclidean,
    /// Spherical law of cosines; coordinates are `(longitude, latitude)` in radians.
    GreatCircle {
        /// Sphere radius; the result is in the same unit.
        radius: f64,
    },
}

impl Metric {
    /// Great-circle metric on the Earth, in kilometres.
    pub fn great_circle() -> Self {
        Self::GreatCircle {
            radius: EARTH_RADIUS_KM,
        }
    }

    /// Distance between two coordinate pairs.
    pub fn distance(&self, a: (f64, f64), b: (f64, f64)) -> f64 {
        match *self {
            Metric::Euclidean => {
                let dx = a.0 - b.0;
                let dy = a.1 - b.1;
                (dx * dx + dy * dy).sqrt()
            }
            Metric::GreatCircle { radius } => {
                if a == b {
                    return 0.0;
                }
                let (lon1, lat1) = a;
                let (lon2, lat2) = b;
                let cos_angle =
                    lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon1 - lon2).cos();
                // rounding can push the cosine just past ±1
                radius * cos_angle.clamp(-1.0, 1.0).acos()
            }
        }
    }
}
