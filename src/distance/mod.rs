//! Distance model.
//!
//! A [`Metric`] turns two coordinate pairs into a non-negative distance; a
//! [`DistanceMatrix`] caches it for every pair of locations in an instance.

mod matrix;
mod metric;

pub use matrix::DistanceMatrix;
pub use metric::{Metric, EARTH_RADIUS_KM};
