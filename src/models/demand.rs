//! Delivery demands.

use serde::{Deserialize, Serialize};

/// A quantity to deliver to one customer point.
///
/// # Examples
///
/// ```
/// use depot_routing::models::Demand;
///
/// let d = Demand::new(1, 42, 15);
/// assert_eq!(d.point_id(), 42);
/// assert_eq!(d.quantity(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demand {
    id: usize,
    point_id: usize,
    quantity: i32,
}

impl Demand {
    /// Creates a demand of `quantity` units at customer `point_id`.
    pub fn new(id: usize, point_id: usize, quantity: i32) -> Self {
        Self {
            id,
            point_id,
            quantity,
        }
    }

    /// Demand identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The customer point this demand belongs to.
    pub fn point_id(&self) -> usize {
        self.point_id
    }

    /// Units to deliver.
    pub fn quantity(&self) -> i32 {
        self.quantity
    }
}
