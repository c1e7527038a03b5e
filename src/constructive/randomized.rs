//! Random-order construction for diversified multi-start seeds.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Instance, Tour};

/// Depot first, then every customer in a fresh uniformly random order.
pub fn randomized<R: Rng + ?Sized>(instance: &Instance, rng: &mut R) -> Tour {
    let mut customers = instance.customers();
    customers.shuffle(rng);

    let mut order = Vec::with_capacity(instance.len());
    order.push(instance.depot());
    order.extend(customers);
    Tour::new(order)
}
