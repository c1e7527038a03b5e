//! Error type shared by every fallible operation in the crate.

use thiserror::Error as ThisError;

/// Failures surfaced by instance validation, decomposition and the search.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum RoutingError {
    /// No points were supplied.
    #[error("instance contains no points")]
    EmptyInstance,
    /// The point set has no depot-role point.
    #[error("no depot point found")]
    NoDepotFound,
    /// More than one point claims the depot role.
    #[error("multiple depots: points {first} and {second}")]
    MultipleDepots {
        /// First depot id encountered.
        first: usize,
        /// Second depot id encountered.
        second: usize,
    },
    /// Two points share an identifier.
    #[error("duplicate point id {0}")]
    DuplicatePointId(usize),
    /// A reference to a point id that does not exist.
    #[error("unknown point id {0}")]
    UnknownPointId(usize),
    /// A customer is referenced by more than one demand.
    #[error("point {point_id} has more than one demand")]
    DuplicateDemand {
        /// Customer referenced twice.
        point_id: usize,
    },
    /// A demand references the depot instead of a customer.
    #[error("demand references depot point {point_id}")]
    DemandOnDepot {
        /// The depot id.
        point_id: usize,
    },
    /// A demand quantity is zero or negative.
    #[error("demand {demand_id} has non-positive quantity {quantity}")]
    InvalidQuantity {
        /// Offending demand id.
        demand_id: usize,
        /// The rejected quantity.
        quantity: i32,
    },
    /// Vehicle capacity is zero or negative.
    #[error("vehicle capacity must be positive, got {0}")]
    InvalidCapacity(i32),
    /// A vehicle starts or ends somewhere other than the depot.
    #[error("vehicle endpoint {point_id} is not the depot")]
    VehicleNotAtDepot {
        /// The endpoint that was supplied.
        point_id: usize,
    },
    /// A point has a NaN or infinite coordinate.
    #[error("point {point_id} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Offending point id.
        point_id: usize,
    },
    /// A tour handed to decomposition is not a permutation of the instance.
    #[error("invalid tour: {0}")]
    InvalidTour(String),
    /// No capacity-feasible split of the tour exists.
    ///
    /// `quantity` is `None` when the blocking point has no demand at all.
    #[error("point {point_id} cannot be served: demand {quantity:?} with capacity {capacity}")]
    InfeasibleDemand {
        /// Customer that no route can hold.
        point_id: usize,
        /// Its demand, if it has one.
        quantity: Option<i32>,
        /// The shared vehicle capacity.
        capacity: i32,
    },
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// The worker pool for parallel trials could not be built.
    #[error("thread pool: {0}")]
    ThreadPool(String),
    /// The search was cancelled before any trial completed.
    #[error("search cancelled before any trial completed")]
    Cancelled,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RoutingError>;

impl RoutingError {
    /// Shorthand for [`RoutingError::InvalidConfig`].
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
