//! # Application Services
//!
//! Use-case orchestration over the domain, persistence ports and provider
//! adapters.
//!
//! - [`shipments::ShipmentService`]: create / submit / cancel / rates
//! - [`rate_aggregation::RateAggregationEngine`]: provider fan-out
//! - [`booking::BookingService`]: booking dispatch and label retrieval
//! - [`tracking::TrackingService`]: tracking refresh and daily sweep
//! - [`party_resolution::PartyResolver`]: address/contact resolution

pub mod booking;
pub mod party_resolution;
pub mod rate_aggregation;
pub mod shipments;
pub mod tracking;

pub use booking::BookingService;
pub use party_resolution::PartyResolver;
pub use rate_aggregation::{
    AggregationConfig, AggregationError, RateAggregationEngine, RateSheet,
};
pub use shipments::ShipmentService;
pub use tracking::{SweepReport, TrackingService, TrackingSweep};
