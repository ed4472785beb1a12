//! Synergos analytics
//!
//! Read-only reports computed from a [`synergos_core::Dataset`]:
//! dashboard KPIs, user locations and the co-membership graph.

pub mod graph;
pub mod location;
pub mod stats;

pub use graph::{graph, GraphData, GraphNode, GraphRelationship, GroupCluster, TRANSACTED_WITH};
pub use location::{distance_km, locations, CityDensity, LocationReport, UserLocation};
pub use stats::{
    stats, AnalyticsConfig, DashboardStats, GroupActivity, Overview, StatusCounts, Trends,
    UserEngagement,
};
