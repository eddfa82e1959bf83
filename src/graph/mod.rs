//! Relationship engine for the narrative plane.
//!
//! Turns narratives (weighted tags) and their positions on the plane into
//! drawable edges under one of four strategies. Every call recomputes from a
//! [`Snapshot`]; nothing is cached between calls.

pub mod cluster;
pub mod config;
pub mod dataset;
pub mod error;
pub mod layout;
pub mod maximal;
pub mod metrics;
pub mod nodes;
pub mod scoring;
pub mod stepwise;
pub mod strategy;
pub mod tag_links;
pub mod types;

pub use cluster::Cluster;
pub use config::PlaneConfig;
pub use dataset::{parse_narratives, weight_label};
pub use error::{ConfigError, DatasetError};
pub use layout::GridLayout;
pub use maximal::{MaximalCluster, maximal_clusters};
pub use strategy::{Connections, Snapshot, Strategy, connect};
pub use types::{Color, Edge, EdgeKind, NarrativeRecord, Node, Point, Tag, VisibleEntry, VisualEdge};
