//! # HORUS Allowed Collision Matrix
//!
//! Tracks which pairs of robot links are permitted to be in contact, so
//! collision checkers can skip contacts that are expected (adjacent links,
//! parts bolted together, sensors mounted on a plate).
//!
//! - **LinkPair**: order-independent pair of link names
//! - **AllowedCollisionMatrix**: pair -> reason table with add/remove/query/merge
//! - **CollisionFilter**: the trait collision checkers query
//! - **URDF adjacency**: seed a matrix from a parsed robot description
//!
//! ## Quick Start
//!
//! ```rust
//! use horus_acm::AllowedCollisionMatrix;
//!
//! let mut acm = AllowedCollisionMatrix::new();
//! acm.add_allowed_collision("base_link", "left_wheel", "Adjacent");
//! acm.add_allowed_collision("base_link", "right_wheel", "Adjacent");
//!
//! assert!(acm.is_collision_allowed("left_wheel", "base_link"));
//!
//! acm.remove_allowed_collisions_for_link("base_link");
//! assert!(acm.is_empty());
//! ```
//!
//! The matrix has no internal locking. Share it read-only with
//! [`SharedCollisionMatrix`], or put it behind a lock when more than one
//! owner mutates it.

pub mod adjacency;
pub mod error;
pub mod filter;
pub mod matrix;
pub mod pair;

pub use adjacency::{AdjacencyConfig, DEFAULT_ADJACENT_REASON, DEFAULT_RIGID_REASON};
pub use error::{AcmError, AcmResult};
pub use filter::CollisionFilter;
pub use matrix::{AllowedCollisionEntries, AllowedCollisionMatrix, SharedCollisionMatrix};
pub use pair::LinkPair;
