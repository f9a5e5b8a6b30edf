//! `traffic-core`: foundational types for the traffic simulation workspace.
//!
//! This crate is a dependency of every other `traffic-*` crate.  It has no
//! `traffic-*` dependencies and no required external ones (`serde` is
//! optional).
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`ids`]     | `NodeId`, `EdgeId`                                       |
//! | [`time`]    | `Tick`                                                   |
//! | [`config`]  | `SimConfig`                                              |
//! | [`agent`]   | `Agent` capability trait                                 |
//! | [`edge`]    | `Edge` capability trait                                  |
//! | [`choice`]  | `Choice`: one recorded traversal decision               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod agent;
pub mod choice;
pub mod config;
pub mod edge;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::Agent;
pub use choice::Choice;
pub use config::SimConfig;
pub use edge::Edge;
pub use ids::{EdgeId, NodeId};
pub use time::Tick;
