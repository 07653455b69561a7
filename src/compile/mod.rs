//! Parameter snapshots compiled into engine operation plans.
//!
//! Each effect turns its time-sampled parameters into a [`plan::Plan`]: an ordered list of
//! engine operations that a [`crate::render::passes::PlanBackend`] executes. Keeping the plan
//! explicit lets the order-sensitive pipelines be checked without touching pixels.

pub mod arc;
pub mod mirror;
pub mod plan;
pub mod tile;
