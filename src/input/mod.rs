//! Inputs are the market data observations that fill models price orders against, and the two
//! collaborators that hold them: the per-security cache and the subscription query.
//!
//! Data arrives from outside the crate already materialized, the fill models never fetch or wait
//! for data.
pub mod cache;
pub mod data;
pub mod subscription;
