//! # External Service Providers
//!
//! Each external collaborator of the pipeline sits behind a trait so the
//! pipeline can be driven by real HTTP clients in production and in-memory
//! doubles in tests.

pub mod ai;
pub mod db;
pub mod storage;
