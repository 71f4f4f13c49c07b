//! Common types used across the itBit client library.

pub mod common;

pub use common::*;
