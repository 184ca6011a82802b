//! # API Layer
//!
//! Transport surfaces consumed by the UI layer.

pub mod rest;
