//! Testing infrastructure for storyboard integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: Fluent interface for a temporary project with a `src/` tree
//! - `assertions`: Checks over generated storyboard text
//! - `fixtures`: Sample component sources

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
