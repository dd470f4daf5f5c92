//! Fete - a terminal admin client for the Party Planner events service.
//!
//! This crate provides a terminal-based admin tool that lists, inspects,
//! creates, and deletes party events held by a remote CRUD service. The view
//! is rebuilt in full from a single application-state record on every change.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the state record and the sync controller.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the element builder, views, and the TUI.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "fete";
