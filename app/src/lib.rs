//! # StyleKit
//!
//! Command-line front end for the StyleKit theme engine. It resolves the
//! active theme from a JSON store, lists and activates themes from a catalog
//! directory and exposes the color helpers.
//!
//! ## Modules
//!
//! - [`config`] - Configuration loaded from `stylekit.toml` and the environment
//! - [`error`] - Application error type
//! - [`logger`] - `fern` logging setup
//! - [`theme`] - Store, catalog and icon collaborators for the engine
//! - [`validation`] - Input validation trait

pub mod config;
pub mod error;
pub mod logger;
pub mod theme;
pub mod validation;
