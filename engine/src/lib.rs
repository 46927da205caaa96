//! # StyleKit Engine
//!
//! Core library for theme resolution, persistence and runtime switching.
//! This library knows which theme is active, merges partial theme definitions
//! with the canonical variable template, migrates older persisted records and
//! orchestrates the download, sync and activate sequence for remote themes.
//!
//! ## Modules
//!
//! - [`builtin`] - System themes shipped with the application
//! - [`color`] - Color parsing, blending and conversion helpers
//! - [`config`] - Session settings, platform and storage keys
//! - [`errors`] - Error types for the theme core and its collaborators
//! - [`icons`] - Icon asset reload hook invoked on every activation
//! - [`observers`] - Theme change publish/subscribe hub
//! - [`record`] - Persisted theme record and schema migration
//! - [`registry`] - In-memory collection of known themes
//! - [`rules`] - Style rule catalog derived from theme variables
//! - [`session`] - Theme session hosting initial resolution and activation
//! - [`store`] - Durable key-value persistence interface
//! - [`theme`] - Theme entity and mobile rule payload
//! - [`transport`] - Remote download and sync interface
//! - [`variables`] - Style variables and the canonical template

pub mod builtin;
pub mod color;
pub mod config;
pub mod errors;
pub mod icons;
pub mod observers;
pub mod record;
pub mod registry;
pub mod rules;
pub mod session;
pub mod store;
pub mod theme;
pub mod transport;
pub mod variables;

pub use color::{Color, ColorError};
pub use config::{Platform, SessionSettings};
pub use errors::{StoreError, ThemeError, TransportError};
pub use icons::{IconLoader, NoopIconLoader};
pub use observers::{ObserverHub, ObserverToken};
pub use registry::ThemeRegistry;
pub use session::{SharedThemeSession, ThemeSession};
pub use store::{MemoryThemeStore, ThemeStore};
pub use theme::{MobileRules, StatusBarStyle, Theme};
pub use transport::{OfflineTransport, ThemeTransport};
pub use variables::{VariableSet, VariableTemplate, VariableValue};
