pub mod bridge;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod model;
pub mod project;

pub use config::Settings;
pub use error::{QuokkaError, Result};
pub use model::{ExcludeSet, ExtensionClass, FileIdentity, MatchCandidate};
pub use project::{CounterpartQuery, CounterpartResolver, workspace_root_for};
