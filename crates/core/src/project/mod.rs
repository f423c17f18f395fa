pub mod counterpart;
pub mod workspace;

pub use counterpart::{CounterpartQuery, CounterpartResolver};
pub use workspace::workspace_root_for;
