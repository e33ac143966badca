//! CLI command implementations
//!
//! - `generate`: synthesis plus rendering
//! - `check`: synthesis and diagnostics only
//! - `init`: default configuration
//! - `util`: shared helpers

pub mod check;
pub mod generate;
pub mod init;
pub mod util;

pub use check::cmd_check;
pub use generate::cmd_generate;
pub use init::cmd_init;
