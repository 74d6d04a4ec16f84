//! Configuration for markup filtering.
//!
//! The option surface is a flat set of settings controlling how embedded
//! PHP markup is replaced before a host-language analyzer runs:
//! which file extensions get filtered, what placeholder text stands in for
//! each kind of markup span, and how adjacent line endings and whitespace
//! are folded into the replaced spans.
//!
//! Config files are discovered by walking up the directory tree and may be
//! YAML or JSON.

mod config;
mod error;
mod loader;

pub use config::{MarkupConfig, Replacement};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str};
