//! Configuration: persisted settings and their I/O.
//!
//! Split into sub-modules:
//! - `types`: enums and serde default helpers
//! - `config_struct`: the `Config` struct
//! - `defaults`: the `Config` Default implementation
//! - `io`: loading, saving, environment overrides

mod config_struct;
mod defaults;
mod io;
mod types;

pub use config_struct::Config;
pub use io::{get_config_path, load_config, save_config};
pub use types::ThemeMode;
