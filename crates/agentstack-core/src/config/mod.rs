//! Project configuration file handling

mod loader;

pub use loader::{assert_project, ConfigFile, CONFIG_FILENAME};
