// Application state module
// Read-only state shared across connection tasks

use super::types::Config;

/// Application state
///
/// The configuration is fixed for the lifetime of the process, so request
/// handling never takes a lock.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}
