use crate::compare::CompareConfig;
use crate::resolve::CsvResolver;
use std::sync::Mutex;

pub struct AppState {
    /// Shared csv resolver: one dataset load serves every request. The lock
    /// also serializes the first-load race.
    pub csv: Mutex<CsvResolver>,
    pub config: CompareConfig,
}
