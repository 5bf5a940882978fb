//! Service context bundling the port trait objects.

use crate::adapters::live::backstage::LiveBackstageCatalog;
use crate::adapters::live::devlake::LiveDevLakeTeams;
use crate::config::Config;
use crate::ports::catalog::TeamCatalog;
use crate::ports::table::TeamTableStore;

/// Bundles the two external boundaries of a sync run.
///
/// The driver only sees port traits, so tests can substitute in-memory
/// fakes for both sides.
pub struct ServiceContext {
    /// Directory catalog serving team entities.
    pub catalog: Box<dyn TeamCatalog>,
    /// Ledger store serving the team table.
    pub teams: Box<dyn TeamTableStore>,
}

impl ServiceContext {
    /// Creates a live context talking to the configured Backstage and
    /// DevLake instances.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self {
            catalog: Box::new(LiveBackstageCatalog::new(&config.backstage_url)),
            teams: Box::new(LiveDevLakeTeams::new(config)),
        }
    }
}
