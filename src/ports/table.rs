//! Team table port for reading and replacing the ledger's team records.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Column names of the team table, in wire order.
pub const TEAM_TABLE_HEADER: [&str; 5] = ["Id", "Name", "Alias", "ParentId", "SortingIndex"];

/// Boxed future type alias for [`TeamTableStore::fetch_table`].
pub type TableFuture<'a> =
    Pin<Box<dyn Future<Output = Result<TeamTable, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Boxed future type alias for [`TeamTableStore::persist_table`]. Resolves
/// to the store's raw response body, surfaced for the operator log.
pub type PersistFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// One team record in the ledger's table.
///
/// All fields are kept as strings and written back verbatim; `alias` and
/// `sorting_index` are opaque to the sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique decimal id, ledger-assigned.
    pub id: String,
    /// Team name, matched case-insensitively against directory entities.
    pub name: String,
    /// Opaque alias column.
    pub alias: String,
    /// Id of the parent team's record, or empty for no parent.
    pub parent_id: String,
    /// Opaque sorting column.
    pub sorting_index: String,
}

/// The ledger's team table: a verbatim header row plus data rows in order.
///
/// The header never participates in matching, relinking, or id allocation;
/// it is carried through unchanged and written back as row 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTable {
    /// Column names exactly as read from the wire.
    pub header: Vec<String>,
    /// Team records in table order.
    pub teams: Vec<Team>,
}

impl Default for TeamTable {
    fn default() -> Self {
        Self::with_default_header()
    }
}

impl TeamTable {
    /// Creates an empty table carrying the canonical column header.
    #[must_use]
    pub fn with_default_header() -> Self {
        Self {
            header: TEAM_TABLE_HEADER.iter().map(|name| (*name).to_string()).collect(),
            teams: Vec::new(),
        }
    }

    /// Returns the largest id among data rows whose id parses as an
    /// unsigned decimal integer, or 0 when none do.
    ///
    /// Unparsable ids are skipped rather than treated as errors so that
    /// manually edited tables cannot wedge id allocation.
    #[must_use]
    pub fn largest_id(&self) -> u64 {
        self.teams.iter().filter_map(|team| team.id.parse::<u64>().ok()).max().unwrap_or(0)
    }

    /// Finds the index of the first data row whose name equals `name`
    /// case-insensitively.
    #[must_use]
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.teams.iter().position(|team| names_equal_fold(&team.name, name))
    }
}

/// Case-insensitive name equality with Unicode lowercase folding.
fn names_equal_fold(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Reads and replaces the ledger's team table.
///
/// The table is always fetched fully and replaced wholesale; there is no
/// incremental update surface.
pub trait TeamTableStore: Send + Sync {
    /// Fetches the current table, or a header-only table in replace mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or its response is
    /// not well-formed tabular text.
    fn fetch_table(&self) -> TableFuture<'_>;

    /// Replaces the stored table with `table` and returns the store's raw
    /// response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be encoded or the upload fails.
    fn persist_table<'a>(&'a self, table: &'a TeamTable) -> PersistFuture<'a>;
}
