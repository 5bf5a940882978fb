//! Team catalog port for listing directory team entities.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Relation kind linking a team to its parent team.
pub const CHILD_OF: &str = "childOf";

/// Relation kind linking a team to one of its child teams.
pub const PARENT_OF: &str = "parentOf";

/// Boxed future type alias used by [`TeamCatalog`] to keep the trait
/// dyn-compatible.
pub type EntityListFuture<'a> = Pin<
    Box<dyn Future<Output = Result<Vec<TeamEntity>, Box<dyn Error + Send + Sync>>> + Send + 'a>,
>;

/// A team entity as reported by the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEntity {
    /// The team's name, matched case-insensitively against table rows.
    pub name: String,
    /// Relation edges to other directory entities.
    pub relations: Vec<TeamRelation>,
}

/// A directed relation edge between two directory entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRelation {
    /// The relation kind ([`CHILD_OF`], [`PARENT_OF`], or anything else,
    /// which the sync ignores).
    pub kind: String,
    /// The *name* of the related entity, not its directory id.
    pub target: String,
}

/// Lists team entities from the directory service.
///
/// Abstracting the catalog allows the sync driver to be tested without a
/// running Backstage instance.
pub trait TeamCatalog: Send + Sync {
    /// Returns every team entity with its name and relations populated.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be reached or its response
    /// cannot be parsed.
    fn list_team_entities(&self) -> EntityListFuture<'_>;
}
