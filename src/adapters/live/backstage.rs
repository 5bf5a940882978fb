//! Live adapter for the `TeamCatalog` port using the Backstage catalog API.

use std::error::Error;

use reqwest::Client;
use serde::Deserialize;

use crate::ports::catalog::{EntityListFuture, TeamCatalog, TeamEntity, TeamRelation};

const ENTITIES_PATH: &str = "api/catalog/entities";

/// Live team catalog that queries a Backstage instance for `group` entities.
pub struct LiveBackstageCatalog {
    client: Client,
    entities_url: String,
}

impl LiveBackstageCatalog {
    /// Creates a catalog client against the given Backstage base URL
    /// (trailing slash expected).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { client: Client::new(), entities_url: format!("{base_url}{ENTITIES_PATH}") }
    }
}

/// One entity from the Backstage catalog response.
#[derive(Deserialize)]
struct CatalogEntity {
    metadata: EntityMetadata,
    #[serde(default)]
    relations: Vec<EntityRelation>,
}

/// Entity metadata; only the name is used.
#[derive(Deserialize)]
struct EntityMetadata {
    name: String,
}

/// A relation edge as serialized by Backstage.
#[derive(Deserialize)]
struct EntityRelation {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "targetRef")]
    target_ref: String,
}

/// Extracts the entity name from a Backstage entity ref such as
/// `group:default/platform`.
///
/// The kind and namespace are dropped: relation targets are resolved by
/// name only, and refs of untracked kinds simply fail to resolve later.
fn target_name(target_ref: &str) -> &str {
    target_ref.rsplit_once('/').map_or(target_ref, |(_, name)| name)
}

fn to_team_entity(entity: CatalogEntity) -> TeamEntity {
    TeamEntity {
        name: entity.metadata.name,
        relations: entity
            .relations
            .into_iter()
            .map(|relation| TeamRelation {
                kind: relation.kind,
                target: target_name(&relation.target_ref).to_string(),
            })
            .collect(),
    }
}

impl TeamCatalog for LiveBackstageCatalog {
    fn list_team_entities(&self) -> EntityListFuture<'_> {
        Box::pin(async move {
            let response = self
                .client
                .get(&self.entities_url)
                .query(&[("filter", "kind=group"), ("order", "desc:metadata.name")])
                .send()
                .await
                .map_err(|e| -> Box<dyn Error + Send + Sync> {
                    format!("catalog request failed: {e}").into()
                })?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| -> Box<dyn Error + Send + Sync> {
                    format!("failed to read catalog response: {e}").into()
                })?;

            if !status.is_success() {
                return Err(
                    format!("catalog returned {}: {response_text}", status.as_u16()).into()
                );
            }

            let entities: Vec<CatalogEntity> =
                serde_json::from_str(&response_text).map_err(
                    |e| -> Box<dyn Error + Send + Sync> {
                        format!("failed to parse catalog response: {e}").into()
                    },
                )?;

            Ok(entities.into_iter().map(to_team_entity).collect())
        })
    }
}
