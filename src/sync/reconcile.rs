//! Merge directory team entities into the ledger's team table.
//!
//! Idempotent: re-running over its own output creates no new rows and no
//! further parent changes.  Entities are matched to rows by
//! case-insensitive name; rows are never deleted.

use crate::ports::catalog::{TeamEntity, CHILD_OF, PARENT_OF};
use crate::ports::table::{Team, TeamTable};

/// What the sync did for a single directory entity.
#[derive(Debug, PartialEq, Eq)]
pub enum SyncAction {
    /// A new row was appended for the entity.
    Created {
        /// The entity's name.
        name: String,
        /// The freshly allocated row id.
        id: String,
    },
    /// The entity already had a matching row.
    Matched {
        /// The entity's name.
        name: String,
    },
}

/// Merges `entities` into `table`, appending rows for unknown teams and
/// rewriting parent ids from relation edges.
///
/// New ids are allocated from a counter seeded at the largest existing id,
/// so they stay collision-free even when earlier rows carry gaps or have
/// been manually renumbered. Relation targets are resolved against the
/// table as it grows, so a later entity can reference a row appended
/// earlier in the same pass. Unresolvable targets and unrecognized
/// relation kinds are skipped silently.
pub fn reconcile(entities: &[TeamEntity], table: &mut TeamTable) -> Vec<SyncAction> {
    let mut last_id = table.largest_id();
    let mut actions = Vec::with_capacity(entities.len());

    for entity in entities {
        let source_index = match table.position_by_name(&entity.name) {
            Some(index) => {
                actions.push(SyncAction::Matched { name: entity.name.clone() });
                index
            }
            None => {
                last_id += 1;
                table.teams.push(Team {
                    id: last_id.to_string(),
                    name: entity.name.clone(),
                    alias: String::new(),
                    parent_id: String::new(),
                    sorting_index: String::new(),
                });
                actions.push(SyncAction::Created {
                    name: entity.name.clone(),
                    id: last_id.to_string(),
                });
                table.teams.len() - 1
            }
        };

        link_relations(entity, table, source_index);
    }

    actions
}

/// Translates an entity's relation edges into parent-id links on the table.
fn link_relations(entity: &TeamEntity, table: &mut TeamTable, source_index: usize) {
    for relation in &entity.relations {
        let Some(target_index) = table.position_by_name(&relation.target) else {
            continue;
        };
        match relation.kind.as_str() {
            CHILD_OF => {
                let parent_id = table.teams[target_index].id.clone();
                table.teams[source_index].parent_id = parent_id;
            }
            PARENT_OF => {
                let parent_id = table.teams[source_index].id.clone();
                table.teams[target_index].parent_id = parent_id;
            }
            _ => {}
        }
    }
}

/// Formats sync actions as a human-readable report.
#[must_use]
pub fn format_actions(actions: &[SyncAction]) -> String {
    if actions.is_empty() {
        return "No directory teams to reconcile.".to_string();
    }

    let mut lines = Vec::new();
    for action in actions {
        match action {
            SyncAction::Created { name, id } => lines.push(format!("  CREATE {name} (id {id})")),
            SyncAction::Matched { name } => lines.push(format!("  EXISTS {name}")),
        }
    }
    lines.join("\n")
}
