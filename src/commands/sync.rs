//! The sync run: fetch both sides, reconcile, write the table back.

use crate::context::ServiceContext;
use crate::sync::reconcile::{format_actions, reconcile};

/// Executes one sync run against the given service context.
///
/// Stages run strictly in sequence; the first failure aborts the run and
/// nothing is written back.
///
/// # Errors
///
/// Returns a stage-prefixed error string when fetching the table, listing
/// the catalog, or persisting the reconciled table fails.
pub async fn run(ctx: &ServiceContext) -> Result<(), String> {
    let mut table = ctx
        .teams
        .fetch_table()
        .await
        .map_err(|e| format!("Cannot retrieve DevLake teams: {e}"))?;

    let entities = ctx
        .catalog
        .list_team_entities()
        .await
        .map_err(|e| format!("Cannot retrieve Backstage teams: {e}"))?;

    let actions = reconcile(&entities, &mut table);
    println!("{}", format_actions(&actions));

    let response = ctx
        .teams
        .persist_table(&table)
        .await
        .map_err(|e| format!("Cannot update DevLake teams: {e}"))?;
    println!("Response: {response}");

    Ok(())
}
