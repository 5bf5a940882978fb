//! One-way reconciliation of directory teams into the ledger table.

pub mod reconcile;
