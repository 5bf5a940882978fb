//! Live adapters for real external interactions.

pub mod backstage;
pub mod devlake;
