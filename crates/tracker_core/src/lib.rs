//! Tracker core: pure data model, reconciliation and table queries.
mod query;
mod reconcile;
mod record;

pub use query::{query, Named, QueryPage, TableQuery, DEFAULT_PER_PAGE};
pub use reconcile::{
    find_remote_unfollowers, find_unfollowers, ExportReconciliation, RemoteReconciliation,
    Summary,
};
pub use record::{MembershipMap, MembershipRecord, UnfollowerRecord, NEVER, NOT_AVAILABLE};
