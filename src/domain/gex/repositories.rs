use crate::domain::errors::FetchResult;
use crate::domain::gex::{Currency, Snapshot};
use std::future::Future;

/// Port for the remote provider of GEX snapshots
pub trait SnapshotRepository {
    /// Fetch the current snapshot for `currency`. An empty record list is a
    /// successful response; retention policy is applied by the caller.
    fn fetch_snapshot(&self, currency: Currency) -> impl Future<Output = FetchResult<Snapshot>>;
}
