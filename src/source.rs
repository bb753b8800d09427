use async_trait::async_trait;

use crate::{
    models::{pagination::Pagination, status::Status},
    result::Result,
};

/// Where reply chains and account histories are read from.
///
/// [`Client`](crate::Client) implements it over HTTP.
#[async_trait(?Send)]
pub trait StatusSource {
    /// Fetches one status by identifier.
    async fn status(&self, id: &str) -> Result<Status>;

    /// Fetches one page of an account's statuses, newest first.
    async fn account_statuses(&self, account_id: &str, page: &Pagination) -> Result<Vec<Status>>;
}
