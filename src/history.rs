use std::{io::Write, time::Duration};

use crate::{
    format::history_line, models::pagination::Pagination, result::Result, source::StatusSource,
};

/// Statuses requested per page.
pub const HISTORY_PAGE_SIZE: u32 = 50;

/// Pause between two page requests.
pub const HISTORY_PAGE_DELAY: Duration = Duration::from_millis(1200);

/// Dumps an account's statuses, newest first, one page at a time.
///
/// Each line carries the raw HTML body. Paging continues with the oldest
/// identifier of the previous page until the server returns an empty page.
#[derive(Debug, Clone)]
pub struct HistoryPaginator {
    account_id: String,
    cursor: Pagination,
    delay: Duration,
}

impl HistoryPaginator {
    /// Starts below `initial_max_id`, or at the newest status when it is empty.
    pub fn new(account_id: impl Into<String>, initial_max_id: &str) -> Self {
        Self {
            account_id: account_id.into(),
            cursor: Pagination::older_than(initial_max_id, HISTORY_PAGE_SIZE),
            delay: HISTORY_PAGE_DELAY,
        }
    }

    /// Replaces the pause between pages.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the current position.
    pub fn cursor(&self) -> &Pagination {
        &self.cursor
    }

    /// Fetches and prints pages until one comes back empty.
    ///
    /// Returns the number of statuses printed.
    ///
    /// # Errors
    ///
    /// Stops at the first failed request or write.
    pub async fn run<S, W>(&mut self, source: &S, out: &mut W) -> Result<usize>
    where
        S: StatusSource + ?Sized,
        W: Write,
    {
        let mut printed = 0;

        loop {
            let page = source
                .account_statuses(&self.account_id, &self.cursor)
                .await?;

            let Some(oldest) = page.last() else {
                log::debug!("empty page below {:?}, history done", self.cursor.max_id());
                break;
            };

            for status in &page {
                writeln!(out, "{}", history_line(status))?;
            }
            printed += page.len();
            self.cursor = self.cursor.clone().with_max_id(oldest.id());

            log::debug!("waiting {:?} before the next page", self.delay);
            tokio::time::sleep(self.delay).await;
        }

        Ok(printed)
    }
}
