use std::io::Write;

use crate::{
    extract::ContentExtractor, format::status_line, models::status::Status, result::Result,
    source::StatusSource,
};

/// Prints a status followed by every status it (transitively) replies to.
///
/// Chains are trusted to end: there is no cycle detection.
pub struct ConversationWalker<'a, S: StatusSource + ?Sized> {
    source: &'a S,
    extractor: &'a ContentExtractor,
}

impl<'a, S: StatusSource + ?Sized> ConversationWalker<'a, S> {
    /// Creates a walker reading ancestors from `source`.
    pub fn new(source: &'a S, extractor: &'a ContentExtractor) -> Self {
        Self { source, extractor }
    }

    /// Prints `status`, then its ancestors, newest first.
    ///
    /// Returns the number of lines written.
    ///
    /// # Errors
    ///
    /// Stops at the first failed lookup, write or HTML parse.
    pub async fn print_thread<W: Write>(&self, status: &Status, out: &mut W) -> Result<usize> {
        writeln!(out, "{}", status_line(status, self.extractor)?)?;
        Ok(1 + self.walk(status.in_reply_to_id(), out).await?)
    }

    /// Follows `in_reply_to_id` links starting at `reply_to`, printing one
    /// line per fetched status, until a status replies to nothing.
    ///
    /// Returns the number of lines written.
    ///
    /// # Errors
    ///
    /// Stops at the first failed lookup, write or HTML parse.
    pub async fn walk<W: Write>(&self, reply_to: Option<&str>, out: &mut W) -> Result<usize> {
        let mut next = reply_to.filter(|id| !id.is_empty()).map(ToString::to_string);
        let mut printed = 0;

        while let Some(id) = next {
            log::debug!("following reply chain to {}", id);
            let parent = self.source.status(&id).await?;
            writeln!(out, "{}", status_line(&parent, self.extractor)?)?;
            printed += 1;
            next = parent.in_reply_to_id().map(ToString::to_string);
        }

        Ok(printed)
    }
}
