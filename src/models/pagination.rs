use serde::Serialize;

/// A `max_id` watermark plus a page size, sent as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_id: Option<String>,
    limit: u32,
}

impl Pagination {
    /// The newest `limit` items.
    pub fn latest(limit: u32) -> Self {
        Self {
            max_id: None,
            limit,
        }
    }

    /// `limit` items strictly older than `max_id`. An empty `max_id` means "newest".
    pub fn older_than(max_id: &str, limit: u32) -> Self {
        Self::latest(limit).with_max_id(max_id)
    }

    /// Moves the watermark.
    #[must_use]
    pub fn with_max_id(mut self, max_id: &str) -> Self {
        self.max_id = Some(max_id.to_string()).filter(|id| !id.is_empty());
        self
    }

    /// Returns the watermark (if any).
    pub fn max_id(&self) -> Option<&str> {
        self.max_id.as_deref()
    }

    /// Returns the page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}
