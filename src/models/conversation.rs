use serde::{Deserialize, Serialize};

use crate::models::status::Status;

/// A direct-message thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_status: Option<Status>,
}

impl Conversation {
    /// Returns the conversation identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the most recent status of the thread.
    ///
    /// Servers omit it when every status of the thread was deleted.
    pub fn last_status(&self) -> Option<&Status> {
        self.last_status.as_ref()
    }
}
