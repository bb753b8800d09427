use serde::{Deserialize, Serialize};

use crate::models::status::{Account, Status};

/// Something that happened to the authenticated account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    id: String,

    /// `mention`, `favourite`, `reblog`, `follow`, ... kept verbatim so newer
    /// server-side types still print.
    #[serde(rename = "type")]
    kind: String,

    /// The account that triggered the notification.
    account: Account,

    /// The status involved, absent for follows and similar events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<Status>,
}

impl Notification {
    /// Returns the notification identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the notification type tag.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the account that caused the notification.
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Returns the associated status (if any).
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }
}
