use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    models::{de_null_string, de_opt_id, macros::str_opt_ref},
};

/// A single published message (a "toot").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    /// Server-assigned identifier. Identifiers sort by recency.
    id: String,

    /// When the status was posted.
    created_at: DateTime<Utc>,

    /// HTML body of the status.
    #[serde(default, deserialize_with = "de_null_string")]
    content: String,

    /// The account that posted the status.
    account: Account,

    /// The status this one replies to. An empty string reads as `None`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_opt_id"
    )]
    in_reply_to_id: Option<String>,

    /// The boosted status, when this status is a boost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reblog: Option<Box<Status>>,

    /// Whether the media or content is marked sensitive.
    #[serde(default)]
    sensitive: bool,

    /// Content warning shown before the body.
    #[serde(default, deserialize_with = "de_null_string")]
    spoiler_text: String,

    /// Who can see the status.
    visibility: Visibility,
}

impl Status {
    /// Returns the status identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the creation time of the status.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the HTML body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the author.
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Returns the identifier of the status being replied to (if any).
    pub fn in_reply_to_id(&self) -> Option<&str> {
        str_opt_ref!(self.in_reply_to_id)
    }

    /// Returns the boosted status (if this is a boost).
    pub fn reblog(&self) -> Option<&Status> {
        self.reblog.as_deref()
    }

    /// Returns whether the status is marked sensitive.
    pub fn sensitive(&self) -> bool {
        self.sensitive
    }

    /// Returns the content warning, empty when there is none.
    pub fn spoiler_text(&self) -> &str {
        &self.spoiler_text
    }

    /// Returns the visibility of the status.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

/// A user account as embedded in statuses and notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    username: String,
    /// `username` for local accounts, `username@domain` for remote ones.
    acct: String,
}

impl Account {
    /// Returns the bare username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the webfinger handle, qualified with the domain for remote accounts.
    pub fn acct(&self) -> &str {
        &self.acct
    }
}

/// Audience of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to everyone and shown on public timelines.
    Public,
    /// Visible to everyone but kept off public timelines.
    Unlisted,
    /// Followers only.
    Private,
    /// Mentioned accounts only.
    Direct,
}

impl Visibility {
    /// Returns the word the API uses for this visibility.
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Unlisted => "unlisted",
            Visibility::Private => "private",
            Visibility::Direct => "direct",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "unlisted" => Ok(Visibility::Unlisted),
            "private" => Ok(Visibility::Private),
            "direct" => Ok(Visibility::Direct),
            other => Err(Error::Visibility(other.to_string())),
        }
    }
}

/// Request body for publishing a status.
#[derive(Debug, Clone, Serialize)]
pub struct NewStatus {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_reply_to_id: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    spoiler_text: String,
    sensitive: bool,
    visibility: Visibility,
}

impl NewStatus {
    /// Starts a status with the given body and visibility.
    pub fn new(status: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            status: status.into(),
            in_reply_to_id: None,
            spoiler_text: String::new(),
            sensitive: false,
            visibility,
        }
    }

    /// Makes the status a reply. An empty identifier leaves it a top-level post.
    #[must_use]
    pub fn in_reply_to(mut self, id: &str) -> Self {
        self.in_reply_to_id = Some(id.to_string()).filter(|id| !id.is_empty());
        self
    }

    /// Puts the status behind a content warning.
    ///
    /// A non-empty warning also marks the status sensitive.
    #[must_use]
    pub fn content_warning(mut self, warning: &str) -> Self {
        self.sensitive = !warning.is_empty();
        self.spoiler_text = warning.to_string();
        self
    }

    /// Returns the body.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the reply target (if any).
    pub fn in_reply_to_id(&self) -> Option<&str> {
        str_opt_ref!(self.in_reply_to_id)
    }

    /// Returns whether the status will be marked sensitive.
    pub fn sensitive(&self) -> bool {
        self.sensitive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_reply_target_reads_as_none() {
        let status: Status = serde_json::from_value(json!({
            "id": "10",
            "created_at": "2020-05-01T12:00:00.000Z",
            "content": "<p>hi</p>",
            "account": { "id": "1", "username": "alice", "acct": "alice" },
            "in_reply_to_id": "",
            "visibility": "private"
        }))
        .unwrap();

        assert_eq!(status.in_reply_to_id(), None);
        assert_eq!(status.visibility(), Visibility::Private);
        assert!(status.reblog().is_none());
        assert_eq!(status.spoiler_text(), "");
    }

    #[test]
    fn boost_carries_original_status() {
        let status: Status = serde_json::from_value(json!({
            "id": "11",
            "created_at": "2020-05-01T12:00:00Z",
            "content": "",
            "account": { "id": "1", "username": "alice", "acct": "alice" },
            "in_reply_to_id": null,
            "spoiler_text": null,
            "visibility": "public",
            "reblog": {
                "id": "7",
                "created_at": "2020-04-30T08:00:00Z",
                "content": "<p>original</p>",
                "account": { "id": "2", "username": "bob", "acct": "bob@remote.example" },
                "in_reply_to_id": "3",
                "visibility": "public"
            }
        }))
        .unwrap();

        let reblog = status.reblog().unwrap();
        assert_eq!(reblog.account().acct(), "bob@remote.example");
        assert_eq!(reblog.in_reply_to_id(), Some("3"));
    }

    #[test]
    fn visibility_words() {
        for word in ["public", "unlisted", "private", "direct"] {
            let visibility: Visibility = word.parse().unwrap();
            assert_eq!(visibility.to_string(), word);
        }
        assert!(matches!(
            "friends".parse::<Visibility>(),
            Err(Error::Visibility(w)) if w == "friends"
        ));
    }

    #[test]
    fn new_status_warning_marks_sensitive() {
        let toot = NewStatus::new("body\n", Visibility::Direct)
            .in_reply_to("")
            .content_warning("spoilers");
        assert!(toot.sensitive());
        assert_eq!(toot.in_reply_to_id(), None);

        let body = serde_json::to_value(&toot).unwrap();
        assert_eq!(
            body,
            json!({
                "status": "body\n",
                "spoiler_text": "spoilers",
                "sensitive": true,
                "visibility": "direct"
            })
        );
    }
}
