/// Application registration and OAuth tokens.
pub mod app;
/// Direct-message conversations.
pub mod conversation;
/// Notifications.
pub mod notification;
/// The `max_id` paging cursor.
pub mod pagination;
/// Statuses, accounts and visibility.
pub mod status;

/// Reads an optional identifier, treating an empty string the same as `null`.
pub(crate) fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(value.filter(|id| !id.is_empty()))
}

/// Reads a string field that some servers send as `null`.
pub(crate) fn de_null_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = serde::Deserialize::deserialize(d)?;
    Ok(value.unwrap_or_default())
}

pub(crate) mod macros {
    macro_rules! str_opt_ref {
        ($x:expr) => {
            $x.as_ref().map(|x| x.as_ref())
        };
    }

    pub(crate) use str_opt_ref;
}
