//! One-line renderings of statuses and notifications.

use chrono::{DateTime, Local, Utc};

use crate::{
    extract::ContentExtractor,
    models::{notification::Notification, status::Status},
    result::Result,
};

/// `strftime` pattern for timestamps, in the local time zone.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats `time` in the local time zone.
pub fn local_timestamp(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

/// `<id> <time>[ from <booster>: ] <text> @<author>`
///
/// For boosts the boosted status's author is named after `from` and its body
/// is the one rendered.
///
/// # Errors
///
/// Returns an error if the body is not parseable HTML.
pub fn status_line(status: &Status, extractor: &ContentExtractor) -> Result<String> {
    let (boost, body) = match status.reblog() {
        Some(original) => (
            format!(" from {}: ", original.account().username()),
            original.content(),
        ),
        None => (String::new(), status.content()),
    };

    Ok(format!(
        "{} {}{} {} @{}",
        status.id(),
        local_timestamp(status.created_at()),
        boost,
        extractor.extract(body)?,
        status.account().username()
    ))
}

/// `<id> <time> <raw html>`, used by history dumps.
pub fn history_line(status: &Status) -> String {
    format!(
        "{} {} {}",
        status.id(),
        local_timestamp(status.created_at()),
        status.content()
    )
}

/// `<type>@<actor>[ <text>]`
///
/// # Errors
///
/// Returns an error if the attached status body is not parseable HTML.
pub fn notification_line(
    notification: &Notification,
    extractor: &ContentExtractor,
) -> Result<String> {
    let head = format!(
        "{}@{}",
        notification.kind(),
        notification.account().username()
    );
    match notification.status() {
        Some(status) => Ok(format!("{} {}", head, extractor.extract(status.content())?)),
        None => Ok(head),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(value: serde_json::Value) -> Status {
        serde_json::from_value(value).unwrap()
    }

    fn expected_time(raw: &str) -> String {
        local_timestamp(raw.parse::<DateTime<Utc>>().unwrap())
    }

    #[test]
    fn timestamp_shape() {
        let shown = expected_time("2021-03-04T05:06:07Z");
        assert_eq!(shown.len(), "YYYY-MM-DD HH:MM:SS".len());
        assert_eq!(&shown[4..5], "-");
        assert_eq!(&shown[10..11], " ");
    }

    #[test]
    fn plain_status_line() {
        let s = status(json!({
            "id": "42",
            "created_at": "2021-03-04T05:06:07Z",
            "content": "<p>hello <b>there</b></p>",
            "account": { "id": "1", "username": "alice", "acct": "alice" },
            "visibility": "public"
        }));
        let line = status_line(&s, &ContentExtractor::new()).unwrap();
        assert_eq!(
            line,
            format!("42 {} hello there @alice", expected_time("2021-03-04T05:06:07Z"))
        );
        assert_eq!(
            history_line(&s),
            format!(
                "42 {} <p>hello <b>there</b></p>",
                expected_time("2021-03-04T05:06:07Z")
            )
        );
    }

    #[test]
    fn boost_names_original_author() {
        let s = status(json!({
            "id": "43",
            "created_at": "2021-03-04T05:06:07Z",
            "content": "",
            "account": { "id": "1", "username": "alice", "acct": "alice" },
            "visibility": "public",
            "reblog": {
                "id": "9",
                "created_at": "2021-03-01T00:00:00Z",
                "content": "<p>boosted words</p>",
                "account": { "id": "2", "username": "bob", "acct": "bob" },
                "visibility": "public"
            }
        }));
        let line = status_line(&s, &ContentExtractor::new()).unwrap();
        assert_eq!(
            line,
            format!(
                "43 {} from bob:  boosted words @alice",
                expected_time("2021-03-04T05:06:07Z")
            )
        );
    }

    #[test]
    fn notification_lines() {
        let mention: Notification = serde_json::from_value(json!({
            "id": "1",
            "type": "mention",
            "account": { "id": "2", "username": "bob", "acct": "bob" },
            "status": {
                "id": "5",
                "created_at": "2021-03-04T05:06:07Z",
                "content": "<p>@alice hi</p>",
                "account": { "id": "2", "username": "bob", "acct": "bob" },
                "visibility": "direct"
            }
        }))
        .unwrap();
        let follow: Notification = serde_json::from_value(json!({
            "id": "2",
            "type": "follow",
            "account": { "id": "3", "username": "carol", "acct": "carol" }
        }))
        .unwrap();

        let extractor = ContentExtractor::new();
        assert_eq!(
            notification_line(&mention, &extractor).unwrap(),
            "mention@bob @alice hi"
        );
        assert_eq!(notification_line(&follow, &extractor).unwrap(), "follow@carol");
    }
}
