use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while talking to the server or rendering its data.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request could not be sent or its body could not be decoded.
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with an error status and an explanation.
    #[error("server returned {status}: {message}")]
    Api {
        /// HTTP status of the response.
        status: StatusCode,
        /// The `error` field of the response body.
        message: String,
    },

    /// The server answered with an error status and no readable explanation.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(StatusCode),

    /// The server address is not a valid URL.
    #[error("invalid server url: {0}")]
    Url(#[from] url::ParseError),

    /// No server address was given.
    #[error("no server given, pass -server <url>")]
    MissingServer,

    /// Status content could not be parsed as HTML.
    #[error("could not parse html: {0}")]
    Html(#[source] std::io::Error),

    /// Reading from or writing to the terminal failed.
    #[error("{}", _0)]
    IO(#[from] std::io::Error),

    /// A visibility word other than `public`, `unlisted`, `private` or `direct`.
    #[error("unknown visibility: {0}")]
    Visibility(String),

    /// The authorization prompt was answered with nothing.
    #[error("no authorization code entered")]
    EmptyAuthCode,
}
