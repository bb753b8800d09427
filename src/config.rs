use std::fmt;

use url::{ParseError, Url};

use crate::{error::Error, result::Result};

/// Environment variable holding the OAuth client id.
pub const CLIENT_ID_VAR: &str = "CLIENTID";
/// Environment variable holding the OAuth client secret.
pub const CLIENT_SECRET_VAR: &str = "CLIENTSECRET";
/// Environment variable holding the access token.
pub const ACCESS_TOKEN_VAR: &str = "ACCESSTOKEN";

/// Server address and credentials, built once at startup.
#[derive(Clone)]
pub struct Config {
    server: Url,
    client_id: String,
    client_secret: String,
    access_token: String,
}

impl Config {
    /// Builds a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingServer`] if `server` is blank and
    /// [`Error::Url`] if it is not a valid URL.
    pub fn new(
        server: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            server: parse_server(server)?,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            access_token: access_token.into(),
        })
    }

    /// Builds a configuration for `server` with credentials taken from
    /// `CLIENTID`, `CLIENTSECRET` and `ACCESSTOKEN`.
    ///
    /// Unset variables read as empty strings.
    ///
    /// # Errors
    ///
    /// Fails like [`Config::new`] when the server address is unusable.
    pub fn from_env(server: &str) -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name).unwrap_or_else(|_| {
                log::debug!("{} is not set", name);
                String::new()
            })
        };
        Self::new(
            server,
            var(CLIENT_ID_VAR),
            var(CLIENT_SECRET_VAR),
            var(ACCESS_TOKEN_VAR),
        )
    }

    /// Builds a credential-less configuration, used before an app is registered.
    ///
    /// # Errors
    ///
    /// Fails like [`Config::new`] when the server address is unusable.
    pub fn anonymous(server: &str) -> Result<Self> {
        Self::new(server, "", "", "")
    }

    /// Returns the server base URL.
    pub fn server(&self) -> &Url {
        &self.server
    }

    /// Returns the OAuth client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth client secret.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the access token, `None` when it is empty.
    pub fn access_token(&self) -> Option<&str> {
        Some(self.access_token.as_str()).filter(|token| !token.is_empty())
    }
}

// credentials stay out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server.as_str())
            .field("client_id", &self.client_id())
            .field("client_secret", &redacted(self.client_secret()))
            .field("access_token", &redacted(self.access_token().unwrap_or_default()))
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

fn parse_server(server: &str) -> Result<Url> {
    let server = server.trim();
    if server.is_empty() {
        return Err(Error::MissingServer);
    }
    let url = Url::parse(server)?;
    if url.cannot_be_a_base() {
        return Err(Error::Url(ParseError::RelativeUrlWithCannotBeABaseBase));
    }
    Ok(url)
}
