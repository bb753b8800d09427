use serde::{Deserialize, Serialize};

/// Redirect URI for clients that show the authorization code to the user.
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Scopes requested by this client.
pub const SCOPES: &str = "read write";

/// Form sent to `POST /api/v1/apps`.
#[derive(Debug, Clone, Serialize)]
pub struct AppRegistration {
    client_name: String,
    redirect_uris: String,
    scopes: String,
}

impl AppRegistration {
    /// An out-of-band registration asking for [`SCOPES`].
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            redirect_uris: OOB_REDIRECT_URI.to_string(),
            scopes: SCOPES.to_string(),
        }
    }

    /// Returns the redirect URI the registration asks for.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uris
    }

    /// Returns the requested scopes.
    pub fn scopes(&self) -> &str {
        &self.scopes
    }
}

/// A registered OAuth application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    name: String,
    client_id: String,
    client_secret: String,
}

impl Application {
    /// Returns the application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the OAuth client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth client secret.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

/// Form sent to `POST /oauth/token` to redeem an authorization code.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CodeExchange<'a> {
    pub(crate) grant_type: &'static str,
    pub(crate) client_id: &'a str,
    pub(crate) client_secret: &'a str,
    pub(crate) redirect_uri: &'a str,
    pub(crate) code: &'a str,
    pub(crate) scope: &'a str,
}

/// An OAuth access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    scope: String,
}

impl Token {
    /// Returns the bearer token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the token type, normally `Bearer`.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Returns the granted scopes.
    pub fn scope(&self) -> &str {
        &self.scope
    }
}
