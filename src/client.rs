use async_trait::async_trait;
use reqwest::{
    header::USER_AGENT,
    Client as ReqwestClient, Method, RequestBuilder, Response,
};
use serde::Deserialize;
use url::{ParseError, Url};

use crate::{
    config::Config,
    error::Error,
    models::{
        app::{AppRegistration, Application, CodeExchange, Token},
        conversation::Conversation,
        notification::Notification,
        pagination::Pagination,
        status::{NewStatus, Status},
    },
    result::Result,
    source::StatusSource,
};

const AGENT: &str = concat!("tootline/", env!("CARGO_PKG_VERSION"));

/// Talks to one Mastodon-compatible server.
#[derive(Debug, Clone)]
pub struct Client {
    http: ReqwestClient,
    base: Url,
    access_token: Option<String>,
}

impl Client {
    /// Creates a client for the server and token held by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Client> {
        let http = ReqwestClient::builder().build()?;

        let mut base = config.server().clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Client {
            http,
            base,
            access_token: config.access_token().map(ToString::to_string),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Url(ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        log::info!("request for {} {} dispatched", method, url);
        let builder = self.http.request(method, url).header(USER_AGENT, AGENT);
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn fetch_json<T>(
        &self,
        segments: &[&str],
        page: Option<&Pagination>,
    ) -> Result<T>
    where
        T: for<'a> Deserialize<'a>,
    {
        let url = self.endpoint(segments)?;
        let mut builder = self.request(Method::GET, url);
        if let Some(page) = page {
            builder = builder.query(page);
        }
        decode(builder.send().await?).await
    }

    /// Fetches a single status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status does not exist.
    pub async fn status(&self, id: &str) -> Result<Status> {
        self.fetch_json(&["api", "v1", "statuses", id], None).await
    }

    /// Fetches one page of the statuses posted by an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn account_statuses(
        &self,
        account_id: &str,
        page: &Pagination,
    ) -> Result<Vec<Status>> {
        self.fetch_json(&["api", "v1", "accounts", account_id, "statuses"], Some(page))
            .await
    }

    /// Fetches one page of the home timeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn home_timeline(&self, page: &Pagination) -> Result<Vec<Status>> {
        self.fetch_json(&["api", "v1", "timelines", "home"], Some(page))
            .await
    }

    /// Fetches one page of notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn notifications(&self, page: &Pagination) -> Result<Vec<Notification>> {
        self.fetch_json(&["api", "v1", "notifications"], Some(page)).await
    }

    /// Fetches one page of direct-message conversations.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn conversations(&self, page: &Pagination) -> Result<Vec<Conversation>> {
        self.fetch_json(&["api", "v1", "conversations"], Some(page)).await
    }

    /// Publishes a status and returns it as the server stored it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the status.
    pub async fn post_status(&self, status: &NewStatus) -> Result<Status> {
        let url = self.endpoint(&["api", "v1", "statuses"])?;
        let response = self.request(Method::POST, url).json(status).send().await?;
        decode(response).await
    }

    /// Deletes one of the authenticated account's statuses.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server refuses the deletion.
    pub async fn delete_status(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&["api", "v1", "statuses", id])?;
        let response = self.request(Method::DELETE, url).send().await?;
        check(response).await.map(drop)
    }

    /// Registers a new OAuth application.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the registration.
    pub async fn register_app(&self, registration: &AppRegistration) -> Result<Application> {
        let url = self.endpoint(&["api", "v1", "apps"])?;
        let response = self
            .request(Method::POST, url)
            .form(registration)
            .send()
            .await?;
        decode(response).await
    }

    /// Returns the page where the user grants `app` access and obtains a code.
    ///
    /// # Errors
    ///
    /// Returns an error if the server address cannot carry a path.
    pub fn authorize_url(&self, app: &Application, registration: &AppRegistration) -> Result<Url> {
        let mut url = self.endpoint(&["oauth", "authorize"])?;
        url.query_pairs_mut()
            .append_pair("client_id", app.client_id())
            .append_pair("redirect_uri", registration.redirect_uri())
            .append_pair("response_type", "code")
            .append_pair("scope", registration.scopes());
        Ok(url)
    }

    /// Redeems an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the code is rejected.
    pub async fn exchange_code(
        &self,
        app: &Application,
        registration: &AppRegistration,
        code: &str,
    ) -> Result<Token> {
        let url = self.endpoint(&["oauth", "token"])?;
        let form = CodeExchange {
            grant_type: "authorization_code",
            client_id: app.client_id(),
            client_secret: app.client_secret(),
            redirect_uri: registration.redirect_uri(),
            code,
            scope: registration.scopes(),
        };
        let response = self.request(Method::POST, url).form(&form).send().await?;
        decode(response).await
    }
}

#[async_trait(?Send)]
impl StatusSource for Client {
    async fn status(&self, id: &str) -> Result<Status> {
        Client::status(self, id).await
    }

    async fn account_statuses(&self, account_id: &str, page: &Pagination) -> Result<Vec<Status>> {
        Client::account_statuses(self, account_id, page).await
    }
}

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    log::info!("response status: {}", status);
    if status.is_success() {
        return Ok(response);
    }

    Err(match response.json::<ApiError>().await {
        Ok(body) => Error::Api {
            status,
            message: body.error,
        },
        Err(e) => {
            log::debug!("unreadable error body: {}", e);
            Error::UnexpectedStatus(status)
        }
    })
}

async fn decode<T>(response: Response) -> Result<T>
where
    T: for<'a> Deserialize<'a>,
{
    check(response).await?.json::<T>().await.map_err(Into::into)
}
