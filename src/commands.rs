//! The operations behind each subcommand.
//!
//! Every operation writes its results to `out` and returns on the first error;
//! nothing is retried.

use std::io::{BufRead, Write};

use crate::{
    client::Client,
    config::Config,
    error::Error,
    extract::ContentExtractor,
    format::{notification_line, status_line},
    history::HistoryPaginator,
    models::{
        app::{AppRegistration, Token},
        pagination::Pagination,
        status::{NewStatus, Status, Visibility},
    },
    result::Result,
    walker::ConversationWalker,
};

/// Name the application registers under.
pub const CLIENT_NAME: &str = "tootline";

/// Statuses shown by [`home`].
pub const HOME_LIMIT: u32 = 50;
/// Notifications shown by [`home`].
pub const NOTIFICATION_LIMIT: u32 = 10;
/// Conversations shown by [`direct`].
pub const CONVERSATION_LIMIT: u32 = 20;

/// Registers this client with the server and walks the user through
/// authorization.
///
/// Prints the client id and secret, then the authorization page, reads the
/// code the page shows from `input`, and prints the resulting access token.
///
/// # Errors
///
/// Fails if a request fails, the prompt cannot be answered, or the code is
/// empty or rejected.
pub async fn register<R, W>(config: &Config, input: &mut R, out: &mut W) -> Result<Token>
where
    R: BufRead,
    W: Write,
{
    let client = Client::new(config)?;
    let registration = AppRegistration::new(CLIENT_NAME);

    let app = client.register_app(&registration).await?;
    log::info!("registered application {}", app.name());
    writeln!(out, "Client ID: {}", app.client_id())?;
    writeln!(out, "Client Secret: {}", app.client_secret())?;
    write!(
        out,
        "Open this URI To Auth: {}\nInsert Token: ",
        client.authorize_url(&app, &registration)?
    )?;
    out.flush()?;

    let code = read_auth_code(input)?;
    let token = client.exchange_code(&app, &registration, &code).await?;
    log::info!(
        "granted {} token for scopes {:?}",
        token.token_type(),
        token.scope()
    );
    writeln!(out, "Access Token: {}", token.access_token())?;
    Ok(token)
}

/// Reads the first word typed at the authorization prompt.
///
/// # Errors
///
/// Returns [`Error::EmptyAuthCode`] if nothing was entered.
pub fn read_auth_code<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    line.split_whitespace()
        .next()
        .map(ToString::to_string)
        .ok_or(Error::EmptyAuthCode)
}

/// Dumps the statuses of `account_id` below `initial_max_id`.
///
/// # Errors
///
/// Fails on the first failed request or write.
pub async fn history<W: Write>(
    client: &Client,
    account_id: &str,
    initial_max_id: &str,
    out: &mut W,
) -> Result<usize> {
    HistoryPaginator::new(account_id, initial_max_id)
        .run(client, out)
        .await
}

/// Prints the home timeline followed by recent notifications.
///
/// # Errors
///
/// Fails on the first failed request, write or HTML parse.
pub async fn home<W: Write>(
    client: &Client,
    extractor: &ContentExtractor,
    out: &mut W,
) -> Result<()> {
    for status in client.home_timeline(&Pagination::latest(HOME_LIMIT)).await? {
        writeln!(out, "{}", status_line(&status, extractor)?)?;
    }

    let notifications = client
        .notifications(&Pagination::latest(NOTIFICATION_LIMIT))
        .await?;
    for notification in &notifications {
        writeln!(out, "{}", notification_line(notification, extractor)?)?;
    }
    Ok(())
}

/// Prints recent direct-message conversations, each with its full reply chain.
///
/// # Errors
///
/// Fails on the first failed request, write or HTML parse.
pub async fn direct<W: Write>(
    client: &Client,
    extractor: &ContentExtractor,
    out: &mut W,
) -> Result<()> {
    let conversations = client
        .conversations(&Pagination::latest(CONVERSATION_LIMIT))
        .await?;
    let walker = ConversationWalker::new(client, extractor);

    for conversation in &conversations {
        let Some(last) = conversation.last_status() else {
            log::warn!("conversation {} has no statuses left", conversation.id());
            continue;
        };
        walker.print_thread(last, out).await?;
        writeln!(out, "\n")?;
    }
    Ok(())
}

/// Reads a status body from `input` until end of input.
///
/// Every line, including the last, ends with `\n`.
///
/// # Errors
///
/// Fails if `input` cannot be read.
pub fn read_toot_body<R: BufRead>(input: R) -> Result<String> {
    let mut body = String::new();
    for line in input.lines() {
        body.push_str(&line?);
        body.push('\n');
    }
    Ok(body)
}

/// Publishes the body read from `input`.
///
/// An empty `reply_to` posts at top level; a non-empty `warning` becomes the
/// content warning and marks the status sensitive.
///
/// # Errors
///
/// Fails if `input` cannot be read or the server rejects the status.
pub async fn toot<R: BufRead>(
    client: &Client,
    input: R,
    reply_to: &str,
    warning: &str,
    visibility: Visibility,
) -> Result<Status> {
    let toot = NewStatus::new(read_toot_body(input)?, visibility)
        .in_reply_to(reply_to)
        .content_warning(warning);
    let posted = client.post_status(&toot).await?;
    log::info!("posted status {}", posted.id());
    Ok(posted)
}

/// Deletes one status.
///
/// # Errors
///
/// Fails if the server refuses the deletion.
pub async fn delete(client: &Client, id: &str) -> Result<()> {
    client.delete_status(id).await?;
    log::info!("deleted status {}", id);
    Ok(())
}
