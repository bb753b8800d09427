use std::io;

use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use tootline::{
    cli::{normalize_args, Cli, Command},
    commands,
    extract::ContentExtractor,
    Client, Config,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()?;

    let cli = Cli::parse_from(normalize_args(std::env::args()));
    let extractor = ContentExtractor::new().with_br_attribute_newline(cli.br_newline);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let client = || -> tootline::Result<Client> {
        let config = Config::from_env(&cli.server)?;
        log::debug!("using {:?}", config);
        Client::new(&config)
    };

    match cli.command {
        Command::Register => {
            let config = Config::anonymous(&cli.server)?;
            commands::register(&config, &mut stdin.lock(), &mut out).await?;
        }
        Command::History { user_id, init_id } => {
            commands::history(&client()?, &user_id, &init_id, &mut out).await?;
        }
        Command::Toot {
            reply_id,
            sensitive,
            visibility,
        } => {
            commands::toot(&client()?, stdin.lock(), &reply_id, &sensitive, visibility).await?;
        }
        Command::Delete { delete_id } => commands::delete(&client()?, &delete_id).await?,
        Command::Home => commands::home(&client()?, &extractor, &mut out).await?,
        Command::Direct => commands::direct(&client()?, &extractor, &mut out).await?,
    }

    Ok(())
}
