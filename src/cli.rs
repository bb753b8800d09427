//! Command-line surface.
//!
//! Flags follow the single-dash style `-server https://...` as well as the
//! usual `--server`; [`normalize_args`] rewrites the former into the latter
//! before `clap` sees them.

use clap::{Parser, Subcommand};

use crate::models::status::Visibility;

/// Command-line client for Mastodon-compatible servers.
///
/// Credentials are read from CLIENTID, CLIENTSECRET and ACCESSTOKEN.
#[derive(Debug, Parser)]
#[command(name = "tootline", version, about, long_about = None)]
pub struct Cli {
    /// Server URL, e.g. https://social.example
    #[arg(long)]
    pub server: String,

    /// Turn `br` attributes on paragraphs into line breaks
    #[arg(long = "brnewline")]
    pub br_newline: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// One operation per invocation.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register this client and obtain an access token
    Register,

    /// Dump an account's statuses, newest first
    History {
        /// Account whose statuses are dumped
        #[arg(long = "userid", allow_hyphen_values = true)]
        user_id: String,

        /// Start below this status id (empty: newest)
        #[arg(long = "initid", default_value = "", allow_hyphen_values = true)]
        init_id: String,
    },

    /// Post a status read from standard input
    Toot {
        /// Status to reply to
        #[arg(long = "replyid", default_value = "", allow_hyphen_values = true)]
        reply_id: String,

        /// Content warning; marks the status sensitive when set
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        sensitive: String,

        /// private, direct, unlisted or public
        #[arg(long, default_value = "private")]
        visibility: Visibility,
    },

    /// Delete a status
    Delete {
        /// Status to delete
        #[arg(long = "deleteid", allow_hyphen_values = true)]
        delete_id: String,
    },

    /// Show the home timeline and recent notifications
    Home,

    /// Show direct-message conversations with their reply chains
    Direct,
}

/// Long flags that take a value.
const VALUE_FLAGS: &[&str] = &[
    "server",
    "userid",
    "initid",
    "replyid",
    "sensitive",
    "visibility",
    "deleteid",
];

/// Long flags that stand alone.
const SWITCH_FLAGS: &[&str] = &["brnewline", "help", "version"];

/// Rewrites `-flag` into `--flag` for the flags [`Cli`] knows.
///
/// The token following a value-taking flag is passed through untouched, so a
/// content warning such as `-_- spoilers` survives. Unknown words, single
/// letter flags such as `-h`, and everything after a bare `--` are left
/// alone.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut verbatim = false;
    let mut value_next = false;
    args.into_iter()
        .map(|arg| {
            if verbatim || std::mem::take(&mut value_next) {
                return arg;
            }
            if arg == "--" {
                verbatim = true;
                return arg;
            }
            match known_flag(&arg) {
                Some(flag) => {
                    value_next = flag.value_follows;
                    if flag.single_dash {
                        format!("-{arg}")
                    } else {
                        arg
                    }
                }
                None => arg,
            }
        })
        .collect()
}

/// How a recognized flag token is spelled.
struct FlagToken {
    single_dash: bool,
    value_follows: bool,
}

fn known_flag(arg: &str) -> Option<FlagToken> {
    let (single_dash, flag) = match arg.strip_prefix("--") {
        Some(flag) => (false, flag),
        None => (true, arg.strip_prefix('-')?),
    };
    let (name, inline_value) = match flag.split_once('=') {
        Some((name, _)) => (name, true),
        None => (flag, false),
    };

    if VALUE_FLAGS.contains(&name) {
        Some(FlagToken {
            single_dash,
            value_follows: !inline_value,
        })
    } else if SWITCH_FLAGS.contains(&name) {
        Some(FlagToken {
            single_dash,
            value_follows: false,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(normalize_args(args.iter().map(ToString::to_string)))
    }

    #[test]
    fn single_dash_long_flags() {
        let args = normalize_args(
            ["tootline", "-server", "https://s.example", "-h", "--", "-x"]
                .iter()
                .map(ToString::to_string),
        );
        assert_eq!(
            args,
            ["tootline", "--server", "https://s.example", "-h", "--", "-x"]
        );
        assert_eq!(normalize_args(["-initid=5".to_string()]), ["--initid=5"]);
        assert_eq!(normalize_args(["-nosuchflag".to_string()]), ["-nosuchflag"]);
    }

    #[test]
    fn warning_text_may_start_with_a_dash() {
        let args = normalize_args(
            ["toot", "-sensitive", "-_- spoilers", "-visibility", "direct"]
                .iter()
                .map(ToString::to_string),
        );
        assert_eq!(
            args,
            ["toot", "--sensitive", "-_- spoilers", "--visibility", "direct"]
        );

        let cli = parse(&[
            "tootline",
            "-server",
            "https://s.example",
            "toot",
            "-sensitive",
            "-_- spoilers",
        ])
        .unwrap();
        match cli.command {
            Command::Toot { sensitive, .. } => assert_eq!(sensitive, "-_- spoilers"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn history_flags() {
        let cli = parse(&[
            "tootline", "-server", "https://s.example", "history", "-userid", "77",
        ])
        .unwrap();
        assert_eq!(cli.server, "https://s.example");
        match cli.command {
            Command::History { user_id, init_id } => {
                assert_eq!(user_id, "77");
                assert_eq!(init_id, "");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn toot_defaults_to_private() {
        let cli = parse(&["tootline", "-server", "https://s.example", "toot"]).unwrap();
        match cli.command {
            Command::Toot {
                reply_id,
                sensitive,
                visibility,
            } => {
                assert_eq!(reply_id, "");
                assert_eq!(sensitive, "");
                assert_eq!(visibility, Visibility::Private);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_visibility_is_rejected() {
        assert!(parse(&[
            "tootline", "-server", "https://s.example", "toot", "-visibility", "friends",
        ])
        .is_err());
        assert!(parse(&[
            "tootline", "-server", "https://s.example", "toot", "-visibility", "direct",
        ])
        .is_ok());
    }

    #[test]
    fn server_goes_before_the_command() {
        assert!(parse(&["tootline", "home", "-server", "https://s.example"]).is_err());
        assert!(parse(&["tootline", "-server", "https://s.example", "timeline"]).is_err());
        assert!(matches!(
            parse(&["tootline", "-server", "https://s.example", "direct"])
                .unwrap()
                .command,
            Command::Direct
        ));
    }
}
