//! Command-line front end.
//!
//! Each subcommand maps to one user action: it reads its arguments, runs one
//! domain operation through the [`Controller`], and prints the affected
//! fragment.

mod controller;
mod error;
mod render;
mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use controller::{Controller, ControllerPorts};
pub use error::CliError;
pub use state::AppState;

/// Environment variable read when `--password` is omitted.
pub const PASSWORD_ENV: &str = "HACK_OR_SNOOZE_PASSWORD";
/// Environment variable read when `profile --password` is omitted.
pub const NEW_PASSWORD_ENV: &str = "HACK_OR_SNOOZE_NEW_PASSWORD";

/// `hack-or-snooze` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hack-or-snooze",
    about = "Read, post, and favorite links on Hack or Snooze",
    version
)]
pub struct Cli {
    /// Root URL of the API. Overrides `HACK_OR_SNOOZE_BASE_URL`.
    #[arg(long = "base-url", value_name = "url", global = true)]
    pub base_url: Option<String>,
    /// Directory holding the session cache.
    ///
    /// Overrides `HACK_OR_SNOOZE_SESSION_DIR`.
    #[arg(long = "session-dir", value_name = "path", global = true)]
    pub session_dir: Option<PathBuf>,
    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List every story.
    Stories,
    /// List your favorite stories.
    Favorites,
    /// List the stories you posted.
    Mine,
    /// Show who is logged in.
    Whoami,
    /// Log in and remember the session.
    Login {
        /// Account name.
        #[arg(long)]
        username: String,
        /// Account password. Falls back to `HACK_OR_SNOOZE_PASSWORD`.
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,
    },
    /// Create an account and remember the session.
    Signup {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Account name.
        #[arg(long)]
        username: String,
        /// Account password. Falls back to `HACK_OR_SNOOZE_PASSWORD`.
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,
    },
    /// Forget the remembered session.
    Logout,
    /// Post a new story.
    Submit {
        /// Author credit.
        #[arg(long)]
        author: String,
        /// Link title.
        #[arg(long)]
        title: String,
        /// Link target.
        #[arg(long)]
        url: String,
    },
    /// Favorite a story, or unfavorite it if it already is one.
    Favorite {
        /// Story id.
        id: String,
    },
    /// Delete one of your stories.
    Delete {
        /// Story id.
        id: String,
    },
    /// Change the author, title, and url of one of your stories.
    Edit {
        /// Story id.
        id: String,
        /// Author credit.
        #[arg(long)]
        author: String,
        /// Link title.
        #[arg(long)]
        title: String,
        /// Link target.
        #[arg(long)]
        url: String,
    },
    /// Change your display name and password.
    Profile {
        /// New display name.
        #[arg(long)]
        name: String,
        /// New password. Falls back to `HACK_OR_SNOOZE_NEW_PASSWORD`.
        #[arg(long, env = NEW_PASSWORD_ENV, hide_env_values = true)]
        password: String,
    },
}
