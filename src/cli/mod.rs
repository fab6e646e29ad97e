//! Command-line interface for the `outseta` binary.
//!
//! Argument types live here; [`run`] executes a parsed [`Cli`].

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod rows;

pub use commands::run;

/// Install the stderr log subscriber, at DEBUG when `verbose` and WARN otherwise.
///
/// Only the first call in a process installs anything.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Outseta API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "outseta", about = "Outseta API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and responses to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by Uid.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The Uid of the entity (not needed for `profile`).
        id: Option<String>,
    },

    /// List entities with pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Page number (0-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page (1-25).
        #[arg(long)]
        count: Option<u32>,

        /// Account Uid (required for transactions).
        #[arg(long)]
        account: Option<String>,

        /// Email list Uid (required for subscribers).
        #[arg(long)]
        email_list: Option<String>,
    },

    /// Delete an entity.
    Delete {
        /// The type of entity to delete.
        entity: Entity,

        /// The Uid of the entity to delete.
        id: String,
    },

    /// Exchange a username and the password in `OUTSETA_PASSWORD` for an access token.
    Token {
        /// Login email of the person.
        username: String,

        #[arg(long, env = "OUTSETA_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A CRM account.
    #[value(alias = "accounts")]
    Account,
    /// A CRM person.
    #[value(alias = "people", alias = "persons")]
    Person,
    /// A CRM deal.
    #[value(alias = "deals")]
    Deal,
    /// An activity-feed entry.
    #[value(alias = "activities")]
    Activity,
    /// A billing subscription.
    #[value(alias = "subscriptions")]
    Subscription,
    /// A billing plan.
    #[value(alias = "plans")]
    Plan,
    /// A family of plans.
    #[value(alias = "plan-families")]
    PlanFamily,
    /// A billing add-on.
    #[value(alias = "add-ons", alias = "addons")]
    AddOn,
    /// A billing transaction of one account.
    #[value(alias = "transactions")]
    Transaction,
    /// A marketing email list.
    #[value(alias = "email-lists")]
    EmailList,
    /// A subscriber of one email list.
    #[value(alias = "subscribers")]
    Subscriber,
    /// A support case.
    #[value(alias = "cases")]
    Case,
    /// The person behind the access token.
    Profile,
}
