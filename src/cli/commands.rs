//! Command dispatch for the `outseta` binary.
//!
//! Everything is written to a caller-supplied [`Write`], so the binary hands
//! in stdout and tests hand in a buffer.

use std::io::Write;

use serde::Serialize;
use tabled::Table;

use super::rows::Row;
use super::{Cli, Command, Entity};
use crate::{
    get_auth_token, Account, Activity, AddOn, Case, Deal, Delete, EmailList, Get, List,
    MarketingSubscription, OutsetaClient, OutsetaError, Page, Person, Plan, PlanFamily,
    PrettyPrint, Profile, Result, SubscriberListQuery, Subscription, Transaction,
    TransactionListQuery, DEFAULT_PAGE_SIZE,
};

/// Page coordinates and parent Uids given to `list`.
struct ListScope {
    page: Option<u32>,
    count: Option<u32>,
    account: Option<String>,
    email_list: Option<String>,
}

/// Execute a parsed command against `client`, writing its output to `out`.
///
/// # Errors
///
/// Returns the first API, argument or output error; nothing is retried.
pub async fn run<W: Write>(client: &OutsetaClient, cli: Cli, out: &mut W) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Get { entity, id } => get(client, entity, id, json, out).await,
        Command::List {
            entity,
            page,
            count,
            account,
            email_list,
        } => {
            let scope = ListScope {
                page,
                count,
                account,
                email_list,
            };
            list(client, entity, scope, json, out).await
        }
        Command::Delete { entity, id } => delete(client, entity, id, out).await,
        Command::Token { username, password } => {
            let token = get_auth_token(client, &username, &password).await?;
            if json {
                return write_json(out, &token);
            }
            writeln!(out, "{}", token.access_token)?;
            Ok(())
        }
    }
}

fn require(id: Option<String>, entity: Entity) -> Result<String> {
    id.ok_or_else(|| OutsetaError::InvalidArgument(format!("an id is required to get {entity:?}")))
}

fn require_flag(value: Option<String>, flag: &str, what: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => {
            let message = format!("{flag} required for listing {what}");
            Err(OutsetaError::InvalidArgument(message))
        }
    }
}

fn list_only(entity: Entity) -> OutsetaError {
    OutsetaError::InvalidArgument(format!(
        "{entity:?} cannot be retrieved individually; use 'outseta list' instead"
    ))
}

async fn get<W: Write>(
    client: &OutsetaClient,
    entity: Entity,
    id: Option<String>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    match entity {
        Entity::Profile => show(out, &Profile::get(client).await?, json),
        Entity::Activity | Entity::Transaction | Entity::Subscriber => Err(list_only(entity)),
        _ => get_by_id(client, entity, require(id, entity)?, json, out).await,
    }
}

async fn get_by_id<W: Write>(
    client: &OutsetaClient,
    entity: Entity,
    id: String,
    json: bool,
    out: &mut W,
) -> Result<()> {
    match entity {
        Entity::Account => show(out, &Account::get(client, id).await?, json),
        Entity::Person => show(out, &Person::get(client, id).await?, json),
        Entity::Deal => show(out, &Deal::get(client, id).await?, json),
        Entity::Subscription => show(out, &Subscription::get(client, id).await?, json),
        Entity::Case => show(out, &Case::get(client, id).await?, json),
        Entity::Plan => write_json(out, &Plan::get(client, id).await?),
        Entity::PlanFamily => write_json(out, &PlanFamily::get(client, id).await?),
        Entity::AddOn => write_json(out, &AddOn::get(client, id).await?),
        Entity::EmailList => write_json(out, &EmailList::get(client, id).await?),
        _ => Err(list_only(entity)),
    }
}

async fn list<W: Write>(
    client: &OutsetaClient,
    entity: Entity,
    scope: ListScope,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let page = scope.page.unwrap_or(0);
    let count = scope.count.unwrap_or(DEFAULT_PAGE_SIZE);

    match entity {
        Entity::Account => {
            let accounts = Account::list_page(client, &Default::default(), page, count).await?;
            write_page(out, &accounts, json)
        }
        Entity::Person => {
            let people = Person::list_page(client, &(), page, count).await?;
            write_page(out, &people, json)
        }
        Entity::Deal => {
            let deals = Deal::list_page(client, &Default::default(), page, count).await?;
            write_page(out, &deals, json)
        }
        Entity::Activity => {
            let activities = Activity::list_page(client, &Default::default(), page, count).await?;
            write_page(out, &activities, json)
        }
        Entity::Subscription => {
            let subs = Subscription::list_page(client, &Default::default(), page, count).await?;
            write_page(out, &subs, json)
        }
        Entity::Plan => {
            let plans = Plan::list_page(client, &Default::default(), page, count).await?;
            write_page(out, &plans, json)
        }
        Entity::PlanFamily => {
            let families = PlanFamily::list_page(client, &Default::default(), page, count).await?;
            write_page(out, &families, json)
        }
        Entity::AddOn => {
            let add_ons = AddOn::list_page(client, &Default::default(), page, count).await?;
            write_page(out, &add_ons, json)
        }
        Entity::Transaction => {
            let account = require_flag(scope.account, "--account", "transactions")?;
            let query = TransactionListQuery::for_account(account);
            let transactions = Transaction::list_page(client, &query, page, count).await?;
            write_page(out, &transactions, json)
        }
        Entity::EmailList => {
            let lists = EmailList::list_page(client, &Default::default(), page, count).await?;
            write_page(out, &lists, json)
        }
        Entity::Subscriber => {
            let list = require_flag(scope.email_list, "--email-list", "subscribers")?;
            let query = SubscriberListQuery::for_list(list);
            let subscribers = MarketingSubscription::list_page(client, &query, page, count).await?;
            write_page(out, &subscribers, json)
        }
        Entity::Case => {
            let cases = Case::list_page(client, &Default::default(), page, count).await?;
            write_page(out, &cases, json)
        }
        Entity::Profile => Err(OutsetaError::InvalidArgument(
            "profile cannot be listed; use 'outseta get profile'".into(),
        )),
    }
}

async fn delete<W: Write>(
    client: &OutsetaClient,
    entity: Entity,
    id: String,
    out: &mut W,
) -> Result<()> {
    let deleted = match entity {
        Entity::Account => Account::delete(client, id.clone()).await,
        Entity::Person => Person::delete(client, id.clone()).await,
        Entity::Deal => Deal::delete(client, id.clone()).await,
        _ => Err(OutsetaError::InvalidArgument(format!(
            "{entity:?} does not support delete; only accounts, people and deals can be deleted"
        ))),
    };
    deleted?;

    writeln!(out, "Deleted {entity:?} {id}")?;
    Ok(())
}

fn show<W: Write, T: Serialize + PrettyPrint>(out: &mut W, item: &T, json: bool) -> Result<()> {
    if json {
        return write_json(out, item);
    }
    writeln!(out, "{}", item.pretty_print())?;
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn write_page<W, T>(out: &mut W, page: &Page<T>, json: bool) -> Result<()>
where
    W: Write,
    T: Serialize,
    for<'a> Row: From<&'a T>,
{
    if json {
        return write_json(out, &page.items);
    }

    let rows: Vec<Row> = page.items.iter().map(Row::from).collect();
    writeln!(out, "{}", Table::new(rows))?;
    writeln!(out)?;

    let number = page.page.saturating_add(1);
    match page.total {
        Some(total) => {
            let pages = total.div_ceil(u64::from(page.count.max(1)));
            writeln!(out, "Page {number}/{pages} ({total} total items)")?;
        }
        None if page.has_more => writeln!(out, "Page {number} (more available)")?,
        None => writeln!(out, "Page {number} (end)")?,
    }
    Ok(())
}
