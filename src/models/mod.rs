//! Outseta API model types.

mod account;
mod activity;
mod add_on;
mod auth;
mod deal;
mod discount;
mod email_list;
mod invoice;
mod payment;
mod person;
mod plan;
mod profile;
mod subscription;
mod support;
mod transaction;

pub use account::*;
pub use activity::*;
pub use add_on::*;
pub use auth::*;
pub use deal::*;
pub use discount::*;
pub use email_list::*;
pub use invoice::*;
pub use payment::*;
pub use person::*;
pub use plan::*;
pub use profile::*;
pub use subscription::*;
pub use support::*;
pub use transaction::*;

use crate::error::{require_id, Result};

/// Join a collection path and a percent-encoded entity id.
///
/// Blank ids are rejected with `"<what> id cannot be null or blank."`.
pub(crate) fn entity_path(collection: &str, id: &str, what: &str) -> Result<String> {
    require_id(id, &format!("{what} id"))?;
    Ok(format!("{collection}/{}", urlencoding::encode(id)))
}
