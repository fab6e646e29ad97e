//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::OutsetaClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by their Outseta `Uid`.
///
/// # Example
///
/// ```ignore
/// use outseta::{OutsetaClient, Account, Get};
///
/// let client = OutsetaClient::from_env()?;
/// let account = Account::get(&client, "dpWp6xmq".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (the `Uid` string for every Outseta entity).
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns [`OutsetaError::InvalidArgument`](crate::OutsetaError::InvalidArgument)
    /// for a blank ID, or an API error if the entity is not found.
    async fn get(client: &OutsetaClient, id: Self::Id) -> Result<Self>;
}
