//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::OutsetaClient;
use crate::error::Result;

/// Update an existing entity.
///
/// Outseta updates are partial: fields left as `None` are not sent and
/// keep their stored value.
///
/// # Example
///
/// ```ignore
/// use outseta::{OutsetaClient, Person, Update};
///
/// let client = OutsetaClient::from_env()?;
/// let updated = Person::update(
///     &client,
///     "wZmNw7Q2".to_string(),
///     Person {
///         first_name: Some("Ada".to_string()),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Parameters for the update.
    type Params: Send;

    /// Update the entity and return the updated version.
    ///
    /// # Arguments
    ///
    /// * `client` - The Outseta API client
    /// * `id` - The entity identifier
    /// * `params` - Fields to change
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &OutsetaClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
