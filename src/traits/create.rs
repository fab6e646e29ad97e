//! Create trait for adding entities.

use async_trait::async_trait;

use crate::client::OutsetaClient;
use crate::error::Result;

/// Create a new entity.
///
/// # Example
///
/// ```ignore
/// use outseta::{OutsetaClient, Deal, Create};
///
/// let client = OutsetaClient::from_env()?;
/// let deal = Deal::create(&client, Deal { name: Some("Renewal".into()), ..Default::default() }).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Body sent to the create endpoint.
    type Params: Send;

    /// Create the entity and return it as stored by Outseta.
    ///
    /// # Errors
    ///
    /// Returns an error if Outseta rejects the entity or the request fails.
    async fn create(client: &OutsetaClient, params: Self::Params) -> Result<Self>;
}
