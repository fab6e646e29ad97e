//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::OutsetaClient;
use crate::error::Result;

/// Delete an entity by ID.
#[async_trait]
pub trait Delete {
    /// The ID type for this entity.
    type Id: Send;

    /// Delete the entity.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank ID, an unknown entity, or a failed request.
    async fn delete(client: &OutsetaClient, id: Self::Id) -> Result<()>;
}
