/// Forwarding port trait
///
/// Defines the interface for sending an insight to an external tabular
/// store. Implementation: Airtable adapter.
use crate::domain::models::Insight;
use crate::error::Result;
use async_trait::async_trait;

/// Port trait for insight forwarding
#[async_trait]
pub trait ForwardingPort: Send + Sync {
    /// Send a single insight as a new table row
    async fn send_insight(&self, insight: &Insight) -> Result<()>;

    /// Check if the destination is fully configured
    fn is_configured(&self) -> bool;
}
