use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from the document store client
#[derive(Debug, Error)]
pub enum CloudantError {
    #[error("request to document store failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("document store returned {status} for {context}: {body}")]
    UnexpectedStatus {
        status: u16,
        context: String,
        body: String,
    },

    #[error("IAM token endpoint rejected the request: {0}")]
    TokenRejected(String),

    #[error("invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Outcome of a create-database call. Already-exists is a success for the
/// bootstrap importer, so it is not an error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseCreated {
    Created,
    AlreadyExists,
}

/// Seam between the handlers/bootstrap and the Cloudant REST client.
///
/// Handlers hold this as injected state so tests can swap in an in-memory
/// implementation; the real implementation is [`crate::cloudant::CloudantClient`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_database(&self, db: &str) -> Result<DatabaseCreated, CloudantError>;

    /// Submit all documents in a single round trip, returning the count.
    async fn bulk_insert(&self, db: &str, docs: Vec<Value>) -> Result<usize, CloudantError>;

    /// Equality-selector query, e.g. `{"patient_id": "p001"}`.
    async fn find(&self, db: &str, selector: Value) -> Result<Vec<Value>, CloudantError>;

    async fn all_docs(&self, db: &str) -> Result<Vec<Value>, CloudantError>;

    /// Liveness probe against the service root.
    async fn ping(&self) -> Result<(), CloudantError>;
}
