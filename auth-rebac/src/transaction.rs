use crate::error::{AuthzError, Result};
use crate::object::{Object, PostableObject};
use crate::schema::{ensure_typeable, Relation};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Request-scoped token linking a transaction to its decision. Never
/// serialized and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single check request: may the caller `relation` the `object`?
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PostableTransaction")]
pub struct Transaction {
    #[serde(skip)]
    id: CorrelationId,
    relation: Relation,
    object: Object,
}

impl Transaction {
    pub fn new(relation: Relation, object: Object) -> Result<Self> {
        ensure_typeable(relation, object.resource_type())?;

        Ok(Self {
            id: CorrelationId::generate(),
            relation,
            object,
        })
    }

    pub fn id(&self) -> CorrelationId {
        self.id
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn object(&self) -> &Object {
        &self.object
    }
}

/// Unvalidated wire form of a transaction
#[derive(Debug, Clone, Deserialize)]
pub struct PostableTransaction {
    pub relation: String,
    pub object: PostableObject,
}

impl TryFrom<PostableTransaction> for Transaction {
    type Error = AuthzError;

    fn try_from(postable: PostableTransaction) -> Result<Self> {
        let relation: Relation = postable.relation.parse()?;
        let object = Object::try_from(postable.object)?;
        Transaction::new(relation, object)
    }
}

/// Wire-facing result of one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GettableTransaction {
    pub relation: Relation,
    pub object: Object,
    pub authorized: bool,
}

/// Decode a batch of transactions from a wire payload.
///
/// The payload is rejected as a whole: if any item is malformed no
/// transaction is returned.
pub fn decode_transactions(body: &[u8]) -> Result<Vec<Transaction>> {
    let postables: Vec<PostableTransaction> =
        serde_json::from_slice(body).map_err(|e| AuthzError::InvalidPayload(e.to_string()))?;

    postables
        .into_iter()
        .enumerate()
        .map(|(index, postable)| {
            Transaction::try_from(postable).map_err(|err| {
                debug!(index, error = %err, "rejecting check batch");
                err
            })
        })
        .collect()
}
