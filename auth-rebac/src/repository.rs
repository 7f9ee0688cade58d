use crate::{
    error::{AuthzError, Result},
    models::{Subject, SubjectKind, Tuple},
    object::Object,
    schema::Relation,
    resource::{Type, ROLE_RESOURCE_NAME},
    transaction::{CorrelationId, Transaction},
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use tokio::time::Instant;
use tracing::debug;

/// Boundary to the relationship store that persists tuples and answers
/// point-in-time reachability queries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthzStore: Send + Sync {
    /// Decide every transaction for `subject` against one consistent snapshot.
    /// Must answer for every submitted correlation id.
    async fn batch_check(
        &self,
        subject: &Subject,
        transactions: &[Transaction],
    ) -> Result<HashMap<CorrelationId, bool>>;

    /// Atomically grant `relation` on `additions` and revoke it on `deletions`
    async fn write(
        &self,
        subject: &Subject,
        relation: Relation,
        additions: &[Object],
        deletions: &[Object],
    ) -> Result<()>;

    /// Objects on which `subject` directly holds `relation`
    async fn list_objects(&self, subject: &Subject, relation: Relation) -> Result<Vec<Object>>;
}

/// Run a single store call under `deadline`; on expiry the call is dropped
pub(crate) async fn within_deadline<T, F>(deadline: Instant, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout_at(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(AuthzError::DeadlineExceeded),
    }
}

/// In-memory tuple store for development and tests
pub struct InMemoryAuthzStore {
    tuples: RwLock<HashSet<Tuple>>,
}

impl InMemoryAuthzStore {
    pub fn new() -> Self {
        Self {
            tuples: RwLock::new(HashSet::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.tuples.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.read().is_empty()
    }

    /// Subjects whose grants apply to `subject`: itself plus, for users, the
    /// assignees of every role the user is assigned to. Only assignments on
    /// the role resource itself count.
    fn effective_subjects(tuples: &HashSet<Tuple>, subject: &Subject) -> Vec<Subject> {
        let mut subjects = vec![subject.clone()];
        if subject.kind() != SubjectKind::User {
            return subjects;
        }

        for tuple in tuples {
            let object = &tuple.object;
            if tuple.subject == *subject
                && tuple.relation == Relation::Assignee
                && object.resource_type() == Type::Role
                && object.resource().name.as_str() == ROLE_RESOURCE_NAME
                && !object.selector().is_wildcard()
            {
                if let Ok(role) = Subject::role_assignee(subject.org_id(), object.selector().as_str()) {
                    subjects.push(role);
                }
            }
        }

        subjects
    }

    fn is_granted(tuples: &HashSet<Tuple>, subjects: &[Subject], transaction: &Transaction) -> bool {
        let wanted = transaction.object();
        tuples.iter().any(|tuple| {
            tuple.relation == transaction.relation()
                && tuple.object.resource() == wanted.resource()
                && tuple.object.selector().covers(wanted.selector())
                && subjects.contains(&tuple.subject)
        })
    }
}

impl Default for InMemoryAuthzStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthzStore for InMemoryAuthzStore {
    async fn batch_check(
        &self,
        subject: &Subject,
        transactions: &[Transaction],
    ) -> Result<HashMap<CorrelationId, bool>> {
        let tuples = self.tuples.read();
        let subjects = Self::effective_subjects(&tuples, subject);

        Ok(transactions
            .iter()
            .map(|txn| (txn.id(), Self::is_granted(&tuples, &subjects, txn)))
            .collect())
    }

    async fn write(
        &self,
        subject: &Subject,
        relation: Relation,
        additions: &[Object],
        deletions: &[Object],
    ) -> Result<()> {
        let to_tuple = |object: &Object| Tuple::new(subject.clone(), relation, object.clone());
        let additions: Vec<Tuple> = additions.iter().map(to_tuple).collect();
        let deletions: Vec<Tuple> = deletions.iter().map(to_tuple).collect();

        let mut tuples = self.tuples.write();

        // validate the whole diff before touching anything
        let mut pending = HashSet::new();
        for tuple in &additions {
            if tuples.contains(tuple) || !pending.insert(tuple) {
                return Err(AuthzError::StorageError(format!(
                    "cannot write a tuple which already exists: {tuple}"
                )));
            }
        }
        for tuple in &deletions {
            if !tuples.contains(tuple) {
                return Err(AuthzError::StorageError(format!(
                    "cannot delete a tuple which does not exist: {tuple}"
                )));
            }
        }

        for tuple in &deletions {
            debug!("Deleting tuple: {}", tuple);
            tuples.remove(tuple);
        }
        for tuple in additions {
            debug!("Writing tuple: {}", tuple);
            tuples.insert(tuple);
        }

        Ok(())
    }

    async fn list_objects(&self, subject: &Subject, relation: Relation) -> Result<Vec<Object>> {
        let tuples = self.tuples.read();
        let mut objects: Vec<Object> = tuples
            .iter()
            .filter(|tuple| tuple.subject == *subject && tuple.relation == relation)
            .map(|tuple| tuple.object.clone())
            .collect();
        // set iteration order is arbitrary; keep listings stable
        objects.sort_by(|a, b| {
            (a.resource(), a.selector()).cmp(&(b.resource(), b.selector()))
        });
        Ok(objects)
    }
}
