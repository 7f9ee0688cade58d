use crate::{
    check::BatchChecker,
    config::AuthzConfig,
    error::{AuthzError, Result},
    models::Subject,
    object::{group_objects, new_patchable_objects, GettableObjects, PatchableObjects},
    policy::ManagedRole,
    repository::{within_deadline, AuthzStore},
    schema::{verify_matrices, GettableResources, Relation},
    transaction::{GettableTransaction, Transaction},
};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Authorization engine: validates requests, applies limits and deadlines,
/// and delegates decisions and writes to the relationship store
pub struct AuthorizationEngine {
    /// Storage for relationship tuples
    store: Arc<dyn AuthzStore>,

    /// Batch check orchestrator over the same store
    checker: BatchChecker,

    config: AuthzConfig,
}

impl AuthorizationEngine {
    pub fn new(store: Arc<dyn AuthzStore>, config: AuthzConfig) -> Result<Self> {
        verify_matrices()?;
        config.validate()?;

        Ok(Self {
            checker: BatchChecker::new(store.clone()),
            store,
            config,
        })
    }

    pub fn config(&self) -> &AuthzConfig {
        &self.config
    }

    fn default_deadline(&self) -> Instant {
        Instant::now() + self.config.store_timeout()
    }

    // =========================================================================
    // Checks
    // =========================================================================

    /// Decide every transaction for `subject`, in input order
    pub async fn check(
        &self,
        subject: &Subject,
        transactions: &[Transaction],
    ) -> Result<Vec<GettableTransaction>> {
        self.check_with_deadline(subject, transactions, self.default_deadline())
            .await
    }

    #[instrument(skip(self, transactions), fields(subject = %subject, batch = transactions.len()))]
    pub async fn check_with_deadline(
        &self,
        subject: &Subject,
        transactions: &[Transaction],
        deadline: Instant,
    ) -> Result<Vec<GettableTransaction>> {
        if transactions.len() > self.config.max_batch_size {
            return Err(AuthzError::BatchTooLarge {
                size: transactions.len(),
                max: self.config.max_batch_size,
            });
        }

        let results = self.checker.check(subject, transactions, deadline).await?;
        debug!(
            authorized = results.iter().filter(|r| r.authorized).count(),
            "Check completed"
        );
        Ok(results)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Apply a grouped additions/deletions diff for one relation atomically
    pub async fn patch(
        &self,
        subject: &Subject,
        relation: Relation,
        patchable: &PatchableObjects,
    ) -> Result<()> {
        self.patch_with_deadline(subject, relation, patchable, self.default_deadline())
            .await
    }

    #[instrument(skip(self, patchable), fields(subject = %subject, relation = %relation))]
    pub async fn patch_with_deadline(
        &self,
        subject: &Subject,
        relation: Relation,
        patchable: &PatchableObjects,
        deadline: Instant,
    ) -> Result<()> {
        let diff = new_patchable_objects(&patchable.additions, &patchable.deletions, relation)?;
        info!(
            additions = diff.additions.len(),
            deletions = diff.deletions.len(),
            "Patching {} for {}",
            relation,
            subject
        );

        within_deadline(
            deadline,
            self.store
                .write(subject, relation, &diff.additions, &diff.deletions),
        )
        .await
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// Objects `subject` holds `relation` on, grouped by resource
    #[instrument(skip(self), fields(subject = %subject, relation = %relation))]
    pub async fn list_objects(
        &self,
        subject: &Subject,
        relation: Relation,
    ) -> Result<Vec<GettableObjects>> {
        let objects = within_deadline(
            self.default_deadline(),
            self.store.list_objects(subject, relation),
        )
        .await?;

        Ok(group_objects(&objects))
    }

    /// The taxonomy and relation matrix for client discovery
    pub fn resources(&self) -> GettableResources {
        GettableResources::default()
    }

    // =========================================================================
    // Managed roles
    // =========================================================================

    /// Seed the default grants of every managed role for `org_id`.
    ///
    /// One atomic write per (role, relation); running it twice for the same
    /// organization fails on the first already-present tuple.
    #[instrument(skip(self))]
    pub async fn bootstrap_managed_roles(&self, org_id: Uuid) -> Result<()> {
        for role in ManagedRole::ALL {
            let assignees = Subject::role_assignee(org_id, role.as_str())?;
            for (relation, objects) in role.grants() {
                info!("Granting {} on {} objects to {}", relation, objects.len(), assignees);
                within_deadline(
                    self.default_deadline(),
                    self.store.write(&assignees, relation, &objects, &[]),
                )
                .await?;
            }
        }

        Ok(())
    }
}
