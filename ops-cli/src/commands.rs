use crate::cli::{Args, Command};
use crate::error::{CliError, Result};
use auth_rebac::{
    decode_transactions, group_objects, AuthorizationEngine, AuthzConfig, GettableResources,
    GettableTransaction, InMemoryAuthzStore, Object, PatchableObjects, Relation, Subject,
};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// One seeded grant: `subject` holds `relation` on every listed object
#[derive(Debug, Clone, Deserialize)]
pub struct Grant {
    #[serde(flatten)]
    pub subject: GrantSubject,
    pub relation: Relation,
    /// Canonical flat object strings
    pub objects: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GrantSubject {
    User { user: String },
    Role { role: String },
}

impl GrantSubject {
    fn resolve(&self, org_id: Uuid) -> Result<Subject> {
        let subject = match self {
            GrantSubject::User { user } => Subject::user(org_id, user.as_str())?,
            GrantSubject::Role { role } => Subject::role_assignee(org_id, role.as_str())?,
        };
        Ok(subject)
    }
}

/// Run the parsed command and render its JSON output
pub async fn execute(args: Args) -> Result<String> {
    let output = match args.command {
        Command::Resources => serde_json::to_string_pretty(&resources())?,
        Command::Object { objects } => serde_json::to_string_pretty(&parse_objects(&objects)?)?,
        Command::Check {
            org,
            user,
            grants,
            bootstrap,
            input,
        } => {
            let config = AuthzConfig::load(args.config.as_deref())?;
            let grants = match grants {
                Some(path) => decode_grants(&read_file(&path)?)?,
                None => Vec::new(),
            };
            let body = read_input(input.as_deref())?;

            let results = check(config, org, &user, &grants, bootstrap, &body).await?;
            serde_json::to_string_pretty(&results)?
        }
    };

    Ok(output)
}

pub fn resources() -> GettableResources {
    GettableResources::default()
}

pub fn parse_objects(inputs: &[String]) -> Result<Vec<Object>> {
    inputs
        .iter()
        .map(|input| input.parse::<Object>().map_err(CliError::from))
        .collect()
}

pub fn decode_grants(body: &[u8]) -> Result<Vec<Grant>> {
    serde_json::from_slice(body).map_err(|e| CliError::InvalidGrants(e.to_string()))
}

/// Seed a fresh in-memory store and check `transactions` for the user
pub async fn check(
    config: AuthzConfig,
    org_id: Uuid,
    user: &str,
    grants: &[Grant],
    bootstrap: bool,
    transactions: &[u8],
) -> Result<Vec<GettableTransaction>> {
    let subject = Subject::user(org_id, user)?;
    let transactions = decode_transactions(transactions)?;

    let engine = AuthorizationEngine::new(Arc::new(InMemoryAuthzStore::new()), config)?;
    if bootstrap {
        engine.bootstrap_managed_roles(org_id).await?;
    }
    seed(&engine, org_id, grants).await?;

    info!("Checking {} transactions for {}", transactions.len(), subject);
    Ok(engine.check(&subject, &transactions).await?)
}

async fn seed(engine: &AuthorizationEngine, org_id: Uuid, grants: &[Grant]) -> Result<()> {
    for grant in grants {
        let subject = grant.subject.resolve(org_id)?;
        let objects = parse_objects(&grant.objects)?;
        debug!("Seeding {} {} on {} objects", subject, grant.relation, objects.len());

        let patchable = PatchableObjects::new(group_objects(&objects), Vec::new());
        engine.patch(&subject, grant.relation, &patchable).await?;
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => read_file(path),
        _ => {
            let mut body = Vec::new();
            std::io::stdin()
                .read_to_end(&mut body)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".into(),
                    source,
                })?;
            Ok(body)
        }
    }
}
