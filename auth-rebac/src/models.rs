use crate::error::{AuthzError, Result};
use crate::object::Object;
use crate::schema::Relation;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of principal a check or a write is evaluated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubjectKind {
    /// An authenticated user
    User,
    /// Everyone assigned to a role
    RoleAssignee,
}

/// Already-authenticated principal, scoped to an organization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Subject {
    org_id: Uuid,
    kind: SubjectKind,
    id: String,
}

impl Subject {
    pub fn user(org_id: Uuid, user_id: impl Into<String>) -> Result<Self> {
        Self::new(org_id, SubjectKind::User, user_id.into())
    }

    pub fn role_assignee(org_id: Uuid, role: impl Into<String>) -> Result<Self> {
        Self::new(org_id, SubjectKind::RoleAssignee, role.into())
    }

    fn new(org_id: Uuid, kind: SubjectKind, id: String) -> Result<Self> {
        if id.is_empty() || id.contains(['/', '#', ':']) || id.chars().any(char::is_whitespace) {
            return Err(AuthzError::InvalidSubject(format!(
                "subject id {id:?} must be non-empty and free of '/', '#', ':' and whitespace"
            )));
        }
        Ok(Self { org_id, kind, id })
    }

    pub fn org_id(&self) -> Uuid {
        self.org_id
    }

    pub fn kind(&self) -> SubjectKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SubjectKind::User => write!(f, "user:organization/{}/user/{}", self.org_id, self.id),
            SubjectKind::RoleAssignee => {
                write!(f, "role:organization/{}/role/{}#assignee", self.org_id, self.id)
            }
        }
    }
}

/// Relationship fact: subject has relation to object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tuple {
    pub subject: Subject,
    pub relation: Relation,
    pub object: Object,
}

impl Tuple {
    pub fn new(subject: Subject, relation: Relation, object: Object) -> Self {
        Self {
            subject,
            relation,
            object,
        }
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.subject,
            self.relation,
            self.object.encode(self.subject.org_id)
        )
    }
}
