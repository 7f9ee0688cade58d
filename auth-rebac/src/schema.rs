//! Relation vocabulary and the two validity matrices that bind relations to
//! resource types.
//!
//! `TYPEABLE_RELATIONS` answers "which relations may be attached to objects of
//! this type" and is the only table consulted when validating a transaction or
//! a patch. `RELATIONS_TYPEABLE` is its inverse, published to clients through
//! [`GettableResources`]. The two must stay exact inverses; [`verify_matrices`]
//! checks that once at engine construction.

use crate::error::{AuthzError, Result};
use crate::resource::{Resource, Type};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Verb relating a subject to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Relation {
    Create,
    Read,
    Update,
    Delete,
    List,
    Assignee,
}

impl Relation {
    pub const ALL: [Relation; 6] = [
        Relation::Create,
        Relation::Read,
        Relation::Update,
        Relation::Delete,
        Relation::List,
        Relation::Assignee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Create => "create",
            Relation::Read => "read",
            Relation::Update => "update",
            Relation::Delete => "delete",
            Relation::List => "list",
            Relation::Assignee => "assignee",
        }
    }

    /// Types this relation may be attached to
    pub fn types(&self) -> &'static [Type] {
        RELATIONS_TYPEABLE
            .get(self)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl FromStr for Relation {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "create" => Ok(Relation::Create),
            "read" => Ok(Relation::Read),
            "update" => Ok(Relation::Update),
            "delete" => Ok(Relation::Delete),
            "list" => Ok(Relation::List),
            "assignee" => Ok(Relation::Assignee),
            other => Err(AuthzError::InvalidRelation(format!("invalid relation {other}"))),
        }
    }
}

impl TryFrom<String> for Relation {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

lazy_static! {
    /// Type -> relations that may be attached to objects of that type
    pub static ref TYPEABLE_RELATIONS: HashMap<Type, Vec<Relation>> = HashMap::from([
        (Type::User, vec![Relation::Read, Relation::Update, Relation::Delete]),
        (
            Type::Role,
            vec![Relation::Assignee, Relation::Read, Relation::Update, Relation::Delete],
        ),
        (Type::Organization, vec![Relation::Read, Relation::Update, Relation::Delete]),
        (Type::MetaResource, vec![Relation::Read, Relation::Update, Relation::Delete]),
        (Type::MetaResources, vec![Relation::Create, Relation::List]),
    ]);

    /// Relation -> types it may be attached to; inverse of `TYPEABLE_RELATIONS`
    pub static ref RELATIONS_TYPEABLE: BTreeMap<Relation, Vec<Type>> = BTreeMap::from([
        (Relation::Create, vec![Type::MetaResources]),
        (
            Relation::Read,
            vec![Type::User, Type::Role, Type::Organization, Type::MetaResource],
        ),
        (
            Relation::Update,
            vec![Type::User, Type::Role, Type::Organization, Type::MetaResource],
        ),
        (
            Relation::Delete,
            vec![Type::User, Type::Role, Type::Organization, Type::MetaResource],
        ),
        (Relation::List, vec![Type::MetaResources]),
        (Relation::Assignee, vec![Type::Role]),
    ]);
}

impl Type {
    /// Relations that may be attached to objects of this type
    pub fn relations(&self) -> &'static [Relation] {
        TYPEABLE_RELATIONS
            .get(self)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn accepts(&self, relation: Relation) -> bool {
        self.relations().contains(&relation)
    }
}

/// Fail with `InvalidRelation` unless `relation` applies to `resource_type`
pub fn ensure_typeable(relation: Relation, resource_type: Type) -> Result<()> {
    if resource_type.accepts(relation) {
        Ok(())
    } else {
        Err(AuthzError::InvalidRelation(format!(
            "relation {relation} is invalid for type {resource_type}"
        )))
    }
}

/// Check that the two validity matrices are exact inverses of each other
pub fn verify_matrices() -> Result<()> {
    for typ in Type::ALL {
        for relation in Relation::ALL {
            let forward = typ.accepts(relation);
            let backward = relation.types().contains(&typ);
            if forward != backward {
                return Err(AuthzError::Internal(format!(
                    "validity matrices disagree on ({typ}, {relation}): typeable={forward}, reverse={backward}"
                )));
            }
        }
    }
    Ok(())
}

/// Read-only listing of the taxonomy for client discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GettableResources {
    pub resources: Vec<Resource>,
    pub relations: BTreeMap<Relation, Vec<Type>>,
}

impl GettableResources {
    pub fn new(resources: Vec<Resource>) -> Self {
        Self {
            resources,
            relations: RELATIONS_TYPEABLE.clone(),
        }
    }
}

impl Default for GettableResources {
    fn default() -> Self {
        Self::new(Resource::catalogue())
    }
}
