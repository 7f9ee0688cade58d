//! Default grants for the roles every organization starts with.
//!
//! Rows are compile-time literals and go through the trusted constructor tier;
//! request-handling code never touches this table.

use crate::object::Object;
use crate::schema::Relation;
use serde::{Deserialize, Serialize};
use std::fmt;

const COLLECTIONS: &[&str] = &[
    "metaresources:organization/*/dashboard/*",
    "metaresources:organization/*/alert/*",
    "metaresources:organization/*/saved-view/*",
];

const INSTANCES: &[&str] = &[
    "metaresource:organization/*/dashboard/*",
    "metaresource:organization/*/alert/*",
    "metaresource:organization/*/saved-view/*",
];

const DIRECTORY: &[&str] = &[
    "user:organization/*/user/*",
    "role:organization/*/role/*",
    "organization:organization/*/organization/*",
];

type PolicyRow = (Relation, &'static [&'static [&'static str]]);

const ADMIN: &[PolicyRow] = &[
    (Relation::Create, &[COLLECTIONS]),
    (Relation::List, &[COLLECTIONS]),
    (Relation::Read, &[INSTANCES, DIRECTORY]),
    (Relation::Update, &[INSTANCES, DIRECTORY]),
    (Relation::Delete, &[INSTANCES, DIRECTORY]),
];

const EDITOR: &[PolicyRow] = &[
    (Relation::Create, &[COLLECTIONS]),
    (Relation::List, &[COLLECTIONS]),
    (Relation::Read, &[INSTANCES, DIRECTORY]),
    (Relation::Update, &[INSTANCES]),
    (Relation::Delete, &[INSTANCES]),
];

const VIEWER: &[PolicyRow] = &[
    (Relation::List, &[COLLECTIONS]),
    (Relation::Read, &[INSTANCES, DIRECTORY]),
];

/// Built-in roles seeded into every organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagedRole {
    Admin,
    Editor,
    Viewer,
}

impl ManagedRole {
    pub const ALL: [ManagedRole; 3] = [ManagedRole::Admin, ManagedRole::Editor, ManagedRole::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            ManagedRole::Admin => "admin",
            ManagedRole::Editor => "editor",
            ManagedRole::Viewer => "viewer",
        }
    }

    /// Default grants, one entry per relation
    pub fn grants(&self) -> Vec<(Relation, Vec<Object>)> {
        let rows = match self {
            ManagedRole::Admin => ADMIN,
            ManagedRole::Editor => EDITOR,
            ManagedRole::Viewer => VIEWER,
        };

        rows.iter()
            .map(|(relation, groups)| {
                let objects = groups
                    .iter()
                    .flat_map(|literals| Object::must_from_strs(literals))
                    .collect();
                (*relation, objects)
            })
            .collect()
    }
}

impl fmt::Display for ManagedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
