use crate::error::{AuthzError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[allow(clippy::unwrap_used)]
lazy_static! {
    static ref NAME_REGEX: Regex = Regex::new(r"^[a-z0-9][a-z0-9_-]{0,49}$").unwrap();
}

/// Name of the single role resource every role instance lives under
pub const ROLE_RESOURCE_NAME: &str = "role";

/// Kind of resource a relation can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Type {
    User,
    Role,
    Organization,
    /// A single instance of a named resource (e.g. one dashboard)
    MetaResource,
    /// The collection of all instances of a named resource
    MetaResources,
}

impl Type {
    pub const ALL: [Type; 5] = [
        Type::User,
        Type::Role,
        Type::Organization,
        Type::MetaResource,
        Type::MetaResources,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Type::User => "user",
            Type::Role => "role",
            Type::Organization => "organization",
            Type::MetaResource => "metaresource",
            Type::MetaResources => "metaresources",
        }
    }

    /// Trusted constructor for compile-time literals; panics on unknown input
    #[allow(clippy::panic)]
    pub fn must_from_str(value: &str) -> Self {
        match value.parse() {
            Ok(typ) => typ,
            Err(err) => panic!("{err}"),
        }
    }
}

impl FromStr for Type {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "user" => Ok(Type::User),
            "role" => Ok(Type::Role),
            "organization" => Ok(Type::Organization),
            "metaresource" => Ok(Type::MetaResource),
            "metaresources" => Ok(Type::MetaResources),
            other => Err(AuthzError::InvalidType(format!("unknown type {other}"))),
        }
    }
}

impl TryFrom<String> for Type {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a resource within its type, e.g. `dashboard`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !NAME_REGEX.is_match(&value) {
            return Err(AuthzError::InvalidName(format!(
                "name {value:?} must match {}",
                NAME_REGEX.as_str()
            )));
        }
        Ok(Self(value))
    }

    /// Trusted constructor for compile-time literals; panics on invalid input
    #[allow(clippy::panic)]
    pub fn must_new(value: &str) -> Self {
        match Self::new(value) {
            Ok(name) => name,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The addressable entity being protected
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub name: Name,
    #[serde(rename = "type")]
    pub resource_type: Type,
}

impl Resource {
    pub fn new(resource_type: Type, name: Name) -> Self {
        Self {
            name,
            resource_type,
        }
    }

    /// Every resource known to the taxonomy, in listing order
    pub fn catalogue() -> Vec<Resource> {
        const ENTRIES: [(Type, &str); 9] = [
            (Type::User, "user"),
            (Type::Role, ROLE_RESOURCE_NAME),
            (Type::Organization, "organization"),
            (Type::MetaResource, "dashboard"),
            (Type::MetaResource, "alert"),
            (Type::MetaResource, "saved-view"),
            (Type::MetaResources, "dashboard"),
            (Type::MetaResources, "alert"),
            (Type::MetaResources, "saved-view"),
        ];

        ENTRIES
            .iter()
            .map(|(typ, name)| Resource::new(*typ, Name::must_new(name)))
            .collect()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.name)
    }
}
