use crate::error::{AuthzError, Result};
use crate::resource::Type;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const WILDCARD: &str = "*";
const MAX_SELECTOR_LEN: usize = 255;

#[allow(clippy::unwrap_used)]
lazy_static! {
    static ref ID_SELECTOR_REGEX: Regex = Regex::new(r"^(\*|[A-Za-z0-9][A-Za-z0-9._@-]*)$").unwrap();
    static ref ROLE_SELECTOR_REGEX: Regex = Regex::new(r"^(\*|[a-z0-9][a-z0-9_-]*)$").unwrap();
    static ref PATH_SELECTOR_REGEX: Regex = Regex::new(
        r"^(\*|[A-Za-z0-9][A-Za-z0-9_@-]*(\.[A-Za-z0-9][A-Za-z0-9_@-]*)*(\.\*)?)$"
    )
    .unwrap();
    static ref COLLECTION_SELECTOR_REGEX: Regex = Regex::new(r"^\*$").unwrap();
}

fn grammar(resource_type: Type) -> &'static Regex {
    match resource_type {
        Type::User | Type::Organization => &ID_SELECTOR_REGEX,
        Type::Role => &ROLE_SELECTOR_REGEX,
        Type::MetaResource => &PATH_SELECTOR_REGEX,
        Type::MetaResources => &COLLECTION_SELECTOR_REGEX,
    }
}

/// Check `value` against the selector grammar of `resource_type`
pub fn validate_selector(resource_type: Type, value: &str) -> Result<()> {
    if value.len() > MAX_SELECTOR_LEN {
        return Err(AuthzError::InvalidSelector(format!(
            "selector for type {resource_type} exceeds {MAX_SELECTOR_LEN} characters"
        )));
    }

    let regex = grammar(resource_type);
    if !regex.is_match(value) {
        return Err(AuthzError::InvalidSelector(format!(
            "selector {value:?} is invalid for type {resource_type}, must match {}",
            regex.as_str()
        )));
    }

    Ok(())
}

/// Type-specific expression addressing one or more instances of a resource.
///
/// A selector on its own only carries the raw expression; it is checked
/// against its type's grammar by [`Selector::new`] and again whenever it is
/// paired with a resource in an [`crate::object::Object`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(String);

impl Selector {
    pub fn new(resource_type: Type, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_selector(resource_type, &value)?;
        Ok(Self(value))
    }

    /// Trusted constructor for compile-time literals; panics on invalid input
    #[allow(clippy::panic)]
    pub fn must_new(resource_type: Type, value: &str) -> Self {
        match Self::new(resource_type, value) {
            Ok(selector) => selector,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn wildcard() -> Self {
        Self(WILDCARD.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == WILDCARD
    }

    /// Whether every instance addressed by `other` is also addressed by `self`.
    ///
    /// `*` covers everything, `a.b.*` covers `a.b.c` and `a.b.c.*` but not
    /// `a.b` itself.
    pub fn covers(&self, other: &Selector) -> bool {
        if self.is_wildcard() || self.0 == other.0 {
            return true;
        }

        match self.0.strip_suffix(WILDCARD) {
            Some(prefix) if prefix.ends_with('.') => {
                other.0.len() > prefix.len() && other.0.starts_with(prefix)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
