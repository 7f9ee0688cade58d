use crate::error::{AuthzError, Result};
use crate::resource::{Name, Resource, Type};
use crate::schema::{ensure_typeable, Relation};
use crate::selector::{validate_selector, Selector};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Qualifier used in the canonical string form; every object is org scoped
const ORGANIZATION_QUALIFIER: &str = "organization";

/// Concrete authorizable target of a relation: a resource plus a selector
/// that has passed the resource type's grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PostableObject")]
pub struct Object {
    resource: Resource,
    selector: Selector,
}

impl Object {
    pub fn new(resource: Resource, selector: Selector) -> Result<Self> {
        validate_selector(resource.resource_type, selector.as_str())?;
        Ok(Self { resource, selector })
    }

    /// Trusted constructor for compile-time literals; panics on invalid input
    #[allow(clippy::panic)]
    pub fn must_new(resource: Resource, selector: Selector) -> Self {
        match Self::new(resource, selector) {
            Ok(object) => object,
            Err(err) => panic!("{err}"),
        }
    }

    /// Trusted counterpart of `str::parse`, for compile-time literals only
    #[allow(clippy::panic)]
    pub fn must_from_str(input: &str) -> Self {
        match input.parse() {
            Ok(object) => object,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn must_from_strs(inputs: &[&str]) -> Vec<Self> {
        inputs.iter().map(|input| Self::must_from_str(input)).collect()
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn resource_type(&self) -> Type {
        self.resource.resource_type
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Canonical string form `<type>:organization/<org>/<name>/<selector>`
    pub fn encode(&self, org_id: Uuid) -> String {
        format!(
            "{}:{}/{}/{}/{}",
            self.resource.resource_type,
            ORGANIZATION_QUALIFIER,
            org_id,
            self.resource.name,
            self.selector
        )
    }
}

impl FromStr for Object {
    type Err = AuthzError;

    /// Parse the canonical four-segment form. The qualifier and org scope
    /// must be present but do not take part in the resulting value.
    fn from_str(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split('/').collect();
        let [descriptor, _org_scope, name, selector] = parts.as_slice() else {
            return Err(AuthzError::InvalidObject(format!(
                "invalid input format: {input}, expected 4 '/' separated segments"
            )));
        };

        let type_parts: Vec<&str> = descriptor.split(':').collect();
        let [type_family, _qualifier] = type_parts.as_slice() else {
            return Err(AuthzError::InvalidObject(format!(
                "invalid type format: {descriptor}, expected <type>:<qualifier>"
            )));
        };

        let resource_type: Type = type_family.parse()?;
        let resource = Resource::new(resource_type, Name::new(*name)?);
        let selector = Selector::new(resource_type, *selector)?;

        Object::new(resource, selector)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource, self.selector)
    }
}

/// Unvalidated wire form of a resource
#[derive(Debug, Clone, Deserialize)]
pub struct PostableResource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// Unvalidated wire form of an object
#[derive(Debug, Clone, Deserialize)]
pub struct PostableObject {
    pub resource: PostableResource,
    pub selector: String,
}

impl TryFrom<PostableObject> for Object {
    type Error = AuthzError;

    fn try_from(postable: PostableObject) -> Result<Self> {
        let resource_type: Type = postable.resource.resource_type.parse()?;
        let resource = Resource::new(resource_type, Name::new(postable.resource.name)?);
        let selector = Selector::new(resource_type, postable.selector)?;
        Object::new(resource, selector)
    }
}

/// Objects sharing a resource, grouped for requests and responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GettableObjects {
    pub resource: Resource,
    pub selectors: Vec<Selector>,
}

impl GettableObjects {
    pub fn new(resource: Resource, selectors: Vec<Selector>) -> Self {
        Self {
            resource,
            selectors,
        }
    }

    /// Expand into one object per selector, validating each
    pub fn to_objects(&self) -> Result<Vec<Object>> {
        self.selectors
            .iter()
            .map(|selector| Object::new(self.resource.clone(), selector.clone()))
            .collect()
    }
}

/// Diff request against the relationship store for a single relation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchableObjects {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub additions: Vec<GettableObjects>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub deletions: Vec<GettableObjects>,
}

impl PatchableObjects {
    pub fn new(additions: Vec<GettableObjects>, deletions: Vec<GettableObjects>) -> Self {
        Self {
            additions,
            deletions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }

    pub fn into_diff(self, relation: Relation) -> Result<ObjectDiff> {
        new_patchable_objects(&self.additions, &self.deletions, relation)
    }
}

fn nullable_vec<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Flat object lists handed to the store's atomic write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectDiff {
    pub additions: Vec<Object>,
    pub deletions: Vec<Object>,
}

impl ObjectDiff {
    pub fn len(&self) -> usize {
        self.additions.len() + self.deletions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }
}

/// Validate a patch for `relation` and flatten both sides into objects.
///
/// Rejects an all-empty patch, then rejects any group whose resource type does
/// not accept `relation`, then expands every group, validating selectors.
pub fn new_patchable_objects(
    additions: &[GettableObjects],
    deletions: &[GettableObjects],
    relation: Relation,
) -> Result<ObjectDiff> {
    if additions.is_empty() && deletions.is_empty() {
        return Err(AuthzError::InvalidPatchObject(
            "empty object patch request received, at least one of additions or deletions must be present"
                .to_string(),
        ));
    }

    for group in additions.iter().chain(deletions) {
        ensure_typeable(relation, group.resource.resource_type)?;
    }

    Ok(ObjectDiff {
        additions: new_objects_from_gettable_objects(additions)?,
        deletions: new_objects_from_gettable_objects(deletions)?,
    })
}

pub fn new_objects_from_gettable_objects(groups: &[GettableObjects]) -> Result<Vec<Object>> {
    let mut objects = Vec::with_capacity(groups.iter().map(|g| g.selectors.len()).sum());
    for group in groups {
        objects.extend(group.to_objects()?);
    }
    Ok(objects)
}

/// Group objects by resource. Groups appear in order of first appearance and
/// keep their selectors in first-seen order; repeated selectors collapse.
pub fn group_objects(objects: &[Object]) -> Vec<GettableObjects> {
    let mut index: HashMap<&Resource, usize> = HashMap::new();
    let mut groups: Vec<GettableObjects> = Vec::new();

    for object in objects {
        let position = *index.entry(&object.resource).or_insert_with(|| {
            groups.push(GettableObjects::new(object.resource.clone(), Vec::new()));
            groups.len() - 1
        });

        if let Some(group) = groups.get_mut(position) {
            if !group.selectors.contains(&object.selector) {
                group.selectors.push(object.selector.clone());
            }
        }
    }

    groups
}

/// Decode a wire patch payload; malformed JSON rejects the whole payload
pub fn decode_patchable_objects(body: &[u8]) -> Result<PatchableObjects> {
    serde_json::from_slice(body).map_err(|e| AuthzError::InvalidPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(typ: Type, name: &str) -> Resource {
        Resource::new(typ, Name::new(name).unwrap())
    }

    fn selectors(typ: Type, values: &[&str]) -> Vec<Selector> {
        values.iter().map(|v| Selector::new(typ, *v).unwrap()).collect()
    }

    #[test]
    fn test_new_object_validates_selector() {
        let user = resource(Type::User, "u1");
        assert!(Object::new(user.clone(), Selector::new(Type::User, "u1").unwrap()).is_ok());

        // a selector valid for users is not valid for a collection
        let collection = resource(Type::MetaResources, "dashboard");
        let result = Object::new(collection, Selector::new(Type::User, "u1").unwrap());
        assert!(matches!(result, Err(AuthzError::InvalidSelector(_))));
    }

    #[test]
    fn test_parse_flat_string() {
        let object: Object = "metaresource:organization/0199c3a4-6f0e-7d2b-9a51-2f0c1d7e8b90/dashboard/team-a.*"
            .parse()
            .unwrap();
        assert_eq!(object.resource_type(), Type::MetaResource);
        assert_eq!(object.resource().name.as_str(), "dashboard");
        assert_eq!(object.selector().as_str(), "team-a.*");
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        let cases = [
            "user:organization/org/user",
            "user:organization/org/user/u1/extra",
            "user/org/user/u1",
            "user:organization:x/org/user/u1",
            "folder:organization/org/folder/f1",
            "user:organization/org/User/u1",
            "metaresources:organization/org/dashboard/d1",
        ];
        for case in cases {
            assert!(case.parse::<Object>().is_err(), "{case} should not parse");
        }

        assert!(matches!(
            "user/org/user/u1".parse::<Object>(),
            Err(AuthzError::InvalidObject(_))
        ));
        assert!(matches!(
            "metaresources:organization/org/dashboard/d1".parse::<Object>(),
            Err(AuthzError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_encode_then_parse() {
        let org_id = Uuid::new_v4();
        let object = Object::new(
            resource(Type::Role, "role"),
            Selector::new(Type::Role, "org-admin").unwrap(),
        )
        .unwrap();

        let encoded = object.encode(org_id);
        assert_eq!(encoded, format!("role:organization/{org_id}/role/org-admin"));
        assert_eq!(encoded.parse::<Object>().unwrap(), object);
    }

    #[test]
    fn test_must_from_str_accepts_literals() {
        let objects = Object::must_from_strs(&[
            "metaresources:organization/*/dashboard/*",
            "user:organization/*/user/*",
        ]);
        assert_eq!(objects.len(), 2);
    }

    #[test]
    #[should_panic(expected = "Invalid selector")]
    fn test_must_from_str_panics_on_invalid_literal() {
        Object::must_from_str("metaresources:organization/*/dashboard/d1");
    }

    #[test]
    fn test_object_deserialization_validates() {
        let ok = serde_json::json!({
            "resource": {"name": "u1", "type": "user"},
            "selector": "u1"
        });
        let object: Object = serde_json::from_value(ok).unwrap();
        assert_eq!(object.selector().as_str(), "u1");

        let bad = serde_json::json!({
            "resource": {"name": "dashboard", "type": "metaresources"},
            "selector": "d1"
        });
        assert!(serde_json::from_value::<Object>(bad).is_err());
    }

    #[test]
    fn test_object_serialization_shape() {
        let object = Object::new(resource(Type::User, "u1"), Selector::new(Type::User, "u1").unwrap()).unwrap();
        let json = serde_json::to_value(&object).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"resource": {"name": "u1", "type": "user"}, "selector": "u1"})
        );
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        let result = new_patchable_objects(&[], &[], Relation::Read);
        assert!(matches!(result, Err(AuthzError::InvalidPatchObject(_))));
    }

    #[test]
    fn test_patch_rejects_untypeable_relation_on_either_side() {
        let roles = GettableObjects::new(resource(Type::Role, "r1"), selectors(Type::Role, &["s1"]));
        let users = GettableObjects::new(resource(Type::User, "u1"), selectors(Type::User, &["u1"]));

        let result = new_patchable_objects(&[roles.clone()], &[users.clone()], Relation::Assignee);
        assert!(matches!(result, Err(AuthzError::InvalidRelation(_))));

        let result = new_patchable_objects(&[users], &[roles], Relation::Assignee);
        assert!(matches!(result, Err(AuthzError::InvalidRelation(_))));
    }

    #[test]
    fn test_patch_flattens_groups() {
        let additions = vec![
            GettableObjects::new(resource(Type::Role, "r1"), selectors(Type::Role, &["s1", "s2"])),
            GettableObjects::new(resource(Type::Role, "r2"), selectors(Type::Role, &["s3"])),
        ];
        let deletions = vec![GettableObjects::new(
            resource(Type::Role, "r3"),
            selectors(Type::Role, &["*"]),
        )];

        let diff = new_patchable_objects(&additions, &deletions, Relation::Read).unwrap();
        assert_eq!(diff.additions.len(), 3);
        assert_eq!(diff.deletions.len(), 1);
        assert_eq!(diff.len(), 4);
        assert_eq!(diff.additions[1].selector().as_str(), "s2");
        assert_eq!(diff.additions[2].resource().name.as_str(), "r2");
    }

    #[test]
    fn test_patch_rejects_selector_invalid_for_type() {
        // raw selectors can arrive from the wire without their type's grammar
        let groups: Vec<GettableObjects> = serde_json::from_value(serde_json::json!([
            {"resource": {"name": "dashboard", "type": "metaresources"}, "selectors": ["d1"]}
        ]))
        .unwrap();

        let result = new_patchable_objects(&groups, &[], Relation::List);
        assert!(matches!(result, Err(AuthzError::InvalidSelector(_))));
    }

    #[test]
    fn test_group_objects_orders_and_dedups() {
        let r1 = resource(Type::Role, "r1");
        let r2 = resource(Type::Role, "r2");
        let object = |r: &Resource, s: &str| Object::new(r.clone(), Selector::new(Type::Role, s).unwrap()).unwrap();

        let objects = vec![
            object(&r2, "b"),
            object(&r1, "a"),
            object(&r2, "a"),
            object(&r2, "b"),
        ];

        let groups = group_objects(&objects);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].resource, r2);
        assert_eq!(groups[0].selectors, selectors(Type::Role, &["b", "a"]));
        assert_eq!(groups[1].resource, r1);
        assert_eq!(groups[1].selectors, selectors(Type::Role, &["a"]));
    }

    #[test]
    fn test_group_objects_keys_on_type_and_name() {
        let objects = vec![
            Object::must_from_str("metaresource:organization/*/dashboard/*"),
            Object::must_from_str("metaresources:organization/*/dashboard/*"),
        ];
        assert_eq!(group_objects(&objects).len(), 2);
    }

    #[test]
    fn test_decode_patchable_objects_accepts_null_sides() {
        let patch = decode_patchable_objects(
            br#"{"additions": [{"resource": {"name": "r1", "type": "role"}, "selectors": ["s1"]}], "deletions": null}"#,
        )
        .unwrap();
        assert_eq!(patch.additions.len(), 1);
        assert!(patch.deletions.is_empty());

        let patch = decode_patchable_objects(br#"{}"#).unwrap();
        assert!(patch.is_empty());

        assert!(matches!(
            decode_patchable_objects(b"{not json"),
            Err(AuthzError::InvalidPayload(_))
        ));
    }
}
