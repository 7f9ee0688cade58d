//! Property tests for object grouping and the canonical object string

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use auth_rebac::*;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

fn arb_role_group() -> impl Strategy<Value = GettableObjects> {
    (
        "[a-z][a-z0-9-]{0,8}",
        prop::collection::vec("[a-z][a-z0-9_-]{0,8}", 1..6),
    )
        .prop_map(|(name, selectors)| {
            GettableObjects::new(
                Resource::new(Type::Role, Name::new(name).unwrap()),
                selectors
                    .into_iter()
                    .map(|s| Selector::new(Type::Role, s).unwrap())
                    .collect(),
            )
        })
}

fn arb_dashboard() -> impl Strategy<Value = Object> {
    prop::collection::vec("[a-z0-9][a-z0-9-]{0,6}", 1..4).prop_map(|segments| {
        Object::new(
            Resource::new(Type::MetaResource, Name::new("dashboard").unwrap()),
            Selector::new(Type::MetaResource, segments.join(".")).unwrap(),
        )
        .unwrap()
    })
}

fn as_map(groups: &[GettableObjects]) -> BTreeMap<Resource, BTreeSet<Selector>> {
    let mut map: BTreeMap<Resource, BTreeSet<Selector>> = BTreeMap::new();
    for group in groups {
        map.entry(group.resource.clone())
            .or_default()
            .extend(group.selectors.iter().cloned());
    }
    map
}

proptest! {
    /// Flattening grouped objects and grouping them again keeps the same
    /// resource to selector-set mapping
    #[test]
    fn grouping_round_trip(groups in prop::collection::vec(arb_role_group(), 1..6)) {
        let diff = new_patchable_objects(&groups, &[], Relation::Assignee).unwrap();
        let expected: usize = groups.iter().map(|g| g.selectors.len()).sum();
        prop_assert_eq!(diff.additions.len(), expected);

        let regrouped = group_objects(&diff.additions);
        prop_assert_eq!(as_map(&regrouped), as_map(&groups));

        // grouping is canonical: each resource appears once, without repeats
        let resources: BTreeSet<&Resource> = regrouped.iter().map(|g| &g.resource).collect();
        prop_assert_eq!(resources.len(), regrouped.len());
        for group in &regrouped {
            let unique: BTreeSet<&Selector> = group.selectors.iter().collect();
            prop_assert_eq!(unique.len(), group.selectors.len());
        }
    }

    /// Every object renders to a string that parses back to the same object
    #[test]
    fn encoded_objects_parse_back(object in arb_dashboard(), org in any::<u128>()) {
        let encoded = object.encode(Uuid::from_u128(org));
        prop_assert_eq!(encoded.parse::<Object>().unwrap(), object);
    }

    /// A subtree selector covers exactly the paths below its prefix
    #[test]
    fn subtree_covers_children(prefix in "[a-z0-9]{1,6}", child in "[a-z0-9]{1,6}") {
        let subtree = Selector::new(Type::MetaResource, format!("{prefix}.*")).unwrap();
        let below = Selector::new(Type::MetaResource, format!("{prefix}.{child}")).unwrap();
        let root = Selector::new(Type::MetaResource, prefix.clone()).unwrap();

        prop_assert!(subtree.covers(&below));
        prop_assert!(!subtree.covers(&root));
        prop_assert!(Selector::wildcard().covers(&below));
    }
}
