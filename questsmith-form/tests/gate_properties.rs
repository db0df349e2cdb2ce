//! Property tests for kind gating.

use proptest::prelude::*;
use questsmith_form::{FieldGroup, FieldSpec, FormSchema, Kind, TypeGatedForm};
use std::sync::Arc;

/// Builds a schema with `n` groups, each owning one field and a disjoint
/// band of kinds `[i * 10, i * 10 + 10)`.
fn disjoint_schema(n: usize) -> Arc<FormSchema> {
    let fields = (0..n)
        .map(|i| FieldSpec::optional(&format!("field{i}")))
        .collect();
    let groups = (0..n)
        .map(|i| {
            let field = format!("field{i}");
            let kinds: Vec<i64> = (0..10).map(|k| (i as i64) * 10 + k).collect();
            FieldGroup::new(&format!("group{i}"), &[field.as_str()], &kinds)
        })
        .collect();
    let schema = FormSchema {
        fields,
        groups,
        universes: vec![],
    };
    schema.validate().unwrap();
    Arc::new(schema)
}

proptest! {
    /// With disjoint predicates, at most one group is active after any kind.
    #[test]
    fn at_most_one_group_active(n in 1usize..12, kinds in prop::collection::vec(-20i64..150, 1..20)) {
        let mut form = TypeGatedForm::new(disjoint_schema(n));
        for k in kinds {
            form.set_kind(Some(Kind(k)));
            prop_assert!(form.active_groups().len() <= 1);
        }
    }

    /// The active group is determined only by the last kind selected.
    #[test]
    fn last_kind_wins(n in 1usize..12, first in 0i64..120, last in 0i64..120) {
        let schema = disjoint_schema(n);
        let mut a = TypeGatedForm::new(schema.clone());
        a.set_kind(Some(Kind(first)));
        a.set_kind(Some(Kind(last)));

        let mut b = TypeGatedForm::new(schema);
        b.set_kind(Some(Kind(last)));

        prop_assert_eq!(a.active_groups(), b.active_groups());
        prop_assert_eq!(a.active_fields(), b.active_fields());
    }
}
