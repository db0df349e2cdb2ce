use pretty_assertions::assert_eq;
use questsmith_form::{FieldGroup, FieldSpec, FormSchema, Kind, TypeGatedForm};
use std::collections::BTreeSet;
use std::sync::Arc;

const WEAPON_FIELDS: [&str; 5] = ["weaponType", "attackType", "damageType", "minDamage", "maxDamage"];

fn item_like_schema() -> Arc<FormSchema> {
    let mut fields = vec![FieldSpec::required("name"), FieldSpec::optional("level")];
    fields.extend(
        ["armourType", "pageCount", "containerSize"]
            .into_iter()
            .chain(WEAPON_FIELDS)
            .map(FieldSpec::optional),
    );
    Arc::new(FormSchema {
        fields,
        groups: vec![
            FieldGroup::new("armour", &["armourType"], &[0]),
            FieldGroup::new("book", &["pageCount"], &[1]),
            FieldGroup::new("container", &["containerSize"], &[2]),
            FieldGroup::new("weapon", &WEAPON_FIELDS, &[11]),
        ],
        universes: vec![],
    })
}

// ── initial state ────────────────────────────────────────────────

#[test]
fn starts_with_no_kind_and_no_active_groups() {
    let form = TypeGatedForm::new(item_like_schema());
    assert_eq!(form.kind(), None);
    assert!(form.active_groups().is_empty());
    assert!(form.active_fields().is_empty());
    assert_eq!(form.enabled_fields(), vec!["name", "level"]);
}

// ── kind selection ───────────────────────────────────────────────

#[test]
fn weapon_kind_activates_weapon_fields_only() {
    let mut form = TypeGatedForm::new(item_like_schema());
    form.set_kind(Some(Kind(11)));

    assert!(form.is_group_active("weapon"));
    assert!(!form.is_group_active("armour"));
    assert!(!form.is_group_active("book"));
    assert!(!form.is_group_active("container"));

    let expected: BTreeSet<&str> = WEAPON_FIELDS.into_iter().collect();
    assert_eq!(form.active_fields(), expected);
}

#[test]
fn unrecognised_kind_leaves_nothing_active() {
    let mut form = TypeGatedForm::new(item_like_schema());
    form.set_kind(Some(Kind(11)));
    form.set_kind(Some(Kind(999)));

    assert_eq!(form.kind(), Some(Kind(999)));
    assert!(form.active_fields().is_empty());
    assert!(form.active_groups().is_empty());
}

#[test]
fn switching_kind_deactivates_previous_group() {
    let mut form = TypeGatedForm::new(item_like_schema());
    form.set_kind(Some(Kind(0)));
    assert_eq!(form.active_groups(), vec!["armour"]);

    form.set_kind(Some(Kind(1)));
    assert_eq!(form.active_groups(), vec!["book"]);
    assert!(!form.is_field_enabled("armourType"));
    assert!(form.is_field_enabled("pageCount"));
}

#[test]
fn empty_selection_keeps_previous_state() {
    let mut form = TypeGatedForm::new(item_like_schema());
    form.set_kind(Some(Kind(2)));
    form.set_kind(None);

    assert_eq!(form.kind(), Some(Kind(2)));
    assert_eq!(form.active_groups(), vec!["container"]);
}

#[test]
fn enabled_fields_combine_base_and_active() {
    let mut form = TypeGatedForm::new(item_like_schema());
    form.set_kind(Some(Kind(2)));
    assert_eq!(form.enabled_fields(), vec!["name", "level", "containerSize"]);
}

#[test]
fn unknown_group_is_inactive() {
    let mut form = TypeGatedForm::new(item_like_schema());
    form.set_kind(Some(Kind(0)));
    assert!(!form.is_group_active("nonexistent"));
}
