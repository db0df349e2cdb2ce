use pretty_assertions::assert_eq;
use questsmith_flags::{FlagDefinition, FlagUniverse};
use questsmith_form::{EditSession, FieldGroup, FieldSpec, FieldViolation, FormError, FormSchema, Kind};
use serde_json::json;
use std::sync::Arc;

fn schema() -> Arc<FormSchema> {
    Arc::new(FormSchema {
        fields: vec![
            FieldSpec::required("name"),
            FieldSpec::optional("level"),
            FieldSpec::required("damageType"),
            FieldSpec::optional("minDamage").with_range(1.0, 50.0),
            FieldSpec::optional("maxDamage").with_range(1.0, 100.0),
            FieldSpec::optional("armourType"),
        ],
        groups: vec![
            FieldGroup::new("armour", &["armourType"], &[0]),
            FieldGroup::new("weapon", &["damageType", "minDamage", "maxDamage"], &[11]),
        ],
        universes: vec![
            FlagUniverse::new(
                "item",
                vec![
                    FlagDefinition::new("Glow", 1),
                    FlagDefinition::new("Hum", 2),
                    FlagDefinition::new("Invisible", 4),
                ],
            )
            .unwrap(),
        ],
    })
}

// ── values ───────────────────────────────────────────────────────

#[test]
fn new_sessions_have_distinct_ids() {
    let a = EditSession::new(schema());
    let b = EditSession::new(schema());
    assert_ne!(a.id(), b.id());
}

#[test]
fn set_value_rejects_unknown_field() {
    let mut s = EditSession::new(schema());
    assert!(matches!(
        s.set_value("colour", "red"),
        Err(FormError::UnknownField(f)) if f == "colour"
    ));
}

#[test]
fn values_survive_group_deactivation() {
    let mut s = EditSession::new(schema());
    s.set_kind(Some(Kind(11)));
    s.set_value("minDamage", 4).unwrap();

    s.set_kind(Some(Kind(0)));
    assert_eq!(s.enabled_value("minDamage"), None);
    assert_eq!(s.value("minDamage"), Some(&json!(4)));

    s.set_kind(Some(Kind(11)));
    assert_eq!(s.enabled_value("minDamage"), Some(&json!(4)));
}

#[test]
fn clear_value_removes_it() {
    let mut s = EditSession::new(schema());
    s.set_value("name", "Lantern").unwrap();
    assert_eq!(s.clear_value("name"), Some(json!("Lantern")));
    assert_eq!(s.value("name"), None);
}

// ── flags ────────────────────────────────────────────────────────

#[test]
fn toggle_flags_through_session() {
    let mut s = EditSession::new(schema());
    assert!(s.toggle_flag("item", "Glow").unwrap());
    assert!(s.toggle_flag("item", "Invisible").unwrap());
    assert_eq!(s.flag_value("item").unwrap(), 5);

    assert!(!s.toggle_flag("item", "Glow").unwrap());
    assert_eq!(s.flag_value("item").unwrap(), 4);
}

#[test]
fn toggle_unknown_flag_or_universe_fails() {
    let mut s = EditSession::new(schema());
    assert!(matches!(s.toggle_flag("item", "Sparkle"), Err(FormError::Flag(_))));
    assert!(matches!(
        s.toggle_flag("status", "Glow"),
        Err(FormError::UnknownUniverse(_))
    ));
    assert_eq!(s.flag_value("item").unwrap(), 0);
}

#[test]
fn load_flags_decodes_existing_record() {
    let mut s = EditSession::new(schema());
    s.load_flags("item", 6).unwrap();
    assert_eq!(s.flags("item").unwrap().names(), vec!["Hum", "Invisible"]);

    // Bit 8 is unknown to the universe and gets dropped.
    s.load_flags("item", 9).unwrap();
    assert_eq!(s.flag_value("item").unwrap(), 1);
}

// ── validation ───────────────────────────────────────────────────

#[test]
fn disabled_required_fields_are_not_validated() {
    let mut s = EditSession::new(schema());
    s.set_value("name", "Shield").unwrap();
    s.set_kind(Some(Kind(0)));
    assert!(s.validate().is_ok());
}

#[test]
fn enabled_required_field_must_be_present() {
    let mut s = EditSession::new(schema());
    s.set_value("name", "  ").unwrap();
    s.set_kind(Some(Kind(11)));

    let errors = s.validate().unwrap_err();
    assert_eq!(errors.invalid_fields(), vec!["name", "damageType"]);
}

#[test]
fn numeric_ranges_are_enforced() {
    let mut s = EditSession::new(schema());
    s.set_kind(Some(Kind(11)));
    s.set_value("name", "Sword").unwrap();
    s.set_value("damageType", 3).unwrap();
    s.set_value("minDamage", 0).unwrap();
    s.set_value("maxDamage", "120").unwrap();

    let errors = s.validate().unwrap_err();
    assert_eq!(
        errors.violations,
        vec![
            FieldViolation::BelowMinimum {
                field: "minDamage".into(),
                min: 1.0,
                actual: 0.0,
            },
            FieldViolation::AboveMaximum {
                field: "maxDamage".into(),
                max: 100.0,
                actual: 120.0,
            },
        ]
    );
}

#[test]
fn non_numeric_ranged_value_is_rejected() {
    let mut s = EditSession::new(schema());
    s.set_kind(Some(Kind(11)));
    s.set_value("name", "Sword").unwrap();
    s.set_value("damageType", 3).unwrap();
    s.set_value("minDamage", "sharp").unwrap();

    let errors = s.validate().unwrap_err();
    assert_eq!(
        errors.violations,
        vec![FieldViolation::NotANumber { field: "minDamage".into() }]
    );
    assert!(errors.to_string().contains("minDamage must be a number"));
}

#[test]
fn non_finite_ranged_values_are_rejected() {
    for input in ["NaN", "inf", "-infinity"] {
        let mut s = EditSession::new(schema());
        s.set_kind(Some(Kind(11)));
        s.set_value("name", "Sword").unwrap();
        s.set_value("damageType", 3).unwrap();
        s.set_value("minDamage", input).unwrap();

        let errors = s.validate().unwrap_err();
        assert_eq!(
            errors.violations,
            vec![FieldViolation::NotANumber { field: "minDamage".into() }],
            "input {input}"
        );
        assert!(s.submit().is_err());
    }
}

// ── submit ───────────────────────────────────────────────────────

#[test]
fn submit_includes_only_enabled_fields_and_flags() {
    let mut s = EditSession::new(schema());
    s.set_value("name", "Glowing Sword").unwrap();
    s.set_value("armourType", 2).unwrap();
    s.set_value("damageType", 1).unwrap();
    s.set_value("minDamage", 2).unwrap();
    s.set_value("maxDamage", 8).unwrap();
    s.set_kind(Some(Kind(11)));
    s.toggle_flag("item", "Glow").unwrap();
    s.toggle_flag("item", "Invisible").unwrap();

    let record = s.submit().unwrap();
    assert_eq!(
        record,
        json!({
            "name": "Glowing Sword",
            "damageType": 1,
            "minDamage": 2,
            "maxDamage": 8,
            "kind": 11,
            "flags": { "item": 5 }
        })
    );
}

#[test]
fn submit_without_kind_has_no_kind_key() {
    let mut s = EditSession::new(schema());
    s.set_value("name", "Rock").unwrap();
    let record = s.submit().unwrap();
    assert_eq!(record, json!({ "name": "Rock", "flags": { "item": 0 } }));
}

#[test]
fn submit_fails_on_invalid_session() {
    let s = EditSession::new(schema());
    assert!(matches!(s.submit(), Err(FormError::Validation(_))));
}
