use pretty_assertions::assert_eq;
use questsmith_flags::{FlagDefinition, FlagSet, FlagUniverse, has_flag};

fn lights() -> FlagUniverse {
    FlagUniverse::new(
        "item",
        vec![
            FlagDefinition::new("Glow", 1),
            FlagDefinition::new("Hum", 2),
            FlagDefinition::new("Invisible", 4),
        ],
    )
    .unwrap()
}

// ── toggle / is_set ──────────────────────────────────────────────

#[test]
fn new_set_is_empty_and_encodes_to_zero() {
    let set = FlagSet::new();
    assert!(set.is_empty());
    assert_eq!(set.to_integer(), 0);
}

#[test]
fn toggle_adds_then_removes() {
    let u = lights();
    let glow = u.get("Glow").unwrap();
    let mut set = FlagSet::new();

    assert!(set.toggle(glow));
    assert!(set.is_set(glow));
    assert!(!set.toggle(glow));
    assert!(!set.is_set(glow));
    assert!(set.is_empty());
}

#[test]
fn toggles_are_independent() {
    let u = lights();
    let mut set = FlagSet::new();
    set.toggle(u.get("Glow").unwrap());
    set.toggle(u.get("Hum").unwrap());
    set.toggle(u.get("Glow").unwrap());

    assert_eq!(set.names(), vec!["Hum"]);
}

#[test]
fn toggle_sentinel_is_noop() {
    let u = FlagUniverse::from_names("status", &["None", "Standing", "Sleeping"]).unwrap();
    let none = u.get("None").unwrap();
    let mut set = FlagSet::new();

    assert!(!set.toggle(none));
    assert!(set.is_empty());
}

#[test]
fn iteration_follows_selection_order() {
    let u = lights();
    let mut set = FlagSet::new();
    set.toggle(u.get("Invisible").unwrap());
    set.toggle(u.get("Glow").unwrap());

    assert_eq!(set.names(), vec!["Invisible", "Glow"]);
}

// ── encoding ─────────────────────────────────────────────────────

#[test]
fn glow_and_invisible_encode_to_five() {
    let u = lights();
    let mut set = FlagSet::new();
    set.toggle(u.get("Glow").unwrap());
    set.toggle(u.get("Invisible").unwrap());

    assert_eq!(set.to_integer(), 5);
}

#[test]
fn five_decodes_to_glow_and_invisible() {
    let u = lights();
    let set = FlagSet::from_integer(5, &u);

    assert_eq!(set.names(), vec!["Glow", "Invisible"]);
    assert!(set.is_set(u.get("Glow").unwrap()));
    assert!(!set.is_set(u.get("Hum").unwrap()));
}

#[test]
fn from_integer_drops_uncovered_bits() {
    let u = lights();
    let set = FlagSet::from_integer(0b1010, &u);
    assert_eq!(set.names(), vec!["Hum"]);
    assert_eq!(set.to_integer(), 2);
}

#[test]
fn from_integer_accepts_plain_slices() {
    let defs = vec![FlagDefinition::new("A", 1), FlagDefinition::new("B", 8)];
    let set = FlagSet::from_integer(9, &defs);
    assert_eq!(set.len(), 2);
}

// ── equality ─────────────────────────────────────────────────────

#[test]
fn equality_ignores_order() {
    let u = lights();
    let mut a = FlagSet::new();
    a.toggle(u.get("Hum").unwrap());
    a.toggle(u.get("Glow").unwrap());

    let mut b = FlagSet::new();
    b.toggle(u.get("Glow").unwrap());
    b.toggle(u.get("Hum").unwrap());

    assert_eq!(a, b);
}

#[test]
fn sets_with_different_members_differ() {
    let u = lights();
    let mut a = FlagSet::new();
    a.toggle(u.get("Hum").unwrap());
    let mut b = FlagSet::new();
    b.toggle(u.get("Glow").unwrap());

    assert_ne!(a, b);
}

#[test]
fn from_iterator_deduplicates() {
    let u = lights();
    let glow = u.get("Glow").unwrap();
    let set: FlagSet = [glow, glow, u.get("Hum").unwrap()].into_iter().collect();
    assert_eq!(set.len(), 2);
    assert_eq!(set.to_integer(), 3);
}

#[test]
fn clear_empties_the_set() {
    let u = lights();
    let mut set = FlagSet::from_integer(7, &u);
    set.clear();
    assert!(set.is_empty());
}

#[test]
fn serializes_as_definition_list() {
    let u = lights();
    let set = FlagSet::from_integer(2, &u);
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, r#"[{"name":"Hum","value":2}]"#);

    let parsed: FlagSet = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, set);
}

#[test]
fn deserializing_collapses_duplicates_and_sentinels() {
    let u = lights();
    let glow = u.get("Glow").unwrap();
    let json = r#"[
        {"name":"None","value":0},
        {"name":"Glow","value":1},
        {"name":"Glow","value":1},
        {"name":"Hum","value":2}
    ]"#;

    let mut parsed: FlagSet = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.names(), vec!["Glow", "Hum"]);
    assert_eq!(parsed.to_integer(), 3);

    let expected = FlagSet::from_integer(3, &u);
    assert_eq!(parsed, expected);
    assert_eq!(expected, parsed);

    // A single toggle fully removes the flag.
    assert!(!parsed.toggle(glow));
    assert!(!parsed.is_set(glow));
    assert_eq!(parsed.len(), 1);
    assert!(parsed.toggle(glow));
    assert_eq!(parsed.len(), 2);
}

#[test]
fn deserializing_only_a_sentinel_gives_empty_set() {
    let parsed: FlagSet = serde_json::from_str(r#"[{"name":"None","value":0}]"#).unwrap();
    assert!(parsed.is_empty());
    assert_eq!(parsed.to_integer(), 0);
}

#[test]
fn has_flag_tests_bits() {
    assert!(has_flag(5, 4));
    assert!(!has_flag(5, 2));
    assert!(!has_flag(5, 0));
}
