//! Skill and spell schema, flag universes and records.

use questsmith_flags::{FlagDefinition, FlagUniverse};
use questsmith_form::{FieldSpec, FormSchema};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

/// Character states a skill may be used from, in enum order.
///
/// Values are generated by shifting the index, so the first entry is the
/// zero sentinel.
pub const STATUS_FLAGS: &[&str] = &[
    "None",
    "Standing",
    "Sitting",
    "Sleeping",
    "Resting",
    "Fighting",
    "Stunned",
    "Incapacitated",
    "Dead",
    "Ghost",
    "Busy",
    "Floating",
    "Mounted",
    "Fleeing",
];

/// Who or what a skill may target.
pub const TARGET_FLAGS: &[(&str, u64)] = &[
    ("TargetIgnore", 0),
    ("TargetSelfOnly", 1 << 0),
    ("TargetPlayerRoom", 1 << 1),
    ("TargetPlayerWorld", 1 << 2),
    ("TargetFightSelf", 1 << 3),
    ("TargetFightVictim", 1 << 4),
    ("TargetObjectInventory", 1 << 5),
    ("TargetObjectRoom", 1 << 6),
    ("TargetObjectWorld", 1 << 7),
    ("TargetObjectEquipped", 1 << 8),
];

pub(crate) const STATUS_UNIVERSE: &str = "status";
pub(crate) const TARGET_UNIVERSE: &str = "target";

pub(crate) const NAME: &str = "name";
pub(crate) const DESCRIPTION: &str = "description";
pub(crate) const DICE_ROLL: &str = "diceRoll";
pub(crate) const DICE_MAX_SIZE: &str = "diceMaxSize";
pub(crate) const ROUNDS: &str = "rounds";
pub(crate) const COST_TYPE: &str = "costType";
pub(crate) const COST_VALUE: &str = "costValue";
pub(crate) const SKILL_TYPE: &str = "skillType";

pub fn status_flags() -> &'static FlagUniverse {
    static FLAGS: OnceLock<FlagUniverse> = OnceLock::new();
    FLAGS.get_or_init(|| {
        FlagUniverse::from_names(STATUS_UNIVERSE, STATUS_FLAGS)
            .expect("built-in status flags are valid")
    })
}

pub fn target_flags() -> &'static FlagUniverse {
    static FLAGS: OnceLock<FlagUniverse> = OnceLock::new();
    FLAGS.get_or_init(|| {
        let defs = TARGET_FLAGS
            .iter()
            .map(|(name, value)| FlagDefinition::new(*name, *value))
            .collect();
        FlagUniverse::new(TARGET_UNIVERSE, defs).expect("built-in target flags are valid")
    })
}

/// The built-in skill/spell editor schema. Skills have no kind-gated
/// sections; their flags live in the `status` and `target` universes.
pub fn skill_schema() -> Arc<FormSchema> {
    static SCHEMA: OnceLock<Arc<FormSchema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            Arc::new(FormSchema {
                fields: vec![
                    FieldSpec::required(NAME),
                    FieldSpec::required(DESCRIPTION),
                    FieldSpec::required(DICE_ROLL).with_range(1.0, 100.0),
                    FieldSpec::required(DICE_MAX_SIZE).with_range(1.0, 100.0),
                    FieldSpec::required(ROUNDS).with_range(1.0, 100.0),
                    FieldSpec::required(COST_TYPE),
                    FieldSpec::required(COST_VALUE).with_range(0.0, 1000.0),
                    FieldSpec::optional(SKILL_TYPE),
                ],
                groups: vec![],
                universes: vec![status_flags().clone(), target_flags().clone()],
            })
        })
        .clone()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillType {
    #[default]
    Affect,
    Damage,
    Heal,
    Utility,
}

impl SkillType {
    /// The serialized name, as accepted in the `skillType` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Affect => "affect",
            Self::Damage => "damage",
            Self::Heal => "heal",
            Self::Utility => "utility",
        }
    }
}

/// Which resource a skill spends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CostType {
    HitPoints,
    Mana,
    Moves,
}

impl CostType {
    /// The serialized name, as accepted in the `costType` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HitPoints => "hitPoints",
            Self::Mana => "mana",
            Self::Moves => "moves",
        }
    }
}

/// The stat an effect modifies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectLocation {
    #[default]
    None,
    Strength,
    Dexterity,
    Constitution,
    Wisdom,
    Intelligence,
    Charisma,
    Hitpoints,
    Mana,
    Moves,
    Armour,
    HitRoll,
    DamageRoll,
    SavingSpell,
}

impl EffectLocation {
    pub const ALL: [EffectLocation; 14] = [
        Self::None,
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Wisdom,
        Self::Intelligence,
        Self::Charisma,
        Self::Hitpoints,
        Self::Mana,
        Self::Moves,
        Self::Armour,
        Self::HitRoll,
        Self::DamageRoll,
        Self::SavingSpell,
    ];

    /// The integer the game server uses for this location.
    pub fn value(self) -> i64 {
        Self::ALL.iter().position(|&l| l == self).unwrap_or(0) as i64
    }
}

/// A timed modifier a skill applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    pub name: String,
    pub duration: i64,
    pub modifier: i64,
    /// Whether repeated casts stack.
    pub accumulate: bool,
    pub location: EffectLocation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDamage {
    pub dice_roll: i64,
    pub dice_min_size: i64,
    pub dice_max_size: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCost {
    pub hit_points: i64,
    pub mana: i64,
    pub moves: i64,
}

/// A complete skill or spell, ready to be posted to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub damage: SkillDamage,
    pub cost: SkillCost,
    pub effects: Vec<Effect>,
    pub rounds: i64,
    #[serde(rename = "type")]
    pub skill_type: SkillType,
    /// Packed `status` flags.
    pub usable_from_status: u64,
    /// Packed `target` flags.
    pub valid_targets: u64,
}
