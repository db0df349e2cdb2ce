//! Item kinds, the item flag universe and the built-in item schema.

use crate::ContentError;
use questsmith_flags::{FlagDefinition, FlagUniverse};
use questsmith_form::{FieldGroup, FieldSpec, FormSchema, Kind};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Item subtypes as stored in `itemType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Armour,
    Book,
    Container,
    Drink,
    Food,
    Forage,
    Key,
    Light,
    LockPick,
    Potion,
    Crafting,
    Weapon,
}

impl ItemKind {
    pub const ALL: [ItemKind; 12] = [
        Self::Armour,
        Self::Book,
        Self::Container,
        Self::Drink,
        Self::Food,
        Self::Forage,
        Self::Key,
        Self::Light,
        Self::LockPick,
        Self::Potion,
        Self::Crafting,
        Self::Weapon,
    ];

    /// The integer the game server uses for this kind.
    pub const fn id(self) -> i64 {
        match self {
            Self::Armour => 0,
            Self::Book => 1,
            Self::Container => 2,
            Self::Drink => 3,
            Self::Food => 4,
            Self::Forage => 5,
            Self::Key => 6,
            Self::Light => 7,
            Self::LockPick => 8,
            Self::Potion => 9,
            Self::Crafting => 10,
            Self::Weapon => 11,
        }
    }

    pub fn kind(self) -> Kind {
        Kind(self.id())
    }
}

impl From<ItemKind> for Kind {
    fn from(kind: ItemKind) -> Self {
        kind.kind()
    }
}

impl TryFrom<Kind> for ItemKind {
    type Error = ContentError;

    fn try_from(kind: Kind) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|k| k.id() == kind.0)
            .ok_or(ContentError::UnknownItemKind(kind.0))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Item flags and their bits.
pub const ITEM_FLAGS: &[(&str, u64)] = &[
    ("Glow", 1 << 0),
    ("Hum", 1 << 1),
    ("Invisible", 1 << 2),
    ("Magic", 1 << 3),
    ("NoDrop", 1 << 4),
    ("Bless", 1 << 5),
    ("AntiGood", 1 << 6),
    ("AntiEvil", 1 << 7),
    ("AntiNeutral", 1 << 8),
    ("NoRemove", 1 << 9),
    ("Inventory", 1 << 10),
    ("NoPurge", 1 << 11),
    ("RotDeath", 1 << 12),
    ("VisDeath", 1 << 13),
    ("NoLocate", 1 << 14),
    ("Cursed", 1 << 15),
];

// Field ids, as used by the API's form contract.
pub(crate) const NAME: &str = "name";
pub(crate) const ID: &str = "id";
pub(crate) const KNOWN_BY_NAME: &str = "knownByName";
pub(crate) const SLOT: &str = "itemSlotType";
pub(crate) const LEVEL: &str = "level";
pub(crate) const WEAPON_TYPE: &str = "weaponType";
pub(crate) const ATTACK_TYPE: &str = "attackType";
pub(crate) const DAMAGE_TYPE: &str = "damageType";
pub(crate) const MIN_DAMAGE: &str = "minDamage";
pub(crate) const MAX_DAMAGE: &str = "maxDamage";
pub(crate) const ARMOUR_TYPE: &str = "armourType";
pub(crate) const AC_PIERCE: &str = "acPierce";
pub(crate) const AC_BASH: &str = "acBash";
pub(crate) const AC_SLASH: &str = "acSlash";
pub(crate) const AC_MAGIC: &str = "acMagic";
pub(crate) const HIT_ROLL: &str = "hitRoll";
pub(crate) const DAM_ROLL: &str = "damRoll";
pub(crate) const SAVES: &str = "saves";
pub(crate) const HP_MOD: &str = "hpMod";
pub(crate) const MANA_MOD: &str = "manaMod";
pub(crate) const MOVES_MOD: &str = "movesMod";
pub(crate) const SPELL_MOD: &str = "spellMod";
pub(crate) const PAGE_COUNT: &str = "pageCount";
pub(crate) const LOOK: &str = "lookDescription";
pub(crate) const ROOM: &str = "roomDescription";
pub(crate) const EXAM: &str = "examDescription";
pub(crate) const SMELL: &str = "smellDescription";
pub(crate) const TOUCH: &str = "touchDescription";
pub(crate) const TASTE: &str = "tasteDescription";
pub(crate) const CONTAINER_SIZE: &str = "containerSize";
pub(crate) const CONTAINER_GP: &str = "containerGP";
pub(crate) const CONTAINER_CAN_OPEN: &str = "containerCanOpen";
pub(crate) const CONTAINER_OPEN: &str = "containerOpen";
pub(crate) const CONTAINER_CAN_LOCK: &str = "containerCanLock";
pub(crate) const CONTAINER_LOCKED: &str = "containerLocked";
pub(crate) const LOCK_STRENGTH: &str = "lockStrength";
pub(crate) const CONTAINER_KEY: &str = "containerKey";

pub(crate) const ITEM_UNIVERSE: &str = "item";

/// The item flag universe.
pub fn item_flags() -> &'static FlagUniverse {
    static FLAGS: OnceLock<FlagUniverse> = OnceLock::new();
    FLAGS.get_or_init(|| {
        let defs = ITEM_FLAGS
            .iter()
            .map(|(name, value)| FlagDefinition::new(*name, *value))
            .collect();
        FlagUniverse::new(ITEM_UNIVERSE, defs).expect("built-in item flags are valid")
    })
}

/// The built-in item editor schema.
///
/// Armour, weapon, book and container sections are gated by kind; every
/// other field is always live.
pub fn item_schema() -> Arc<FormSchema> {
    static SCHEMA: OnceLock<Arc<FormSchema>> = OnceLock::new();
    SCHEMA.get_or_init(|| Arc::new(build_item_schema())).clone()
}

fn build_item_schema() -> FormSchema {
    let optional = [
        ID, KNOWN_BY_NAME, SLOT, LEVEL, WEAPON_TYPE, ATTACK_TYPE, ARMOUR_TYPE, AC_PIERCE,
        AC_BASH, AC_SLASH, AC_MAGIC, HIT_ROLL, DAM_ROLL, SAVES, HP_MOD, MANA_MOD, MOVES_MOD,
        SPELL_MOD, ROOM, EXAM, SMELL, TOUCH, TASTE, CONTAINER_SIZE, CONTAINER_GP,
        CONTAINER_CAN_OPEN, CONTAINER_OPEN, CONTAINER_CAN_LOCK, CONTAINER_LOCKED, LOCK_STRENGTH,
        CONTAINER_KEY,
    ];

    let mut fields = vec![
        FieldSpec::required(NAME),
        FieldSpec::required(LOOK),
        FieldSpec::required(DAMAGE_TYPE),
        FieldSpec::optional(MIN_DAMAGE).with_range(1.0, 50.0),
        FieldSpec::optional(MAX_DAMAGE).with_range(1.0, 100.0),
        FieldSpec::optional(PAGE_COUNT).with_range(1.0, 500.0),
    ];
    fields.extend(optional.into_iter().map(FieldSpec::optional));

    let schema = FormSchema {
        fields,
        groups: vec![
            FieldGroup::new(
                "armour",
                &[ARMOUR_TYPE, AC_PIERCE, AC_BASH, AC_SLASH, AC_MAGIC],
                &[ItemKind::Armour.id()],
            ),
            FieldGroup::new(
                "weapon",
                &[WEAPON_TYPE, ATTACK_TYPE, DAMAGE_TYPE, MIN_DAMAGE, MAX_DAMAGE],
                &[ItemKind::Weapon.id()],
            ),
            FieldGroup::new("book", &[PAGE_COUNT], &[ItemKind::Book.id()]),
            FieldGroup::new(
                "container",
                &[
                    CONTAINER_SIZE,
                    CONTAINER_GP,
                    CONTAINER_CAN_OPEN,
                    CONTAINER_OPEN,
                    CONTAINER_CAN_LOCK,
                    CONTAINER_LOCKED,
                    LOCK_STRENGTH,
                    CONTAINER_KEY,
                ],
                &[ItemKind::Container.id()],
            ),
        ],
        universes: vec![item_flags().clone()],
    };
    debug_assert!(schema.validate().is_ok());
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_schema_is_valid() {
        item_schema().validate().unwrap();
    }

    #[test]
    fn kind_ids_round_trip() {
        for kind in ItemKind::ALL {
            assert_eq!(ItemKind::try_from(kind.kind()).unwrap(), kind);
        }
        assert!(ItemKind::try_from(Kind(42)).is_err());
    }
}
