//! Content editors for Questsmith.
//!
//! Built-in schemas and editors for the records the admin tool authors:
//! - items ([`ItemKind`], [`item_schema`], [`ItemEditor`], [`Item`])
//! - skills and spells ([`skill_schema`], [`SkillEditor`], [`Skill`])
//!
//! Each editor wraps a [`questsmith_form::EditSession`] and turns it into a
//! typed record ready for the API client.

mod error;
mod item;
mod item_editor;
mod record;
mod skill;
mod skill_editor;
mod values;

pub use error::{ContentError, Result};
pub use item::{ItemKind, item_flags, item_schema, ITEM_FLAGS};
pub use item_editor::{ItemEditor, average_damage, spell_protection};
pub use record::{ArmourRating, Book, Container, Damage, Description, Item, Modifier};
pub use skill::{
    CostType, Effect, EffectLocation, Skill, SkillCost, SkillDamage, SkillType, STATUS_FLAGS,
    TARGET_FLAGS, skill_schema, status_flags, target_flags,
};
pub use skill_editor::SkillEditor;
