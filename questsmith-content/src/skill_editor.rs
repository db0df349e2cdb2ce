//! Skill and spell editing session.

use crate::skill::*;
use crate::values::{int, text};
use crate::{ContentError, Result};
use questsmith_flags::FlagSet;
use questsmith_form::{EditSession, FormError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SkillEditor {
    session: EditSession,
    effects: Vec<Effect>,
}

impl Default for SkillEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillEditor {
    pub fn new() -> Self {
        Self {
            session: EditSession::new(skill_schema()),
            effects: Vec::new(),
        }
    }

    /// Opens an editor pre-filled from an existing skill.
    pub fn load(skill: &Skill) -> Result<Self> {
        let mut editor = Self::new();
        let s = &mut editor.session;

        s.set_value(NAME, skill.name.as_str())?;
        s.set_value(DESCRIPTION, skill.description.as_str())?;
        s.set_value(DICE_ROLL, skill.damage.dice_roll)?;
        s.set_value(DICE_MAX_SIZE, skill.damage.dice_max_size)?;
        s.set_value(ROUNDS, skill.rounds)?;
        s.set_value(SKILL_TYPE, skill.skill_type.as_str())?;

        let (cost_type, cost) = match skill.cost {
            SkillCost { hit_points, .. } if hit_points != 0 => (CostType::HitPoints, hit_points),
            SkillCost { moves, .. } if moves != 0 => (CostType::Moves, moves),
            SkillCost { mana, .. } => (CostType::Mana, mana),
        };
        s.set_value(COST_TYPE, cost_type.as_str())?;
        s.set_value(COST_VALUE, cost)?;

        s.load_flags(STATUS_UNIVERSE, skill.usable_from_status)?;
        s.load_flags(TARGET_UNIVERSE, skill.valid_targets)?;
        editor.effects = skill.effects.clone();

        debug!("Loaded skill {} into session {}", skill.id, editor.session.id());
        Ok(editor)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        Ok(self.session.set_value(field, value)?)
    }

    pub fn toggle_status(&mut self, flag: &str) -> Result<bool> {
        Ok(self.session.toggle_flag(STATUS_UNIVERSE, flag)?)
    }

    pub fn toggle_target(&mut self, flag: &str) -> Result<bool> {
        Ok(self.session.toggle_flag(TARGET_UNIVERSE, flag)?)
    }

    pub fn statuses(&self) -> Option<&FlagSet> {
        self.session.flags(STATUS_UNIVERSE)
    }

    pub fn targets(&self) -> Option<&FlagSet> {
        self.session.flags(TARGET_UNIVERSE)
    }

    /// Appends an effect and returns its index.
    pub fn add_effect(&mut self, effect: Effect) -> Result<usize> {
        if effect.name.trim().is_empty() {
            return Err(ContentError::InvalidEffect("name is required".into()));
        }
        if effect.duration < 0 {
            return Err(ContentError::InvalidEffect(format!(
                "'{}' has negative duration {}",
                effect.name, effect.duration
            )));
        }
        self.effects.push(effect);
        Ok(self.effects.len() - 1)
    }

    pub fn remove_effect(&mut self, index: usize) -> Result<Effect> {
        let len = self.effects.len();
        if index >= len {
            return Err(ContentError::EffectOutOfRange { index, len });
        }
        Ok(self.effects.remove(index))
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Validates the session and assembles the skill.
    pub fn build(&self) -> Result<Skill> {
        self.session.validate().map_err(FormError::from)?;
        let s = &self.session;

        let cost_type: CostType = choice(s, COST_TYPE)?.ok_or_else(|| {
            ContentError::InvalidChoice {
                field: COST_TYPE.into(),
                value: String::new(),
            }
        })?;
        let skill_type: SkillType = choice(s, SKILL_TYPE)?.unwrap_or_default();

        let amount = int(s, COST_VALUE).unwrap_or(0);
        let mut cost = SkillCost::default();
        match cost_type {
            CostType::HitPoints => cost.hit_points = amount,
            CostType::Mana => cost.mana = amount,
            CostType::Moves => cost.moves = amount,
        }

        let skill = Skill {
            id: -1,
            name: text(s, NAME),
            description: text(s, DESCRIPTION),
            damage: SkillDamage {
                dice_roll: int(s, DICE_ROLL).unwrap_or(1),
                dice_min_size: 1,
                dice_max_size: int(s, DICE_MAX_SIZE).unwrap_or(1),
            },
            cost,
            effects: self.effects.clone(),
            rounds: int(s, ROUNDS).unwrap_or(1),
            skill_type,
            usable_from_status: s.flag_value(STATUS_UNIVERSE)?,
            valid_targets: s.flag_value(TARGET_UNIVERSE)?,
        };

        debug!(
            "Built skill '{}' from session {} (status={:#x}, targets={:#x})",
            skill.name,
            s.id(),
            skill.usable_from_status,
            skill.valid_targets
        );
        Ok(skill)
    }
}

/// Reads an enum-valued field by its serialized name. Blank means `None`.
fn choice<T: DeserializeOwned>(session: &EditSession, field: &str) -> Result<Option<T>> {
    match session.enabled_value(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(v) => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|_| ContentError::InvalidChoice {
                field: field.to_string(),
                value: v.to_string(),
            }),
    }
}
