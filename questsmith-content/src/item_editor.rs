//! Item editing session.

use crate::item::*;
use crate::values::{int, is_checked, nonzero_int, text, truthy};
use crate::{
    ArmourRating, Book, Container, ContentError, Damage, Description, Item, Modifier, Result,
};
use questsmith_flags::FlagSet;
use questsmith_form::{EditSession, Kind};
use serde_json::Value;
use tracing::debug;

/// Magic protection granted by an armour value: half of it, rounded down.
pub fn spell_protection(armour: i64) -> i64 {
    armour.div_euclid(2)
}

/// Mean of a weapon's damage range.
pub fn average_damage(min: i64, max: i64) -> f64 {
    (min as f64 + max as f64) / 2.0
}

/// Edits one item: kind-gated sections, item flags, book pages and
/// container contents.
#[derive(Debug, Clone)]
pub struct ItemEditor {
    session: EditSession,
    pages: Vec<String>,
    container_items: Vec<Item>,
}

impl Default for ItemEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemEditor {
    /// Opens an editor for a new item. Books start with one blank page.
    pub fn new() -> Self {
        Self {
            session: EditSession::new(item_schema()),
            pages: vec![String::new()],
            container_items: Vec::new(),
        }
    }

    /// Opens an editor pre-filled from an existing item.
    pub fn load(item: &Item) -> Result<Self> {
        let mut editor = Self::new();
        let s = &mut editor.session;

        s.set_value(ID, item.id)?;
        s.set_value(NAME, item.name.as_str())?;
        s.set_value(KNOWN_BY_NAME, item.known_by_name)?;
        s.set_value(SLOT, item.slot)?;
        s.set_value(LEVEL, item.level)?;

        s.set_value(ARMOUR_TYPE, item.armour_type)?;
        s.set_value(AC_PIERCE, item.armour_rating.armour)?;
        s.set_value(AC_MAGIC, item.armour_rating.magic)?;

        s.set_value(WEAPON_TYPE, item.weapon_type)?;
        s.set_value(ATTACK_TYPE, item.attack_type)?;
        s.set_value(DAMAGE_TYPE, item.damage_type)?;
        s.set_value(MIN_DAMAGE, item.damage.minimum)?;
        s.set_value(MAX_DAMAGE, item.damage.maximum)?;

        let m = &item.modifier;
        for (field, value) in [
            (HIT_ROLL, m.hit_roll),
            (DAM_ROLL, m.dam_roll),
            (SAVES, m.saves),
            (HP_MOD, m.hp),
            (MANA_MOD, m.mana),
            (MOVES_MOD, m.moves),
            (SPELL_MOD, m.spell_dam),
        ] {
            s.set_value(field, value)?;
        }

        let d = &item.description;
        for (field, value) in [
            (LOOK, &d.look),
            (ROOM, &d.room),
            (EXAM, &d.exam),
            (SMELL, &d.smell),
            (TOUCH, &d.touch),
            (TASTE, &d.taste),
        ] {
            s.set_value(field, value.as_str())?;
        }

        s.set_value(PAGE_COUNT, item.book.page_count)?;

        let c = &item.container;
        s.set_value(CONTAINER_SIZE, c.size)?;
        s.set_value(CONTAINER_GP, c.gold_pieces)?;
        s.set_value(CONTAINER_CAN_OPEN, c.can_open)?;
        s.set_value(CONTAINER_OPEN, c.can_open && c.is_open)?;
        s.set_value(CONTAINER_CAN_LOCK, c.can_lock)?;
        s.set_value(CONTAINER_LOCKED, c.can_lock && c.is_locked)?;
        s.set_value(LOCK_STRENGTH, c.lock_difficulty)?;
        if let Some(key) = c.associated_key_id {
            s.set_value(CONTAINER_KEY, key)?;
        }

        s.set_kind(Some(Kind(item.item_type)));
        s.load_flags(ITEM_UNIVERSE, item.item_flag)?;

        if !item.book.pages.is_empty() {
            editor.pages = item.book.pages.clone();
        }
        editor.container_items = item.container.items.clone();

        debug!("Loaded item {} into session {}", item.id, editor.session.id());
        Ok(editor)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Selects the item type; `None` keeps the current one.
    pub fn set_item_type(&mut self, kind: Option<ItemKind>) {
        self.session.set_kind(kind.map(Kind::from));
    }

    /// The selected item type, if it is one this editor knows.
    pub fn item_type(&self) -> Option<ItemKind> {
        self.session.kind().and_then(|k| ItemKind::try_from(k).ok())
    }

    /// Writes a plain field value.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        Ok(self.session.set_value(field, value)?)
    }

    pub fn toggle_flag(&mut self, flag: &str) -> Result<bool> {
        Ok(self.session.toggle_flag(ITEM_UNIVERSE, flag)?)
    }

    pub fn flags(&self) -> Option<&FlagSet> {
        self.session.flags(ITEM_UNIVERSE)
    }

    // Book

    /// Appends a blank page and returns its index.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(String::new());
        self.pages.len() - 1
    }

    pub fn set_page(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let len = self.pages.len();
        let page = self
            .pages
            .get_mut(index)
            .ok_or(ContentError::PageOutOfRange { index, len })?;
        *page = text.into();
        Ok(())
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    // Container

    pub fn add_container_item(&mut self, item: Item) {
        self.container_items.push(item);
    }

    pub fn remove_container_item(&mut self, index: usize) -> Option<Item> {
        (index < self.container_items.len()).then(|| self.container_items.remove(index))
    }

    pub fn container_items(&self) -> &[Item] {
        &self.container_items
    }

    /// Records whether the container can be opened. Turning it off also
    /// closes the container.
    pub fn set_can_open(&mut self, can_open: bool) -> Result<()> {
        self.session.set_value(CONTAINER_CAN_OPEN, can_open)?;
        if !can_open {
            self.session.set_value(CONTAINER_OPEN, false)?;
        }
        Ok(())
    }

    pub fn set_open(&mut self, open: bool) -> Result<()> {
        if open && !self.stored_bool(CONTAINER_CAN_OPEN) {
            return Err(ContentError::ContainerCannotOpen);
        }
        Ok(self.session.set_value(CONTAINER_OPEN, open)?)
    }

    /// Records whether the container can be locked. Turning it off also
    /// unlocks the container.
    pub fn set_can_lock(&mut self, can_lock: bool) -> Result<()> {
        self.session.set_value(CONTAINER_CAN_LOCK, can_lock)?;
        if !can_lock {
            self.session.set_value(CONTAINER_LOCKED, false)?;
        }
        Ok(())
    }

    pub fn set_locked(&mut self, locked: bool) -> Result<()> {
        if locked && !self.stored_bool(CONTAINER_CAN_LOCK) {
            return Err(ContentError::ContainerCannotLock);
        }
        Ok(self.session.set_value(CONTAINER_LOCKED, locked)?)
    }

    fn stored_bool(&self, field: &str) -> bool {
        self.session.value(field).is_some_and(is_checked)
    }

    // Armour

    /// Derives magic protection from `armour` and stores it in `acMagic`.
    pub fn update_spell_protection(&mut self, armour: i64) -> Result<i64> {
        let protection = spell_protection(armour);
        self.session.set_value(AC_MAGIC, protection)?;
        Ok(protection)
    }

    /// Validates the session and assembles the item.
    ///
    /// Sections whose kind is not selected come out as their defaults.
    pub fn build(&self) -> Result<Item> {
        let kind = self
            .session
            .kind()
            .ok_or(ContentError::MissingItemType)?;
        let item_kind = ItemKind::try_from(kind)?;
        self.session.validate().map_err(questsmith_form::FormError::from)?;

        let s = &self.session;
        let item_flag = s.flag_value(ITEM_UNIVERSE)?;

        let book = if item_kind == ItemKind::Book {
            Book {
                page_count: int(s, PAGE_COUNT).unwrap_or(self.pages.len() as i64),
                pages: self.pages.clone(),
                blank: self.pages.iter().all(|p| p.trim().is_empty()),
            }
        } else {
            Book::default()
        };

        let container = if item_kind == ItemKind::Container {
            let can_open = truthy(s, CONTAINER_CAN_OPEN);
            let can_lock = truthy(s, CONTAINER_CAN_LOCK);
            Container {
                associated_key_id: int(s, CONTAINER_KEY),
                can_lock,
                can_open,
                lock_difficulty: int(s, LOCK_STRENGTH).unwrap_or(0),
                items: self.container_items.clone(),
                size: int(s, CONTAINER_SIZE).unwrap_or(0),
                is_locked: can_lock && truthy(s, CONTAINER_LOCKED),
                is_open: can_open && truthy(s, CONTAINER_OPEN),
                gold_pieces: int(s, CONTAINER_GP).unwrap_or(0),
            }
        } else {
            Container::default()
        };

        let armour = nonzero_int(s, AC_PIERCE).unwrap_or(1);
        let item = Item {
            id: int(s, ID).unwrap_or(-1),
            name: text(s, NAME),
            known_by_name: truthy(s, KNOWN_BY_NAME),
            item_type: kind.0,
            slot: int(s, SLOT).unwrap_or(0),
            level: nonzero_int(s, LEVEL).unwrap_or(1),
            container,
            book,
            description: Description {
                room: text(s, ROOM),
                exam: text(s, EXAM),
                look: text(s, LOOK),
                smell: text(s, SMELL),
                taste: text(s, TASTE),
                touch: text(s, TOUCH),
            },
            armour_type: int(s, ARMOUR_TYPE).unwrap_or(0),
            armour_rating: ArmourRating {
                armour,
                magic: int(s, AC_MAGIC).unwrap_or_else(|| spell_protection(armour)),
            },
            weapon_type: int(s, WEAPON_TYPE).unwrap_or(0),
            attack_type: int(s, ATTACK_TYPE).unwrap_or(0),
            damage_type: int(s, DAMAGE_TYPE).unwrap_or(0),
            damage: Damage {
                minimum: nonzero_int(s, MIN_DAMAGE).unwrap_or(1),
                maximum: nonzero_int(s, MAX_DAMAGE).unwrap_or(1),
            },
            modifier: Modifier {
                dam_roll: int(s, DAM_ROLL).unwrap_or(0),
                hit_roll: int(s, HIT_ROLL).unwrap_or(0),
                hp: int(s, HP_MOD).unwrap_or(0),
                mana: int(s, MANA_MOD).unwrap_or(0),
                moves: int(s, MOVES_MOD).unwrap_or(0),
                spell_dam: int(s, SPELL_MOD).unwrap_or(0),
                saves: int(s, SAVES).unwrap_or(0),
            },
            item_flag,
            condition: 1,
            decay_timer: 2,
            weight: 5,
            ..Item::default()
        };

        debug!(
            "Built {} '{}' from session {} (flags={:#x})",
            item_kind,
            item.name,
            s.id(),
            item.item_flag
        );
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spell_protection_rounds_down() {
        assert_eq!(spell_protection(0), 0);
        assert_eq!(spell_protection(7), 3);
        assert_eq!(spell_protection(8), 4);
        assert_eq!(spell_protection(-3), -2);
    }

    #[test]
    fn average_damage_is_midpoint() {
        assert_eq!(average_damage(1, 1), 1.0);
        assert_eq!(average_damage(2, 7), 4.5);
        assert_eq!(average_damage(i64::MAX, i64::MAX), i64::MAX as f64);
        assert_eq!(average_damage(i64::MIN, i64::MAX), 0.0);
    }

    #[test]
    fn removing_missing_container_item_is_none() {
        let mut editor = ItemEditor::new();
        assert!(editor.remove_container_item(0).is_none());
    }
}
