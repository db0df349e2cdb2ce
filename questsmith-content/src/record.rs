//! Item records as exchanged with the game API.

use serde::{Deserialize, Serialize};

/// A complete item, ready to be posted to the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// `-1` for items that have not been saved yet.
    pub id: i64,
    pub name: String,
    pub known_by_name: bool,
    pub item_type: i64,
    pub slot: i64,
    pub level: i64,
    pub container: Container,
    pub book: Book,
    pub description: Description,
    pub armour_type: i64,
    pub armour_rating: ArmourRating,
    pub weapon_type: i64,
    pub attack_type: i64,
    pub damage_type: i64,
    pub damage: Damage,
    pub modifier: Modifier,
    /// Packed item flags.
    pub item_flag: u64,
    pub condition: i64,
    pub decay_timer: i64,
    pub forage_rank: i64,
    pub weight: i64,
    pub uses: i64,
    pub hidden: bool,
    pub infinite: bool,
    pub is_hidden_in_room: bool,
    pub quest_item: bool,
    pub stuck: bool,
    pub equipped: bool,
    pub keywords: Vec<String>,
    pub container_items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub associated_key_id: Option<i64>,
    pub can_lock: bool,
    pub can_open: bool,
    pub lock_difficulty: i64,
    pub items: Vec<Item>,
    pub size: i64,
    pub is_locked: bool,
    pub is_open: bool,
    pub gold_pieces: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub page_count: i64,
    pub pages: Vec<String>,
    /// True when no page has any text.
    pub blank: bool,
}

/// How the item reads to each of the senses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    pub room: String,
    pub exam: String,
    pub look: String,
    pub smell: String,
    pub taste: String,
    pub touch: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmourRating {
    pub armour: i64,
    pub magic: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Damage {
    pub minimum: i64,
    pub maximum: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    pub dam_roll: i64,
    pub hit_roll: i64,
    pub hp: i64,
    pub mana: i64,
    pub moves: i64,
    pub spell_dam: i64,
    pub saves: i64,
}
