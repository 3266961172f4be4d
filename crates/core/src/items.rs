use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Heal,
    ScoreModifier,
    ScoreBoost,
    Poison,
    Antidote,
    ChoiceCard,
    Sabotage,
    HandSwap,
    SeeNext3,
    Spy,
    ScoreLimitChange,
    Thief,
}

impl ItemKind {
    pub const ALL: [ItemKind; 12] = [
        ItemKind::Heal,
        ItemKind::ScoreModifier,
        ItemKind::ScoreBoost,
        ItemKind::Poison,
        ItemKind::Antidote,
        ItemKind::ChoiceCard,
        ItemKind::Sabotage,
        ItemKind::HandSwap,
        ItemKind::SeeNext3,
        ItemKind::Spy,
        ItemKind::ScoreLimitChange,
        ItemKind::Thief,
    ];

    /// Kinds that hand control to a dedicated choice phase when the player uses them.
    pub fn opens_choice(self) -> bool {
        matches!(
            self,
            ItemKind::ChoiceCard | ItemKind::SeeNext3 | ItemKind::Spy | ItemKind::ScoreLimitChange
        )
    }

    /// Kinds still usable while the player is over the limit.
    pub fn usable_in_bust_recovery(self) -> bool {
        matches!(self, ItemKind::ScoreModifier | ItemKind::Thief)
    }

    pub fn key(self) -> &'static str {
        match self {
            ItemKind::Heal => "heal",
            ItemKind::ScoreModifier => "score_modifier",
            ItemKind::ScoreBoost => "score_boost",
            ItemKind::Poison => "poison",
            ItemKind::Antidote => "antidote",
            ItemKind::ChoiceCard => "choice_card",
            ItemKind::Sabotage => "sabotage",
            ItemKind::HandSwap => "hand_swap",
            ItemKind::SeeNext3 => "see_next_3",
            ItemKind::Spy => "spy",
            ItemKind::ScoreLimitChange => "score_limit_change",
            ItemKind::Thief => "thief",
        }
    }
}

/// One catalog entry: the template loot is drawn from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemDef {
    pub kind: ItemKind,
    pub value: i32,
    pub weight: u32,
}

impl ItemDef {
    pub const fn new(kind: ItemKind, value: i32, weight: u32) -> Self {
        Self {
            kind,
            value,
            weight,
        }
    }
}

/// The built-in catalog. Heal appears in three tiers.
pub fn default_catalog() -> Vec<ItemDef> {
    vec![
        ItemDef::new(ItemKind::Heal, 5, 20),
        ItemDef::new(ItemKind::Heal, 10, 5),
        ItemDef::new(ItemKind::Heal, 50, 1),
        ItemDef::new(ItemKind::ScoreModifier, 5, 15),
        ItemDef::new(ItemKind::ScoreBoost, 5, 15),
        ItemDef::new(ItemKind::Poison, 2, 12),
        ItemDef::new(ItemKind::Antidote, 0, 12),
        ItemDef::new(ItemKind::ChoiceCard, 3, 10),
        ItemDef::new(ItemKind::Sabotage, 0, 10),
        ItemDef::new(ItemKind::HandSwap, 0, 4),
        ItemDef::new(ItemKind::SeeNext3, 3, 8),
        ItemDef::new(ItemKind::Spy, 3, 7),
        ItemDef::new(ItemKind::ScoreLimitChange, 0, 6),
        ItemDef::new(ItemKind::Thief, 0, 8),
    ]
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// A concrete item held by one side. Moved, never copied, between inventories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub value: i32,
    pub weight: u32,
}

impl InventoryItem {
    pub fn from_def(id: ItemId, def: &ItemDef) -> Self {
        Self {
            id,
            kind: def.kind,
            value: def.value,
            weight: def.weight,
        }
    }

    pub fn is_heal(&self) -> bool {
        self.kind == ItemKind::Heal
    }

    /// A Heal that restores at least `threshold` HP.
    pub fn is_heal_of_at_least(&self, threshold: i32) -> bool {
        self.is_heal() && self.value >= threshold
    }
}
