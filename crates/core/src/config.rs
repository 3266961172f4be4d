use crate::{default_catalog, ItemDef, ItemKind, Pause};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub max_hp: i32,
    pub max_inventory: usize,
    pub max_rounds: u32,
    pub default_limit: i32,
    pub alternate_limits: Vec<i32>,
    pub opening_cards: usize,
    pub choice_options: usize,
    pub reveal_count: usize,
    pub loot_options: usize,
    pub poisoned_antidote_weight_mult: f64,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            max_hp: 40,
            max_inventory: 3,
            max_rounds: 20,
            default_limit: 21,
            alternate_limits: vec![20, 22],
            opening_cards: 2,
            choice_options: 3,
            reveal_count: 3,
            loot_options: 3,
            poisoned_antidote_weight_mult: 1.5,
        }
    }
}

/// Presentation pacing. The engine only reports these; it never waits on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    pub dealer_think_ms: u64,
    pub hand_swap_ms: u64,
    pub round_settle_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            dealer_think_ms: 1000,
            hand_swap_ms: 1500,
            round_settle_ms: 2500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerTuning {
    /// Heal once HP is at or below `max_hp - heal_margin`.
    pub heal_margin: i32,
    pub boost_at_or_below: i32,
    pub firm_stand: i32,
    pub soft_stand: i32,
    /// At `soft_stand..firm_stand` the dealer stands when a roll exceeds this.
    pub soft_stand_roll: f64,
    pub overdraw_min: i32,
    pub overdraw_max: i32,
    pub overdraw_chance: f64,
    /// Limit imposed on the player when the dealer plays ScoreLimitChange.
    pub forced_player_limit: i32,
}

impl Default for DealerTuning {
    fn default() -> Self {
        Self {
            heal_margin: 5,
            boost_at_or_below: 16,
            firm_stand: 18,
            soft_stand: 16,
            soft_stand_roll: 0.4,
            overdraw_min: 17,
            overdraw_max: 19,
            overdraw_chance: 0.7,
            forced_player_limit: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RivalLootTuning {
    pub banned: Vec<ItemKind>,
    pub one_copy: Vec<ItemKind>,
    pub replaceable: Vec<ItemKind>,
    pub low_priority: Vec<ItemKind>,
    pub priority: Vec<ItemKind>,
    /// Player Heals at or above this value tempt the rival into a Thief.
    pub thief_bait_heal: i32,
    pub thief_bait_chance: f64,
    /// Heals at or above this value are always taken.
    pub top_heal: i32,
    pub desperate_hp: i32,
    pub desperate_heal_chance: f64,
    pub small_heal_swap_chance: f64,
}

impl Default for RivalLootTuning {
    fn default() -> Self {
        Self {
            banned: vec![ItemKind::SeeNext3, ItemKind::Spy],
            one_copy: vec![
                ItemKind::ScoreModifier,
                ItemKind::ChoiceCard,
                ItemKind::ScoreBoost,
                ItemKind::HandSwap,
            ],
            replaceable: vec![
                ItemKind::ScoreModifier,
                ItemKind::ScoreBoost,
                ItemKind::ChoiceCard,
                ItemKind::HandSwap,
            ],
            low_priority: vec![ItemKind::ChoiceCard, ItemKind::Spy, ItemKind::SeeNext3],
            priority: vec![
                ItemKind::Heal,
                ItemKind::ScoreModifier,
                ItemKind::ScoreLimitChange,
                ItemKind::Poison,
                ItemKind::Antidote,
                ItemKind::HandSwap,
                ItemKind::Thief,
            ],
            thief_bait_heal: 10,
            thief_bait_chance: 0.5,
            top_heal: 50,
            desperate_hp: 10,
            desperate_heal_chance: 0.25,
            small_heal_swap_chance: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rules: RuleSet,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub dealer: DealerTuning,
    #[serde(default)]
    pub rival_loot: RivalLootTuning,
    #[serde(default = "default_catalog")]
    pub catalog: Vec<ItemDef>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            timing: Timing::default(),
            dealer: DealerTuning::default(),
            rival_loot: RivalLootTuning::default(),
            catalog: default_catalog(),
        }
    }
}

impl GameConfig {
    pub fn pause_duration(&self, pause: Pause) -> Duration {
        let ms = match pause {
            Pause::DealerThink => self.timing.dealer_think_ms,
            Pause::HandSwap => self.timing.hand_swap_ms,
            Pause::RoundSettle => self.timing.round_settle_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn is_alternate_limit(&self, limit: i32) -> bool {
        self.rules.alternate_limits.contains(&limit)
    }

    /// The catalog entry for the strongest Heal.
    pub fn top_heal(&self) -> Option<&ItemDef> {
        self.catalog
            .iter()
            .filter(|def| def.kind == ItemKind::Heal)
            .max_by_key(|def| def.value)
    }

    pub fn catalog_entry(&self, kind: ItemKind) -> Option<&ItemDef> {
        self.catalog.iter().find(|def| def.kind == kind)
    }
}
