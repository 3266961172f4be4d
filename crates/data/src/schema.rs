use serde::{Deserialize, Serialize};

pub use brawljack_core::{
    DealerTuning, GameConfig, ItemDef, ItemKind, RivalLootTuning, RuleSet, Timing,
};

/// On-disk shape of `rules.json`: everything in [`GameConfig`] except the
/// catalog, which lives in `items.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesFile {
    pub rules: RuleSet,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub dealer: DealerTuning,
    #[serde(default)]
    pub rival_loot: RivalLootTuning,
}

impl RulesFile {
    pub fn into_config(self, catalog: Vec<ItemDef>) -> GameConfig {
        GameConfig {
            rules: self.rules,
            timing: self.timing,
            dealer: self.dealer,
            rival_loot: self.rival_loot,
            catalog,
        }
    }
}

impl From<&GameConfig> for RulesFile {
    fn from(config: &GameConfig) -> Self {
        Self {
            rules: config.rules.clone(),
            timing: config.timing.clone(),
            dealer: config.dealer.clone(),
            rival_loot: config.rival_loot.clone(),
        }
    }
}
