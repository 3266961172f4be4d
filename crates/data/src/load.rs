use crate::schema::{GameConfig, ItemDef, RulesFile};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const RULES_FILE: &str = "rules.json";
pub const ITEMS_FILE: &str = "items.json";

/// Load `rules.json` and `items.json` from `dir` and validate the result.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let rules: RulesFile = load_json(dir.join(RULES_FILE))?;
    let catalog = load_catalog(&dir.join(ITEMS_FILE))?;
    let config = rules.into_config(catalog);
    validate_config(&config).with_context(|| format!("validate {}", dir.display()))?;
    Ok(config)
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Vec<ItemDef>> {
    load_json(path)
}

pub fn validate_config(config: &GameConfig) -> anyhow::Result<()> {
    let rules = &config.rules;
    if rules.max_hp <= 0 {
        bail!("max_hp must be positive, got {}", rules.max_hp);
    }
    if rules.max_inventory == 0 {
        bail!("max_inventory must be positive");
    }
    if rules.alternate_limits.contains(&rules.default_limit) {
        bail!(
            "default_limit {} is also listed as an alternate limit",
            rules.default_limit
        );
    }
    if config.catalog.is_empty() {
        bail!("item catalog is empty");
    }
    if let Some(def) = config.catalog.iter().find(|def| def.weight == 0) {
        bail!("catalog entry {} ({}) has zero weight", def.kind.key(), def.value);
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ItemKind;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_root(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "brawljack_data_load_{}_{}_{}",
            std::process::id(),
            name,
            nanos
        ));
        let _ = fs::create_dir_all(&path);
        path
    }

    fn write_default(dir: &Path, config: &GameConfig) {
        let rules = serde_json::to_string_pretty(&RulesFile::from(config)).expect("rules json");
        let items = serde_json::to_string_pretty(&config.catalog).expect("items json");
        fs::write(dir.join(RULES_FILE), rules).expect("write rules");
        fs::write(dir.join(ITEMS_FILE), items).expect("write items");
    }

    #[test]
    fn written_defaults_load_back() {
        let dir = temp_root("defaults");
        let config = GameConfig::default();
        write_default(&dir, &config);
        let loaded = load_game_config(&dir).expect("load");
        assert_eq!(loaded, config);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let dir = temp_root("minimal");
        let config = GameConfig::default();
        let rules = serde_json::json!({ "rules": config.rules });
        fs::write(dir.join(RULES_FILE), rules.to_string()).expect("write rules");
        fs::write(
            dir.join(ITEMS_FILE),
            serde_json::to_string(&config.catalog).expect("items json"),
        )
        .expect("write items");
        let loaded = load_game_config(&dir).expect("load");
        assert_eq!(loaded.dealer, config.dealer);
        assert_eq!(loaded.timing, config.timing);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = temp_root("missing");
        let err = load_game_config(&dir).expect_err("no files");
        assert!(format!("{err:#}").contains(RULES_FILE));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_items_are_a_parse_error() {
        let dir = temp_root("malformed");
        write_default(&dir, &GameConfig::default());
        fs::write(dir.join(ITEMS_FILE), "[{\"kind\": \"Lasso\"}]").expect("write items");
        let err = load_game_config(&dir).expect_err("bad kind");
        assert!(format!("{err:#}").contains("parse"));
        let _ = fs::remove_dir_all(&dir);
    }

    macro_rules! invalid_case {
        ($name:ident, $edit:expr, $needle:expr) => {
            #[test]
            fn $name() {
                let mut config = GameConfig::default();
                let edit: fn(&mut GameConfig) = $edit;
                edit(&mut config);
                let err = validate_config(&config).expect_err("invalid config");
                assert!(
                    err.to_string().contains($needle),
                    "unexpected message: {err}"
                );
            }
        };
    }

    invalid_case!(
        rejects_zero_hp,
        |config| config.rules.max_hp = 0,
        "max_hp"
    );
    invalid_case!(
        rejects_zero_slots,
        |config| config.rules.max_inventory = 0,
        "max_inventory"
    );
    invalid_case!(
        rejects_default_as_alternate,
        |config| config.rules.alternate_limits.push(21),
        "alternate"
    );
    invalid_case!(
        rejects_empty_catalog,
        |config| config.catalog.clear(),
        "empty"
    );
    invalid_case!(
        rejects_zero_weight,
        |config| config.catalog[0].weight = 0,
        "zero weight"
    );

    #[test]
    fn defaults_are_valid() {
        validate_config(&GameConfig::default()).expect("defaults");
        assert!(GameConfig::default()
            .catalog
            .iter()
            .any(|def| def.kind == ItemKind::Thief));
    }
}
