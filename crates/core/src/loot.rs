use crate::{ItemDef, ItemKind, RandomSource};

/// Draw `count` catalog entries independently, with replacement. When the
/// receiving side is poisoned, Antidote's weight is scaled by `antidote_mult`
/// (floored) for these draws only.
pub fn generate_loot_options(
    catalog: &[ItemDef],
    count: usize,
    context_poisoned: bool,
    antidote_mult: f64,
    rng: &mut dyn RandomSource,
) -> Vec<ItemDef> {
    let weighted: Vec<(ItemDef, u32)> = catalog
        .iter()
        .map(|def| (*def, draw_weight(def, context_poisoned, antidote_mult)))
        .collect();
    let mut options = Vec::with_capacity(count);
    for _ in 0..count {
        if let Some(def) = pick_weighted(weighted.iter().copied(), rng) {
            options.push(def);
        }
    }
    options
}

fn draw_weight(def: &ItemDef, context_poisoned: bool, antidote_mult: f64) -> u32 {
    if context_poisoned && def.kind == ItemKind::Antidote {
        (f64::from(def.weight) * antidote_mult).floor() as u32
    } else {
        def.weight
    }
}

pub(crate) fn pick_weighted<T: Clone>(
    items: impl Iterator<Item = (T, u32)>,
    rng: &mut dyn RandomSource,
) -> Option<T> {
    let items: Vec<(T, u32)> = items.filter(|(_, w)| *w > 0).collect();
    let total: u32 = items.iter().map(|(_, w)| *w).sum();
    if total == 0 {
        return None;
    }
    let mut roll = (rng.next_u64() % total as u64) as u32;
    for (item, weight) in items {
        if roll < weight {
            return Some(item);
        }
        roll -= weight;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{default_catalog, RngState, ScriptedRng};

    #[test]
    fn roll_walks_the_cumulative_weights() {
        let catalog = default_catalog();
        // Heal 5 covers 0..20, Heal 10 covers 20..25, Heal 50 covers 25..26.
        let mut rng = ScriptedRng::new().with_ints([0, 19, 20, 25, 26]);
        let picks = generate_loot_options(&catalog, 5, false, 1.5, &mut rng);
        let values: Vec<_> = picks.iter().map(|def| (def.kind, def.value)).collect();
        assert_eq!(
            values,
            vec![
                (ItemKind::Heal, 5),
                (ItemKind::Heal, 5),
                (ItemKind::Heal, 10),
                (ItemKind::Heal, 50),
                (ItemKind::ScoreModifier, 5),
            ]
        );
    }

    #[test]
    fn empty_or_weightless_catalog_yields_nothing() {
        let mut rng = RngState::from_seed(1);
        assert!(generate_loot_options(&[], 3, false, 1.5, &mut rng).is_empty());
        let dead = [ItemDef::new(ItemKind::Spy, 3, 0)];
        assert!(generate_loot_options(&dead, 3, false, 1.5, &mut rng).is_empty());
    }

    #[test]
    fn poisoned_context_raises_antidote_weight() {
        let catalog = default_catalog();
        let antidote = catalog
            .iter()
            .find(|def| def.kind == ItemKind::Antidote)
            .expect("antidote");
        assert_eq!(draw_weight(antidote, false, 1.5), 12);
        assert_eq!(draw_weight(antidote, true, 1.5), 18);
        let spy = catalog
            .iter()
            .find(|def| def.kind == ItemKind::Spy)
            .expect("spy");
        assert_eq!(draw_weight(spy, true, 1.5), 7);
    }

    #[test]
    fn draws_only_catalog_kinds_and_allow_duplicates() {
        let catalog = default_catalog();
        let mut rng = RngState::from_seed(99);
        let picks = generate_loot_options(&catalog, 200, false, 1.5, &mut rng);
        assert_eq!(picks.len(), 200);
        assert!(picks.iter().all(|pick| catalog.contains(pick)));
        let heals = picks.iter().filter(|def| def.kind == ItemKind::Heal).count();
        assert!(heals > 1);
    }
}
