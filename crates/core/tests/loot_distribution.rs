use brawljack_core::{default_catalog, generate_loot_options, ItemKind, RngState};

const DRAWS: usize = 60_000;

fn antidote_share(poisoned: bool, seed: u64) -> f64 {
    let catalog = default_catalog();
    let mut rng = RngState::from_seed(seed);
    let options = generate_loot_options(&catalog, DRAWS, poisoned, 1.5, &mut rng);
    assert_eq!(options.len(), DRAWS);
    let hits = options
        .iter()
        .filter(|def| def.kind == ItemKind::Antidote)
        .count();
    hits as f64 / DRAWS as f64
}

#[test]
fn poison_makes_antidotes_more_likely() {
    let clean = antidote_share(false, 11);
    let poisoned = antidote_share(true, 12);
    let ratio = poisoned / clean;
    // 18/139 over 12/133 is about 1.44.
    assert!(
        (1.2..=1.8).contains(&ratio),
        "antidote ratio {ratio:.3} (clean {clean:.4}, poisoned {poisoned:.4})"
    );
}

#[test]
fn clean_draws_follow_catalog_weights() {
    let catalog = default_catalog();
    let total: u32 = catalog.iter().map(|def| def.weight).sum();
    assert_eq!(total, 133);

    let mut rng = RngState::from_seed(99);
    let options = generate_loot_options(&catalog, DRAWS, false, 1.5, &mut rng);
    let top_heals = options
        .iter()
        .filter(|def| def.kind == ItemKind::Heal && def.value == 50)
        .count();
    let small_heals = options
        .iter()
        .filter(|def| def.kind == ItemKind::Heal && def.value == 5)
        .count();
    // 1/133 against 20/133.
    assert!(top_heals > 0);
    assert!(small_heals > top_heals * 10);
}

#[test]
fn every_option_comes_from_the_catalog() {
    let catalog = default_catalog();
    let mut rng = RngState::from_seed(3);
    for def in generate_loot_options(&catalog, 500, true, 1.5, &mut rng) {
        assert!(catalog
            .iter()
            .any(|entry| entry.kind == def.kind && entry.value == def.value));
    }
}

#[test]
fn empty_catalog_offers_nothing() {
    let mut rng = RngState::from_seed(4);
    assert!(generate_loot_options(&[], 3, false, 1.5, &mut rng).is_empty());
}
