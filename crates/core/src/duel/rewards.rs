use super::*;
use crate::*;

impl DuelState {
    /// Roll `count` catalog entries and give each a fresh id.
    pub(super) fn generate_loot_options(
        &mut self,
        count: usize,
        poisoned: bool,
    ) -> Vec<InventoryItem> {
        let defs = loot::generate_loot_options(
            &self.config.catalog,
            count,
            poisoned,
            self.config.rules.poisoned_antidote_weight_mult,
            self.rng.as_mut(),
        );
        defs.iter().map(|def| self.mint_item(def)).collect()
    }

    /// Take loot option `id`. With a full inventory a `replace_slot` is
    /// required; the displaced item is discarded.
    pub fn choose_loot_item(
        &mut self,
        id: ItemId,
        replace_slot: Option<usize>,
        events: &mut EventBus,
    ) -> Result<Transition, GameError> {
        self.expect_phase(&[GamePhase::LootSelection])?;
        let index = self
            .loot
            .iter()
            .position(|item| item.id == id)
            .ok_or(GameError::UnknownLoot(id))?;

        let inventory = &self.state.player.inventory;
        if inventory.is_full() {
            match replace_slot {
                Some(slot) if slot < inventory.len() => {}
                Some(slot) => return Err(GameError::InvalidSlot(slot)),
                None => return Err(InventoryError::Full.into()),
            }
        }

        let item = self.loot.swap_remove(index);
        let inventory = &mut self.state.player.inventory;
        let replaced = match replace_slot {
            Some(slot) if inventory.is_full() => Some(inventory.replace(slot, item.clone())?),
            _ => {
                inventory.add(item.clone())?;
                None
            }
        };
        tracing::debug!(kind = ?item.kind, replaced = ?replaced.as_ref().map(|i| i.kind), "loot taken");
        events.push(Event::LootTaken { item, replaced });
        Ok(self.start_next_round(events))
    }

    pub fn pass_loot(&mut self, events: &mut EventBus) -> Result<Transition, GameError> {
        self.expect_phase(&[GamePhase::LootSelection])?;
        events.push(Event::LootPassed);
        Ok(self.start_next_round(events))
    }

    fn start_next_round(&mut self, events: &mut EventBus) -> Transition {
        self.loot.clear();
        self.rival_loot(events);
        self.deal_round(true, events);
        Transition::to(self.state.phase)
    }

    /// The dealer's between-rounds pick. Steps run in a fixed order and the
    /// first one that changes the inventory ends the pick.
    fn rival_loot(&mut self, events: &mut EventBus) {
        let tuning = self.config.rival_loot.clone();
        let dealer_poisoned = self.state.dealer.is_poisoned();
        let mut options = self.generate_loot_options(self.config.rules.loot_options, dealer_poisoned);
        options.retain(|item| !tuning.banned.contains(&item.kind));

        let baited = self
            .state
            .player
            .inventory
            .items
            .iter()
            .any(|item| item.is_heal_of_at_least(tuning.thief_bait_heal));
        if baited && self.rng().chance(tuning.thief_bait_chance) {
            if let Some(def) = self.config.catalog_entry(ItemKind::Thief).copied() {
                let thief = self.mint_item(&def);
                force_option(&mut options, 0, thief);
            }
        }

        if self.state.dealer.hp <= tuning.desperate_hp
            && self.rng().chance(tuning.desperate_heal_chance)
        {
            if let Some(def) = self.config.top_heal().copied() {
                let potion = self.mint_item(&def);
                force_option(&mut options, 1, potion);
            }
        }

        let held = &self.state.dealer.inventory;
        options.retain(|item| !tuning.one_copy.contains(&item.kind) || !held.has(item.kind));
        if options.is_empty() {
            tracing::debug!("rival loot: nothing worth taking");
            return;
        }

        if let Some(potion) = options
            .iter()
            .find(|item| item.is_heal_of_at_least(tuning.top_heal))
            .cloned()
        {
            let inventory = &self.state.dealer.inventory;
            if !inventory.is_full() {
                self.rival_take(potion, events);
            } else {
                let slot = match inventory.position(|held| {
                    tuning.replaceable.contains(&held.kind) || tuning.low_priority.contains(&held.kind)
                }) {
                    Some(slot) => slot,
                    None => {
                        let len = inventory.len();
                        self.rng().below(len)
                    }
                };
                self.rival_swap(slot, potion, events);
            }
            return;
        }

        if let Some(potion) = options
            .iter()
            .find(|item| item.is_heal() && item.value < tuning.top_heal)
            .cloned()
        {
            let target = self
                .state
                .dealer
                .inventory
                .position(|held| tuning.replaceable.contains(&held.kind));
            if let Some(slot) = target {
                if self.rng().chance(tuning.small_heal_swap_chance) {
                    self.rival_swap(slot, potion, events);
                    return;
                }
            }
        }

        // Heaviest first; ties keep their rolled order.
        options.sort_by(|a, b| b.weight.cmp(&a.weight));
        let mut candidate = options
            .iter()
            .find(|item| tuning.priority.contains(&item.kind))
            .or_else(|| options.first());
        if dealer_poisoned {
            if let Some(antidote) = options.iter().find(|item| item.kind == ItemKind::Antidote) {
                candidate = Some(antidote);
            }
        }
        let Some(candidate) = candidate.cloned() else {
            return;
        };

        let inventory = &self.state.dealer.inventory;
        if !inventory.is_full() {
            self.rival_take(candidate, events);
        } else if let Some(slot) =
            inventory.position(|held| tuning.low_priority.contains(&held.kind))
        {
            self.rival_swap(slot, candidate, events);
        } else if tuning.priority.contains(&candidate.kind) {
            let len = inventory.len();
            let slot = self.rng().below(len);
            self.rival_swap(slot, candidate, events);
        } else {
            tracing::debug!(kind = ?candidate.kind, "rival loot: kept inventory");
        }
    }

    fn rival_take(&mut self, item: InventoryItem, events: &mut EventBus) {
        if self.state.dealer.inventory.add(item.clone()).is_ok() {
            tracing::debug!(kind = ?item.kind, "rival loot: found");
            events.push(Event::RivalFoundItem { item });
        }
    }

    fn rival_swap(&mut self, slot: usize, item: InventoryItem, events: &mut EventBus) {
        if let Ok(dropped) = self.state.dealer.inventory.replace(slot, item.clone()) {
            tracing::debug!(dropped = ?dropped.kind, kind = ?item.kind, "rival loot: swapped");
            events.push(Event::RivalSwappedItem { dropped, item });
        }
    }
}

/// Forced picks overwrite a rolled option, or join the list when it is short.
fn force_option(options: &mut Vec<InventoryItem>, index: usize, item: InventoryItem) {
    match options.get_mut(index) {
        Some(slot) => *slot = item,
        None => options.push(item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cumulative catalog weights (total 133): Heal 5 at 0, Heal 10 at 20,
    // Heal 50 at 25, ScoreModifier 26, ScoreBoost 41, Poison 56, Antidote 68,
    // ChoiceCard 80, Sabotage 90, HandSwap 100, SeeNext3 104, Spy 112,
    // ScoreLimitChange 119, Thief 125.
    const HEAL_5: u64 = 0;
    const HEAL_10: u64 = 20;
    const HEAL_50: u64 = 25;
    const MODIFIER: u64 = 26;
    const POISON: u64 = 56;
    const ANTIDOTE: u64 = 68;
    const SABOTAGE: u64 = 90;
    const SEE_NEXT: u64 = 104;
    const SPY: u64 = 112;

    fn scripted(ints: &[u64], rolls: &[f64]) -> DuelState {
        let rng = ScriptedRng::new()
            .with_ints(ints.iter().copied())
            .with_rolls(rolls.iter().copied());
        DuelState::with_rng(GameConfig::default(), Box::new(rng))
    }

    fn hold(duel: &mut DuelState, side: Side, kind: ItemKind, value: i32) {
        let def = duel
            .config
            .catalog
            .iter()
            .copied()
            .find(|def| def.kind == kind && def.value == value)
            .expect("catalog entry");
        let item = duel.mint_item(&def);
        duel.state.side_mut(side).inventory.add(item).expect("room");
    }

    fn dealer_kinds(duel: &DuelState) -> Vec<(ItemKind, i32)> {
        duel.state
            .dealer
            .inventory
            .items
            .iter()
            .map(|item| (item.kind, item.value))
            .collect()
    }

    fn run(duel: &mut DuelState) -> EventBus {
        let mut events = EventBus::default();
        duel.rival_loot(&mut events);
        events
    }

    #[test]
    fn banned_and_duplicate_kinds_are_skipped() {
        let mut duel = scripted(&[SEE_NEXT, SPY, MODIFIER], &[]);
        hold(&mut duel, Side::Dealer, ItemKind::ScoreModifier, 5);
        let events = run(&mut duel);
        assert!(events.is_empty());
        assert_eq!(dealer_kinds(&duel), vec![(ItemKind::ScoreModifier, 5)]);
    }

    #[test]
    fn top_heal_fills_a_free_slot() {
        let mut duel = scripted(&[HEAL_5, HEAL_50, SABOTAGE], &[]);
        let events = run(&mut duel);
        assert_eq!(dealer_kinds(&duel), vec![(ItemKind::Heal, 50)]);
        assert!(matches!(
            events.events(),
            [Event::RivalFoundItem { item }] if item.value == 50
        ));
    }

    #[test]
    fn top_heal_replaces_the_first_weak_slot_when_full() {
        let mut duel = scripted(&[SABOTAGE, HEAL_50, SABOTAGE], &[]);
        hold(&mut duel, Side::Dealer, ItemKind::Poison, 2);
        hold(&mut duel, Side::Dealer, ItemKind::Spy, 3);
        hold(&mut duel, Side::Dealer, ItemKind::ScoreBoost, 5);
        let events = run(&mut duel);
        assert_eq!(
            dealer_kinds(&duel),
            vec![
                (ItemKind::Poison, 2),
                (ItemKind::Heal, 50),
                (ItemKind::ScoreBoost, 5)
            ]
        );
        assert!(matches!(
            events.events(),
            [Event::RivalSwappedItem { dropped, .. }] if dropped.kind == ItemKind::Spy
        ));
    }

    #[test]
    fn small_heal_swaps_on_a_passing_roll() {
        let mut duel = scripted(&[HEAL_10, POISON, SABOTAGE], &[0.4]);
        hold(&mut duel, Side::Dealer, ItemKind::Poison, 2);
        hold(&mut duel, Side::Dealer, ItemKind::ScoreBoost, 5);
        run(&mut duel);
        assert_eq!(
            dealer_kinds(&duel),
            vec![(ItemKind::Poison, 2), (ItemKind::Heal, 10)]
        );
    }

    #[test]
    fn small_heal_without_the_roll_falls_back_to_the_heaviest_priority() {
        let mut duel = scripted(&[HEAL_10, POISON, SABOTAGE], &[0.6]);
        hold(&mut duel, Side::Dealer, ItemKind::ScoreBoost, 5);
        run(&mut duel);
        assert_eq!(
            dealer_kinds(&duel),
            vec![(ItemKind::ScoreBoost, 5), (ItemKind::Poison, 2)]
        );
    }

    #[test]
    fn heaviest_priority_option_wins_over_roll_order() {
        let mut duel = scripted(&[POISON, HEAL_5, SABOTAGE], &[]);
        run(&mut duel);
        assert_eq!(dealer_kinds(&duel), vec![(ItemKind::Heal, 5)]);
    }

    #[test]
    fn poisoned_rival_prefers_the_antidote() {
        let mut duel = scripted(&[POISON, ANTIDOTE, MODIFIER], &[]);
        duel.state.dealer.poison_stacks = 2;
        run(&mut duel);
        assert_eq!(dealer_kinds(&duel), vec![(ItemKind::Antidote, 0)]);
    }

    #[test]
    fn full_inventory_drops_a_low_priority_item() {
        let mut duel = scripted(&[POISON, SABOTAGE, SABOTAGE], &[]);
        hold(&mut duel, Side::Dealer, ItemKind::Heal, 5);
        hold(&mut duel, Side::Dealer, ItemKind::Thief, 0);
        hold(&mut duel, Side::Dealer, ItemKind::ChoiceCard, 3);
        run(&mut duel);
        assert_eq!(
            dealer_kinds(&duel),
            vec![
                (ItemKind::Heal, 5),
                (ItemKind::Thief, 0),
                (ItemKind::Poison, 2)
            ]
        );
    }

    #[test]
    fn full_inventory_keeps_its_items_for_a_minor_pick() {
        let mut duel = scripted(&[SABOTAGE, SABOTAGE, SABOTAGE], &[]);
        hold(&mut duel, Side::Dealer, ItemKind::Heal, 5);
        hold(&mut duel, Side::Dealer, ItemKind::Thief, 0);
        hold(&mut duel, Side::Dealer, ItemKind::Poison, 2);
        let before = dealer_kinds(&duel);
        let events = run(&mut duel);
        assert!(events.is_empty());
        assert_eq!(dealer_kinds(&duel), before);
    }

    #[test]
    fn big_player_heal_baits_a_thief() {
        let mut duel = scripted(&[SABOTAGE, SABOTAGE, SABOTAGE], &[0.1]);
        hold(&mut duel, Side::Player, ItemKind::Heal, 10);
        run(&mut duel);
        assert_eq!(dealer_kinds(&duel), vec![(ItemKind::Thief, 0)]);
    }

    #[test]
    fn failed_bait_roll_leaves_the_rolled_options() {
        let mut duel = scripted(&[SABOTAGE, SABOTAGE, SABOTAGE], &[0.9]);
        hold(&mut duel, Side::Player, ItemKind::Heal, 10);
        run(&mut duel);
        assert_eq!(dealer_kinds(&duel), vec![(ItemKind::Sabotage, 0)]);
    }

    #[test]
    fn low_hp_rival_can_be_handed_the_top_heal() {
        let mut duel = scripted(&[SABOTAGE, SABOTAGE, SABOTAGE], &[0.1]);
        duel.state.dealer.hp = 8;
        run(&mut duel);
        assert_eq!(dealer_kinds(&duel), vec![(ItemKind::Heal, 50)]);
    }
}
