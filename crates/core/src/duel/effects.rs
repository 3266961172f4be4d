use super::*;
use crate::*;

impl DuelState {
    /// Consume item `id` from `side` and apply it. The caller has already
    /// checked phase and ownership; a missing id is a no-op.
    pub(super) fn apply_item(
        &mut self,
        side: Side,
        id: ItemId,
        events: &mut EventBus,
    ) -> Option<Pause> {
        let item = self.state.side_mut(side).inventory.take(id)?;
        tracing::debug!(?side, kind = ?item.kind, value = item.value, "item used");
        events.push(Event::ItemUsed {
            side,
            item: item.clone(),
        });

        let opponent = side.opponent();
        match item.kind {
            ItemKind::Heal => {
                let max_hp = self.config.rules.max_hp;
                let user = self.state.side_mut(side);
                let amount = user.heal(item.value, max_hp);
                events.push(Event::Healed {
                    side,
                    amount,
                    hp: user.hp,
                });
            }
            ItemKind::ScoreModifier => {
                let user = self.state.side_mut(side);
                user.score_modifier += item.value;
                events.push(Event::ModifierChanged {
                    side,
                    modifier: user.score_modifier,
                });
                if side == Side::Player
                    && self.state.phase == GamePhase::BustRecovery
                    && !self.state.player.is_bust()
                {
                    self.set_phase(GamePhase::PlayerTurn);
                }
            }
            ItemKind::ScoreBoost => {
                let user = self.state.side_mut(side);
                user.score_modifier -= item.value;
                events.push(Event::ModifierChanged {
                    side,
                    modifier: user.score_modifier,
                });
            }
            ItemKind::Poison => {
                let target = self.state.side_mut(opponent);
                target.poison_stacks += item.value;
                events.push(Event::Poisoned {
                    side: opponent,
                    stacks: target.poison_stacks,
                });
            }
            ItemKind::Antidote => {
                self.state.side_mut(side).poison_stacks = 0;
                events.push(Event::Cured { side });
            }
            ItemKind::ChoiceCard => self.offer_choice_cards(side, events),
            ItemKind::Sabotage => {
                if let Some(card) = self.state.side_mut(opponent).hand.pop() {
                    events.push(Event::CardRemoved {
                        side: opponent,
                        card,
                    });
                }
            }
            ItemKind::HandSwap => {
                self.swap_hands(side, events);
                return Some(Pause::HandSwap);
            }
            ItemKind::SeeNext3 => self.reveal(side, side, GamePhase::ViewingDeck, events),
            ItemKind::Spy => self.reveal(side, opponent, GamePhase::Spying, events),
            ItemKind::ScoreLimitChange => match side {
                Side::Player => self.set_phase(GamePhase::ConfiguringLimit),
                Side::Dealer => {
                    let limit = self.config.dealer.forced_player_limit;
                    self.state.player.score_limit = limit;
                    events.push(Event::LimitChanged {
                        side: Side::Player,
                        limit,
                    });
                }
            },
            ItemKind::Thief => self.steal(side, events),
        }
        None
    }

    fn offer_choice_cards(&mut self, side: Side, events: &mut EventBus) {
        let deck = Deck::fresh(self.rng());
        match side {
            Side::Player => {
                let cards = deck.peek_next(self.config.rules.choice_options);
                events.push(Event::CardChoicesOffered {
                    cards: cards.clone(),
                });
                self.card_choices = cards;
                self.set_phase(GamePhase::ChoosingRandomCard);
            }
            Side::Dealer => {
                let mut deck = deck;
                if let Some(card) = deck.draw_card() {
                    self.state.dealer.hand.push(card);
                    events.push(Event::CardChosen {
                        side: Side::Dealer,
                        card,
                    });
                }
            }
        }
    }

    fn swap_hands(&mut self, side: Side, events: &mut EventBus) {
        let GameState { player, dealer, .. } = &mut self.state;
        std::mem::swap(&mut player.hand, &mut dealer.hand);
        events.push(Event::HandsSwapped);

        let opponent = side.opponent();
        let target = self.state.side_mut(opponent);
        if !target.stood {
            return;
        }
        target.stood = false;
        events.push(Event::BackInPlay { side: opponent });
        if opponent == Side::Player && self.state.phase == GamePhase::DealerTurn {
            self.set_phase(GamePhase::PlayerTurn);
        }
    }

    /// Only the player can look; the dealer's copy of these items does nothing.
    fn reveal(&mut self, side: Side, owner: Side, phase: GamePhase, events: &mut EventBus) {
        if side != Side::Player {
            return;
        }
        let cards = self
            .state
            .side(owner)
            .deck
            .peek_next(self.config.rules.reveal_count);
        events.push(Event::TopCardsRevealed {
            owner,
            cards: cards.clone(),
        });
        self.revealed = cards;
        self.set_phase(phase);
    }

    /// The Thief is already out of the user's inventory, so there is always
    /// room for the stolen item.
    fn steal(&mut self, thief: Side, events: &mut EventBus) {
        let victim = thief.opponent();
        let victim_items = &self.state.side(victim).inventory;
        if victim_items.is_empty() {
            return;
        }
        let targeted = match thief {
            Side::Dealer => {
                let top_heal = self.config.rival_loot.top_heal;
                victim_items
                    .position(|item| item.is_heal_of_at_least(top_heal))
                    .or_else(|| victim_items.position(InventoryItem::is_heal))
            }
            Side::Player => None,
        };
        let slot = match targeted {
            Some(slot) => slot,
            None => {
                let len = victim_items.len();
                self.rng().below(len)
            }
        };
        let Some(item) = self.state.side_mut(victim).inventory.take_at(slot) else {
            return;
        };
        tracing::debug!(?thief, kind = ?item.kind, slot, "item stolen");
        self.state.side_mut(thief).inventory.items.push(item.clone());
        events.push(Event::ItemStolen { thief, item });
    }
}
