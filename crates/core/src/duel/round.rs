use super::*;
use crate::*;

impl DuelState {
    /// Full reset, then deal round one. Allowed from any phase.
    pub fn start_game(&mut self, events: &mut EventBus) -> Result<Transition, GameError> {
        self.state = GameState::new(&self.config.rules);
        self.loot.clear();
        self.card_choices.clear();
        self.revealed.clear();
        events.push(Event::GameStarted);
        // Nothing to tick on a fresh table; skipping also keeps stale stacks out.
        self.deal_round(false, events);
        Ok(Transition::to(self.state.phase))
    }

    /// Poison first, then a fresh deal. Either the round starts in
    /// `PlayerTurn` or poison ended the game and nothing is dealt.
    pub(super) fn deal_round(&mut self, apply_poison_tick: bool, events: &mut EventBus) {
        if apply_poison_tick && self.tick_poison(events) {
            return;
        }

        let player_deck = Deck::fresh(self.rng());
        let dealer_deck = Deck::fresh(self.rng());
        self.state.player.deck = player_deck;
        self.state.dealer.deck = dealer_deck;
        events.push(Event::DecksShuffled);

        self.state.round.round = self.state.round.round.saturating_add(1);
        self.state.round.winner = Winner::None;
        self.state.round.last_damage = 0;
        events.push(Event::RoundStarted {
            round: self.state.round.round,
        });

        for side in Side::BOTH {
            let combatant = self.state.side_mut(side);
            combatant.hand.clear();
            combatant.score_modifier = 0;
            combatant.stood = false;
        }
        for _ in 0..self.config.rules.opening_cards {
            for side in Side::BOTH {
                let combatant = self.state.side_mut(side);
                if let Some(card) = combatant.deck.draw_card() {
                    combatant.hand.push(card);
                    events.push(Event::CardDrawn { side, card });
                }
            }
        }

        self.card_choices.clear();
        self.revealed.clear();
        self.set_phase(GamePhase::PlayerTurn);
    }

    /// Returns true when the tick ended the game.
    fn tick_poison(&mut self, events: &mut EventBus) -> bool {
        let tick = apply_poison(&mut self.state.player, &mut self.state.dealer);
        for (side, damage) in [
            (Side::Player, tick.player_damage),
            (Side::Dealer, tick.dealer_damage),
        ] {
            if damage > 0 {
                let hp = self.state.side(side).hp;
                tracing::debug!(?side, damage, hp, "poison tick");
                events.push(Event::PoisonDamage { side, damage, hp });
            }
        }
        match tick.winner {
            Some(winner) => {
                self.finish_game(winner, events);
                true
            }
            None => false,
        }
    }

    /// Score both hands, damage the loser and park in `RoundOver`. A bust
    /// that ends the round on the spot passes its winner in `decided`.
    pub(super) fn end_round(
        &mut self,
        decided: Option<Winner>,
        events: &mut EventBus,
    ) -> Transition {
        let (player, dealer) = (&self.state.player, &self.state.dealer);
        let outcome = match decided {
            Some(winner) => resolve_round_for(winner, player, dealer),
            None => resolve_round(player, dealer),
        };
        apply_outcome(&outcome, &mut self.state.player, &mut self.state.dealer);
        let round = &mut self.state.round;
        round.rounds_played = round.rounds_played.saturating_add(1);
        round.winner = outcome.winner;
        round.last_damage = outcome.damage;
        tracing::debug!(
            winner = ?outcome.winner,
            damage = outcome.damage,
            player = outcome.player_score,
            dealer = outcome.dealer_score,
            "round resolved"
        );
        events.push(Event::RoundEnded {
            winner: outcome.winner,
            damage: outcome.damage,
            player_score: outcome.player_score,
            dealer_score: outcome.dealer_score,
        });
        self.set_phase(GamePhase::RoundOver);
        Transition::with_pause(GamePhase::RoundOver, Pause::RoundSettle)
    }

    /// Called once the settle pause has elapsed: game over, or loot.
    pub fn settle_round(&mut self, events: &mut EventBus) -> Result<Transition, GameError> {
        self.expect_phase(&[GamePhase::RoundOver])?;
        let player_hp = self.state.player.hp;
        let dealer_hp = self.state.dealer.hp;
        if player_hp <= 0 {
            self.finish_game(Winner::Dealer, events);
        } else if dealer_hp <= 0 {
            self.finish_game(Winner::Player, events);
        } else if self.state.round.rounds_played >= self.config.rules.max_rounds {
            let winner = match player_hp.cmp(&dealer_hp) {
                std::cmp::Ordering::Greater => Winner::Player,
                std::cmp::Ordering::Less => Winner::Dealer,
                std::cmp::Ordering::Equal => Winner::Push,
            };
            self.finish_game(winner, events);
        } else {
            let poisoned = self.state.player.is_poisoned();
            let options = self.generate_loot_options(self.config.rules.loot_options, poisoned);
            events.push(Event::LootOffered {
                items: options.clone(),
            });
            self.loot = options;
            self.set_phase(GamePhase::LootSelection);
        }
        Ok(Transition::to(self.state.phase))
    }

    fn finish_game(&mut self, winner: Winner, events: &mut EventBus) {
        self.state.winner = winner;
        self.loot.clear();
        events.push(Event::GameOver { winner });
        self.set_phase(GamePhase::GameOver);
    }
}
