use super::*;
use crate::*;

impl DuelState {
    pub fn hit(&mut self, events: &mut EventBus) -> Result<Transition, GameError> {
        self.expect_phase(&[GamePhase::PlayerTurn])?;
        let Some(card) = self.state.player.deck.draw_card() else {
            tracing::trace!("player deck empty, hit ignored");
            return Ok(Transition::to(self.state.phase));
        };
        tracing::trace!(%card, "player draws");
        self.state.player.hand.push(card);
        events.push(Event::CardDrawn {
            side: Side::Player,
            card,
        });

        let player = &self.state.player;
        if player.is_bust() {
            let inventory = &player.inventory;
            if inventory.has(ItemKind::ScoreModifier) || inventory.has(ItemKind::Thief) {
                events.push(Event::BustWarning {
                    side: Side::Player,
                    score: player.effective_score(),
                    limit: player.score_limit,
                });
                self.set_phase(GamePhase::BustRecovery);
                return Ok(Transition::to(GamePhase::BustRecovery));
            }
            return Ok(self.end_round(Some(Winner::Dealer), events));
        }
        self.set_phase(GamePhase::DealerTurn);
        Ok(Transition::with_pause(
            GamePhase::DealerTurn,
            Pause::DealerThink,
        ))
    }

    pub fn stand(&mut self, events: &mut EventBus) -> Result<Transition, GameError> {
        self.expect_phase(&[GamePhase::PlayerTurn, GamePhase::BustRecovery])?;
        if self.state.phase == GamePhase::BustRecovery && self.state.player.is_bust() {
            return Ok(self.end_round(Some(Winner::Dealer), events));
        }
        self.state.player.stood = true;
        events.push(Event::Stood { side: Side::Player });
        self.set_phase(GamePhase::DealerTurn);
        Ok(Transition::with_pause(
            GamePhase::DealerTurn,
            Pause::DealerThink,
        ))
    }

    /// Use an item from the caller-controlled side. The dealer's items are
    /// only ever used from inside `dealer_tick`.
    pub fn use_item(
        &mut self,
        side: Side,
        id: ItemId,
        events: &mut EventBus,
    ) -> Result<Transition, GameError> {
        if side != Side::Player {
            return Err(GameError::NotYourTurn(side));
        }
        let phase = self.state.phase;
        if !phase.player_may_use_items() {
            return Err(GameError::InvalidPhase(phase));
        }
        let kind = self
            .state
            .player
            .inventory
            .get(id)
            .map(|item| item.kind)
            .ok_or(GameError::UnknownItem(id))?;
        if phase == GamePhase::BustRecovery && !kind.usable_in_bust_recovery() {
            return Err(GameError::ItemNotAllowed { kind, phase });
        }
        let pause = self.apply_item(Side::Player, id, events);
        Ok(Transition {
            phase: self.state.phase,
            pause,
        })
    }

    pub fn choose_random_card(
        &mut self,
        card: Card,
        events: &mut EventBus,
    ) -> Result<Transition, GameError> {
        self.expect_phase(&[GamePhase::ChoosingRandomCard])?;
        let chosen = self
            .card_choices
            .iter()
            .copied()
            .find(|choice| choice.suit == card.suit && choice.rank == card.rank)
            .ok_or(GameError::InvalidCardChoice)?;
        self.state.player.hand.push(chosen);
        self.card_choices.clear();
        events.push(Event::CardChosen {
            side: Side::Player,
            card: chosen,
        });
        self.set_phase(GamePhase::PlayerTurn);
        Ok(Transition::to(GamePhase::PlayerTurn))
    }

    pub fn configure_limit(
        &mut self,
        side: Side,
        limit: i32,
        events: &mut EventBus,
    ) -> Result<Transition, GameError> {
        self.expect_phase(&[GamePhase::ConfiguringLimit])?;
        if !self.config.is_alternate_limit(limit) {
            return Err(GameError::InvalidLimit(limit));
        }
        self.state.side_mut(side).score_limit = limit;
        events.push(Event::LimitChanged { side, limit });
        self.set_phase(GamePhase::PlayerTurn);
        Ok(Transition::to(GamePhase::PlayerTurn))
    }

    /// Close a SeeNext3 or Spy reveal.
    pub fn dismiss_reveal(&mut self) -> Result<Transition, GameError> {
        self.expect_phase(&[GamePhase::ViewingDeck, GamePhase::Spying])?;
        self.revealed.clear();
        self.set_phase(GamePhase::PlayerTurn);
        Ok(Transition::to(GamePhase::PlayerTurn))
    }
}
