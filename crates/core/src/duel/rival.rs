use super::*;
use crate::*;

impl DuelState {
    /// One step of the dealer's turn. The caller waits out the returned pause
    /// and ticks again while the phase stays `DealerTurn`.
    pub fn dealer_tick(&mut self, events: &mut EventBus) -> Result<Transition, GameError> {
        self.expect_phase(&[GamePhase::DealerTurn])?;
        let decision = {
            let view = DealerView {
                dealer: &self.state.dealer,
                player: &self.state.player,
                max_hp: self.config.rules.max_hp,
                tuning: &self.config.dealer,
            };
            dealer::decide(&view, self.rng.as_mut())
        };

        match decision.action {
            DealerAction::Resolve => Ok(self.end_round(None, events)),
            DealerAction::YieldToPlayer => {
                self.set_phase(GamePhase::PlayerTurn);
                Ok(Transition::to(GamePhase::PlayerTurn))
            }
            DealerAction::UseItem(id) => {
                let pause = match self.apply_item(Side::Dealer, id, events) {
                    Some(pause) => Some(pause),
                    None if self.state.phase == GamePhase::DealerTurn => {
                        Some(Pause::DealerThink)
                    }
                    None => None,
                };
                Ok(Transition {
                    phase: self.state.phase,
                    pause,
                })
            }
            DealerAction::Hit => Ok(self.dealer_hit(events)),
            DealerAction::Stand => Ok(self.dealer_stand(events)),
        }
    }

    fn dealer_hit(&mut self, events: &mut EventBus) -> Transition {
        let Some(card) = self.state.dealer.deck.draw_card() else {
            tracing::trace!("dealer deck empty, standing instead");
            return self.dealer_stand(events);
        };
        tracing::trace!(%card, "dealer draws");
        self.state.dealer.hand.push(card);
        events.push(Event::CardDrawn {
            side: Side::Dealer,
            card,
        });

        // A bust dealer stays on the clock so a modifier can rescue it.
        if self.state.dealer.is_bust() || self.state.player.stood {
            return Transition::with_pause(GamePhase::DealerTurn, Pause::DealerThink);
        }
        self.set_phase(GamePhase::PlayerTurn);
        Transition::to(GamePhase::PlayerTurn)
    }

    fn dealer_stand(&mut self, events: &mut EventBus) -> Transition {
        self.state.dealer.stood = true;
        events.push(Event::Stood { side: Side::Dealer });
        if self.state.player.stood {
            return self.end_round(None, events);
        }
        self.set_phase(GamePhase::PlayerTurn);
        Transition::to(GamePhase::PlayerTurn)
    }
}
