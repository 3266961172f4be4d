use crate::{CombatantState, Side, Winner};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub winner: Winner,
    pub damage: i32,
    pub player_score: i32,
    pub dealer_score: i32,
}

impl RoundOutcome {
    pub fn loser(&self) -> Option<Side> {
        match self.winner {
            Winner::Player => Some(Side::Dealer),
            Winner::Dealer => Some(Side::Player),
            Winner::None | Winner::Push => None,
        }
    }
}

/// Compare two final scores against their own limits.
///
/// A bust side loses to a non-bust side; otherwise the higher score wins.
/// Equal scores and double busts are a push. Scores are compared as they
/// stand, so a negative score loses to zero.
pub fn resolve_scores(
    player_score: i32,
    player_limit: i32,
    dealer_score: i32,
    dealer_limit: i32,
) -> RoundOutcome {
    let player_bust = player_score > player_limit;
    let dealer_bust = dealer_score > dealer_limit;
    let winner = match (player_bust, dealer_bust) {
        (true, true) => Winner::Push,
        (true, false) => Winner::Dealer,
        (false, true) => Winner::Player,
        (false, false) => match player_score.cmp(&dealer_score) {
            Ordering::Greater => Winner::Player,
            Ordering::Less => Winner::Dealer,
            Ordering::Equal => Winner::Push,
        },
    };
    settle_scores(winner, player_score, player_limit, dealer_score, dealer_limit)
}

/// Damage for an already decided winner. Scores floor at zero here.
///
/// Against a bust loser the damage is the winner's score, otherwise it is
/// the gap. A push deals nothing.
pub fn settle_scores(
    winner: Winner,
    player_score: i32,
    player_limit: i32,
    dealer_score: i32,
    dealer_limit: i32,
) -> RoundOutcome {
    let player_score = player_score.max(0);
    let dealer_score = dealer_score.max(0);
    let player_bust = player_score > player_limit;
    let dealer_bust = dealer_score > dealer_limit;
    let damage = match winner {
        Winner::None | Winner::Push => 0,
        Winner::Player | Winner::Dealer => match (player_bust, dealer_bust) {
            (true, false) => dealer_score,
            (false, true) => player_score,
            _ => (player_score - dealer_score).abs(),
        },
    };
    RoundOutcome {
        winner,
        damage,
        player_score,
        dealer_score,
    }
}

pub fn resolve_round(player: &CombatantState, dealer: &CombatantState) -> RoundOutcome {
    resolve_scores(
        player.effective_score(),
        player.score_limit,
        dealer.effective_score(),
        dealer.score_limit,
    )
}

/// Score a round whose winner was fixed by a bust, not by comparison.
pub fn resolve_round_for(
    winner: Winner,
    player: &CombatantState,
    dealer: &CombatantState,
) -> RoundOutcome {
    settle_scores(
        winner,
        player.effective_score(),
        player.score_limit,
        dealer.effective_score(),
        dealer.score_limit,
    )
}

/// Apply an outcome's damage to the loser. HP floors at zero.
pub fn apply_outcome(
    outcome: &RoundOutcome,
    player: &mut CombatantState,
    dealer: &mut CombatantState,
) {
    match outcome.loser() {
        Some(Side::Player) => player.take_damage(outcome.damage),
        Some(Side::Dealer) => dealer.take_damage(outcome.damage),
        None => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoisonTick {
    pub player_damage: i32,
    pub dealer_damage: i32,
    /// Set when the tick ended the game.
    pub winner: Option<Winner>,
}

/// Start-of-round poison damage. The player's death is checked first, so a
/// double knockout goes to the dealer.
pub fn apply_poison(player: &mut CombatantState, dealer: &mut CombatantState) -> PoisonTick {
    let player_damage = player.poison_stacks.max(0);
    let dealer_damage = dealer.poison_stacks.max(0);
    player.take_damage(player_damage);
    dealer.take_damage(dealer_damage);
    let winner = if player_damage > 0 || dealer_damage > 0 {
        if player.is_dead() {
            Some(Winner::Dealer)
        } else if dealer.is_dead() {
            Some(Winner::Player)
        } else {
            None
        }
    } else {
        None
    };
    PoisonTick {
        player_damage,
        dealer_damage,
        winner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleSet;

    macro_rules! outcome_case {
        ($name:ident, $p:expr, $pl:expr, $d:expr, $dl:expr, $winner:expr, $damage:expr) => {
            #[test]
            fn $name() {
                let outcome = resolve_scores($p, $pl, $d, $dl);
                assert_eq!(outcome.winner, $winner);
                assert_eq!(outcome.damage, $damage);
            }
        };
    }

    outcome_case!(player_bust_pays_dealer_score, 25, 21, 18, 21, Winner::Dealer, 18);
    outcome_case!(player_wins_by_gap, 20, 21, 17, 21, Winner::Player, 3);
    outcome_case!(tie_is_push, 19, 21, 19, 21, Winner::Push, 0);
    outcome_case!(dealer_bust_pays_player_score, 15, 21, 24, 21, Winner::Player, 15);
    outcome_case!(dealer_wins_by_gap, 12, 21, 21, 21, Winner::Dealer, 9);
    outcome_case!(double_bust_is_push, 23, 21, 25, 21, Winner::Push, 0);
    outcome_case!(raised_limit_saves_twenty_two, 22, 22, 20, 21, Winner::Player, 2);
    outcome_case!(lowered_limit_busts_twenty_one, 21, 20, 18, 21, Winner::Dealer, 18);
    outcome_case!(negative_score_counts_as_zero, -3, 21, 4, 21, Winner::Dealer, 4);
    outcome_case!(negative_score_loses_to_zero, -3, 21, 0, 21, Winner::Dealer, 0);

    #[test]
    fn bust_loss_against_bust_dealer_costs_the_gap() {
        let outcome = settle_scores(Winner::Dealer, 25, 21, 26, 21);
        assert_eq!(outcome.winner, Winner::Dealer);
        assert_eq!(outcome.damage, 1);
        assert_eq!((outcome.player_score, outcome.dealer_score), (25, 26));
    }

    #[test]
    fn settled_push_deals_nothing() {
        assert_eq!(settle_scores(Winner::Push, 30, 21, 2, 21).damage, 0);
    }

    #[test]
    fn damage_lands_on_loser_and_floors_at_zero() {
        let rules = RuleSet::default();
        let mut player = CombatantState::new(&rules);
        let mut dealer = CombatantState::new(&rules);
        dealer.hp = 2;
        let outcome = resolve_scores(20, 21, 10, 21);
        apply_outcome(&outcome, &mut player, &mut dealer);
        assert_eq!(player.hp, 40);
        assert_eq!(dealer.hp, 0);
    }

    #[test]
    fn push_changes_nothing() {
        let rules = RuleSet::default();
        let mut player = CombatantState::new(&rules);
        let mut dealer = CombatantState::new(&rules);
        apply_outcome(&resolve_scores(19, 21, 19, 21), &mut player, &mut dealer);
        assert_eq!((player.hp, dealer.hp), (40, 40));
    }

    #[test]
    fn poison_double_knockout_favours_dealer() {
        let rules = RuleSet::default();
        let mut player = CombatantState::new(&rules);
        let mut dealer = CombatantState::new(&rules);
        player.hp = 2;
        dealer.hp = 1;
        player.poison_stacks = 2;
        dealer.poison_stacks = 4;
        let tick = apply_poison(&mut player, &mut dealer);
        assert_eq!(tick.winner, Some(Winner::Dealer));
        assert_eq!((player.hp, dealer.hp), (0, 0));
    }

    #[test]
    fn poison_without_stacks_is_quiet() {
        let rules = RuleSet::default();
        let mut player = CombatantState::new(&rules);
        let mut dealer = CombatantState::new(&rules);
        let tick = apply_poison(&mut player, &mut dealer);
        assert_eq!(
            tick,
            PoisonTick {
                player_damage: 0,
                dealer_damage: 0,
                winner: None
            }
        );
    }
}
