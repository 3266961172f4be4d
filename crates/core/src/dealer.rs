//! The rival's turn policy: an ordered rule list evaluated against a snapshot
//! of the table. The first rule that fires decides the tick.

use crate::{CombatantState, DealerTuning, ItemId, ItemKind, RandomSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealerAction {
    /// Both sides have stood.
    Resolve,
    /// Dealer is done for now; the player still has to act.
    YieldToPlayer,
    UseItem(ItemId),
    Hit,
    Stand,
}

/// Read-only view handed to every rule.
#[derive(Debug, Clone, Copy)]
pub struct DealerView<'a> {
    pub dealer: &'a CombatantState,
    pub player: &'a CombatantState,
    pub max_hp: i32,
    pub tuning: &'a DealerTuning,
}

impl DealerView<'_> {
    fn holding(&self, kind: ItemKind) -> Option<ItemId> {
        self.dealer.inventory.first_of(kind).map(|item| item.id)
    }
}

pub type RuleFn = fn(&DealerView<'_>, &mut dyn RandomSource) -> Option<DealerAction>;

pub struct DealerRule {
    pub name: &'static str,
    pub pick: RuleFn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerDecision {
    pub rule: &'static str,
    pub action: DealerAction,
}

pub const DEALER_RULES: &[DealerRule] = &[
    DealerRule {
        name: "already_stood",
        pick: already_stood,
    },
    DealerRule {
        name: "steal",
        pick: steal,
    },
    DealerRule {
        name: "squeeze_limit",
        pick: squeeze_limit,
    },
    DealerRule {
        name: "poison",
        pick: poison,
    },
    DealerRule {
        name: "cure",
        pick: cure,
    },
    DealerRule {
        name: "heal",
        pick: heal,
    },
    DealerRule {
        name: "boost",
        pick: boost,
    },
    DealerRule {
        name: "recover_bust",
        pick: recover_bust,
    },
    DealerRule {
        name: "hit_or_stand",
        pick: hit_or_stand,
    },
];

pub fn decide(view: &DealerView<'_>, rng: &mut dyn RandomSource) -> DealerDecision {
    for rule in DEALER_RULES {
        if let Some(action) = (rule.pick)(view, rng) {
            tracing::debug!(rule = rule.name, ?action, "dealer rule fired");
            return DealerDecision {
                rule: rule.name,
                action,
            };
        }
    }
    DealerDecision {
        rule: "fallthrough",
        action: DealerAction::Stand,
    }
}

fn already_stood(view: &DealerView<'_>, _: &mut dyn RandomSource) -> Option<DealerAction> {
    if !view.dealer.stood {
        return None;
    }
    if view.player.stood {
        Some(DealerAction::Resolve)
    } else {
        Some(DealerAction::YieldToPlayer)
    }
}

fn steal(view: &DealerView<'_>, _: &mut dyn RandomSource) -> Option<DealerAction> {
    if view.player.inventory.is_empty() {
        return None;
    }
    view.holding(ItemKind::Thief).map(DealerAction::UseItem)
}

fn squeeze_limit(view: &DealerView<'_>, _: &mut dyn RandomSource) -> Option<DealerAction> {
    view.holding(ItemKind::ScoreLimitChange)
        .map(DealerAction::UseItem)
}

fn poison(view: &DealerView<'_>, _: &mut dyn RandomSource) -> Option<DealerAction> {
    view.holding(ItemKind::Poison).map(DealerAction::UseItem)
}

fn cure(view: &DealerView<'_>, _: &mut dyn RandomSource) -> Option<DealerAction> {
    if !view.dealer.is_poisoned() {
        return None;
    }
    view.holding(ItemKind::Antidote).map(DealerAction::UseItem)
}

fn heal(view: &DealerView<'_>, _: &mut dyn RandomSource) -> Option<DealerAction> {
    if view.dealer.hp > view.max_hp - view.tuning.heal_margin {
        return None;
    }
    view.holding(ItemKind::Heal).map(DealerAction::UseItem)
}

fn boost(view: &DealerView<'_>, _: &mut dyn RandomSource) -> Option<DealerAction> {
    if view.dealer.effective_score() > view.tuning.boost_at_or_below {
        return None;
    }
    view.holding(ItemKind::ScoreBoost).map(DealerAction::UseItem)
}

fn recover_bust(view: &DealerView<'_>, _: &mut dyn RandomSource) -> Option<DealerAction> {
    if !view.dealer.is_bust() {
        return None;
    }
    view.holding(ItemKind::ScoreModifier)
        .map(DealerAction::UseItem)
}

fn hit_or_stand(view: &DealerView<'_>, rng: &mut dyn RandomSource) -> Option<DealerAction> {
    let tuning = view.tuning;
    let score = view.dealer.effective_score();

    let mut should_stand = score >= tuning.firm_stand
        || (score >= tuning.soft_stand && rng.roll() > tuning.soft_stand_roll);

    // Holding a modifier covers an overdraw, so push for a better hand.
    let has_modifier = view.dealer.inventory.has(ItemKind::ScoreModifier);
    if has_modifier
        && (tuning.overdraw_min..=tuning.overdraw_max).contains(&score)
        && rng.chance(tuning.overdraw_chance)
    {
        should_stand = false;
    }

    if score >= view.dealer.score_limit {
        should_stand = true;
    }

    if should_stand {
        if let Some(id) = view.holding(ItemKind::HandSwap) {
            if view.player.effective_score() > score {
                return Some(DealerAction::UseItem(id));
            }
        }
        if let Some(id) = view.holding(ItemKind::Sabotage) {
            return Some(DealerAction::UseItem(id));
        }
        return Some(DealerAction::Stand);
    }

    if let Some(id) = view.holding(ItemKind::ChoiceCard) {
        return Some(DealerAction::UseItem(id));
    }
    Some(DealerAction::Hit)
}
