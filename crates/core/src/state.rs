use crate::{effective_score, Card, Deck, Inventory, RuleSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Dealer,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Dealer];

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Dealer,
            Side::Dealer => Side::Player,
        }
    }

    pub fn winner(self) -> Winner {
        match self {
            Side::Player => Winner::Player,
            Side::Dealer => Winner::Dealer,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    PlayerTurn,
    DealerTurn,
    BustRecovery,
    RoundOver,
    LootSelection,
    ChoosingRandomCard,
    ViewingDeck,
    Spying,
    ConfiguringLimit,
    GameOver,
}

impl GamePhase {
    /// Phases in which the player may act on items.
    pub fn player_may_use_items(self) -> bool {
        matches!(self, GamePhase::PlayerTurn | GamePhase::BustRecovery)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Winner {
    #[default]
    None,
    Player,
    Dealer,
    Push,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundState {
    /// Number of the round in progress (1-based, 0 before the first deal).
    pub round: u32,
    /// Rounds that reached resolution.
    pub rounds_played: u32,
    pub winner: Winner,
    pub last_damage: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CombatantState {
    pub hp: i32,
    pub poison_stacks: i32,
    pub score_modifier: i32,
    pub score_limit: i32,
    pub inventory: Inventory,
    pub stood: bool,
    pub hand: Vec<Card>,
    pub deck: Deck,
}

impl CombatantState {
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            hp: rules.max_hp,
            poison_stacks: 0,
            score_modifier: 0,
            score_limit: rules.default_limit,
            inventory: Inventory::with_slots(rules.max_inventory),
            stood: false,
            hand: Vec::new(),
            deck: Deck::default(),
        }
    }

    pub fn effective_score(&self) -> i32 {
        effective_score(&self.hand, self.score_modifier)
    }

    /// Effective score floored at zero, for display and damage.
    pub fn display_score(&self) -> i32 {
        self.effective_score().max(0)
    }

    pub fn is_bust(&self) -> bool {
        self.effective_score() > self.score_limit
    }

    pub fn is_poisoned(&self) -> bool {
        self.poison_stacks > 0
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn heal(&mut self, amount: i32, max_hp: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(max_hp);
        self.hp - before
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount.max(0)).max(0);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub phase: GamePhase,
    pub round: RoundState,
    /// Match winner, set once the game is over.
    pub winner: Winner,
    pub player: CombatantState,
    pub dealer: CombatantState,
}

impl GameState {
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            phase: GamePhase::Idle,
            round: RoundState::default(),
            winner: Winner::None,
            player: CombatantState::new(rules),
            dealer: CombatantState::new(rules),
        }
    }

    pub fn side(&self, side: Side) -> &CombatantState {
        match side {
            Side::Player => &self.player,
            Side::Dealer => &self.dealer,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut CombatantState {
        match side {
            Side::Player => &mut self.player,
            Side::Dealer => &mut self.dealer,
        }
    }
}
