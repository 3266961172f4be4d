use crate::{
    Card, CombatantState, GameConfig, GamePhase, GameState, Inventory, InventoryError,
    InventoryItem, ItemDef, ItemId, ItemKind, RandomSource, RngState, Side,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod effects;
mod player;
mod rewards;
mod rival;
mod round;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(GamePhase),
    #[error("{0:?} cannot act from here")]
    NotYourTurn(Side),
    #[error("{kind:?} cannot be used during {phase:?}")]
    ItemNotAllowed { kind: ItemKind, phase: GamePhase },
    #[error("no item {0} in inventory")]
    UnknownItem(ItemId),
    #[error("no loot option {0}")]
    UnknownLoot(ItemId),
    #[error("invalid inventory slot {0}")]
    InvalidSlot(usize),
    #[error("invalid score limit {0}")]
    InvalidLimit(i32),
    #[error("card is not one of the offered choices")]
    InvalidCardChoice,
    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryError),
}

impl GameError {
    /// Everything except a full inventory is a command issued at the wrong time
    /// or with the wrong target.
    pub fn is_illegal_action(&self) -> bool {
        !matches!(self, GameError::Inventory(InventoryError::Full))
    }
}

/// Presentation pacing hint attached to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pause {
    /// Before the next `dealer_tick`.
    DealerThink,
    /// Hands are being exchanged on screen.
    HandSwap,
    /// Before `settle_round`.
    RoundSettle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub phase: GamePhase,
    pub pause: Option<Pause>,
}

impl Transition {
    pub fn to(phase: GamePhase) -> Self {
        Self { phase, pause: None }
    }

    pub fn with_pause(phase: GamePhase, pause: Pause) -> Self {
        Self {
            phase,
            pause: Some(pause),
        }
    }
}

/// The rules engine. Every mutation goes through a command method, each of
/// which either fully applies or returns an error with nothing changed.
#[derive(Debug)]
pub struct DuelState {
    pub config: GameConfig,
    pub state: GameState,
    rng: Box<dyn RandomSource>,
    loot: Vec<InventoryItem>,
    card_choices: Vec<Card>,
    revealed: Vec<Card>,
    next_item_id: u32,
}

impl DuelState {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, Box::new(RngState::from_entropy()))
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Box::new(RngState::from_seed(seed)))
    }

    pub fn with_rng(config: GameConfig, rng: Box<dyn RandomSource>) -> Self {
        let state = GameState::new(&config.rules);
        Self {
            config,
            state,
            rng,
            loot: Vec::new(),
            card_choices: Vec::new(),
            revealed: Vec::new(),
            next_item_id: 1,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn combatant(&self, side: Side) -> &CombatantState {
        self.state.side(side)
    }

    pub fn hand(&self, side: Side) -> &[Card] {
        &self.state.side(side).hand
    }

    pub fn inventory(&self, side: Side) -> &Inventory {
        &self.state.side(side).inventory
    }

    pub fn effective_score(&self, side: Side) -> i32 {
        self.state.side(side).effective_score()
    }

    pub fn display_score(&self, side: Side) -> i32 {
        self.state.side(side).display_score()
    }

    pub fn loot_options(&self) -> &[InventoryItem] {
        &self.loot
    }

    pub fn card_choices(&self) -> &[Card] {
        &self.card_choices
    }

    /// Cards shown by SeeNext3 or Spy, in draw order.
    pub fn revealed_cards(&self) -> &[Card] {
        &self.revealed
    }

    /// Give a catalog entry a fresh id.
    pub fn mint_item(&mut self, def: &ItemDef) -> InventoryItem {
        let id = ItemId(self.next_item_id);
        self.next_item_id = self.next_item_id.saturating_add(1);
        InventoryItem::from_def(id, def)
    }

    pub(crate) fn rng(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.state.phase != phase {
            tracing::debug!(from = ?self.state.phase, to = ?phase, "phase change");
        }
        self.state.phase = phase;
    }

    fn expect_phase(&self, allowed: &[GamePhase]) -> Result<(), GameError> {
        if allowed.contains(&self.state.phase) {
            Ok(())
        } else {
            Err(GameError::InvalidPhase(self.state.phase))
        }
    }
}
