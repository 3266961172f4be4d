use crate::{Card, InventoryItem, Side, Winner};
use serde::{Deserialize, Serialize};

/// Structured log record. Rendering and localization belong to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    GameStarted,
    RoundStarted {
        round: u32,
    },
    DecksShuffled,
    PoisonDamage {
        side: Side,
        damage: i32,
        hp: i32,
    },
    CardDrawn {
        side: Side,
        card: Card,
    },
    Stood {
        side: Side,
    },
    BustWarning {
        side: Side,
        score: i32,
        limit: i32,
    },
    ItemUsed {
        side: Side,
        item: InventoryItem,
    },
    Healed {
        side: Side,
        amount: i32,
        hp: i32,
    },
    ModifierChanged {
        side: Side,
        modifier: i32,
    },
    Poisoned {
        side: Side,
        stacks: i32,
    },
    Cured {
        side: Side,
    },
    CardChoicesOffered {
        cards: Vec<Card>,
    },
    CardChosen {
        side: Side,
        card: Card,
    },
    CardRemoved {
        side: Side,
        card: Card,
    },
    HandsSwapped,
    BackInPlay {
        side: Side,
    },
    TopCardsRevealed {
        owner: Side,
        cards: Vec<Card>,
    },
    LimitChanged {
        side: Side,
        limit: i32,
    },
    ItemStolen {
        thief: Side,
        item: InventoryItem,
    },
    RoundEnded {
        winner: Winner,
        damage: i32,
        player_score: i32,
        dealer_score: i32,
    },
    LootOffered {
        items: Vec<InventoryItem>,
    },
    LootTaken {
        item: InventoryItem,
        replaced: Option<InventoryItem>,
    },
    LootPassed,
    RivalFoundItem {
        item: InventoryItem,
    },
    RivalSwappedItem {
        dropped: InventoryItem,
        item: InventoryItem,
    },
    GameOver {
        winner: Winner,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn events(&self) -> &[Event] {
        &self.queue
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
