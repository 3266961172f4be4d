//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod combat;
pub mod config;
pub mod dealer;
pub mod deck;
pub mod duel;
pub mod events;
pub mod hand;
pub mod inventory;
pub mod items;
pub mod loot;
pub mod rng;
pub mod state;

pub use cards::*;
pub use combat::*;
pub use config::*;
pub use dealer::*;
pub use deck::*;
pub use duel::*;
pub use events::*;
pub use hand::*;
pub use inventory::*;
pub use items::*;
pub use loot::*;
pub use rng::*;
pub use state::*;
