//! Data loading and validation for game tuning and the item catalog.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
