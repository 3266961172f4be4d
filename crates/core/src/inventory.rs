use crate::{InventoryItem, ItemId, ItemKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub slots: usize,
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("inventory full")]
    Full,
    #[error("no slot {0}")]
    NoSuchSlot(usize),
}

impl Inventory {
    pub fn with_slots(slots: usize) -> Self {
        Self {
            slots,
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.slots
    }

    pub fn add(&mut self, item: InventoryItem) -> Result<(), InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full);
        }
        self.items.push(item);
        Ok(())
    }

    /// Swap `item` into `slot`, handing back what was there.
    pub fn replace(
        &mut self,
        slot: usize,
        item: InventoryItem,
    ) -> Result<InventoryItem, InventoryError> {
        let target = self
            .items
            .get_mut(slot)
            .ok_or(InventoryError::NoSuchSlot(slot))?;
        Ok(std::mem::replace(target, item))
    }

    pub fn get(&self, id: ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn take(&mut self, id: ItemId) -> Option<InventoryItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn take_at(&mut self, slot: usize) -> Option<InventoryItem> {
        (slot < self.items.len()).then(|| self.items.remove(slot))
    }

    pub fn has(&self, kind: ItemKind) -> bool {
        self.items.iter().any(|item| item.kind == kind)
    }

    pub fn first_of(&self, kind: ItemKind) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.kind == kind)
    }

    pub fn position(&self, pred: impl Fn(&InventoryItem) -> bool) -> Option<usize> {
        self.items.iter().position(pred)
    }
}
