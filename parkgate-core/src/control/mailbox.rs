//! Single-slot hand-off between the byte-arrival and control contexts

/// Holds at most one pending item; a newer item replaces an older one
#[derive(Debug, Clone)]
pub struct Mailbox<T> {
    slot: Option<T>,
    overwrites: u32,
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    pub const fn new() -> Self {
        Self {
            slot: None,
            overwrites: 0,
        }
    }

    /// Store an item, returning `true` if it replaced one not yet taken
    pub fn post(&mut self, item: T) -> bool {
        let replaced = self.slot.replace(item).is_some();
        if replaced {
            self.overwrites = self.overwrites.wrapping_add(1);
        }
        replaced
    }

    /// Remove the pending item
    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Items dropped because a newer one arrived first
    pub fn overwrites(&self) -> u32 {
        self.overwrites
    }
}
