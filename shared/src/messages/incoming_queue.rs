use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::types::HolderId;

/// Raw payloads waiting to be decoded. Transports push from any thread; the
/// owning side drains on its own thread.
#[derive(Default)]
pub struct IncomingQueue {
    payloads: Mutex<VecDeque<(HolderId, Box<[u8]>)>>,
}

impl IncomingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, sender: HolderId, payload: Box<[u8]>) {
        self.payloads.lock().push_back((sender, payload));
    }

    /// Takes everything queued so far, in arrival order
    pub fn drain(&self) -> Vec<(HolderId, Box<[u8]>)> {
        self.payloads.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.payloads.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.lock().is_empty()
    }
}
