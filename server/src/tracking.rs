use std::collections::{BTreeSet, HashMap};

use attrib_shared::HolderId;

/// Which peers track which holders, and which components each tracker has
/// been sent for each holder it tracks
#[derive(Default)]
pub(crate) struct TrackingMap {
    // target -> tracker -> component ids sent
    targets: HashMap<HolderId, HashMap<HolderId, BTreeSet<String>>>,
}

impl TrackingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when `tracker` was already tracking `target`
    pub fn start(&mut self, tracker: &HolderId, target: &HolderId) -> bool {
        let trackers = self.targets.entry(*target).or_default();
        if trackers.contains_key(tracker) {
            return false;
        }
        trackers.insert(*tracker, BTreeSet::new());
        true
    }

    /// Ends tracking and returns the component ids the tracker was sent
    pub fn stop(&mut self, tracker: &HolderId, target: &HolderId) -> Option<BTreeSet<String>> {
        let trackers = self.targets.get_mut(target)?;
        let sent = trackers.remove(tracker);
        if trackers.is_empty() {
            self.targets.remove(target);
        }
        sent
    }

    pub fn is_tracking(&self, tracker: &HolderId, target: &HolderId) -> bool {
        self.targets
            .get(target)
            .is_some_and(|trackers| trackers.contains_key(tracker))
    }

    /// Every peer tracking `target`, in id order
    pub fn trackers_of(&self, target: &HolderId) -> Vec<HolderId> {
        let mut trackers: Vec<_> = self
            .targets
            .get(target)
            .map(|trackers| trackers.keys().copied().collect())
            .unwrap_or_default();
        trackers.sort();
        trackers
    }

    /// Every holder `tracker` is tracking, in id order
    pub fn targets_of(&self, tracker: &HolderId) -> Vec<HolderId> {
        let mut targets: Vec<_> = self
            .targets
            .iter()
            .filter(|(_, trackers)| trackers.contains_key(tracker))
            .map(|(target, _)| *target)
            .collect();
        targets.sort();
        targets
    }

    pub fn sent_components(&self, tracker: &HolderId, target: &HolderId) -> Vec<String> {
        self.targets
            .get(target)
            .and_then(|trackers| trackers.get(tracker))
            .map(|sent| sent.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// No-op unless `tracker` is tracking `target`
    pub fn record_sent(&mut self, tracker: &HolderId, target: &HolderId, component_id: &str) {
        if let Some(sent) = self
            .targets
            .get_mut(target)
            .and_then(|trackers| trackers.get_mut(tracker))
        {
            sent.insert(component_id.to_string());
        }
    }

    /// Forgets that `tracker` was sent `component_id` of `target`
    pub fn forget_sent(&mut self, tracker: &HolderId, target: &HolderId, component_id: &str) {
        if let Some(sent) = self
            .targets
            .get_mut(target)
            .and_then(|trackers| trackers.get_mut(tracker))
        {
            sent.remove(component_id);
        }
    }

    /// Forgets that `component_id` of `target` was sent anywhere. Returns the
    /// trackers that had been sent it.
    pub fn forget_component(&mut self, target: &HolderId, component_id: &str) -> Vec<HolderId> {
        let mut trackers: Vec<_> = self
            .targets
            .get_mut(target)
            .map(|trackers| {
                trackers
                    .iter_mut()
                    .filter_map(|(tracker, sent)| sent.remove(component_id).then_some(*tracker))
                    .collect()
            })
            .unwrap_or_default();
        trackers.sort();
        trackers
    }

    /// Drops every relation where `holder` is tracker or target
    pub fn remove_holder(&mut self, holder: &HolderId) {
        self.targets.remove(holder);
        self.targets.retain(|_, trackers| {
            trackers.remove(holder);
            !trackers.is_empty()
        });
    }
}
