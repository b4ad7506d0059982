use attrib_shared::HolderId;

use crate::server::Server;

pub struct TrackerScopeRef<'s> {
    server: &'s Server,
    tracker: HolderId,
}

impl<'s> TrackerScopeRef<'s> {
    pub(crate) fn new(server: &'s Server, tracker: &HolderId) -> Self {
        Self {
            server,
            tracker: *tracker,
        }
    }

    /// Returns true if the tracker is tracking the holder
    pub fn has(&self, target: &HolderId) -> bool {
        self.server.tracker_scope_has(&self.tracker, target)
    }

    /// Every holder the tracker is tracking
    pub fn targets(&self) -> Vec<HolderId> {
        self.server.tracker_scope_targets(&self.tracker)
    }

    /// Components of `target` the tracker currently mirrors
    pub fn sent_components(&self, target: &HolderId) -> Vec<String> {
        self.server.tracker_scope_sent(&self.tracker, target)
    }
}

pub struct TrackerScopeMut<'s> {
    server: &'s mut Server,
    tracker: HolderId,
}

impl<'s> TrackerScopeMut<'s> {
    pub(crate) fn new(server: &'s mut Server, tracker: &HolderId) -> Self {
        Self {
            server,
            tracker: *tracker,
        }
    }

    /// Returns true if the tracker is tracking the holder
    pub fn has(&self, target: &HolderId) -> bool {
        self.server.tracker_scope_has(&self.tracker, target)
    }

    /// Starts tracking a holder, sending it the holder's public state
    pub fn include(&mut self, target: &HolderId) -> &mut Self {
        self.server.on_start_tracking(&self.tracker, target);

        self
    }

    /// Stops tracking a holder, removing its components on the tracker
    pub fn exclude(&mut self, target: &HolderId) -> &mut Self {
        self.server.on_stop_tracking(&self.tracker, target);

        self
    }

    /// Stops tracking every holder
    pub fn clear(&mut self) -> &mut Self {
        for target in self.server.tracker_scope_targets(&self.tracker) {
            self.server.on_stop_tracking(&self.tracker, &target);
        }

        self
    }
}
