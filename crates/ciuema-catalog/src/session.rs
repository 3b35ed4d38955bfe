use ciuema_core::models::collection::CollectionId;

/// Selection state for one interactive session. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct Session {
    active_collection: Option<CollectionId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&CollectionId> {
        self.active_collection.as_ref()
    }

    pub fn select(&mut self, id: CollectionId) {
        self.active_collection = Some(id);
    }

    /// Leave the current collection and return to the collection list.
    pub fn back_to_collections(&mut self) {
        self.active_collection = None;
    }

    /// Drop all selection state, as on logout.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_back() {
        let mut session = Session::new();
        assert!(session.active().is_none());

        let id = CollectionId::new();
        session.select(id.clone());
        assert_eq!(session.active(), Some(&id));

        session.back_to_collections();
        assert!(session.active().is_none());
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new();
        session.select(CollectionId::new());
        session.clear();
        assert!(session.active().is_none());
    }
}
