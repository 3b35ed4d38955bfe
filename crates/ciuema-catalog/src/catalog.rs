use ciuema_core::error::CiuemaError;
use ciuema_core::models::app_data::AppData;
use ciuema_core::models::collection::{Collection, CollectionId};
use ciuema_core::models::species::{normalize_code, Species};
use ciuema_store::{load_app_data, save_app_data, DataStore};

use crate::repository::{self, CollectionPatch};
use crate::search::filter_species_by_code;
use crate::session::Session;

/// The application state container: the current [`AppData`], the store it is
/// persisted to, and the session's selection.
///
/// Every mutation is computed by [`repository`], written to the store in full,
/// and only then becomes the current value. Access rules (membership to view
/// or edit species, ownership to manage a collection) are checked here.
pub struct Catalog<S: DataStore> {
    store: S,
    data: AppData,
    session: Session,
}

impl<S: DataStore> Catalog<S> {
    /// Load the stored state once. Unreadable state starts empty.
    pub fn open(store: S) -> Self {
        let data = load_app_data(&store);
        Self {
            store,
            data,
            session: Session::new(),
        }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<&str> {
        self.data.current_user.as_deref()
    }

    fn commit(&mut self, next: AppData) -> Result<(), CiuemaError> {
        save_app_data(&self.store, &next)?;
        self.data = next;
        Ok(())
    }

    fn require_user(&self) -> Result<String, CiuemaError> {
        self.current_user()
            .map(str::to_string)
            .ok_or(CiuemaError::NotAuthenticated)
    }

    /// The collection, if the signed-in user may see it.
    pub fn collection(&self, id: &CollectionId) -> Result<&Collection, CiuemaError> {
        let user = self.require_user()?;
        let collection = self
            .data
            .collection(id)
            .ok_or_else(|| CiuemaError::CollectionNotFound { id: id.to_string() })?;
        if !collection.is_authorized(&user) {
            return Err(CiuemaError::NotAuthorized {
                user,
                collection: id.to_string(),
            });
        }
        Ok(collection)
    }

    fn owned_collection(&self, id: &CollectionId) -> Result<&Collection, CiuemaError> {
        let collection = self.collection(id)?;
        let user = self.require_user()?;
        if !collection.is_owner(&user) {
            return Err(CiuemaError::NotAuthorized {
                user,
                collection: id.to_string(),
            });
        }
        Ok(collection)
    }

    fn active_id(&self) -> Result<CollectionId, CiuemaError> {
        self.session
            .active()
            .cloned()
            .ok_or(CiuemaError::NoActiveCollection)
    }

    /// Sign in. Switching to a different user drops the previous selection.
    pub fn login(&mut self, user_id: &str) -> Result<(), CiuemaError> {
        let next = repository::authenticate(&self.data, user_id)?;
        let switched = next.current_user != self.data.current_user;
        self.commit(next)?;
        if switched {
            self.session.clear();
        }
        tracing::info!(user = self.current_user(), "signed in");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), CiuemaError> {
        let next = repository::deauthenticate(&self.data);
        self.commit(next)?;
        self.session.clear();
        tracing::info!("signed out");
        Ok(())
    }

    /// Collections the signed-in user can see, sorted by name.
    pub fn visible_collections(&self) -> Vec<&Collection> {
        let Some(user) = self.current_user() else {
            return Vec::new();
        };
        let mut visible = repository::list_visible_collections(&self.data, user);
        visible.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        visible
    }

    /// Create a collection owned by the signed-in user and select it.
    pub fn create_collection(
        &mut self,
        name: &str,
        image_url: Option<String>,
    ) -> Result<CollectionId, CiuemaError> {
        let (next, id) =
            repository::create_collection(&self.data, name, self.current_user(), image_url)?;
        self.commit(next)?;
        self.session.select(id.clone());
        tracing::info!(collection = %id, "created collection");
        Ok(id)
    }

    pub fn select_collection(&mut self, id: &CollectionId) -> Result<&Collection, CiuemaError> {
        self.collection(id)?;
        self.session.select(id.clone());
        self.collection(id)
    }

    pub fn back_to_collections(&mut self) {
        self.session.back_to_collections();
    }

    /// The selected collection, if it still exists.
    pub fn active_collection(&self) -> Option<&Collection> {
        self.session.active().and_then(|id| self.data.collection(id))
    }

    pub fn update_collection(
        &mut self,
        id: &CollectionId,
        patch: CollectionPatch,
    ) -> Result<(), CiuemaError> {
        self.owned_collection(id)?;
        let next = repository::update_collection(&self.data, id, patch)?;
        self.commit(next)?;
        tracing::info!(collection = %id, "updated collection");
        Ok(())
    }

    pub fn share_collection(&mut self, id: &CollectionId, user: &str) -> Result<(), CiuemaError> {
        self.owned_collection(id)?;
        let next = repository::add_authorized_user(&self.data, id, user)?;
        self.commit(next)?;
        tracing::info!(collection = %id, user, "granted access");
        Ok(())
    }

    pub fn unshare_collection(&mut self, id: &CollectionId, user: &str) -> Result<(), CiuemaError> {
        self.owned_collection(id)?;
        let next = repository::remove_authorized_user(&self.data, id, user)?;
        self.commit(next)?;
        tracing::info!(collection = %id, user, "revoked access");
        Ok(())
    }

    pub fn delete_collection(&mut self, id: &CollectionId) -> Result<(), CiuemaError> {
        self.owned_collection(id)?;
        let next = repository::delete_collection(&self.data, id)?;
        self.commit(next)?;
        if self.session.active() == Some(id) {
            self.session.back_to_collections();
        }
        tracing::info!(collection = %id, "deleted collection");
        Ok(())
    }

    /// Add a new species to the active collection. Fails if the code is taken.
    pub fn add_species(&mut self, species: Species) -> Result<(), CiuemaError> {
        let id = self.active_id()?;
        let code = normalize_code(&species.id);
        if self.collection(&id)?.species_codes().contains(&code.as_str()) {
            return Err(CiuemaError::DuplicateSpecies { id: code });
        }
        self.save_species(species)
    }

    /// Insert or replace a species in the active collection.
    pub fn save_species(&mut self, species: Species) -> Result<(), CiuemaError> {
        let id = self.active_id()?;
        self.collection(&id)?;
        let code = species.id.clone();
        let next = repository::upsert_species(&self.data, &id, species)?;
        self.commit(next)?;
        tracing::info!(collection = %id, species = %code, "saved species");
        Ok(())
    }

    pub fn delete_species(&mut self, code: &str) -> Result<(), CiuemaError> {
        let id = self.active_id()?;
        self.collection(&id)?;
        let next = repository::delete_species(&self.data, &id, code)?;
        self.commit(next)?;
        tracing::info!(collection = %id, species = code, "deleted species");
        Ok(())
    }

    /// Species of the active collection whose code contains `term`.
    pub fn search_species(&self, term: &str) -> Result<Vec<&Species>, CiuemaError> {
        let id = self.active_id()?;
        let collection = self.collection(&id)?;
        Ok(filter_species_by_code(collection, term).collect())
    }
}
