//! Pure operations over [`AppData`]. Each returns a new value and never
//! touches storage; on error the input is left as it was.

use ciuema_core::error::CiuemaError;
use ciuema_core::models::app_data::AppData;
use ciuema_core::models::collection::{Collection, CollectionId};
use ciuema_core::models::species::{normalize_code, Species};

/// Replacement values for a collection's editable fields.
#[derive(Debug, Clone, Default)]
pub struct CollectionPatch {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub authorized_users: Option<Vec<String>>,
}

fn not_found(id: &CollectionId) -> CiuemaError {
    CiuemaError::CollectionNotFound { id: id.to_string() }
}

/// Copy `data` and apply `f` to the collection with the given id.
fn with_collection(
    data: &AppData,
    id: &CollectionId,
    f: impl FnOnce(&mut Collection) -> Result<(), CiuemaError>,
) -> Result<AppData, CiuemaError> {
    let mut next = data.clone();
    let collection = next.collection_mut(id).ok_or_else(|| not_found(id))?;
    f(collection)?;
    Ok(next)
}

/// Trim, drop blanks and duplicates, and put the owner first if it went missing.
fn normalize_users(owner: &str, users: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(users.len() + 1);
    for user in users {
        let user = user.trim();
        if !user.is_empty() && !out.iter().any(|u| u == user) {
            out.push(user.to_string());
        }
    }
    if !out.iter().any(|u| u == owner) {
        out.insert(0, owner.to_string());
    }
    out
}

/// Sign in as `user_id`. Any non-empty identity is accepted.
pub fn authenticate(data: &AppData, user_id: &str) -> Result<AppData, CiuemaError> {
    let user = user_id.trim();
    if user.is_empty() {
        return Err(CiuemaError::validation("user id", "must not be empty"));
    }
    Ok(AppData {
        current_user: Some(user.to_string()),
        ..data.clone()
    })
}

pub fn deauthenticate(data: &AppData) -> AppData {
    AppData {
        current_user: None,
        ..data.clone()
    }
}

/// Collections `user_id` is authorized to see.
pub fn list_visible_collections<'a>(data: &'a AppData, user_id: &str) -> Vec<&'a Collection> {
    data.collections
        .values()
        .filter(|c| c.is_authorized(user_id))
        .collect()
}

/// Create an empty collection owned by `owner`.
pub fn create_collection(
    data: &AppData,
    name: &str,
    owner: Option<&str>,
    image_url: Option<String>,
) -> Result<(AppData, CollectionId), CiuemaError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CiuemaError::validation("collection name", "must not be empty"));
    }
    let owner = owner
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .ok_or(CiuemaError::NotAuthenticated)?;

    let collection = Collection::new(name.to_string(), owner.to_string(), image_url);
    let id = collection.id.clone();

    let mut next = data.clone();
    next.collections.insert(id.clone(), collection);
    Ok((next, id))
}

/// Replace a collection's name, image, or access list. The owner always stays
/// in the access list.
pub fn update_collection(
    data: &AppData,
    id: &CollectionId,
    patch: CollectionPatch,
) -> Result<AppData, CiuemaError> {
    with_collection(data, id, |collection| {
        if let Some(name) = patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(CiuemaError::validation("collection name", "must not be empty"));
            }
            collection.name = name.to_string();
        }
        if let Some(image_url) = patch.image_url {
            collection.image_url = image_url;
        }
        if let Some(users) = patch.authorized_users {
            collection.authorized_users = normalize_users(&collection.owner_id, users);
        }
        Ok(())
    })
}

/// Remove a collection together with all of its species.
pub fn delete_collection(data: &AppData, id: &CollectionId) -> Result<AppData, CiuemaError> {
    let mut next = data.clone();
    next.collections.remove(id).ok_or_else(|| not_found(id))?;
    Ok(next)
}

/// Grant `user` access to a collection. Adding an existing member is a no-op.
pub fn add_authorized_user(
    data: &AppData,
    id: &CollectionId,
    user: &str,
) -> Result<AppData, CiuemaError> {
    let user = user.trim();
    if user.is_empty() {
        return Err(CiuemaError::validation("user id", "must not be empty"));
    }
    let collection = data.collection(id).ok_or_else(|| not_found(id))?;
    let mut users = collection.authorized_users.clone();
    users.push(user.to_string());
    update_collection(
        data,
        id,
        CollectionPatch {
            authorized_users: Some(users),
            ..CollectionPatch::default()
        },
    )
}

/// Revoke `user`'s access. The owner cannot be removed.
pub fn remove_authorized_user(
    data: &AppData,
    id: &CollectionId,
    user: &str,
) -> Result<AppData, CiuemaError> {
    let user = user.trim();
    let collection = data.collection(id).ok_or_else(|| not_found(id))?;
    if collection.is_owner(user) {
        return Err(CiuemaError::OwnerRemoval {
            owner: collection.owner_id.clone(),
        });
    }
    let users = collection
        .authorized_users
        .iter()
        .filter(|u| u.as_str() != user)
        .cloned()
        .collect();
    update_collection(
        data,
        id,
        CollectionPatch {
            authorized_users: Some(users),
            ..CollectionPatch::default()
        },
    )
}

/// Insert a species, or replace the one with the same code in place.
pub fn upsert_species(
    data: &AppData,
    id: &CollectionId,
    species: Species,
) -> Result<AppData, CiuemaError> {
    let mut species = species;
    species.id = normalize_code(&species.id);

    if species.id.is_empty() {
        return Err(CiuemaError::validation("species code", "must not be empty"));
    }
    if species.name.trim().is_empty() {
        return Err(CiuemaError::validation("name", "must not be empty"));
    }
    if species.scientific_name.trim().is_empty() {
        return Err(CiuemaError::validation("scientific name", "must not be empty"));
    }
    species.image_url = species.image_or_placeholder();

    with_collection(data, id, |collection| {
        if let Some(pos) = collection.species.iter().position(|s| s.id == species.id) {
            collection.species[pos] = species;
            return Ok(());
        }
        if collection.species.iter().any(|s| s.has_code(&species.id)) {
            return Err(CiuemaError::DuplicateSpecies { id: species.id });
        }
        collection.species.push(species);
        Ok(())
    })
}

/// Remove the species with the given code. Unknown codes are ignored.
pub fn delete_species(
    data: &AppData,
    id: &CollectionId,
    species_id: &str,
) -> Result<AppData, CiuemaError> {
    with_collection(data, id, |collection| {
        collection.species.retain(|s| !s.has_code(species_id));
        Ok(())
    })
}
