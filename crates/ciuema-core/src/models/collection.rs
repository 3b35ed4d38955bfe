use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::species::{normalize_code, Species};

/// Unique identifier for a collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(pub String);

impl CollectionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CollectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CollectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Placeholder image URL seeded by a collection id.
pub fn placeholder_image_url(id: &CollectionId) -> String {
    format!("https://picsum.photos/seed/{id}/500/300")
}

/// A named group of species owned by one user and shared with others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub owner_id: String,
    pub image_url: String,
    #[serde(default)]
    pub species: Vec<Species>,
    #[serde(default)]
    pub authorized_users: Vec<String>,
}

impl Collection {
    /// A fresh, empty collection visible only to its owner.
    pub fn new(name: String, owner_id: String, image_url: Option<String>) -> Self {
        let id = CollectionId::new();
        let image_url = image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| placeholder_image_url(&id));
        Self {
            id,
            name,
            authorized_users: vec![owner_id.clone()],
            owner_id,
            image_url,
            species: Vec::new(),
        }
    }

    pub fn is_owner(&self, user: &str) -> bool {
        self.owner_id == user
    }

    pub fn is_authorized(&self, user: &str) -> bool {
        self.authorized_users.iter().any(|u| u == user)
    }

    /// Look up a species by code, ignoring case and whitespace.
    pub fn find_species(&self, code: &str) -> Option<&Species> {
        let code = normalize_code(code);
        self.species.iter().find(|s| normalize_code(&s.id) == code)
    }

    /// Codes already used in this collection.
    pub fn species_codes(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.id.as_str()).collect()
    }
}
