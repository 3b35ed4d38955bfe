use serde::{Deserialize, Serialize};

use crate::error::CiuemaError;

/// Base URL for the generated species placeholder image.
const SPECIES_PLACEHOLDER_BASE: &str = "https://via.placeholder.com/400x300.png?text=";

/// Uppercase a raw species code and strip every whitespace character.
pub fn normalize_code(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Placeholder image URL derived from a species' common name.
pub fn placeholder_image_url(name: &str) -> String {
    let text: String = name
        .chars()
        .map(|c| if c.is_whitespace() { '+' } else { c })
        .collect();
    format!("{SPECIES_PLACEHOLDER_BASE}{text}")
}

/// One cataloged specimen. `id` is its catalog code and the primary key
/// within its collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Species {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub family: String,
    pub order: String,
    pub description: String,
    pub habitat: String,
    pub location: String,
    pub point_number: String,
    pub capture_date: String,
    pub fishing_gear: String,
    pub image_url: String,
}

impl Species {
    /// A species with the required fields set and every optional field empty.
    pub fn new(id: &str, name: impl Into<String>, scientific_name: impl Into<String>) -> Self {
        Self {
            id: normalize_code(id),
            name: name.into(),
            scientific_name: scientific_name.into(),
            ..Self::default()
        }
    }

    /// Whether this species' code matches `code` after normalization.
    pub fn has_code(&self, code: &str) -> bool {
        normalize_code(&self.id) == normalize_code(code)
    }

    /// The stored image, or the name-derived placeholder when none was given.
    pub fn image_or_placeholder(&self) -> String {
        if self.image_url.is_empty() {
            placeholder_image_url(&self.name)
        } else {
            self.image_url.clone()
        }
    }
}

/// Species fields as entered, before they become a catalog record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesDraft {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub family: String,
    pub order: String,
    pub description: String,
    pub habitat: String,
    pub location: String,
    pub point_number: String,
    pub capture_date: String,
    pub fishing_gear: String,
    pub image_url: String,
}

impl SpeciesDraft {
    /// Check the required fields. The code is checked after normalization.
    pub fn validate(&self) -> Result<(), CiuemaError> {
        if normalize_code(&self.id).is_empty() {
            return Err(CiuemaError::validation("id", "species code is required"));
        }
        if self.name.trim().is_empty() {
            return Err(CiuemaError::validation("name", "common name is required"));
        }
        if self.scientific_name.trim().is_empty() {
            return Err(CiuemaError::validation(
                "scientific_name",
                "scientific name is required",
            ));
        }
        Ok(())
    }
}

impl From<&Species> for SpeciesDraft {
    fn from(species: &Species) -> Self {
        Self {
            id: species.id.clone(),
            name: species.name.clone(),
            scientific_name: species.scientific_name.clone(),
            family: species.family.clone(),
            order: species.order.clone(),
            description: species.description.clone(),
            habitat: species.habitat.clone(),
            location: species.location.clone(),
            point_number: species.point_number.clone(),
            capture_date: species.capture_date.clone(),
            fishing_gear: species.fishing_gear.clone(),
            image_url: species.image_url.clone(),
        }
    }
}

impl From<SpeciesDraft> for Species {
    fn from(draft: SpeciesDraft) -> Self {
        Self {
            id: normalize_code(&draft.id),
            name: draft.name,
            scientific_name: draft.scientific_name,
            family: draft.family,
            order: draft.order,
            description: draft.description,
            habitat: draft.habitat,
            location: draft.location,
            point_number: draft.point_number,
            capture_date: draft.capture_date,
            fishing_gear: draft.fishing_gear,
            image_url: draft.image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" gup - 001 "), "GUP-001");
        assert_eq!(normalize_code("a\tb\nc"), "ABC");
        assert_eq!(normalize_code(""), "");
    }

    #[test]
    fn test_placeholder_replaces_whitespace() {
        assert_eq!(
            placeholder_image_url("Blue Tang"),
            "https://via.placeholder.com/400x300.png?text=Blue+Tang"
        );
    }

    #[test]
    fn test_missing_optional_fields_default_to_empty() {
        let json = r#"{"id":"GUP-001","name":"Guppy","scientificName":"Poecilia reticulata"}"#;
        let species: Species = serde_json::from_str(json).unwrap();
        assert_eq!(species.id, "GUP-001");
        assert_eq!(species.scientific_name, "Poecilia reticulata");
        assert!(species.family.is_empty());
        assert!(species.capture_date.is_empty());
    }

    #[test]
    fn test_camel_case_field_names() {
        let mut species = Species::new("gup-001", "Guppy", "Poecilia reticulata");
        species.fishing_gear = "hand net".into();
        let value = serde_json::to_value(&species).unwrap();
        assert_eq!(value["scientificName"], "Poecilia reticulata");
        assert_eq!(value["fishingGear"], "hand net");
        assert_eq!(value["id"], "GUP-001");
    }

    #[test]
    fn test_draft_converts_with_normalized_code() {
        let draft = SpeciesDraft {
            id: " gup - 001".into(),
            name: "Guppy".into(),
            scientific_name: "Poecilia reticulata".into(),
            habitat: "streams".into(),
            ..SpeciesDraft::default()
        };
        draft.validate().unwrap();

        let species = Species::from(draft);
        assert_eq!(species.id, "GUP-001");
        assert_eq!(species.habitat, "streams");
        assert_eq!(SpeciesDraft::from(&species).id, "GUP-001");
    }

    #[test]
    fn test_draft_requires_code_and_names() {
        let blank_code = SpeciesDraft {
            id: "  ".into(),
            name: "Guppy".into(),
            scientific_name: "Poecilia reticulata".into(),
            ..SpeciesDraft::default()
        };
        assert!(matches!(
            blank_code.validate(),
            Err(CiuemaError::Validation { field, .. }) if field == "id"
        ));

        let blank_name = SpeciesDraft {
            id: "GUP-001".into(),
            scientific_name: "Poecilia reticulata".into(),
            ..SpeciesDraft::default()
        };
        assert!(matches!(
            blank_name.validate(),
            Err(CiuemaError::Validation { field, .. }) if field == "name"
        ));
    }
}
