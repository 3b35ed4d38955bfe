use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::collection::{Collection, CollectionId};

/// The whole persisted state: every collection plus the signed-in identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppData {
    pub collections: BTreeMap<CollectionId, Collection>,
    pub current_user: Option<String>,
}

impl AppData {
    pub fn collection(&self, id: &CollectionId) -> Option<&Collection> {
        self.collections.get(id)
    }

    pub fn collection_mut(&mut self, id: &CollectionId) -> Option<&mut Collection> {
        self.collections.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let data = AppData::default();
        assert!(data.collections.is_empty());
        assert!(data.current_user.is_none());
    }

    #[test]
    fn test_json_shape() {
        let mut data = AppData {
            current_user: Some("jsilva".into()),
            ..AppData::default()
        };
        let col = Collection::new("Reef Fish".into(), "jsilva".into(), None);
        let id = col.id.clone();
        data.collections.insert(id.clone(), col);

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["currentUser"], "jsilva");
        assert_eq!(value["collections"][id.as_str()]["ownerId"], "jsilva");

        let back: AppData = serde_json::from_value(value).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_null_user_parses() {
        let data: AppData = serde_json::from_str(r#"{"collections":{},"currentUser":null}"#).unwrap();
        assert_eq!(data, AppData::default());
    }
}
