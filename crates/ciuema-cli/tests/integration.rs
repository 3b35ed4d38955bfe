use ciuema_catalog::image::image_to_data_url;
use ciuema_catalog::repository::{self, CollectionPatch};
use ciuema_catalog::search::filter_species_by_code;
use ciuema_catalog::Catalog;
use ciuema_core::config::CiuemaConfig;
use ciuema_core::error::CiuemaError;
use ciuema_core::models::app_data::AppData;
use ciuema_core::models::species::Species;
use ciuema_store::{load_app_data, DataStore, SqliteStore, APP_DATA_KEY};

#[test]
fn test_config_defaults() {
    let config = CiuemaConfig::default();
    assert!(config.describe.enabled);
    assert_eq!(config.describe.model, "gemini-2.5-flash");
    assert_eq!(config.describe.timeout_secs, 30);
}

#[test]
fn test_config_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = CiuemaConfig::default();
    config.describe.enabled = false;
    config.save_to(&path).unwrap();

    let loaded = CiuemaConfig::load_from(&path).unwrap();
    assert!(!loaded.describe.enabled);
}

#[test]
fn test_full_pipeline_in_memory() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut catalog = Catalog::open(&store);

    // 1. Sign in and create a collection
    catalog.login("jsilva").unwrap();
    let reef = catalog.create_collection("Reef Fish", None).unwrap();
    assert_eq!(catalog.session().active(), Some(&reef));

    // 2. Catalog species
    let mut guppy = Species::new("gup-001", "Guppy", "Poecilia reticulata");
    guppy.family = "Poeciliidae".into();
    catalog.add_species(guppy).unwrap();
    catalog
        .add_species(Species::new("TET-001", "Neon tetra", "Paracheirodon innesi"))
        .unwrap();
    catalog
        .add_species(Species::new("GUP-002", "Endler", "Poecilia wingei"))
        .unwrap();

    let found: Vec<&str> = catalog
        .search_species("gup")
        .unwrap()
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(found, vec!["GUP-001", "GUP-002"]);

    // 3. Edit in place
    let mut edited = catalog
        .active_collection()
        .unwrap()
        .find_species("GUP-001")
        .cloned()
        .unwrap();
    edited.habitat = "Freshwater streams".into();
    catalog.save_species(edited).unwrap();

    let col = catalog.active_collection().unwrap();
    assert_eq!(col.species.len(), 3);
    assert_eq!(col.species[0].habitat, "Freshwater streams");

    // 4. Share, then try to drop everyone including the owner
    catalog.share_collection(&reef, "mcosta").unwrap();
    catalog
        .update_collection(
            &reef,
            CollectionPatch {
                authorized_users: Some(Vec::new()),
                ..CollectionPatch::default()
            },
        )
        .unwrap();
    assert_eq!(
        catalog.data().collection(&reef).unwrap().authorized_users,
        vec!["jsilva"]
    );

    // 5. Delete a species, and one that does not exist
    catalog.delete_species("TET-001").unwrap();
    catalog.delete_species("NOPE-404").unwrap();
    assert_eq!(catalog.search_species("").unwrap().len(), 2);

    // 6. Everything was written through
    let stored = load_app_data(&store);
    assert_eq!(&stored, catalog.data());

    // 7. Logout clears the session but keeps the data
    catalog.logout().unwrap();
    assert!(catalog.session().active().is_none());
    assert_eq!(load_app_data(&store).collections.len(), 1);
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ciuema.db");

    let reef = {
        let store = SqliteStore::open(&db_path).unwrap();
        let mut catalog = Catalog::open(store);
        catalog.login("jsilva").unwrap();
        let reef = catalog.create_collection("Reef Fish", None).unwrap();
        catalog
            .add_species(Species::new("GUP-001", "Guppy", "Poecilia reticulata"))
            .unwrap();
        reef
    };

    let store = SqliteStore::open(&db_path).unwrap();
    let mut catalog = Catalog::open(store);
    assert_eq!(catalog.current_user(), Some("jsilva"));
    // A fresh session starts on the collection list.
    assert!(catalog.active_collection().is_none());

    catalog.select_collection(&reef).unwrap();
    assert_eq!(catalog.search_species("GUP").unwrap().len(), 1);
}

#[test]
fn test_corrupt_store_starts_empty() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set(APP_DATA_KEY, "not json at all").unwrap();

    let mut catalog = Catalog::open(&store);
    assert_eq!(catalog.data(), &AppData::default());

    // The next mutation overwrites the bad value.
    catalog.login("jsilva").unwrap();
    assert_eq!(load_app_data(&store).current_user.as_deref(), Some("jsilva"));
}

#[test]
fn test_repository_scenarios() {
    let data = AppData::default();
    let (data, id) =
        repository::create_collection(&data, "Reef Fish", Some("jsilva"), None).unwrap();

    let data = repository::upsert_species(
        &data,
        &id,
        Species::new("GUP-001", "Guppy", "Poecilia reticulata"),
    )
    .unwrap();

    let col = data.collection(&id).unwrap();
    let hits: Vec<&Species> = filter_species_by_code(col, "gup").collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "GUP-001");

    let blank = Species::new("", "Guppy", "Poecilia reticulata");
    let err = repository::upsert_species(&data, &id, blank).unwrap_err();
    assert!(matches!(err, CiuemaError::Validation { .. }));
}

#[test]
fn test_collection_image_is_embedded() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("reef.png");
    std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

    let mut catalog = Catalog::open(SqliteStore::open_in_memory().unwrap());
    catalog.login("jsilva").unwrap();
    let url = image_to_data_url(&image).unwrap();
    let id = catalog.create_collection("Reef Fish", Some(url)).unwrap();

    let col = catalog.data().collection(&id).unwrap();
    assert!(col.image_url.starts_with("data:image/png;base64,"));
}
