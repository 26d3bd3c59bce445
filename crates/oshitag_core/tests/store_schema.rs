use oshitag_core::store::{validate_and_repair, RawStoreData};
use oshitag_core::{
    CollectionStore, FavoriteFolder, Group, Idol, JsonFileStore, StoreData, StoreError, Tag,
    SCHEMA_VERSION,
};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::new(dir.path().join("oshitag.json"))
}

fn sample_data() -> StoreData {
    let mut data = StoreData::default();
    let mut idol = Idol::new("Miku");
    idol.cheer_color = "#39c5bb".to_string();
    idol.tags.push(Tag::new("#Miku"));
    let mut group = Group::new("VOCALOID");
    group.idols.push(idol);
    data.collection.groups.push(group);
    let mut folder = FavoriteFolder::new("Concert");
    folder.tags.push(Tag::new("#glowstick"));
    data.collection.favorites.push(folder);
    data.ensure_selection();
    data
}

#[test]
fn missing_file_loads_as_default_document() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let data = store.load().unwrap();
    assert_eq!(data, StoreData::default());
}

#[test]
fn save_then_load_round_trips_the_document() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let data = sample_data();
    store.save(&data).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, data);

    // The temp file used for atomic writes must not linger.
    assert!(!dir.path().join("oshitag.json.tmp").exists());
}

#[test]
fn corrupt_json_is_reported_and_fallback_returns_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oshitag.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::new(&path);
    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));
    assert_eq!(store.load_or_default(), StoreData::default());
}

#[test]
fn newer_schema_version_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oshitag.json");
    let newer = SCHEMA_VERSION + 1;
    std::fs::write(&path, format!(r#"{{"version": {newer}}}"#)).unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert!(matches!(
        err,
        StoreError::UnsupportedSchemaVersion { found, .. } if found == newer
    ));
}

#[test]
fn load_repairs_partial_hand_edited_documents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oshitag.json");
    // No ids, blank idol name, bad color, duplicate and empty tags.
    std::fs::write(
        &path,
        r##"{
            "version": 2,
            "groups": [{
                "name": "  G  ",
                "idols": [{
                    "name": "   ",
                    "cheerColor": "teal",
                    "tags": [
                        {"text": "miku"},
                        {"text": "#Miku"},
                        {"text": "  "}
                    ]
                }]
            }]
        }"##,
    )
    .unwrap();

    let data = JsonFileStore::new(&path).load().unwrap();
    let group = &data.collection.groups[0];
    assert_eq!(group.name, "G");
    let idol = &group.idols[0];
    assert_eq!(idol.name, "Untitled idol");
    assert_eq!(idol.cheer_color, oshitag_core::default_cheer_color());
    let texts: Vec<&str> = idol.tags.iter().map(|tag| tag.text.as_str()).collect();
    assert_eq!(texts, vec!["#miku"]);
    assert_eq!(data.ui.active_group, Some(group.id));
}

#[test]
fn legacy_combos_field_migrates_into_favorites() {
    let raw: RawStoreData = serde_json::from_str(
        r##"{
            "version": 1,
            "combos": [{"name": "Oldies", "tags": [{"text": "#retro"}]}]
        }"##,
    )
    .unwrap();

    let data = validate_and_repair(raw).unwrap();
    assert_eq!(data.version, SCHEMA_VERSION);
    assert_eq!(data.collection.favorites.len(), 1);
    assert_eq!(data.collection.favorites[0].name, "Oldies");
    assert_eq!(data.collection.favorites[0].tags[0].text, "#retro");
    assert_eq!(data.ui.active_fav, Some(data.collection.favorites[0].id));
}

#[test]
fn dangling_selection_is_repointed_at_first_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oshitag.json");
    std::fs::write(
        &path,
        r#"{
            "version": 2,
            "ui": {"activeGroupId": "00000000-0000-0000-0000-000000000000"},
            "groups": [{"name": "Only"}]
        }"#,
    )
    .unwrap();

    let data = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(data.ui.active_group, Some(data.collection.groups[0].id));
    assert_eq!(data.ui.active_fav, None);
}
