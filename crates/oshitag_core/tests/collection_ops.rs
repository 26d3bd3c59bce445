use oshitag_core::{CollectionService, MemoryStore, ServiceError};

fn service() -> CollectionService<MemoryStore> {
    CollectionService::new(MemoryStore::default()).unwrap()
}

#[test]
fn adding_a_group_makes_it_active() {
    let mut service = service();
    let first = service.add_group("First").unwrap();
    assert_eq!(service.selection().active_group, Some(first));

    let second = service.add_group("Second").unwrap();
    assert_eq!(service.selection().active_group, Some(second));
    assert_eq!(service.active_group().unwrap().id, second);
}

#[test]
fn blank_names_are_rejected_everywhere() {
    let mut service = service();
    assert!(matches!(
        service.add_group("   "),
        Err(ServiceError::InvalidName)
    ));
    let group = service.add_group("G").unwrap();
    assert!(matches!(
        service.add_idol(group, "\n"),
        Err(ServiceError::InvalidName)
    ));
    assert!(matches!(
        service.rename_group(group, ""),
        Err(ServiceError::InvalidName)
    ));
}

#[test]
fn idol_tag_batch_add_skips_existing_case_insensitive() {
    let mut service = service();
    let group = service.add_group("G").unwrap();
    let idol = service.add_idol(group, "I").unwrap();

    let added = service.add_idol_tags(group, idol, "foo, #Bar baz").unwrap();
    assert_eq!(added, 3);

    let added = service.add_idol_tags(group, idol, "#FOO #new").unwrap();
    assert_eq!(added, 1);

    let texts: Vec<String> = service.collection().groups[0].idols[0]
        .tags
        .iter()
        .map(|tag| tag.text.clone())
        .collect();
    assert_eq!(texts, vec!["#foo", "#Bar", "#baz", "#new"]);
}

#[test]
fn empty_tag_input_adds_nothing() {
    let mut service = service();
    let group = service.add_group("G").unwrap();
    let idol = service.add_idol(group, "I").unwrap();
    assert_eq!(service.add_idol_tags(group, idol, "  , # ").unwrap(), 0);
    assert!(service.collection().groups[0].idols[0].tags.is_empty());
}

#[test]
fn deleting_the_active_group_falls_back_to_first_remaining() {
    let mut service = service();
    let first = service.add_group("First").unwrap();
    let second = service.add_group("Second").unwrap();
    assert_eq!(service.selection().active_group, Some(second));

    service.delete_group(second).unwrap();
    assert_eq!(service.selection().active_group, Some(first));

    service.delete_group(first).unwrap();
    assert_eq!(service.selection().active_group, None);
}

#[test]
fn move_operations_reorder_and_clamp() {
    let mut service = service();
    let a = service.add_group("A").unwrap();
    let _b = service.add_group("B").unwrap();
    let _c = service.add_group("C").unwrap();

    service.move_group(a, 99).unwrap();
    let names: Vec<&str> = service
        .collection()
        .groups
        .iter()
        .map(|group| group.name.as_str())
        .collect();
    assert_eq!(names, vec!["B", "C", "A"]);

    let group = service.collection().groups[0].id;
    let idol = service.add_idol(group, "I").unwrap();
    service.add_idol_tags(group, idol, "#one #two #three").unwrap();
    let last = service.collection().groups[0].idols[0].tags[2].id;
    service.move_idol_tag(group, idol, last, 0).unwrap();
    let texts: Vec<&str> = service.collection().groups[0].idols[0]
        .tags
        .iter()
        .map(|tag| tag.text.as_str())
        .collect();
    assert_eq!(texts, vec!["#three", "#one", "#two"]);
}

#[test]
fn cheer_color_updates_validate_and_lowercase() {
    let mut service = service();
    let group = service.add_group("G").unwrap();
    let idol = service.add_idol(group, "I").unwrap();

    service.set_cheer_color(group, idol, "#39C5BB").unwrap();
    assert_eq!(service.collection().groups[0].idols[0].cheer_color, "#39c5bb");

    let err = service.set_cheer_color(group, idol, "teal").unwrap_err();
    assert!(matches!(err, ServiceError::InvalidColor(_)));
}

#[test]
fn folder_tags_share_the_idol_dedup_contract() {
    let mut service = service();
    let folder = service.add_folder("Fav").unwrap();
    assert_eq!(service.selection().active_fav, Some(folder));

    assert_eq!(service.add_folder_tags(folder, "#a #b").unwrap(), 2);
    assert_eq!(service.add_folder_tags(folder, "#A #c").unwrap(), 1);

    let tag = service.collection().favorites[0].tags[0].id;
    service.delete_folder_tag(folder, tag).unwrap();
    let texts: Vec<&str> = service.collection().favorites[0]
        .tags
        .iter()
        .map(|tag| tag.text.as_str())
        .collect();
    assert_eq!(texts, vec!["#b", "#c"]);
}

#[test]
fn copy_payloads_join_unique_tags_with_spaces() {
    let mut service = service();
    let group = service.add_group("G").unwrap();
    let first = service.add_idol(group, "I1").unwrap();
    let second = service.add_idol(group, "I2").unwrap();
    service.add_idol_tags(group, first, "#a #b").unwrap();
    service.add_idol_tags(group, second, "#B #c").unwrap();

    assert_eq!(service.idol_copy_text(group, first).unwrap(), "#a #b");
    // Group payload dedups across idols, keeping first occurrence casing.
    assert_eq!(service.group_copy_text(group).unwrap(), "#a #b #c");
}

#[test]
fn suggestions_surface_recent_tags_from_active_group_first() {
    let mut service = service();
    let other = service.add_group("Other").unwrap();
    let other_idol = service.add_idol(other, "O").unwrap();
    service.add_idol_tags(other, other_idol, "#old").unwrap();

    let active = service.add_group("Active").unwrap();
    let idol = service.add_idol(active, "A").unwrap();
    service.add_idol_tags(active, idol, "#first #second").unwrap();

    assert_eq!(service.suggested_tags(10), vec!["#second", "#first", "#old"]);
    assert_eq!(service.suggested_tags(1), vec!["#second"]);
}

#[test]
fn import_through_service_replaces_document_and_selection() {
    let mut service = service();
    let group = service.add_group("Old").unwrap();
    let idol = service.add_idol(group, "OldIdol").unwrap();
    service.add_idol_tags(group, idol, "#gone").unwrap();

    service
        .import_markdown("# New\n## N\n### #fresh\n# [FAVORITES]\n## F\n### #fav\n")
        .unwrap();

    let collection = service.collection();
    assert_eq!(collection.groups.len(), 1);
    assert_eq!(collection.groups[0].name, "New");
    assert_eq!(collection.favorites.len(), 1);
    assert_eq!(service.selection().active_group, Some(collection.groups[0].id));
    assert_eq!(service.selection().active_fav, Some(collection.favorites[0].id));
}

#[test]
fn export_through_service_round_trips() {
    let mut service = service();
    let group = service.add_group("G").unwrap();
    let idol = service.add_idol(group, "I").unwrap();
    service.add_idol_tags(group, idol, "#a").unwrap();

    let exported = service.export_markdown();
    let mut other = self::service();
    other.import_markdown(&exported).unwrap();
    assert_eq!(other.export_markdown(), exported);
}

#[test]
fn not_found_errors_name_the_missing_entity() {
    let mut service = service();
    let group = service.add_group("G").unwrap();
    let bogus = uuid_like();
    assert!(matches!(
        service.rename_group(bogus, "X"),
        Err(ServiceError::GroupNotFound(_))
    ));
    assert!(matches!(
        service.rename_idol(group, bogus, "X"),
        Err(ServiceError::IdolNotFound(_))
    ));
    assert!(matches!(
        service.delete_folder(bogus),
        Err(ServiceError::FolderNotFound(_))
    ));
}

fn uuid_like() -> oshitag_core::GroupId {
    oshitag_core::Group::new("tmp").id
}
