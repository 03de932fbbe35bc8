mod common;

use common::{CountingClient, ONCOTREE_URL, bootstrap};
use genie_model::{EntityKind, GenieError, NewEntity};
use genie_remote::{LocalStore, RemoteClient};
use genie_submit::resolver::{
    CENTER_MAPPING, ERROR_TRACKER, LOGS, VALIDATION_STATUS, folder_name, table_name,
};
use genie_submit::{LocationMap, resolve_oncotree_link};

#[test]
fn loads_mapping_from_project_annotation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let project = bootstrap(&["SAGE", "GOLD"], dir.path());

    let map = LocationMap::load(&project.store, &project.project_id).expect("load");
    assert_eq!(map.centers(), vec!["SAGE", "GOLD"]);
    assert_eq!(map.resolve_center_input("SAGE").unwrap(), project.input("SAGE"));
    let names: Vec<&str> = map.databases().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["centerMapping"]);
}

#[test]
fn conventional_names_resolve_once_registered() {
    let dir = tempfile::tempdir().expect("tempdir");
    let project = bootstrap(&["SAGE"], dir.path());
    let names = [
        VALIDATION_STATUS.to_string(),
        ERROR_TRACKER.to_string(),
        LOGS.to_string(),
        folder_name("clinical"),
        table_name("clinical"),
    ];
    for (index, name) in names.iter().enumerate() {
        project.register(name, &format!("syn{}", 900 + index));
    }

    let map = LocationMap::load(&project.store, &project.project_id).expect("load");
    assert!(map.resolve(CENTER_MAPPING).is_ok());
    assert_eq!(map.resolve(VALIDATION_STATUS).unwrap(), "syn900");
    assert_eq!(map.resolve(LOGS).unwrap(), "syn902");
    assert_eq!(map.resolve("clinical_folder").unwrap(), "syn903");
    assert_eq!(map.resolve(&table_name("clinical")).unwrap(), "syn904");
    assert!(matches!(
        map.resolve(&table_name("cna")),
        Err(GenieError::NotFound(_))
    ));
}

#[test]
fn project_without_mapping_annotation_is_not_found() {
    let store = LocalStore::in_memory();
    let project = store
        .store(NewEntity::new("bare", EntityKind::Project))
        .expect("project");

    let err = LocationMap::load(&store, &project.id).unwrap_err();
    assert!(matches!(err, GenieError::NotFound(_)));
    assert!(err.to_string().contains("dbMapping"));
}

#[test]
fn oncotree_override_wins_without_fetching() {
    let dir = tempfile::tempdir().expect("tempdir");
    let project = bootstrap(&["SAGE"], dir.path());
    project.register_oncotree_link(ONCOTREE_URL);
    let map = LocationMap::load(&project.store, &project.project_id).expect("load");
    let client = CountingClient::new(&project.store);

    let link = resolve_oncotree_link(&client, &map, Some("https://example.org/tree")).expect("link");
    assert_eq!(link.as_deref(), Some("https://example.org/tree"));
    assert!(client.fetched.borrow().is_empty());

    let link = resolve_oncotree_link(&client, &map, None).expect("link");
    assert_eq!(link.as_deref(), Some(ONCOTREE_URL));
    assert_eq!(client.fetched.borrow().len(), 1);
}

#[test]
fn oncotree_link_absent_when_not_registered() {
    let dir = tempfile::tempdir().expect("tempdir");
    let project = bootstrap(&["SAGE"], dir.path());
    let map = LocationMap::load(&project.store, &project.project_id).expect("load");

    let link = resolve_oncotree_link(&project.store, &map, None).expect("link");
    assert_eq!(link, None);
}

#[test]
fn restricted_oncotree_entity_propagates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let project = bootstrap(&["SAGE"], dir.path());
    project.register_oncotree_link(ONCOTREE_URL);
    let map = LocationMap::load(&project.store, &project.project_id).expect("load");
    let link_id = map.resolve("oncotreeLink").expect("registered").to_string();
    project.store.set_restricted(&link_id, true).expect("restrict");

    let err = resolve_oncotree_link(&project.store, &map, None).unwrap_err();
    assert!(matches!(err, GenieError::PermissionDenied(_)));
    assert!(project.store.fetch(&link_id).is_err());
}
