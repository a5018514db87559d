use super::*;

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("storefront-session-{}.json", uuid::Uuid::new_v4()))
}

#[test]
fn missing_file_reads_as_empty() {
    let store = FileSessionStore::new(temp_path());
    assert_eq!(store.get_item("token"), None);
}

#[test]
fn set_then_remove_round_trips_through_disk() {
    let path = temp_path();
    let store = FileSessionStore::new(&path);
    store.set_item("token", "t-1");
    assert_eq!(FileSessionStore::new(&path).get_item("token").as_deref(), Some("t-1"));

    store.remove_item("token");
    assert_eq!(store.get_item("token"), None);
    let _ = std::fs::remove_file(path);
}

#[test]
fn other_keys_survive_updates() {
    let path = temp_path();
    let store = FileSessionStore::new(&path);
    store.set_item("theme", "dark");
    store.set_item("token", "t-2");
    store.remove_item("token");
    assert_eq!(store.get_item("theme").as_deref(), Some("dark"));
    let _ = std::fs::remove_file(path);
}

#[test]
fn malformed_file_is_treated_as_empty_and_overwritten() {
    let path = temp_path();
    std::fs::write(&path, "not json").unwrap();
    let store = FileSessionStore::new(&path);
    assert_eq!(store.get_item("token"), None);
    store.set_item("token", "t-3");
    assert_eq!(store.get_item("token").as_deref(), Some("t-3"));
    let _ = std::fs::remove_file(path);
}
