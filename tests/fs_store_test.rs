use scripted::config::Config;
use scripted::error::ScriptedError;
use scripted::store::fs::FsStore;
use scripted::store::BankStore;
use scripted::workspace::Workspace;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsStore) {
    let dir = TempDir::new().unwrap();
    let store = FsStore::new(dir.path(), Config::default());
    (dir, store)
}

#[test]
fn test_fs_store_basic_bank_io() {
    let (dir, store) = setup();

    assert!(!store.exists(1));
    assert_eq!(store.read_bank_text(1).unwrap(), None);

    store.write_bank_text(1, "x00001\t(t){\n}\n").unwrap();
    assert!(store.exists(1));
    assert_eq!(
        store.read_bank_text(1).unwrap().as_deref(),
        Some("x00001\t(t){\n}\n")
    );
    assert_eq!(store.bank_location(1), dir.path().join("x00001.txt"));
}

#[test]
fn test_fs_store_atomic_write_artifacts() {
    let (dir, store) = setup();
    store.write_bank_text(3, "first").unwrap();
    store.write_bank_text(3, "second").unwrap();

    let on_disk = fs::read_to_string(dir.path().join("x00003.txt")).unwrap();
    assert_eq!(on_disk, "second");

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_store_lists_only_bank_files() {
    let (dir, store) = setup();
    store.write_bank_text(12, "a").unwrap();
    store.write_bank_text(2, "b").unwrap();
    fs::write(dir.path().join("config.json"), "{}").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a bank").unwrap();
    fs::write(dir.path().join("y00004.txt"), "other prefix").unwrap();
    fs::create_dir(dir.path().join("x00009.txt")).unwrap();

    assert_eq!(store.list_bank_ids().unwrap(), vec![2, 12]);
}

#[test]
fn test_fs_store_missing_root_lists_nothing() {
    let dir = TempDir::new().unwrap();
    let store = FsStore::new(dir.path().join("nope"), Config::default());
    assert!(store.list_bank_ids().unwrap().is_empty());
}

#[test]
fn test_fs_store_resources() {
    let (dir, store) = setup();
    fs::create_dir(dir.path().join("parts")).unwrap();
    fs::write(dir.path().join("parts/greeting.txt"), "Hi there").unwrap();

    assert_eq!(
        store
            .read_named_resource("parts/greeting.txt")
            .unwrap()
            .as_deref(),
        Some("Hi there")
    );
    assert_eq!(store.read_named_resource("absent.txt").unwrap(), None);
}

#[test]
fn test_fs_store_resource_with_invalid_utf8_is_still_read() {
    let (dir, store) = setup();
    fs::write(dir.path().join("latin1.txt"), [b'c', b'a', b'f', 0xe9]).unwrap();

    assert_eq!(
        store.read_named_resource("latin1.txt").unwrap().as_deref(),
        Some("caf\u{fffd}")
    );
}

#[test]
fn test_fs_store_rejects_escaping_resource_names() {
    let (_dir, store) = setup();
    for name in ["../secret", "/etc/passwd", ""] {
        let err = store.read_named_resource(name).unwrap_err();
        assert!(matches!(err, ScriptedError::Store(_)), "name {name:?}");
    }
}

#[test]
fn test_fs_store_output_goes_to_out_dir() {
    let (dir, store) = setup();
    let path = store.write_output("x00001.json", "{}").unwrap();
    assert_eq!(path, dir.path().join("out").join("x00001.json"));
    assert_eq!(fs::read_to_string(path).unwrap(), "{}");
    assert!(store.list_bank_ids().unwrap().is_empty());
}

#[test]
fn test_fs_store_honours_config_layout() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        prefix: 'b',
        base: 16,
        width_bank: 3,
        ..Default::default()
    };
    let store = FsStore::new(dir.path(), config);
    store.write_bank_text(255, "x").unwrap();

    assert!(dir.path().join("b0ff.txt").is_file());
    assert_eq!(store.list_bank_ids().unwrap(), vec![255]);
}

#[test]
fn test_workspace_save_round_trip() {
    let (dir, store) = setup();
    fs::write(
        dir.path().join("x00001.txt"),
        "x1 (Loose  spacing){\n  1 first value\n  2 second\n}",
    )
    .unwrap();

    let mut ws = Workspace::new(store, Config::default());
    ws.ensure_loaded(1).unwrap();
    ws.insert(1, 2, 10, "in register two").unwrap();
    let path = ws.save(1).unwrap();

    assert_eq!(path, dir.path().join("x00001.txt"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "x00001\t(Loose  spacing){\n01\n\t0001\tfirst value\n\t0002\tsecond\n02\n\t0010\tin register two\n}\n"
    );

    // A second workspace sees exactly what was saved.
    let mut again = Workspace::new(FsStore::new(dir.path(), Config::default()), Config::default());
    let bank = again.ensure_loaded(1).unwrap();
    assert_eq!(bank.title, "Loose  spacing");
    assert_eq!(bank.entry_count(), 3);
    assert_eq!(again.lookup(1, 2, 10), Some("in register two"));
}

#[test]
fn test_workspace_open_creates_file_on_save() {
    let (dir, store) = setup();
    let mut ws = Workspace::new(store, Config::default());

    assert_eq!(ws.open(5).unwrap().title, "new");
    assert!(ws.is_bank_dirty(5));
    ws.save(5).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("x00005.txt")).unwrap(),
        "x00005\t(new){\n}\n"
    );
}
