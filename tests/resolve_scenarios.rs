use scripted::config::Config;
use scripted::resolve::{Resolver, Visited};
use scripted::store::fs::FsStore;
use scripted::workspace::Workspace;
use std::fs;
use tempfile::TempDir;

/// A bank directory with the given `(file name, contents)` pairs.
fn bank_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

fn workspace(dir: &TempDir) -> Workspace<FsStore> {
    let config = Config::load(dir.path()).unwrap();
    Workspace::new(FsStore::new(dir.path(), config.clone()), config)
}

fn resolve(ws: &mut Workspace<FsStore>, text: &str) -> String {
    Resolver::new(ws).resolve(text, 1, &Visited::new())
}

#[test]
fn test_plain_text_is_unchanged() {
    let dir = bank_dir(&[]);
    let mut ws = workspace(&dir);
    assert_eq!(resolve(&mut ws, "nothing to see (here) 1.2"), "nothing to see (here) 1.2");
}

#[test]
fn test_chained_reference_loads_lazily() {
    let dir = bank_dir(&[
        ("x00001.txt", "x00001\t(one){\n\t0001\t2.1.7\n}\n"),
        ("x00002.txt", "x00002\t(two){\n\t0007\tX\n}\n"),
    ]);
    let mut ws = workspace(&dir);

    assert_eq!(resolve(&mut ws, "1.1.1"), "X");
    assert!(ws.is_loaded(1));
    assert!(ws.is_loaded(2));
    assert_eq!(ws.source(2), Some(dir.path().join("x00002.txt").as_path()));
}

#[test]
fn test_self_cycle_is_marked() {
    let dir = bank_dir(&[("x00001.txt", "x00001\t(c){\n\t0001\t1.1.2\n\t0002\t1.1.1\n}\n")]);
    let mut ws = workspace(&dir);

    let out = Resolver::new(&mut ws).resolve_cell(1, 1, 1).unwrap();
    assert!(out.contains("[Circular Ref: 1.1.1]"), "{out}");
}

#[test]
fn test_diamond_is_not_a_cycle() {
    let dir = bank_dir(&[(
        "x00001.txt",
        "x00001\t(d){\n\t0001\t1.1.3 1.1.2\n\t0002\t1.1.3\n\t0003\tX\n}\n",
    )]);
    let mut ws = workspace(&dir);

    assert_eq!(Resolver::new(&mut ws).resolve_cell(1, 1, 1).unwrap(), "X X");
}

#[test]
fn test_pair_reference_and_prefix_mismatch() {
    let dir = bank_dir(&[("x00002.txt", "x00002\t(p){\n\t0007\tseven\n}\n")]);
    let mut ws = workspace(&dir);

    assert_eq!(resolve(&mut ws, "x00002.0007"), "seven");
    assert_eq!(resolve(&mut ws, "y00002.0007"), "y00002.0007");
}

#[test]
fn test_missing_targets() {
    let dir = bank_dir(&[("x00001.txt", "x00001\t(m){\n}\n")]);
    let mut ws = workspace(&dir);

    assert_eq!(resolve(&mut ws, "9.9.9"), "[Missing 9.9.9]");
    assert_eq!(resolve(&mut ws, "1.1.5"), "[Missing 1.1.5]");
    assert_eq!(resolve(&mut ws, "x00003.0001"), "[Missing x00003.0001]");
    assert!(!ws.is_loaded(9));
}

#[test]
fn test_file_inclusion() {
    let dir = bank_dir(&[
        ("snippets/sig.txt", "-- sent from 2.1.1"),
        ("x00002.txt", "x00002\t(s){\n\t0001\tmy desk\n}\n"),
    ]);
    let mut ws = workspace(&dir);

    // Included text is itself expanded by the later passes.
    assert_eq!(
        resolve(&mut ws, "Bye @file(snippets/sig.txt)"),
        "Bye -- sent from my desk"
    );
    assert_eq!(
        resolve(&mut ws, "@file(nope.txt)"),
        "[Missing file: nope.txt]"
    );
}

#[test]
fn test_custom_config_from_disk() {
    let dir = bank_dir(&[
        (
            "config.json",
            r#"{"prefix":"q","base":16,"widthBank":2,"widthAddr":2,"maxDepth":3}"#,
        ),
        ("q0a.txt", "q0a\t(hex){\n\tff\tdeep q0a.fe\n\tfe\tdeeper q0a.fd\n\tfd\tbottom\n}\n"),
    ]);
    let mut ws = workspace(&dir);

    assert_eq!(resolve(&mut ws, "q0a.fd"), "bottom");
    assert_eq!(resolve(&mut ws, "x0a.fd"), "x0a.fd");
    assert_eq!(resolve(&mut ws, "10.1.253"), "bottom");
}

#[test]
fn test_unparseable_bank_reads_as_missing() {
    let dir = bank_dir(&[("x00004.txt", "this is not a bank")]);
    let mut ws = workspace(&dir);

    assert_eq!(resolve(&mut ws, "4.1.1"), "[Missing 4.1.1]");
}

#[test]
fn test_resolve_whole_bank() {
    let dir = bank_dir(&[
        ("x00001.txt", "x00001\t(doc){\n01\n\t0001\tHi x00002.0001\n02\n\t0001\t@file(a.txt)\n}\n"),
        ("x00002.txt", "x00002\t(names){\n\t0001\tAda\n}\n"),
        ("a.txt", "included"),
    ]);
    let mut ws = workspace(&dir);

    let entries = Resolver::new(&mut ws).resolve_bank(1).unwrap();
    let got: Vec<_> = entries
        .iter()
        .map(|e| (e.register, e.address, e.resolved.as_str()))
        .collect();
    assert_eq!(got, vec![(1, 1, "Hi Ada"), (2, 1, "included")]);
}
