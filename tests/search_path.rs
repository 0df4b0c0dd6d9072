use metaspec::{
    ArchiveSink, Codec, DirectorySink, Location, MetadataError, SearchPath, Source, Specification,
    discover_all, load_from_search_path, resolve_closure, write_specifications,
};
use pretty_assertions::assert_eq;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

fn spec(name: &str, deps: &[&str]) -> Specification {
    Specification::with_dependencies(name, deps.iter().copied()).expect("valid spec")
}

fn dir_source(root: &Path, specs: &[Specification]) -> PathBuf {
    fs::create_dir_all(root).expect("create source dir");
    let mut sink = DirectorySink::new(root);
    write_specifications(&mut sink, &Codec::default(), specs).expect("write dir");
    root.to_path_buf()
}

fn zip_source(path: &Path, specs: &[Specification]) -> PathBuf {
    let mut sink = ArchiveSink::create(path).expect("create zip");
    write_specifications(&mut sink, &Codec::default(), specs).expect("write zip");
    sink.finish().expect("finish zip");
    path.to_path_buf()
}

fn names(specs: &[Specification]) -> BTreeSet<String> {
    specs.iter().map(|s| s.name().to_string()).collect()
}

struct Fixture {
    _tmp: TempDir,
    root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let tmp = tempdir().expect("tempdir");
        let root = tmp.path().to_path_buf();
        Self { _tmp: tmp, root }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }
}

#[test]
fn closure_spans_directories_and_archives() {
    let fx = Fixture::new();
    let classes = dir_source(&fx.path("classes"), &[spec("a", &["b"])]);
    let lib = zip_source(&fx.path("lib.zip"), &[spec("b", &["c"]), spec("c", &[])]);

    let search_path = SearchPath::from_paths([classes, lib]).unwrap();
    assert!(matches!(search_path.sources()[0], Source::Directory(_)));
    assert!(matches!(search_path.sources()[1], Source::Archive(_)));

    let out = resolve_closure(&search_path, &Codec::default(), ["a"]).unwrap();
    assert_eq!(
        names(&out),
        ["a", "b", "c"]
            .iter()
            .map(|s| s.to_string())
            .collect::<BTreeSet<String>>()
    );
    assert_eq!(out[0], spec("a", &["b"]));
}

#[test]
fn missing_name_reports_requested_names() {
    let fx = Fixture::new();
    let classes = dir_source(&fx.path("classes"), &[spec("a", &[])]);
    let search_path = SearchPath::from_paths([classes]).unwrap();

    let err = resolve_closure(&search_path, &Codec::default(), ["a", "ghost"]).unwrap_err();
    match &err {
        MetadataError::Resolution {
            requested,
            loaded,
            source,
        } => {
            assert_eq!(requested, &vec!["a".to_string(), "ghost".to_string()]);
            assert!(loaded.is_empty());
            assert!(matches!(**source, MetadataError::NotFound { ref name, ref path }
                if name == "ghost" && path == "metadata/specs/ghost.json"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("Directly asked for: [a, ghost]"));
}

#[test]
fn identical_copies_load_cleanly() {
    let fx = Fixture::new();
    let m = spec("m", &["x"]);
    let one = dir_source(&fx.path("one"), &[m.clone()]);
    let two = zip_source(&fx.path("two.jar"), &[m.clone()]);
    let search_path = SearchPath::from_paths([one, two]).unwrap();

    let loaded = load_from_search_path(&search_path, &Codec::default(), "m").unwrap();
    assert_eq!(loaded, m);
}

#[test]
fn differing_copies_conflict_on_load() {
    let fx = Fixture::new();
    let one = dir_source(&fx.path("one"), &[spec("m", &["x"])]);
    let two = zip_source(&fx.path("two.zip"), &[spec("m", &["y"])]);
    let search_path = SearchPath::from_paths([one.clone(), two.clone()]).unwrap();

    let err = load_from_search_path(&search_path, &Codec::default(), "m").unwrap_err();
    match err {
        MetadataError::ConflictingDefinition { name, definitions } => {
            assert_eq!(name, "m");
            let sources: Vec<&Path> = definitions.iter().map(|(l, _)| l.source_path()).collect();
            assert_eq!(sources, vec![one.as_path(), two.as_path()]);
            assert_eq!(definitions[1].1, spec("m", &["y"]));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn conflict_is_found_past_the_first_pair() {
    let fx = Fixture::new();
    let a = dir_source(&fx.path("a"), &[spec("m", &[])]);
    let b = dir_source(&fx.path("b"), &[spec("m", &[])]);
    let c = dir_source(&fx.path("c"), &[spec("m", &["z"])]);
    let search_path = SearchPath::from_paths([a, b, c]).unwrap();

    let err = load_from_search_path(&search_path, &Codec::default(), "m").unwrap_err();
    assert!(
        matches!(err, MetadataError::ConflictingDefinition { ref definitions, .. } if definitions.len() == 3)
    );
}

#[test]
fn malformed_descriptor_names_its_location() {
    let fx = Fixture::new();
    let root = fx.path("broken");
    fs::create_dir_all(root.join("metadata/specs")).unwrap();
    fs::write(root.join("metadata/specs/m.json"), "{ not json").unwrap();
    let search_path = SearchPath::from_paths([root.clone()]).unwrap();

    let err = load_from_search_path(&search_path, &Codec::default(), "m").unwrap_err();
    match err {
        MetadataError::MalformedDescriptor { location, source } => {
            assert_eq!(
                location,
                Location::Directory {
                    root,
                    path: "metadata/specs/m.json".to_string()
                }
            );
            assert!(matches!(*source, MetadataError::Decode(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn discovery_without_descriptors_is_empty() {
    let fx = Fixture::new();
    let empty_dir = fx.path("empty");
    fs::create_dir_all(&empty_dir).unwrap();
    let empty_zip = zip_source(&fx.path("empty.zip"), &[]);
    let search_path = SearchPath::from_paths([empty_dir, empty_zip]).unwrap();

    let specs = discover_all(&search_path, &Codec::default()).unwrap();
    assert!(specs.is_empty());
}

#[test]
fn discovery_accepts_equal_duplicates_and_rejects_conflicts() {
    let fx = Fixture::new();
    let shared = spec("shared", &["base"]);
    let one = dir_source(&fx.path("one"), &[shared.clone(), spec("base", &[])]);
    let two = zip_source(&fx.path("two.zip"), &[shared.clone()]);

    let ok = SearchPath::from_paths([one.clone(), two.clone(), two.clone()]).unwrap();
    let specs = discover_all(&ok, &Codec::default()).unwrap();
    assert_eq!(specs.keys().cloned().collect::<Vec<_>>(), vec!["base", "shared"]);
    assert_eq!(specs["shared"], shared);

    let three = zip_source(&fx.path("three.zip"), &[spec("shared", &[])]);
    let bad = SearchPath::from_paths([one, two, three.clone()]).unwrap();
    let err = discover_all(&bad, &Codec::default()).unwrap_err();
    match err {
        MetadataError::ConflictingDefinition { name, definitions } => {
            assert_eq!(name, "shared");
            assert_eq!(definitions.len(), 2);
            assert_eq!(definitions[1].0.source_path(), three.as_path());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn discovery_ignores_non_descriptor_entries() {
    let fx = Fixture::new();
    let root = dir_source(&fx.path("classes"), &[spec("a", &[])]);
    fs::write(root.join("metadata/specs/README.txt"), "not a spec").unwrap();
    fs::create_dir_all(root.join("metadata/specs/nested.json")).unwrap();

    let zip_path = fx.path("mixed.zip");
    {
        let mut sink = ArchiveSink::create(&zip_path).unwrap();
        metaspec::write_specification(&mut sink, &Codec::default(), &spec("b", &[])).unwrap();
        use metaspec::Sink;
        let mut other = sink.open("elsewhere/c.json").unwrap();
        other.write_all(b"{ broken").unwrap();
        drop(other);
        sink.finish().unwrap();
    }

    let search_path = SearchPath::from_paths([root, zip_path]).unwrap();
    let specs = discover_all(&search_path, &Codec::default()).unwrap();
    assert_eq!(specs.keys().cloned().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn write_then_discover_round_trips() {
    let fx = Fixture::new();
    let batch = vec![
        spec("core", &[]),
        spec("m2", &["core"]),
        spec("app", &["core", "m2"]),
    ];
    let dir = dir_source(&fx.path("out"), &batch);
    let zip = zip_source(&fx.path("out.zip"), &batch);

    for source in [dir, zip] {
        let search_path = SearchPath::from_paths([source]).unwrap();
        let found = discover_all(&search_path, &Codec::default()).unwrap();
        let found: HashSet<Specification> = found.into_values().collect();
        let expected: HashSet<Specification> = batch.iter().cloned().collect();
        assert_eq!(found, expected);
    }
}

#[test]
fn rooted_archive_entries_are_invisible_to_both_lookups() {
    let fx = Fixture::new();
    let zip_path = fx.path("rooted.zip");
    {
        let mut sink = ArchiveSink::create(&zip_path).unwrap();
        metaspec::write_specification(&mut sink, &Codec::default(), &spec("b", &[])).unwrap();
        use metaspec::Sink;
        let codec = Codec::default();
        let mut rooted = sink.open("/metadata/specs/a.json").unwrap();
        rooted.write_all(&codec.encode(&spec("a", &[])).unwrap()).unwrap();
        drop(rooted);
        sink.finish().unwrap();
    }
    let search_path = SearchPath::from_paths([zip_path]).unwrap();

    let specs = discover_all(&search_path, &Codec::default()).unwrap();
    assert_eq!(specs.keys().cloned().collect::<Vec<_>>(), vec!["b"]);

    let err = load_from_search_path(&search_path, &Codec::default(), "a").unwrap_err();
    assert!(matches!(err, MetadataError::NotFound { ref name, .. } if name == "a"));
    assert_eq!(
        load_from_search_path(&search_path, &Codec::default(), "b").unwrap(),
        spec("b", &[])
    );
}

#[test]
fn specs_path_that_is_a_file_discovers_nothing() {
    let fx = Fixture::new();
    let root = fx.path("classes");
    fs::create_dir_all(root.join("metadata")).unwrap();
    fs::write(root.join("metadata/specs"), "not a directory").unwrap();
    let search_path = SearchPath::from_paths([root]).unwrap();

    assert!(discover_all(&search_path, &Codec::default()).unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn unreadable_specs_directory_fails_discovery() {
    let fx = Fixture::new();
    let root = fx.path("classes");
    fs::create_dir_all(root.join("metadata")).unwrap();
    std::os::unix::fs::symlink("specs", root.join("metadata/specs")).unwrap();
    let search_path = SearchPath::from_paths([root]).unwrap();

    let err = discover_all(&search_path, &Codec::default()).unwrap_err();
    assert!(matches!(err, MetadataError::Io { .. }));
    let err = load_from_search_path(&search_path, &Codec::default(), "a").unwrap_err();
    assert!(matches!(err, MetadataError::Io { .. }));
}

#[test]
fn discovery_reports_malformed_descriptor_location() {
    let fx = Fixture::new();
    let root = dir_source(&fx.path("classes"), &[spec("a", &[])]);
    fs::write(root.join("metadata/specs/m.json"), "{ not json").unwrap();
    let search_path = SearchPath::from_paths([root.clone()]).unwrap();

    let err = discover_all(&search_path, &Codec::default()).unwrap_err();
    match err {
        MetadataError::MalformedDescriptor { location, source } => {
            assert_eq!(
                location,
                Location::Directory {
                    root,
                    path: "metadata/specs/m.json".to_string()
                }
            );
            assert!(matches!(*source, MetadataError::Decode(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn corrupt_archive_is_an_archive_error() {
    let fx = Fixture::new();
    let junk = fx.path("junk.zip");
    fs::write(&junk, b"this is not a zip file").unwrap();
    let search_path = SearchPath::from_paths([junk]).unwrap();
    assert!(matches!(search_path.sources()[0], Source::Archive(_)));

    let err = discover_all(&search_path, &Codec::default()).unwrap_err();
    assert!(matches!(err, MetadataError::Archive { .. }));
    let err = load_from_search_path(&search_path, &Codec::default(), "a").unwrap_err();
    assert!(matches!(err, MetadataError::Archive { .. }));
}
