use std::cell::RefCell;
use std::rc::Rc;

use pathkit_path::{
    same_filter, CompoundPathFilter, FileNamePathFilter, FileNamePathFilterConfig, Path,
    PathError, PathFilter, ScopedConnection,
};

fn record(path: &Path) -> (Rc<RefCell<Vec<String>>>, ScopedConnection) {
    let changed = Rc::new(RefCell::new(Vec::new()));
    let c = Rc::clone(&changed);
    let connection = path
        .changed_signal()
        .connect(move |p: &Path| c.borrow_mut().push(p.to_string()))
        .scoped();
    (changed, connection)
}

fn file_name_filter(patterns: &[&str]) -> Rc<dyn PathFilter> {
    Rc::new(FileNamePathFilter::new(patterns.iter().copied()).unwrap())
}

fn is_filter(path: &Path, filter: &Rc<dyn PathFilter>) -> bool {
    path.filter().is_some_and(|f| same_filter(&f, filter))
}

#[test]
fn test_construction_and_serialization() {
    assert!(matches!(
        Path::parse("noStartingSlash"),
        Err(PathError::InvalidPathSyntax { .. })
    ));

    let p = Path::parse("/").unwrap();
    assert_eq!(p.len(), 0);
    assert_eq!(p.to_string(), "/");

    let p = Path::parse("/a").unwrap();
    assert_eq!(p.len(), 1);
    assert_eq!(p.segment(0).unwrap(), "a");
    assert_eq!(p.to_string(), "/a");

    let p = Path::parse("/a//b/").unwrap();
    assert_eq!(p.len(), 2);
    assert_eq!(p.segment(0).unwrap(), "a");
    assert_eq!(p.segment(1).unwrap(), "b");
    assert_eq!(p.to_string(), "/a/b");

    let p = Path::from_segments(["a", "b"]).unwrap();
    assert_eq!(p.len(), 2);
    assert_eq!(p.segment(0).unwrap(), "a");
    assert_eq!(p.segment(1).unwrap(), "b");
    assert_eq!(p.to_string(), "/a/b");
}

#[test]
fn test_string_round_trip_is_canonical() {
    for (input, canonical) in [
        ("/", "/"),
        ("//", "/"),
        ("/a/", "/a"),
        ("/a///b//c", "/a/b/c"),
        ("/with space/and.dots", "/with space/and.dots"),
    ] {
        let p = Path::parse(input).unwrap();
        assert_eq!(p.to_string(), canonical, "input {:?}", input);
        assert_eq!(Path::parse(&p.to_string()).unwrap(), p);
    }
}

#[test]
fn test_changed_signal() {
    let mut p = Path::parse("/").unwrap();
    let (changed, _connection) = record(&p);

    p.append("hello").unwrap();
    p.append("goodbye").unwrap();
    p.set_segment(0, "hello").unwrap();
    p.set_segment(1, "bob").unwrap();

    assert_eq!(*changed.borrow(), vec!["/hello", "/hello/goodbye", "/hello/bob"]);
}

#[test]
fn test_filters() {
    let mut p = Path::parse("/").unwrap();
    assert!(p.filter().is_none());

    let (changed, _connection) = record(&p);
    assert_eq!(changed.borrow().len(), 0);

    let filter = file_name_filter(&["*.gfr"]);

    p.set_filter(Some(Rc::clone(&filter)));
    assert!(is_filter(&p, &filter));
    assert_eq!(changed.borrow().len(), 1);

    p.set_filter(Some(Rc::clone(&filter)));
    assert!(is_filter(&p, &filter));
    assert_eq!(changed.borrow().len(), 1);

    p.set_filter(None);
    assert!(p.filter().is_none());
    assert_eq!(changed.borrow().len(), 2);

    p.set_filter(None);
    assert_eq!(changed.borrow().len(), 2);

    p.set_filter(Some(Rc::clone(&filter)));
    assert!(is_filter(&p, &filter));
    assert_eq!(changed.borrow().len(), 3);

    filter.set_enabled(false);
    assert_eq!(changed.borrow().len(), 4);

    filter.set_enabled(false);
    assert_eq!(changed.borrow().len(), 4);

    filter.set_enabled(true);
    assert_eq!(changed.borrow().len(), 5);
}

#[test]
fn test_construct_with_filter() {
    let p = Path::parse("/test/path").unwrap();
    assert!(p.filter().is_none());

    let f = file_name_filter(&["*.exr"]);
    let p = Path::parse("/test/path").unwrap().with_filter(Rc::clone(&f));
    assert!(is_filter(&p, &f));
}

#[test]
fn test_equal_filters_are_distinct_attachments() {
    let mut p = Path::parse("/").unwrap();
    let (changed, _connection) = record(&p);

    p.set_filter(Some(file_name_filter(&["*.gfr"])));
    p.set_filter(Some(file_name_filter(&["*.gfr"])));
    assert_eq!(changed.borrow().len(), 2);
}

#[test]
fn test_replaced_filter_is_no_longer_relayed() {
    let mut p = Path::parse("/").unwrap();
    let first = file_name_filter(&["*.gfr"]);
    let second = file_name_filter(&["*.exr"]);

    p.set_filter(Some(Rc::clone(&first)));
    p.set_filter(Some(Rc::clone(&second)));
    let (changed, _connection) = record(&p);

    first.set_enabled(false);
    assert!(changed.borrow().is_empty());
    assert!(first.changed_signal().is_empty());

    second.set_enabled(false);
    assert_eq!(changed.borrow().len(), 1);
}

#[test]
fn test_shared_filter_fans_out() {
    let filter = file_name_filter(&["*.gfr"]);
    let a = Path::parse("/a").unwrap().with_filter(Rc::clone(&filter));
    let b = Path::parse("/b").unwrap().with_filter(Rc::clone(&filter));
    let (changed_a, _ca) = record(&a);
    let (changed_b, _cb) = record(&b);

    filter.set_enabled(false);

    assert_eq!(*changed_a.borrow(), vec!["/a"]);
    assert_eq!(*changed_b.borrow(), vec!["/b"]);
}

#[test]
fn test_criteria_change_is_relayed() {
    let filter = Rc::new(FileNamePathFilter::new(["*.gfr"]).unwrap());
    let mut p = Path::parse("/scripts").unwrap();
    p.set_filter(Some(Rc::clone(&filter) as Rc<dyn PathFilter>));
    let (changed, _connection) = record(&p);

    filter.set_patterns(["*.gfr", "*.py"]).unwrap();

    assert_eq!(*changed.borrow(), vec!["/scripts"]);
}

#[test]
fn test_compound_filter_on_path() {
    let by_extension = file_name_filter(&["*.exr", "*.tif"]);
    let by_prefix = file_name_filter(&["beauty*"]);
    let compound: Rc<dyn PathFilter> = Rc::new(CompoundPathFilter::with_filters([
        Rc::clone(&by_extension),
        Rc::clone(&by_prefix),
    ]));

    let mut dir = Path::parse("/renders").unwrap();
    dir.set_filter(Some(Rc::clone(&compound)));
    let (changed, _connection) = record(&dir);

    let candidates = || {
        ["beauty.exr", "beauty.jpg", "diffuse.tif"]
            .iter()
            .map(|name| {
                let mut child = dir.clone();
                child.append(*name).unwrap();
                child
            })
            .collect::<Vec<_>>()
    };

    let visible: Vec<String> = dir
        .filter_paths(candidates())
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(visible, vec!["/renders/beauty.exr"]);

    by_prefix.set_enabled(false);
    assert_eq!(changed.borrow().len(), 1);
    assert_eq!(dir.filter_paths(candidates()).len(), 2);

    compound.set_enabled(false);
    assert_eq!(changed.borrow().len(), 2);
    assert_eq!(dir.filter_paths(candidates()).len(), 3);
}

#[test]
fn test_filter_from_config() {
    let config: FileNamePathFilterConfig =
        serde_json::from_str(r#"{ "patterns": ["*.GFR"], "case_insensitive": true }"#).unwrap();
    let filter: Rc<dyn PathFilter> = Rc::new(FileNamePathFilter::from_config(&config).unwrap());

    let dir = Path::parse("/scripts").unwrap().with_filter(filter);
    let kept = dir.filter_paths(vec![
        Path::parse("/scripts/comp.gfr").unwrap(),
        Path::parse("/scripts/notes.txt").unwrap(),
    ]);
    assert_eq!(kept, vec![Path::parse("/scripts/comp.gfr").unwrap()]);
}

#[test]
fn test_path_serializes_inside_documents() {
    #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
    struct Bookmark {
        label: String,
        path: Path,
    }

    let bookmark = Bookmark {
        label: "scripts".to_string(),
        path: Path::parse("/projects//scripts/").unwrap(),
    };
    let json = serde_json::to_value(&bookmark).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "label": "scripts", "path": "/projects/scripts" })
    );

    let back: Bookmark = serde_json::from_value(json).unwrap();
    assert_eq!(back, bookmark);
}

#[test]
fn test_shared_path_mutated_from_filter_notification() {
    // A view that owns its path behind a RefCell may react to a filter change
    // by editing the path; the edit fires its own notification afterwards.
    let filter = file_name_filter(&["*"]);
    let shared = Rc::new(RefCell::new(
        Path::parse("/a").unwrap().with_filter(Rc::clone(&filter)),
    ));
    let (changed, _connection) = record(&shared.borrow());

    let target = Rc::downgrade(&shared);
    let _reset = filter.changed_signal().connect(move |_| {
        if let Some(path) = target.upgrade() {
            path.borrow_mut().truncate(0);
        }
    });

    filter.set_enabled(false);
    assert_eq!(*changed.borrow(), vec!["/a", "/"]);
}
