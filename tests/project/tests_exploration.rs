//! Eager exploration of classpath roots.

use crate::helpers::classpath_fixtures::Fixture;
use crate::helpers::source_fixtures::*;
use ascontext::project::PathModel;

#[test]
fn test_explore_parses_sources_and_skips_hidden_dirs() {
    let fixture = Fixture::new();
    fixture.write("root/com/acme/Base.as", AS3_BASE);
    fixture.write("root/com/acme/notes.txt", "not a source");
    fixture.write("root/.svn/Stale.as", AS3_BASE);
    fixture.write("root/aso/Compiled.as", AS3_BASE);
    let root = PathModel::new(fixture.path("root"));
    root.manual_exploration(&["aso"]);

    assert_eq!(root.explore(".as"), 1);
    assert!(root.was_explored());
    assert!(root.has_file(&fixture.path("root/com/acme/Base.as")));
    assert_eq!(root.file_count(), 1);
}

#[test]
fn test_explore_keeps_unchanged_models() {
    let fixture = Fixture::new();
    let base = fixture.write("root/com/acme/Base.as", AS3_BASE);
    fixture.write("root/com/acme/util/Helper.as", AS3_HELPER);
    let root = PathModel::new(fixture.path("root"));
    assert_eq!(root.explore(".as"), 2);
    let before = root.try_get_file(&base).unwrap();

    fixture.write("root/flash/events/Event.as", AS3_EVENT);
    fixture.remove("root/com/acme/util/Helper.as");
    assert_eq!(root.explore(".as"), 1);

    assert!(std::sync::Arc::ptr_eq(&before, &root.try_get_file(&base).unwrap()));
    assert_eq!(root.file_count(), 2);
    assert_eq!(root.parse_count(), 3);
}

#[test]
fn test_missing_root_is_invalid() {
    let fixture = Fixture::new();
    let root = PathModel::new(fixture.path("missing"));
    assert!(!root.is_valid());
    assert_eq!(root.explore(".as"), 0);
    assert!(root.locate(std::path::Path::new("A.as")).unwrap().is_none());
}
