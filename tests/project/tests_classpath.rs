//! Classpath construction.

use crate::helpers::classpath_fixtures::Fixture;
use crate::helpers::source_fixtures::*;
use ascontext::context::{Context, ContextSettings, ContextSetup};
use std::path::PathBuf;

fn root_names(context: &Context, fixture: &Fixture) -> Vec<PathBuf> {
    context
        .classpath()
        .iter()
        .map(|r| r.path().strip_prefix(fixture.root()).unwrap().to_path_buf())
        .collect()
}

#[test]
fn test_mm_classpath_with_hidden_dirs() {
    let fixture = Fixture::new();
    fixture.write("mm/FP8/MovieClip.as", AS2_MOVIECLIP);
    fixture.write("mm/FP8/FP7/Old.as", "class Old {\n}\n");
    fixture.mkdir("mm/FP9");
    let settings = ContextSettings::default().with_mm_classpath(fixture.path("mm"));
    let mut context = Context::as2(settings);
    context.set_setup(ContextSetup::new("Flash Player", "9.0"));
    context.build_class_path();

    assert_eq!(root_names(&context, &fixture), vec![PathBuf::from("mm/FP9"), PathBuf::from("mm/FP8")]);
    let fp8 = &context.classpath().roots()[1];
    assert_eq!(fp8.excluded_dirs(), vec!["aso", "FP7", "FP8", "FP9"]);
    assert_eq!(fp8.file_count(), 1);
    assert!(!context.resolve_type("MovieClip", None).is_void());
    assert!(context.resolve_type("Old", None).is_void());
}

#[test]
fn test_sdk_version_fallback() {
    let fixture = Fixture::new();
    fixture.mkdir("sdk/std");
    fixture.mkdir("sdk/std8");
    let settings = ContextSettings::default().with_sdk(fixture.path("sdk"));
    let mut context = Context::as2(settings);
    context.set_setup(ContextSetup::new("Flash Player", "9.0"));
    context.build_class_path();

    assert_eq!(context.major_version(), 8);
    assert_eq!(root_names(&context, &fixture), vec![PathBuf::from("sdk/std8"), PathBuf::from("sdk/std")]);
}

#[test]
fn test_top_level_declarations() {
    let fixture = Fixture::new();
    fixture.write("src/toplevel.as", AS2_TOPLEVEL);
    fixture.write("src/MovieClip.as", AS2_MOVIECLIP);
    let context = fixture.as2(&["src"], false);

    let names = context.top_level_elements().names();
    for expected in ["_global", "_quality", "_root", "super", "this", "trace", "Void"] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }
    let trace = context.resolve_top_level_element("trace");
    assert!(trace.member.is_some());
    let root = context.resolve_top_level_element("_root");
    assert_eq!(root.type_class.name, "MovieClip");
}

#[test]
fn test_temporary_root_follows_current_file() {
    let fixture = Fixture::new();
    fixture.write("lib/flash/events/Event.as", AS3_EVENT);
    let outside = fixture.write("other/com/acme/Main.as", AS3_MAIN);
    fixture.write("other/com/acme/Base.as", AS3_BASE);
    let mut context = fixture.as3(&["lib"], false);

    context.set_current_file(&outside);
    assert_eq!(context.temporary_path(), Some(fixture.path("other").as_path()));
    assert_eq!(root_names(&context, &fixture)[0], PathBuf::from("other"));

    // siblings are found by file name in the temporary root
    let file = context.current_file().cloned().unwrap();
    assert_eq!(context.resolve_type("Base", Some(&file)).qualified_name(), "com.acme.Base");

    // survives a rebuild
    context.build_class_path();
    assert_eq!(context.temporary_path(), Some(fixture.path("other").as_path()));
    assert!(context.classpath().temporary().is_some());

    let inside = fixture.path("lib/flash/events/Event.as");
    context.set_current_file(&inside);
    assert!(context.temporary_path().is_none());
    assert!(context.classpath().temporary().is_none());
}
