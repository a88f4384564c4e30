//! A file is parsed at most once per observed modification.

use crate::helpers::classpath_fixtures::{Fixture, parse_count};
use crate::helpers::source_fixtures::*;
use ascontext::model::{FlagType, Visibility};

const BASE_WITH_NAME: &str =
    "package com.acme {\n    public class Base {\n        protected var id:int;\n        public var name:String;\n    }\n}\n";

#[test]
fn test_rebuild_reuses_parsed_models() {
    let fixture = Fixture::new();
    fixture.write("src/com/acme/Main.as", AS3_MAIN);
    fixture.write("src/com/acme/Base.as", AS3_BASE);
    let mut context = fixture.as3(&["src"], false);
    let src = fixture.path("src");
    assert_eq!(parse_count(&context, &src), 2);

    context.build_class_path();
    context.build_class_path();
    assert_eq!(parse_count(&context, &src), 2);
}

#[test]
fn test_lazy_lookups_parse_once() {
    let fixture = Fixture::new();
    fixture.write("src/com/acme/Base.as", AS3_BASE);
    let context = fixture.as3(&["src"], true);
    let src = fixture.path("src");
    assert_eq!(parse_count(&context, &src), 0);

    let first = context.resolve_type("com.acme.Base", None);
    let second = context.resolve_type("com.acme.Base", None);
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(parse_count(&context, &src), 1);
}

#[test]
fn test_lazy_lookup_sees_modified_file() {
    let fixture = Fixture::new();
    fixture.write("src/com/acme/Base.as", AS3_BASE);
    let context = fixture.as3(&["src"], true);
    let src = fixture.path("src");

    let before = context.resolve_type("com.acme.Base", None);
    assert!(!before.members.contains("name", FlagType::empty(), Visibility::empty()));

    fixture.write("src/com/acme/Base.as", BASE_WITH_NAME);
    let after = context.resolve_type("com.acme.Base", None);
    assert!(after.members.contains("name", FlagType::VARIABLE, Visibility::PUBLIC));
    assert_eq!(parse_count(&context, &src), 2);
}

#[test]
fn test_change_notification_reparses_only_changed_file() {
    let fixture = Fixture::new();
    fixture.write("src/com/acme/Main.as", AS3_MAIN);
    fixture.write("src/com/acme/Base.as", AS3_BASE);
    let mut context = fixture.as3(&["src"], false);
    let src = fixture.path("src");
    let base_path = fixture.path("src/com/acme/Base.as");

    // unchanged on disk: nothing to do
    context.notify_file_changed(&base_path);
    assert_eq!(parse_count(&context, &src), 2);

    fixture.write("src/com/acme/Base.as", BASE_WITH_NAME);
    context.notify_file_changed(&base_path);
    assert_eq!(parse_count(&context, &src), 3);

    let base = context.resolve_type("com.acme.Base", None);
    assert!(base.members.contains("name", FlagType::VARIABLE, Visibility::empty()));
}

#[test]
fn test_removed_file_is_forgotten() {
    let fixture = Fixture::new();
    fixture.write("src/com/acme/Main.as", AS3_MAIN);
    fixture.write("src/com/acme/Base.as", AS3_BASE);
    let mut context = fixture.as3(&["src"], false);

    fixture.remove("src/com/acme/Base.as");
    context.notify_file_removed(&fixture.path("src/com/acme/Base.as"));

    assert!(context.resolve_type("com.acme.Base", None).is_void());
    assert_eq!(context.classpath().roots()[0].file_count(), 1);
}

#[test]
fn test_check_model_reloads_changed_current_file() {
    let fixture = Fixture::new();
    let base_path = fixture.write("src/com/acme/Base.as", AS3_BASE);
    let mut context = fixture.as3(&["src"], false);
    context.set_current_file(&base_path);
    let before = context.current_file().cloned().unwrap();

    context.check_model(false);
    assert!(std::sync::Arc::ptr_eq(&before, context.current_file().unwrap()));

    fixture.write("src/com/acme/Base.as", BASE_WITH_NAME);
    context.check_model(false);
    let after = context.current_file().unwrap();
    assert!(!std::sync::Arc::ptr_eq(&before, after));
    assert!(after.public_class().members.contains("name", FlagType::empty(), Visibility::empty()));
}

#[test]
fn test_concurrent_lookups_parse_once() {
    let fixture = Fixture::new();
    fixture.write("src/com/acme/Base.as", AS3_BASE);
    let context = fixture.as3(&["src"], true);
    let barrier = std::sync::Barrier::new(8);

    let names: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    context.resolve_type("com.acme.Base", None).qualified_name().to_string()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(names.iter().all(|n| n == "com.acme.Base"));
    assert_eq!(parse_count(&context, &fixture.path("src")), 1);
}
