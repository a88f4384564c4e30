//! Type resolution order: same file, explicit imports, wildcard imports,
//! same package, then fully qualified lookup across roots.

use crate::helpers::classpath_fixtures::Fixture;
use crate::helpers::source_fixtures::*;
use ascontext::context::{Context, ContextSettings};
use rstest::rstest;

fn as3_project() -> Fixture {
    let fixture = Fixture::new();
    fixture.write("src/com/acme/Main.as", AS3_MAIN);
    fixture.write("src/com/acme/Base.as", AS3_BASE);
    fixture.write("src/com/acme/util/Helper.as", AS3_HELPER);
    fixture.write("lib/flash/events/Event.as", AS3_EVENT);
    fixture.write("lib/flash/events/EventDispatcher.as", AS3_DISPATCHER);
    fixture
}

// =============================================================================
// RESOLUTION ORDER
// =============================================================================

#[rstest]
#[case::eager(false)]
#[case::lazy(true)]
fn test_explicit_import_qualifies_short_name(#[case] lazy: bool) {
    let fixture = as3_project();
    let mut context = fixture.as3(&["src", "lib"], lazy);
    context.set_current_file(fixture.path("src/com/acme/Main.as"));
    let file = context.current_file().cloned().unwrap();

    let helper = context.resolve_type("Helper", Some(&file));
    assert_eq!(helper.qualified_name(), "com.acme.util.Helper");
    assert_eq!(helper.file, fixture.path("src/com/acme/util/Helper.as"));
}

#[rstest]
#[case::eager(false)]
#[case::lazy(true)]
fn test_wildcard_import_finds_package_type(#[case] lazy: bool) {
    let fixture = as3_project();
    let mut context = fixture.as3(&["src", "lib"], lazy);
    context.set_current_file(fixture.path("src/com/acme/Main.as"));
    let file = context.current_file().cloned().unwrap();

    let event = context.resolve_type("Event", Some(&file));
    assert_eq!(event.qualified_name(), "flash.events.Event");
}

#[rstest]
#[case::eager(false)]
#[case::lazy(true)]
fn test_same_package_sibling_without_import(#[case] lazy: bool) {
    let fixture = as3_project();
    let mut context = fixture.as3(&["src", "lib"], lazy);
    context.set_current_file(fixture.path("src/com/acme/Main.as"));
    let file = context.current_file().cloned().unwrap();

    let base = context.resolve_type("Base", Some(&file));
    assert_eq!(base.qualified_name(), "com.acme.Base");
}

#[rstest]
#[case::eager(false)]
#[case::lazy(true)]
fn test_fully_qualified_lookup(#[case] lazy: bool) {
    let fixture = as3_project();
    let context = fixture.as3(&["src", "lib"], lazy);

    let helper = context.resolve_type("com.acme.util.Helper", None);
    assert_eq!(helper.name, "Helper");
    let event = context.resolve_type("flash.events.Event", None);
    assert_eq!(event.package, "flash.events");
}

#[test]
fn test_same_file_class_wins_over_classpath() {
    let fixture = as3_project();
    fixture.write("src/com/acme/Widget.as", AS3_WITH_PRIVATE_SECTION);
    fixture.write(
        "src/com/acme/WidgetState.as",
        "package com.acme {\n    public class WidgetState {\n    }\n}\n",
    );
    let mut context = fixture.as3(&["src", "lib"], false);
    context.set_current_file(fixture.path("src/com/acme/Widget.as"));
    let file = context.current_file().cloned().unwrap();

    let state = context.resolve_type("WidgetState", Some(&file));
    assert_eq!(state.file, fixture.path("src/com/acme/Widget.as"));

    // other files see the public one
    let public = context.resolve_type("com.acme.WidgetState", None);
    assert_eq!(public.file, fixture.path("src/com/acme/WidgetState.as"));
}

#[rstest]
#[case::eager(false)]
#[case::lazy(true)]
fn test_first_root_wins(#[case] lazy: bool) {
    let fixture = Fixture::new();
    fixture.write("first/flash/events/Event.as", AS3_EVENT);
    fixture.write("second/flash/events/Event.as", AS3_EVENT);
    let context = fixture.as3(&["first", "second"], lazy);

    let event = context.resolve_type("flash.events.Event", None);
    assert_eq!(event.file, fixture.path("first/flash/events/Event.as"));
}

#[test]
fn test_as2_qualified_class_name() {
    let fixture = Fixture::new();
    fixture.write("src/com/acme/Button.as", AS2_BUTTON);
    fixture.write("src/mx/utils/Delegate.as", AS2_DELEGATE);
    fixture.write("src/MovieClip.as", AS2_MOVIECLIP);
    let mut context = fixture.as2(&["src"], false);
    context.set_current_file(fixture.path("src/com/acme/Button.as"));
    let file = context.current_file().cloned().unwrap();

    assert_eq!(context.resolve_type("Delegate", Some(&file)).qualified_name(), "mx.utils.Delegate");
    assert_eq!(context.resolve_type("MovieClip", Some(&file)).name, "MovieClip");
    assert_eq!(context.current_class().qualified_name(), "com.acme.Button");
}

// =============================================================================
// PRECEDENCE BETWEEN STEPS
// =============================================================================

const OTHER_EVENT: &str = "package com.other {\n    public class Event {\n    }\n}\n";
const ROOT_BASE: &str = "package {\n    public class Base {\n    }\n}\n";
const ACME_EVENT: &str = "package com.acme {\n    public class Event {\n    }\n}\n";

#[rstest]
#[case::eager(false)]
#[case::lazy(true)]
fn test_explicit_import_wins_over_earlier_wildcard(#[case] lazy: bool) {
    let fixture = Fixture::new();
    fixture.write(
        "src/app/Main.as",
        "package app {\n    import flash.events.*;\n    import com.other.Event;\n    public class Main {\n    }\n}\n",
    );
    fixture.write("lib/flash/events/Event.as", AS3_EVENT);
    fixture.write("lib/com/other/Event.as", OTHER_EVENT);
    let mut context = fixture.as3(&["src", "lib"], lazy);
    context.set_current_file(fixture.path("src/app/Main.as"));
    let file = context.current_file().cloned().unwrap();

    let event = context.resolve_type("Event", Some(&file));
    assert_eq!(event.qualified_name(), "com.other.Event");
}

#[rstest]
#[case::eager(false)]
#[case::lazy(true)]
fn test_wildcard_import_wins_over_same_package(#[case] lazy: bool) {
    let fixture = as3_project();
    fixture.write("src/com/acme/Event.as", ACME_EVENT);
    let mut context = fixture.as3(&["src", "lib"], lazy);
    context.set_current_file(fixture.path("src/com/acme/Main.as"));
    let file = context.current_file().cloned().unwrap();

    let event = context.resolve_type("Event", Some(&file));
    assert_eq!(event.qualified_name(), "flash.events.Event");
}

#[rstest]
#[case::eager(false)]
#[case::lazy(true)]
fn test_same_package_wins_over_root_package(#[case] lazy: bool) {
    let fixture = as3_project();
    // discovered before com/acme/Base.as
    fixture.write("src/Base.as", ROOT_BASE);
    let mut context = fixture.as3(&["src", "lib"], lazy);
    context.set_current_file(fixture.path("src/com/acme/Main.as"));
    let file = context.current_file().cloned().unwrap();

    let base = context.resolve_type("Base", Some(&file));
    assert_eq!(base.qualified_name(), "com.acme.Base");
    assert_eq!(base.file, fixture.path("src/com/acme/Base.as"));
}

#[rstest]
#[case::eager(false)]
#[case::lazy(true)]
fn test_same_package_in_later_root_wins_over_root_package(#[case] lazy: bool) {
    let fixture = Fixture::new();
    fixture.write("lib/Base.as", ROOT_BASE);
    fixture.write("src/com/acme/Main.as", AS3_MAIN);
    fixture.write("src/com/acme/Base.as", AS3_BASE);
    let mut context = fixture.as3(&["lib", "src"], lazy);
    context.set_current_file(fixture.path("src/com/acme/Main.as"));
    let file = context.current_file().cloned().unwrap();

    let base = context.resolve_type("Base", Some(&file));
    assert_eq!(base.qualified_name(), "com.acme.Base");
}

#[rstest]
#[case::eager(false)]
#[case::lazy(true)]
fn test_root_package_type_without_sibling(#[case] lazy: bool) {
    let fixture = as3_project();
    fixture.write("lib/Standalone.as", "package {\n    public class Standalone {\n    }\n}\n");
    let mut context = fixture.as3(&["src", "lib"], lazy);
    context.set_current_file(fixture.path("src/com/acme/Main.as"));
    let file = context.current_file().cloned().unwrap();

    assert_eq!(context.resolve_type("Standalone", Some(&file)).qualified_name(), "Standalone");
}

// =============================================================================
// FAILURES DEGRADE TO VOID
// =============================================================================

#[rstest]
#[case("")]
#[case("void")]
#[case("Missing")]
#[case("com.acme.Missing")]
#[case("not a type")]
fn test_unresolved_is_void(#[case] name: &str) {
    let fixture = as3_project();
    let context = fixture.as3(&["src", "lib"], false);
    assert!(context.resolve_type(name, None).is_void());
}

#[test]
fn test_nothing_resolves_before_classpath_is_built() {
    let fixture = as3_project();
    let context = Context::as3(ContextSettings::default().with_user_classpath([fixture.path("src")]));
    assert!(!context.is_started());
    assert!(context.resolve_type("com.acme.Base", None).is_void());
}
