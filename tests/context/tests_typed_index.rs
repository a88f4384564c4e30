//! Typed indexes (`Base@Index`): clones with retyped members.

use crate::helpers::classpath_fixtures::Fixture;
use crate::helpers::source_fixtures::*;
use ascontext::model::{FlagType, Visibility};
use std::sync::Arc;

const AS3_PROXY: &str = "package flash.utils {\n    public class Proxy {\n    }\n}\n";

fn core_types() -> Fixture {
    let fixture = Fixture::new();
    fixture.write("core/Object.as", AS3_OBJECT);
    fixture.write("core/Array.as", AS3_ARRAY);
    fixture.write("core/String.as", AS3_STRING);
    fixture.write("core/flash/utils/Proxy.as", AS3_PROXY);
    fixture
}

#[test]
fn test_generic_members_are_retyped() {
    let fixture = core_types();
    let context = fixture.as3(&["core"], false);

    let typed = context.resolve_type("Array@String", None);
    assert_eq!(typed.name, "Array@String");
    assert_eq!(typed.index_type.as_deref(), Some("String"));
    assert_eq!(typed.qualified_name(), "Array@String");

    let search = |name: &str| typed.members.search(name, FlagType::empty(), Visibility::empty()).unwrap();
    assert_eq!(search("pop").type_name, "String");
    assert_eq!(search("push").type_name, "int");
    assert_eq!(search("length").type_name, "int");
    assert_eq!(search("indexOf").parameters[0].type_name, "String");

    // the base class is left alone
    let array = context.resolve_type("Array", None);
    assert!(array.index_type.is_none());
    let pop = array.members.search("pop", FlagType::empty(), Visibility::empty()).unwrap();
    assert_eq!(pop.type_name, "Object");
}

#[test]
fn test_clones_are_cached_until_base_changes() {
    let fixture = core_types();
    let mut context = fixture.as3(&["core"], false);

    let first = context.resolve_type("Array@String", None);
    let second = context.resolve_type("Array@String", None);
    assert!(Arc::ptr_eq(&first, &second));

    let mut changed = AS3_ARRAY.replace("public var length:int;", "public var length:int;\n        public var fixed:Boolean;");
    changed.push('\n');
    fixture.write("core/Array.as", &changed);
    context.notify_file_changed(&fixture.path("core/Array.as"));

    let third = context.resolve_type("Array@String", None);
    assert!(!Arc::ptr_eq(&first, &third));
    assert!(third.members.contains("fixed", FlagType::empty(), Visibility::empty()));
}

#[test]
fn test_proxy_extends_index_type() {
    let fixture = core_types();
    let context = fixture.as3(&["core"], false);

    let typed = context.resolve_type("flash.utils.Proxy@Array", None);
    assert_eq!(typed.extends_type, "Array");
}

#[test]
fn test_unknown_parts() {
    let fixture = core_types();
    let context = fixture.as3(&["core"], false);

    // unknown index: the base class itself
    let array = context.resolve_type("Array", None);
    assert!(Arc::ptr_eq(&context.resolve_type("Array@Nope", None), &array));
    // unknown base: void
    assert!(context.resolve_type("Nope@String", None).is_void());
}
