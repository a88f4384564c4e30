//! Package/path and type/file-name consistency of the current file.

use crate::helpers::classpath_fixtures::Fixture;
use ascontext::context::{Severity, codes};

#[test]
fn test_package_mismatch() {
    let fixture = Fixture::new();
    let path = fixture.write("src/com/acme/Wrong.as", "package com.other {\n    public class Wrong {\n    }\n}\n");
    let mut context = fixture.as3(&["src"], false);
    context.set_current_file(&path);

    let diagnostics = context.check_model(true);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code.as_deref(), Some(codes::PACKAGE_MISMATCH));
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].file, path);
    assert!(diagnostics[0].message.contains("com.other"));
}

#[test]
fn test_type_name_mismatch_after_edit() {
    let fixture = Fixture::new();
    let path = fixture.write("src/com/acme/Thing.as", "package com.acme {\n    public class Other {\n    }\n}\n");
    let mut context = fixture.as3(&["src"], false);
    context.set_current_file(&path);

    // unchanged since open
    assert!(context.check_model(true).is_empty());

    let diagnostics = context.check_model(false);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code.as_deref(), Some(codes::TYPE_NAME_MISMATCH));
    assert_eq!(diagnostics[0].start_line, 1);
}

#[test]
fn test_root_package_in_root_directory() {
    let fixture = Fixture::new();
    let path = fixture.write("src/Top.as", "package {\n    public class Top {\n    }\n}\n");
    let mut context = fixture.as3(&["src"], false);
    context.set_current_file(&path);

    assert!(context.check_model(false).is_empty());
}

#[test]
fn test_root_package_in_sub_directory() {
    let fixture = Fixture::new();
    let path = fixture.write("src/com/Top.as", "package {\n    public class Top {\n    }\n}\n");
    let mut context = fixture.as3(&["src"], false);
    context.set_current_file(&path);

    let diagnostics = context.check_model(false);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code.as_deref(), Some(codes::PACKAGE_MISMATCH));
}

#[test]
fn test_script_files_are_not_checked() {
    let fixture = Fixture::new();
    let path = fixture.write("src/com/acme/frame1.as", "var speed:Number = 4;\n");
    let mut context = fixture.as2(&["src"], false);
    context.set_current_file(&path);

    assert!(context.check_model(false).is_empty());
}

#[test]
fn test_disabled_by_settings() {
    let fixture = Fixture::new();
    let path = fixture.write("src/com/acme/Wrong.as", "package com.other {\n    public class Wrong {\n    }\n}\n");
    let mut context = ascontext::Context::as3(
        ascontext::ContextSettings::default()
            .with_user_classpath([fixture.path("src")])
            .with_check_file_name(false),
    );
    context.set_current_file(&path);

    assert!(context.check_model(true).is_empty());
}
