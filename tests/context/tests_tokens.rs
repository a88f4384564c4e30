//! Types of literal tokens.

use crate::helpers::classpath_fixtures::Fixture;
use crate::helpers::source_fixtures::*;
use rstest::rstest;

fn core_types() -> Fixture {
    let fixture = Fixture::new();
    fixture.write("core/Object.as", AS3_OBJECT);
    fixture.write("core/Array.as", AS3_ARRAY);
    fixture.write("core/String.as", AS3_STRING);
    fixture.write("core/Boolean.as", AS3_BOOLEAN);
    fixture.write("core/Number.as", AS3_NUMBER);
    fixture.write("core/int.as", AS3_INT);
    fixture
}

#[rstest]
#[case("true", "Boolean")]
#[case("false", "Boolean")]
#[case("12", "int")]
#[case("-3", "int")]
#[case("++1", "int")]
#[case("1.5", "Number")]
#[case("2e10", "Number")]
#[case("{}", "Object")]
#[case("{a: 1}", "Object")]
#[case("[]", "Array")]
#[case("[1, 2]", "Array")]
#[case("\"text\"", "String")]
#[case("'text'", "String")]
#[case("Array", "Array")]
fn test_as3_tokens(#[case] token: &str, #[case] expected: &str) {
    let fixture = core_types();
    let context = fixture.as3(&["core"], false);
    assert_eq!(context.resolve_token(token, None).name, expected);
}

#[rstest]
#[case("12", "Number")]
#[case("-1", "Number")]
#[case("\"s\"", "String")]
fn test_as2_numbers_are_number(#[case] token: &str, #[case] expected: &str) {
    let fixture = Fixture::new();
    fixture.write("core/Number.as", "intrinsic class Number {\n}\n");
    fixture.write("core/String.as", "intrinsic class String {\n}\n");
    let context = fixture.as2(&["core"], false);
    assert_eq!(context.resolve_token(token, None).name, expected);
}

#[rstest]
#[case("")]
#[case("\"")]
#[case("unknown")]
fn test_unknown_tokens_are_void(#[case] token: &str) {
    let fixture = core_types();
    let context = fixture.as3(&["core"], false);
    assert!(context.resolve_token(token, None).is_void());
}
