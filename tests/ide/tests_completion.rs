//! Code completion from the resolver context.

use crate::helpers::classpath_fixtures::Fixture;
use crate::helpers::source_fixtures::*;
use ascontext::ide::{CompletionKind, completions};

fn project() -> Fixture {
    let fixture = Fixture::new();
    fixture.write("src/com/acme/Main.as", AS3_MAIN);
    fixture.write("src/com/acme/Base.as", AS3_BASE);
    fixture.write("src/com/acme/util/Helper.as", AS3_HELPER);
    fixture.write("lib/flash/events/Event.as", AS3_EVENT);
    fixture.write("lib/flash/events/EventDispatcher.as", AS3_DISPATCHER);
    fixture
}

#[test]
fn test_completion_with_prefix() {
    let fixture = project();
    let mut context = fixture.as3(&["src", "lib"], false);
    context.set_current_file(fixture.path("src/com/acme/Main.as"));

    let items = completions(&context, "ev");
    let labels: Vec<_> = items.iter().map(|i| i.label.as_ref()).collect();
    assert_eq!(labels, vec!["Event", "EventDispatcher"]);
    assert_eq!(items[0].kind, CompletionKind::Class);
    assert_eq!(items[0].detail.as_deref(), Some("flash.events.Event"));
}

#[test]
fn test_completion_ranks_top_level_first() {
    let fixture = project();
    let mut context = fixture.as3(&["src", "lib"], false);
    context.set_current_file(fixture.path("src/com/acme/Main.as"));

    let items = completions(&context, "");
    let labels: Vec<_> = items.iter().map(|i| i.label.as_ref()).collect();

    let position = |label: &str| labels.iter().position(|l| *l == label).unwrap();
    assert!(position("this") < position("Base"));
    assert!(position("Base") < position("com"));
    assert!(position("com") < position("var"));

    // `this` is both a top-level element and an AS3 keyword
    assert_eq!(labels.iter().filter(|l| **l == "this").count(), 1);
    let this = &items[position("this")];
    assert_eq!(this.kind, CompletionKind::Variable);
    assert_eq!(this.detail.as_deref(), Some("com.acme.Main"));
}

#[test]
fn test_completion_keywords() {
    let fixture = project();
    let mut context = fixture.as3(&["src", "lib"], false);
    context.set_current_file(fixture.path("src/com/acme/Main.as"));

    let items = completions(&context, "INST");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label.as_ref(), "instanceof");
    assert_eq!(items[0].kind, CompletionKind::Keyword);
}

#[test]
fn test_completion_without_current_file() {
    let fixture = project();
    let context = fixture.as3(&["src", "lib"], false);

    let items = completions(&context, "");
    assert!(items.iter().all(|i| i.kind == CompletionKind::Keyword || i.sort_priority == 10));
}
