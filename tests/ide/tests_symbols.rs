//! Document and workspace symbols.

use crate::helpers::classpath_fixtures::Fixture;
use crate::helpers::source_fixtures::*;
use ascontext::ide::{document_symbols, workspace_symbols};

#[test]
fn test_workspace_symbols_filter() {
    let fixture = Fixture::new();
    fixture.write("src/com/acme/Base.as", AS3_BASE);
    fixture.write("lib/flash/events/Event.as", AS3_EVENT);
    fixture.write("lib/flash/events/EventDispatcher.as", AS3_DISPATCHER);
    let context = fixture.as3(&["src", "lib"], false);

    let all = workspace_symbols(&context, None);
    let names: Vec<_> = all.iter().map(|s| s.qualified_name.as_ref()).collect();
    assert_eq!(names, vec!["com.acme.Base", "flash.events.Event", "flash.events.EventDispatcher"]);

    let events = workspace_symbols(&context, Some("DISPATCH"));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name.as_ref(), "EventDispatcher");
    assert_eq!(events[0].file, fixture.path("lib/flash/events/EventDispatcher.as"));
    assert_eq!(events[0].start_line, 1);
}

#[test]
fn test_document_symbols_of_private_section() {
    let fixture = Fixture::new();
    let path = fixture.write("src/com/acme/Widget.as", AS3_WITH_PRIVATE_SECTION);
    let mut context = fixture.as3(&["src"], false);
    context.set_current_file(&path);

    let symbols = document_symbols(context.current_file().unwrap());
    let names: Vec<_> = symbols.iter().map(|s| s.qualified_name.as_ref()).collect();
    assert_eq!(names, vec!["com.acme.Widget", "com.acme.WidgetState", "com.acme.WidgetCache"]);
}
