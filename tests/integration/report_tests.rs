use std::any::type_name;

use super::log_capture::CapturedLogs;
use super::{build_integration_test, GivenParent, MessageView};

#[test]
fn given_an_unknown_template_when_constructed_should_log_an_error_naming_the_view() {
    let logs = CapturedLogs::default();

    let test = logs.capture(|| build_integration_test().given_template("missing").build());

    let errors = logs.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains(type_name::<MessageView>()));
    assert!(errors[0].contains(test.view.id()));
    assert!(errors[0].contains("missing template `missing`"));
}

#[test]
fn given_a_failing_template_when_rendered_should_log_the_underlying_error() {
    let mut test = build_integration_test().given_template("failing").build();
    let logs = CapturedLogs::default();

    logs.capture(|| test.view.render()).unwrap_err();

    let errors = logs.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains(type_name::<MessageView>()));
    assert!(errors[0].contains(test.view.id()));
    assert!(errors[0].contains("template exploded"));
}

#[test]
fn given_an_empty_collection_parent_when_rendered_should_log_the_failure() {
    let mut test = build_integration_test()
        .given_parent(GivenParent::EmptyCollection)
        .build();
    let logs = CapturedLogs::default();

    logs.capture(|| test.view.render()).unwrap_err();

    let errors = logs.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("parent collection is empty"));
}

#[test]
fn given_no_parent_when_rendered_should_not_log() {
    let mut test = build_integration_test()
        .given_parent(GivenParent::NoParent)
        .build();
    let logs = CapturedLogs::default();

    logs.capture(|| test.view.render()).unwrap_err();

    assert!(logs.errors().is_empty());
}

#[test]
fn given_a_successful_render_should_log_only_at_debug() {
    let mut test = build_integration_test().build();
    let logs = CapturedLogs::default();

    logs.capture(|| test.view.render()).unwrap();

    assert!(logs.errors().is_empty());
    assert!(logs.contents().contains("rendered"));
}
