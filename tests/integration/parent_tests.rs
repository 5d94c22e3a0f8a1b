use renderable::{ExecutionError, RenderError};

use super::{build_integration_test, GivenParent};

#[test]
fn given_a_wrapped_collection_parent_should_render_into_its_first_element() {
    let mut test = build_integration_test()
        .given_parent(GivenParent::BodyInCollection)
        .build();

    let element = test.view.render().unwrap();

    assert_eq!(test.view.parent(), Some(&test.document.body()));
    assert_eq!(test.document.parent_of(element), Some(test.document.body()));
}

#[test]
fn given_an_empty_collection_parent_when_rendered_should_fail_with_an_execution_error() {
    let mut test = build_integration_test()
        .given_parent(GivenParent::EmptyCollection)
        .build();

    let error = test.view.render().unwrap_err();

    assert_eq!(test.view.parent(), None);
    assert!(matches!(
        error,
        RenderError::Execution(ExecutionError::EmptyParentCollection)
    ));
    assert!(!test.view.is_rendered());
    assert!(test.document.children(test.document.body()).is_empty());
    assert_eq!(test.view.rendered_string().unwrap(), "<div>hello world</div>");
}
