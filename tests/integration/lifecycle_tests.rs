use renderable::{Document, RenderState};

use super::{build_integration_test, MockMessageSource};

#[test]
fn given_a_body_parent_when_rendered_should_attach_one_element_with_the_instance_id() {
    let mut test = build_integration_test().build();

    let element = test.view.render().unwrap();

    assert!(test.view.is_rendered());
    assert_eq!(test.view.element(), Some(&element));
    assert_eq!(
        test.document.attribute(element, "id").as_deref(),
        Some(test.view.id())
    );
    assert_eq!(test.document.parent_of(element), Some(test.document.body()));
    assert_eq!(
        test.document.inner_markup(test.document.body()),
        format!("<div id=\"{}\">hello world</div>", test.view.id())
    );
}

#[test]
fn given_a_rendered_view_when_rendered_again_should_replace_not_duplicate() {
    let mut test = build_integration_test().build();

    let first = test.view.render().unwrap();
    let second = test.view.render().unwrap();

    assert_ne!(first, second);
    assert!(!test.document.is_attached(first));
    assert_eq!(test.document.count_by_id(test.view.id()), 1);
    assert_eq!(test.document.children(test.document.body()), vec![second]);
}

#[test]
fn given_siblings_when_rendered_again_should_keep_position() {
    let mut test = build_integration_test().build();
    let body = test.document.body();

    let before = test.document.create_element("header").unwrap();
    test.document.append_child(&body, &before).unwrap();
    let element = test.view.render().unwrap();
    let after = test.document.create_element("footer").unwrap();
    test.document.append_child(&body, &after).unwrap();

    let replaced = test.view.render().unwrap();

    assert_ne!(element, replaced);
    assert_eq!(test.document.children(body), vec![before, replaced, after]);
}

#[test]
fn given_render_remove_cycles_should_keep_the_same_id() {
    let mut test = build_integration_test().build();
    let id = test.view.id().to_string();

    for _ in 0..3 {
        test.view.render().unwrap();
        test.view.render().unwrap();
        test.view.remove().unwrap();
    }

    assert_eq!(test.view.id(), id);
    assert!(id.starts_with("renderable-"));
}

#[test]
fn given_a_rendered_view_when_removed_should_detach_and_second_remove_is_a_no_op() {
    let mut test = build_integration_test().build();
    let element = test.view.render().unwrap();

    test.view.remove().unwrap();

    assert!(!test.view.is_rendered());
    assert_eq!(test.view.element(), None);
    assert!(!test.document.is_attached(element));
    assert!(test.document.children(test.document.body()).is_empty());

    test.view.remove().unwrap();

    assert_eq!(test.view.state(), &RenderState::Unattached);
}

#[test]
fn given_a_removed_view_when_rendered_should_append_again() {
    let mut test = build_integration_test().build();
    test.view.render().unwrap();
    test.view.remove().unwrap();

    let element = test.view.render().unwrap();

    assert_eq!(test.document.children(test.document.body()), vec![element]);
}

#[test]
fn given_no_attachment_when_rendered_string_should_return_markup_and_leave_the_document_alone() {
    let mut test = build_integration_test().build();

    let markup = test.view.rendered_string().unwrap();

    assert_eq!(markup, "<div>hello world</div>");
    assert!(test.document.children(test.document.body()).is_empty());
    assert!(test.view.is_rendered());
    assert_eq!(test.view.element(), None);
    assert_eq!(test.view.state(), &RenderState::StringOnly);
}

#[test]
fn given_a_string_only_view_when_removed_should_return_to_unattached() {
    let mut test = build_integration_test().build();
    test.view.rendered_string().unwrap();

    test.view.remove().unwrap();

    assert!(!test.view.is_rendered());
    assert!(test.document.children(test.document.body()).is_empty());
}

#[test]
fn given_a_string_only_view_when_rendered_should_append() {
    let mut test = build_integration_test().build();
    test.view.rendered_string().unwrap();

    let element = test.view.render().unwrap();

    assert_eq!(test.view.state(), &RenderState::Attached(element));
    assert_eq!(test.document.children(test.document.body()), vec![element]);
}

#[test]
fn given_markup_characters_in_data_should_render_them_as_text() {
    let mut test = build_integration_test()
        .given_message("<b> & co")
        .build();

    let element = test.view.render().unwrap();

    assert_eq!(
        test.document.outer_markup(element),
        format!(
            "<div id=\"{}\">&lt;b&gt; &amp; co</div>",
            test.view.id()
        )
    );
}

#[test]
fn given_each_render_should_ask_the_view_for_data_once() {
    let mut source = MockMessageSource::new();
    source
        .expect_message()
        .times(3)
        .returning(|| "counted".to_string());

    let mut test = build_integration_test()
        .given_message_source(source)
        .build();

    test.view.render().unwrap();
    test.view.render().unwrap();
    test.view.rendered_string().unwrap();
}

#[test]
fn given_a_preassigned_id_should_use_it_instead_of_generating_one() {
    let mut test = build_integration_test()
        .given_preassigned_id("greeting")
        .build();

    let element = test.view.render().unwrap();

    assert_eq!(test.view.id(), "greeting");
    assert_eq!(test.document.element_by_id("greeting"), Some(element));
}

#[test]
fn given_two_views_with_the_same_id_should_each_track_their_own_element() {
    let mut first = build_integration_test()
        .given_preassigned_id("shared")
        .given_message("first")
        .build();
    let mut second = build_integration_test()
        .given_document(&first.document)
        .given_preassigned_id("shared")
        .given_message("second")
        .build();

    let first_element = first.view.render().unwrap();
    let second_element = second.view.render().unwrap();
    let second_replaced = second.view.render().unwrap();

    assert_ne!(first_element, second_replaced);
    assert!(!first.document.is_attached(second_element));
    assert_eq!(second.view.element(), Some(&second_replaced));
    assert_eq!(first.document.count_by_id("shared"), 2);
    assert_eq!(
        first.document.inner_markup(first.document.body()),
        r#"<div id="shared">first</div><div id="shared">second</div>"#
    );
}
