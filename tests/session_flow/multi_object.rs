use super::fixtures::{Harness, CENTER, GLOBAL, LOCAL};
use click_seg_session::{OperationKind, RefinementMode, SessionOptions};

#[test]
fn undo_switches_parameters_back_to_the_previous_object() {
    let mut h = Harness::new();
    let tumor = h.object.clone();
    let node = h.add_object("Lymphknoten");

    h.select(&tumor);
    h.click(CENTER);
    h.select(&node);
    h.click(LOCAL);
    assert_eq!(h.params().target_object.as_ref(), Some(&node));
    assert_eq!(h.params().label, 2);
    assert_eq!(h.state.document.generation_of(&tumor), Some(1));
    assert_eq!(h.state.document.generation_of(&node), Some(2));

    h.undo();
    assert_eq!(h.params().target_object.as_ref(), Some(&tumor));
    assert_eq!(h.params().label, 1);
    assert_eq!(h.state.document.generation_of(&node), None);
    assert_eq!(h.label_map().count_label(2), 0);
    assert!(h.label_map().count_label(1) > 0);

    h.redo();
    assert_eq!(h.params().target_object.as_ref(), Some(&node));
    assert_eq!(h.state.document.generation_of(&node), Some(2));
    assert_eq!(h.state.session.tracker.counter(), 2);
}

#[test]
fn undo_across_an_added_object_keeps_parameters_at_the_document_state() {
    let mut h = Harness::new();
    h.set_mode(RefinementMode::GlobalRefinement);
    h.click(CENTER);
    h.click(GLOBAL);
    let post_global_params = h.params();
    let post_global_map = h.label_map();

    let node = h.add_object("Lymphknoten");
    h.select(&node);
    h.click(LOCAL);
    assert_eq!(h.state.document.current_generation(), Some(3));

    h.undo();
    h.undo();

    assert_eq!(h.state.document.current_generation(), Some(2));
    assert_eq!(h.state.session.tracker.counter(), 2);
    assert_eq!(h.label_map(), post_global_map);
    assert_eq!(h.params(), post_global_params);
    assert_eq!(h.params().global_refinement_points.count(), 1);
    assert_eq!(h.cache_lengths(), (2, 1));
    assert_eq!(h.deficit(), 1);
    assert!(h.state.document.object(&node).is_none());

    h.redo();
    assert_eq!(h.deficit(), 0);
    assert_eq!(h.cache_lengths(), (2, 1));
    assert!(h.state.document.object(&node).is_some());

    h.redo();
    assert_eq!(h.cache_lengths(), (3, 0));
    assert_eq!(h.params().target_object.as_ref(), Some(&node));
    assert_eq!(h.state.session.tracker.counter(), 3);
}

#[test]
fn returning_to_an_object_starts_it_new_and_restamps() {
    let mut h = Harness::new();
    let tumor = h.object.clone();
    let node = h.add_object("Lymphknoten");

    h.select(&tumor);
    h.click(CENTER);
    h.select(&node);
    h.click(LOCAL);
    h.select(&tumor);
    h.click(GLOBAL);

    assert_eq!(h.calls(), vec![OperationKind::New; 3]);
    assert_eq!(h.state.document.generation_of(&tumor), Some(3));
    assert_eq!(h.state.document.generation_of(&node), Some(2));
}

#[test]
fn unobserved_undo_recovers_the_earlier_objects_parameters() {
    let mut h = Harness::new();
    let tumor = h.object.clone();
    let node = h.add_object("Lymphknoten");

    h.select(&tumor);
    h.click(CENTER);
    h.select(&node);
    h.click(LOCAL);

    h.state.document.undo().expect("Dokument-Undo");
    h.select(&tumor);
    h.click(GLOBAL);

    assert_eq!(h.calls().last(), Some(&OperationKind::GlobalRefinement));
    assert_eq!(h.params().target_object.as_ref(), Some(&tumor));
    assert_eq!(h.params().global_refinement_points.count(), 1);
    assert_eq!(h.state.document.generation_of(&tumor), Some(2));
}

#[test]
fn disabled_generation_tracking_leaves_tags_untouched() {
    let options = SessionOptions {
        generation_tracking: false,
        ..SessionOptions::default()
    };
    let mut h = Harness::with_options(options);

    h.click(CENTER);
    h.click(GLOBAL);

    assert_eq!(h.state.document.current_generation(), None);
    assert_eq!(h.state.session.tracker.counter(), 0);
    assert_eq!(h.cache_lengths(), (2, 0));
}
