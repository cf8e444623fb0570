use super::fixtures::{Harness, CENTER, GLOBAL, LOCAL};
use click_seg_session::{OperationKind, RefinementMode, SessionIntent};

#[test]
fn undo_and_redo_keep_queues_symmetric() {
    let mut h = Harness::new();
    h.click(CENTER);
    h.click(GLOBAL);
    h.click(GLOBAL + click_seg_session::Point3::new(0.0, 4.0, 0.0));
    let final_map = h.label_map();
    assert_eq!(h.cache_lengths(), (3, 0));

    for _ in 0..3 {
        h.undo();
    }
    assert_eq!(h.cache_lengths(), (0, 3));
    assert_eq!(h.state.session.store.redo_levels(), 3);
    assert_eq!(h.label_map().foreground_count(), 0);

    for _ in 0..3 {
        h.redo();
    }
    assert_eq!(h.cache_lengths(), (3, 0));
    assert_eq!(h.label_map(), final_map);
    assert_eq!(h.deficit(), 0);
}

#[test]
fn undo_restores_panel_settings_from_parameters() {
    let mut h = Harness::new();
    h.click(CENTER);
    h.set_mode(RefinementMode::LocalRefinement);
    h.click(LOCAL);

    h.undo();

    assert_eq!(h.state.settings.mode, RefinementMode::GlobalRefinement);
    assert!(h.params().local_refinement_points.is_empty());
}

#[test]
fn foreign_undos_accumulate_deficit_without_cache_movement() {
    let mut h = Harness::new();
    for _ in 0..3 {
        h.foreign_edit();
    }

    for _ in 0..3 {
        h.undo();
    }
    assert_eq!(h.deficit(), 3);
    assert_eq!(h.cache_lengths(), (0, 0));

    h.redo();
    assert_eq!(h.deficit(), 2);
    assert_eq!(h.cache_lengths(), (0, 0));
}

#[test]
fn deficit_is_worked_off_before_own_redo() {
    let mut h = Harness::new();
    h.click(CENTER);
    let applied = h.label_map();

    h.undo();
    h.undo();
    assert_eq!(h.deficit(), 1);
    assert_eq!(h.state.document.object_count(), 0);

    h.redo();
    assert_eq!(h.deficit(), 0);
    assert_eq!(h.cache_lengths(), (0, 1));
    assert_eq!(h.state.document.object_count(), 1);

    h.redo();
    assert_eq!(h.cache_lengths(), (1, 0));
    assert_eq!(h.label_map(), applied);
    assert_eq!(h.params().center_points.count(), 1);
}

#[test]
fn foreign_edit_after_undo_discards_own_redo() {
    let mut h = Harness::new();
    h.click(CENTER);
    h.click(GLOBAL);
    h.undo();
    assert_eq!(h.cache_lengths(), (1, 1));

    h.foreign_edit();
    h.redo();

    assert_eq!(h.cache_lengths(), (1, 0));
    assert_eq!(h.state.session.store.redo_levels(), 0);
    assert_eq!(h.deficit(), 0);
}

#[test]
fn new_apply_clears_deficit() {
    let mut h = Harness::new();
    h.foreign_edit();
    h.undo();
    assert_eq!(h.deficit(), 1);

    h.click(CENTER);

    assert_eq!(h.deficit(), 0);
    assert_eq!(h.state.document.redo_level_count(), 0);
}

#[test]
fn unobserved_document_undo_is_replayed_before_the_next_click() {
    let mut h = Harness::new();
    h.click(CENTER);
    h.click(GLOBAL);

    h.state.document.undo().expect("Dokument-Undo");
    h.click(GLOBAL);

    assert_eq!(h.calls().last(), Some(&OperationKind::GlobalRefinement));
    assert_eq!(h.cache_lengths(), (2, 0));
    assert_eq!(h.state.session.tracker.counter(), 2);
    assert_eq!(h.params().global_refinement_points.count(), 1);
}

#[test]
fn unobserved_undo_past_the_object_starts_new() {
    let mut h = Harness::new();
    h.click(CENTER);
    h.click(GLOBAL);

    h.state.document.undo().expect("Dokument-Undo");
    h.state.document.undo().expect("Dokument-Undo");
    assert_eq!(h.state.document.current_generation(), None);
    h.click(LOCAL);

    assert_eq!(h.calls().last(), Some(&OperationKind::New));
    assert_eq!(h.cache_lengths(), (1, 0));
    assert_eq!(h.state.session.store.undo_levels(), 1);
    assert_eq!(h.params().center_points.last(), Some(LOCAL));
}

#[test]
fn unobserved_document_redo_is_replayed_before_undo() {
    let mut h = Harness::new();
    h.click(CENTER);
    let post_new = h.label_map();
    h.click(GLOBAL);
    h.undo();

    h.state.document.redo().expect("Dokument-Redo");
    h.undo();

    assert_eq!(h.label_map(), post_new);
    assert_eq!(h.cache_lengths(), (1, 1));
    assert!(h.params().global_refinement_points.is_empty());
    assert_eq!(h.state.session.tracker.counter(), 1);
}

#[test]
fn deactivation_resets_the_session() {
    let mut h = Harness::new();
    h.click(CENTER);

    h.send(SessionIntent::ToolDeactivated);

    assert!(!h.state.is_active());
    assert!(!h.params().has_object());
    assert_eq!(h.cache_lengths(), (0, 0));
    assert_eq!(h.state.document.current_generation(), None);
}

#[test]
fn foreign_modification_resets_only_an_inactive_tool() {
    let mut h = Harness::new();
    h.click(CENTER);

    h.foreign_edit();
    assert_eq!(h.cache_lengths(), (1, 0));
    assert!(h.params().has_object());

    h.state.session.active = false;
    h.send(SessionIntent::DocumentModified);
    assert_eq!(h.cache_lengths(), (0, 0));
    assert!(!h.params().has_object());
}
