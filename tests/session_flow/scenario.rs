use super::fixtures::{click_on, Harness, CENTER, GLOBAL, LOCAL, VOLUME};
use approx::assert_relative_eq;
use click_seg_session::{
    OperationKind, Point3, RefinementMode, SegmentationFlag, SessionCommand, SessionIntent,
    SessionParameters,
};

#[test]
fn reference_scenario_new_global_local_undo_and_reapply() {
    let mut h = Harness::new();

    // Neues Objekt
    h.click(CENTER);
    let params = h.params();
    assert_eq!(h.calls(), vec![OperationKind::New]);
    assert_eq!(params.center_points.count(), 1);
    let center = params.center().expect("Zentrumspunkt");
    assert_relative_eq!(center.x, CENTER.x);
    assert_relative_eq!(center.y, CENTER.y);
    assert_relative_eq!(center.z, CENTER.z);
    assert!(h.state.document.label_map().count_label(1) > 0);

    // Globale Verfeinerung
    h.click(GLOBAL);
    let post_global_params = h.params();
    let post_global_map = h.label_map();
    assert_eq!(h.calls().last(), Some(&OperationKind::GlobalRefinement));
    assert_eq!(post_global_params.global_refinement_points.count(), 1);
    assert_eq!(post_global_params.center_points.count(), 1);

    // Lokale Verfeinerung
    h.set_mode(RefinementMode::LocalRefinement);
    h.click(LOCAL);
    assert_eq!(h.calls().last(), Some(&OperationKind::LocalRefinement));
    assert_eq!(h.params().local_refinement_points.count(), 1);
    assert_ne!(h.label_map(), post_global_map);

    // Undo -> Zustand nach globaler Verfeinerung
    h.undo();
    assert_eq!(h.label_map(), post_global_map);
    assert_eq!(h.params(), post_global_params);
    assert_eq!(h.state.settings.mode, RefinementMode::GlobalRefinement);

    // Splitting + Parameter anwenden -> gleiche Operationsart, anderes Ergebnis
    h.set_flag(SegmentationFlag::Splitting, true);
    h.send(SessionIntent::ApplyParametersClicked);
    assert_eq!(h.calls().len(), 4);
    assert_eq!(h.calls().last(), Some(&OperationKind::GlobalRefinement));
    assert!(h.params().flags.splitting);
    assert_ne!(h.label_map(), post_global_map);
    assert!(h.label_map().count_label(1) < post_global_map.count_label(1));
}

#[test]
fn local_clicks_accumulate_and_global_keeps_one_point() {
    let mut h = Harness::new();
    h.set_mode(RefinementMode::LocalRefinement);

    h.click(CENTER);
    for offset in 1..=3 {
        h.click(CENTER + Point3::new(0.0, 4.0 * offset as f32, 0.0));
    }
    assert_eq!(h.params().local_refinement_points.count(), 3);
    assert_eq!(h.params().center_points.count(), 1);

    h.set_mode(RefinementMode::GlobalRefinement);
    for offset in 1..=3 {
        h.click(CENTER + Point3::new(0.0, 0.0, 6.0 * offset as f32));
    }
    let params = h.params();
    assert_eq!(params.global_refinement_points.count(), 1);
    assert_eq!(params.local_refinement_points.count(), 3);
    assert_eq!(
        h.calls(),
        vec![
            OperationKind::New,
            OperationKind::LocalRefinement,
            OperationKind::LocalRefinement,
            OperationKind::LocalRefinement,
            OperationKind::GlobalRefinement,
            OperationKind::GlobalRefinement,
            OperationKind::GlobalRefinement,
        ]
    );
}

#[test]
fn no_refinement_mode_starts_a_new_object_on_every_click() {
    let mut h = Harness::new();
    h.set_mode(RefinementMode::NoRefinement);

    h.click(CENTER);
    h.click(GLOBAL);
    h.click(LOCAL);

    assert_eq!(h.calls(), vec![OperationKind::New; 3]);
    let params = h.params();
    assert_eq!(params.center_points.count(), 1);
    assert_eq!(params.center_points.last(), Some(LOCAL));
    assert!(params.global_refinement_points.is_empty());
    assert_eq!(h.cache_lengths(), (3, 0));
}

#[test]
fn mode_is_exclusive_and_follows_the_panel() {
    let mut h = Harness::new();
    h.click(CENTER);
    for mode in [
        RefinementMode::NoRefinement,
        RefinementMode::LocalRefinement,
        RefinementMode::GlobalRefinement,
    ] {
        h.set_mode(mode);
        h.click(GLOBAL);
        assert_eq!(h.params().mode, mode);
    }
}

#[test]
fn volume_switch_resets_the_session() {
    let mut h = Harness::new();
    h.click(CENTER);
    h.click(GLOBAL);
    assert_eq!(h.cache_lengths(), (2, 0));

    h.send(click_on(GLOBAL, "pet_series_2"));

    assert_eq!(h.calls().last(), Some(&OperationKind::New));
    assert_eq!(h.cache_lengths(), (1, 0));
    let params = h.params();
    assert_eq!(params.target_volume.map(|v| v.0), Some("pet_series_2".to_string()));
    assert!(params.global_refinement_points.is_empty());
}

#[test]
fn engine_failure_commits_nothing() {
    let mut h = Harness::new();
    h.click(CENTER);
    let params_before = h.params();
    let map_before = h.label_map();
    let doc_levels = h.state.document.undo_level_count();
    let generation = h.state.document.current_generation();

    h.fail_next_engine_call();
    let result = h.try_send(click_on(GLOBAL, VOLUME));

    assert!(result.is_err());
    assert_eq!(h.params(), params_before);
    assert_eq!(h.label_map(), map_before);
    assert_eq!(h.state.document.undo_level_count(), doc_levels);
    assert_eq!(h.state.document.current_generation(), generation);
    assert_eq!(h.cache_lengths(), (1, 0));
    assert_eq!(h.state.session.store.undo_levels(), 1);
    assert!(!h.state.session.is_in_flight());

    // Danach funktioniert der nächste Klick normal
    h.click(GLOBAL);
    assert_eq!(h.cache_lengths(), (2, 0));
}

#[test]
fn apply_parameters_without_object_is_a_true_noop() {
    let mut h = Harness::new();
    let doc_levels = h.state.document.undo_level_count();

    h.send(SessionIntent::ApplyParametersClicked);

    assert!(h.calls().is_empty());
    assert!(h.state.params().is_none() || !h.params().has_object());
    assert_eq!(h.state.document.undo_level_count(), doc_levels);
    assert_eq!(h.cache_lengths(), (0, 0));
}

#[test]
fn apply_parameters_for_other_selection_is_a_noop() {
    let mut h = Harness::new();
    h.click(CENTER);
    let first = h.object.clone();
    let second = h.add_object("Lymphknoten");
    assert_ne!(first, second);
    let params_before = h.params();
    let doc_levels = h.state.document.undo_level_count();

    h.send(SessionIntent::ApplyParametersClicked);

    assert_eq!(h.calls(), vec![OperationKind::New]);
    assert_eq!(h.params(), params_before);
    assert_eq!(h.state.document.undo_level_count(), doc_levels);
}

#[test]
fn apply_parameters_repeats_a_new_object_operation() {
    let mut h = Harness::new();
    h.click(CENTER);
    let plain = h.label_map();

    h.set_flag(SegmentationFlag::Sealing, true);
    h.send(SessionIntent::ApplyParametersClicked);

    assert_eq!(h.calls(), vec![OperationKind::New, OperationKind::New]);
    assert!(h.label_map().count_label(1) > plain.count_label(1));
    assert_eq!(h.cache_lengths(), (2, 0));
}

#[test]
fn reset_is_idempotent() {
    let mut h = Harness::new();
    h.click(CENTER);
    h.click(GLOBAL);

    h.send(SessionIntent::ResetRequested);
    let once = h.params();
    h.send(SessionIntent::ResetRequested);

    assert_eq!(h.params(), once);
    assert_eq!(once, SessionParameters::new());
    assert_eq!(h.cache_lengths(), (0, 0));
    assert_eq!(h.state.session.store.undo_levels(), 0);
    assert_eq!(h.state.document.current_generation(), None);
}

#[test]
fn clicks_are_ignored_while_the_tool_is_inactive() {
    let mut h = Harness::new();
    h.send(SessionIntent::ToolDeactivated);

    h.click(CENTER);

    assert!(h.calls().is_empty());
    assert!(!h
        .state
        .command_log
        .entries()
        .iter()
        .any(|c| matches!(c, SessionCommand::ApplyClick { .. })));
}

#[test]
fn parameters_survive_a_json_roundtrip() {
    let mut h = Harness::new();
    h.click(CENTER);
    h.click(GLOBAL);

    let json = h.params().to_json().expect("serialisierbar");
    let restored = SessionParameters::from_json(&json).expect("lesbar");

    assert_eq!(restored, h.params());
}
