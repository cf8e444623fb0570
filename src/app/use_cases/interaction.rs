//! Use-Case: Klick-Auswertung und erneutes Anwenden der Parameter.
//!
//! Ein Klick startet entweder ein neues Objekt oder verfeinert das bestehende.
//! Die Engine arbeitet immer auf einem Basis-Snapshot; übernommen wird das
//! Ergebnis nur, wenn die Engine erfolgreich war.

use crate::app::session::SessionContext;
use crate::app::SessionState;
use crate::core::{
    DocumentCheckpoint, ObjectRef, OperationKind, Point3, RefinementMode, SegmentationDocument,
    SegmentationSettings, SessionParameters, SnapshotRef, VolumeRef,
};
use crate::engine::{run_operation, SegmentationEngine};
use anyhow::{anyhow, Context};
use std::sync::Arc;
use std::time::Duration;

/// Bestimmt die Art der Operation für einen Klick.
///
/// Neues Objekt, wenn noch kein Zentrumspunkt existiert, ein anderes Objekt
/// gewählt ist oder der Modus keine Verfeinerung vorsieht.
pub fn classify_click(
    params: &SessionParameters,
    object: &ObjectRef,
    mode: RefinementMode,
) -> OperationKind {
    let other_object = params.target_object.as_ref() != Some(object);
    if !params.has_object() || other_object {
        return OperationKind::New;
    }
    match mode {
        RefinementMode::NoRefinement => OperationKind::New,
        RefinementMode::GlobalRefinement => OperationKind::GlobalRefinement,
        RefinementMode::LocalRefinement => OperationKind::LocalRefinement,
    }
}

/// Wertet einen Klick auf `world_pos` für `object` aus.
///
/// Gibt die ausgeführte Operationsart zurück. Bei einem Engine-Fehler bleibt
/// der gesamte Zustand unverändert.
///
/// # Panics
/// Wenn bereits eine Anwendung läuft.
pub fn click(
    state: &mut SessionState,
    engine: &mut dyn SegmentationEngine,
    world_pos: Point3,
    volume: &VolumeRef,
    object: &ObjectRef,
) -> anyhow::Result<OperationKind> {
    let SessionState {
        document,
        session,
        settings,
        ..
    } = state;

    session.begin_operation("Klick");
    let result = click_in_session(document, session, settings, engine, world_pos, volume, object);
    session.end_operation();
    result
}

fn click_in_session(
    doc: &mut SegmentationDocument,
    session: &mut SessionContext,
    settings: &SegmentationSettings,
    engine: &mut dyn SegmentationEngine,
    world_pos: Point3,
    volume: &VolumeRef,
    object: &ObjectRef,
) -> anyhow::Result<OperationKind> {
    session
        .sync
        .observe_document(doc, &mut session.store, &mut session.cache);
    session
        .tracker
        .reconcile(doc, &mut session.store, &mut session.cache);

    let label = doc
        .object(object)
        .map(|o| o.label)
        .ok_or_else(|| anyhow!("Objekt '{}' existiert nicht im Dokument", object))?;

    let volume_changed = session
        .store
        .peek()
        .and_then(|params| params.target_volume.as_ref())
        .is_some_and(|recorded| recorded != volume);
    if volume_changed {
        log::info!("Quellvolumen gewechselt zu '{}', Sitzung zurückgesetzt", volume);
        session.reset(doc);
    }

    let mut next = session.store.get().clone();
    let kind = classify_click(&next, object, settings.mode);
    next.apply_settings(settings);
    next.target_volume = Some(volume.clone());
    next.target_object = Some(object.clone());
    next.label = label;
    match kind {
        OperationKind::New => {
            next.clear_points();
            next.center_points.append(world_pos);
        }
        OperationKind::GlobalRefinement => next.global_refinement_points.append(world_pos),
        OperationKind::LocalRefinement => next.local_refinement_points.append(world_pos),
    }
    next.last_operation = Some(kind);

    let checkpoint = doc.capture_checkpoint();
    let base = match kind {
        OperationKind::New => Arc::clone(&checkpoint.image),
        OperationKind::GlobalRefinement | OperationKind::LocalRefinement => {
            match session.cache.top_undo() {
                Some(top) => Arc::clone(top),
                None => {
                    log::warn!("Verfeinerung ohne Basis-Snapshot, verwende aktuellen Zustand");
                    Arc::clone(&checkpoint.image)
                }
            }
        }
    };

    let result = run_engine(engine, kind, &next, &base, doc.snapshot_timeout())?;
    commit(doc, session, checkpoint, base, next, result, object)?;

    log::info!(
        "{:?} auf '{}' bei ({:.1}, {:.1}, {:.1}) angewendet",
        kind,
        object,
        world_pos.x,
        world_pos.y,
        world_pos.z
    );
    Ok(kind)
}

/// Wiederholt die letzte Operation mit den aktuellen Panel-Werten.
///
/// Gibt `Ok(None)` zurück, wenn für die aktuelle Auswahl kein Objekt
/// existiert; dann wird nichts verändert.
///
/// # Panics
/// Wenn bereits eine Anwendung läuft.
pub fn apply_parameters(
    state: &mut SessionState,
    engine: &mut dyn SegmentationEngine,
) -> anyhow::Result<Option<OperationKind>> {
    let SessionState {
        document,
        session,
        settings,
        selected_object,
        ..
    } = state;

    session.begin_operation("Parameter anwenden");
    let result = reapply_in_session(
        document,
        session,
        settings,
        selected_object.as_ref(),
        engine,
    );
    session.end_operation();
    result
}

fn reapply_in_session(
    doc: &mut SegmentationDocument,
    session: &mut SessionContext,
    settings: &SegmentationSettings,
    selected_object: Option<&ObjectRef>,
    engine: &mut dyn SegmentationEngine,
) -> anyhow::Result<Option<OperationKind>> {
    session
        .sync
        .observe_document(doc, &mut session.store, &mut session.cache);
    session
        .tracker
        .reconcile(doc, &mut session.store, &mut session.cache);

    let Some(params) = session.store.peek() else {
        log::debug!("Parameter anwenden: noch keine Sitzungsparameter");
        return Ok(None);
    };
    let (Some(kind), Some(object)) = (params.last_operation, params.target_object.clone()) else {
        log::debug!("Parameter anwenden: noch keine Operation ausgeführt");
        return Ok(None);
    };
    if !params.has_object() || selected_object != Some(&object) {
        log::debug!("Parameter anwenden: kein Objekt für die aktuelle Auswahl");
        return Ok(None);
    }
    let Some(base) = session.cache.top_undo().cloned() else {
        log::debug!("Parameter anwenden: kein Basis-Snapshot vorhanden");
        return Ok(None);
    };

    let mut next = params.clone();
    next.apply_settings(settings);

    let checkpoint = doc.capture_checkpoint();
    let result = run_engine(engine, kind, &next, &base, doc.snapshot_timeout())?;
    commit(doc, session, checkpoint, base, next, result, &object)?;

    log::info!("{:?} auf '{}' mit geänderten Parametern wiederholt", kind, object);
    Ok(Some(kind))
}

/// Entpackt die Basis, lässt die Engine laufen und komprimiert die Basis wieder.
fn run_engine(
    engine: &mut dyn SegmentationEngine,
    kind: OperationKind,
    params: &SessionParameters,
    base: &SnapshotRef,
    timeout: Duration,
) -> anyhow::Result<crate::core::LabelVolume> {
    let image = base
        .acquire_for_read(timeout)
        .context("Basis-Snapshot nicht lesbar")?;
    let result = run_operation(engine, kind, params, &image);
    base.release();
    result.with_context(|| format!("Engine '{}' fehlgeschlagen ({:?})", engine.name(), kind))
}

/// Übernimmt ein Engine-Ergebnis in Dokument und Sitzung.
fn commit(
    doc: &mut SegmentationDocument,
    session: &mut SessionContext,
    checkpoint: DocumentCheckpoint,
    base: SnapshotRef,
    next: SessionParameters,
    result: crate::core::LabelVolume,
    object: &ObjectRef,
) -> anyhow::Result<()> {
    doc.commit_label_map(result)?;
    doc.record_checkpoint(checkpoint);

    session.store.save_checkpoint();
    session.store.replace(next);
    session.cache.push_undo(base);
    session.cache.clear_redo();
    session.sync.commit_apply(doc);
    session.tracker.stamp(doc, object);
    Ok(())
}
