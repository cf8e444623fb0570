//! Use-Case: Undo/Redo über die gemeinsame Dokument-Historie.

use crate::app::session::SyncOutcome;
use crate::app::SessionState;

/// Führt einen Undo-Schritt aus.
///
/// # Panics
/// Wenn gerade eine Anwendung läuft.
pub fn undo(state: &mut SessionState) -> anyhow::Result<SyncOutcome> {
    step(state, Direction::Undo)
}

/// Führt einen Redo-Schritt aus.
///
/// # Panics
/// Wenn gerade eine Anwendung läuft.
pub fn redo(state: &mut SessionState) -> anyhow::Result<SyncOutcome> {
    step(state, Direction::Redo)
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Undo,
    Redo,
}

fn step(state: &mut SessionState, direction: Direction) -> anyhow::Result<SyncOutcome> {
    let SessionState {
        document: doc,
        session,
        settings,
        ..
    } = state;

    session.begin_operation(match direction {
        Direction::Undo => "Undo",
        Direction::Redo => "Redo",
    });
    session
        .tracker
        .reconcile(doc, &mut session.store, &mut session.cache);
    let tracked = session.tracker.is_enabled();
    let (store, cache, tracker) = (
        &mut session.store,
        &mut session.cache,
        &mut session.tracker,
    );
    let result = match (direction, tracked) {
        (Direction::Undo, true) => session.sync.undo_tracked(doc, store, cache, tracker),
        (Direction::Redo, true) => session.sync.redo_tracked(doc, store, cache, tracker),
        (Direction::Undo, false) => session.sync.undo(doc, store, cache),
        (Direction::Redo, false) => session.sync.redo(doc, store, cache),
    };
    session.end_operation();
    let outcome = result?;

    if let Some(params) = session.store.peek() {
        *settings = params.settings();
    }

    match outcome {
        SyncOutcome::Own => log::info!("{:?} ausgeführt (eigene Historie)", direction),
        SyncOutcome::Foreign => log::info!(
            "{:?} ausgeführt (fremder Schritt, Defizit {})",
            direction,
            session.sync.deficit()
        ),
        SyncOutcome::Nothing => log::debug!("{:?}: nichts zu tun", direction),
    }
    Ok(outcome)
}
