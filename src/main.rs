//! Klick-Segmentierungssitzung (Demo).
//!
//! Spielt eine Referenz-Sitzung gegen das In-Memory-Dokument und die
//! Kugel-Engine ab: neues Objekt, globale und lokale Verfeinerung, Undo und
//! erneutes Anwenden mit geänderten Flags.

use click_seg_session::{
    Point3, RefinementMode, SegmentationFlag, SessionController, SessionIntent, SessionOptions,
    SessionState, SphereEngine, VolumeGeometry, VolumeRef,
};

fn main() -> anyhow::Result<()> {
    DemoRunner::run()
}

struct DemoRunner;

impl DemoRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "Klick-Segmentierungssitzung v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let config_path = SessionOptions::config_path();
        let options = SessionOptions::load_from_file(&config_path);
        if !config_path.exists() {
            // Vorlage zum Anpassen neben der Binary ablegen
            if let Err(e) = options.save_to_file(&config_path) {
                log::warn!("Optionen-Vorlage nicht schreibbar: {:#}", e);
            }
        }
        let volume = VolumeRef::from("pet_series_1");
        let geometry = VolumeGeometry::new(
            [48, 64, 64],
            Point3::new(0.0, 180.0, -1060.0),
            Point3::splat(2.0),
        );

        let mut state = SessionState::with_volume(volume.clone(), geometry, options);
        let mut controller = SessionController::new(Box::new(SphereEngine::new()));
        log::info!("Engine: {}", controller.engine_name());

        let click = |x: f32, y: f32, z: f32| SessionIntent::ViewClicked {
            world_pos: Point3::new(x, y, z),
            volume: volume.clone(),
        };

        let intents = vec![
            SessionIntent::ToolActivated,
            SessionIntent::AddObjectRequested {
                name: "Tumor".to_string(),
            },
            click(41.3, 220.1, -980.2),
            click(40.1, 264.2, -969.2),
            SessionIntent::RefinementModeSelected {
                mode: RefinementMode::LocalRefinement,
            },
            click(40.1, 258.1, -1025.1),
            SessionIntent::UndoRequested,
            SessionIntent::FlagToggled {
                flag: SegmentationFlag::Splitting,
                enabled: true,
            },
            SessionIntent::ApplyParametersClicked,
        ];

        for intent in intents {
            if let Err(e) = controller.handle_intent(&mut state, intent) {
                log::error!("Event handling failed: {:#}", e);
            }
        }

        Self::report(&state);
        Ok(())
    }

    fn report(state: &SessionState) {
        let doc = &state.document;
        for object in doc.objects() {
            log::info!(
                "Objekt '{}' ({}): {} Voxel, Generation {:?}",
                object.name,
                object.id,
                doc.label_map().count_label(object.label),
                doc.generation_of(&object.id)
            );
        }
        if let Some(params) = state.params() {
            log::info!("Parameter: {}", params.debug_summary());
        }
        log::info!(
            "Historie: Dokument {}/{}, Cache {}/{}, {} Commands",
            doc.undo_level_count(),
            doc.redo_level_count(),
            state.session.cache.undo_len(),
            state.session.cache.redo_len(),
            state.command_log.len()
        );
    }
}
