use click_seg_session::{
    LabelVolume, ObjectRef, OperationKind, Point3, RefinementMode, SegmentationEngine,
    SegmentationFlag, SessionController, SessionIntent, SessionOptions, SessionParameters,
    SessionState, SphereEngine, VolumeGeometry, VolumeRef,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const VOLUME: &str = "pet_series_1";
pub const CENTER: Point3 = Point3::new(41.3, 220.1, -980.2);
pub const GLOBAL: Point3 = Point3::new(40.1, 264.2, -969.2);
pub const LOCAL: Point3 = Point3::new(40.1, 258.1, -1025.1);

pub fn geometry() -> VolumeGeometry {
    VolumeGeometry::new(
        [48, 64, 64],
        Point3::new(0.0, 180.0, -1060.0),
        Point3::splat(2.0),
    )
}

/// Kugel-Engine, die jeden Aufruf protokolliert und auf Wunsch fehlschlägt.
pub struct RecordingEngine {
    inner: SphereEngine,
    calls: Rc<RefCell<Vec<OperationKind>>>,
    fail_next: Rc<Cell<bool>>,
}

impl RecordingEngine {
    fn record(&mut self, kind: OperationKind) -> anyhow::Result<()> {
        if self.fail_next.replace(false) {
            anyhow::bail!("Engine absichtlich fehlgeschlagen");
        }
        self.calls.borrow_mut().push(kind);
        Ok(())
    }
}

impl SegmentationEngine for RecordingEngine {
    fn name(&self) -> &str {
        "recording-sphere"
    }

    fn apply(
        &mut self,
        params: &SessionParameters,
        base: &LabelVolume,
    ) -> anyhow::Result<LabelVolume> {
        self.record(OperationKind::New)?;
        self.inner.apply(params, base)
    }

    fn apply_global_refinement(
        &mut self,
        params: &SessionParameters,
        base: &LabelVolume,
    ) -> anyhow::Result<LabelVolume> {
        self.record(OperationKind::GlobalRefinement)?;
        self.inner.apply_global_refinement(params, base)
    }

    fn apply_local_refinement(
        &mut self,
        params: &SessionParameters,
        base: &LabelVolume,
    ) -> anyhow::Result<LabelVolume> {
        self.record(OperationKind::LocalRefinement)?;
        self.inner.apply_local_refinement(params, base)
    }
}

/// Controller + State mit aktivem Werkzeug und einem angelegten Objekt.
pub struct Harness {
    pub controller: SessionController,
    pub state: SessionState,
    pub object: ObjectRef,
    calls: Rc<RefCell<Vec<OperationKind>>>,
    fail_next: Rc<Cell<bool>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    pub fn with_options(options: SessionOptions) -> Self {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let fail_next = Rc::new(Cell::new(false));
        let engine = RecordingEngine {
            inner: SphereEngine::new(),
            calls: Rc::clone(&calls),
            fail_next: Rc::clone(&fail_next),
        };
        let controller = SessionController::new(Box::new(engine));
        let state = SessionState::with_volume(VolumeRef::from(VOLUME), geometry(), options);

        let mut harness = Self {
            controller,
            state,
            object: ObjectRef::from("-"),
            calls,
            fail_next,
        };
        harness.send(SessionIntent::ToolActivated);
        harness.object = harness.add_object("Tumor");
        harness
    }

    pub fn send(&mut self, intent: SessionIntent) {
        self.try_send(intent)
            .expect("Intent sollte ohne Fehler durchlaufen");
    }

    pub fn try_send(&mut self, intent: SessionIntent) -> anyhow::Result<()> {
        self.controller.handle_intent(&mut self.state, intent)
    }

    pub fn add_object(&mut self, name: &str) -> ObjectRef {
        self.send(SessionIntent::AddObjectRequested {
            name: name.to_string(),
        });
        self.state
            .selected_object
            .clone()
            .expect("neues Objekt sollte gewählt sein")
    }

    pub fn select(&mut self, object: &ObjectRef) {
        self.send(SessionIntent::ObjectSelected {
            object: object.clone(),
        });
    }

    pub fn click(&mut self, point: Point3) {
        self.send(click_on(point, VOLUME));
    }

    pub fn set_mode(&mut self, mode: RefinementMode) {
        self.send(SessionIntent::RefinementModeSelected { mode });
    }

    pub fn set_flag(&mut self, flag: SegmentationFlag, enabled: bool) {
        self.send(SessionIntent::FlagToggled { flag, enabled });
    }

    pub fn undo(&mut self) {
        self.send(SessionIntent::UndoRequested);
    }

    pub fn redo(&mut self) {
        self.send(SessionIntent::RedoRequested);
    }

    /// Änderung durch ein anderes Werkzeug (mit eigenem Checkpoint).
    pub fn foreign_edit(&mut self) {
        self.state.document.save_checkpoint();
        self.state.document.paint_label([0, 0, 0], 99);
        self.send(SessionIntent::DocumentModified);
    }

    pub fn fail_next_engine_call(&self) {
        self.fail_next.set(true);
    }

    pub fn calls(&self) -> Vec<OperationKind> {
        self.calls.borrow().clone()
    }

    pub fn params(&self) -> SessionParameters {
        self.state
            .params()
            .cloned()
            .expect("Sitzungsparameter sollten existieren")
    }

    pub fn label_map(&self) -> LabelVolume {
        self.state.document.label_map().clone()
    }

    pub fn cache_lengths(&self) -> (usize, usize) {
        (
            self.state.session.cache.undo_len(),
            self.state.session.cache.redo_len(),
        )
    }

    pub fn deficit(&self) -> usize {
        self.state.session.sync.deficit()
    }
}

pub fn click_on(point: Point3, volume: &str) -> SessionIntent {
    SessionIntent::ViewClicked {
        world_pos: point,
        volume: VolumeRef::from(volume),
    }
}
