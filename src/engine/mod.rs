//! The viewer session: one value owning every piece of interactive state.
//!
//! [`ViewerEngine`] holds the rotation, the pointer state machine, the
//! render scheduler, the atom selection, the displayed view, and the
//! presentation models. It never performs I/O: work for the molecule
//! service is queued as [`Job`]s and drained with
//! [`ViewerEngine::take_jobs`], and results come back through
//! [`ViewerEngine::complete`].

pub mod command;
pub mod scheduler;

pub use command::ViewerCommand;
pub use scheduler::{RenderScheduler, RenderTicket, ScheduleOutcome};
use glam::Vec2;
use web_time::Instant;

use crate::camera::RotationState;
use crate::gui::{StatsPanel, ViewBindings};
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::scene::{PickTarget, RenderedGraph};
use crate::selection::SelectionController;
use crate::service::{Job, JobResult, MoleculeStats, ServiceError};

/// Failure text shown when a render is abandoned.
pub const TIMEOUT_MESSAGE: &str = "render timed out";

/// What the view surface is showing.
#[derive(Debug, Clone, Default)]
pub enum ViewContent {
    /// No molecule chosen.
    #[default]
    Placeholder,
    /// The most recent accepted render.
    Graph(RenderedGraph),
    /// The most recent accepted render failed.
    Failed(String),
}

impl ViewContent {
    /// The displayed graph, if any.
    #[must_use]
    pub fn graph(&self) -> Option<&RenderedGraph> {
        match self {
            Self::Graph(graph) => Some(graph),
            _ => None,
        }
    }
}

/// Session context for one viewer.
pub struct ViewerEngine {
    options: Options,
    molecule: Option<String>,
    rotation: RotationState,
    input: InputProcessor,
    scheduler: RenderScheduler,
    selection: SelectionController,
    content: ViewContent,
    bindings: ViewBindings,
    stats: StatsPanel,
    jobs: Vec<Job>,
}

impl ViewerEngine {
    /// Create an engine showing the placeholder.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let input = InputProcessor::with_key_bindings(
            &options.input,
            options.keybindings.clone(),
        );
        let scheduler = RenderScheduler::new(options.service.render_timeout());
        let bindings = ViewBindings::unbound(options.tooltip.offset());
        Self {
            options,
            molecule: None,
            rotation: RotationState::new(),
            input,
            scheduler,
            selection: SelectionController::new(),
            content: ViewContent::Placeholder,
            bindings,
            stats: StatsPanel::default(),
            jobs: Vec::new(),
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Currently selected molecule.
    #[must_use]
    pub fn molecule(&self) -> Option<&str> {
        self.molecule.as_deref()
    }

    /// Live rotation.
    #[must_use]
    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    /// Render scheduling state.
    #[must_use]
    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// Atom selection and highlights.
    #[must_use]
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// What the view shows.
    #[must_use]
    pub fn content(&self) -> &ViewContent {
        &self.content
    }

    /// Hover bindings for the displayed graph.
    #[must_use]
    pub fn bindings(&self) -> &ViewBindings {
        &self.bindings
    }

    /// Statistics panel.
    #[must_use]
    pub fn stats(&self) -> &StatsPanel {
        &self.stats
    }

    /// Whether the "dragging" visual state is on.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    /// Whether no work is queued or outstanding.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.jobs.is_empty() && !self.scheduler.in_flight() && !self.stats.is_loading()
    }

    /// Drain the queued service jobs.
    pub fn take_jobs(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.jobs)
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Feed a pointer event. `hovered` is the element under the cursor.
    pub fn handle_event(&mut self, event: InputEvent, hovered: PickTarget) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.bindings.hover(hovered, Vec2::new(x, y));
            }
            InputEvent::CursorLeft => self.bindings.hide(),
            InputEvent::MouseButton { .. } => {}
        }
        let molecule_selected = self.molecule.is_some();
        if let Some(cmd) =
            self.input.handle_event(event, hovered, molecule_selected)
        {
            self.execute(cmd);
        }
    }

    /// Feed a key press (DOM `code` string, e.g. `"KeyR"`).
    pub fn handle_key_press(&mut self, key: &str) {
        if let Some(cmd) = self.input.handle_key_press(key) {
            self.execute(cmd);
        }
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Perform one command.
    pub fn execute(&mut self, cmd: ViewerCommand) {
        match cmd {
            ViewerCommand::SelectMolecule(name) => self.select_molecule(name),
            ViewerCommand::ClearMolecule => {
                log::info!("molecule cleared");
                self.molecule = None;
                self.rotation.reset();
                self.selection.clear();
                self.stats.clear();
                self.schedule();
            }
            ViewerCommand::ResetView => {
                self.rotation.reset();
                self.selection.clear();
                self.schedule();
            }
            ViewerCommand::Rotate { dx, dy } => {
                self.rotation.apply_delta(dx, dy);
                self.schedule();
            }
            ViewerCommand::ClickAtom(index) => {
                if let ViewContent::Graph(graph) = &self.content {
                    self.selection.click_atom(index, graph);
                }
            }
            ViewerCommand::ClearSelection => self.selection.click_background(),
        }
    }

    fn select_molecule(&mut self, name: String) {
        if self.molecule.as_deref() == Some(name.as_str()) {
            self.schedule();
            return;
        }
        log::info!("molecule selected: {name}");
        self.rotation.reset();
        // Atom indices of the previous graph mean nothing for the new molecule
        self.show_placeholder();
        if self.options.service.fetch_analytics {
            self.stats.loading(&name);
            self.jobs.push(Job::Analytics {
                molecule: name.clone(),
            });
        } else {
            self.stats.clear();
        }
        self.molecule = Some(name);
        self.schedule();
    }

    /// Ask for the live rotation to be rendered.
    fn schedule(&mut self) {
        let outcome = self.scheduler.schedule(
            self.molecule.as_deref(),
            &self.rotation,
            Instant::now(),
        );
        match outcome {
            ScheduleOutcome::Placeholder => self.show_placeholder(),
            ScheduleOutcome::Queued => {}
            ScheduleOutcome::Dispatch(ticket) => self.jobs.push(Job::Render(ticket)),
        }
    }

    // ── Completions ─────────────────────────────────────────────────

    /// Deliver the result of a job, in whatever order results arrive.
    pub fn complete(&mut self, result: JobResult) {
        match result {
            JobResult::Render {
                generation,
                molecule,
                result,
            } => self.complete_render(generation, &molecule, result),
            JobResult::Analytics { molecule, result } => {
                self.complete_analytics(&molecule, result);
            }
        }
    }

    fn complete_render(
        &mut self,
        generation: u64,
        molecule: &str,
        result: Result<RenderedGraph, ServiceError>,
    ) {
        let verdict = self.scheduler.complete(generation, self.molecule.as_deref());
        if verdict.apply {
            match result {
                Ok(graph) => self.show_graph(graph),
                Err(e) => self.show_failure(e.to_string()),
            }
        } else {
            log::debug!("dropping render #{generation} for {molecule}");
        }

        // Drain step: the follow-up reads the rotation that is live now
        if verdict.follow_up {
            self.schedule();
        }
    }

    fn complete_analytics(
        &mut self,
        molecule: &str,
        result: Result<MoleculeStats, ServiceError>,
    ) {
        if self.molecule.as_deref() != Some(molecule) {
            log::debug!("dropping analytics for {molecule}");
            return;
        }
        match result {
            Ok(stats) => self.stats.loaded(molecule, stats),
            Err(e) => {
                log::warn!("analytics for {molecule} failed: {e}");
                self.stats.failed(molecule);
            }
        }
    }

    /// Abandon a render that has outlived the configured timeout.
    pub fn expire(&mut self, now: Instant) {
        if let Some(follow_up) = self.scheduler.expire(now) {
            self.show_failure(TIMEOUT_MESSAGE.to_owned());
            if follow_up {
                self.schedule();
            }
        }
    }

    fn show_graph(&mut self, graph: RenderedGraph) {
        log::info!(
            "render applied: {} atoms, {} bonds",
            graph.atoms().len(),
            graph.bonds().len()
        );
        self.bindings = ViewBindings::bind(&graph, self.options.tooltip.offset());
        self.selection.reapply(&graph);
        self.content = ViewContent::Graph(graph);
    }

    fn show_placeholder(&mut self) {
        self.selection.clear();
        self.bindings = ViewBindings::unbound(self.options.tooltip.offset());
        self.content = ViewContent::Placeholder;
    }

    fn show_failure(&mut self, message: String) {
        log::warn!("render failed: {message}");
        self.selection.clear();
        self.bindings = ViewBindings::unbound(self.options.tooltip.offset());
        self.content = ViewContent::Failed(message);
    }
}

impl Default for ViewerEngine {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::input::MouseButton;
    use crate::scene::graph::tests::{atom, bond, chain};
    use crate::selection::{HighlightClass, SelectionState, DEFAULT_GUIDANCE};

    fn render_jobs(engine: &mut ViewerEngine) -> Vec<RenderTicket> {
        engine
            .take_jobs()
            .into_iter()
            .filter_map(|job| match job {
                Job::Render(ticket) => Some(ticket),
                Job::Analytics { .. } => None,
            })
            .collect()
    }

    fn succeed(ticket: &RenderTicket, graph: RenderedGraph) -> JobResult {
        JobResult::Render {
            generation: ticket.generation,
            molecule: ticket.request.name.clone(),
            result: Ok(graph),
        }
    }

    fn fail(ticket: &RenderTicket) -> JobResult {
        JobResult::Render {
            generation: ticket.generation,
            molecule: ticket.request.name.clone(),
            result: Err(ServiceError::Rejected("no such molecule".to_owned())),
        }
    }

    /// Engine with `Water` shown as the three-atom chain.
    fn showing_chain() -> ViewerEngine {
        let mut engine = ViewerEngine::default();
        engine.execute(ViewerCommand::SelectMolecule("Water".to_owned()));
        let tickets = render_jobs(&mut engine);
        engine.complete(succeed(&tickets[0], chain()));
        engine
    }

    #[test]
    fn no_molecule_shows_placeholder_without_request() {
        let mut engine = ViewerEngine::default();
        engine.execute(ViewerCommand::Rotate { dx: 5.0, dy: 0.0 });
        assert!(engine.take_jobs().is_empty());
        assert!(matches!(engine.content(), ViewContent::Placeholder));
    }

    #[test]
    fn selecting_molecule_queues_render_and_analytics() {
        let mut engine = ViewerEngine::default();
        engine.execute(ViewerCommand::SelectMolecule("Water".to_owned()));
        let jobs = engine.take_jobs();
        assert_eq!(jobs.len(), 2);
        assert!(matches!(&jobs[0], Job::Analytics { molecule } if molecule == "Water"));
        assert!(matches!(&jobs[1], Job::Render(t) if t.request.name == "Water"));
        assert!(engine.stats().is_loading());
    }

    #[test]
    fn drag_during_flight_renders_final_rotation_once() {
        let mut engine = showing_chain();
        let drag_events = [
            InputEvent::CursorMoved { x: 0.0, y: 0.0 },
            InputEvent::MouseButton { button: MouseButton::Left, pressed: true },
            InputEvent::CursorMoved { x: 10.0, y: 0.0 },
        ];
        for event in drag_events {
            engine.handle_event(event, PickTarget::None);
        }
        let first = render_jobs(&mut engine);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].request.phi_y, 10);

        for x in [15.0, 20.0, 31.0] {
            engine.handle_event(InputEvent::CursorMoved { x, y: 0.0 }, PickTarget::None);
        }
        assert!(render_jobs(&mut engine).is_empty());

        engine.complete(succeed(&first[0], chain()));
        let follow = render_jobs(&mut engine);
        assert_eq!(follow.len(), 1);
        assert_eq!(follow[0].request.phi_y, 31);

        engine.complete(succeed(&follow[0], chain()));
        assert!(render_jobs(&mut engine).is_empty());
        assert!(!engine.scheduler().in_flight());
    }

    #[test]
    fn selection_survives_rerender_that_keeps_the_atom() {
        let mut engine = showing_chain();
        engine.execute(ViewerCommand::ClickAtom(2));
        engine.execute(ViewerCommand::Rotate { dx: 1.0, dy: 0.0 });
        let tickets = render_jobs(&mut engine);

        let next = RenderedGraph::new(
            String::new(),
            vec![atom(0, "C"), atom(1, "C"), atom(2, "O")],
            vec![bond(0, 2, 1)],
        );
        engine.complete(succeed(&tickets[0], next));
        assert_eq!(engine.selection().selected(), Some(2));
        assert_eq!(
            engine.selection().highlights().atom_class(0),
            Some(HighlightClass::Neighbor)
        );
    }

    #[test]
    fn selection_drops_when_atom_disappears() {
        let mut engine = showing_chain();
        engine.execute(ViewerCommand::ClickAtom(2));
        engine.execute(ViewerCommand::Rotate { dx: 1.0, dy: 0.0 });
        let tickets = render_jobs(&mut engine);

        let next = RenderedGraph::new(
            String::new(),
            vec![atom(0, "C"), atom(1, "C")],
            vec![bond(0, 1, 1)],
        );
        engine.complete(succeed(&tickets[0], next));
        assert_eq!(engine.selection().state(), SelectionState::Unselected);
        assert_eq!(engine.selection().status(), DEFAULT_GUIDANCE);
    }

    #[test]
    fn render_failure_clears_selection_and_highlights() {
        let mut engine = showing_chain();
        engine.execute(ViewerCommand::ClickAtom(1));
        assert!(!engine.selection().highlights().is_clear());

        engine.execute(ViewerCommand::Rotate { dx: 0.0, dy: 2.0 });
        let tickets = render_jobs(&mut engine);
        engine.complete(fail(&tickets[0]));

        assert_eq!(engine.selection().state(), SelectionState::Unselected);
        assert!(engine.selection().highlights().is_clear());
        assert!(matches!(engine.content(), ViewContent::Failed(msg) if msg == "no such molecule"));
    }

    #[test]
    fn short_press_on_atom_toggles_selection() {
        let mut engine = showing_chain();
        let atom = PickTarget::Atom(1);
        let click = [
            InputEvent::CursorMoved { x: 40.0, y: 40.0 },
            InputEvent::MouseButton { button: MouseButton::Left, pressed: true },
            InputEvent::CursorMoved { x: 42.0, y: 43.0 },
            InputEvent::MouseButton { button: MouseButton::Left, pressed: false },
        ];
        for event in click {
            engine.handle_event(event, atom);
        }
        assert!(!engine.input.drag().session().moved);
        assert_eq!(engine.selection().selected(), Some(1));
        assert_eq!(engine.selection().neighbors(), &[0, 2]);
        assert!(engine.take_jobs().is_empty());

        for event in click {
            engine.handle_event(event, atom);
        }
        assert_eq!(engine.selection().selected(), None);
    }

    #[test]
    fn drag_ending_on_atom_does_not_select() {
        let mut engine = showing_chain();
        let atom = PickTarget::Atom(1);
        for event in [
            InputEvent::CursorMoved { x: 40.0, y: 40.0 },
            InputEvent::MouseButton { button: MouseButton::Left, pressed: true },
            InputEvent::CursorMoved { x: 60.0, y: 40.0 },
            InputEvent::MouseButton { button: MouseButton::Left, pressed: false },
        ] {
            engine.handle_event(event, atom);
        }
        assert_eq!(engine.selection().selected(), None);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn selection_does_not_carry_over_to_next_molecule() {
        let mut engine = showing_chain();
        engine.handle_event(InputEvent::CursorMoved { x: 3.0, y: 3.0 }, PickTarget::Atom(1));
        engine.execute(ViewerCommand::SelectMolecule("Caffeine".to_owned()));
        assert!(matches!(engine.content(), ViewContent::Placeholder));
        assert!(!engine.bindings().is_bound());
        assert!(engine.bindings().tooltip().is_none());

        engine.execute(ViewerCommand::ClickAtom(1));
        assert_eq!(engine.selection().state(), SelectionState::Unselected);

        let caffeine = render_jobs(&mut engine);
        engine.complete(succeed(&caffeine[0], chain()));
        assert!(engine.content().graph().is_some());
        assert_eq!(engine.selection().state(), SelectionState::Unselected);
        assert_eq!(engine.selection().status(), DEFAULT_GUIDANCE);
    }

    #[test]
    fn switching_molecule_mid_flight_never_shows_old_molecule() {
        let mut engine = ViewerEngine::default();
        engine.execute(ViewerCommand::SelectMolecule("Water".to_owned()));
        let water = render_jobs(&mut engine);
        engine.execute(ViewerCommand::SelectMolecule("Caffeine".to_owned()));
        assert!(render_jobs(&mut engine).is_empty());

        engine.complete(succeed(&water[0], chain()));
        assert!(matches!(engine.content(), ViewContent::Placeholder));
        assert_eq!(engine.scheduler().stats().applied, 0);
        assert_eq!(engine.scheduler().stats().discarded, 1);
        let caffeine = render_jobs(&mut engine);
        assert_eq!(caffeine.len(), 1);
        assert_eq!(caffeine[0].request.name, "Caffeine");
        assert_eq!(caffeine[0].request.phi_x, 0);
    }

    #[test]
    fn reset_zeroes_rotation_and_clears_selection() {
        let mut engine = showing_chain();
        engine.execute(ViewerCommand::ClickAtom(0));
        engine.execute(ViewerCommand::Rotate { dx: 30.0, dy: 10.0 });
        let tickets = render_jobs(&mut engine);
        engine.complete(succeed(&tickets[0], chain()));

        engine.handle_key_press("KeyR");
        assert_eq!(*engine.rotation(), RotationState::new());
        assert_eq!(engine.selection().selected(), None);
        let tickets = render_jobs(&mut engine);
        assert_eq!((tickets[0].request.phi_x, tickets[0].request.phi_y), (0, 0));
    }

    #[test]
    fn clearing_molecule_restores_placeholder() {
        let mut engine = showing_chain();
        engine.execute(ViewerCommand::ClickAtom(0));
        engine.execute(ViewerCommand::ClearMolecule);
        assert!(matches!(engine.content(), ViewContent::Placeholder));
        assert!(engine.selection().highlights().is_clear());
        assert!(!engine.bindings().is_bound());
        assert!(engine.take_jobs().is_empty());
    }

    #[test]
    fn timeout_shows_failure_then_late_result_is_stale() {
        let mut engine = showing_chain();
        engine.execute(ViewerCommand::ClickAtom(1));
        engine.execute(ViewerCommand::Rotate { dx: 5.0, dy: 0.0 });
        let stuck = render_jobs(&mut engine);
        engine.execute(ViewerCommand::Rotate { dx: 5.0, dy: 0.0 });

        engine.expire(stuck[0].dispatched_at + Duration::from_secs(60));
        assert!(matches!(engine.content(), ViewContent::Failed(msg) if msg == TIMEOUT_MESSAGE));
        assert!(engine.selection().highlights().is_clear());
        let retry = render_jobs(&mut engine);
        assert_eq!(retry.len(), 1);
        assert_eq!(retry[0].request.phi_y, 10);

        engine.complete(succeed(&retry[0], chain()));
        assert!(engine.content().graph().is_some());
        engine.complete(fail(&stuck[0]));
        assert!(engine.content().graph().is_some());
        assert_eq!(engine.scheduler().stats().discarded, 1);
    }

    #[test]
    fn analytics_failure_marks_fields_and_leaves_render_alone() {
        let mut engine = showing_chain();
        engine.complete(JobResult::Analytics {
            molecule: "Water".to_owned(),
            result: Err(ServiceError::Status { code: 500 }),
        });
        assert_eq!(engine.stats().fields().formula, "error");
        assert!(engine.content().graph().is_some());
    }

    #[test]
    fn analytics_for_previous_molecule_is_dropped() {
        let mut engine = showing_chain();
        engine.execute(ViewerCommand::SelectMolecule("Caffeine".to_owned()));
        engine.complete(JobResult::Analytics {
            molecule: "Water".to_owned(),
            result: Err(ServiceError::Status { code: 500 }),
        });
        assert!(engine.stats().is_loading());
    }

    #[test]
    fn hover_shows_tooltip_for_rendered_atom() {
        let mut engine = showing_chain();
        engine.handle_event(InputEvent::CursorMoved { x: 5.0, y: 5.0 }, PickTarget::Atom(0));
        let tip = engine.bindings().tooltip().unwrap();
        assert_eq!(tip.text, "Atom #1: C");
        assert_eq!(tip.position, Vec2::new(17.0, 17.0));
        engine.handle_event(InputEvent::CursorLeft, PickTarget::None);
        assert!(engine.bindings().tooltip().is_none());
    }
}
