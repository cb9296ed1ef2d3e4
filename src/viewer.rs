//! Foreground driver pairing a [`ViewerEngine`] with a molecule service.
//!
//! The engine decides what to ask for; the viewer ships those jobs to a
//! [`ServiceDispatcher`] and feeds results back on each [`pump`]. All
//! viewer state lives on the calling thread.
//!
//! ```no_run
//! # use molview::{service::http::HttpService, options::Options, Viewer};
//! let options = Options::default();
//! let service = HttpService::new(&options.service);
//! let mut viewer = Viewer::builder().with_options(options).build(service);
//! viewer.execute(molview::ViewerCommand::SelectMolecule("Caffeine".into()));
//! viewer.wait_idle(std::time::Duration::from_secs(5));
//! ```
//!
//! [`pump`]: Viewer::pump

use std::time::Duration;

use web_time::Instant;

use crate::engine::{ViewerCommand, ViewerEngine};
use crate::error::ViewerError;
use crate::input::InputEvent;
use crate::options::Options;
use crate::scene::PickTarget;
use crate::service::catalog::{validate_upload, ElementRow};
use crate::service::dispatcher::ServiceDispatcher;
use crate::service::{MoleculeService, ServiceError};

/// Poll interval used by [`Viewer::wait_idle`].
const IDLE_POLL: Duration = Duration::from_millis(50);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
#[derive(Default)]
pub struct ViewerBuilder {
    options: Option<Options>,
    molecule: Option<String>,
}

impl ViewerBuilder {
    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Select a molecule as soon as the viewer is built.
    #[must_use]
    pub fn with_molecule(mut self, name: impl Into<String>) -> Self {
        self.molecule = Some(name.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`] talking to `service`.
    pub fn build<S: MoleculeService + 'static>(self, service: S) -> Viewer<S> {
        let mut viewer = Viewer {
            engine: ViewerEngine::new(self.options.unwrap_or_default()),
            dispatcher: ServiceDispatcher::new(service),
        };
        if let Some(name) = self.molecule {
            viewer.execute(ViewerCommand::SelectMolecule(name));
        }
        viewer
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A viewer session bound to a molecule service.
pub struct Viewer<S> {
    engine: ViewerEngine,
    dispatcher: ServiceDispatcher<S>,
}

impl Viewer<()> {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::default()
    }
}

impl<S: MoleculeService + 'static> Viewer<S> {
    /// Read-only access to the session state.
    #[must_use]
    pub fn engine(&self) -> &ViewerEngine {
        &self.engine
    }

    /// Perform a command and ship any work it produced.
    pub fn execute(&mut self, cmd: ViewerCommand) {
        self.engine.execute(cmd);
        self.flush();
    }

    /// Feed a pointer event with the element under the cursor.
    pub fn handle_event(&mut self, event: InputEvent, hovered: PickTarget) {
        self.engine.handle_event(event, hovered);
        self.flush();
    }

    /// Feed a key press.
    pub fn handle_key_press(&mut self, key: &str) {
        self.engine.handle_key_press(key);
        self.flush();
    }

    /// Apply finished results and check the render timeout. Never blocks.
    ///
    /// Returns the number of results applied.
    pub fn pump(&mut self) -> usize {
        self.engine.expire(Instant::now());
        let mut applied = 0;
        while let Some(result) = self.dispatcher.try_recv() {
            self.engine.complete(result);
            applied += 1;
        }
        self.flush();
        applied
    }

    /// Pump until no work is outstanding or `limit` elapses.
    ///
    /// Returns whether the engine went idle.
    pub fn wait_idle(&mut self, limit: Duration) -> bool {
        let deadline = Instant::now() + limit;
        loop {
            let _ = self.pump();
            if self.engine.is_idle() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let wait = IDLE_POLL.min(deadline - now);
            if let Some(result) = self.dispatcher.recv_timeout(wait) {
                self.engine.complete(result);
            }
        }
    }

    /// Stored molecule names.
    ///
    /// # Errors
    ///
    /// Propagates the service failure.
    pub fn list_molecules(&self) -> Result<Vec<String>, ViewerError> {
        Ok(self.dispatcher.service().list_molecules()?)
    }

    /// The element table.
    ///
    /// # Errors
    ///
    /// Propagates the service failure.
    pub fn list_elements(&self) -> Result<Vec<ElementRow>, ViewerError> {
        Ok(self.dispatcher.service().list_elements()?)
    }

    /// Validate and store an element row.
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidElement`] before any request is made, or the
    /// service failure.
    pub fn upsert_element(&self, element: &ElementRow) -> Result<(), ViewerError> {
        element.validate()?;
        self.dispatcher.service().upsert_element(element)?;
        log::info!("element {} saved", element.code);
        Ok(())
    }

    /// Validate and upload an SDF file.
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidUpload`] before any request is made, or the
    /// service failure.
    pub fn upload_molecule(&self, name: &str, sdf: &[u8]) -> Result<(), ViewerError> {
        validate_upload(name, sdf)?;
        self.dispatcher.service().upload_molecule(name, sdf)?;
        log::info!("molecule {name} uploaded ({} bytes)", sdf.len());
        Ok(())
    }

    /// Ship queued jobs to the dispatcher.
    fn flush(&mut self) {
        for job in self.engine.take_jobs() {
            let fallback = job.clone();
            if let Err(e) = self.dispatcher.submit(job) {
                log::error!("could not start service request: {e}");
                self.engine
                    .complete(fallback.failed(ServiceError::Transport(e.to_string())));
                // A failed render may have queued a follow-up; it is picked
                // up by the next flush.
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ViewContent;
    use crate::input::MouseButton;
    use crate::service::tests::FakeService;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn builder_selects_initial_molecule() {
        let mut viewer = Viewer::builder()
            .with_molecule("Water")
            .build(FakeService::default());
        assert!(viewer.wait_idle(WAIT));
        assert!(viewer.engine().content().graph().is_some());
        assert_eq!(viewer.engine().stats().fields().formula, "Water-formula");
    }

    #[test]
    fn drag_burst_is_coalesced() {
        let mut viewer = Viewer::builder().build(FakeService::default());
        viewer.execute(ViewerCommand::SelectMolecule("Water".to_owned()));
        assert!(viewer.wait_idle(WAIT));

        viewer.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 }, PickTarget::None);
        viewer.handle_event(
            InputEvent::MouseButton { button: MouseButton::Left, pressed: true },
            PickTarget::None,
        );
        for step in 1..=40_u16 {
            viewer.handle_event(
                InputEvent::CursorMoved { x: f32::from(step) * 3.0, y: 0.0 },
                PickTarget::None,
            );
        }
        viewer.handle_event(
            InputEvent::MouseButton { button: MouseButton::Left, pressed: false },
            PickTarget::None,
        );
        assert!(viewer.wait_idle(WAIT));

        let renders = viewer.dispatcher.service().renders.lock().unwrap().clone();
        assert!(renders.len() < 40);
        assert_eq!(renders.last().map(|r| r.phi_y), Some(120));
        assert!(!viewer.engine().scheduler().in_flight());
        assert_eq!(viewer.engine().rotation().rounded().1, 120);
    }

    #[test]
    fn render_failure_is_displayed() {
        let service = FakeService {
            fail_renders: true,
            ..FakeService::default()
        };
        let mut viewer = Viewer::builder().with_molecule("Unobtainium").build(service);
        assert!(viewer.wait_idle(WAIT));
        assert!(matches!(
            viewer.engine().content(),
            ViewContent::Failed(msg) if msg == "molecule not found"
        ));
    }

    #[test]
    fn invalid_element_never_reaches_service() {
        let viewer = Viewer::builder().build(FakeService::default());
        let row = ElementRow {
            number: 0,
            code: "Xx".to_owned(),
            name: "Nothing".to_owned(),
            colors: ["FF0000".to_owned(), "00FF00".to_owned(), "0000FF".to_owned()],
            radius: 1.0,
        };
        assert!(matches!(
            viewer.upsert_element(&row),
            Err(ViewerError::InvalidElement(_))
        ));
        assert!(matches!(
            viewer.upload_molecule("", b"data"),
            Err(ViewerError::InvalidUpload(_))
        ));
        assert_eq!(viewer.list_molecules().unwrap(), vec!["Water".to_owned()]);
    }

    #[test]
    fn pump_without_work_is_a_no_op() {
        let mut viewer = Viewer::builder().build(FakeService::default());
        assert_eq!(viewer.pump(), 0);
        assert!(viewer.engine().is_idle());
    }
}
