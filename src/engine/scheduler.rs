//! At-most-one-in-flight render scheduling.
//!
//! The scheduler never performs I/O. [`RenderScheduler::schedule`] either
//! hands back a [`RenderTicket`] to dispatch, or records that a follow-up
//! is wanted. Any number of calls made while a request is in flight
//! collapse into one trailing request, built from the rotation that is
//! live when it is dispatched, not when it was asked for.
//!
//! Every dispatch bumps the generation counter and the ticket carries the
//! value it was given. A completion is accepted only if its generation is
//! still the current one, so whatever order results arrive in, only the
//! most recently dispatched request can reach the display. A current
//! completion for a molecule that is no longer selected still releases
//! the flight but is not applied.

use std::time::Duration;

use web_time::Instant;

use crate::camera::RotationState;
use crate::service::RenderRequest;

/// A dispatched render request and the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTicket {
    /// Generation captured at dispatch.
    pub generation: u64,
    /// What to ask the render service for.
    pub request: RenderRequest,
    /// When the request was dispatched.
    pub dispatched_at: Instant,
}

/// What a call to [`RenderScheduler::schedule`] decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// No molecule: show the placeholder, no request.
    Placeholder,
    /// A request is in flight; a follow-up has been queued.
    Queued,
    /// Dispatch this request now.
    Dispatch(RenderTicket),
}

/// Verdict on a finished request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// The result belongs to the current generation and may be shown.
    pub apply: bool,
    /// A follow-up was queued during the flight; schedule again now.
    pub follow_up: bool,
}

/// Counters for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerStats {
    /// Requests dispatched.
    pub dispatched: u64,
    /// `schedule` calls folded into a pending follow-up.
    pub coalesced: u64,
    /// Completions accepted for display.
    pub applied: u64,
    /// Completions dropped as stale or for a deselected molecule.
    pub discarded: u64,
    /// Requests abandoned after the timeout.
    pub expired: u64,
}

/// Render request state: in-flight flag, queued flag, generation.
#[derive(Debug, Clone)]
pub struct RenderScheduler {
    in_flight: bool,
    queued: bool,
    generation: u64,
    /// Molecule of the most recent dispatch.
    molecule: Option<String>,
    in_flight_since: Option<Instant>,
    timeout: Option<Duration>,
    stats: SchedulerStats,
}

impl RenderScheduler {
    /// Create an idle scheduler. `timeout` of `None` waits forever.
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            in_flight: false,
            queued: false,
            generation: 0,
            molecule: None,
            in_flight_since: None,
            timeout,
            stats: SchedulerStats::default(),
        }
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether a follow-up is pending.
    #[must_use]
    pub fn queued(&self) -> bool {
        self.queued
    }

    /// Generation of the most recently dispatched request.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Counters since creation.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Ask for the latest rotation of `molecule` to be rendered.
    pub fn schedule(
        &mut self,
        molecule: Option<&str>,
        rotation: &RotationState,
        now: Instant,
    ) -> ScheduleOutcome {
        let Some(name) = molecule else {
            return ScheduleOutcome::Placeholder;
        };

        if self.in_flight {
            self.queued = true;
            self.stats.coalesced += 1;
            log::trace!("render coalesced behind generation {}", self.generation);
            return ScheduleOutcome::Queued;
        }

        self.in_flight = true;
        self.queued = false;
        self.generation += 1;
        self.in_flight_since = Some(now);
        self.molecule = Some(name.to_owned());
        self.stats.dispatched += 1;

        let request = RenderRequest::new(name, rotation);
        log::debug!(
            "dispatch render #{} {} ({}, {}, {})",
            self.generation,
            request.name,
            request.phi_x,
            request.phi_y,
            request.phi_z
        );
        ScheduleOutcome::Dispatch(RenderTicket {
            generation: self.generation,
            request,
            dispatched_at: now,
        })
    }

    /// Record the completion of the request dispatched as `generation`,
    /// given the molecule selected now.
    ///
    /// A stale completion is discarded and leaves the in-flight state of
    /// the newer request alone. A current completion always releases the
    /// flight, but is only applied if it was for `current_molecule`.
    pub fn complete(
        &mut self,
        generation: u64,
        current_molecule: Option<&str>,
    ) -> Completion {
        if generation != self.generation {
            self.stats.discarded += 1;
            log::debug!(
                "discard stale render #{generation} (current #{})",
                self.generation
            );
            return Completion {
                apply: false,
                follow_up: false,
            };
        }

        let follow_up = self.in_flight && std::mem::take(&mut self.queued);
        self.in_flight = false;
        self.in_flight_since = None;

        let apply = current_molecule.is_some()
            && self.molecule.as_deref() == current_molecule;
        if apply {
            self.stats.applied += 1;
        } else {
            self.stats.discarded += 1;
            log::debug!(
                "render #{generation} for {:?} arrived after molecule change",
                self.molecule
            );
        }
        Completion { apply, follow_up }
    }

    /// Abandon the in-flight request if it has outlived the timeout.
    ///
    /// Returns `Some(follow_up)` when a request was abandoned. The
    /// abandoned request's generation stays current until the next
    /// dispatch, after which its late result is stale.
    pub fn expire(&mut self, now: Instant) -> Option<bool> {
        let timeout = self.timeout?;
        let since = self.in_flight_since?;
        if now.saturating_duration_since(since) < timeout {
            return None;
        }
        log::warn!(
            "render #{} timed out after {} ms",
            self.generation,
            timeout.as_millis()
        );
        self.in_flight = false;
        self.in_flight_since = None;
        self.stats.expired += 1;
        Some(std::mem::take(&mut self.queued))
    }
}
