// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive session logic for a service-backed 2D molecule viewer.
//!
//! A remote molecule service draws each molecule as an SVG graph at a
//! requested rotation. This crate owns everything between the user and
//! that service: drag rotation, render request coalescing, atom
//! selection and highlighting, hover tooltips, and the statistics panel.
//!
//! # Key entry points
//!
//! - [`Viewer`] - a session bound to a [`service::MoleculeService`]
//! - [`engine::ViewerEngine`] - the I/O-free session state machine
//! - [`engine::scheduler::RenderScheduler`] - at most one render in flight,
//!   newest rotation wins
//! - [`options::Options`] - runtime configuration (input, service, tooltip)
//!
//! # Architecture
//!
//! The engine never blocks. Each user action may queue service jobs, which
//! the [`service::dispatcher::ServiceDispatcher`] runs on background
//! threads. Results come back over a channel and are applied on the
//! foreground thread, where each render is checked against the
//! scheduler's generation counter so a stale response never replaces a
//! newer one.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gui;
pub mod input;
pub mod options;
pub mod scene;
pub mod selection;
pub mod service;
pub mod viewer;

pub use engine::{ViewerCommand, ViewerEngine};
pub use error::ViewerError;
pub use viewer::Viewer;
