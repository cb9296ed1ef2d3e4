//! Boundary with the remote molecule service.
//!
//! The viewer core never performs I/O itself. It describes work as
//! [`Job`]s; a [`dispatcher::ServiceDispatcher`] runs them against a
//! [`MoleculeService`] off the foreground thread and hands back
//! [`JobResult`]s.

pub mod catalog;
pub mod dispatcher;
#[cfg(feature = "http")]
pub mod http;

use std::collections::BTreeMap;
use std::fmt;

pub use catalog::ElementRow;
pub use dispatcher::ServiceDispatcher;
#[cfg(feature = "http")]
pub use http::HttpService;
use serde::{Deserialize, Serialize};

use crate::camera::RotationState;
use crate::engine::scheduler::RenderTicket;
use crate::scene::RenderedGraph;

/// Failure of a single service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never produced a response (connection, DNS, timeout).
    Transport(String),
    /// The service answered with an error status and no message.
    Status {
        /// HTTP status code.
        code: u16,
    },
    /// The service refused the request with a message.
    Rejected(String),
    /// The response body could not be understood.
    Decode(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "request failed: {msg}"),
            Self::Status { code } => write!(f, "service returned status {code}"),
            Self::Rejected(msg) => f.write_str(msg),
            Self::Decode(msg) => write!(f, "unreadable response: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Render request: molecule name plus whole-degree rotation angles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Molecule name.
    pub name: String,
    /// Rotation about x, degrees.
    pub phi_x: i32,
    /// Rotation about y, degrees.
    pub phi_y: i32,
    /// Rotation about z, degrees.
    pub phi_z: i32,
}

impl RenderRequest {
    /// Build a request from the live rotation, rounding each angle.
    #[must_use]
    pub fn new(name: &str, rotation: &RotationState) -> Self {
        let (phi_x, phi_y, phi_z) = rotation.rounded();
        Self {
            name: name.to_owned(),
            phi_x,
            phi_y,
            phi_z,
        }
    }
}

/// Analytics request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsRequest {
    /// Molecule name.
    pub name: String,
}

/// Analytics success payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeStats {
    /// Molecular formula, e.g. `"C2H6O"`.
    pub formula: String,
    /// Molar mass in g/mol.
    pub molar_mass: f64,
    /// Number of atoms.
    pub atom_count: u32,
    /// Number of bonds.
    pub bond_count: u32,
    /// Element label → atom count.
    pub element_counts: BTreeMap<String, u32>,
    /// Bond order → bond count.
    pub bond_order_distribution: BTreeMap<u32, u32>,
}

/// Operations offered by the molecule service.
///
/// Calls are blocking; the dispatcher runs them on background threads.
pub trait MoleculeService: Send + Sync {
    /// Render a molecule at the given rotation.
    ///
    /// # Errors
    ///
    /// Any [`ServiceError`]; its text is shown in place of the graph.
    fn render(&self, request: &RenderRequest) -> Result<RenderedGraph, ServiceError>;

    /// Compute statistics for a molecule.
    ///
    /// # Errors
    ///
    /// Any [`ServiceError`].
    fn analytics(&self, request: &AnalyticsRequest) -> Result<MoleculeStats, ServiceError>;

    /// List the element table.
    ///
    /// # Errors
    ///
    /// Any [`ServiceError`].
    fn list_elements(&self) -> Result<Vec<ElementRow>, ServiceError>;

    /// List stored molecule names.
    ///
    /// # Errors
    ///
    /// Any [`ServiceError`].
    fn list_molecules(&self) -> Result<Vec<String>, ServiceError>;

    /// Create or update an element row.
    ///
    /// # Errors
    ///
    /// Any [`ServiceError`].
    fn upsert_element(&self, element: &ElementRow) -> Result<(), ServiceError>;

    /// Upload an SDF file under a molecule name.
    ///
    /// # Errors
    ///
    /// Any [`ServiceError`].
    fn upload_molecule(&self, name: &str, sdf: &[u8]) -> Result<(), ServiceError>;
}

/// Work the viewer wants performed by the service.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    /// Render the ticket's request.
    Render(RenderTicket),
    /// Fetch statistics for a molecule.
    Analytics {
        /// Molecule name.
        molecule: String,
    },
}

/// Outcome of a [`Job`], tagged with what it was issued for.
#[derive(Debug, Clone)]
pub enum JobResult {
    /// A render finished.
    Render {
        /// Generation captured at dispatch.
        generation: u64,
        /// Molecule the render was for.
        molecule: String,
        /// The graph, or why there is none.
        result: Result<RenderedGraph, ServiceError>,
    },
    /// An analytics call finished.
    Analytics {
        /// Molecule the statistics are for.
        molecule: String,
        /// The statistics, or why there are none.
        result: Result<MoleculeStats, ServiceError>,
    },
}

impl Job {
    /// Run the job to completion against `service`.
    pub fn run<S: MoleculeService + ?Sized>(&self, service: &S) -> JobResult {
        match self {
            Self::Render(ticket) => JobResult::Render {
                generation: ticket.generation,
                molecule: ticket.request.name.clone(),
                result: service.render(&ticket.request),
            },
            Self::Analytics { molecule } => JobResult::Analytics {
                molecule: molecule.clone(),
                result: service.analytics(&AnalyticsRequest {
                    name: molecule.clone(),
                }),
            },
        }
    }

    /// The result this job produces when it cannot be run at all.
    #[must_use]
    pub fn failed(&self, error: ServiceError) -> JobResult {
        match self {
            Self::Render(ticket) => JobResult::Render {
                generation: ticket.generation,
                molecule: ticket.request.name.clone(),
                result: Err(error),
            },
            Self::Analytics { molecule } => JobResult::Analytics {
                molecule: molecule.clone(),
                result: Err(error),
            },
        }
    }
}
