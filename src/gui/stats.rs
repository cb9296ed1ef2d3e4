//! Molecule statistics panel.

use crate::service::MoleculeStats;

const EMPTY: &str = "-";
const LOADING: &str = "…";
const ERROR: &str = "error";

/// Display strings for every statistic field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsFields {
    /// Molecular formula.
    pub formula: String,
    /// Molar mass, two decimals.
    pub molar_mass: String,
    /// Atom count.
    pub atom_count: String,
    /// Bond count.
    pub bond_count: String,
    /// `"C: 2, O: 1"`, sorted by element label.
    pub element_counts: String,
    /// `"1: 5, 2: 1"`, sorted by bond order.
    pub bond_orders: String,
}

impl StatsFields {
    fn filled(text: &str) -> Self {
        Self {
            formula: text.to_owned(),
            molar_mass: text.to_owned(),
            atom_count: text.to_owned(),
            bond_count: text.to_owned(),
            element_counts: text.to_owned(),
            bond_orders: text.to_owned(),
        }
    }

    fn from_stats(stats: &MoleculeStats) -> Self {
        Self {
            formula: stats.formula.clone(),
            molar_mass: format!("{:.2}", stats.molar_mass),
            atom_count: stats.atom_count.to_string(),
            bond_count: stats.bond_count.to_string(),
            element_counts: join_counts(
                stats.element_counts.iter().map(|(k, v)| (k.clone(), v)),
            ),
            bond_orders: join_counts(
                stats
                    .bond_order_distribution
                    .iter()
                    .map(|(k, v)| (k.to_string(), v)),
            ),
        }
    }
}

fn join_counts<'a>(pairs: impl Iterator<Item = (String, &'a u32)>) -> String {
    let parts: Vec<String> =
        pairs.map(|(label, count)| format!("{label}: {count}")).collect();
    if parts.is_empty() {
        EMPTY.to_owned()
    } else {
        parts.join(", ")
    }
}

/// Where the statistics for the current molecule stand.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StatsState {
    /// No molecule.
    #[default]
    Empty,
    /// Waiting for the service.
    Loading(String),
    /// Statistics arrived.
    Loaded {
        /// Molecule the statistics belong to.
        molecule: String,
        /// The statistics.
        stats: MoleculeStats,
    },
    /// The analytics call failed.
    Failed(String),
}

/// Statistics for the selected molecule. Independent of render state.
#[derive(Debug, Clone, Default)]
pub struct StatsPanel {
    state: StatsState,
}

impl StatsPanel {
    /// Current state.
    #[must_use]
    pub fn state(&self) -> &StatsState {
        &self.state
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, StatsState::Loading(_))
    }

    /// Clear back to empty.
    pub fn clear(&mut self) {
        self.state = StatsState::Empty;
    }

    /// A request for `molecule` went out.
    pub fn loading(&mut self, molecule: &str) {
        self.state = StatsState::Loading(molecule.to_owned());
    }

    /// Statistics for `molecule` arrived.
    pub fn loaded(&mut self, molecule: &str, stats: MoleculeStats) {
        self.state = StatsState::Loaded {
            molecule: molecule.to_owned(),
            stats,
        };
    }

    /// The request for `molecule` failed.
    pub fn failed(&mut self, molecule: &str) {
        self.state = StatsState::Failed(molecule.to_owned());
    }

    /// Field strings for display.
    #[must_use]
    pub fn fields(&self) -> StatsFields {
        match &self.state {
            StatsState::Empty => StatsFields::filled(EMPTY),
            StatsState::Loading(_) => StatsFields::filled(LOADING),
            StatsState::Loaded { stats, .. } => StatsFields::from_stats(stats),
            StatsState::Failed(_) => StatsFields::filled(ERROR),
        }
    }
}
