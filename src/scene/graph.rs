//! The atom/bond graph returned by a successful render.
//!
//! A graph is replaced wholesale on every render. Atom indices are only
//! meaningful within the graph that produced them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One atom node of a rendered projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphAtom {
    /// Stable index of this atom within its render.
    pub index: u32,
    /// Element label (e.g. `"C"`, `"O"`).
    pub element: String,
    /// Projected horizontal position.
    #[serde(default)]
    pub x: f64,
    /// Projected vertical position.
    #[serde(default)]
    pub y: f64,
    /// Drawn radius.
    #[serde(default)]
    pub radius: f64,
}

/// One bond edge of a rendered projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphBond {
    /// First endpoint atom index.
    pub a1: u32,
    /// Second endpoint atom index.
    pub a2: u32,
    /// Bond order, at least 1.
    pub order: u32,
}

impl GraphBond {
    /// Whether either endpoint is `atom`.
    #[must_use]
    pub fn touches(&self, atom: u32) -> bool {
        self.a1 == atom || self.a2 == atom
    }

    /// The endpoint opposite `atom`, or `None` if the bond does not touch it.
    #[must_use]
    pub fn other(&self, atom: u32) -> Option<u32> {
        if self.a1 == atom {
            Some(self.a2)
        } else if self.a2 == atom {
            Some(self.a1)
        } else {
            None
        }
    }
}

/// Wire shape of the render service's success payload.
#[derive(Deserialize)]
struct GraphPayload {
    #[serde(default)]
    svg: String,
    #[serde(default)]
    atoms: Vec<GraphAtom>,
    #[serde(default)]
    bonds: Vec<GraphBond>,
}

/// A rendered projection with its adjacency index.
///
/// The index is built once at construction so selection queries never
/// rescan presentation data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "GraphPayload")]
pub struct RenderedGraph {
    svg: String,
    atoms: Vec<GraphAtom>,
    bonds: Vec<GraphBond>,
    /// Atom index → position in `atoms`.
    atom_slots: FxHashMap<u32, usize>,
    /// Atom index → positions in `bonds` of every incident bond.
    incident: FxHashMap<u32, Vec<usize>>,
}

impl From<GraphPayload> for RenderedGraph {
    fn from(payload: GraphPayload) -> Self {
        Self::new(payload.svg, payload.atoms, payload.bonds)
    }
}

impl RenderedGraph {
    /// Build a graph, dropping duplicate atoms and bonds that reference
    /// unknown atoms, loop back to their own atom, or have order zero.
    #[must_use]
    pub fn new(svg: String, atoms: Vec<GraphAtom>, bonds: Vec<GraphBond>) -> Self {
        let mut atom_slots = FxHashMap::default();
        let mut kept_atoms = Vec::with_capacity(atoms.len());
        for atom in atoms {
            if atom_slots.contains_key(&atom.index) {
                log::warn!("duplicate atom index {} in rendered graph", atom.index);
                continue;
            }
            let _ = atom_slots.insert(atom.index, kept_atoms.len());
            kept_atoms.push(atom);
        }

        let mut incident: FxHashMap<u32, Vec<usize>> = FxHashMap::default();
        let mut kept_bonds = Vec::with_capacity(bonds.len());
        for bond in bonds {
            let known = atom_slots.contains_key(&bond.a1)
                && atom_slots.contains_key(&bond.a2);
            if !known || bond.a1 == bond.a2 || bond.order == 0 {
                log::warn!(
                    "dropping malformed bond {}-{} (order {})",
                    bond.a1,
                    bond.a2,
                    bond.order
                );
                continue;
            }
            let slot = kept_bonds.len();
            incident.entry(bond.a1).or_default().push(slot);
            incident.entry(bond.a2).or_default().push(slot);
            kept_bonds.push(bond);
        }

        Self {
            svg,
            atoms: kept_atoms,
            bonds: kept_bonds,
            atom_slots,
            incident,
        }
    }

    /// Parse the render service's JSON payload.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if the payload is not a
    /// graph description.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Presentation markup supplied by the render service.
    #[must_use]
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// All atoms in render order.
    #[must_use]
    pub fn atoms(&self) -> &[GraphAtom] {
        &self.atoms
    }

    /// All bonds in render order.
    #[must_use]
    pub fn bonds(&self) -> &[GraphBond] {
        &self.bonds
    }

    /// Whether the graph has no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Look up an atom by its index.
    #[must_use]
    pub fn atom(&self, index: u32) -> Option<&GraphAtom> {
        self.atom_slots.get(&index).map(|&slot| &self.atoms[slot])
    }

    /// Whether an atom with this index exists.
    #[must_use]
    pub fn contains(&self, index: u32) -> bool {
        self.atom_slots.contains_key(&index)
    }

    /// Look up a bond by its position.
    #[must_use]
    pub fn bond(&self, position: usize) -> Option<&GraphBond> {
        self.bonds.get(position)
    }

    /// Positions of every bond touching `index`.
    #[must_use]
    pub fn incident_bonds(&self, index: u32) -> &[usize] {
        self.incident.get(&index).map_or(&[][..], Vec::as_slice)
    }

    /// Atoms directly bonded to `index`, sorted and without repeats.
    #[must_use]
    pub fn neighbors(&self, index: u32) -> Vec<u32> {
        let mut out: Vec<u32> = self
            .incident_bonds(index)
            .iter()
            .filter_map(|&pos| self.bond(pos)?.other(index))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}
