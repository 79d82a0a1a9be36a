use anyhow::Result;

/// The boundary to the external cheminformatics engine.
///
/// Everything chemical happens behind this trait: parsing the notation,
/// computing descriptors, and drawing the structure. Implementations wrap a
/// real toolkit (native bindings, a subprocess, a remote service) and are
/// assumed correct. An engine that needs a one-time initialization must
/// finish it before the value is handed to a checker; nothing in this crate
/// calls a half-loaded engine.
pub trait Engine {
    /// Opaque handle to a parsed molecule.
    type Mol;

    /// Parse a SMILES string into a molecule handle.
    ///
    /// Returns `None` when the notation is malformed. Callers must treat
    /// that as invalid input and stop before any descriptor work.
    fn parse_smiles(&self, smiles: &str) -> Option<Self::Mol>;

    /// The canonical descriptor set for a parsed molecule, serialized as a
    /// JSON object of named numeric properties.
    fn descriptors(&self, mol: &Self::Mol) -> Result<String>;

    /// An embeddable 2D depiction of the molecule, if the engine can draw.
    /// Purely presentational; the rule checks never read it.
    fn depict_svg(&self, _mol: &Self::Mol) -> Option<String> {
        None
    }
}
