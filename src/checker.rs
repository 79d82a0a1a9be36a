use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{evaluate, DescriptorSet, Engine, RuleReport};

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Please enter a SMILES string")]
    EmptyInput,
    #[error("Invalid SMILES format: '{0}'")]
    InvalidSmiles(String),
}

/// Everything produced for one submission: the input, the resolved
/// descriptors, the rule report, and the optional depiction markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub smiles: String,
    pub descriptors: DescriptorSet,
    pub report: RuleReport,
    pub depiction: Option<String>,
}

/// Drives the full flow for one SMILES submission: parse, fetch descriptors,
/// resolve, evaluate, depict. Stateless between calls; each submission
/// allocates a fresh `Analysis`.
pub struct SmilesChecker<E> {
    engine: E,
}

impl<E: Engine> SmilesChecker<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Check a SMILES string against all four rule families.
    ///
    /// Empty or malformed input is rejected here, before the evaluator is
    /// ever invoked, so an invalid submission never yields a report.
    pub fn check(&self, smiles: &str) -> Result<Analysis> {
        let smiles = smiles.trim();
        if smiles.is_empty() {
            return Err(CheckError::EmptyInput.into());
        }

        let mol = self
            .engine
            .parse_smiles(smiles)
            .ok_or_else(|| CheckError::InvalidSmiles(smiles.to_string()))?;

        let payload = self
            .engine
            .descriptors(&mol)
            .with_context(|| format!("Failed to fetch descriptors for {smiles}"))?;
        debug!("Molecular properties for {}: {}", smiles, payload);

        let descriptors = DescriptorSet::from_json(&payload)
            .with_context(|| format!("Bad descriptor payload for {smiles}"))?;
        let report = evaluate(&descriptors);
        let depiction = self.engine.depict_svg(&mol);

        Ok(Analysis {
            smiles: smiles.to_string(),
            descriptors,
            report,
            depiction,
        })
    }
}
