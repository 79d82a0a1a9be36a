use std::collections::BTreeMap;

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Descriptor payload is not a JSON object: {0}")]
    NotAnObject(String),
    #[error("Descriptor '{0}' is not numeric (got {1})")]
    NotNumeric(String, String),
}

/// The six physical quantities the rule checks read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Descriptor {
    MolecularWeight,
    HBondDonors,
    HBondAcceptors,
    LogP,
    RotatableBonds,
    Tpsa,
}

pub const DESCRIPTORS: [Descriptor; 6] = [
    Descriptor::MolecularWeight,
    Descriptor::HBondDonors,
    Descriptor::HBondAcceptors,
    Descriptor::LogP,
    Descriptor::RotatableBonds,
    Descriptor::Tpsa,
];

lazy_static! {
    /// Accepted key names for each descriptor, highest priority first.
    ///
    /// Engines disagree on naming (e.g. "MolWt" vs "amw" for molecular
    /// weight), so every lookup walks this table once, before any checks run.
    static ref DESCRIPTOR_ALIASES: BTreeMap<Descriptor, &'static [&'static str]> = {
        let mut map: BTreeMap<Descriptor, &'static [&'static str]> = BTreeMap::new();
        map.insert(Descriptor::MolecularWeight, &["MolWt", "amw"]);
        map.insert(Descriptor::HBondDonors, &["NumHDonors", "lipinskiHBD"]);
        map.insert(Descriptor::HBondAcceptors, &["NumHAcceptors", "lipinskiHBA"]);
        map.insert(Descriptor::LogP, &["MolLogP", "CrippenClogP"]);
        map.insert(Descriptor::RotatableBonds, &["NumRotatableBonds"]);
        map.insert(Descriptor::Tpsa, &["TPSA", "tpsa"]);
        map
    };
}

impl Descriptor {
    /// The accepted key names for this descriptor, highest priority first.
    pub fn aliases(&self) -> &'static [&'static str] {
        DESCRIPTOR_ALIASES[self]
    }

    /// Whether `key` is one of this descriptor's accepted names.
    pub fn matches_key(&self, key: &str) -> bool {
        self.aliases().iter().any(|alias| *alias == key)
    }
}

/// The resolved numeric descriptors for one molecule.
///
/// This is the only domain input to the rule evaluator. Counts are stored as
/// `f64` like everything else because the engine hands them over as plain
/// JSON numbers; whole values still display without a decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DescriptorSet {
    #[serde(default)]
    pub molecular_weight: f64,
    #[serde(default)]
    pub h_bond_donors: f64,
    #[serde(default)]
    pub h_bond_acceptors: f64,
    #[serde(default)]
    pub log_p: f64,
    #[serde(default)]
    pub rotatable_bonds: f64,
    #[serde(default)]
    pub tpsa: f64,
}

impl DescriptorSet {
    pub fn get(&self, descriptor: Descriptor) -> f64 {
        match descriptor {
            Descriptor::MolecularWeight => self.molecular_weight,
            Descriptor::HBondDonors => self.h_bond_donors,
            Descriptor::HBondAcceptors => self.h_bond_acceptors,
            Descriptor::LogP => self.log_p,
            Descriptor::RotatableBonds => self.rotatable_bonds,
            Descriptor::Tpsa => self.tpsa,
        }
    }

    pub fn set(&mut self, descriptor: Descriptor, value: f64) {
        match descriptor {
            Descriptor::MolecularWeight => self.molecular_weight = value,
            Descriptor::HBondDonors => self.h_bond_donors = value,
            Descriptor::HBondAcceptors => self.h_bond_acceptors = value,
            Descriptor::LogP => self.log_p = value,
            Descriptor::RotatableBonds => self.rotatable_bonds = value,
            Descriptor::Tpsa => self.tpsa = value,
        }
    }

    /// Resolve a raw key-value property map into a `DescriptorSet`.
    ///
    /// For each descriptor the aliases are tried in priority order and the
    /// first key present wins. A descriptor absent under every alias defaults
    /// to 0. A key that is present but not numeric is a contract violation
    /// and is reported as an error rather than swallowed.
    pub fn resolve(properties: &serde_json::Map<String, Value>) -> Result<Self, DescriptorError> {
        let mut resolved = DescriptorSet::default();
        for (descriptor, aliases) in DESCRIPTOR_ALIASES.iter() {
            for alias in *aliases {
                let value = match properties.get(*alias) {
                    Some(value) => value,
                    None => continue,
                };
                let number = value.as_f64().ok_or_else(|| {
                    DescriptorError::NotNumeric(alias.to_string(), value.to_string())
                })?;
                resolved.set(*descriptor, number);
                break;
            }
        }
        Ok(resolved)
    }

    /// Parse the engine's serialized descriptor payload (a JSON object) and
    /// resolve it into a `DescriptorSet`.
    pub fn from_json(payload: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(payload)
            .context("Failed to parse descriptor payload as JSON")?;
        let object = value
            .as_object()
            .ok_or_else(|| DescriptorError::NotAnObject(value.to_string()))?;
        Ok(Self::resolve(object)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonical_names() {
        let descriptors = DescriptorSet::from_json(
            r#"{
                "MolWt": 180.16,
                "NumHDonors": 1,
                "NumHAcceptors": 4,
                "MolLogP": 1.31,
                "NumRotatableBonds": 3,
                "TPSA": 63.6
            }"#,
        )
        .expect("Failed to resolve descriptors");

        assert_eq!(descriptors.molecular_weight, 180.16);
        assert_eq!(descriptors.h_bond_donors, 1.0);
        assert_eq!(descriptors.h_bond_acceptors, 4.0);
        assert_eq!(descriptors.log_p, 1.31);
        assert_eq!(descriptors.rotatable_bonds, 3.0);
        assert_eq!(descriptors.tpsa, 63.6);
    }

    #[test]
    fn test_resolve_alternate_names() {
        // The same quantities under the alternate engine spelling.
        let descriptors = DescriptorSet::from_json(
            r#"{
                "amw": 78.11,
                "lipinskiHBD": 0,
                "lipinskiHBA": 0,
                "CrippenClogP": 1.69,
                "NumRotatableBonds": 0,
                "tpsa": 0
            }"#,
        )
        .expect("Failed to resolve descriptors");

        assert_eq!(descriptors.molecular_weight, 78.11);
        assert_eq!(descriptors.log_p, 1.69);
        assert_eq!(descriptors.h_bond_donors, 0.0);
    }

    #[test]
    fn test_primary_alias_wins() {
        // When both spellings are present, the higher-priority key is taken.
        let descriptors =
            DescriptorSet::from_json(r#"{"MolWt": 100.0, "amw": 200.0}"#)
                .expect("Failed to resolve descriptors");
        assert_eq!(descriptors.molecular_weight, 100.0);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let descriptors = DescriptorSet::from_json(r#"{"MolWt": 42.0}"#)
            .expect("Failed to resolve descriptors");
        assert_eq!(descriptors.molecular_weight, 42.0);
        assert_eq!(descriptors.h_bond_donors, 0.0);
        assert_eq!(descriptors.h_bond_acceptors, 0.0);
        assert_eq!(descriptors.log_p, 0.0);
        assert_eq!(descriptors.rotatable_bonds, 0.0);
        assert_eq!(descriptors.tpsa, 0.0);
    }

    #[test]
    fn test_non_numeric_field_is_an_error() {
        let result = DescriptorSet::from_json(r#"{"MolWt": "heavy"}"#);
        let err = result.expect_err("Non-numeric descriptor should fail");
        println!("Error: {err:#}");
        assert!(err.to_string().contains("MolWt"));
    }

    #[test]
    fn test_non_object_payload_is_an_error() {
        assert!(DescriptorSet::from_json("[1, 2, 3]").is_err());
        assert!(DescriptorSet::from_json("not json at all").is_err());
    }

    #[test]
    fn test_every_descriptor_has_aliases() {
        for descriptor in DESCRIPTORS {
            assert!(!descriptor.aliases().is_empty(), "{descriptor:?} has no aliases");
            assert!(descriptor.matches_key(descriptor.aliases()[0]));
        }
    }
}
