use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use crate::{Descriptor, DescriptorSet};

/// The four drug-likeness rule families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Lipinski,
    Veber,
    Ghose,
    Egan,
}

/// All families, in report order.
pub const FAMILIES: [Family; 4] = [Family::Lipinski, Family::Veber, Family::Ghose, Family::Egan];

impl Family {
    pub fn name(&self) -> &'static str {
        match self {
            Family::Lipinski => "lipinski",
            Family::Veber => "veber",
            Family::Ghose => "ghose",
            Family::Egan => "egan",
        }
    }
}

impl Display for Family {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

/// The acceptable values for one check.
///
/// Limits are inclusive everywhere: a value sitting exactly on a limit
/// passes, and a check fails only when the value is strictly beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    /// Fails when the value is strictly above the limit.
    AtMost(f64),
    /// Fails when the value is strictly outside the closed range.
    Within(f64, f64),
}

impl Threshold {
    pub fn allows(&self, value: f64) -> bool {
        match *self {
            Threshold::AtMost(max) => value <= max,
            Threshold::Within(lo, hi) => value >= lo && value <= hi,
        }
    }
}

/// One row of the rule table.
struct CheckSpec {
    family: Family,
    descriptor: Descriptor,
    threshold: Threshold,
}

/// The full rule table, in the fixed order findings are reported in.
const CHECKS: &[CheckSpec] = &[
    // Lipinski Rule of 5
    CheckSpec {
        family: Family::Lipinski,
        descriptor: Descriptor::HBondDonors,
        threshold: Threshold::AtMost(5.0),
    },
    CheckSpec {
        family: Family::Lipinski,
        descriptor: Descriptor::HBondAcceptors,
        threshold: Threshold::AtMost(10.0),
    },
    CheckSpec {
        family: Family::Lipinski,
        descriptor: Descriptor::MolecularWeight,
        threshold: Threshold::AtMost(500.0),
    },
    CheckSpec {
        family: Family::Lipinski,
        descriptor: Descriptor::LogP,
        threshold: Threshold::AtMost(5.0),
    },
    // Veber Rule
    CheckSpec {
        family: Family::Veber,
        descriptor: Descriptor::RotatableBonds,
        threshold: Threshold::AtMost(10.0),
    },
    CheckSpec {
        family: Family::Veber,
        descriptor: Descriptor::Tpsa,
        threshold: Threshold::AtMost(140.0),
    },
    // Ghose Filter
    CheckSpec {
        family: Family::Ghose,
        descriptor: Descriptor::MolecularWeight,
        threshold: Threshold::Within(160.0, 480.0),
    },
    CheckSpec {
        family: Family::Ghose,
        descriptor: Descriptor::LogP,
        threshold: Threshold::Within(-0.4, 5.6),
    },
    CheckSpec {
        family: Family::Ghose,
        descriptor: Descriptor::RotatableBonds,
        threshold: Threshold::AtMost(15.0),
    },
    // Egan Rule
    CheckSpec {
        family: Family::Egan,
        descriptor: Descriptor::MolecularWeight,
        threshold: Threshold::Within(130.0, 500.0),
    },
    CheckSpec {
        family: Family::Egan,
        descriptor: Descriptor::LogP,
        threshold: Threshold::Within(-1.0, 5.0),
    },
    CheckSpec {
        family: Family::Egan,
        descriptor: Descriptor::Tpsa,
        threshold: Threshold::Within(20.0, 150.0),
    },
];

/// The outcome of a single check: which family and descriptor it covers, the
/// observed value, the threshold it was held against, and whether it passed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Finding {
    pub family: Family,
    pub descriptor: Descriptor,
    pub value: f64,
    pub threshold: Threshold,
    pub passed: bool,
}

impl Finding {
    /// Render the human-readable message for this finding.
    ///
    /// Capped checks report "too high"/"Too many"; ranged checks report
    /// "out of range" and abbreviate molecular weight to "MW".
    pub fn message(&self) -> String {
        use Descriptor::*;
        match (self.descriptor, self.threshold, self.passed) {
            (HBondDonors, _, true) => format!("H-bond donors: {}", self.value),
            (HBondDonors, _, false) => format!("Too many H-bond donors: {}", self.value),
            (HBondAcceptors, _, true) => format!("H-bond acceptors: {}", self.value),
            (HBondAcceptors, _, false) => format!("Too many H-bond acceptors: {}", self.value),
            (MolecularWeight, Threshold::AtMost(_), true) => {
                format!("Molecular weight: {}", self.value)
            }
            (MolecularWeight, Threshold::AtMost(_), false) => {
                format!("Molecular weight too high: {}", self.value)
            }
            (MolecularWeight, Threshold::Within(..), true) => format!("MW: {}", self.value),
            (MolecularWeight, Threshold::Within(..), false) => {
                format!("MW out of range: {}", self.value)
            }
            (LogP, Threshold::AtMost(_), false) => format!("LogP too high: {}", self.value),
            (LogP, Threshold::Within(..), false) => format!("LogP out of range: {}", self.value),
            (LogP, _, true) => format!("LogP: {}", self.value),
            (RotatableBonds, _, true) => format!("Rotatable bonds: {}", self.value),
            (RotatableBonds, _, false) => format!("Too many rotatable bonds: {}", self.value),
            (Tpsa, Threshold::AtMost(_), false) => format!("TPSA too high: {}", self.value),
            (Tpsa, Threshold::Within(..), false) => format!("TPSA out of range: {}", self.value),
            (Tpsa, _, true) => format!("TPSA: {}", self.value),
        }
    }
}

impl Display for Finding {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.message())
    }
}

/// A full evaluation of one descriptor set against every rule family.
///
/// Immutable once produced. Every check in the rule table contributes exactly
/// one finding, so the per-family passed and failed sequences always
/// partition that family's checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleReport {
    findings: Vec<Finding>,
}

impl RuleReport {
    /// All findings, in rule-table order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// The findings for one family, in check order.
    pub fn family(&self, family: Family) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.family == family)
    }

    /// Rendered messages for the family's passing checks, in check order.
    pub fn passed(&self, family: Family) -> Vec<String> {
        self.family(family)
            .filter(|f| f.passed)
            .map(Finding::message)
            .collect()
    }

    /// Rendered messages for the family's failing checks, in check order.
    pub fn failed(&self, family: Family) -> Vec<String> {
        self.family(family)
            .filter(|f| !f.passed)
            .map(Finding::message)
            .collect()
    }

    /// True when every check in every family passed.
    pub fn is_clean(&self) -> bool {
        self.findings.iter().all(|f| f.passed)
    }

    /// Families with at least one failed check, in report order.
    pub fn violated_families(&self) -> Vec<Family> {
        FAMILIES
            .iter()
            .copied()
            .filter(|family| self.family(*family).any(|f| !f.passed))
            .collect()
    }

    /// Total number of failed checks across all families.
    pub fn violations(&self) -> usize {
        self.findings.iter().filter(|f| !f.passed).count()
    }
}

/// Evaluates a molecule's descriptors against all four rule families.
///
/// Pure and total over any numeric input: no side effects, and a fresh
/// report is allocated per call, so this is safe to invoke repeatedly or
/// concurrently.
pub fn evaluate(descriptors: &DescriptorSet) -> RuleReport {
    let findings = CHECKS
        .iter()
        .map(|check| {
            let value = descriptors.get(check.descriptor);
            Finding {
                family: check.family,
                descriptor: check.descriptor,
                value,
                threshold: check.threshold,
                passed: check.threshold.allows(value),
            }
        })
        .collect();
    RuleReport { findings }
}
