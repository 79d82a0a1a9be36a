use std::fmt::Write;

use crate::{Analysis, RuleReport, FAMILIES};

/// Renders the per-family result cards as plain text, one card per family,
/// followed by the final conclusion.
pub fn render_report(report: &RuleReport) -> String {
    let mut out = String::new();
    for family in FAMILIES {
        writeln!(out, "{}", family.name().to_uppercase()).unwrap();
        let passed = report.passed(family);
        if !passed.is_empty() {
            writeln!(out, "  passed: {}", passed.join(", ")).unwrap();
        }
        let failed = report.failed(family);
        if !failed.is_empty() {
            writeln!(out, "  failed: {}", failed.join(", ")).unwrap();
        }
    }
    out.push('\n');
    out.push_str(&render_conclusion(report));
    out
}

/// The final conclusion under the cards: either a clean bill of health or
/// the list of violated families with an optimization warning.
pub fn render_conclusion(report: &RuleReport) -> String {
    if report.is_clean() {
        return "This molecule meets all drug-likeness criteria and is a strong drug candidate!\n"
            .to_string();
    }
    let mut out = String::from("This molecule violates the following drug-likeness rules:\n");
    for family in report.violated_families() {
        writeln!(out, "  - {}", family.name().to_uppercase()).unwrap();
    }
    out.push_str("This molecule may require further optimization for drug development.\n");
    out
}

/// Renders a whole analysis: the submitted SMILES, then the report cards.
pub fn render_analysis(analysis: &Analysis) -> String {
    let mut out = String::new();
    writeln!(out, "SMILES: {}", analysis.smiles).unwrap();
    out.push_str(&render_report(&analysis.report));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluate, DescriptorSet};

    #[test]
    fn test_clean_report_renders_every_card_and_the_conclusion() {
        let descriptors = DescriptorSet {
            molecular_weight: 300.0,
            h_bond_donors: 2.0,
            h_bond_acceptors: 4.0,
            log_p: 2.0,
            rotatable_bonds: 3.0,
            tpsa: 60.0,
        };
        let rendered = render_report(&evaluate(&descriptors));
        println!("{rendered}");

        for family in ["LIPINSKI", "VEBER", "GHOSE", "EGAN"] {
            assert!(rendered.contains(family), "missing {family} card");
        }
        assert!(rendered.contains("meets all drug-likeness criteria"));
        assert!(!rendered.contains("failed:"));
    }

    #[test]
    fn test_render_analysis_leads_with_the_smiles() {
        let descriptors = DescriptorSet {
            molecular_weight: 46.07,
            h_bond_donors: 1.0,
            h_bond_acceptors: 1.0,
            log_p: -0.14,
            rotatable_bonds: 0.0,
            tpsa: 20.23,
        };
        let analysis = crate::Analysis {
            smiles: "CCO".to_string(),
            descriptors,
            report: evaluate(&descriptors),
            depiction: None,
        };
        let rendered = render_analysis(&analysis);
        assert!(rendered.starts_with("SMILES: CCO\n"));
        assert!(rendered.contains("GHOSE"));
    }

    #[test]
    fn test_violations_are_listed_by_family() {
        let descriptors = DescriptorSet {
            molecular_weight: 300.0,
            h_bond_donors: 2.0,
            h_bond_acceptors: 4.0,
            log_p: 2.0,
            rotatable_bonds: 3.0,
            tpsa: 200.0,
        };
        let rendered = render_report(&evaluate(&descriptors));

        assert!(rendered.contains("failed: TPSA too high: 200"));
        assert!(rendered.contains("failed: TPSA out of range: 200"));
        assert!(rendered.contains("  - VEBER"));
        assert!(rendered.contains("  - EGAN"));
        assert!(!rendered.contains("  - LIPINSKI"));
        assert!(rendered.contains("further optimization"));
    }
}
