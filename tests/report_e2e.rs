use acronym_uot::config::demo_params;
use acronym_uot::report::{render_mappings, render_transport};
use acronym_uot::{acronym_mapping, phrase_to_acronym, AlignmentParams, SIGNIFICANCE_THRESHOLD};

#[test]
fn transport_report_for_uot() {
    let al = phrase_to_acronym("Unbalanced Optimal Transport", "UOT", &demo_params()).unwrap();
    let text = render_transport(&al);

    assert!(text.starts_with(&"=".repeat(60)));
    assert!(text.ends_with(&"=".repeat(60)));
    assert!(text.contains("Phrase:  'UnbalancedOptimalTransport'"));
    assert!(text.contains("Acronym: 'UOT'"));
    assert!(text.contains(&format!("Total transported mass: {:.4}", al.total_mass())));
    assert!(text.contains("'U' receives mass from:\n  'U' (position 0): "));

    // Sections appear in order.
    let plan_at = text.find("Transport Plan (top contributions").unwrap();
    let summary_at = text.find("Per-character contribution summary:").unwrap();
    assert!(plan_at < summary_at);

    // At most five contributors per acronym character.
    for block in text[plan_at..summary_at].split("receives mass from:").skip(1) {
        let listed = block
            .lines()
            .filter(|l| l.trim_start().starts_with('\'') && l.contains("(position "))
            .count();
        assert!(listed <= 5, "block={block}");
    }
}

#[test]
fn mapping_report_for_nlp() {
    let al = acronym_mapping("Natural Language Processing", "NLP", &AlignmentParams::default()).unwrap();
    let text = render_mappings(&al, SIGNIFICANCE_THRESHOLD);

    assert!(text.contains("Phrase: 'Natural Language Processing'"));
    assert!(text.contains("Source characters (word starters): ['N', 'L', 'P']"));
    assert!(text.contains("Transport Plan (word starters -> acronym):"));
    assert!(text.contains("  'N' (word 1) -> 'N' (pos 1): "));
    assert!(text.contains("  'L' (word 2) -> 'L' (pos 2): "));
    assert!(text.contains("  'P' (word 3) -> 'P' (pos 3): "));
}
