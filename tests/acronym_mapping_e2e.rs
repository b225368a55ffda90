use acronym_uot::{acronym_mapping, AlignmentParams, SIGNIFICANCE_THRESHOLD};

#[test]
fn artificial_intelligence_maps_diagonally() {
    let al = acronym_mapping("Artificial Intelligence", "AI", &AlignmentParams::default()).unwrap();

    assert_eq!(al.phrase, "Artificial Intelligence");
    assert_eq!(al.acronym, "AI");
    assert_eq!(al.source_chars, vec!['A', 'I']);
    assert_eq!(al.target_chars, vec!['A', 'I']);
    assert_eq!(al.plan.dim(), (2, 2));

    let p = &al.plan;
    assert!(p[[0, 0]] > p[[0, 1]], "plan={:?}", p);
    assert!(p[[1, 1]] > p[[1, 0]], "plan={:?}", p);
}

#[test]
fn natural_language_processing_finds_every_letter() {
    let al = acronym_mapping("Natural Language Processing", "NLP", &AlignmentParams::default()).unwrap();

    assert_eq!(al.source_chars, vec!['N', 'L', 'P']);
    assert_eq!(al.target_chars, vec!['N', 'L', 'P']);
    assert_eq!(al.plan.dim(), (3, 3));

    let maps = al.mappings(SIGNIFICANCE_THRESHOLD);
    assert!(maps.len() >= 3, "mappings={:?}", maps);
    for k in 0..3 {
        assert!(
            maps.iter()
                .any(|m| m.source_index == k && m.target_index == k && m.source_char == m.target_char),
            "missing diagonal mapping {k}: {:?}",
            maps
        );
    }
}

#[test]
fn unbalanced_optimal_transport_plan_is_valid() {
    let al = acronym_mapping("Unbalanced Optimal Transport", "UOT", &AlignmentParams::default()).unwrap();

    assert!(al.plan.iter().all(|&p| p >= 0.0));
    let mass = al.total_mass();
    assert!(mass > 0.0 && mass <= 1.0, "mass={}", mass);
}

#[test]
fn mixed_case_acronym_still_matches() {
    let al = acronym_mapping("random access memory", "RAM", &AlignmentParams::default()).unwrap();
    assert_eq!(al.cost[[0, 0]], 0.0);
    assert_eq!(al.cost[[1, 1]], 0.0);
    assert_eq!(al.cost[[2, 2]], 0.0);
    let p = &al.plan;
    for i in 0..3 {
        for j in 0..3 {
            if i != j {
                assert!(p[[i, i]] > p[[i, j]], "row {i}: {:?}", p.row(i));
            }
        }
    }
}

#[test]
fn repeated_calls_are_bit_identical() {
    let params = AlignmentParams::default();
    let first = acronym_mapping("Graphics Processing Unit", "GPU", &params).unwrap();
    let second = acronym_mapping("Graphics Processing Unit", "GPU", &params).unwrap();
    assert_eq!(first.plan, second.plan);
    assert_eq!(first.cost, second.cost);
    assert_eq!(first.total_mass().to_bits(), second.total_mass().to_bits());
}
