//! Text rendering of alignments.
//!
//! Nothing here computes anything beyond sums and orderings; every function
//! returns a `String` so callers decide where it goes.

use crate::alignment::Alignment;
use crate::text::SourcePolicy;
use ndarray::Array2;

/// Plan entries at or below this are treated as no mass at all.
pub const NEGLIGIBLE_MASS: f64 = 1e-6;

/// How many sources are listed per acronym character.
pub const TOP_CONTRIBUTORS: usize = 5;

const WIDE: usize = 60;

/// The `limit` largest entries of `plan[.., column]`, largest first, dropping
/// anything at or below [`NEGLIGIBLE_MASS`].
///
/// Equal contributions keep source order.
pub fn top_contributors(plan: &Array2<f64>, column: usize, limit: usize) -> Vec<(usize, f64)> {
    let col = plan.column(column);
    let mut order: Vec<usize> = (0..col.len()).collect();
    order.sort_by(|&x, &y| col[y].total_cmp(&col[x]));
    order
        .into_iter()
        .take(limit)
        .map(|i| (i, col[i]))
        .filter(|&(_, w)| w > NEGLIGIBLE_MASS)
        .collect()
}

/// A three-line banner: rule, title, rule.
pub fn banner(title: &str, fill: char, width: usize) -> String {
    let rule: String = std::iter::repeat(fill).take(width).collect();
    format!("{rule}\n{title}\n{rule}")
}

/// Bracketed row-per-line rendering of a plan.
pub fn format_matrix(plan: &Array2<f64>) -> String {
    let rows: Vec<String> = plan
        .rows()
        .into_iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|x| format!("{x:.6}")).collect();
            format!("[{}]", cells.join(" "))
        })
        .collect();
    format!("[{}]", rows.join("\n "))
}

/// Per-character breakdown of an alignment.
///
/// Sections, in order: header, phrase/acronym echo, total mass, top
/// contributors per acronym character, destinations per phrase character,
/// footer.
pub fn render_transport(alignment: &Alignment) -> String {
    let plan = &alignment.plan;
    let source = &alignment.source_chars;
    let target = &alignment.target_chars;
    let thin = "-".repeat(WIDE);

    let mut lines = vec![banner(
        "Unbalanced Optimal Transport: Phrase to Acronym",
        '=',
        WIDE,
    )];
    lines.push(format!("\nPhrase:  '{}'", alignment.source_text()));
    lines.push(format!("Acronym: '{}'", alignment.acronym));
    lines.push(format!(
        "\nTotal transported mass: {:.4}",
        alignment.total_mass()
    ));

    lines.push(format!("\n{thin}"));
    lines.push("Transport Plan (top contributions per acronym character):".to_string());
    lines.push(thin.clone());

    for (j, &acr) in target.iter().enumerate() {
        lines.push(format!("\n'{acr}' receives mass from:"));
        for (i, w) in top_contributors(plan, j, TOP_CONTRIBUTORS) {
            lines.push(format!("  '{}' (position {}): {:.4}", source[i], i, w));
        }
    }

    lines.push(format!("\n{thin}"));
    lines.push("Per-character contribution summary:".to_string());
    lines.push(thin);

    for (i, &ch) in source.iter().enumerate() {
        let row = plan.row(i);
        if row.sum() <= NEGLIGIBLE_MASS {
            continue;
        }
        let destinations: Vec<String> = row
            .iter()
            .zip(target.iter())
            .filter(|&(&w, _)| w > NEGLIGIBLE_MASS)
            .map(|(&w, &acr)| format!("{acr}({w:.3})"))
            .collect();
        if !destinations.is_empty() {
            lines.push(format!("  '{ch}' (pos {i:2}) -> {}", destinations.join(", ")));
        }
    }

    lines.push(format!("\n{}", "=".repeat(WIDE)));
    lines.join("\n")
}

/// Plan matrix plus the mappings above `threshold`, numbered from 1.
pub fn render_mappings(alignment: &Alignment, threshold: f64) -> String {
    let (source_label, unit, arrow) = match alignment.policy {
        SourcePolicy::WordInitials => ("word starters", "word", "word starters -> acronym"),
        SourcePolicy::Characters => ("phrase characters", "char", "phrase characters -> acronym"),
    };

    let mut lines = vec![
        format!("\nPhrase: '{}'", alignment.phrase),
        format!("Acronym: '{}'", alignment.acronym),
        format!("Source characters ({source_label}): {:?}", alignment.source_chars),
        format!("Target characters (acronym): {:?}", alignment.target_chars),
        format!("\nTransport Plan ({arrow}):"),
        format_matrix(&alignment.plan),
        "\nSignificant Mappings:".to_string(),
    ];
    for m in alignment.mappings(threshold) {
        lines.push(format!(
            "  '{}' ({unit} {}) -> '{}' (pos {}): {:.4}",
            m.source_char,
            m.source_index + 1,
            m.target_char,
            m.target_index + 1,
            m.weight
        ));
    }
    lines.join("\n")
}

/// Total mass per `reg_m` for one pair: `(reg_m, mass)` rows.
pub fn render_mass_sweep(phrase: &str, acronym: &str, rows: &[(f64, f64)]) -> String {
    let mut lines = vec![
        format!(
            "\n\n{}",
            banner("# EFFECT OF MARGINAL RELAXATION (reg_m) PARAMETER", '#', 70)
        ),
        format!("\n'{phrase}' -> '{acronym}'"),
    ];
    for &(reg_m, mass) in rows {
        lines.push(format!(
            "\nreg_m = {reg_m:?}: Total mass transported = {mass:.4}"
        ));
        lines.push("  (Lower reg_m allows more mass imbalance, less mass is transported)".to_string());
    }
    lines.join("\n")
}
