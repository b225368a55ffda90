//! Word-initial demo: the first letter of each word against the acronym.

use acronym_uot::config::SHORTENING_PAIRS;
use acronym_uot::logging::init_cli_logger;
use acronym_uot::report::{banner, render_mappings};
use acronym_uot::{
    align_word_initials, AlignmentParams, PhrasePair, UnbalancedSinkhorn, SIGNIFICANCE_THRESHOLD,
};
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "acronym-shortening",
    about = "Map the word initials of a phrase onto its acronym with unbalanced optimal transport"
)]
struct Args {
    /// Entropic regularization
    #[arg(long, default_value_t = AlignmentParams::default().reg)]
    reg: f64,

    /// Marginal relaxation (lower destroys more mass)
    #[arg(long = "reg-m", default_value_t = AlignmentParams::default().reg_m)]
    reg_m: f64,

    /// Minimum plan entry reported as a mapping
    #[arg(long, default_value_t = SIGNIFICANCE_THRESHOLD)]
    threshold: f64,

    /// `PHRASE=ACRONYM` to align instead of the built-in examples (repeatable)
    #[arg(long = "pair")]
    pairs: Vec<PhrasePair>,

    /// Log solver progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_cli_logger(args.verbose);

    let params = AlignmentParams::default()
        .with_reg(args.reg)
        .with_reg_m(args.reg_m);
    let pairs = if args.pairs.is_empty() {
        PhrasePair::from_table(&SHORTENING_PAIRS)
    } else {
        args.pairs
    };

    let solver = UnbalancedSinkhorn::default();

    println!(
        "{}",
        banner("Acronym Shortening with Unbalanced Optimal Transport", '=', 60)
    );

    for pair in &pairs {
        let alignment = align_word_initials(&pair.phrase, &pair.acronym, &params, &solver)
            .with_context(|| format!("aligning {pair}"))?;
        println!("{}", render_mappings(&alignment, args.threshold));
        println!("{}", "-".repeat(60));
    }

    Ok(())
}
