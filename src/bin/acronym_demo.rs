//! Character-level demo: every letter of a phrase against its acronym.
//!
//! Run without arguments for the built-in report, or pass `--pair` to align
//! your own phrases:
//!
//! ```text
//! acronym-demo --pair "Graphics Processing Unit=GPU" --alpha 0.5
//! ```

use acronym_uot::config::{demo_params, DEMO_PAIRS, MASS_SWEEP};
use acronym_uot::logging::init_cli_logger;
use acronym_uot::report::{banner, render_mass_sweep, render_transport};
use acronym_uot::{align_characters, PhrasePair, UnbalancedSinkhorn};
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "acronym-demo",
    about = "Map the characters of a phrase onto its acronym with unbalanced optimal transport"
)]
struct Args {
    /// Entropic regularization
    #[arg(long, default_value_t = demo_params().reg)]
    reg: f64,

    /// Marginal relaxation (lower destroys more mass)
    #[arg(long = "reg-m", default_value_t = demo_params().reg_m)]
    reg_m: f64,

    /// Position weight in [0, 1]; 0 matches characters only
    #[arg(long, default_value_t = demo_params().alpha)]
    alpha: f64,

    /// `PHRASE=ACRONYM` to align instead of the built-in examples (repeatable)
    #[arg(long = "pair")]
    pairs: Vec<PhrasePair>,

    /// `reg_m` values for the mass sweep (repeatable)
    #[arg(long = "sweep")]
    sweep: Vec<f64>,

    /// Log solver progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_cli_logger(args.verbose);

    let params = demo_params()
        .with_reg(args.reg)
        .with_reg_m(args.reg_m)
        .with_alpha(args.alpha);
    let pairs = if args.pairs.is_empty() {
        PhrasePair::from_table(&DEMO_PAIRS)
    } else {
        args.pairs
    };
    let sweep = if args.sweep.is_empty() {
        MASS_SWEEP.to_vec()
    } else {
        args.sweep
    };
    tracing::debug!(?params, pairs = pairs.len(), "starting demo");

    let solver = UnbalancedSinkhorn::default();

    println!(
        "\n{}",
        banner(
            "# DEMONSTRATION: Making Acronyms with Unbalanced Optimal Transport",
            '#',
            70
        )
    );

    for pair in &pairs {
        println!("\n\n>>> Processing: {pair}");
        let alignment = align_characters(&pair.phrase, &pair.acronym, &params, &solver)
            .with_context(|| format!("aligning {pair}"))?;
        println!("{}", render_transport(&alignment));
    }

    let focus = &pairs[0];
    let mut rows = Vec::with_capacity(sweep.len());
    for reg_m in sweep {
        let alignment = align_characters(
            &focus.phrase,
            &focus.acronym,
            &params.with_reg_m(reg_m),
            &solver,
        )
        .with_context(|| format!("aligning {focus} with reg_m={reg_m}"))?;
        rows.push((reg_m, alignment.total_mass()));
    }
    println!("{}", render_mass_sweep(&focus.phrase, &focus.acronym, &rows));

    Ok(())
}
