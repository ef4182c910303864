use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Generate a synthetic compound table for trying the tool.
///
/// Masses follow a deterministic pattern that clusters some compounds
/// within 0.1 Da of each other, so a pooling run over the demo table
/// produces a realistic mix of Yes and No comparisons.
pub fn run(output: PathBuf, compounds: usize) -> Result<()> {
    info!("masspool demo data generator");
    info!("============================");
    info!("Output: {}", output.display());
    info!("Compounds: {}", compounds);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(&output)
        .with_context(|| format!("Failed to create demo table: {}", output.display()))?;

    writer.write_record(["sample", "Smiles", "ExactMass"])?;

    for i in 0..compounds {
        let id = format!("CMP-{:05}", i + 1);

        // Spread masses over 100-900 Da with a sinusoidal wobble; every
        // 17th compound sits 0.03 Da above its predecessor to seed
        // collision candidates.
        let mass_at = |i: usize| {
            let base = 100.0 + (i as f64 / compounds.max(1) as f64) * 800.0;
            base + (i as f64 * 0.731).sin() * 0.4
        };
        let mass = if i % 17 == 0 && i > 0 {
            mass_at(i - 1) + 0.03
        } else {
            mass_at(i)
        };

        let smiles = mock_smiles(i);
        writer.write_record([id, smiles, format!("{:.4}", mass)])?;
    }

    writer.flush()?;

    info!("Demo table written: {}", output.display());
    info!("Try: masspool pool {} -c 10 -t 0.1", output.display());

    Ok(())
}

/// A plausible-looking SMILES string for row `i`.
fn mock_smiles(i: usize) -> String {
    let backbones = ["CCO", "c1ccccc1", "CC(=O)N", "CCN(CC)CC", "C1CCNCC1", "CC(C)Cc1ccccc1"];
    let backbone = backbones[i % backbones.len()];
    let tail = "C".repeat(i % 4);
    format!("{backbone}{tail}")
}
