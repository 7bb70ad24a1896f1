//! Compile f(v) = v^3 over a three-qubit register with weights 2^i, then
//! approximate it under an error budget and inspect the damage.

use rotlut_compiler::RotationSynthesizer;
use rotlut_core::{cost, ControlSet};

fn main() -> rotlut_core::Result<()> {
    let weights: Vec<f64> = (0..3).map(|i| f64::from(1 << i)).collect();
    let mut synth = RotationSynthesizer::new(weights, |v| v * v * v)?;

    println!("Exact table ({} rotations):", synth.table().len());
    print_table(&synth);
    println!(
        "Toffoli count: {}, ancilla count: {}",
        synth.toffoli_count(),
        synth.ancilla_count()
    );
    println!(
        "f(7) via evaluation: {}",
        synth.evaluate(ControlSet::full(3))
    );

    let stats = synth.approximate_to_error(20.0)?;
    println!("\n{}", stats);
    println!("\nApproximate table ({} rotations):", synth.table().len());
    print_table(&synth);
    println!("\n{}", synth.error_statistics());

    Ok(())
}

fn print_table(synth: &RotationSynthesizer) {
    let mut entries: Vec<_> = synth.table().iter().collect();
    entries.sort_by_key(|(controls, _)| (controls.cardinality(), controls.bits()));
    for (controls, angle) in entries {
        println!(
            "  {:>12} -> {:>8.1} (cost {})",
            format!("{}", controls),
            angle,
            cost::toffoli_cost(controls)
        );
    }
}
