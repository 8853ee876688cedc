use feynq::algorithms::optimal_iterations;
use feynq::prelude::*;
use std::time::Instant;

const SHOTS: usize = 2000;

fn main() -> feynq::Result<()> {
    println!("Amplitude Amplification");
    println!("=======================");

    println!(
        "{:<8} | {:<10} | {:<10} | {:<12} | {:<10} | {:<12}",
        "Qubits", "Marked", "Iterations", "Top Outcome", "Success", "Time"
    );
    println!("{:-<8}-+-{:-<10}-+-{:-<10}-+-{:-<12}-+-{:-<10}-+-{:-<12}", "", "", "", "", "", "");

    let simulator = Simulator::new(SimulatorConfig::new().with_seed(2024))?;

    for n in 2..=10 {
        let marked = (1usize << n) - 2;
        let circuit = search(n, &[marked])?;
        let expected = format!("{:0width$b}", marked, width = n);

        let start = Instant::now();
        let result = simulator.execute(&circuit, SHOTS)?;
        let duration = start.elapsed();

        let top = result
            .most_common()
            .map(|(bitstring, _)| bitstring.to_string())
            .unwrap_or_default();

        println!(
            "{:<8} | {:<10} | {:<10} | {:<12} | {:<10.4} | {:?}",
            n,
            marked,
            optimal_iterations(n, 1),
            top,
            result.probability(&expected),
            duration
        );
    }
    Ok(())
}
