use feynq::prelude::*;
use std::f64::consts::PI;

const SHOTS: usize = 8192;

fn main() -> feynq::Result<()> {
    println!("Teleportation With Classical Feed-Forward");
    println!("=========================================");

    let simulator = Simulator::new(SimulatorConfig::new().with_seed(11))?;

    println!(
        "{:<8} | {:<10} | {:<12} | {:<12} | {:<10}",
        "Theta", "Expected", "Teleported", "Difference", "Strategy"
    );
    println!("{:-<8}-+-{:-<10}-+-{:-<12}-+-{:-<12}-+-{:-<10}", "", "", "", "", "");

    for step in 0..=8 {
        let theta = PI * step as f64 / 8.0;
        let circuit = teleportation(theta, PI / 3.0)?;
        let result = simulator.execute(&circuit, SHOTS)?;

        // P(1) of Ry(θ)|0⟩ is sin²(θ/2); Rz does not change it
        let expected = (theta / 2.0).sin().powi(2);
        let teleported = result.marginal(2);

        println!(
            "{:<8.4} | {:<10.4} | {:<12.4} | {:<12.4} | {}",
            theta,
            expected,
            teleported,
            (teleported - expected).abs(),
            result.statistics.strategy
        );
    }
    Ok(())
}
