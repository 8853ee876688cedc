use feynq::prelude::*;

fn main() -> feynq::Result<()> {
    println!("Bell Pair");
    println!("=========");

    let circuit = bell_pair()?;
    println!("{}", circuit);

    let simulator = Simulator::new(SimulatorConfig::new().with_seed(7))?;
    let result = simulator.execute(&circuit, 4096)?;

    println!("{:<10} | {:<8} | {:<10}", "Outcome", "Count", "Frequency");
    println!("{:-<10}-+-{:-<8}-+-{:-<10}", "", "", "");
    for (bitstring, count) in result.sorted() {
        println!(
            "{:<10} | {:<8} | {:.4}",
            bitstring,
            count,
            result.probability(bitstring)
        );
    }

    println!();
    println!("{}", result.statistics);
    Ok(())
}
