//! Instruction-list round trips preserve execution statistics

use feynq::prelude::*;
use feynq::GateMatrix;
use num_complex::Complex64;

const SHOTS: usize = 10_000;

fn sample_circuit() -> Circuit {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    let custom = GateMatrix::from_rows(vec![
        vec![Complex64::new(s, 0.0), Complex64::new(0.0, s)],
        vec![Complex64::new(0.0, s), Complex64::new(s, 0.0)],
    ])
    .unwrap();

    let mut circuit = Circuit::new(3, 3).unwrap();
    circuit
        .ry(0.9, 0)
        .unwrap()
        .unitary(custom, &[1])
        .unwrap()
        .cp(0.35, 0, 1)
        .unwrap()
        .measure(0, 0)
        .unwrap();
    let x = Gate::new(GateKind::X, &[QubitId::new(2)]).unwrap();
    circuit
        .c_if(x, ClassicalCondition::bit(ClbitId::new(0), true))
        .unwrap()
        .ccx(1, 2, 0)
        .unwrap()
        .measure(1, 1)
        .unwrap()
        .measure(2, 2)
        .unwrap();
    circuit
}

/// Two independent runs agree on every outcome within four combined sigmas
fn assert_same_distribution(a: &ExecutionResult, b: &ExecutionResult) {
    let mut outcomes: Vec<&str> = a.sorted().into_iter().map(|(bits, _)| bits).collect();
    outcomes.extend(b.sorted().into_iter().map(|(bits, _)| bits));
    for bits in outcomes {
        let (pa, pb) = (a.probability(bits), b.probability(bits));
        let p = (pa + pb) / 2.0;
        let sigma = (2.0 * p * (1.0 - p) / SHOTS as f64).sqrt();
        assert!(
            (pa - pb).abs() <= 4.0 * sigma + 1e-12,
            "outcome {}: {} vs {}",
            bits,
            pa,
            pb
        );
    }
}

#[test]
fn test_text_roundtrip_preserves_statistics() {
    let original = sample_circuit();
    let restored = Circuit::from_text(&original.to_text()).unwrap();
    assert_eq!(restored.operations(), original.operations());

    let a = original.execute(SHOTS, Some(1)).unwrap();
    let b = restored.execute(SHOTS, Some(2)).unwrap();
    assert_same_distribution(&a, &b);

    // Same seed, same operations: identical counts
    let c = restored.execute(SHOTS, Some(1)).unwrap();
    assert_eq!(a.counts, c.counts);
}

#[test]
fn test_json_roundtrip_preserves_statistics() {
    let original = sample_circuit();
    let restored = Circuit::from_json(&original.to_json().unwrap()).unwrap();
    assert_eq!(restored, original);

    let a = original.execute(SHOTS, Some(3)).unwrap();
    let b = restored.execute(SHOTS, Some(4)).unwrap();
    assert_same_distribution(&a, &b);
}

#[test]
fn test_algorithm_circuits_roundtrip() {
    for circuit in [
        bell_pair().unwrap(),
        qft(4).unwrap(),
        teleportation(0.4, 1.9).unwrap(),
        search(3, &[6]).unwrap(),
    ] {
        let restored = Circuit::from_text(&circuit.to_text()).unwrap();
        assert_eq!(restored.operations(), circuit.operations());
        assert_eq!(restored.num_clbits(), circuit.num_clbits());
    }
}

#[test]
fn test_result_serializes_to_json() {
    let result = bell_pair().unwrap().execute(100, Some(9)).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: ExecutionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.counts, result.counts);
    assert_eq!(back.seed, 9);
}
