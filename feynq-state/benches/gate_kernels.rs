use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use feynq_gates::GateKind;
use feynq_state::{AliasTable, StateVector};
use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn create_random_state(num_qubits: usize, seed: u64) -> StateVector {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let amplitudes: Vec<Complex64> = (0..1usize << num_qubits)
        .map(|_| Complex64::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5))
        .collect();

    let mut state = StateVector::from_amplitudes(amplitudes).unwrap();
    state.normalize();
    state
}

fn bench_single_qubit(c: &mut Criterion) {
    let mut group = c.benchmark_group("hadamard");
    let h = GateKind::H.matrix();

    for num_qubits in [10, 16, 20] {
        group.throughput(Throughput::Elements(1 << num_qubits));
        for parallel in [false, true] {
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(
                BenchmarkId::new(label, format!("{}_qubits", num_qubits)),
                &num_qubits,
                |b, &num_qubits| {
                    let mut state = create_random_state(num_qubits, 42).with_parallelism(parallel);
                    b.iter(|| state.apply_gate(black_box(&h), &[num_qubits / 2], &[]).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn bench_controlled_and_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_qubit");
    let x = GateKind::X.matrix();
    let swap = GateKind::Swap.matrix();
    let num_qubits = 18;
    group.throughput(Throughput::Elements(1 << num_qubits));

    group.bench_function("toffoli", |b| {
        let mut state = create_random_state(num_qubits, 7);
        b.iter(|| state.apply_gate(black_box(&x), &[5], &[0, 11]).unwrap());
    });

    group.bench_function("swap", |b| {
        let mut state = create_random_state(num_qubits, 7);
        b.iter(|| state.apply_gate(black_box(&swap), &[3, 14], &[]).unwrap());
    });

    group.finish();
}

fn bench_measurement(c: &mut Criterion) {
    let mut group = c.benchmark_group("measurement");

    for num_qubits in [10, 16] {
        let state = create_random_state(num_qubits, 42);

        group.bench_with_input(
            BenchmarkId::new("measure_qubit", num_qubits),
            &state,
            |b, state| {
                b.iter(|| {
                    let mut copy = state.clone();
                    copy.measure_qubit(black_box(0), 0.5).unwrap()
                });
            },
        );

        let table = AliasTable::new(&state.probabilities()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        group.bench_function(BenchmarkId::new("alias_sample", num_qubits), |b| {
            b.iter(|| table.sample(|| rng.gen::<f64>()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_qubit, bench_controlled_and_swap, bench_measurement);
criterion_main!(benches);
