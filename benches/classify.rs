use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use eland::model::{Ontology, Term, TypeDef};
use eland::reasoner::classify;

/// A linear is_a chain of `n` terms.
fn chain_ontology(n: usize) -> Ontology {
    let mut ont = Ontology::new();
    for i in 0..n {
        let mut t = Term::new(format!("C:{}", i));
        if i + 1 < n {
            t = t.is_a(format!("C:{}", i + 1));
        }
        ont.terms.push(t);
    }
    ont
}

/// A balanced tree of `n` terms with transitive part links between
/// siblings, exercising the existential and composition rules.
fn tree_ontology(n: usize) -> Ontology {
    let mut ont = Ontology::new().typedef(TypeDef::new("part_of").transitive());
    for i in 0..n {
        let mut t = Term::new(format!("C:{}", i));
        if i > 0 {
            t = t.is_a(format!("C:{}", (i - 1) / 2));
        }
        if i + 1 < n {
            t = t.relationship("part_of", format!("C:{}", i + 1));
        }
        ont.terms.push(t);
    }
    ont
}

fn classify_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for n in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*n as u64));

        group.bench_with_input(BenchmarkId::new("chain", n), n, |b, &n| {
            let ont = chain_ontology(n);
            b.iter(|| classify(&ont).unwrap())
        });
    }

    for n in [100, 1_000].iter() {
        group.throughput(Throughput::Elements(*n as u64));

        group.bench_with_input(BenchmarkId::new("tree", n), n, |b, &n| {
            let ont = tree_ontology(n);
            b.iter(|| classify(&ont).unwrap())
        });
    }

    group.finish();
}

criterion_group!(classify_benches, classify_bench);
criterion_main!(classify_benches);
