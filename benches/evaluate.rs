use criterion::{black_box, criterion_group, criterion_main, Criterion};
use echoclean::{Row, Ruleset};

const SPECIES: &[&str] = &["myoluc", "eptfus", "lasnoc", "lascin", "perimp", "myosep"];

/// Rule rows over three criteria columns. Only the last rule accepts the
/// row from [`data_row`], so every test walks the whole list.
fn rule_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            if i + 1 == n {
                return Row::new()
                    .set("HiF", "any")
                    .set("Qual", "")
                    .set("Species", "not blank")
                    .set("species_out", "fallback");
            }
            Row::new()
                .set("HiF", format!("{}-{}", i * 2, i * 2 + 10))
                .set("Qual", "good, fair")
                .set("Species", format!("not {}", SPECIES[i % SPECIES.len()]))
                .set("species_out", format!("class{i}"))
        })
        .collect()
}

fn data_row() -> Row {
    Row::new()
        .set("HiF", "500")
        .set("Qual", "poor")
        .set("Species", "Myoluc")
}

fn bench_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_test");
    let row = data_row();

    for &n in &[5, 20, 50] {
        let ruleset = Ruleset::build(rule_rows(n), &["species_out"]).unwrap();
        group.bench_function(format!("{n}_rules"), |b| {
            b.iter(|| ruleset.test(black_box(&row)));
        });
        group.bench_function(format!("{n}_rules_detailed"), |b| {
            b.iter(|| ruleset.test_detailed(black_box(&row)));
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let row = data_row();
    c.bench_function("row_normalize", |b| b.iter(|| black_box(&row).normalized()));
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for &n in &[5, 20, 50] {
        let rows = rule_rows(n);
        group.bench_function(format!("{n}_rules"), |b| {
            b.iter(|| black_box(Ruleset::build(rows.clone(), &["species_out"]).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_test, bench_normalize, bench_build);
criterion_main!(benches);
