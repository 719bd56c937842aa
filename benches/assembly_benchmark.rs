use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regstokes::assembly::{AssemblerOptions, StokesletAssembler};
use regstokes::kernel::panel_blocks;
use regstokes::shapes::regular_icosphere;

pub fn assembly_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");
    group.sample_size(20);

    for factor in [2, 4, 6] {
        let surface = regular_icosphere::<f64>(factor, 1.0).unwrap();
        let mut options = AssemblerOptions::new(1e-6, 1.0).unwrap();
        options.set_batch_size(128).unwrap();
        let assembler = StokesletAssembler::new(options);

        group.bench_function(
            format!(
                "Assembly of {0}x{0} Stokeslet matrix",
                3 * surface.number_of_vertices()
            ),
            |b| b.iter(|| black_box(assembler.assemble(&surface, surface.points()))),
        );
    }
    group.finish();
}

pub fn panel_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("panel");
    group.sample_size(20);

    let surface = regular_icosphere::<f64>(6, 1.0).unwrap();
    let panel = &surface.panels()[0];
    group.bench_function(
        format!("Vertex blocks of one panel at {} points", surface.number_of_vertices()),
        |b| b.iter(|| black_box(panel_blocks(panel, surface.points(), 1e-6))),
    );
    group.finish();
}

criterion_group!(benches, assembly_benchmark, panel_benchmark);
criterion_main!(benches);
