use chart_axis::api::{AxisPanelConfig, AxisPlacement, AxisSceneBuilder, resolve_axis_layout};
use chart_axis::core::{ClientSize, DiscreteScale, LinearScale, Vec2};
use chart_axis::extensions::ExtensionTable;
use chart_axis::text::HeuristicTextMeasurer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_horizontal_tick_search(c: &mut Criterion) {
    let scale = LinearScale::new(0.0, 123_456.0)
        .and_then(|scale| scale.with_range(0.0, 1_920.0))
        .expect("valid scale");
    let measurer = HeuristicTextMeasurer::new();
    let config = AxisPanelConfig::x_axis();
    let extensions = ExtensionTable::new();
    let client = ClientSize::new(1_920.0, 1_080.0);

    c.bench_function("horizontal_tick_search_1920px", |b| {
        b.iter(|| {
            let _ = resolve_axis_layout(
                black_box(&scale),
                black_box(&measurer),
                black_box(&config),
                black_box(&extensions),
                black_box(client),
            )
            .expect("layout should succeed");
        })
    });
}

fn bench_discrete_scene_1k(c: &mut Criterion) {
    let values: Vec<String> = (0..1_000).map(|i| format!("category {i}")).collect();
    let scale = DiscreteScale::from_values(values)
        .with_range(0.0, 1_920.0)
        .expect("valid scale");
    let measurer = HeuristicTextMeasurer::new();
    let config = AxisPanelConfig::x_axis().with_overlapped_labels_hide(true, 0.2);
    let extensions = ExtensionTable::new();
    let client = ClientSize::new(1_920.0, 1_000.0);
    let layout = resolve_axis_layout(&scale, &measurer, &config, &extensions, client)
        .expect("layout should succeed");
    let placement = AxisPlacement::new(
        Vec2::new(0.0, 1_000.0),
        ClientSize::new(1_920.0, 1_000.0 + layout.info.axis_size),
    );

    c.bench_function("discrete_scene_1k", |b| {
        b.iter(|| {
            let _ = AxisSceneBuilder::new(&layout, &scale, &measurer, &config, &extensions)
                .build(black_box(placement))
                .expect("scene should build");
        })
    });
}

criterion_group!(benches, bench_horizontal_tick_search, bench_discrete_scene_1k);
criterion_main!(benches);
