use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use esa_dashboard::config::LayoutConfig;
use esa_dashboard::layout::compute_layout;
use esa_dashboard::model::{Esa, parse_esa};
use esa_dashboard::render::render_svg;
use esa_dashboard::theme::Theme;
use std::hint::black_box;

const STATUSES: [&str; 5] = ["NOT_EXISTING", "LOW", "MEDIUM", "HIGH", "EFFECTIVE"];
const MATURITIES: [&str; 6] = [
    "NOT_EXISTING",
    "INITIAL",
    "REPEATABLE",
    "DEFINED",
    "MANAGED",
    "OPTIMISED",
];

/// Synthetic dashboard JSON: `domains` domains with sizes cycling from 1 to
/// `max_components`, plus a spacer every fifth domain.
fn dashboard_source(domains: usize, max_components: usize) -> String {
    let component = |domain: usize, idx: usize| {
        format!(
            "{{\"name\":\"Component {domain}-{idx} with a longer descriptive name\",\"capability\":\"Capability {idx}\",\"status\":\"{}\",\"maturity\":\"{}\",\"initiatives\":{},\"iRag\":\"RAG\"}}",
            STATUSES[(domain + idx) % STATUSES.len()],
            MATURITIES[(domain * 3 + idx) % MATURITIES.len()],
            idx % 4
        )
    };
    let governance: Vec<String> = (0..8).map(|idx| component(0, idx)).collect();
    let mut domain_json = Vec::new();
    for d in 0..domains {
        if d % 5 == 4 {
            domain_json.push("{\"domain\":\"SPACE\"}".to_string());
        }
        let size = d % max_components.max(1) + 1;
        let comps: Vec<String> = (0..size).map(|idx| component(d + 1, idx)).collect();
        domain_json.push(format!(
            "{{\"domain\":\"Domain {d}\",\"icon\":\"d{d}\",\"components\":[{}]}}",
            comps.join(",")
        ));
    }
    format!(
        "{{\"title\":\"Bench\",\"governance\":{{\"title\":\"Governance\",\"components\":[{}]}},\"capabilities\":{{\"title\":\"Capabilities\",\"domains\":[{}]}}}}",
        governance.join(","),
        domain_json.join(",")
    )
}

fn cases() -> Vec<(&'static str, String)> {
    vec![
        ("small", dashboard_source(6, 4)),
        ("medium", dashboard_source(20, 12)),
        ("large", dashboard_source(80, 24)),
    ]
}

fn parse(input: &str) -> Esa {
    parse_esa(input)
        .expect("parse failed")
        .expect("null root")
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    for (name, input) in cases() {
        let esa = parse(&input);
        group.bench_with_input(BenchmarkId::from_parameter(name), &esa, |b, data| {
            b.iter(|| {
                let layout = compute_layout(black_box(data), &config).expect("layout failed");
                black_box(layout.svg_height);
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let theme = Theme::modern();
    let config = LayoutConfig::default();
    for (name, input) in cases() {
        let layout = compute_layout(&parse(&input), &config).expect("layout failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &layout, |b, data| {
            b.iter(|| {
                let svg = render_svg(black_box(data), &theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::modern();
    let config = LayoutConfig::default();
    for (name, input) in cases() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let esa = parse(black_box(data));
                let layout = compute_layout(&esa, &config).expect("layout failed");
                let svg = render_svg(&layout, &theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_layout, bench_render, bench_end_to_end
);
criterion_main!(benches);
