//! Benchmarks for feedback pass stepping.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use feedback_pass::{FeedbackPass, GpuContext, PassConfig, TexelInit, UniformDecl, UniformValue};

const DECAY_SHADER: &str = r#"
@fragment
fn main(@builtin(position) position: vec4<f32>) -> @location(0) vec4<f32> {
    let texel = textureLoad(state, vec2<i32>(position.xy), 0);
    return texel * uniforms.decay;
}
"#;

fn bench_pass_step(c: &mut Criterion) {
    let _ = env_logger::try_init();

    let ctx = match pollster::block_on(GpuContext::new()) {
        Ok(ctx) => ctx,
        Err(_) => {
            eprintln!("Skipping GPU bench: no adapter available");
            return;
        }
    };

    let mut group = c.benchmark_group("pass_step");

    for size in [64, 256, 1024] {
        let config = PassConfig {
            name: "state".to_string(),
            size,
            uniforms: vec![UniformDecl {
                name: "decay".to_string(),
                value: UniformValue::Float(0.99),
            }],
            start_value: TexelInit::Splat(1.0),
        };

        let mut pass = FeedbackPass::new(&ctx, &config, DECAY_SHADER).expect("pass construction");

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| {
                    pass.compute();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pass_step);
criterion_main!(benches);
