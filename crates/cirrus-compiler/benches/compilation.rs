//! Service compilation benchmarks.
//!
//! Measures the cost of compiling service descriptions with varying numbers
//! of functions, including YAML parsing and template serialization.
//!
//! Run with: cargo bench -p cirrus-compiler --bench compilation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cirrus_compiler::{compile, ServiceConfig};

/// Generate a service YAML with N functions, alternating http and event triggers.
fn generate_service(function_count: usize) -> String {
    let mut yaml = String::from(
        r#"service: bench
provider:
  name: google
  region: us-central1
  runtime: nodejs10
  deploymentBucketName: bench-bucket
  environment:
    SHARED: "1"
  labels:
    team: bench
package:
  artifact: .serverless/bench.zip
  artifactDirectoryName: serverless/bench/dev
functions:
"#,
    );

    for i in 0..function_count {
        if i % 2 == 0 {
            yaml.push_str(&format!(
                r#"  fn{i}:
    handler: handler{i}
    memorySize: 512
    environment:
      INDEX: "{i}"
    events:
      - http: /fn{i}
"#
            ));
        } else {
            yaml.push_str(&format!(
                r#"  fn{i}:
    handler: handler{i}
    events:
      - event:
          eventType: providers/cloud.pubsub/eventTypes/topic.publish
          resource: projects/bench/topics/topic{i}
"#
            ));
        }
    }

    yaml
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for count in [1, 10, 100, 1000] {
        let config = ServiceConfig::parse(&generate_service(count))
            .expect("generated service should parse");

        group.bench_with_input(BenchmarkId::new("functions", count), &config, |b, config| {
            b.iter(|| compile(black_box(config)).expect("compile"))
        });
    }

    group.finish();
}

fn bench_parse_and_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");

    for count in [10, 100] {
        let yaml = generate_service(count);

        group.bench_with_input(BenchmarkId::new("functions", count), &yaml, |b, yaml| {
            b.iter(|| {
                let config = ServiceConfig::parse(black_box(yaml)).expect("parse");
                let compilation = compile(&config).expect("compile");
                compilation.template.to_yaml().expect("serialize")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_parse_and_serialize);
criterion_main!(benches);
