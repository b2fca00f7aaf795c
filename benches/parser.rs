use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use holiya::lexer::Lexer;
use holiya::parser::Parser;

fn parse(source: &str) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty());
    assert!(!program.statements.is_empty());
}

fn long_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("long-expr");

    let mut source = String::from("1");
    for _ in 0..1000 {
        source.push_str(" + 1");
    }
    source.push(';');
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("long-expr", |b| b.iter(|| parse(&source)));
}

fn stress_precedence(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress-precedence");

    let mut source = String::from("1");
    for _ in 0..200 {
        source.push_str(" == 2 < 3 + 5 * 5");
    }
    source.push(';');
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("stress-precedence", |b| b.iter(|| parse(&source)));
}

criterion_group!(benches, long_expr, stress_precedence);
criterion_main!(benches);
