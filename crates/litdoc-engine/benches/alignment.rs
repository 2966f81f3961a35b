use criterion::{Criterion, criterion_group, criterion_main};
use litdoc_engine::{
    HighlightError, Highlighter, Location, NodeKind, PlainHighlighter, RawComment, SourceModel,
    SyntaxNode,
};

struct Identity;

impl Highlighter for Identity {
    fn highlight(&self, _language: &str, code: &str) -> Result<String, HighlightError> {
        Ok(code.to_string())
    }
}

/// `statements` blocks of an own-line comment followed by a call with an
/// inline comment, plus the matching tree.
fn generate_commented_source(statements: usize) -> (String, SyntaxNode) {
    let mut source = String::new();
    let mut children = Vec::with_capacity(statements);

    for i in 0..statements {
        let line = i * 2 + 1;
        let heading = format!("// step {i} does something");
        let call = format!("step{i}(value);");
        let inline = "//inline note";
        source.push_str(&heading);
        source.push('\n');
        source.push_str(&call);
        source.push(' ');
        source.push_str(inline);
        source.push('\n');

        let inline_start = call.len() + 1;
        children.push(
            SyntaxNode::new(
                NodeKind::ExpressionStatement,
                Location::new(line + 1, 0, line + 1, call.len()),
            )
            .with_leading(vec![RawComment::new(
                &heading[2..],
                Location::new(line, 0, line, heading.len()),
            )])
            .with_trailing(vec![RawComment::new(
                &inline[2..],
                Location::new(line + 1, inline_start, line + 1, inline_start + inline.len()),
            )]),
        );
    }

    let tree = SyntaxNode::new(NodeKind::Program, Location::new(1, 0, statements * 2 + 1, 0))
        .with_children(children);
    (source, tree)
}

fn bench_source_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("alignment");
    group.sample_size(10);

    let (source, tree) = generate_commented_source(1000);

    group.bench_function("build_identity", |b| {
        b.iter(|| {
            let doc = SourceModel::new(std::hint::black_box(&source))
                .build(&tree, "javascript", &Identity)
                .unwrap();
            std::hint::black_box(doc);
        });
    });

    group.bench_function("build_plain", |b| {
        b.iter(|| {
            let doc = SourceModel::new(std::hint::black_box(&source))
                .build(&tree, "javascript", &PlainHighlighter)
                .unwrap();
            std::hint::black_box(doc);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_source_model);
criterion_main!(benches);
