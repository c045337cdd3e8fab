// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_annotated_content(size: usize) -> String {
    let mut content = String::new();
    for i in 0..size {
        content.push_str(&format!(
            "## Section {i}\n\nA claim worth checking [source {i}]{{annotation={i}}} and a plain [link](https://example.com).\n\n- Item with [note]{{draft}} payload\n- Another item\n\n```\n[not a marker]{{annotation=0}}\n```\n\n"
        ));
    }
    content
}

/// Byte ranges covering roughly one screen of `lines` lines each, spread
/// through the document.
#[allow(dead_code)]
pub fn screen_ranges(content: &str, lines: usize) -> Vec<marginalia_engine::Span> {
    let starts: Vec<usize> = std::iter::once(0)
        .chain(content.match_indices('\n').map(|(i, _)| i + 1))
        .collect();
    let mid = starts.len() / 2;
    let end = |from: usize| starts.get(from + lines).copied().unwrap_or(content.len());
    vec![
        marginalia_engine::Span::new(starts[0], end(0)),
        marginalia_engine::Span::new(starts[mid], end(mid)),
    ]
}
