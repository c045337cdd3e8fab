//! End-to-end decoration scenarios through the real parser.

use std::cell::RefCell;
use std::rc::Rc;

use insta::assert_snapshot;
use marginalia_engine::{
    AnnotationField, AnnotationOpener, Cmd, DecorationKind, DecorationSet, Document, EditorMode,
    ScanOptions, Selection, Span, UnclosedBrace, ViewState, ViewUpdate, build, invariants,
};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> Document {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    Document::from_text(&md)
}

fn build_with(doc: &Document, selection: &Selection, options: &ScanOptions) -> DecorationSet {
    let visible = [Span::new(0, doc.len())];
    let view = ViewState {
        document: Some(doc),
        visible_ranges: &visible,
        selection: Some(selection),
        mode: EditorMode::LivePreview,
    };
    let set = build(&view, options, None);
    invariants::check(doc.len(), &set);
    set
}

fn describe(doc: &Document, set: &DecorationSet) -> String {
    let mut out = String::new();
    for d in set {
        let kind = match &d.kind {
            DecorationKind::Hide => "hide".to_string(),
            DecorationKind::Widget(w) => format!("widget {}", w.label()),
        };
        out.push_str(&format!("{} {} {:?}\n", d.span, kind, doc.slice(d.span)));
    }
    out
}

#[test]
fn single_marker_with_empty_selection() {
    let doc = fixture("single_marker");
    let set = build_with(&doc, &Selection::cursor(0), &ScanOptions::default());

    assert_snapshot!(describe(&doc, &set), @r#"
    4..5 hide "["
    10..12 hide "]{"
    12..25 widget {3} "annotation=3}"
    "#);
    let (_, widget) = set.widgets().next().unwrap();
    assert_eq!(widget.index(), Some(3));
}

#[test]
fn cursor_inside_payload_leaves_marker_raw() {
    let doc = fixture("single_marker");
    // Inside `{annotation=3}`
    let set = build_with(&doc, &Selection::cursor(15), &ScanOptions::default());
    assert!(set.is_empty());
}

#[test]
fn missing_digits_gives_inert_widget() {
    let doc = Document::from_text("[X]{annotation=}");
    let opened = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&opened);
    let opener: Rc<dyn AnnotationOpener> = Rc::new(move |i: u32| sink.borrow_mut().push(i));

    let visible = [Span::new(0, doc.len())];
    let selection = Selection::cursor(doc.len() + 1);
    let view = ViewState {
        document: Some(&doc),
        visible_ranges: &visible,
        selection: Some(&selection),
        mode: EditorMode::LivePreview,
    };
    let set = build(&view, &ScanOptions::default(), Some(&opener));

    let widgets: Vec<_> = set.widgets().collect();
    assert_eq!(widgets.len(), 1);
    let (span, widget) = widgets[0];
    assert_eq!(span, Span::new(4, 16));
    assert_eq!(widget.index(), None);
    assert_eq!(widget.label(), "{}");
    assert!(!widget.activate());
    assert!(opened.borrow().is_empty());
}

#[test]
fn unclosed_brace_skipped_by_default() {
    let doc = Document::from_text("[X]{oops");
    let set = build_with(&doc, &Selection::cursor(100), &ScanOptions::default());
    assert!(set.is_empty());
}

#[test]
fn unclosed_brace_clamps_to_end_of_document() {
    let doc = Document::from_text("[X]{oops");
    let options = ScanOptions {
        unclosed_brace: UnclosedBrace::ToEndOfDocument,
        ..ScanOptions::default()
    };
    let set = build_with(&doc, &Selection::cursor(100), &options);

    assert_snapshot!(describe(&doc, &set), @r#"
    0..1 hide "["
    2..4 hide "]{"
    4..8 widget {} "oops"
    "#);
}

#[test]
fn selection_on_second_marker_only() {
    let doc = Document::from_text("[one]{annotation=1} and [two]{annotation=2}\n");
    // Select `two`
    let set = build_with(&doc, &Selection::single(25, 28), &ScanOptions::default());

    assert_eq!(set.len(), 3);
    let labels: Vec<_> = set.widgets().map(|(_, w)| w.anchor_text().to_string()).collect();
    assert_eq!(labels, vec!["one"]);
}

#[test]
fn mixed_document() {
    let doc = fixture("mixed");
    let set = build_with(&doc, &Selection::cursor(0), &ScanOptions::default());

    assert_snapshot!(describe(&doc, &set), @r#"
    21..22 hide "["
    33..35 hide "]{"
    35..48 widget {1} "annotation=1}"
    73..74 hide "["
    80..82 hide "]{"
    82..95 widget {2} "annotation=2}"
    122..123 hide "["
    128..130 hide "]{"
    130..143 widget {3} "annotation=3}"
    147..148 hide "["
    157..159 hide "]{"
    159..164 widget {} "note}"
    "#);
}

#[test]
fn mixed_document_with_degenerate_tail() {
    let doc = fixture("mixed");
    let options = ScanOptions {
        unclosed_brace: UnclosedBrace::ToEndOfDocument,
        ..ScanOptions::default()
    };
    let set = build_with(&doc, &Selection::cursor(0), &options);

    let (span, widget) = set.widgets().last().unwrap();
    assert_eq!(span, Span::new(239, doc.len()));
    assert_eq!(widget.index(), Some(4));
    assert_eq!(widget.anchor_text(), "broken");
}

#[test]
fn build_is_idempotent() {
    let doc = fixture("mixed");
    let selection = Selection::single(40, 90);
    let options = ScanOptions::default();
    assert_eq!(
        build_with(&doc, &selection, &options),
        build_with(&doc, &selection, &options)
    );
}

#[test]
fn source_mode_is_always_empty() {
    let doc = fixture("mixed");
    let visible = [Span::new(0, doc.len())];
    let selection = Selection::cursor(0);
    let view = ViewState {
        document: Some(&doc),
        visible_ranges: &visible,
        selection: Some(&selection),
        mode: EditorMode::Source,
    };
    assert!(build(&view, &ScanOptions::default(), None).is_empty());
}

#[test]
fn selection_veto_everywhere() {
    let doc = fixture("mixed");
    let options = ScanOptions::default();
    let all = build_with(&doc, &Selection::cursor(0), &options);
    let marker_spans: Vec<Span> = all.widgets().map(|(span, _)| span).collect();

    // A caret at every offset: no widget may ever sit under or beside it
    for offset in 0..=doc.len() {
        let set = build_with(&doc, &Selection::cursor(offset), &options);
        for (span, _) in set.widgets() {
            assert!(
                !(span.start <= offset && offset <= span.end),
                "widget {span} shown with caret at {offset}"
            );
        }
        assert!(set.widgets().count() >= marker_spans.len() - 1);
    }
}

#[test]
fn editing_through_the_field() {
    let mut doc = fixture("single_marker");
    let mut selection = Selection::cursor(doc.len());
    let visible = [Span::new(0, doc.len())];
    let mut field = AnnotationField::attach(
        ScanOptions::default(),
        None,
        &ViewState {
            document: Some(&doc),
            visible_ranges: &visible,
            selection: Some(&selection),
            mode: EditorMode::LivePreview,
        },
    );
    assert_eq!(field.decorations().len(), 3);

    // Type a second marker at the end
    let cmd = Cmd::InsertText {
        at: doc.len(),
        text: "Also [Other]{annotation=5}\n".to_string(),
    };
    doc.apply(cmd.clone()).unwrap();
    selection = selection.map(&cmd);

    let visible = [Span::new(0, doc.len())];
    let view = ViewState {
        document: Some(&doc),
        visible_ranges: &visible,
        selection: Some(&selection),
        mode: EditorMode::LivePreview,
    };
    assert!(field.update(&view, ViewUpdate::DOC | ViewUpdate::VIEWPORT));
    let indices: Vec<_> = field
        .decorations()
        .widgets()
        .map(|(_, w)| w.index())
        .collect();
    assert_eq!(indices, vec![Some(3), Some(5)]);
    invariants::check(doc.len(), field.decorations());
}
