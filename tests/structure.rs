//! Group, call and loop discovery over full pipelines.

use rstest::rstest;
use tokenforge::forge::config::load_defaults;
use tokenforge::forge::error::StructureError;
use tokenforge::forge::testing::assert_token;
use tokenforge::forge::token::{detokenize, to_treeviz, TokenKind};
use tokenforge::forge::transforms::calls::CallView;
use tokenforge::forge::transforms::standard::{pipeline_from_config, GROUPING, STRUCTURING};
use tokenforge::forge::transforms::TransformError;

#[test]
fn test_balanced_groups() {
    let root = GROUPING.run("(a,(b,c))".to_string()).unwrap();
    assert_token(&root).child_count(1).child(0, |outer| {
        outer
            .kind(TokenKind::ParenthesisGroup)
            .child_kinds(&[
                TokenKind::LeftParenthesis,
                TokenKind::Word,
                TokenKind::Comma,
                TokenKind::ParenthesisGroup,
                TokenKind::RightParenthesis,
            ])
            .child(3, |inner| {
                inner.text("(b,c)").child_count(5);
            });
    });
}

#[test]
fn test_missing_close_is_an_error() {
    let err = GROUPING.run("(a,(b,c)".to_string()).unwrap_err();
    assert_eq!(
        err,
        TransformError::Structure(StructureError::UnmatchedOpen {
            delimiter: TokenKind::LeftParenthesis,
            span: 0..1
        })
    );
}

#[rstest]
#[case("a]", 1..2)]
#[case("{x}}", 3..4)]
#[case("|>", 0..2)]
fn test_stray_close(#[case] source: &str, #[case] span: std::ops::Range<usize>) {
    match GROUPING.run(source.to_string()) {
        Err(TransformError::Structure(err @ StructureError::UnmatchedClose { .. })) => {
            assert_eq!(err.span(), span)
        }
        other => panic!(
            "expected an unmatched close, got {:?}",
            other.map(|root| root.text().into_owned())
        ),
    }
}

#[test]
fn test_nested_calls() {
    let root = STRUCTURING.run("f(a,g(c,d))".to_string()).unwrap();
    let f = CallView::new(&root.children()[0]).unwrap();
    assert_eq!(f.name(), "f");
    let params = &f.parameter_lists()[0];
    assert_eq!(params.len(), 2);
    assert_eq!(detokenize(params[0]), "a");

    let g = CallView::new(&params[1][0]).unwrap();
    assert_eq!(g.name(), "g");
    let inner: Vec<String> = g.parameter_lists()[0]
        .iter()
        .map(|p| detokenize(p))
        .collect();
    assert_eq!(inner, vec!["c", "d"]);
}

#[test]
fn test_sequence_call_with_two_parameter_lists() {
    let root = STRUCTURING.run("S[2,3](4)".to_string()).unwrap();
    assert_token(&root).child_count(1).child(0, |call| {
        call.kind(TokenKind::SequenceCall).child_kinds(&[
            TokenKind::Word,
            TokenKind::SquareBracketsGroup,
            TokenKind::ParenthesisGroup,
        ]);
    });
    let call = CallView::new(&root.children()[0]).unwrap();
    let lists: Vec<Vec<String>> = call
        .parameter_lists()
        .iter()
        .map(|list| list.iter().map(|p| detokenize(p)).collect())
        .collect();
    assert_eq!(lists, vec![vec!["2", "3"], vec!["4"]]);
}

#[test]
fn test_reserved_word_is_not_a_call() {
    // "when" is on the default ignore list; "When" matches it case-insensitively.
    let pipeline = pipeline_from_config(&load_defaults().unwrap());
    let root = pipeline.run("When(x) then(x)".to_string()).unwrap();
    assert_token(&root).child_kinds(&[
        TokenKind::Word,
        TokenKind::ParenthesisGroup,
        TokenKind::Spaces,
        TokenKind::ParenthesisCall,
    ]);
}

#[test]
fn test_loop_with_call_in_body() {
    let root = STRUCTURING
        .run("sum = loop w(k) * x[k] over k".to_string())
        .unwrap();
    assert_token(&root)
        .contains_kind(TokenKind::LoopBody)
        .child(4, |body| {
            body.kind(TokenKind::LoopBody)
                .child(1, |expression| {
                    expression
                        .kind(TokenKind::LoopExpression)
                        .contains_kind(TokenKind::ParenthesisCall)
                        .contains_kind(TokenKind::SequenceCall);
                })
                .child(4, |variable| {
                    variable.kind(TokenKind::Word).text("k");
                });
        });
}

#[test]
fn test_malformed_loops() {
    assert!(matches!(
        STRUCTURING.run("x over k".to_string()),
        Err(TransformError::Structure(StructureError::BindingOutsideLoop { .. }))
    ));
    assert!(matches!(
        STRUCTURING.run("loop x over 2".to_string()),
        Err(TransformError::Structure(StructureError::MissingLoopVariable { .. }))
    ));
}

#[test]
fn test_call_treeviz() {
    let root = STRUCTURING.run("f(a)".to_string()).unwrap();
    insta::assert_snapshot!(to_treeviz(&root).trim_end(), @r###"
    ⧉ Root f(a)
    └─ ƒ ParenthesisCall f(a)
      ├─ ◦ Word "f"
      └─ ⊂ ParenthesisGroup (a)
        ├─ ◦ LeftParenthesis "("
        ├─ • Parameter a
        │ └─ ◦ Word "a"
        └─ ◦ RightParenthesis ")"
    "###);
}

#[test]
fn test_loop_treeviz() {
    let root = STRUCTURING.run("loop |v| over v".to_string()).unwrap();
    let treeviz = to_treeviz(&root);
    let rendered: Vec<&str> = treeviz.lines().map(str::trim_end).collect();
    insta::assert_snapshot!(rendered.join("\n"), @r###"
    ⧉ Root loop |v| over v
    └─ ↻ LoopBody loop |v| over v
      ├─ ≡ LoopKeyword loop
      ├─ ↻ LoopExpression  |v|
      │ ├─ ◦ Spaces " "
      │ ├─ ⊂ AbsoluteGroup |v|
      │ │ ├─ ◦ Pipe "|"
      │ │ ├─ ◦ Word "v"
      │ │ └─ ◦ Pipe "|"
      │ └─ ◦ Spaces " "
      ├─ ≡ BindingKeyword over
      ├─ ◦ Spaces " "
      └─ ◦ Word "v"
    "###);
}
