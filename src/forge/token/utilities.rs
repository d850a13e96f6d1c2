//! Sequence utilities shared by the passes and by consumers of finished trees.
//!
//! Nothing here deletes tokens: trimming hands back a narrower view of a slice, and the
//! sequence merge only regroups.

use super::kind::TokenKind;
use super::tree::Token;
use log::trace;

/// Drop leading whitespace tokens from the view.
pub fn trim_start(tokens: &[Token]) -> &[Token] {
    let start = tokens
        .iter()
        .position(|t| !t.kind().is_whitespace())
        .unwrap_or(tokens.len());
    &tokens[start..]
}

/// Drop trailing whitespace tokens from the view.
pub fn trim_end(tokens: &[Token]) -> &[Token] {
    let end = tokens
        .iter()
        .rposition(|t| !t.kind().is_whitespace())
        .map_or(0, |i| i + 1);
    &tokens[..end]
}

pub fn trim(tokens: &[Token]) -> &[Token] {
    trim_end(trim_start(tokens))
}

/// Wrap every run whose kinds follow `sequence` into one `target` token.
///
/// Whitespace between two elements of the sequence is absorbed into the run; whitespace
/// before the first element is not. Runs do not overlap, and scanning resumes after each one.
pub fn merge_sequence(tokens: Vec<Token>, target: TokenKind, sequence: &[TokenKind]) -> Vec<Token> {
    if sequence.is_empty() {
        return tokens;
    }

    let mut runs = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match sequence_end(&tokens, i, sequence) {
            Some(end) => {
                runs.push(i..end);
                i = end;
            }
            None => i += 1,
        }
    }
    trace!("merge_sequence {:?}: {} run(s)", target, runs.len());

    let mut out = Vec::with_capacity(tokens.len());
    let mut rest = tokens.into_iter().enumerate().peekable();
    for run in runs {
        while let Some((_, token)) = rest.next_if(|(idx, _)| *idx < run.start) {
            out.push(token);
        }
        let children: Vec<Token> = rest
            .by_ref()
            .take(run.len())
            .map(|(_, token)| token)
            .collect();
        out.push(Token::node(target, children));
    }
    out.extend(rest.map(|(_, token)| token));
    out
}

fn sequence_end(tokens: &[Token], start: usize, sequence: &[TokenKind]) -> Option<usize> {
    let mut at = start;
    for (n, expected) in sequence.iter().enumerate() {
        if n > 0 {
            while at < tokens.len() && tokens[at].kind().is_whitespace() {
                at += 1;
            }
        }
        if tokens.get(at)?.kind() != *expected {
            return None;
        }
        at += 1;
    }
    Some(at)
}
