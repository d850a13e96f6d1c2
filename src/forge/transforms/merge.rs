//! Merge engine
//!
//! `merge(tokens, kind)` scans one level of a token sequence left to right and collapses
//! every run of adjacent tokens whose combined text satisfies `kind`'s pattern into a single
//! token of that kind. Tokens outside any run pass through untouched, and finding no run at
//! all is simply "no rewrite".
//!
//! How runs are chosen
//!
//!     Exact patterns match one token whose text is the literal.
//!
//!     Regex patterns are first searched, anchored, for their longest match over the remaining
//!     text of the level. No longer run can match, so only token boundaries inside that match
//!     are candidate ends. Continuous patterns take the longest candidate that matches as a
//!     whole (maximal munch), the others the shortest. Guard literals are checked on the
//!     boundary tokens before the expression.
//!
//!     With `continue_after_success`, a matched run keeps being extended by further matches
//!     from the same start before scanning moves on.
//!
//! How runs are rebuilt
//!
//!     A run of one token is reclassified in place. A longer run becomes the children of a
//!     new node; if it starts with a node of the same kind, that node's children are spliced
//!     in so growth never double-wraps. A lone token already of the target kind never forms
//!     a run, which makes merging idempotent.
//!
//! The engine defines no priority between kinds. Callers apply kinds in an order of their
//! choosing; see [`STANDARD_MERGE_ORDER`](crate::forge::transforms::standard::STANDARD_MERGE_ORDER).

use crate::forge::patterns::{pattern_for, Pattern};
use crate::forge::token::{Token, TokenKind};
use log::{debug, trace};
use std::ops::Range;

/// Merge runs matching `kind`'s registered pattern.
pub fn merge(tokens: Vec<Token>, kind: TokenKind) -> Vec<Token> {
    match pattern_for(kind) {
        Some(pattern) => merge_with(tokens, kind, pattern),
        None => {
            debug!("merge: {:?} has no pattern, sequence unchanged", kind);
            tokens
        }
    }
}

/// Apply [`merge`] once per kind, in the given order.
pub fn merge_all(tokens: Vec<Token>, order: &[TokenKind]) -> Vec<Token> {
    order.iter().fold(tokens, |tokens, &kind| merge(tokens, kind))
}

/// Merge runs matching `pattern` into tokens of `kind`.
pub fn merge_with(tokens: Vec<Token>, kind: TokenKind, pattern: &Pattern) -> Vec<Token> {
    let level = Level::new(&tokens);
    let runs = find_runs(&tokens, &level, kind, pattern);
    debug!(
        "merge {:?}: {} run(s) over {} token(s)",
        kind,
        runs.len(),
        tokens.len()
    );
    if runs.is_empty() {
        return tokens;
    }
    for run in &runs {
        trace!("merge {:?}: {:?} {:?}", kind, run, level.slice(run.clone()));
    }
    assemble(tokens, runs, kind)
}

/// The concatenated text of one level, with the byte offset of every token boundary.
struct Level {
    text: String,
    bounds: Vec<usize>,
}

impl Level {
    fn new(tokens: &[Token]) -> Self {
        let mut text = String::new();
        let mut bounds = Vec::with_capacity(tokens.len() + 1);
        bounds.push(0);
        for token in tokens {
            token.write_text(&mut text);
            bounds.push(text.len());
        }
        Level { text, bounds }
    }

    fn slice(&self, run: Range<usize>) -> &str {
        &self.text[self.bounds[run.start]..self.bounds[run.end]]
    }

    fn rest(&self, from: usize) -> &str {
        &self.text[self.bounds[from]..]
    }

    /// The last token boundary at most `len` bytes past the start of token `from`.
    fn last_end_within(&self, from: usize, len: usize) -> usize {
        let limit = self.bounds[from] + len;
        self.bounds.partition_point(|&b| b <= limit) - 1
    }
}

fn find_runs(
    tokens: &[Token],
    level: &Level,
    kind: TokenKind,
    pattern: &Pattern,
) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match match_at(tokens, level, i, kind, pattern) {
            Some(end) => {
                runs.push(i..end);
                i = end;
            }
            None => i += 1,
        }
    }
    runs
}

fn match_at(
    tokens: &[Token],
    level: &Level,
    start: usize,
    kind: TokenKind,
    pattern: &Pattern,
) -> Option<usize> {
    let mut end = match_from(tokens, level, start, start + 1, kind, pattern)?;
    if pattern.continues_after_success() {
        while let Some(next) = match_from(tokens, level, start, end + 1, kind, pattern) {
            end = next;
        }
    }
    Some(end)
}

/// End of a run starting at `start` and ending at `min_end` or later.
fn match_from(
    tokens: &[Token],
    level: &Level,
    start: usize,
    min_end: usize,
    kind: TokenKind,
    pattern: &Pattern,
) -> Option<usize> {
    if min_end > tokens.len() || !pattern.admits_first(&tokens[start]) {
        return None;
    }

    if let Some(literal) = pattern.exact() {
        let token = &tokens[start];
        let hit = min_end == start + 1 && token.kind() != kind && token.text_is(literal);
        return hit.then_some(start + 1);
    }

    let lead = pattern.longest_lead(level.rest(start))?;
    let max_end = level.last_end_within(start, lead);
    if max_end < min_end {
        return None;
    }

    let viable = |end: usize| {
        let already_merged = end == start + 1 && tokens[start].kind() == kind;
        !already_merged
            && pattern.admits_last(&tokens[end - 1])
            && pattern.matches(level.slice(start..end))
    };
    if pattern.is_continuous() {
        (min_end..=max_end).rev().find(|&end| viable(end))
    } else {
        (min_end..=max_end).find(|&end| viable(end))
    }
}

fn assemble(tokens: Vec<Token>, runs: Vec<Range<usize>>, kind: TokenKind) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut rest = tokens.into_iter().enumerate().peekable();
    for run in runs {
        while let Some((_, token)) = rest.next_if(|(i, _)| *i < run.start) {
            out.push(token);
        }
        let members: Vec<Token> = rest
            .by_ref()
            .take(run.len())
            .map(|(_, token)| token)
            .collect();
        out.push(build(members, kind));
    }
    out.extend(rest.map(|(_, token)| token));
    out
}

fn build(mut members: Vec<Token>, kind: TokenKind) -> Token {
    if members.len() == 1 {
        let mut token = members.remove(0);
        token.reclassify(kind);
        return token;
    }
    if members[0].kind() == kind && !members[0].is_leaf() {
        let head = members.remove(0);
        let mut children = head.into_children();
        children.extend(members);
        return Token::node(kind, children);
    }
    Token::node(kind, members)
}
