//! Pattern registry
//!
//! Maps each merged [`TokenKind`] to the [`PatternDescriptor`] the merge engine matches it by.
//! Descriptors are plain data declared in one table ([`descriptor`]); the compiled form
//! ([`Pattern`]) is built lazily, once per kind, the first time a merge asks for it. The
//! per-kind cells make concurrent first use safe without any further locking.
//!
//! Descriptor vocabulary:
//!
//! - `exact`: a single token whose text equals the literal.
//! - `regex`: the run's concatenated text matches the expression as a whole. Expressions are
//!   written unanchored; anchors are added when compiling.
//! - `begins_with` / `ends_with`: the whole text of the run's first / last token must equal
//!   the literal before the expression is tried. On runs of one-character tokens this is
//!   implied by the expression, so it only saves work. Guards are not a pure pre-filter
//!   though: a token produced by an earlier merge is opaque to them, and that changes which
//!   runs match. It is how an escape merged first hides its quote from a string merged
//!   later.
//! - `continuous`: maximal munch. The run grows as far as the expression allows and the
//!   longest match wins, whatever the expression's own preference (`a|ab`, `a+?`). Without
//!   it the shortest match wins.
//! - `continue_after_success`: after a match, keep growing the same run with further matches
//!   before moving on.

use crate::forge::token::{Token, TokenKind};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use regex_automata::dfa::{dense, Automaton, StartKind};
use regex_automata::{Anchored, Input, MatchKind};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternDescriptor {
    pub exact: Option<&'static str>,
    pub regex: Option<&'static str>,
    pub begins_with: Option<&'static str>,
    pub ends_with: Option<&'static str>,
    pub continuous: bool,
    pub continue_after_success: bool,
}

impl PatternDescriptor {
    const EMPTY: PatternDescriptor = PatternDescriptor {
        exact: None,
        regex: None,
        begins_with: None,
        ends_with: None,
        continuous: false,
        continue_after_success: false,
    };

    pub const fn exact(literal: &'static str) -> Self {
        PatternDescriptor {
            exact: Some(literal),
            ..Self::EMPTY
        }
    }

    pub const fn regex(pattern: &'static str) -> Self {
        PatternDescriptor {
            regex: Some(pattern),
            ..Self::EMPTY
        }
    }

    pub const fn begins_with(self, literal: &'static str) -> Self {
        PatternDescriptor {
            begins_with: Some(literal),
            ..self
        }
    }

    pub const fn ends_with(self, literal: &'static str) -> Self {
        PatternDescriptor {
            ends_with: Some(literal),
            ..self
        }
    }

    pub const fn continuous(self) -> Self {
        PatternDescriptor {
            continuous: true,
            ..self
        }
    }

    pub const fn continue_after_success(self) -> Self {
        PatternDescriptor {
            continue_after_success: true,
            ..self
        }
    }
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern declares neither an exact literal nor a regular expression")]
    Empty,
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("pattern `{pattern}` cannot be searched for its longest match: {source}")]
    Unsupported {
        pattern: String,
        #[source]
        source: dense::BuildError,
    },
}

/// A compiled descriptor.
#[derive(Debug, Clone)]
pub struct Pattern {
    descriptor: PatternDescriptor,
    /// `^(?:p)$`, tested against a candidate run.
    whole: Option<Regex>,
    /// `p` as an anchored DFA reporting every match, so a search ends on the longest one.
    /// Searched over the remaining text of a level to bound candidate runs.
    lead: Option<dense::DFA<Vec<u32>>>,
}

impl Pattern {
    pub fn compile(descriptor: PatternDescriptor) -> Result<Self, PatternError> {
        match (descriptor.exact, descriptor.regex) {
            (None, None) => Err(PatternError::Empty),
            (_, None) => Ok(Pattern {
                descriptor,
                whole: None,
                lead: None,
            }),
            (_, Some(pattern)) => {
                let whole = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
                    PatternError::InvalidRegex {
                        pattern: pattern.to_string(),
                        source,
                    }
                })?;
                let lead = dense::Builder::new()
                    .configure(
                        dense::Config::new()
                            .match_kind(MatchKind::All)
                            .start_kind(StartKind::Anchored),
                    )
                    .build(pattern)
                    .map_err(|source| PatternError::Unsupported {
                        pattern: pattern.to_string(),
                        source,
                    })?;
                Ok(Pattern {
                    descriptor,
                    whole: Some(whole),
                    lead: Some(lead),
                })
            }
        }
    }

    /// The exact literal, when this pattern matches by literal rather than by expression.
    pub fn exact(&self) -> Option<&'static str> {
        match self.whole {
            None => self.descriptor.exact,
            Some(_) => None,
        }
    }

    pub fn is_continuous(&self) -> bool {
        self.descriptor.continuous
    }

    pub fn continues_after_success(&self) -> bool {
        self.descriptor.continue_after_success
    }

    /// Does `text` match the pattern as a whole?
    pub fn matches(&self, text: &str) -> bool {
        match (&self.whole, self.descriptor.exact) {
            (Some(whole), _) => whole.is_match(text),
            (None, Some(literal)) => text == literal,
            (None, None) => false,
        }
    }

    /// Length in bytes of the longest non-empty match at the start of `text`. No prefix of
    /// `text` longer than this matches the pattern as a whole.
    pub fn longest_lead(&self, text: &str) -> Option<usize> {
        match &self.lead {
            Some(lead) => lead
                .try_search_fwd(&Input::new(text).anchored(Anchored::Yes))
                .ok()
                .flatten()
                .map(|m| m.offset())
                .filter(|&end| end > 0),
            None => self
                .descriptor
                .exact
                .filter(|literal| text.starts_with(literal))
                .map(str::len),
        }
    }

    /// Begin guard, checked against the first token of a candidate run.
    pub fn admits_first(&self, token: &Token) -> bool {
        self.descriptor
            .begins_with
            .map_or(true, |guard| token.text_is(guard))
    }

    /// End guard, checked against the last token of a candidate run.
    pub fn admits_last(&self, token: &Token) -> bool {
        self.descriptor
            .ends_with
            .map_or(true, |guard| token.text_is(guard))
    }
}

const IDENT: &str = r"[\p{L}_][\p{L}\p{N}_]*";
const NAMESPACE_PATH: &str = r"[\p{L}_][\p{L}\p{N}_]*(?:::[\p{L}_][\p{L}\p{N}_]*)+";

/// The descriptor a kind is merged by, or `None` for kinds no pattern produces.
pub fn descriptor(kind: TokenKind) -> Option<PatternDescriptor> {
    use PatternDescriptor as P;
    use TokenKind::*;

    let descriptor = match kind {
        EscapeSequence => P::regex(r"\\.").begins_with("\\"),
        Text => P::regex(r#""[^\r\n]*""#)
            .begins_with("\"")
            .ends_with("\""),
        Comment => P::regex(r"#[^\r\n]*").begins_with("#").continuous(),
        Number => P::regex(r"[0-9]+(?:\.[0-9]+)?(?:[eE][-+]?[0-9]+)?").continuous(),
        Word => P::regex(IDENT).continuous(),
        NamespaceSeparator => P::regex("::").begins_with(":"),
        NamespacePath => P::regex(NAMESPACE_PATH).continue_after_success(),
        LoopKeyword => P::exact("loop"),
        BindingKeyword => P::exact("over"),
        Equality => P::regex("==").begins_with("="),
        Inequality => P::regex("!=").begins_with("!"),
        LessOrEqual => P::regex("<=").begins_with("<"),
        GreaterOrEqual => P::regex(">=").begins_with(">"),
        Arrow => P::regex("->").begins_with("-"),
        Range => P::regex(r"\.\.").begins_with("."),
        TensorOpen => P::regex(r"<\|").begins_with("<"),
        TensorClose => P::regex(r"\|>").begins_with("|"),
        NormDelimiter => P::regex(r"\|\|").begins_with("|"),
        Spaces => P::regex(r"[ \t]+").continuous(),
        NewLine => P::regex(r"\r\n|\r|\n").continuous(),
        _ => return None,
    };
    Some(descriptor)
}

static REGISTRY: Lazy<Vec<OnceCell<Option<Pattern>>>> =
    Lazy::new(|| TokenKind::ALL.iter().map(|_| OnceCell::new()).collect());

/// The compiled pattern for `kind`, compiled on first use.
pub fn pattern_for(kind: TokenKind) -> Option<&'static Pattern> {
    REGISTRY[kind.index()]
        .get_or_init(|| {
            descriptor(kind).map(|d| {
                Pattern::compile(d)
                    .unwrap_or_else(|e| panic!("built-in pattern for {:?} is invalid: {}", kind, e))
            })
        })
        .as_ref()
}
