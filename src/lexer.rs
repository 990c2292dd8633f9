use std::borrow::Cow;
use std::fmt::Debug;

use log::{debug, error, trace, warn};
use regex_automata::meta::{BuildError, Regex};
use regex_automata::{Anchored, Input};
use smol_str::SmolStr;
use thiserror::Error;

use crate::token::{Token, TokenKind};

/// Formatting options handed over by the host together with the source text.
pub type HostOptions = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum LexerError {
    #[error("Invalid pattern {pattern:?} in state `{state}`: {source}")]
    InvalidPattern {
        state: &'static str,
        pattern: String,
        #[source]
        source: Box<BuildError>,
    },
    #[error("State `{from}` pushes unknown state `{target}`")]
    UnknownState {
        from: &'static str,
        target: &'static str,
    },
    #[error("Initial state `{0}` must not contain a pop rule")]
    PopInInitialState(&'static str),
    #[error("Lexer `{0}` defines no states")]
    EmptyDefinition(SmolStr),
    #[error("State stack underflow while leaving `{0}`")]
    StateStackUnderflow(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    None,
    Push(&'static str),
    Pop,
}

/// One entry of a state's rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    pub pattern: Cow<'static, str>,
    pub kind: TokenKind,
    pub transition: Transition,
}

impl RuleDef {
    pub const fn new(pattern: &'static str, kind: TokenKind, transition: Transition) -> Self {
        Self {
            pattern: Cow::Borrowed(pattern),
            kind,
            transition,
        }
    }

    pub fn owned(pattern: String, kind: TokenKind, transition: Transition) -> Self {
        Self {
            pattern: Cow::Owned(pattern),
            kind,
            transition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDef {
    pub name: &'static str,
    pub rules: Vec<RuleDef>,
}

/// Metadata a host uses to pick a lexer for a code block or file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerInfo {
    pub name: SmolStr,
    pub aliases: Vec<SmolStr>,
    pub filenames: Vec<SmolStr>,
    pub mimetypes: Vec<SmolStr>,
}

impl LexerInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            aliases: Vec::new(),
            filenames: Vec::new(),
            mimetypes: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().copied().map(SmolStr::new).collect();
        self
    }

    pub fn with_filenames(mut self, filenames: &[&str]) -> Self {
        self.filenames = filenames.iter().copied().map(SmolStr::new).collect();
        self
    }

    pub fn with_mimetypes(mut self, mimetypes: &[&str]) -> Self {
        self.mimetypes = mimetypes.iter().copied().map(SmolStr::new).collect();
        self
    }
}

/// A complete rule table. The first state is the initial one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerDefinition {
    pub info: LexerInfo,
    pub states: Vec<StateDef>,
}

pub trait Lexer: Send + Sync + Debug {
    fn info(&self) -> &LexerInfo;

    fn tokens<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = Token<'a>> + 'a>;

    /// Options are accepted for the host's calling convention and ignored.
    fn tokens_with_options<'a>(
        &'a self,
        text: &'a str,
        _options: &HostOptions,
    ) -> Box<dyn Iterator<Item = Token<'a>> + 'a> {
        self.tokens(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Stay,
    Push(usize),
    Pop,
}

#[derive(Debug)]
struct CompiledRule {
    def: RuleDef,
    regex: Regex,
    target: Target,
}

#[derive(Debug)]
struct CompiledState {
    name: &'static str,
    rules: Vec<CompiledRule>,
}

/// Outcome of trying a state's rules at one offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule: usize,
    pub kind: TokenKind,
    pub end: usize,
}

impl CompiledState {
    fn first_match(&self, text: &str, pos: usize) -> Option<(usize, &CompiledRule, usize)> {
        let input = Input::new(text).range(pos..).anchored(Anchored::Yes);
        self.rules.iter().enumerate().find_map(|(index, rule)| {
            rule.regex
                .search(&input)
                // An empty match would never advance the scan.
                .filter(|m| m.end() > pos)
                .map(|m| (index, rule, m.end()))
        })
    }
}

/// Priority-ordered, first-match-wins tokenizer driven by a `LexerDefinition`.
#[derive(Debug)]
pub struct RegexLexer {
    info: LexerInfo,
    states: Vec<CompiledState>,
}

impl RegexLexer {
    pub fn new(definition: LexerDefinition) -> Result<Self, LexerError> {
        let LexerDefinition { info, states } = definition;
        let Some(initial) = states.first() else {
            return Err(LexerError::EmptyDefinition(info.name));
        };
        if initial.rules.iter().any(|r| r.transition == Transition::Pop) {
            return Err(LexerError::PopInInitialState(initial.name));
        }

        let index_of = |name: &str| states.iter().position(|s| s.name == name);

        let mut compiled = Vec::with_capacity(states.len());
        for state in &states {
            let mut rules = Vec::with_capacity(state.rules.len());
            for def in &state.rules {
                let target = match def.transition {
                    Transition::None => Target::Stay,
                    Transition::Pop => Target::Pop,
                    Transition::Push(name) => Target::Push(index_of(name).ok_or(
                        LexerError::UnknownState {
                            from: state.name,
                            target: name,
                        },
                    )?),
                };
                let regex = Regex::new(&def.pattern).map_err(|e| LexerError::InvalidPattern {
                    state: state.name,
                    pattern: def.pattern.to_string(),
                    source: Box::new(e),
                })?;
                rules.push(CompiledRule {
                    def: def.clone(),
                    regex,
                    target,
                });
            }
            compiled.push(CompiledState {
                name: state.name,
                rules,
            });
        }

        debug!(
            "Built lexer `{}` with {} states and {} rules",
            info.name,
            compiled.len(),
            compiled.iter().map(|s| s.rules.len()).sum::<usize>()
        );

        Ok(Self {
            info,
            states: compiled,
        })
    }

    pub fn state_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.states.iter().map(|s| s.name)
    }

    /// The declared rules of `state`, in priority order.
    pub fn rules(&self, state: &str) -> Option<Vec<&RuleDef>> {
        self.state(state)
            .map(|s| s.rules.iter().map(|r| &r.def).collect())
    }

    /// Tries the rules of `state` at `pos` and reports the winning rule.
    /// `None` when `pos` lies past the end of `text`.
    pub fn first_match(&self, state: &str, text: &str, pos: usize) -> Option<RuleMatch> {
        if pos > text.len() {
            return None;
        }
        let state = self.state(state)?;
        let (index, rule, end) = state.first_match(text, pos)?;
        Some(RuleMatch {
            rule: index,
            kind: rule.def.kind,
            end,
        })
    }

    pub fn tokenize<'l, 't>(&'l self, text: &'t str) -> Tokens<'l, 't> {
        Tokens {
            lexer: self,
            text,
            pos: 0,
            stack: StateStack::new(),
            underflow: false,
        }
    }

    fn state(&self, name: &str) -> Option<&CompiledState> {
        self.states.iter().find(|s| s.name == name)
    }
}

impl Lexer for RegexLexer {
    fn info(&self) -> &LexerInfo {
        &self.info
    }

    fn tokens<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = Token<'a>> + 'a> {
        Box::new(self.tokenize(text))
    }
}

/// Stack of state indices. The bottom frame is the initial state and is
/// never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStack {
    frames: Vec<usize>,
}

impl StateStack {
    pub fn new() -> Self {
        Self { frames: vec![0] }
    }

    pub fn top(&self) -> usize {
        self.frames.last().copied().unwrap_or(0)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self, state: usize) {
        self.frames.push(state);
    }

    /// Returns `None` instead of removing the initial frame.
    pub fn pop(&mut self) -> Option<usize> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.frames.truncate(1);
    }
}

impl Default for StateStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy token stream over one buffer. Each stream owns its state stack.
#[derive(Debug, Clone)]
pub struct Tokens<'l, 't> {
    lexer: &'l RegexLexer,
    text: &'t str,
    pos: usize,
    stack: StateStack,
    underflow: bool,
}

impl<'t> Tokens<'_, 't> {
    pub fn state(&self) -> &'static str {
        self.lexer.states[self.stack.top()].name
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    fn rest_as_text(&mut self) -> Token<'t> {
        let start = self.pos;
        self.pos = self.text.len();
        Token::new(TokenKind::Text, &self.text[start..], start)
    }

    fn fallback(&mut self) -> Token<'t> {
        let start = self.pos;
        let width = self.text[start..].chars().next().map_or(1, char::len_utf8);
        self.pos += width;
        let text = &self.text[start..self.pos];
        if text == "\n" {
            self.stack.reset();
            Token::new(TokenKind::Text, text, start)
        } else {
            warn!(
                "No rule of `{}` in state `{}` matches {:?} at offset {}",
                self.lexer.info.name,
                self.state(),
                text,
                start
            );
            Token::new(TokenKind::Error, text, start)
        }
    }
}

impl<'t> Iterator for Tokens<'_, 't> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }
        if self.underflow {
            return Some(self.rest_as_text());
        }

        let start = self.pos;
        let state = &self.lexer.states[self.stack.top()];
        let Some((_, rule, end)) = state.first_match(self.text, start) else {
            return Some(self.fallback());
        };

        self.pos = end;
        match rule.target {
            Target::Stay => {}
            Target::Push(next) => {
                trace!("push `{}` at offset {}", self.lexer.states[next].name, start);
                self.stack.push(next);
            }
            Target::Pop => {
                if self.stack.pop().is_some() {
                    trace!("pop `{}` at offset {}", state.name, start);
                } else {
                    error!("{}", LexerError::StateStackUnderflow(state.name));
                    self.underflow = true;
                }
            }
        }

        Some(Token::new(rule.def.kind, &self.text[start..end], start))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text.len() - self.pos;
        ((remaining > 0) as usize, Some(remaining))
    }
}

impl std::iter::FusedIterator for Tokens<'_, '_> {}
