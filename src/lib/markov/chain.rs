use std::{collections::HashMap, fmt};

use rand::Rng;

/// A unit of a training line. The sentinels are separate variants, so no
/// word from the corpus (not even the empty string) can be mistaken for one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Precedes the first word of every line.
    Start,

    /// Follows the last word of every line.
    End,

    Word(String),
}

impl From<&str> for Token {
    fn from(word: &str) -> Self {
        Token::Word(word.to_string())
    }
}

impl From<String> for Token {
    fn from(word: String) -> Self {
        Token::Word(word)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Start => f.write_str("<start>"),
            Token::End => f.write_str("<end>"),
            Token::Word(w) => f.write_str(w),
        }
    }
}

/// The observed successors of one context, with how often each was seen.
///
/// Successors are kept in first-seen order so that sampling with a seeded
/// rng is reproducible.
#[derive(Debug, Clone, Default)]
pub struct Successors {
    tokens: Vec<(Token, usize)>,
    total: usize,
}

impl Successors {
    fn add(&mut self, token: Token) {
        self.total += 1;
        match self.tokens.iter_mut().find(|(t, _)| *t == token) {
            Some((_, count)) => *count += 1,
            None => self.tokens.push((token, 1)),
        }
    }

    /// Number of times `token` followed this context.
    pub fn count(&self, token: &Token) -> usize {
        self.tokens
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Total number of observed transitions out of this context.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Picks a successor with probability proportional to its count.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Token> {
        if self.total == 0 {
            return None;
        }

        let mut r = rng.gen_range(0..self.total);
        for (token, count) in &self.tokens {
            if r < *count {
                return Some(token);
            }
            r -= count;
        }

        None
    }
}

/// Accumulates training lines. Call [`ChainBuilder::build`] once all lines
/// are added to get the read-only [`Chain`].
#[derive(Debug, Default)]
pub struct ChainBuilder {
    transitions: HashMap<Token, Successors>,
    lines: usize,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records START→first, each adjacent pair, and last→END. An empty line
    /// records nothing.
    pub fn add<I, T>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let mut prev = Token::Start;
        for token in tokens {
            let token = token.into();
            self.transitions
                .entry(prev)
                .or_default()
                .add(token.clone());
            prev = token;
        }

        if prev == Token::Start {
            return self;
        }

        self.transitions.entry(prev).or_default().add(Token::End);
        self.lines += 1;
        self
    }

    /// Number of lines added so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn build(self) -> Chain {
        Chain {
            transitions: self.transitions,
            lines: self.lines,
        }
    }
}

/// A trained order-1 Markov chain.
///
/// A `Chain` only has `&self` methods: it is complete when
/// [`ChainBuilder::build`] returns it and is never written again, so any
/// number of handlers may sample it concurrently through a shared reference.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    transitions: HashMap<Token, Successors>,
    lines: usize,
}

impl Chain {
    /// Samples the token following `context`, weighted by how often each
    /// successor was observed. Returns `None` if `context` was never followed
    /// by anything.
    pub fn generate<R: Rng + ?Sized>(&self, context: &Token, rng: &mut R) -> Option<&Token> {
        self.transitions.get(context)?.sample(rng)
    }

    pub fn successors(&self, context: &Token) -> Option<&Successors> {
        self.transitions.get(context)
    }

    /// Number of distinct contexts, including [`Token::Start`].
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Number of training lines the chain was built from.
    pub fn lines(&self) -> usize {
        self.lines
    }
}
