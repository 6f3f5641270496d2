use rand::Rng;
use thiserror::Error;

use super::{Chain, Token};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenerateError {
    #[error("the chain has not learned anything")]
    EmptyChain,

    #[error("no sentence after {0} attempts: context without successors")]
    DeadEnd(usize),
}

/// Walks a [`Chain`] from [`Token::Start`] until [`Token::End`].
///
/// Every walk is bounded: an attempt that hits a context without successors
/// (or yields only whitespace) is restarted, at most `max_attempts` times, and
/// an attempt that grows past `max_tokens` words is cut off.
#[derive(Debug, Clone)]
pub struct SentenceGenerator {
    pub max_tokens: usize,
    pub max_attempts: usize,
}

impl Default for SentenceGenerator {
    fn default() -> Self {
        Self {
            max_tokens: 100,
            max_attempts: 10,
        }
    }
}

/// Outcome of a single walk.
enum Walk {
    Sentence(String),
    TooLong(String),
    DeadEnd,
}

impl SentenceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens.max(1);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Generates one sentence: the words strictly between START and END,
    /// joined by single spaces.
    ///
    /// If every attempt runs past `max_tokens`, the last one is returned
    /// truncated to `max_tokens` words.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        chain: &Chain,
        rng: &mut R,
    ) -> Result<String, GenerateError> {
        if chain.is_empty() {
            return Err(GenerateError::EmptyChain);
        }

        let mut truncated = None;
        for attempt in 1..=self.max_attempts {
            match self.walk(chain, rng) {
                Walk::Sentence(sentence) => return Ok(sentence),
                Walk::TooLong(sentence) => {
                    debug!("attempt {}: cut off after {} words", attempt, self.max_tokens);
                    truncated = Some(sentence);
                }
                Walk::DeadEnd => {
                    debug!("attempt {}: dead end", attempt);
                }
            }
        }

        truncated.ok_or(GenerateError::DeadEnd(self.max_attempts))
    }

    fn walk<R: Rng + ?Sized>(&self, chain: &Chain, rng: &mut R) -> Walk {
        let start = Token::Start;
        let mut words: Vec<&str> = Vec::new();
        let mut context = &start;

        loop {
            let Some(token) = chain.generate(context, rng) else {
                return Walk::DeadEnd;
            };

            match token {
                Token::End => break,
                // `ChainBuilder::add` never records Start as a successor.
                Token::Start => return Walk::DeadEnd,
                Token::Word(word) => {
                    if words.len() == self.max_tokens {
                        return Walk::TooLong(words.join(" "));
                    }
                    words.push(word);
                    context = token;
                }
            }
        }

        let sentence = words.join(" ");
        if sentence.trim().is_empty() {
            return Walk::DeadEnd;
        }

        Walk::Sentence(sentence)
    }
}
