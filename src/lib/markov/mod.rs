//! Order-1 Markov chain trained on a chat export.
//!
//! [`corpus`] turns an exported chat history into a [`Chain`], and
//! [`SentenceGenerator`] walks the chain from [`Token::Start`] to
//! [`Token::End`] to babble a sentence.

pub mod chain;
pub mod corpus;
pub mod generator;

pub use chain::*;
pub use corpus::*;
pub use generator::*;
