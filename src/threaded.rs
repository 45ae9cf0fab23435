//! Concurrent token production.
//!
//! [`ThreadedLexer`] runs a [`Lexer`] on its own thread and hands tokens to the
//! parser through an unbounded channel. Observable behaviour is the same as
//! pulling from a [`Lexer`] directly; lexing just overlaps with parsing.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::ast::{Token, TokenKind};
use crate::lexer::{LexError, Lexer, TokenSource};

pub struct ThreadedLexer {
    receiver: Option<Receiver<Token>>,
    producer: Option<JoinHandle<()>>,
}

impl ThreadedLexer {
    /// Start tokenizing `input` on a background thread.
    pub fn spawn(input: &str) -> Self {
        let (sender, receiver) = mpsc::channel();
        let input = input.to_owned();

        let producer = thread::spawn(move || {
            let mut sent = 0usize;
            for token in Lexer::new(&input) {
                if sender.send(token).is_err() {
                    tracing::debug!(sent, "token consumer hung up, stopping producer");
                    return;
                }
                sent += 1;
            }
            tracing::debug!(sent, "token producer finished");
        });

        ThreadedLexer {
            receiver: Some(receiver),
            producer: Some(producer),
        }
    }

    #[cfg(test)]
    fn from_receiver(receiver: Receiver<Token>) -> Self {
        ThreadedLexer {
            receiver: Some(receiver),
            producer: None,
        }
    }

    fn shutdown(&mut self) {
        self.receiver = None;
        if let Some(handle) = self.producer.take()
            && handle.join().is_err()
        {
            tracing::warn!("token producer thread panicked");
        }
    }
}

impl TokenSource for ThreadedLexer {
    /// Blocks until the producer has delivered the next token.
    fn next_token(&mut self) -> Result<Token, LexError> {
        let receiver = self.receiver.as_ref().ok_or(LexError::Exhausted)?;

        match receiver.recv() {
            Ok(token) => {
                if token.is(TokenKind::Eof) {
                    self.shutdown();
                }
                Ok(token)
            }
            Err(_) => {
                self.shutdown();
                Err(LexError::Interrupted)
            }
        }
    }
}

impl Drop for ThreadedLexer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseError, Parser};

    #[test]
    fn delivers_tokens_in_order() {
        let mut lexer = ThreadedLexer::spawn("a = {1, 2.5}\n");
        let mut kinds = vec![];
        loop {
            let token = lexer.next_token().unwrap();
            kinds.push(token.kind);
            if token.is(TokenKind::Eof) {
                break;
            }
        }

        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::LBrace,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Decimal,
                TokenKind::RBrace,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
        assert_eq!(lexer.next_token(), Err(LexError::Exhausted));
    }

    #[test]
    fn producer_stopping_early_is_an_interruption() {
        let (sender, receiver) = mpsc::channel();
        sender.send(Token::new(TokenKind::Identifier, 1, "foo")).unwrap();
        drop(sender);

        let mut lexer = ThreadedLexer::from_receiver(receiver);
        assert_eq!(lexer.next_token().unwrap().text, "foo");
        assert_eq!(lexer.next_token(), Err(LexError::Interrupted));
        assert_eq!(lexer.next_token(), Err(LexError::Exhausted));
    }

    #[test]
    fn interrupted_producer_fails_the_whole_parse() {
        let (sender, receiver) = mpsc::channel();
        for token in [
            Token::new(TokenKind::Identifier, 1, "foo"),
            Token::new(TokenKind::Number, 1, "1"),
            Token::new(TokenKind::LBrace, 1, "{"),
            Token::new(TokenKind::Newline, 1, "\n"),
            Token::new(TokenKind::RBrace, 2, "}"),
        ] {
            sender.send(token).unwrap();
        }
        drop(sender);

        let result = Parser::new(ThreadedLexer::from_receiver(receiver)).parse();
        assert_eq!(result, Err(ParseError::Lex(LexError::Interrupted)));
    }
}
