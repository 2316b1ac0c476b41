use crate::lang::tokenizing::Token;
use std::fmt::{self, Debug, Display, Formatter};

/// A node of the syntax tree.  The language has no nesting, so a parsed line, or the body of a
/// colon definition, is just a flat list of these nodes evaluated in order.
#[derive(Clone, PartialEq, Eq)]
pub enum Node {
    /// Push a fresh cell holding the literal's value.
    NumberLiteral(Token),

    /// Read a variable or execute a word.
    WordReference(Token),

    /// Produce the literal's text as output.
    StringLiteral(Token),
}

/// An ordered list of nodes.  The order is the evaluation order.
pub type NodeList = Vec<Node>;

impl Node {
    /// The token the node was built from.
    pub fn token(&self) -> &Token {
        match self {
            Node::NumberLiteral(token) => token,
            Node::WordReference(token) => token,
            Node::StringLiteral(token) => token,
        }
    }
}

/// Show the node the way it would be written in source.
impl Display for Node {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Node::NumberLiteral(token) => write!(f, "{}", token),
            Node::WordReference(token) => write!(f, "{}", token),
            Node::StringLiteral(token) => write!(f, ".\"{}\"", token),
        }
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Node::NumberLiteral(token) => write!(f, "number {:?}", token),
            Node::WordReference(token) => write!(f, "word {:?}", token),
            Node::StringLiteral(token) => write!(f, "string {:?}", token),
        }
    }
}

/// Render a node list back into source-like text, mostly for listings and debug logging.
pub fn pretty_print_code(code: &[Node]) -> String {
    code.iter()
        .map(|node| node.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::source_buffer::SourceSpan;

    #[test]
    fn code_prints_like_source() {
        let span = SourceSpan::default();
        let code = vec![
            Node::NumberLiteral(Token::Number(span, 2)),
            Node::WordReference(Token::Word(span, "dup".to_string())),
            Node::StringLiteral(Token::String(span, " hi".to_string())),
        ];

        assert_eq!(pretty_print_code(&code), "2 dup .\" hi\"");
    }
}
