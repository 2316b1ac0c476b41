use crate::{
    lang::{
        code::{Node, NodeList},
        tokenizing::{Token, TokenList, tokenize_from_source},
    },
    runtime::{error, interpreter::Interpreter},
};
use tracing::trace;

/// Turn a token list into the list of nodes to evaluate.  Numbers, words and strings map one to
/// one onto nodes.  Conversion stops at the end of input token.
pub fn process_tokens(tokens: TokenList) -> NodeList {
    let mut code = NodeList::with_capacity(tokens.len());

    for token in tokens {
        let node = match token {
            Token::Number(_, _) => Node::NumberLiteral(token),
            Token::Word(_, _) => Node::WordReference(token),
            Token::String(_, _) => Node::StringLiteral(token),
            Token::EndOfInput(_) => break,
        };

        code.push(node);
    }

    trace!(target: "lforth::parser", "Parsed {} nodes.", code.len());
    code
}

/// Tokenize and parse one line of source code with the given interpreter.
pub fn parse_source(interpreter: &mut dyn Interpreter, source: &str) -> error::Result<NodeList> {
    let tokens = tokenize_from_source(interpreter, source)?;
    Ok(process_tokens(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::source_buffer::SourceSpan;

    #[test]
    fn tokens_map_onto_nodes_in_order() {
        let span = SourceSpan::new(0, 1);
        let tokens = vec![
            Token::Number(span, 1),
            Token::Word(span, "dup".to_string()),
            Token::String(span, " hi".to_string()),
            Token::EndOfInput(SourceSpan::new(1, 1)),
        ];

        let code = process_tokens(tokens);

        assert_eq!(code.len(), 3);
        assert!(matches!(code[0], Node::NumberLiteral(_)));
        assert!(matches!(code[1], Node::WordReference(_)));
        assert!(matches!(code[2], Node::StringLiteral(_)));
    }

    #[test]
    fn nothing_after_the_end_is_parsed() {
        let span = SourceSpan::new(0, 1);
        let tokens = vec![
            Token::EndOfInput(span),
            Token::Word(span, "lost".to_string()),
        ];

        assert!(process_tokens(tokens).is_empty());
    }
}
