use crate::{
    lang::{
        code::pretty_print_code,
        compilation::parse_source,
        source_buffer::{SourceSpan, segment_source},
    },
    runtime::{
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};
use std::fmt::{self, Debug, Display, Formatter};
use tracing::{debug, trace, warn};

/// A token is a simple unit of the language.  It is either a number, a string literal, a word, or
/// the marker for the end of the line.
///
/// Every token holds the span of the line it was found at.  Tokens are never shared between two
/// different lines of source.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// A signed integer literal.
    Number(SourceSpan, i64),

    /// The text of a `."` string literal.
    String(SourceSpan, String),

    /// A word to be executed, or a variable to be read.
    Word(SourceSpan, String),

    /// The end of the line.  Its span sits at the very end of the text.
    EndOfInput(SourceSpan),
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

/// The kind of a token, without its data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    String,
    Word,
    EndOfInput,
}

/// Make sure that the tokens are nicely printable for debugging purposes.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Number(_, num) => write!(f, "{}", num),
            Token::String(_, string) => write!(f, "{}", string),
            Token::Word(_, string) => write!(f, "{}", string),
            Token::EndOfInput(_) => write!(f, "<eof>"),
        }
    }
}

/// Include the span and some extra formatting for string literals.
impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Number(span, num) => write!(f, "{}: {}", span, num),
            Token::String(span, string) => write!(f, "{}: {:?}", span, string),
            Token::Word(span, string) => write!(f, "{}: {}", span, string),
            Token::EndOfInput(span) => write!(f, "{}: <eof>", span),
        }
    }
}

impl Token {
    /// Get the token's span in the original source text.
    pub fn span(&self) -> SourceSpan {
        match self {
            Token::Number(span, _) => *span,
            Token::String(span, _) => *span,
            Token::Word(span, _) => *span,
            Token::EndOfInput(span) => *span,
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number(_, _) => TokenKind::Number,
            Token::String(_, _) => TokenKind::String,
            Token::Word(_, _) => TokenKind::Word,
            Token::EndOfInput(_) => TokenKind::EndOfInput,
        }
    }

    /// The token's value as text.
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// Get the number value of the token, if it is a number.
    pub fn number(&self) -> Option<i64> {
        match self {
            Token::Number(_, number) => Some(*number),
            _ => None,
        }
    }

    /// Get the word text, if the token is a word.
    pub fn word(&self) -> Option<&str> {
        match self {
            Token::Word(_, word) => Some(word),
            _ => None,
        }
    }
}

/// Does the text only use the characters a numeric literal can be built from?
fn is_number(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || c == '-' || c == '.')
}

fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Attempt to convert numeric looking text into an integer.  Periods anywhere in the text are
/// ignored.  Text leading with `.`, `-.` or `--.` is never a number.  A leading `--` is dropped,
/// giving the low cell of a double number.  Text that doesn't follow these rules, or doesn't fit
/// in 64 bits, is not a number.
pub fn to_numeric(text: &str) -> Option<i64> {
    if text.starts_with('.') || text.starts_with("-.") || text.starts_with("--.") {
        return None;
    }

    let digits = text.replace('.', "");

    if is_all_digits(&digits) || digits.strip_prefix('-').is_some_and(is_all_digits) {
        return digits.parse().ok();
    }

    match digits.strip_prefix("--") {
        Some(low_cell) if is_all_digits(low_cell) => low_cell.parse().ok(),
        _ => None,
    }
}

/// Turn a span that the default mode didn't consume into tokens.  A numeric literal becomes a
/// number token, and if written with a period, a second number token holding the sign extension of
/// the first, (-1 for negative numbers, 0 otherwise,) as the high cell of a double number.
/// Everything else is a word.
fn classify_span(span: SourceSpan, text: &str, tokens: &mut TokenList) {
    let number = if is_number(text) { to_numeric(text) } else { None };

    match number {
        Some(value) => {
            tokens.push(Token::Number(span, value));

            if text.contains('.') {
                tokens.push(Token::Number(span, if value < 0 { -1 } else { 0 }));
            }
        }

        None => tokens.push(Token::Word(span, text.to_string())),
    }
}

/// The declaration waiting for its name.
#[derive(Clone, Copy, PartialEq, Eq)]
enum DeclarationKind {
    Variable,
    Constant,
}

/// A colon definition being captured.
struct Definition {
    name: Option<String>,
    body: String,
}

/// Scans the spans of one line, carrying the comment, string, colon definition and declaration
/// modes from one span to the next.
struct Scanner<'a, 'i> {
    source: &'a str,
    interpreter: &'i mut dyn Interpreter,
    tokens: TokenList,

    /// Inside a `( ... )` comment.
    in_comment: bool,

    /// Inside a `."` string, holding the offset the string's text starts at.
    string_start: Option<usize>,

    /// Capturing a `: name ... ;` definition.
    definition: Option<Definition>,

    /// A `variable` or `constant` waiting on the next span for its name.
    declaration: Option<(DeclarationKind, SourceSpan)>,
}

impl<'a, 'i> Scanner<'a, 'i> {
    fn new(interpreter: &'i mut dyn Interpreter, source: &'a str) -> Self {
        Scanner {
            source,
            interpreter,
            tokens: TokenList::new(),
            in_comment: false,
            string_start: None,
            definition: None,
            declaration: None,
        }
    }

    fn scan(mut self) -> error::Result<TokenList> {
        for (span, text) in segment_source(self.source) {
            if self.declaration.is_some() {
                self.declare(span, text)?;
                continue;
            }

            let in_string = self.string_start.is_some();

            if !in_string && text == "\\" {
                trace!(target: "lforth::lexer", "Line comment at {}.", span);
                break;
            }

            if !in_string && ((self.in_comment && text.ends_with(')')) || text == ")") {
                self.in_comment = false;
                continue;
            }

            if !in_string && (self.in_comment || text == "(") {
                if !self.in_comment {
                    debug!(target: "lforth::lexer", "Comment opened at {}.", span);
                }

                self.in_comment = true;
                continue;
            }

            if !in_string && text == ":" {
                if self.definition.is_some() {
                    warn!(target: "lforth::lexer", "Definition restarted at {}.", span);
                }

                self.definition = Some(Definition {
                    name: None,
                    body: String::new(),
                });
                continue;
            }

            if !in_string && text == ";" && self.definition_is_complete() {
                self.finish_definition(span)?;
                continue;
            }

            if !in_string && self.definition.is_some() {
                self.capture(text);
                continue;
            }

            if text == ".\"" {
                if in_string {
                    trace!(target: "lforth::lexer", "String restarted at {}.", span);
                }

                self.string_start = Some(span.end());
                continue;
            }

            if let Some(start) = self.string_start {
                if text.ends_with('"') {
                    let string_span = SourceSpan::new(start, span.end() - 1);
                    let string = string_span.slice(self.source).to_string();

                    self.push_token(Token::String(string_span, string));
                    self.string_start = None;
                }
                continue;
            }

            if text == "variable" || text == "constant" {
                let kind = if text == "variable" {
                    DeclarationKind::Variable
                } else {
                    DeclarationKind::Constant
                };

                self.declaration = Some((kind, span));
                continue;
            }

            let first_new = self.tokens.len();

            classify_span(span, text, &mut self.tokens);

            for token in &self.tokens[first_new..] {
                trace!(target: "lforth::lexer", "Token {:?}.", token);
            }
        }

        if let Some(definition) = &self.definition {
            warn!(target: "lforth::lexer",
                  "Unterminated definition of {} discarded.",
                  definition.name.as_deref().unwrap_or("<unnamed>"));
        }

        if self.string_start.is_some() {
            warn!(target: "lforth::lexer", "Unterminated string discarded.");
        }

        let end = self.source.len();
        self.tokens.push(Token::EndOfInput(SourceSpan::new(end, end)));

        Ok(self.tokens)
    }

    fn push_token(&mut self, token: Token) {
        trace!(target: "lforth::lexer", "Token {:?}.", token);
        self.tokens.push(token);
    }

    /// The first span of a definition names the word, the rest make up its body.
    fn capture(&mut self, text: &str) {
        if let Some(definition) = self.definition.as_mut() {
            match definition.name {
                None => definition.name = Some(text.to_string()),
                Some(_) => {
                    definition.body.push(' ');
                    definition.body.push_str(text);
                }
            }
        }
    }

    fn definition_is_complete(&self) -> bool {
        match &self.definition {
            Some(definition) => definition.name.is_some() && !definition.body.is_empty(),
            None => false,
        }
    }

    /// Compile the captured body and add the new word to the dictionary.  The body is tokenized
    /// with the same interpreter, so declarations within it take effect right now.
    fn finish_definition(&mut self, span: SourceSpan) -> error::Result<()> {
        let Some(Definition {
            name: Some(name),
            body,
        }) = self.definition.take()
        else {
            return Ok(());
        };

        let body = body.trim_start().to_string();
        let terminator = Token::Word(span, ";".to_string());

        let nodes = parse_source(self.interpreter, &body).map_err(|error| error.relabel(&terminator))?;

        debug!(target: "lforth::lexer", "Defined word {} as: {}", name, pretty_print_code(&nodes));
        self.interpreter.define_word(&name, body, nodes);

        Ok(())
    }

    /// Bind the name following a `variable` or `constant`.  A variable gets fresh zeroed storage,
    /// a constant takes the cell on top of the stack.
    fn declare(&mut self, span: SourceSpan, name: &str) -> error::Result<()> {
        let Some((kind, keyword_span)) = self.declaration.take() else {
            return Ok(());
        };

        match kind {
            DeclarationKind::Variable => {
                let address = self.interpreter.symbol_table_mut().declare_variable(name, 0);

                debug!(target: "lforth::lexer",
                       "Variable {} at {} declared at {}.", name, address, span);
            }

            DeclarationKind::Constant => {
                let Some(cell) = self.interpreter.stack_mut().pop() else {
                    let keyword = Token::Word(keyword_span, "constant".to_string());
                    return script_error(self.interpreter, &keyword, ErrorKind::StackUnderflow);
                };

                debug!(target: "lforth::lexer", "Constant {} = {} declared at {}.", name, cell, span);
                let _ = self.interpreter.symbol_table_mut().bind(name, cell);
            }
        }

        Ok(())
    }
}

/// Tokenize one line of source code.
///
/// Besides producing tokens this runs the line's colon definitions and `variable` / `constant`
/// declarations, as they are found, against the interpreter.  A `constant` with nothing on the
/// stack fails right away and the rest of the line is not tokenized.
pub fn tokenize_from_source(interpreter: &mut dyn Interpreter, source: &str) -> error::Result<TokenList> {
    Scanner::new(interpreter, source).scan()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> TokenList {
        let mut tokens = TokenList::new();
        classify_span(SourceSpan::new(0, text.len()), text, &mut tokens);
        tokens
    }

    fn numbers(text: &str) -> Vec<i64> {
        classify(text).iter().filter_map(Token::number).collect()
    }

    #[test]
    fn plain_integers() {
        assert_eq!(numbers("42"), vec![42]);
        assert_eq!(numbers("-17"), vec![-17]);
        assert_eq!(numbers("0"), vec![0]);
    }

    #[test]
    fn periods_make_double_numbers() {
        assert_eq!(numbers("1."), vec![1, 0]);
        assert_eq!(numbers("-1."), vec![-1, -1]);
        assert_eq!(numbers("1.5"), vec![15, 0]);
    }

    #[test]
    fn leading_double_minus_is_the_low_cell() {
        assert_eq!(numbers("--5"), vec![5]);
        assert_eq!(numbers("--5."), vec![5, 0]);
    }

    #[test]
    fn ill_formed_numbers_are_words() {
        for text in [".", ".5", "-.5", "--.5", "-", "--", "1-2", "---3", "2drop", ".s"] {
            let tokens = classify(text);

            assert_eq!(tokens.len(), 1, "{}", text);
            assert_eq!(tokens[0].kind(), TokenKind::Word, "{}", text);
        }
    }

    #[test]
    fn oversized_literals_are_words() {
        assert_eq!(classify("99999999999999999999")[0].kind(), TokenKind::Word);
        assert_eq!(numbers("9223372036854775807"), vec![i64::MAX]);
    }
}
