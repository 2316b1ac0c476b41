/// Module for managing the original source code, and splitting it into whitespace separated spans.
pub mod source_buffer;

/// Module for turning the spans of a line into a list of tokens.  Definitions and declarations are
/// carried out as they are found, so this phase requires an active interpreter.
pub mod tokenizing;

/// Module for defining the nodes that make up a parsed line or word body.
pub mod code;

/// Module for parsing a list of tokens into the list of nodes the interpreter evaluates.
pub mod compilation;
