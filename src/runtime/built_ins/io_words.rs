use crate::{
    add_native_word,
    lang::tokenizing::Token,
    runtime::{
        built_ins::WordTable,
        data_structures::value::ToNumber,
        error,
        interpreter::Interpreter,
    },
};
use tracing::{debug, warn};

/// The character code `key` reports for an empty line, or when there's no more input.
const NEWLINE_CODE: i64 = 10;

/// Pop the top cell and print its value.
///
/// Signature: `value -- `
fn word_print(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let value = interpreter.pop(token)?;

    Ok(Some(value.to_string()))
}

/// Print the depth of the stack and all of its values from the bottom up.  The stack isn't
/// changed.
///
/// Signature: ` -- `
fn word_print_stack(interpreter: &mut dyn Interpreter, _token: &Token) -> error::Result<Option<String>> {
    Ok(Some(interpreter.stack().to_string()))
}

fn word_cr(_interpreter: &mut dyn Interpreter, _token: &Token) -> error::Result<Option<String>> {
    Ok(Some("\n".to_string()))
}

/// Pop a character code and print the character.  Codes that aren't valid characters print as the
/// Unicode replacement character.
///
/// Signature: `code -- `
fn word_emit(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let code = interpreter.pop(token)?.value();

    let character = u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER);

    Ok(Some(character.to_string()))
}

/// Wait for a line of input and push the code of its first character.
///
/// Signature: ` -- code`
fn word_key(interpreter: &mut dyn Interpreter, _token: &Token) -> error::Result<Option<String>> {
    let code = match interpreter.read_input_line() {
        Some(line) => line
            .trim_end_matches(['\r', '\n'])
            .chars()
            .next()
            .map(|character| character as i64)
            .unwrap_or(NEWLINE_CODE),

        None => {
            warn!(target: "lforth::words", "No input available for key.");
            NEWLINE_CODE
        }
    };

    interpreter.push(code.to_number());
    Ok(None)
}

/// End the session.  Nothing after `bye` is evaluated.
fn word_bye(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    debug!(target: "lforth::words", "Halt requested at {}.", token.span());
    interpreter.halt();

    Ok(None)
}

pub fn register_io_words(table: &mut WordTable) {
    add_native_word!(table, ".", word_print, "Print the top value of the stack.", "value -- ");

    add_native_word!(
        table,
        ".s",
        word_print_stack,
        "Print the stack depth and contents without changing it.",
        " -- "
    );

    add_native_word!(table, "cr", word_cr, "Print a newline.", " -- ");

    add_native_word!(
        table,
        "emit",
        word_emit,
        "Print the character with the given code.",
        "code -- "
    );

    add_native_word!(
        table,
        "key",
        word_key,
        "Read a line of input and push the code of its first character.",
        " -- code"
    );

    add_native_word!(table, "bye", word_bye, "End the session.", " -- ");
}
