use crate::{
    add_native_word,
    lang::tokenizing::Token,
    runtime::{built_ins::WordTable, error, interpreter::Interpreter},
};

/// Duplicate the top cell on the data stack.  Both entries are the very same cell.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let value = interpreter.peek(token)?;

    interpreter.push(value);
    Ok(None)
}

/// Drop the top cell on the data stack.
///
/// Signature: `value -- `
fn word_drop(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let _ = interpreter.pop(token)?;

    Ok(None)
}

/// Swap the top 2 cells on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let (b, a) = interpreter.pop_pair(token)?;

    interpreter.push(b);
    interpreter.push(a);

    Ok(None)
}

/// Drop the second cell on the stack.
///
/// Signature: `a b -- b`
fn word_nip(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let (b, _) = interpreter.pop_pair(token)?;

    interpreter.push(b);
    Ok(None)
}

/// Tuck a copy of the top cell under the second.
///
/// Signature: `a b -- b a b`
fn word_tuck(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let (b, a) = interpreter.pop_pair(token)?;

    interpreter.push(b.clone());
    interpreter.push(a);
    interpreter.push(b);

    Ok(None)
}

/// Rotate the third cell up to the top of the stack.
///
/// Signature: `a b c -- b c a`
fn word_rot(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    interpreter.require_depth(token, 3)?;

    let c = interpreter.pop(token)?;
    let b = interpreter.pop(token)?;
    let a = interpreter.pop(token)?;

    interpreter.push(b);
    interpreter.push(c);
    interpreter.push(a);

    Ok(None)
}

/// Drop the top 2 cells.
///
/// Signature: `a b -- `
fn word_two_drop(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let _ = interpreter.pop_pair(token)?;

    Ok(None)
}

pub fn register_stack_words(table: &mut WordTable) {
    add_native_word!(
        table,
        "dup",
        word_dup,
        "Duplicate the top cell on the data stack.",
        "value -- value value"
    );

    add_native_word!(
        table,
        "drop",
        word_drop,
        "Discard the top cell on the data stack.",
        "value -- "
    );

    add_native_word!(
        table,
        "swap",
        word_swap,
        "Swap the top 2 cells on the data stack.",
        "a b -- b a"
    );

    add_native_word!(
        table,
        "nip",
        word_nip,
        "Discard the second cell on the data stack.",
        "a b -- b"
    );

    add_native_word!(
        table,
        "tuck",
        word_tuck,
        "Copy the top cell under the second cell.",
        "a b -- b a b"
    );

    add_native_word!(
        table,
        "rot",
        word_rot,
        "Rotate the third cell to the top of the stack.",
        "a b c -- b c a"
    );

    add_native_word!(
        table,
        "2drop",
        word_two_drop,
        "Discard the top 2 cells on the data stack.",
        "a b -- "
    );
}
