use crate::{
    add_native_word,
    lang::tokenizing::Token,
    runtime::{built_ins::WordTable, error, interpreter::Interpreter},
};

/// Print the value of the cell living at an address.
///
/// Signature: `address -- `
fn word_print_at(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let address = interpreter.pop(token)?;
    let cell = interpreter.resolve_address(token, &address)?;

    Ok(Some(cell.to_string()))
}

/// Store a value into the cell living at an address.
///
/// Signature: `value address -- `
fn word_store(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let (address, value) = interpreter.pop_pair(token)?;
    let cell = interpreter.resolve_address(token, &address)?;

    cell.set_value(value.value());
    Ok(None)
}

/// Push the cell living at an address.  The cell itself is pushed, not a copy of its value.
///
/// Signature: `address -- cell`
fn word_fetch(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let address = interpreter.pop(token)?;
    let cell = interpreter.resolve_address(token, &address)?;

    interpreter.push(cell);
    Ok(None)
}

/// Add a value to the cell living at an address.
///
/// Signature: `value address -- `
fn word_add_store(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let (address, value) = interpreter.pop_pair(token)?;
    let cell = interpreter.resolve_address(token, &address)?;

    cell.set_value(cell.value().wrapping_add(value.value()));
    Ok(None)
}

pub fn register_memory_words(table: &mut WordTable) {
    add_native_word!(
        table,
        "?",
        word_print_at,
        "Print the value stored at an address.",
        "address -- "
    );

    add_native_word!(
        table,
        "!",
        word_store,
        "Store a value at an address.",
        "value address -- "
    );

    add_native_word!(
        table,
        "@",
        word_fetch,
        "Push the cell stored at an address.",
        "address -- value"
    );

    add_native_word!(
        table,
        "+!",
        word_add_store,
        "Add a value to the cell stored at an address.",
        "value address -- "
    );
}
