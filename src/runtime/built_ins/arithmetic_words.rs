use crate::{
    add_native_word,
    lang::tokenizing::Token,
    runtime::{
        built_ins::WordTable,
        data_structures::value::ToNumber,
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// Division rounding the quotient toward negative infinity.  The divisor must not be zero.
fn floored_div(a: i64, b: i64) -> i64 {
    let quotient = a.wrapping_div(b);

    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        quotient.wrapping_sub(1)
    } else {
        quotient
    }
}

/// The remainder matching `floored_div`, it takes the sign of the divisor.
fn floored_mod(a: i64, b: i64) -> i64 {
    let remainder = a.wrapping_rem(b);

    if remainder != 0 && ((remainder < 0) != (b < 0)) {
        remainder.wrapping_add(b)
    } else {
        remainder
    }
}

/// Pop two cells and push the result of the operation as a fresh cell.  The deeper of the two
/// cells is the left hand side.
fn binary_op<F>(interpreter: &mut dyn Interpreter, token: &Token, op: F) -> error::Result<Option<String>>
where
    F: Fn(i64, i64) -> i64,
{
    let (b, a) = interpreter.pop_pair(token)?;

    interpreter.push(op(a.value(), b.value()).to_number());
    Ok(None)
}

/// Same as `binary_op` but the result is a Forth flag.
fn comparison_op<F>(interpreter: &mut dyn Interpreter, token: &Token, op: F) -> error::Result<Option<String>>
where
    F: Fn(i64, i64) -> bool,
{
    let (b, a) = interpreter.pop_pair(token)?;

    interpreter.push(op(a.value(), b.value()).to_number());
    Ok(None)
}

/// Pop the divisor and dividend, checking the divisor before anything is computed.
fn division_operands(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<(i64, i64)> {
    let (b, a) = interpreter.pop_pair(token)?;

    if b.value() == 0 {
        return script_error(interpreter, token, ErrorKind::DivisionByZero);
    }

    Ok((a.value(), b.value()))
}

fn word_add(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    binary_op(interpreter, token, |a, b| a.wrapping_add(b))
}

fn word_subtract(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    binary_op(interpreter, token, |a, b| a.wrapping_sub(b))
}

fn word_multiply(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    binary_op(interpreter, token, |a, b| a.wrapping_mul(b))
}

fn word_divide(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let (a, b) = division_operands(interpreter, token)?;

    interpreter.push(floored_div(a, b).to_number());
    Ok(None)
}

fn word_mod(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let (a, b) = division_operands(interpreter, token)?;

    interpreter.push(floored_mod(a, b).to_number());
    Ok(None)
}

/// Signature: `a b -- remainder quotient`
fn word_div_mod(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let (a, b) = division_operands(interpreter, token)?;

    interpreter.push(floored_mod(a, b).to_number());
    interpreter.push(floored_div(a, b).to_number());

    Ok(None)
}

fn word_equal(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    comparison_op(interpreter, token, |a, b| a == b)
}

fn word_less(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    comparison_op(interpreter, token, |a, b| a < b)
}

fn word_greater(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    comparison_op(interpreter, token, |a, b| a > b)
}

/// Flip every bit of the top cell.  The cell is changed in place and stays on the stack.
fn word_invert(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let cell = interpreter.peek(token)?;

    cell.set_value(!cell.value());
    Ok(None)
}

/// Add 4 to the top cell, in place.
fn word_dot_four(interpreter: &mut dyn Interpreter, token: &Token) -> error::Result<Option<String>> {
    let cell = interpreter.peek(token)?;

    cell.set_value(cell.value().wrapping_add(4));
    Ok(None)
}

pub fn register_arithmetic_words(table: &mut WordTable) {
    add_native_word!(table, "+", word_add, "Add 2 numbers.", "a b -- result");

    add_native_word!(
        table,
        "-",
        word_subtract,
        "Subtract the top number from the one below it.",
        "a b -- result"
    );

    add_native_word!(table, "*", word_multiply, "Multiply 2 numbers.", "a b -- result");

    add_native_word!(
        table,
        "/",
        word_divide,
        "Divide 2 numbers, rounding toward negative infinity.",
        "a b -- quotient"
    );

    add_native_word!(
        table,
        "mod",
        word_mod,
        "The remainder of a floored division.",
        "a b -- remainder"
    );

    add_native_word!(
        table,
        "/mod",
        word_div_mod,
        "Both the remainder and the quotient of a floored division.",
        "a b -- remainder quotient"
    );

    add_native_word!(table, "=", word_equal, "Are 2 numbers equal?", "a b -- flag");

    add_native_word!(
        table,
        "<",
        word_less,
        "Is the lower number less than the top number?",
        "a b -- flag"
    );

    add_native_word!(
        table,
        ">",
        word_greater,
        "Is the lower number greater than the top number?",
        "a b -- flag"
    );

    add_native_word!(
        table,
        "invert",
        word_invert,
        "Flip all the bits of the top cell in place.",
        "value -- value"
    );

    add_native_word!(table, ".4", word_dot_four, "Add 4 to the top cell in place.", "value -- value");
}
