// Parameterized word tests using test-case.  Each case starts a fresh session, seeds the stack,
// evaluates one line and checks the stack that is left, bottom first.

use lforth::{ErrorKind, ForthInterpreter, InterpreterStack, Number};
use test_case::test_case;

fn eval_and_stack(line: &str, init_stack: &[i64]) -> Result<Vec<i64>, ErrorKind> {
    let mut interp = ForthInterpreter::new();

    for &value in init_stack {
        interp.push(Number::new(value));
    }

    let evaluation = interp.evaluate(line);

    match evaluation.error() {
        Some(error) => {
            // Any error leaves the stack cleared.
            assert!(interp.stack().is_empty(), "stack not cleared after {:?}", line);
            Err(error.kind())
        }

        None => Ok(interp.stack().values()),
    }
}

#[test_case("0", &[], &[0]; "zero")]
#[test_case("42", &[], &[42]; "number")]
#[test_case("-17", &[], &[-17]; "negative number")]
#[test_case("9223372036854775807", &[], &[i64::MAX]; "largest number")]
#[test_case("1 2 3", &[], &[1, 2, 3]; "several numbers")]
#[test_case("1.", &[], &[1, 0]; "double number")]
#[test_case("-1.", &[], &[-1, -1]; "negative double number")]
#[test_case("1.5", &[], &[15, 0]; "periods are dropped")]
#[test_case("--5", &[], &[5]; "low cell of a double")]
#[test_case("+", &[2, 2], &[4]; "simple add")]
#[test_case("-", &[5, 2], &[3]; "simple sub")]
#[test_case("10 3 -", &[], &[7]; "sub takes the deeper operand first")]
#[test_case("*", &[3, 4], &[12]; "simple mul")]
#[test_case("/", &[12, 3], &[4]; "simple div")]
#[test_case("6 3 /", &[], &[2]; "div from literals")]
#[test_case("/", &[-7, 2], &[-4]; "div is floored")]
#[test_case("mod", &[13, 5], &[3]; "simple mod")]
#[test_case("mod", &[-7, 2], &[1]; "mod takes the sign of the divisor")]
#[test_case("/mod", &[13, 5], &[3, 2]; "simple div mod")]
#[test_case("/mod", &[-7, 2], &[1, -4]; "floored div mod")]
#[test_case("+", &[i64::MAX, 1], &[i64::MIN]; "add wraps")]
#[test_case("*", &[i64::MAX, 2], &[-2]; "mul wraps")]
#[test_case("<", &[1, 2], &[-1]; "less is true")]
#[test_case("<", &[2, 1], &[0]; "less is false")]
#[test_case("<", &[1, 1], &[0]; "less for equal")]
#[test_case(">", &[2, 1], &[-1]; "greater is true")]
#[test_case(">", &[1, 2], &[0]; "greater is false")]
#[test_case("=", &[3, 3], &[-1]; "equal is true")]
#[test_case("=", &[3, 4], &[0]; "equal is false")]
#[test_case("invert", &[0], &[-1]; "invert")]
#[test_case("invert", &[-1], &[0]; "invert true")]
#[test_case("invert", &[1], &[-2]; "invert number")]
#[test_case(".4", &[1], &[5]; "dot four")]
#[test_case("dup", &[1], &[1, 1]; "dup")]
#[test_case("drop", &[1, 2], &[1]; "drop")]
#[test_case("swap", &[1, 2], &[2, 1]; "swap")]
#[test_case("nip", &[1, 2], &[2]; "nip")]
#[test_case("tuck", &[1, 2], &[2, 1, 2]; "tuck")]
#[test_case("rot", &[1, 2, 3], &[2, 3, 1]; "rot")]
#[test_case("rot", &[1, 2, 3, 4], &[1, 3, 4, 2]; "rot only moves the third cell")]
#[test_case("2drop", &[1, 2, 3], &[1]; "two drop")]
#[test_case("DUP", &[4], &[4, 4]; "words ignore case")]
#[test_case("2 3 plus", &[], &[5]; "plus alias")]
#[test_case("10 3 minus", &[], &[7]; "minus alias")]
#[test_case("3 4 mul", &[], &[12]; "mul alias")]
#[test_case("8 2 div", &[], &[4]; "div alias")]
#[test_case("13 5 moddiv", &[], &[3, 2]; "moddiv alias")]
#[test_case("3 3 equals", &[], &[-1]; "equals alias")]
#[test_case("1 2 greater", &[], &[-1]; "greater alias is less than")]
#[test_case("2 1 less", &[], &[-1]; "less alias is greater than")]
#[test_case("1 dotfour", &[], &[5]; "dotfour alias")]
#[test_case("Plus", &[1, 1], &[2]; "aliases ignore case")]
#[test_case("( ignored ) 7", &[], &[7]; "comment")]
#[test_case("( one ( two ) 8", &[], &[8]; "comments do not nest")]
#[test_case("1 \\ 2 3", &[], &[1]; "line comment")]
#[test_case(") 4", &[], &[4]; "stray close paren")]
#[test_case(".\" hello world\" 5", &[], &[5]; "strings leave the stack alone")]
fn forth_compat_cases(line: &str, init_stack: &[i64], expected: &[i64]) {
    assert_eq!(eval_and_stack(line, init_stack), Ok(expected.to_vec()));
}

#[test_case("+", &[] => ErrorKind::StackUnderflow; "add on empty stack")]
#[test_case("1 +", &[] => ErrorKind::StackUnderflow; "add with one value")]
#[test_case("swap", &[1] => ErrorKind::StackUnderflow; "swap with one value")]
#[test_case("drop", &[] => ErrorKind::StackUnderflow; "drop on empty stack")]
#[test_case("dup", &[] => ErrorKind::StackUnderflow; "dup on empty stack")]
#[test_case("rot", &[1, 2] => ErrorKind::StackUnderflow; "rot with two values")]
#[test_case("2drop", &[1] => ErrorKind::StackUnderflow; "two drop with one value")]
#[test_case(".", &[] => ErrorKind::StackUnderflow; "print on empty stack")]
#[test_case("emit", &[] => ErrorKind::StackUnderflow; "emit on empty stack")]
#[test_case("invert", &[] => ErrorKind::StackUnderflow; "invert on empty stack")]
#[test_case("constant c", &[] => ErrorKind::StackUnderflow; "constant on empty stack")]
#[test_case("6 0 /", &[] => ErrorKind::DivisionByZero; "division by zero")]
#[test_case("mod", &[6, 0] => ErrorKind::DivisionByZero; "mod by zero")]
#[test_case("/mod", &[6, 0] => ErrorKind::DivisionByZero; "div mod by zero")]
#[test_case("@", &[5] => ErrorKind::InvalidMemoryAddress; "fetch from nowhere")]
#[test_case("!", &[1, 7] => ErrorKind::InvalidMemoryAddress; "store to nowhere")]
#[test_case("?", &[0] => ErrorKind::InvalidMemoryAddress; "print from nowhere")]
#[test_case("frobnicate", &[1, 2] => ErrorKind::UndefinedWord; "undefined word")]
#[test_case("99999999999999999999", &[] => ErrorKind::UndefinedWord; "oversized literal")]
#[test_case(".5", &[] => ErrorKind::UndefinedWord; "ill formed number")]
fn forth_compat_error_cases(line: &str, init_stack: &[i64]) -> ErrorKind {
    match eval_and_stack(line, init_stack) {
        Ok(stack) => panic!("{:?} succeeded leaving {:?}", line, stack),
        Err(kind) => kind,
    }
}
