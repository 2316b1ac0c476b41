use std::{ cell::Cell,
           fmt::{ self,
                  Debug,
                  Display,
                  Formatter },
           rc::Rc };



/// The core storage unit of the interpreter.  A Number is a mutable box holding a signed integer,
/// and it is the unit of storage for both the data stack and for variables.
///
/// Cloning a Number does not copy the value, it produces another handle to the same cell.  So
/// pushing a cell onto the stack and then mutating it in place, (for example with `invert` or
/// after fetching it with `@`,) is visible to every holder of that cell.  Two cells are never the
/// same cell just because their values happen to match.
#[derive(Clone, Default)]
pub struct Number(Rc<Cell<i64>>);


/// Convert an arbitrary data type into a fresh Number cell.
pub trait ToNumber
{
    /// Implement to handle the actual conversion.
    fn to_number(&self) -> Number;
}


impl ToNumber for i64
{
    fn to_number(&self) -> Number
    {
        Number::new(*self)
    }
}


/// Flags follow the Forth convention, all bits set for true and zero for false.
impl ToNumber for bool
{
    fn to_number(&self) -> Number
    {
        Number::new(if *self { -1 } else { 0 })
    }
}


impl From<i64> for Number
{
    fn from(value: i64) -> Number
    {
        Number::new(value)
    }
}


impl Display for Number
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self.value())
    }
}


impl Debug for Number
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "Number({})", self.value())
    }
}


impl Number
{
    /// Allocate a brand new cell holding the given value.
    pub fn new(value: i64) -> Number
    {
        Number(Rc::new(Cell::new(value)))
    }

    pub fn value(&self) -> i64
    {
        self.0.get()
    }

    /// Overwrite the value held by the cell.  Every holder of the cell sees the new value.
    pub fn set_value(&self, value: i64)
    {
        self.0.set(value);
    }

    /// Are both handles referring to the very same cell?
    pub fn is_same_cell(&self, other: &Number) -> bool
    {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
