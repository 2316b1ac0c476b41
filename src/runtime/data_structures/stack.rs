use crate::runtime::data_structures::value::Number;
use std::fmt::{self, Display, Formatter};

/// The data stack of the interpreter.  An unbounded LIFO of Number cells.  Cells are held by
/// handle, pushing a cell never copies its value.
///
/// Popping or peeking an empty stack is a caller error.  Those calls return `None` and leave the
/// stack untouched, the words built on top of the stack check the depth first and report a stack
/// underflow instead.
#[derive(Default)]
pub struct CellStack {
    cells: Vec<Number>,
    max_depth: usize,
}

impl CellStack {
    pub fn new() -> CellStack {
        CellStack {
            cells: Vec::with_capacity(20),
            max_depth: 0,
        }
    }

    /// Push a single cell onto the top of the stack.
    pub fn push(&mut self, cell: Number) {
        self.cells.push(cell);

        if self.cells.len() > self.max_depth {
            self.max_depth = self.cells.len();
        }
    }

    /// Push a group of cells, preserving their order.  The first cell of the group ends up the
    /// deepest of the group.
    pub fn push_all<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Number>,
    {
        for cell in cells {
            self.push(cell);
        }
    }

    /// Remove and return the most recently pushed cell.
    pub fn pop(&mut self) -> Option<Number> {
        self.cells.pop()
    }

    /// Remove and return the `count` most recently pushed cells, the most recent first.  Nothing is
    /// removed if the stack doesn't hold enough cells.
    pub fn pop_n(&mut self, count: usize) -> Option<Vec<Number>> {
        if count > self.cells.len() {
            return None;
        }

        let split = self.cells.len() - count;
        let mut popped = self.cells.split_off(split);

        popped.reverse();
        Some(popped)
    }

    /// The top cell of the stack, without removing it.
    pub fn peek(&self) -> Option<&Number> {
        self.cells.last()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The deepest the stack has been since it was created.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drop every cell on the stack.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Walk the stack from the top cell down to the bottom cell.
    pub fn iter(&self) -> impl Iterator<Item = &Number> {
        self.cells.iter().rev()
    }

    /// The values on the stack, bottom first.
    pub fn values(&self) -> Vec<i64> {
        self.cells.iter().map(Number::value).collect()
    }
}

/// Print the stack the way `.s` shows it, the depth in angle brackets followed by the values from
/// the bottom of the stack up to the top.
impl Display for CellStack {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "<{}>", self.cells.len())?;

        for cell in &self.cells {
            write!(f, " {}", cell)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(values: &[i64]) -> CellStack {
        let mut stack = CellStack::new();
        stack.push_all(values.iter().map(|value| Number::new(*value)));
        stack
    }

    #[test]
    fn pop_n_returns_most_recent_first() {
        let mut stack = stack_of(&[1, 2, 3]);
        let popped = stack.pop_n(2).unwrap();

        assert_eq!(popped[0].value(), 3);
        assert_eq!(popped[1].value(), 2);
        assert_eq!(stack.values(), vec![1]);
    }

    #[test]
    fn pop_n_past_the_bottom_leaves_the_stack_alone() {
        let mut stack = stack_of(&[1]);

        assert!(stack.pop_n(2).is_none());
        assert_eq!(stack.values(), vec![1]);
    }

    #[test]
    fn traversal_is_top_down_and_display_is_bottom_up() {
        let stack = stack_of(&[1, 2, 3]);
        let top_down: Vec<i64> = stack.iter().map(Number::value).collect();

        assert_eq!(top_down, vec![3, 2, 1]);
        assert_eq!(stack.to_string(), "<3> 1 2 3");
        assert_eq!(CellStack::new().to_string(), "<0>");
    }

    #[test]
    fn pushed_cells_keep_their_identity() {
        let cell = Number::new(5);
        let mut stack = CellStack::new();

        stack.push(cell.clone());
        cell.set_value(9);

        assert!(stack.peek().unwrap().is_same_cell(&cell));
        assert_eq!(stack.values(), vec![9]);
    }

    #[test]
    fn max_depth_survives_clear() {
        let mut stack = stack_of(&[1, 2, 3]);

        stack.clear();

        assert!(stack.is_empty());
        assert_eq!(stack.max_depth(), 3);
    }
}
