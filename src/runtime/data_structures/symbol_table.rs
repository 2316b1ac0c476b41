use crate::runtime::data_structures::value::Number;
use std::collections::HashMap;

/// A pseudo memory address as seen by Forth code.
pub type Address = i64;

/// The distance between the addresses of two neighbouring cells.
pub const CELL_SIZE: Address = 8;

/// The address of the very first cell allocated by a symbol table, unless configured otherwise.
pub const DEFAULT_HEAP_BASE: Address = 0x1000;

/// The variable memory model of the interpreter.
///
/// Every cell handed out as storage lives in an append-only arena, so its address, (derived from
/// its slot index,) stays valid for the life of the table.  On top of the arena sits a mapping of
/// lowercased names to slots, and the list of anonymous slots that can only be reached by
/// address.
pub struct SymbolTable {
    heap_base: Address,
    cells: Vec<Number>,
    names: HashMap<String, usize>,
    nameless: Vec<usize>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new(DEFAULT_HEAP_BASE)
    }
}

impl SymbolTable {
    pub fn new(heap_base: Address) -> SymbolTable {
        SymbolTable {
            heap_base,
            cells: Vec::new(),
            names: HashMap::new(),
            nameless: Vec::new(),
        }
    }

    fn allocate(&mut self, cell: Number) -> usize {
        self.cells.push(cell);
        self.cells.len() - 1
    }

    fn address_of_slot(&self, slot: usize) -> Address {
        self.heap_base + (slot as Address) * CELL_SIZE
    }

    fn slot_of_address(&self, address: Address) -> Option<usize> {
        let offset = address.checked_sub(self.heap_base)?;

        if offset < 0 || offset % CELL_SIZE != 0 {
            return None;
        }

        let slot = usize::try_from(offset / CELL_SIZE).ok()?;

        (slot < self.cells.len()).then_some(slot)
    }

    /// Bind a name to a cell, replacing any earlier binding of that name.  The earlier cell stays
    /// in the arena so any address pointing at it remains valid.
    pub fn bind(&mut self, name: &str, cell: Number) -> Address {
        let slot = self.allocate(cell);

        self.names.insert(name.to_lowercase(), slot);
        self.address_of_slot(slot)
    }

    /// Record a cell that has no name and can only be reached through its address.
    pub fn allocate_anonymous(&mut self, cell: Number) -> Address {
        let slot = self.allocate(cell);

        self.nameless.push(slot);
        self.address_of_slot(slot)
    }

    /// Perform a `variable` declaration.  Fresh anonymous storage is allocated holding the initial
    /// value, then the name is bound to a cell holding the storage's address.  The storage's
    /// address is returned.
    pub fn declare_variable(&mut self, name: &str, initial: i64) -> Address {
        let storage = self.allocate_anonymous(Number::new(initial));

        self.bind(name, Number::new(storage));
        storage
    }

    /// Find the cell living at the given address.
    pub fn resolve_by_address(&self, address: Address) -> Option<&Number> {
        self.slot_of_address(address)
            .and_then(|slot| self.cells.get(slot))
    }

    /// Find the cell bound to the given name, ignoring case.
    pub fn resolve_by_name(&self, name: &str) -> Option<&Number> {
        self.names
            .get(&name.to_lowercase())
            .and_then(|slot| self.cells.get(*slot))
    }

    /// The address of the cell currently bound to the name.
    pub fn address_of(&self, name: &str) -> Option<Address> {
        self.names
            .get(&name.to_lowercase())
            .map(|slot| self.address_of_slot(*slot))
    }

    /// Forget a name.  The cell itself stays allocated.
    pub fn remove(&mut self, name: &str) -> Option<Number> {
        let slot = self.names.remove(&name.to_lowercase())?;
        self.cells.get(slot).cloned()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains_key(&name.to_lowercase())
    }

    /// All of the bound names, sorted.
    pub fn names(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.names.keys().collect();

        names.sort();
        names
    }

    pub fn anonymous_count(&self) -> usize {
        self.nameless.len()
    }

    /// The number of cells ever allocated.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_point_at_anonymous_storage() {
        let mut table = SymbolTable::default();
        let storage = table.declare_variable("X", 0);

        assert_eq!(table.anonymous_count(), 1);
        assert_eq!(table.resolve_by_name("x").unwrap().value(), storage);
        assert_eq!(table.resolve_by_address(storage).unwrap().value(), 0);
    }

    #[test]
    fn addresses_follow_the_heap_layout() {
        let mut table = SymbolTable::new(0x100);

        assert_eq!(table.allocate_anonymous(Number::new(1)), 0x100);
        assert_eq!(table.allocate_anonymous(Number::new(2)), 0x108);

        assert_eq!(table.resolve_by_address(0x108).unwrap().value(), 2);
        assert!(table.resolve_by_address(0x104).is_none());
        assert!(table.resolve_by_address(0x110).is_none());
        assert!(table.resolve_by_address(0).is_none());
        assert!(table.resolve_by_address(Address::MIN).is_none());
    }

    #[test]
    fn resolved_cells_are_shared() {
        let mut table = SymbolTable::default();
        let cell = Number::new(3);
        let address = table.bind("three", cell.clone());

        table.resolve_by_address(address).unwrap().set_value(4);

        assert_eq!(cell.value(), 4);
    }

    #[test]
    fn rebinding_keeps_the_old_cell_addressable() {
        let mut table = SymbolTable::default();
        let first = table.bind("a", Number::new(1));
        let second = table.bind("A", Number::new(2));

        assert_ne!(first, second);
        assert_eq!(table.resolve_by_name("a").unwrap().value(), 2);
        assert_eq!(table.resolve_by_address(first).unwrap().value(), 1);
    }

    #[test]
    fn removing_a_name_forgets_only_the_name() {
        let mut table = SymbolTable::default();
        let address = table.bind("gone", Number::new(7));

        assert_eq!(table.remove("GONE").unwrap().value(), 7);
        assert!(!table.contains_name("gone"));
        assert!(table.remove("gone").is_none());
        assert_eq!(table.resolve_by_address(address).unwrap().value(), 7);
    }
}
