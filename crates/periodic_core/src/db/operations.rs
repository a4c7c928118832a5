//! Registry of named store operations.
//!
//! # Responsibility
//! - Map each lookup/aggregate the repository may request to its SQL text.
//! - Fix the parameter arity of every operation.
//!
//! # Invariants
//! - Element operations select the eight element columns in storage order.
//! - Operation names are stable; they appear in logs and errors.

macro_rules! select_elements {
    ($tail:literal) => {
        concat!(
            "SELECT
    AtomicNumber,
    Symbol,
    Name,
    AtomicMass,
    Block,
    GroupNumber,
    Period,
    ElectronConfiguration
FROM Elements",
            $tail
        )
    };
}

/// A named, parameterized operation understood by the element store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    GetElementByNumber,
    GetElementBySymbol,
    GetElementsByBlock,
    GetElementsByPeriod,
    SelectAllElements,
    CountElements,
    CountElementsByBlock,
    AverageAtomicMass,
}

#[derive(Debug, Clone, Copy)]
struct OperationDef {
    operation: StoreOperation,
    name: &'static str,
    sql: &'static str,
    param_count: usize,
}

const OPERATIONS: &[OperationDef] = &[
    OperationDef {
        operation: StoreOperation::GetElementByNumber,
        name: "GetElementByNumber",
        sql: select_elements!(" WHERE AtomicNumber = ?1;"),
        param_count: 1,
    },
    OperationDef {
        operation: StoreOperation::GetElementBySymbol,
        name: "GetElementBySymbol",
        sql: select_elements!(" WHERE Symbol = ?1;"),
        param_count: 1,
    },
    OperationDef {
        operation: StoreOperation::GetElementsByBlock,
        name: "GetElementsByBlock",
        sql: select_elements!(" WHERE Block = ?1;"),
        param_count: 1,
    },
    OperationDef {
        operation: StoreOperation::GetElementsByPeriod,
        name: "GetElementsByPeriod",
        sql: select_elements!(" WHERE Period = ?1 ORDER BY AtomicNumber;"),
        param_count: 1,
    },
    OperationDef {
        operation: StoreOperation::SelectAllElements,
        name: "SelectAllElements",
        sql: select_elements!(" ORDER BY AtomicNumber;"),
        param_count: 0,
    },
    OperationDef {
        operation: StoreOperation::CountElements,
        name: "CountElements",
        sql: "SELECT COUNT(*) FROM Elements;",
        param_count: 0,
    },
    OperationDef {
        operation: StoreOperation::CountElementsByBlock,
        name: "CountElementsByBlock",
        sql: "SELECT COUNT(*) FROM Elements WHERE Block = ?1;",
        param_count: 1,
    },
    OperationDef {
        operation: StoreOperation::AverageAtomicMass,
        name: "AverageAtomicMass",
        sql: "SELECT AVG(AtomicMass) FROM Elements;",
        param_count: 0,
    },
];

impl StoreOperation {
    pub const ALL: [StoreOperation; 8] = [
        StoreOperation::GetElementByNumber,
        StoreOperation::GetElementBySymbol,
        StoreOperation::GetElementsByBlock,
        StoreOperation::GetElementsByPeriod,
        StoreOperation::SelectAllElements,
        StoreOperation::CountElements,
        StoreOperation::CountElementsByBlock,
        StoreOperation::AverageAtomicMass,
    ];

    fn def(self) -> &'static OperationDef {
        // OPERATIONS is declared in the same order as the enum.
        let def = &OPERATIONS[self as usize];
        debug_assert_eq!(def.operation, self);
        def
    }

    /// Stable operation name used in logs and errors.
    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn sql(self) -> &'static str {
        self.def().sql
    }

    pub fn param_count(self) -> usize {
        self.def().param_count
    }
}
