pub use ttaaii_tables::{
    KeyedTable, RangeTable, StationTable, SyntheticLabels, TableDefinition, TableEntry,
    TableGroup, TtaaiiTables, fill, metadata_str,
};
