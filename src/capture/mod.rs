pub mod raw_csv;

pub use raw_csv::{DataError, PacketRecord, RawCsvReader};
