//! Structural record-to-relation mapping.
//!
//! Relmap derives table names, column names and types, blank state, timestamp
//! autofill, and association linkage for arbitrary record types, without the
//! caller writing any mapping code. Records describe themselves through the
//! [`Record`] trait; the engine walks that description once per operation and
//! memoizes the result on the handle.
//!
//! SQL generation and execution are out of scope. The engine only consumes a
//! [`Dialect`] for storage type tags and reports recoverable problems through
//! an [`Errors`] sink.

mod error;
pub use error::{Error, Errors};

pub mod dialect;
pub use dialect::Dialect;

mod field;
pub use field::{AssociationRole, FieldDescriptor};

mod model;
pub use model::{Mapping, Model, Operation};

pub mod name;
pub use name::TableNames;

mod record;
pub use record::{Record, RecordField, RecordType};

mod value;
pub use value::{Collection, EmbeddedRecord, Nullable, Value};

/// A Result type alias that uses relmap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
