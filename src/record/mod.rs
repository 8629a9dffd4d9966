//! Record types
//!
//! A record type describes its fields once (`DescribeFields`) and converts
//! to and from a `FieldValues` map (`CsvRecord`). The codec never touches
//! record fields directly.
//!
//! ```
//! use csvdoc::record::{CsvRecord, DescribeFields, FieldValues, RecordResult};
//! use csvdoc::schema::FieldDescriptor;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i64,
//! }
//!
//! impl DescribeFields for Person {
//!     fn descriptors() -> Vec<FieldDescriptor> {
//!         vec![FieldDescriptor::text("Name"), FieldDescriptor::int("Age")]
//!     }
//! }
//!
//! impl CsvRecord for Person {
//!     fn to_values(&self) -> FieldValues {
//!         FieldValues::new()
//!             .with("Name", self.name.as_str())
//!             .with("Age", self.age)
//!     }
//!
//!     fn from_values(mut values: FieldValues) -> RecordResult<Self> {
//!         Ok(Person {
//!             name: values.take_or_default("Name")?,
//!             age: values.take_or_default("Age")?,
//!         })
//!     }
//! }
//! ```

mod errors;
mod values;

pub use errors::{RecordError, RecordResult};
pub use values::FieldValues;

use crate::schema::FieldDescriptor;

/// Supplies the field descriptors of a record type.
///
/// The order of the returned descriptors is the declaration order used when
/// assigning write positions to fields without an explicit index.
pub trait DescribeFields {
    fn descriptors() -> Vec<FieldDescriptor>;
}

/// Converts a record to and from its field values.
pub trait CsvRecord: Sized {
    /// Values to write. Fields left out are written as empty cells.
    fn to_values(&self) -> FieldValues;

    /// Builds a record from the values read for one row.
    ///
    /// Fields with no cell in the row are absent from `values`.
    fn from_values(values: FieldValues) -> RecordResult<Self>;
}
