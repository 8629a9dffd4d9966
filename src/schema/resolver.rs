//! Schema resolution
//!
//! Maps field descriptors to concrete column indices.
//!
//! Without a header row every active field must declare its index. With a
//! header row, fields are matched by lookup name:
//! - no match: `ColumnNotFound` in strict mode, otherwise the field is skipped
//! - one match: bound to it
//! - several matches: the declared index must select one of them
//!
//! Ignored fields never take part.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::tokenizer::Row;

use super::errors::{SchemaError, SchemaResult};
use super::types::{ColumnSchema, FieldDescriptor, FieldId, ResolvedColumn};

/// Resolves descriptors against an optional header row.
///
/// # Errors
///
/// - `MissingIndex` / `DuplicateIndex` / `DuplicateField`: descriptors are
///   inconsistent
/// - `ColumnNotFound`: strict mode, no header cell matches
/// - `AmbiguousColumn`: the header repeats the name and the declared index
///   does not point at one of the repeats
pub fn resolve(
    descriptors: &[FieldDescriptor],
    header: Option<&Row>,
    strict: bool,
) -> SchemaResult<ColumnSchema> {
    check_unique_fields(descriptors)?;

    match header {
        None => resolve_by_index(descriptors),
        Some(header) => resolve_by_header(descriptors, header, strict),
    }
}

/// Derives descriptors from a header row, one text field per cell.
///
/// # Errors
///
/// Returns `DuplicateHeader` if a name appears twice, since discovered field
/// ids must be unique.
pub fn discover(header: &Row) -> SchemaResult<Vec<FieldDescriptor>> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(header.len());

    header
        .iter()
        .enumerate()
        .map(|(index, name)| {
            if let Some(&first) = seen.get(name) {
                return Err(SchemaError::DuplicateHeader {
                    name: name.to_string(),
                    first,
                    second: index,
                });
            }
            seen.insert(name, index);
            Ok(FieldDescriptor::text(name.to_string()).at(index))
        })
        .collect()
}

/// Builds the schema used when writing without a document to match.
///
/// Declared indices are kept. Fields without one take the lowest free
/// positions, in declaration order.
pub fn for_writing(descriptors: &[FieldDescriptor]) -> SchemaResult<ColumnSchema> {
    check_unique_fields(descriptors)?;

    let mut claims = Claims::default();
    for descriptor in active(descriptors) {
        if let Some(index) = descriptor.declared_index {
            claims.claim(index, descriptor)?;
        }
    }

    let mut next_free = 0;
    for descriptor in active(descriptors).filter(|d| d.declared_index.is_none()) {
        while claims.is_claimed(next_free) {
            next_free += 1;
        }
        claims.claim(next_free, descriptor)?;
    }

    Ok(claims.into_schema(Vec::new()))
}

fn resolve_by_index(descriptors: &[FieldDescriptor]) -> SchemaResult<ColumnSchema> {
    let mut claims = Claims::default();

    for descriptor in active(descriptors) {
        let index = descriptor
            .declared_index
            .ok_or_else(|| SchemaError::MissingIndex {
                field: descriptor.field_id.clone(),
            })?;
        claims.claim(index, descriptor)?;
    }

    Ok(claims.into_schema(Vec::new()))
}

fn resolve_by_header(
    descriptors: &[FieldDescriptor],
    header: &Row,
    strict: bool,
) -> SchemaResult<ColumnSchema> {
    let mut claims = Claims::default();
    let mut skipped = Vec::new();

    for descriptor in active(descriptors) {
        let name = descriptor.lookup_name();
        let matches: Vec<usize> = header.positions_of(name).collect();

        match matches.as_slice() {
            [] if strict => {
                return Err(SchemaError::ColumnNotFound {
                    field: descriptor.field_id.clone(),
                    column: name.to_string(),
                });
            }
            [] => skipped.push(descriptor.field_id.clone()),
            [index] => claims.claim(*index, descriptor)?,
            _ => match descriptor.declared_index {
                Some(index) if matches.contains(&index) => claims.claim(index, descriptor)?,
                declared_index => {
                    return Err(SchemaError::AmbiguousColumn {
                        field: descriptor.field_id.clone(),
                        column: name.to_string(),
                        matches: matches.clone(),
                        declared_index,
                    });
                }
            },
        }
    }

    Ok(claims.into_schema(skipped))
}

fn active(descriptors: &[FieldDescriptor]) -> impl Iterator<Item = &FieldDescriptor> {
    descriptors.iter().filter(|d| !d.ignored)
}

fn check_unique_fields(descriptors: &[FieldDescriptor]) -> SchemaResult<()> {
    let mut seen = HashSet::with_capacity(descriptors.len());
    for descriptor in descriptors {
        if !seen.insert(&descriptor.field_id) {
            return Err(SchemaError::DuplicateField {
                field: descriptor.field_id.clone(),
            });
        }
    }
    Ok(())
}

/// Column indices claimed so far
#[derive(Default)]
struct Claims {
    columns: BTreeMap<usize, ResolvedColumn>,
}

impl Claims {
    fn is_claimed(&self, index: usize) -> bool {
        self.columns.contains_key(&index)
    }

    fn claim(&mut self, index: usize, descriptor: &FieldDescriptor) -> SchemaResult<()> {
        if let Some(existing) = self.columns.get(&index) {
            return Err(SchemaError::DuplicateIndex {
                index,
                first: existing.field_id.clone(),
                second: descriptor.field_id.clone(),
            });
        }
        self.columns
            .insert(index, ResolvedColumn::bind(descriptor, index));
        Ok(())
    }

    fn into_schema(self, skipped: Vec<FieldId>) -> ColumnSchema {
        ColumnSchema::new(self.columns.into_values().collect(), skipped)
    }
}
