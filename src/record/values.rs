//! Field value map passed between the codec and record types

use std::collections::BTreeMap;

use crate::schema::FieldId;
use crate::value::{FromValue, Value};

use super::errors::{RecordError, RecordResult};

/// Values keyed by field id.
///
/// A field that is absent had no cell in the document (short row or skipped
/// column). A field holding `Value::Null` had an empty cell in a nullable
/// column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    values: BTreeMap<FieldId, Value>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<FieldId>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<FieldId>, value: impl Into<Value>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.values.remove(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &Value)> {
        self.values.iter()
    }

    /// Removes and converts a field. `Ok(None)` when absent.
    pub fn take<V: FromValue>(&mut self, field: &str) -> RecordResult<Option<V>> {
        match self.values.remove_entry(field) {
            None => Ok(None),
            Some((id, value)) => V::from_value(value)
                .map(Some)
                .map_err(|found| RecordError::TypeMismatch {
                    field: id,
                    expected: std::any::type_name::<V>(),
                    found: found.type_name(),
                }),
        }
    }

    /// Like `take`, falling back to `V::default()` when absent
    pub fn take_or_default<V: FromValue + Default>(&mut self, field: &str) -> RecordResult<V> {
        Ok(self.take(field)?.unwrap_or_default())
    }

    /// Like `take`, failing with `MissingField` when absent
    pub fn take_required<V: FromValue>(&mut self, field: &str) -> RecordResult<V> {
        self.take(field)?.ok_or_else(|| RecordError::MissingField {
            field: FieldId::from(field.to_string()),
        })
    }
}

impl IntoIterator for FieldValues {
    type Item = (FieldId, Value);
    type IntoIter = std::collections::btree_map::IntoIter<FieldId, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<K: Into<FieldId>, V: Into<Value>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
