//! Form-context binding
//!
//! A form context is an external key/value record with a single mutation
//! entry point. Widgets bound to a named field read that field and write by
//! handing a complete replacement record to the context's `on_change`.

use serde_json::{Map, Value};

/// The record behind a form: field name to field value
pub type FormData = Map<String, Value>;

/// A view of a form record plus the action used to replace it
///
/// The context borrows the record for one event or render; the caller's
/// store owns it.
pub struct FormContext<'a, A> {
    /// Current form record
    pub data: &'a FormData,
    /// Build the action that replaces the whole record
    pub on_change: fn(FormData) -> A,
}

impl<A> Clone for FormContext<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for FormContext<'_, A> {}

impl<A> std::fmt::Debug for FormContext<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormContext")
            .field("data", self.data)
            .finish_non_exhaustive()
    }
}

impl<'a, A> FormContext<'a, A> {
    /// Create a form context over a record
    pub fn new(data: &'a FormData, on_change: fn(FormData) -> A) -> Self {
        Self { data, on_change }
    }

    /// Read a string field
    ///
    /// Missing fields and non-string values read as the empty string.
    pub fn field(&self, name: &str) -> &'a str {
        self.data.get(name).and_then(Value::as_str).unwrap_or("")
    }

    /// Build the action that sets one field, keeping every sibling field
    pub fn set_field(&self, name: &str, value: impl Into<String>) -> A {
        let mut next = self.data.clone();
        next.insert(name.to_string(), Value::String(value.into()));
        (self.on_change)(next)
    }
}

/// Build a form record from string pairs
pub fn form_data<'k, I>(fields: I) -> FormData
where
    I: IntoIterator<Item = (&'k str, &'k str)>,
{
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
        .collect()
}

/// Replace a stored record with the next one
///
/// Returns `true` if anything changed. Intended as the body of a form
/// store's reducer arm.
pub fn apply_form_change(data: &mut FormData, next: FormData) -> bool {
    if *data == next {
        return false;
    }
    *data = next;
    true
}
