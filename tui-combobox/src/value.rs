//! Which store owns the selection, and how to write to it

use std::fmt;

use tui_combobox_core::FormContext;

/// The authoritative owner of a combobox's selection
///
/// Resolved once per event from the props, with a fixed precedence: a form
/// context plus a field name wins over a controlled `value`, which wins over
/// the widget's own internal value.
pub enum ValueSource<'a, A> {
    /// A named field of a form record
    Form {
        form: FormContext<'a, A>,
        name: &'a str,
    },
    /// A value owned by the caller and passed in as a prop
    Controlled {
        value: &'a str,
        on_change: Option<fn(String) -> A>,
    },
    /// The widget's own value; `on_change` is still notified on commit
    Internal { on_change: Option<fn(String) -> A> },
}

impl<'a, A> ValueSource<'a, A> {
    /// Pick the owner from the props
    pub fn resolve(
        form: Option<FormContext<'a, A>>,
        name: Option<&'a str>,
        value: Option<&'a str>,
        on_change: Option<fn(String) -> A>,
    ) -> Self {
        match (form, name, value) {
            (Some(form), Some(name), _) => ValueSource::Form { form, name },
            (_, _, Some(value)) => ValueSource::Controlled { value, on_change },
            _ => ValueSource::Internal { on_change },
        }
    }

    /// Current selection; empty means nothing is selected
    pub fn read<'b>(&self, internal: &'b str) -> &'b str
    where
        'a: 'b,
    {
        match self {
            ValueSource::Form { form, name } => form.field(name),
            ValueSource::Controlled { value, .. } => *value,
            ValueSource::Internal { .. } => internal,
        }
    }

    /// Write a new selection
    ///
    /// Returns the action the caller must dispatch for the write to land.
    /// Only the internal owner is updated in place.
    pub fn write(&self, internal: &mut String, value: &str) -> Option<A> {
        match self {
            ValueSource::Form { form, name } => Some(form.set_field(name, value)),
            ValueSource::Controlled { on_change, .. } => on_change.map(|f| f(value.to_string())),
            ValueSource::Internal { on_change } => {
                internal.clear();
                internal.push_str(value);
                on_change.map(|f| f(value.to_string()))
            }
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            ValueSource::Form { .. } => "form",
            ValueSource::Controlled { .. } => "controlled",
            ValueSource::Internal { .. } => "internal",
        }
    }
}

impl<A> fmt::Debug for ValueSource<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Form { form, name } => f
                .debug_struct("Form")
                .field("form", form)
                .field("name", name)
                .finish(),
            ValueSource::Controlled { value, .. } => {
                f.debug_struct("Controlled").field("value", value).finish_non_exhaustive()
            }
            ValueSource::Internal { .. } => f.debug_struct("Internal").finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_combobox_core::{form_data, FormData};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Form(FormData),
        Change(String),
    }

    #[test]
    fn test_form_wins_over_value() {
        let data = form_data([("country", "de")]);
        let form = FormContext::new(&data, TestAction::Form);
        let source = ValueSource::resolve(
            Some(form),
            Some("country"),
            Some("us"),
            Some(TestAction::Change as fn(String) -> TestAction),
        );

        assert_eq!(source.kind(), "form");
        assert_eq!(source.read(""), "de");
    }

    #[test]
    fn test_form_without_name_falls_through() {
        let data = form_data([("country", "de")]);
        let form = FormContext::new(&data, TestAction::Form);

        let source = ValueSource::resolve(Some(form), None, Some("us"), None);
        assert_eq!(source.kind(), "controlled");
        assert_eq!(source.read(""), "us");

        let source = ValueSource::resolve(Some(form), None, None, None);
        assert_eq!(source.kind(), "internal");
    }

    #[test]
    fn test_form_write_merges_record() {
        let data = form_data([("country", ""), ("size", "m")]);
        let form = FormContext::new(&data, TestAction::Form);
        let source = ValueSource::resolve(Some(form), Some("country"), None, None);

        let mut internal = String::new();
        let action = source.write(&mut internal, "ca");

        assert_eq!(
            action,
            Some(TestAction::Form(form_data([("country", "ca"), ("size", "m")])))
        );
        assert!(internal.is_empty());
    }

    #[test]
    fn test_controlled_write_leaves_no_local_copy() {
        let source = ValueSource::resolve(None, None, Some("us"), Some(TestAction::Change));
        let mut internal = String::new();

        assert_eq!(
            source.write(&mut internal, "ca"),
            Some(TestAction::Change("ca".into()))
        );
        assert!(internal.is_empty());
        assert_eq!(source.read(&internal), "us");
    }

    #[test]
    fn test_controlled_without_callback_is_read_only() {
        let source: ValueSource<'_, TestAction> =
            ValueSource::resolve(None, None, Some("us"), None);
        let mut internal = String::new();
        assert_eq!(source.write(&mut internal, "ca"), None);
    }

    #[test]
    fn test_internal_write_updates_and_notifies() {
        let source = ValueSource::resolve(None, None, None, Some(TestAction::Change));
        let mut internal = String::from("us");

        let action = source.write(&mut internal, "ca");

        assert_eq!(action, Some(TestAction::Change("ca".into())));
        assert_eq!(internal, "ca");
        assert_eq!(source.read(&internal), "ca");
    }

    #[test]
    fn test_internal_without_callback() {
        let source: ValueSource<'_, TestAction> = ValueSource::resolve(None, None, None, None);
        let mut internal = String::new();
        assert_eq!(source.write(&mut internal, "fr"), None);
        assert_eq!(internal, "fr");
    }
}
