//! Rendering of error entries into text.
//!
//! The engine only records message keys and args. Consumers plug their own
//! lookup or localization in through [`MessageCatalog`]; [`DefaultMessages`]
//! is the English fallback used by the `Display` impls.

use crate::errors::ErrorEntry;

/// Turns an [`ErrorEntry`] recorded under an error key into text.
pub trait MessageCatalog {
    /// Renders one entry. `key` is the error key it was recorded under.
    fn render(&self, key: &str, entry: &ErrorEntry) -> String;
}

impl<F> MessageCatalog for F
where
    F: Fn(&str, &ErrorEntry) -> String,
{
    fn render(&self, key: &str, entry: &ErrorEntry) -> String {
        self(key, entry)
    }
}

/// English messages for the built-in checks.
///
/// Unknown message keys render as `"<key> is invalid (<message>)"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl MessageCatalog for DefaultMessages {
    fn render(&self, key: &str, entry: &ErrorEntry) -> String {
        let arg = entry
            .args()
            .first()
            .map(ToString::to_string)
            .unwrap_or_default();

        match entry.message() {
            "presence" => format!("{key} is not present"),
            "max_length" => format!("{key} is longer than {arg} characters"),
            "greater_than_or_equal_to" => {
                format!("{key} must be greater than or equal to {arg}")
            }
            other => format!("{key} is invalid ({other})"),
        }
    }
}
