//! Personal-data wrapper for log output
//!
//! Patient and doctor identifiers (DNI, phone numbers, addresses) must never
//! appear verbatim in logs. `Sensitive<T>` redacts itself in `Debug` and
//! `Display`; [`Sensitive::masked`] keeps a short suffix so operators can
//! still tell records apart.
//!
//! ```
//! use hospital_core_types::Sensitive;
//!
//! let dni = Sensitive::new("30123456");
//! assert_eq!(format!("{dni}"), "***REDACTED***");
//! assert_eq!(dni.masked(3), "*****456");
//! ```

use std::fmt;

pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Access the wrapped value. Only for persistence and comparisons.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: AsRef<str>> Sensitive<T> {
    /// Replace every character except the last `visible` ones with `*`
    ///
    /// At least one character is always hidden, so a short value is never
    /// shown whole.
    pub fn masked(&self, visible: usize) -> String {
        let chars: Vec<char> = self.0.as_ref().chars().collect();
        let keep = visible.min(chars.len().saturating_sub(1));
        let hidden = chars.len() - keep;
        std::iter::repeat('*')
            .take(hidden)
            .chain(chars[hidden..].iter().copied())
            .collect()
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
