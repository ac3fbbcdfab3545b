//! Configuration options for Typst literal serialization.
//!
//! The output grammar itself is fixed (no whitespace, no formatting knobs). The
//! options only control how input is interpreted and how deep it may nest.
//!
//! ## Examples
//!
//! ```rust
//! use serde_typst::{to_string_with_options, TypstOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Guest { name: String, table: Option<u32> }
//!
//! let guest = Guest { name: "Ada".to_string(), table: None };
//!
//! // `None` fields become `none` by default
//! let typst = to_string_with_options(&guest, TypstOptions::new()).unwrap();
//! assert_eq!(typst, r#"("name":"Ada","table":none)"#);
//!
//! // ...or are left out entirely
//! let options = TypstOptions::new().with_skip_none_fields(true);
//! let typst = to_string_with_options(&guest, options).unwrap();
//! assert_eq!(typst, r#"("name":"Ada")"#);
//! ```

/// Configuration options for Typst literal serialization.
///
/// # Examples
///
/// ```rust
/// use serde_typst::TypstOptions;
///
/// let options = TypstOptions::new()
///     .with_max_depth(64)
///     .with_skip_none_fields(true);
/// assert_eq!(options.max_depth, Some(64));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypstOptions {
    /// Deepest allowed nesting of arrays and records. `None` disables the guard.
    pub max_depth: Option<usize>,
    /// Treat `Option::None` record field values as absent instead of `none`.
    pub skip_none_fields: bool,
}

impl TypstOptions {
    /// Creates default options (no depth guard, `None` fields emitted as `none`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_typst::TypstOptions;
    ///
    /// let options = TypstOptions::new();
    /// assert_eq!(options.max_depth, None);
    /// assert!(!options.skip_none_fields);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits how deeply arrays and records may nest.
    ///
    /// The top-level value sits at depth 0; its elements at depth 1, and so on.
    /// A composite at a depth greater than `max_depth` fails with
    /// [`Error::DepthLimitExceeded`](crate::Error::DepthLimitExceeded).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_typst::{to_string_with_options, TypstOptions};
    ///
    /// let nested = vec![vec![vec![1]]];
    /// let options = TypstOptions::new().with_max_depth(1);
    /// assert!(to_string_with_options(&nested, options).is_err());
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets whether `Option::None` field values are omitted from records.
    #[must_use]
    pub fn with_skip_none_fields(mut self, skip: bool) -> Self {
        self.skip_none_fields = skip;
        self
    }

    pub(crate) fn check_depth(&self, depth: usize) -> crate::Result<()> {
        match self.max_depth {
            Some(max) if depth > max => {
                tracing::debug!(depth, max, "nesting depth limit exceeded");
                Err(crate::Error::DepthLimitExceeded(max))
            }
            _ => Ok(()),
        }
    }
}
