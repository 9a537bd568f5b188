//! Label conversions for closed status enums
//!
//! Status enums travel as lowercase labels: in persisted JSON, in log
//! fields, and in operator-facing messages. One macro keeps the label table
//! in a single place and derives everything else from it.
//!
//! # Example
//!
//! ```rust
//! use fieldops_domain::impl_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum VisitOutcome {
//!     Scheduled,
//!     Done,
//!     Skipped,
//! }
//!
//! impl_label_conversions!(VisitOutcome {
//!     Scheduled => "scheduled",
//!     Done => "done",
//!     Skipped => "skipped",
//! });
//!
//! assert_eq!(VisitOutcome::Done.as_label(), "done");
//! ```

/// Implements `as_label`, `Display`, and `FromStr` for a status enum from
/// one variant-to-label table.
///
/// Parsing is case-insensitive; output is always the lowercase label.
#[macro_export]
macro_rules! impl_label_conversions {
    ($enum_name:ident { $($variant:ident => $label:expr),+ $(,)? }) => {
        impl $enum_name {
            /// The canonical lowercase label for this variant.
            pub const fn as_label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_label())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(format!("unrecognized {} label: {s}", stringify!($enum_name))),
                }
            }
        }
    };
}
