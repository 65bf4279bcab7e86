//! garnet: json validator and pretty-printer that pins down where your
//! mistake is
//!
//! ```
//! use garnet_json::{validate, IndentWidth, ValidationResult};
//!
//! let json = r#"{"name": "Alice", "age": 30}"#;
//! match validate(json, IndentWidth::Two) {
//!     ValidationResult::Valid { formatted, stats } => {
//!         println!("{formatted}");
//!         println!("{}", stats.type_description);
//!     }
//!     ValidationResult::Invalid { message, .. } => eprintln!("{message}"),
//! }
//! ```
//!
//! Validation never fails with an error: every input, including garbage
//! and the empty string, comes back as a [`ValidationResult`]. When the
//! parser cannot name an exact position, a prefix probe and a
//! bracket-balance scan take over so there is always a line to point
//! at. The `garnet` binary adds miette diagnostics with fix hints on
//! top, via [`diagnostic::explain`].

pub mod diagnostic;
pub mod locate;
pub mod validator;

pub use diagnostic::{explain, JsonError};
pub use locate::{balance_scan, Balance, Location};
pub use validator::{validate, IndentWidth, Stats, ValidationResult};
