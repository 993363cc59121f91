//! Annotation-driven JSON decoding with per-field validation.
//!
//! Each field of a destination record carries an annotation naming the JSON
//! key it is read from, its kind, and a list of constraints:
//!
//! ```text
//! "email, emailfield(), required()"
//! "uid, intfield(), minmax(2|5)"
//! ```
//!
//! Decoding checks that JSON and destination types agree, writes the value,
//! then runs the constraints in order. The first failure is returned.
//!
//! # Example
//!
//! ```
//! #[derive(Default)]
//! struct User {
//!     email: String,
//!     name: String,
//! }
//!
//! digo::impl_record!(User {
//!     email => "email, emailfield()",
//!     name => "name, stringfield(), required(), minmax(2|20)",
//! });
//!
//! let mut user = User::default();
//! digo::unmarshal(br#"{"email":"toto@gmail.com","name":"toto"}"#, &mut user).unwrap();
//! assert_eq!(user.email, "toto@gmail.com");
//!
//! let err = digo::unmarshal(br#"{"email":"toto"}"#, &mut user).unwrap_err();
//! assert_eq!(err.to_string(), "field: email is not a valid email address");
//! ```

pub mod annotation;
pub mod decode;
pub mod dynamic;
pub mod error;
pub mod matchers;
pub mod options;
pub mod record;

pub use annotation::{parse_annotation, Constraint, FieldKind, FieldSpec};
pub use decode::{unmarshal, Decoder};
pub use dynamic::{check_document, DynamicRecord};
pub use error::{DecodeError, ExpectedType, RangeBound};
pub use matchers::Matchers;
pub use options::{DecodeOptions, UnknownConstraintPolicy};
pub use record::{Field, Record, Slot};
