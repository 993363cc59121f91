//! Destination records.
//!
//! A record describes its fields explicitly: for each one, its Rust
//! identifier, its annotation, and a typed mutable [`Slot`] the decoder
//! writes through. [`impl_record!`](crate::impl_record) generates the
//! description for a plain struct.

/// Mutable access to one field of a record.
#[derive(Debug)]
pub enum Slot<'a> {
    Str(&'a mut String),
    Int(&'a mut i64),
    Float(&'a mut f64),
    Bool(&'a mut bool),
}

impl<'a> From<&'a mut String> for Slot<'a> {
    fn from(value: &'a mut String) -> Self {
        Slot::Str(value)
    }
}

impl<'a> From<&'a mut i64> for Slot<'a> {
    fn from(value: &'a mut i64) -> Self {
        Slot::Int(value)
    }
}

impl<'a> From<&'a mut f64> for Slot<'a> {
    fn from(value: &'a mut f64) -> Self {
        Slot::Float(value)
    }
}

impl<'a> From<&'a mut bool> for Slot<'a> {
    fn from(value: &'a mut bool) -> Self {
        Slot::Bool(value)
    }
}

/// One field of a record, in declaration order.
#[derive(Debug)]
pub struct Field<'a> {
    /// Rust field identifier, used in `struct:` errors.
    pub ident: &'a str,
    /// Empty when the field is not decoded.
    pub annotation: &'a str,
    pub slot: Slot<'a>,
}

impl<'a> Field<'a> {
    pub fn new(ident: &'a str, annotation: &'a str, slot: impl Into<Slot<'a>>) -> Self {
        Self {
            ident,
            annotation,
            slot: slot.into(),
        }
    }

    /// A field the decoder leaves untouched.
    pub fn untagged(ident: &'a str, slot: impl Into<Slot<'a>>) -> Self {
        Self::new(ident, "", slot)
    }
}

/// A type the decoder can populate.
pub trait Record {
    /// Returns the fields in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// Implements [`Record`] for a struct.
///
/// Fields followed by `=> "annotation"` are decoded; bare fields are listed
/// as untagged and never written.
///
/// ```
/// #[derive(Default)]
/// struct User {
///     email: String,
///     uid: i64,
///     note: String,
/// }
///
/// digo::impl_record!(User {
///     email => "email, emailfield(), required()",
///     uid => "uid, intfield(), minmax(1|100)",
///     note,
/// });
///
/// let mut user = User::default();
/// digo::unmarshal(br#"{"email":"a.b@example.com","uid":7,"note":"x"}"#, &mut user).unwrap();
/// assert_eq!(user.email, "a.b@example.com");
/// assert_eq!(user.uid, 7);
/// assert_eq!(user.note, "");
/// ```
#[macro_export]
macro_rules! impl_record {
    (@annotation $annotation:expr) => {
        $annotation
    };
    (@annotation) => {
        ""
    };
    ($record:ident { $($field:ident $(=> $annotation:expr)?),* $(,)? }) => {
        impl $crate::Record for $record {
            fn fields(&mut self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![
                    $(
                        $crate::Field::new(
                            stringify!($field),
                            $crate::impl_record!(@annotation $($annotation)?),
                            &mut self.$field,
                        ),
                    )*
                ]
            }
        }
    };
}
