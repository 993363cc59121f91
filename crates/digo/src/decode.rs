//! Decode-and-validate engine.
//!
//! Parses the input into a `serde_json` object, then walks the record's
//! fields in declaration order: look up the JSON key, check that source and
//! destination types agree, assign, then run the field's constraints. The
//! first failure aborts the decode.

use serde_json::{Map, Value};
use std::sync::OnceLock;

use crate::annotation::{parse_annotation, Constraint, FieldKind, FieldSpec};
use crate::error::{DecodeError, ExpectedType, RangeBound};
use crate::matchers::Matchers;
use crate::options::DecodeOptions;
use crate::record::{Field, Record, Slot};

/// Value written into a field, kept for constraint checks.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Coerced<'v> {
    Str(&'v str),
    Int(i64),
}

/// Decodes JSON objects into [`Record`]s.
///
/// Immutable once built; a single decoder can serve many threads.
#[derive(Debug, Clone)]
pub struct Decoder {
    matchers: Matchers,
    options: DecodeOptions,
}

impl Decoder {
    pub fn new() -> Self {
        Self::with_options(DecodeOptions::default())
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self::with_matchers(Matchers::shared().clone(), options)
    }

    pub fn with_matchers(matchers: Matchers, options: DecodeOptions) -> Self {
        Self { matchers, options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Parses `raw` as a JSON object and decodes it into `record`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::MalformedInput`] if `raw` is not a JSON object, an
    /// annotation error if any field annotation is invalid (checked before
    /// any field is written), otherwise the first type, format or constraint
    /// violation in field order.
    pub fn decode<R: Record + ?Sized>(&self, raw: &[u8], record: &mut R) -> Result<(), DecodeError> {
        let document: Map<String, Value> = serde_json::from_slice(raw)?;
        self.decode_object(&document, record)
    }

    /// Decodes an already parsed JSON object into `record`.
    pub fn decode_object<R: Record + ?Sized>(
        &self,
        document: &Map<String, Value>,
        record: &mut R,
    ) -> Result<(), DecodeError> {
        let mut fields = record.fields();
        let specs = fields
            .iter()
            .map(|field| parse_annotation(field.ident, field.annotation, &self.matchers, &self.options))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| tracing::debug!(error = %err, "invalid annotation"))?;

        for (field, spec) in fields.iter_mut().zip(&specs) {
            let Some(spec) = spec else {
                continue;
            };
            tracing::trace!(ident = field.ident, name = %spec.name, kind = ?spec.kind, "decoding field");
            self.decode_field(field, spec, document.get(&spec.name))
                .inspect_err(|err| tracing::debug!(ident = field.ident, error = %err, "decode failed"))?;
        }
        Ok(())
    }

    fn decode_field(
        &self,
        field: &mut Field<'_>,
        spec: &FieldSpec,
        raw: Option<&Value>,
    ) -> Result<(), DecodeError> {
        let value = match raw {
            None | Some(Value::Null) => None,
            Some(raw) => Some(self.assign(field, spec, raw)?),
        };
        for constraint in &spec.constraints {
            check_constraint(&spec.name, constraint, value)?;
        }
        Ok(())
    }

    /// Type-checks `raw` against the field, then writes it.
    fn assign<'v>(
        &self,
        field: &mut Field<'_>,
        spec: &FieldSpec,
        raw: &'v Value,
    ) -> Result<Coerced<'v>, DecodeError> {
        let ident = field.ident;
        match spec.kind {
            FieldKind::String | FieldKind::Email => {
                let Value::String(text) = raw else {
                    return Err(field_mismatch(spec, ExpectedType::String));
                };
                let Slot::Str(dst) = &mut field.slot else {
                    return Err(destination_mismatch(ident, ExpectedType::String));
                };
                if spec.kind == FieldKind::Email && !self.matchers.is_email(text) {
                    return Err(DecodeError::EmailFormatViolation {
                        name: spec.name.clone(),
                    });
                }
                **dst = text.clone();
                Ok(Coerced::Str(text.as_str()))
            }
            FieldKind::Int => {
                let Value::Number(number) = raw else {
                    return Err(field_mismatch(spec, ExpectedType::Integer));
                };
                let Slot::Int(dst) = &mut field.slot else {
                    return Err(destination_mismatch(ident, ExpectedType::Integer));
                };
                // Floats truncate toward zero; out of range values saturate.
                let value = number
                    .as_i64()
                    .unwrap_or_else(|| number.as_f64().unwrap_or(0.0) as i64);
                **dst = value;
                Ok(Coerced::Int(value))
            }
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

fn field_mismatch(spec: &FieldSpec, expected: ExpectedType) -> DecodeError {
    DecodeError::FieldTypeMismatch {
        name: spec.name.clone(),
        expected,
    }
}

fn destination_mismatch(ident: &str, expected: ExpectedType) -> DecodeError {
    DecodeError::DestinationTypeMismatch {
        ident: ident.to_string(),
        expected,
    }
}

/// `value` is `None` when the key was absent or null.
fn check_constraint(
    name: &str,
    constraint: &Constraint,
    value: Option<Coerced<'_>>,
) -> Result<(), DecodeError> {
    let bound = match (*constraint, value) {
        (Constraint::Required, None) => {
            return Err(DecodeError::RequiredViolation {
                name: name.to_string(),
            })
        }
        (Constraint::Required, Some(Coerced::Str(text))) if text.is_empty() => {
            return Err(DecodeError::RequiredViolation {
                name: name.to_string(),
            })
        }
        (Constraint::Required, Some(_)) | (Constraint::MinMax { .. }, None) => None,
        (Constraint::MinMax { min, max }, Some(Coerced::Str(text))) => {
            let len = i64::try_from(text.chars().count()).unwrap_or(i64::MAX);
            if len < min {
                Some(RangeBound::TooShort)
            } else if len > max {
                Some(RangeBound::TooLong)
            } else {
                None
            }
        }
        (Constraint::MinMax { min, max }, Some(Coerced::Int(n))) => {
            if n < min {
                Some(RangeBound::TooSmall)
            } else if n > max {
                Some(RangeBound::TooBig)
            } else {
                None
            }
        }
    };
    match bound {
        Some(bound) => Err(DecodeError::RangeViolation {
            name: name.to_string(),
            bound,
        }),
        None => Ok(()),
    }
}

fn default_decoder() -> &'static Decoder {
    static DECODER: OnceLock<Decoder> = OnceLock::new();
    DECODER.get_or_init(Decoder::new)
}

/// Decodes `raw` into `record` with the default options.
///
/// ```
/// #[derive(Default)]
/// struct Account {
///     uid: i64,
/// }
///
/// digo::impl_record!(Account { uid => "uid, intfield(), minmax(2|5)" });
///
/// let mut account = Account::default();
/// digo::unmarshal(br#"{"uid":4}"#, &mut account).unwrap();
/// assert_eq!(account.uid, 4);
///
/// let err = digo::unmarshal(br#"{"uid":7}"#, &mut account).unwrap_err();
/// assert_eq!(err.to_string(), "field: uid is too big");
/// ```
pub fn unmarshal<R: Record + ?Sized>(raw: &[u8], record: &mut R) -> Result<(), DecodeError> {
    default_decoder().decode(raw, record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(constraint: Constraint, value: Option<Coerced<'_>>) -> Result<(), String> {
        check_constraint("f", &constraint, value).map_err(|e| e.to_string())
    }

    #[test]
    fn test_required() {
        assert_eq!(check(Constraint::Required, None), Err("field: f is required".into()));
        assert_eq!(
            check(Constraint::Required, Some(Coerced::Str(""))),
            Err("field: f is required".into())
        );
        assert_eq!(check(Constraint::Required, Some(Coerced::Str("x"))), Ok(()));
        assert_eq!(check(Constraint::Required, Some(Coerced::Int(0))), Ok(()));
    }

    #[test]
    fn test_minmax_string_counts_chars() {
        let c = Constraint::MinMax { min: 2, max: 3 };
        assert_eq!(check(c, Some(Coerced::Str("a"))), Err("field: f is too short".into()));
        assert_eq!(check(c, Some(Coerced::Str("ab"))), Ok(()));
        assert_eq!(check(c, Some(Coerced::Str("été"))), Ok(()));
        assert_eq!(check(c, Some(Coerced::Str("abcd"))), Err("field: f is too long".into()));
    }

    #[test]
    fn test_minmax_int_is_inclusive() {
        let c = Constraint::MinMax { min: 2, max: 5 };
        assert_eq!(check(c, Some(Coerced::Int(1))), Err("field: f is too small".into()));
        assert_eq!(check(c, Some(Coerced::Int(2))), Ok(()));
        assert_eq!(check(c, Some(Coerced::Int(5))), Ok(()));
        assert_eq!(check(c, Some(Coerced::Int(6))), Err("field: f is too big".into()));
        assert_eq!(check(c, Some(Coerced::Int(-3))), Err("field: f is too small".into()));
    }

    #[test]
    fn test_minmax_skips_absent_value() {
        assert_eq!(check(Constraint::MinMax { min: 2, max: 5 }, None), Ok(()));
    }

    #[test]
    fn test_default_decoder_is_memoized() {
        assert!(std::ptr::eq(default_decoder(), default_decoder()));
    }
}
