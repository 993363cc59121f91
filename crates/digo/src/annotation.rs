//! Field annotation parser.
//!
//! An annotation is a comma-separated list:
//!
//! ```text
//! <json name>, <kind>(), <constraint>(), ...
//! ```
//!
//! where `<kind>` is one of `stringfield`, `intfield`, `emailfield` and each
//! constraint is `required()` or `minmax(<min>|<max>)`.

use crate::error::DecodeError;
use crate::matchers::Matchers;
use crate::options::{DecodeOptions, UnknownConstraintPolicy};

/// Destination kind selected by the second annotation segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Int,
    Email,
}

impl FieldKind {
    /// Matches a trimmed kind segment by prefix.
    fn from_segment(segment: &str) -> Option<Self> {
        if segment.starts_with("stringfield()") {
            Some(FieldKind::String)
        } else if segment.starts_with("intfield()") {
            Some(FieldKind::Int)
        } else if segment.starts_with("emailfield()") {
            Some(FieldKind::Email)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Required,
    /// Inclusive bounds on string length (in chars) or integer value.
    MinMax { min: i64, max: i64 },
}

/// Parsed annotation of one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// JSON key to look up.
    pub name: String,
    pub kind: FieldKind,
    /// Evaluated in declaration order.
    pub constraints: Vec<Constraint>,
}

/// Parses the annotation attached to the record field `ident`.
///
/// Returns `Ok(None)` for an empty annotation: the field is not decoded.
pub fn parse_annotation(
    ident: &str,
    annotation: &str,
    matchers: &Matchers,
    options: &DecodeOptions,
) -> Result<Option<FieldSpec>, DecodeError> {
    if annotation.trim().is_empty() {
        return Ok(None);
    }

    let segments: Vec<&str> = annotation.split(',').map(str::trim).collect();
    if segments.len() < 2 {
        return Err(DecodeError::InvalidAnnotation {
            ident: ident.to_string(),
        });
    }

    let name = segments[0].to_string();
    let kind = match FieldKind::from_segment(segments[1]) {
        Some(kind) => kind,
        None => return Err(DecodeError::InvalidFieldKind { name }),
    };

    let mut constraints = Vec::with_capacity(segments.len() - 2);
    for segment in &segments[2..] {
        if segment.starts_with("required") {
            constraints.push(Constraint::Required);
        } else if segment.starts_with("minmax(") {
            let (min, max) = matchers
                .minmax_bounds(segment)
                .ok_or_else(|| DecodeError::InvalidConstraintSyntax { name: name.clone() })?;
            constraints.push(Constraint::MinMax { min, max });
        } else if segment.is_empty() {
            continue;
        } else if options.unknown_constraints == UnknownConstraintPolicy::Reject {
            return Err(DecodeError::UnknownConstraint {
                name,
                constraint: segment.to_string(),
            });
        } else {
            tracing::trace!(field = %name, constraint = %segment, "ignoring unknown constraint");
        }
    }

    Ok(Some(FieldSpec {
        name,
        kind,
        constraints,
    }))
}
