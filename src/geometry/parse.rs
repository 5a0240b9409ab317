use crate::error::{GeometryError, Result};

/// Parses `Name(x, y, z)` or a bare `x, y, z` triple into three numbers.
///
/// A named form whose name is not `expected` yields a type mismatch; any
/// component count other than three yields an arity error.
pub(crate) fn parse_triple(text: &str, expected: &'static str) -> Result<[f64; 3]> {
    let text = text.trim();
    let body = match text.find('(') {
        Some(open) => {
            let name = text[..open].trim();
            let inner = text[open + 1..]
                .strip_suffix(')')
                .ok_or_else(|| GeometryError::Parse(format!("unclosed parenthesis in {text:?}")))?;
            if name != expected {
                return Err(GeometryError::TypeMismatch {
                    expected,
                    found: name.to_owned(),
                }
                .into());
            }
            inner
        }
        None => text,
    };

    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(GeometryError::InvalidArity {
            kind: expected,
            expected: 3,
            found: parts.len(),
        }
        .into());
    }

    let mut coords = [0.0; 3];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| GeometryError::Parse(format!("{part:?} is not a number")))?;
    }
    Ok(coords)
}

/// Checks that a slice holds exactly three components.
pub(crate) fn triple_from_slice(values: &[f64], kind: &'static str) -> Result<[f64; 3]> {
    <[f64; 3]>::try_from(values).map_err(|_| {
        GeometryError::InvalidArity {
            kind,
            expected: 3,
            found: values.len(),
        }
        .into()
    })
}
