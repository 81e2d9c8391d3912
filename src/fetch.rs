//! Typed fetch functions, one per supported scalar kind.
//!
//! Every fetch is a fresh query against the [`Lookup`] source. An absent
//! variable and a variable set to the empty string are treated the same way:
//! with `require_value_present` they fail with [`PopulateError::Missing`],
//! without it the raw value is the empty string and conversion still runs.

use crate::{
    environment::Lookup,
    error::{InvalidBool, ParseFailure, PopulateError},
};
use std::{any::type_name, env::VarError, num::ParseIntError, str::FromStr};

/// Fetch the raw text of `var`
pub fn fetch_raw(
    env: &dyn Lookup,
    var: &str,
    require_value_present: bool,
) -> Result<String, PopulateError> {
    tracing::trace!(var, "resolving environment variable");

    match env.var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) | Err(VarError::NotPresent) => {
            if require_value_present {
                Err(PopulateError::Missing {
                    var: var.to_string(),
                })
            } else {
                tracing::debug!(var, "environment variable missing or blank, using empty value");
                Ok(String::new())
            }
        }
        Err(VarError::NotUnicode(_)) => Err(PopulateError::InvalidUtf8 {
            var: var.to_string(),
        }),
    }
}

/// Fetch `var` verbatim
pub fn fetch_string(
    env: &dyn Lookup,
    var: &str,
    require_value_present: bool,
) -> Result<String, PopulateError> {
    fetch_raw(env, var, require_value_present)
}

/// Fetch `var` and parse it as a base-10 integer of exactly type `T`
pub fn fetch_int<T>(
    env: &dyn Lookup,
    var: &str,
    require_value_present: bool,
) -> Result<T, PopulateError>
where
    T: FromStr<Err = ParseIntError>,
{
    let raw = fetch_raw(env, var, require_value_present)?;
    raw.parse::<T>().map_err(|err| PopulateError::Parse {
        var: var.to_string(),
        value: raw,
        expected_type: type_name::<T>(),
        source: ParseFailure::Int(err),
    })
}

/// Fetch `var` and parse it with [`parse_bool`]
pub fn fetch_bool(
    env: &dyn Lookup,
    var: &str,
    require_value_present: bool,
) -> Result<bool, PopulateError> {
    let raw = fetch_raw(env, var, require_value_present)?;
    parse_bool(&raw).map_err(|err| PopulateError::Parse {
        var: var.to_string(),
        value: raw,
        expected_type: type_name::<bool>(),
        source: ParseFailure::Bool(err),
    })
}

/// Parse a boolean literal.
///
/// Accepted literals:
///
/// | Value   | Literals                                   |
/// |---------|--------------------------------------------|
/// | `true`  | `1`, `t`, `T`, `true`, `TRUE`, `True`      |
/// | `false` | `0`, `f`, `F`, `false`, `FALSE`, `False`   |
///
/// Anything else, including surrounding whitespace, is rejected.
pub fn parse_bool(literal: &str) -> Result<bool, InvalidBool> {
    match literal {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(InvalidBool {
            literal: literal.to_string(),
        }),
    }
}
