use crate::{
    environment::Lookup,
    error::PopulateError,
    fetch::{fetch_bool, fetch_string},
};

/// How the populator treats a field of a given type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldKind {
    /// A nested struct, always recursed into
    Record,
    String,
    Int,
    Bool,
    /// A scalar with no conversion (floats, unsigned integers, `char`), never touched
    Unsupported,
}

/// One entry of a struct's field table, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDescriptor {
    /// Rust field name
    pub name: &'static str,
    /// Environment variable from `#[field(env = "...")]`, if any
    pub env: Option<&'static str>,
    pub kind: FieldKind,
    /// Type name as written for scalars, struct name for records
    pub type_name: &'static str,
    /// Field table of the nested struct, empty for scalars
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub nested: Vec<FieldDescriptor>,
}

impl FieldDescriptor {
    /// Describe a field of type `T`
    pub fn of<T: EnvField>(name: &'static str, env: Option<&'static str>) -> Self {
        Self {
            name,
            env,
            kind: T::KIND,
            type_name: T::TYPE_NAME,
            nested: T::nested_fields(),
        }
    }

    /// The variable this field is read from, if it will be read at all
    pub fn source_var(&self) -> Option<&'static str> {
        match self.kind {
            FieldKind::String | FieldKind::Int | FieldKind::Bool => annotation(self.env),
            FieldKind::Record | FieldKind::Unsupported => None,
        }
    }
}

/// A type that can appear as a field of a `#[derive(Populate)]` struct.
///
/// Implemented here for `String`, `bool` and every primitive numeric type,
/// and by the derive for every struct it is applied to.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be populated from the environment",
    note = "supported field types are String, bool, signed integers and structs deriving `Populate`"
)]
pub trait EnvField {
    const KIND: FieldKind;
    const TYPE_NAME: &'static str;

    /// Populate this field from the variable named by `key`.
    ///
    /// Records ignore `key` and recurse; scalars ignore a missing or empty `key`.
    fn populate_field(
        &mut self,
        key: Option<&str>,
        env: &dyn Lookup,
        require_value_present: bool,
    ) -> Result<(), PopulateError>;

    fn nested_fields() -> Vec<FieldDescriptor> {
        Vec::new()
    }
}

/// A non-empty annotation, or `None`
pub fn annotation(key: Option<&str>) -> Option<&str> {
    key.filter(|key| !key.is_empty())
}

/// Populate one field of `record`, wrapping any error with `record.field`.
///
/// Called by the code `#[derive(Populate)]` generates, once per field in
/// declaration order.
pub fn resolve<T: EnvField>(
    value: &mut T,
    record: &'static str,
    field: &'static str,
    key: Option<&str>,
    env: &dyn Lookup,
    require_value_present: bool,
) -> Result<(), PopulateError> {
    tracing::trace!(record, field, "populating field");
    value
        .populate_field(key, env, require_value_present)
        .map_err(|err| err.within(record, field))
}

impl EnvField for String {
    const KIND: FieldKind = FieldKind::String;
    const TYPE_NAME: &'static str = "String";

    fn populate_field(
        &mut self,
        key: Option<&str>,
        env: &dyn Lookup,
        require_value_present: bool,
    ) -> Result<(), PopulateError> {
        if let Some(var) = annotation(key) {
            *self = fetch_string(env, var, require_value_present)?;
        }
        Ok(())
    }
}

impl EnvField for bool {
    const KIND: FieldKind = FieldKind::Bool;
    const TYPE_NAME: &'static str = "bool";

    fn populate_field(
        &mut self,
        key: Option<&str>,
        env: &dyn Lookup,
        require_value_present: bool,
    ) -> Result<(), PopulateError> {
        if let Some(var) = annotation(key) {
            *self = fetch_bool(env, var, require_value_present)?;
        }
        Ok(())
    }
}

impl_signed_field!(i8, i16, i32, i64, i128, isize);
impl_skipped_field!(u8, u16, u32, u64, u128, usize, f32, f64, char);
