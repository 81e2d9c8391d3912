// Declarative helpers that implement `EnvField` for the built-in scalar types.
// Must stay declared before `mod field` in lib.rs.

/// Signed integers: parsed base-10 into the exact width of the field
macro_rules! impl_signed_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::field::EnvField for $ty {
                const KIND: $crate::field::FieldKind = $crate::field::FieldKind::Int;
                const TYPE_NAME: &'static str = stringify!($ty);

                fn populate_field(
                    &mut self,
                    key: Option<&str>,
                    env: &dyn $crate::environment::Lookup,
                    require_value_present: bool,
                ) -> Result<(), $crate::error::PopulateError> {
                    if let Some(var) = $crate::field::annotation(key) {
                        *self = $crate::fetch::fetch_int::<$ty>(env, var, require_value_present)?;
                    }
                    Ok(())
                }
            }
        )*
    };
}

/// Scalars with no conversion; annotated or not, they are left untouched
macro_rules! impl_skipped_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::field::EnvField for $ty {
                const KIND: $crate::field::FieldKind = $crate::field::FieldKind::Unsupported;
                const TYPE_NAME: &'static str = stringify!($ty);

                fn populate_field(
                    &mut self,
                    key: Option<&str>,
                    _env: &dyn $crate::environment::Lookup,
                    _require_value_present: bool,
                ) -> Result<(), $crate::error::PopulateError> {
                    if let Some(var) = $crate::field::annotation(key) {
                        tracing::trace!(var, ty = stringify!($ty), "skipping unsupported field type");
                    }
                    Ok(())
                }
            }
        )*
    };
}
