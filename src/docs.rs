use crate::{
    Populate,
    field::{FieldDescriptor, FieldKind},
};
use std::{fs, path::Path};

/// One environment variable read by a configuration type
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnvVarDoc {
    /// Dotted field path from the root struct, e.g. `text.int_value`
    pub path: String,
    pub var: &'static str,
    pub kind: FieldKind,
    pub type_name: &'static str,
}

/// Every variable `T` reads, in the order population visits them
pub fn env_vars<T: Populate>() -> Vec<EnvVarDoc> {
    let mut out = Vec::new();
    collect("", &T::fields(), &mut out);
    out
}

fn collect(prefix: &str, fields: &[FieldDescriptor], out: &mut Vec<EnvVarDoc>) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };

        if field.kind == FieldKind::Record {
            collect(&path, &field.nested, out);
        } else if let Some(var) = field.source_var() {
            out.push(EnvVarDoc {
                path,
                var,
                kind: field.kind,
                type_name: field.type_name,
            });
        }
    }
}

/// Markdown summary of the variables `T` reads
pub fn render_docs<T: Populate>() -> String {
    let mut md = String::new();

    md.push_str("## Environment Variables Summary\n\n");
    md.push_str("| Variable | Field | Type |\n");
    md.push_str("|----------|-------|------|\n");
    for doc in env_vars::<T>() {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            doc.var, doc.path, doc.type_name
        ));
    }

    md
}

/// Write [`render_docs`] output for `T` to a markdown file
///
/// # Example
/// ```no_run
/// use env_populate::{Populate, write_docs};
///
/// #[derive(Default, Populate)]
/// struct Config {
///     #[field(env = "PORT")]
///     port: i32,
/// }
///
/// write_docs::<Config>("CONFIG.md").unwrap();
/// ```
pub fn write_docs<T: Populate>(path: impl AsRef<Path>) -> std::io::Result<()> {
    fs::write(path, render_docs::<T>())
}
