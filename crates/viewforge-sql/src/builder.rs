//! View and schema DDL assembly

use viewforge_core::config::CaseMode;
use viewforge_core::metadata::ColumnDatatype;
use viewforge_core::naming::convert_case;

use crate::fragment::{check, SqlFragment, ValidationError};

/// Only this basetype carries its resolved length through the cast.
const NUMERIC_BASETYPE: &str = "NUMERIC";

/// Implicit row-timestamp column every source table carries.
const TIMESTAMP_COLUMN: &str = "_timestamp";

/// How the destination schema is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaMode {
    Replace,
    IfNotExists,
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name)
}

/// Fully qualified `"db"."schema"."object"` name from guarded parts.
pub fn qualified_name(database: &SqlFragment, schema: &SqlFragment, object: &SqlFragment) -> String {
    format!(
        "{}.{}.{}",
        quote_ident(database.as_str()),
        quote_ident(schema.as_str()),
        quote_ident(object.as_str())
    )
}

/// SELECT-list projection for one column.
///
/// Anything that is not the string basetype, or that resolved nullable, is
/// read through NULLIF so empty strings do not survive the cast as bogus
/// values. The length qualifier applies to NUMERIC only; every other
/// basetype drops its length after the cast.
pub fn build_column_projection(
    name: &str,
    datatype: &ColumnDatatype,
    column_case: CaseMode,
) -> String {
    let quoted = quote_ident(name);
    let source = if !datatype.is_string() || datatype.is_nullable() {
        format!("NULLIF({}, '')", quoted)
    } else {
        quoted
    };

    let mut projection = format!("{}::{}", source, datatype.base_type);
    if datatype.base_type.eq_ignore_ascii_case(NUMERIC_BASETYPE) {
        if let Some(length) = datatype.length_value() {
            projection.push_str(&format!("({})", length));
        }
    }

    projection.push_str(&format!(
        " AS {}",
        quote_ident(&convert_case(name, column_case))
    ));
    projection
}

/// Synthetic trailing projection every view carries.
///
/// Aliased literally, exempt from the column case policy.
pub fn timestamp_projection() -> String {
    let quoted = quote_ident(TIMESTAMP_COLUMN);
    format!("{}::TIMESTAMP AS {}", quoted, quoted)
}

/// `CREATE OR REPLACE VIEW … AS SELECT … FROM …`.
///
/// Every interpolated input is re-checked for statement terminators here,
/// before the text can reach a session.
pub fn build_view_statement(
    destination: &str,
    source: &str,
    projections: &[String],
    copy_grants: bool,
) -> Result<String, ValidationError> {
    check(destination)?;
    check(source)?;
    let columns = projections.join(",");
    check(&columns)?;

    let grants = if copy_grants { " COPY GRANTS" } else { "" };
    Ok(format!(
        "CREATE OR REPLACE VIEW {}{} AS SELECT {} FROM {}",
        destination, grants, columns, source
    ))
}

/// `CREATE … SCHEMA` statement for the destination of one bucket.
///
/// COPY GRANTS only applies to the replace form.
pub fn build_schema_statement(
    database: &SqlFragment,
    schema: &SqlFragment,
    mode: SchemaMode,
    copy_grants: bool,
) -> String {
    let name = format!(
        "{}.{}",
        quote_ident(database.as_str()),
        quote_ident(schema.as_str())
    );

    match mode {
        SchemaMode::Replace => {
            let grants = if copy_grants { " COPY GRANTS" } else { "" };
            format!("CREATE OR REPLACE SCHEMA {}{}", name, grants)
        }
        SchemaMode::IfNotExists => format!("CREATE SCHEMA IF NOT EXISTS {}", name),
    }
}
