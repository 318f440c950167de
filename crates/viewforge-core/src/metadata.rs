//! Column datatype resolution from stored metadata
//!
//! The storage platform keeps per-column metadata as ordered key/value
//! entries, each tagged with the provider that wrote it. The latest entry
//! per attribute wins, so resolution scans from the end of the list and
//! keeps the first occurrence of each attribute it sees.

use crate::descriptor::{ColumnMetadata, MetadataItem};

/// Metadata key carrying the engine-independent basetype.
pub const BASETYPE_KEY: &str = "storage.datatype.basetype";

/// Metadata key carrying the declared length.
pub const LENGTH_KEY: &str = "storage.datatype.length";

/// Metadata key carrying the declared nullability.
pub const NULLABLE_KEY: &str = "storage.datatype.nullable";

/// One resolved attribute together with the provider that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttr<T> {
    pub value: T,
    pub provider: String,
}

impl<T> ResolvedAttr<T> {
    fn from_item(value: T, item: &MetadataItem) -> Self {
        Self {
            value,
            provider: item.provider.clone(),
        }
    }
}

/// Datatype of one column after metadata resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDatatype {
    /// Basetype; never empty. `TEXT` when no basetype metadata exists.
    pub base_type: String,
    pub base_type_provider: Option<String>,
    pub length: Option<ResolvedAttr<String>>,
    pub nullable: Option<ResolvedAttr<bool>>,
}

impl ColumnDatatype {
    /// Basetype used when the metadata carries no basetype at all.
    pub const FALLBACK_TYPE: &'static str = "TEXT";

    fn fallback() -> Self {
        Self {
            base_type: Self::FALLBACK_TYPE.to_string(),
            base_type_provider: None,
            length: None,
            nullable: None,
        }
    }

    /// Whether the basetype is the string basetype.
    pub fn is_string(&self) -> bool {
        self.base_type.eq_ignore_ascii_case("STRING")
    }

    /// Whether the column was resolved as nullable.
    pub fn is_nullable(&self) -> bool {
        self.nullable.as_ref().map(|attr| attr.value).unwrap_or(false)
    }

    /// Resolved length, when one exists.
    pub fn length_value(&self) -> Option<&str> {
        self.length.as_ref().map(|attr| attr.value.as_str())
    }
}

fn parse_nullable(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Resolve the datatype of one column from its metadata entries.
///
/// Scans in reverse insertion order (latest first) and resolves `type`,
/// `length` and `nullable` independently, first occurrence each. The scan
/// stops once all three are resolved. When no basetype entry exists the
/// whole result falls back to [`ColumnDatatype::FALLBACK_TYPE`]: length and
/// nullable captured along the way are discarded, never partially merged.
pub fn resolve_column_datatype(metadata: &ColumnMetadata, column_name: &str) -> ColumnDatatype {
    let items = metadata
        .get(column_name)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut base_type: Option<ResolvedAttr<String>> = None;
    let mut length: Option<ResolvedAttr<String>> = None;
    let mut nullable: Option<ResolvedAttr<bool>> = None;

    for item in items.iter().rev() {
        if base_type.is_none() && item.key == BASETYPE_KEY {
            base_type = Some(ResolvedAttr::from_item(item.value.clone(), item));
        }
        if length.is_none() && item.key == LENGTH_KEY {
            length = Some(ResolvedAttr::from_item(item.value.clone(), item));
        }
        if nullable.is_none() && item.key == NULLABLE_KEY {
            nullable = Some(ResolvedAttr::from_item(parse_nullable(&item.value), item));
        }
        if base_type.is_some() && length.is_some() && nullable.is_some() {
            break;
        }
    }

    match base_type {
        Some(base_type) => ColumnDatatype {
            base_type_provider: Some(base_type.provider),
            base_type: base_type.value,
            length,
            nullable,
        },
        None => ColumnDatatype::fallback(),
    }
}
