//! Destination naming policy
//!
//! Case conversion, per-bucket destination schema names and the fail-fast
//! uniqueness check that runs before any DDL is issued.

use std::collections::{BTreeMap, HashMap};

use crate::config::{CaseMode, ConfigError};
use crate::descriptor::BucketDescriptor;

/// Apply an identifier case policy. Idempotent per mode.
pub fn convert_case(identifier: &str, mode: CaseMode) -> String {
    match mode {
        CaseMode::Original => identifier.to_string(),
        CaseMode::Upper => identifier.to_uppercase(),
        CaseMode::Lower => identifier.to_lowercase(),
    }
}

/// Destination schema name for one bucket.
///
/// With `use_alias` the name is `<stage>_<displayName>`, otherwise the raw
/// bucket id with dots flattened to underscores. `drop_stage_prefix` strips
/// the first `stage.len() + 1` characters from whichever name was produced.
/// The raw-id branch is not guaranteed to start with the stage prefix, yet
/// the same count is stripped there too; that is the historical behavior and
/// it is kept deliberately.
pub fn destination_schema_name(
    bucket: &BucketDescriptor,
    use_alias: bool,
    drop_stage_prefix: bool,
) -> String {
    let name = if use_alias {
        format!("{}_{}", bucket.stage, bucket.display_name)
    } else {
        bucket.id.replace('.', "_")
    };

    if drop_stage_prefix {
        name.chars().skip(bucket.stage.chars().count() + 1).collect()
    } else {
        name
    }
}

/// Destination schema names of one run, computed once per bucket.
///
/// An explicit map built at the start of the run; no memoization to
/// invalidate across runs.
#[derive(Debug, Clone)]
pub struct SchemaNameIndex {
    names: HashMap<String, String>,
}

impl SchemaNameIndex {
    /// Compute the name of every bucket, failing when any two collide.
    ///
    /// Runs to completion before the caller issues any DDL; the error lists
    /// exactly the names that repeat.
    pub fn build(
        buckets: &[BucketDescriptor],
        use_alias: bool,
        drop_stage_prefix: bool,
    ) -> Result<Self, ConfigError> {
        let mut names = HashMap::with_capacity(buckets.len());
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();

        for bucket in buckets {
            let name = destination_schema_name(bucket, use_alias, drop_stage_prefix);
            *counts.entry(name.clone()).or_insert(0) += 1;
            names.insert(bucket.id.clone(), name);
        }

        let duplicates: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect();

        if !duplicates.is_empty() {
            return Err(ConfigError::DuplicateSchemaNames { names: duplicates });
        }

        Ok(Self { names })
    }

    /// Name for a bucket id, when the bucket was part of the run.
    pub fn get(&self, bucket_id: &str) -> Option<&str> {
        self.names.get(bucket_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bucket(id: &str, stage: &str, display_name: &str) -> BucketDescriptor {
        BucketDescriptor {
            id: id.to_string(),
            stage: stage.to_string(),
            name: display_name.to_string(),
            display_name: display_name.to_string(),
            source_bucket: None,
        }
    }

    #[test]
    fn convert_case_modes() {
        assert_eq!(convert_case("MixedCase", CaseMode::Original), "MixedCase");
        assert_eq!(convert_case("MixedCase", CaseMode::Upper), "MIXEDCASE");
        assert_eq!(convert_case("MixedCase", CaseMode::Lower), "mixedcase");
    }

    #[test]
    fn convert_case_is_idempotent() {
        for mode in [CaseMode::Original, CaseMode::Upper, CaseMode::Lower] {
            let once = convert_case("Mixed_Case-1", mode);
            let twice = convert_case(&once, mode);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn alias_name_from_stage_and_display_name() {
        let b = bucket("in.c-main", "in", "main");
        assert_eq!(destination_schema_name(&b, true, false), "in_main");
        assert_eq!(destination_schema_name(&b, true, true), "main");
    }

    #[test]
    fn raw_id_name_flattens_dots() {
        let b = bucket("in.c-main", "in", "main");
        assert_eq!(destination_schema_name(&b, false, false), "in_c-main");
    }

    #[test]
    fn drop_prefix_strips_same_count_on_raw_ids() {
        // The raw id does not start with "in_" as a unit, but the stage
        // length + 1 is stripped regardless.
        let b = bucket("in.c-main", "in", "main");
        assert_eq!(destination_schema_name(&b, false, true), "c-main");

        let odd = bucket("out.c-x", "out", "x");
        assert_eq!(destination_schema_name(&odd, false, true), "c-x");
    }

    #[test]
    fn index_maps_every_bucket() {
        let buckets = vec![bucket("in.c-main", "in", "main"), bucket("in.c-other", "in", "other")];

        let index = SchemaNameIndex::build(&buckets, true, false).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("in.c-main"), Some("in_main"));
        assert_eq!(index.get("in.c-other"), Some("in_other"));
        assert_eq!(index.get("in.c-unknown"), None);
    }

    #[test]
    fn duplicate_names_fail_listing_each_once() {
        let buckets = vec![bucket("in.c-main", "in", "main"), bucket("in.c-other", "in", "main")];

        let err = SchemaNameIndex::build(&buckets, true, false).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateSchemaNames {
                names: vec!["in_main".to_string()]
            }
        );
        assert!(err.to_string().contains("in_main"));
        assert!(err.to_string().contains("use_bucket_alias"));
    }

    #[test]
    fn same_display_names_disambiguate_without_alias() {
        let buckets = vec![bucket("in.c-main", "in", "main"), bucket("in.c-other", "in", "main")];

        let index = SchemaNameIndex::build(&buckets, false, false).unwrap();
        assert_eq!(index.get("in.c-main"), Some("in_c-main"));
        assert_eq!(index.get("in.c-other"), Some("in_c-other"));
    }
}
