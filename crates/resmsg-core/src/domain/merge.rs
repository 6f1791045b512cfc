//! Merge engine: combine per-store catalogs into one.
//!
//! Stores are applied in list order and **later stores win**. When a code
//! already exists, the later template is overlaid field by field (see
//! [`MessageTemplate::overlay`]); a new code is inserted verbatim.
//!
//! A store that failed to load is skipped and recorded in the
//! [`MergeReport`]; it never aborts the merge.

use std::fmt;

use tracing::{debug, warn};

use crate::domain::entities::template::TemplateMap;

/// One store that could not contribute to a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure {
    pub store: String,
    pub reason: String,
}

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.store, self.reason)
    }
}

/// Result of merging an ordered list of store outcomes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    pub catalog: TemplateMap,
    /// Names of the stores that loaded, in merge order.
    pub loaded: Vec<String>,
    /// Stores that were skipped, in merge order.
    pub failures: Vec<StoreFailure>,
}

impl MergeReport {
    /// `true` when every store loaded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// `true` when there was at least one store and none of them loaded.
    pub fn all_failed(&self) -> bool {
        self.loaded.is_empty() && !self.failures.is_empty()
    }
}

/// Overlay `layer` onto `acc`.
pub fn merge_into(acc: &mut TemplateMap, layer: TemplateMap) {
    for (code, custom) in layer {
        match acc.get_mut(&code) {
            Some(base) => *base = base.overlay(&custom),
            None => {
                acc.insert(code, custom);
            }
        }
    }
}

/// Merge store outcomes in order; later entries take precedence.
pub fn merge_catalogs<I, E>(outcomes: I) -> MergeReport
where
    I: IntoIterator<Item = (String, Result<TemplateMap, E>)>,
    E: fmt::Display,
{
    let mut report = MergeReport::default();

    for (store, outcome) in outcomes {
        match outcome {
            Ok(layer) => {
                debug!(store = %store, codes = layer.len(), "merging store");
                merge_into(&mut report.catalog, layer);
                report.loaded.push(store);
            }
            Err(e) => {
                warn!(store = %store, error = %e, "skipping store that failed to load");
                report.failures.push(StoreFailure {
                    store,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageTemplate, MessageType};

    fn map(entries: &[(&str, MessageTemplate)]) -> TemplateMap {
        entries
            .iter()
            .map(|(code, t)| (code.to_string(), t.clone()))
            .collect()
    }

    fn ok(name: &str, m: TemplateMap) -> (String, Result<TemplateMap, String>) {
        (name.to_string(), Ok(m))
    }

    #[test]
    fn later_store_overrides_only_its_non_null_fields() {
        let defaults = map(&[(
            "CRUD_001",
            MessageTemplate::new(MessageType::Success, "Created").http_status_code(200),
        )]);
        let custom = map(&[(
            "CRUD_001",
            MessageTemplate {
                title: Some("Record Created".into()),
                ..Default::default()
            },
        )]);

        let report = merge_catalogs([ok("defaults", defaults), ok("custom", custom)]);
        let merged = &report.catalog["CRUD_001"];
        assert_eq!(merged.title.as_deref(), Some("Record Created"));
        assert_eq!(merged.http_status_code, Some(200));
        assert_eq!(merged.message_type, Some(MessageType::Success));
        assert!(report.is_clean());
    }

    #[test]
    fn disjoint_field_subsets_combine() {
        // Every split of the five fields between A and B must merge to the union.
        let full = MessageTemplate::new(MessageType::Critical, "T")
            .description("D")
            .http_status_code(503)
            .hint("H");
        for mask in 0u8..32 {
            let pick = |bit: u8, take_b: bool| (mask & (1 << bit) != 0) == take_b;
            let split = |take_b: bool| MessageTemplate {
                message_type: full.message_type.filter(|_| pick(0, take_b)),
                title: full.title.clone().filter(|_| pick(1, take_b)),
                description: full.description.clone().filter(|_| pick(2, take_b)),
                http_status_code: full.http_status_code.filter(|_| pick(3, take_b)),
                hint: full.hint.clone().filter(|_| pick(4, take_b)),
            };
            let report = merge_catalogs([
                ok("a", map(&[("X", split(false))])),
                ok("b", map(&[("X", split(true))])),
            ]);
            assert_eq!(report.catalog["X"], full, "mask {mask:05b}");
        }
    }

    #[test]
    fn order_decides_conflicts() {
        let a = map(&[("X", MessageTemplate::new(MessageType::Info, "from a"))]);
        let b = map(&[("X", MessageTemplate::new(MessageType::Error, "from b"))]);

        let ab = merge_catalogs([ok("a", a.clone()), ok("b", b.clone())]);
        let ba = merge_catalogs([ok("b", b), ok("a", a)]);
        assert_eq!(ab.catalog["X"].title.as_deref(), Some("from b"));
        assert_eq!(ba.catalog["X"].title.as_deref(), Some("from a"));
    }

    #[test]
    fn new_codes_are_inserted_verbatim() {
        let a = map(&[("A", MessageTemplate::new(MessageType::Info, "a"))]);
        let b = map(&[("B", MessageTemplate {
            title: Some("partial".into()),
            ..Default::default()
        })]);
        let report = merge_catalogs([ok("a", a), ok("b", b)]);
        assert_eq!(report.catalog.len(), 2);
        assert_eq!(report.catalog["B"].message_type, None);
    }

    #[test]
    fn failing_store_is_skipped_and_reported() {
        let a = map(&[("A", MessageTemplate::new(MessageType::Info, "a"))]);
        let c = map(&[("C", MessageTemplate::new(MessageType::Info, "c"))]);
        let report = merge_catalogs([
            ok("a", a),
            ("broken".to_string(), Err("disk on fire".to_string())),
            ok("c", c),
        ]);

        assert!(report.catalog.contains_key("A"));
        assert!(report.catalog.contains_key("C"));
        assert_eq!(report.loaded, vec!["a", "c"]);
        assert_eq!(
            report.failures,
            vec![StoreFailure {
                store: "broken".into(),
                reason: "disk on fire".into()
            }]
        );
        assert!(!report.all_failed());
    }

    #[test]
    fn all_failed_yields_empty_catalog() {
        let report = merge_catalogs([("x".to_string(), Err::<TemplateMap, _>("nope"))]);
        assert!(report.catalog.is_empty());
        assert!(report.all_failed());
    }
}
