use tracing::debug;

use crate::feature::Feature;

/// Whether `path` has a segment that is exactly `test` or `tests`.
///
/// Both `/` and `\` separate segments, so `test/foo.js`, `a\tests\b.js` and `src/test` match, while
/// `testing/foo.js` and `Test/foo.js` do not.
pub fn is_test_path(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "test" || segment == "tests")
}

/// Whether the feature was declared under a test directory. Features without a source range are
/// kept.
pub fn is_test_feature(feature: &Feature) -> bool {
    feature.source_file().map_or(false, is_test_path)
}

/// Selects the element mixins outside test directories, in analyzer order.
///
/// # Example
/// ```
/// # use polymer_externs::filter::select_mixins;
/// # use polymer_externs::feature::Analysis;
/// let analysis: Analysis = serde_json::from_str(r#"[
///     {"name": "A", "kinds": ["element-mixin"], "sourceRange": {"file": "a.js"}},
///     {"name": "B", "kinds": ["element-mixin"], "sourceRange": {"file": "test/b.js"}},
///     {"name": "C", "kinds": ["element"]}
/// ]"#).unwrap();
///
/// let names: Vec<_> = select_mixins(&analysis.features).map(|f| f.name.as_str()).collect();
/// assert_eq!(names, ["A"]);
/// ```
pub fn select_mixins(features: &[Feature]) -> impl Iterator<Item = &Feature> {
    features.iter().filter(|feature| {
        if !feature.is_mixin() {
            return false;
        }

        if is_test_feature(feature) {
            debug!(mixin = %feature.name, "skipping mixin declared in a test directory");
            return false;
        }

        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_segments() {
        assert!(is_test_path("test/foo.js"));
        assert!(is_test_path("tests/foo.js"));
        assert!(is_test_path("packages/a/test/unit/foo.js"));
        assert!(is_test_path("packages\\a\\tests\\foo.js"));
        assert!(is_test_path("src/test"));
        assert!(is_test_path("test"));
    }

    #[test]
    fn not_test_segments() {
        assert!(!is_test_path("testing/foo.js"));
        assert!(!is_test_path("lib/contest/foo.js"));
        assert!(!is_test_path("Test/foo.js"));
        assert!(!is_test_path("TESTS/foo.js"));
        assert!(!is_test_path("lib/test.js"));
        assert!(!is_test_path(""));
    }

    #[test]
    fn missing_source_range_is_kept() {
        let mut feature = mixin("Polymer.A");
        feature.source_range = None;
        assert!(!is_test_feature(&feature));
        assert_eq!(select_mixins(&[feature]).count(), 1);
    }

    #[test]
    fn selection_keeps_order() {
        let features = vec![
            mixin("Polymer.Z"),
            feature("Polymer.Element", "element"),
            in_file(mixin("Polymer.Fixture"), "test/fixtures/fixture.js"),
            mixin("Polymer.A"),
            feature("Polymer.dom", "namespace"),
            mixin("Polymer.Z"),
        ];

        let names: Vec<_> = select_mixins(&features).map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Polymer.Z", "Polymer.A", "Polymer.Z"]);
    }

    #[test]
    fn non_mixins_in_tests_are_ignored() {
        let features = vec![in_file(feature("Helper", "function"), "tests/helper.js")];
        assert_eq!(select_mixins(&features).count(), 0);
    }
}
