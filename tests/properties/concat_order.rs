//! Property tests for concatenation order.

use std::fs;

use proptest::prelude::*;
use tempfile::tempdir;

use spartan::{concatenate, BuildPipeline, Config};

fn parts() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..64), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the artifact is the byte-wise concatenation of its parts, in order.
    #[test]
    fn property_concat_is_ordered_byte_join(parts in parts()) {
        let artifact = concatenate(&parts, "bundle.css");

        let expected: Vec<u8> = parts.iter().flatten().copied().collect();
        prop_assert_eq!(artifact.content(), expected.as_slice());
        prop_assert_eq!(artifact.len(), parts.iter().map(Vec::len).sum::<usize>());
    }

    /// PROPERTY: a build writes the sources' bytes joined in glob order.
    #[test]
    fn property_build_matches_sorted_sources(
        contents in proptest::collection::vec("[a-z{}:;]{0,24}", 0..6)
    ) {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        for (i, content) in contents.iter().enumerate() {
            fs::write(dir.path().join(format!("src/{i:02}.scss")), content).unwrap();
        }

        let pipeline = BuildPipeline::new(dir.path(), Config::default()).unwrap();
        let report = pipeline.run(|_| {}).unwrap();

        prop_assert_eq!(fs::read_to_string(report.output).unwrap(), contents.concat());
    }
}
