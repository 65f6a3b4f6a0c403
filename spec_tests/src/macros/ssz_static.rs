#[macro_export]
macro_rules! test_consensus_type {
    ($struct_name:ident) => {
        paste::paste! {
            #[cfg(test)]
            #[allow(non_snake_case)]
            mod [<tests_ $struct_name>] {
                use super::*;
                use containers::hash_tree_root;
                use containers::ssz::{SszRead, SszWrite};
                use rstest::rstest;
                use $crate::utils::{phase0_dir, read_root, read_snappy_compressed};

                #[rstest]
                #[case("case_0")]
                #[case("case_1")]
                #[case("case_2")]
                #[case("case_3")]
                #[case("case_4")]
                fn test_type(#[case] case: &str) {
                    let path = phase0_dir("ssz_static", stringify!($struct_name))
                        .join("ssz_random")
                        .join(case);

                    let hash_root = read_root(&path.join("roots.yaml")).expect("cannot find test asset");
                    let ssz_bytes = read_snappy_compressed(&path.join("serialized.ssz_snappy"))
                        .expect("cannot find test asset");

                    let content = $struct_name::from_ssz(&(), &ssz_bytes).unwrap();

                    assert_eq!(ssz_bytes, content.to_ssz().unwrap());
                    assert_eq!(hash_root, hash_tree_root(&content));
                }
            }
        }
    };
}
