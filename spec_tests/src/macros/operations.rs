#[macro_export]
macro_rules! test_operation_impl {
    ($handler:ident, $operation_object:ty, $input_name:literal, $compute_result:expr) => {{
        use containers::{ssz::SszRead, State};
        use $crate::utils::{case_dirs, phase0_dir, read_snappy_compressed, signature_verification};

        let base_path = phase0_dir("operations", stringify!($handler)).join("pyspec_tests");
        for case_dir in case_dirs(&base_path).expect("Missing test directory") {
            let case_name = case_dir
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default()
                .to_owned();
            println!("Running operation case: {}", case_name);

            let pre_bytes =
                read_snappy_compressed(&case_dir.join("pre.ssz_snappy")).expect("Missing pre-state");
            let pre = State::from_ssz(&(), &pre_bytes).expect("Invalid pre-state file");

            let input_bytes =
                read_snappy_compressed(&case_dir.join(concat!($input_name, ".ssz_snappy")))
                    .expect("Missing operation input");
            let input = <$operation_object>::from_ssz(&(), &input_bytes)
                .expect("Invalid operation input file");

            // Absent post-state means the operation must fail.
            let expected_post = read_snappy_compressed(&case_dir.join("post.ssz_snappy"))
                .ok()
                .map(|bytes| State::from_ssz(&(), &bytes).expect("Invalid post-state file"));

            let verification = signature_verification(&case_dir).expect("Invalid meta.yaml");
            let result = $compute_result(pre, input, verification);

            match (result, expected_post) {
                (Ok(post), Some(expected)) => {
                    assert_eq!(post, expected, "case '{}' post-state mismatch", case_name);
                }
                (Ok(_), None) => panic!("case '{}' should have failed but succeeded", case_name),
                (Err(error), Some(_)) => {
                    panic!("case '{}' should have succeeded but failed: {}", case_name, error)
                }
                (Err(error), None) => assert!(
                    error.is_rejection(),
                    "case '{}' failed with a fatal error: {}",
                    case_name,
                    error
                ),
            }
        }
    }};
}

#[macro_export]
macro_rules! test_operation {
    ($handler:ident, $operation_object:ty, $input_name:literal, $processing_fn:ident) => {
        paste::paste! {
            #[cfg(test)]
            #[allow(non_snake_case)]
            mod [<tests_ $handler>] {
                use super::*;
                use containers::{SignatureVerification, State, TransitionConfig};

                #[test]
                fn test_operation() {
                    $crate::test_operation_impl!(
                        $handler,
                        $operation_object,
                        $input_name,
                        |pre: State, input: $operation_object, verification: SignatureVerification| {
                            pre.$processing_fn(&input, &TransitionConfig::mainnet(verification))
                        }
                    );
                }
            }
        }
    };
}
