use regex::Regex;
use std::sync::LazyLock;

pub const NAME: &str = "math-utils";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SELF_TEST_PASSED: &str = "test_add_positive_numbers passed";

// add [<type>] <a> <b>
pub static ADD_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:(?P<ty>[iu](?:8|16|32|64|128|size)|f32|f64)\s+)?(?P<lhs>\S+)\s+(?P<rhs>\S+)$"#,
    )
    .unwrap()
});
