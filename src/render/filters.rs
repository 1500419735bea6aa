// Re-export the case conversion functions backing the filter registry
pub use cruet::case::{
    camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
    snake::to_snake_case,
};

/// Converts delimiter-separated or mixed-case text to PascalCase.
///
/// Registered as the `studly` filter, the name composer-style package
/// templates use for it: `"my-package"` becomes `"MyPackage"`.
pub fn to_studly_case(input: &str) -> String {
    to_pascal_case(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studly_converts_kebab_case() {
        assert_eq!(to_studly_case("my-package"), "MyPackage");
    }

    #[test]
    fn studly_converts_snake_case() {
        assert_eq!(to_studly_case("my_package"), "MyPackage");
    }

    #[test]
    fn studly_is_idempotent() {
        let once = to_studly_case("my-pkg");
        assert_eq!(once, "MyPkg");
        assert_eq!(to_studly_case(&once), once);
    }

    #[test]
    fn studly_keeps_single_word() {
        assert_eq!(to_studly_case("blog"), "Blog");
    }
}
