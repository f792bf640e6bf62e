//! The companion runtime helper package.
//!
//! A fixed target-language source file, shipped verbatim when the
//! `generateRuntime` option is on. Only its presence or absence is part
//! of the core contract; generated code under the default strategies
//! never imports it.

/// The runtime helper package source.
pub fn runtime_helper_source() -> &'static str {
    include_str!("runtime/trango_runtime.go")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_package_is_fixed_and_nonempty() {
        let source = runtime_helper_source();
        assert!(source.starts_with("// Package trangoruntime"));
        assert!(source.contains("package trangoruntime"));
        assert!(source.contains("func Coalesce"));
    }
}
