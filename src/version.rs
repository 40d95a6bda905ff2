/// Reported by `--version`. Release builds stamp `XP_FORM_BUILD_VERSION`
/// (e.g. a git describe string); local builds fall back to the crate version.
pub const VERSION: &str = match option_env!("XP_FORM_BUILD_VERSION") {
    Some(stamp) => stamp,
    None => env!("CARGO_PKG_VERSION"),
};
