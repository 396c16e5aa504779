use std::collections::BTreeMap;

/// Language code → display name.
pub type LanguageMap = BTreeMap<String, String>;

/// Languages offered when the server list cannot be fetched.
pub fn default_languages() -> LanguageMap {
    [
        ("zh", "Chinese (Simplified)"),
        ("en", "English"),
        ("ja", "Japanese"),
        ("ko", "Korean"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}
