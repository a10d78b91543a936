use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "CareAssist";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The single working language symptom/condition matching executes in.
/// Other languages are translated in and out at the orchestrator boundary.
pub const PIVOT_LANGUAGE: &str = "en";

/// Fallback language when detection has nothing better to offer.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Bound on every external network call (detection, translation, completion).
/// A call that exceeds it takes the same fallback path as a failed call.
pub const EXTERNAL_CALL_TIMEOUT_SECS: u64 = 20;

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/CareAssist/ on all platforms (user-visible, matches the product shell)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Languages offered in the language picker, code + English display name.
pub fn supported_languages() -> &'static [(&'static str, &'static str)] {
    &[
        ("en", "English"),
        ("es", "Spanish"),
        ("fr", "French"),
        ("de", "German"),
        ("zh", "Chinese"),
        ("ja", "Japanese"),
        ("ko", "Korean"),
        ("ar", "Arabic"),
        ("ru", "Russian"),
        ("hi", "Hindi"),
        ("pt", "Portuguese"),
        ("it", "Italian"),
    ]
}
