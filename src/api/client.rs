use lazy_static::lazy_static;
use std::time::Duration;

/// Base URL for every model endpoint we call.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

lazy_static! {
    /// Shared blocking HTTP agent. One global timeout bounds every remote
    /// call; there are no retries and no per-request overrides.
    pub static ref UREQ_AGENT: ureq::Agent = {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(90)))
            .build();
        config.into()
    };
}
