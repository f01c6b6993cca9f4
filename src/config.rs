use anyhow::{Result, bail};

pub const URL_ENV: &str = "SUPABASE_URL";
pub const KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Project URL and anonymous key, resolved once at startup and immutable for
/// the rest of the run.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub base_url: String,
    pub anon_key: String,
}

impl Credentials {
    /// CLI arguments win over the environment.
    pub fn resolve(url_arg: Option<String>, key_arg: Option<String>) -> Result<Self> {
        Self::resolve_with(url_arg, key_arg, |name| std::env::var(name).ok())
    }

    fn resolve_with(
        url_arg: Option<String>,
        key_arg: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let base_url = match url_arg.or_else(|| env(URL_ENV)) {
            Some(value) if !value.trim().is_empty() => value,
            _ => bail!("Missing project URL: pass --url or set {}", URL_ENV),
        };

        let anon_key = match key_arg.or_else(|| env(KEY_ENV)) {
            Some(value) if !value.trim().is_empty() => value,
            _ => bail!("Missing anon key: pass --key or set {}", KEY_ENV),
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }
}
