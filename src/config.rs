use std::fmt::{self, Debug, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub tracing: TracingConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_days: u64,
    /// Tokens expiring within this many hours are reissued on renewal
    #[serde(default = "default_renew_within_hours")]
    pub renew_within_hours: u64,
}

const fn default_renew_within_hours() -> u64 {
    24
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TracingConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Job execution timeout in seconds (default: 300)
    #[serde(default = "default_job_timeout")]
    pub job_timeout_seconds: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            job_timeout_seconds: default_job_timeout(),
        }
    }
}

const fn default_job_timeout() -> u64 {
    300 // 5 minutes
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub minio: MinioConfig,
}

/// Object storage settings shared by every upload path.
///
/// Read once at startup and never mutated afterwards.
#[derive(Clone, Serialize, Deserialize)]
pub struct MinioConfig {
    /// Public base URL that uploaded objects are served from
    pub url: String,
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
}

impl MinioConfig {
    /// Public URL of an object stored under `path`.
    #[must_use]
    pub fn object_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Debug for MinioConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinioConfig")
            .field("url", &self.url)
            .field("endpoint", &self.endpoint)
            .field("access_key", &"***")
            .field("secret_key", &"***")
            .field("bucket_name", &self.bucket_name)
            .finish()
    }
}
