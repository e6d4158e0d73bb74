//! Obtaining schema documents for named forms.

use crate::config::EndpointConfig;
use crate::error::{FormError, SchemaFetchError};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

/// Something that can produce the raw schema document for a form name.
pub trait SchemaSource {
    fn fetch_schema(
        &self,
        form_name: &str,
    ) -> impl Future<Output = Result<String, SchemaFetchError>> + Send;
}

/// Check that a form name is safe to splice into a URL or file path.
pub fn is_valid_form_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn check_form_name(name: &str) -> Result<(), SchemaFetchError> {
    if is_valid_form_name(name) {
        Ok(())
    } else {
        Err(SchemaFetchError::new(
            name,
            "invalid form name. Use only letters, numbers, '_' and '-'.",
        ))
    }
}

/// Fetches `{base_url}{path_prefix}{name}.{extension}` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    path_prefix: String,
    extension: String,
}

impl HttpSource {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self, FormError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()
            .map_err(|e| FormError::Config(format!("failed to build HTTP client: {}", e)))?;

        let mut path_prefix = endpoint.path_prefix.clone();
        if !path_prefix.starts_with('/') {
            path_prefix.insert(0, '/');
        }
        if !path_prefix.ends_with('/') {
            path_prefix.push('/');
        }

        Ok(Self {
            client,
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            path_prefix,
            extension: endpoint.extension.clone(),
        })
    }

    pub fn schema_url(&self, form_name: &str) -> String {
        format!(
            "{}{}{}.{}",
            self.base_url, self.path_prefix, form_name, self.extension
        )
    }
}

impl SchemaSource for HttpSource {
    async fn fetch_schema(&self, form_name: &str) -> Result<String, SchemaFetchError> {
        check_form_name(form_name)?;
        let url = self.schema_url(form_name);
        log::debug!("Fetching schema for '{}' from {}", form_name, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SchemaFetchError::new(form_name, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SchemaFetchError::new(
                form_name,
                format!("HTTP {} from {}", status, url),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| SchemaFetchError::new(form_name, e))
    }
}

/// Reads `{root}/{name}.{extension}` from the local filesystem.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
    extension: String,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn schema_path(&self, form_name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", form_name, self.extension))
    }
}

impl SchemaSource for DirSource {
    async fn fetch_schema(&self, form_name: &str) -> Result<String, SchemaFetchError> {
        check_form_name(form_name)?;
        let path = self.schema_path(form_name);
        log::debug!("Reading schema for '{}' from {:?}", form_name, path);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| SchemaFetchError::new(form_name, format!("{:?}: {}", path, e)))
    }
}
