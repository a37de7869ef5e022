use std::env;
use std::fmt;

use crate::error::{GalleryError, Result};

pub const ACCOUNT_VAR: &str = "STORAGE_ACCOUNT";
pub const SAS_VAR: &str = "STORAGE_SAS";
pub const CONTAINER_VAR: &str = "STORAGE_CONTAINER";
pub const ENDPOINT_VAR: &str = "STORAGE_ENDPOINT";

/// Credentials for a single blob container, validated on construction.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConfig {
    account: String,
    sas_token: String,
    container: String,
    endpoint: Option<String>,
}

impl StorageConfig {
    pub fn new(
        account: impl Into<String>,
        sas_token: impl Into<String>,
        container: impl Into<String>,
    ) -> Result<Self> {
        let account = required(ACCOUNT_VAR, account.into())?;
        let sas_token = required(SAS_VAR, sas_token.into())?;
        let sas_token = sas_token.trim_start_matches('?').to_string();
        if sas_token.is_empty() {
            return Err(GalleryError::Configuration { missing: SAS_VAR });
        }
        let container = required(CONTAINER_VAR, container.into())?;

        Ok(Self {
            account,
            sas_token,
            container,
            endpoint: None,
        })
    }

    /// Load from `STORAGE_ACCOUNT`, `STORAGE_SAS` and `STORAGE_CONTAINER`.
    ///
    /// `STORAGE_ENDPOINT` optionally points at an emulator such as Azurite.
    pub fn from_env() -> Result<Self> {
        let var = |name| env::var(name).unwrap_or_default();
        let config = Self::new(var(ACCOUNT_VAR), var(SAS_VAR), var(CONTAINER_VAR))?;

        Ok(match env::var(ENDPOINT_VAR) {
            Ok(endpoint) if !endpoint.trim().is_empty() => config.with_endpoint(endpoint),
            _ => config,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into().trim().trim_end_matches('/').to_string());
        self
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn sas_token(&self) -> &str {
        &self.sas_token
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Blob service endpoint, without the container.
    pub fn service_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://{}.blob.core.windows.net", self.account),
        }
    }
}

// The SAS token is a bearer credential; keep it out of logs.
impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("account", &self.account)
            .field("container", &self.container)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

fn required(name: &'static str, value: String) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        Err(GalleryError::Configuration { missing: name })
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_any_empty_value() {
        for (account, sas, container, missing) in [
            ("", "sv=1", "photos", ACCOUNT_VAR),
            ("acct", "  ", "photos", SAS_VAR),
            ("acct", "?", "photos", SAS_VAR),
            ("acct", "sv=1", "", CONTAINER_VAR),
        ] {
            match StorageConfig::new(account, sas, container) {
                Err(GalleryError::Configuration { missing: name }) => assert_eq!(name, missing),
                other => panic!("expected configuration error, got {other:?}"),
            }
        }
    }

    #[test]
    fn strips_leading_question_mark_from_sas() {
        let config = StorageConfig::new("acct", "?sv=2022&sig=abc", "photos").unwrap();
        assert_eq!(config.sas_token(), "sv=2022&sig=abc");
    }

    #[test]
    fn default_endpoint_uses_account() {
        let config = StorageConfig::new("acct", "sv=1", "photos").unwrap();
        assert_eq!(config.service_endpoint(), "https://acct.blob.core.windows.net");

        let config = config.with_endpoint("http://127.0.0.1:10000/devstoreaccount1/");
        assert_eq!(
            config.service_endpoint(),
            "http://127.0.0.1:10000/devstoreaccount1"
        );
    }

    #[test]
    fn debug_hides_sas_token() {
        let config = StorageConfig::new("acct", "sig=secret", "photos").unwrap();
        assert!(!format!("{config:?}").contains("secret"));
    }
}
