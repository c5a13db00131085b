use std::fs::File;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::constants::*;
use crate::errors::*;

err_impl! {ConfigError,
    #[error("malformed secret reference (expected ENV_VAR=secret-name:key): {0}")]
    MalformedSecretRef(String),

    #[error("missing required config field: {0}")]
    MissingField(String),
}

// An environment variable in the launched container whose value comes from a key in a secret
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretEnvVar {
    pub env_var_name: String,
    pub secret_name: String,
    pub secret_key: String,
}

impl FromStr for SecretEnvVar {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let Some((env_var_name, secret_ref)) = s.split_once('=') else {
            return Err(ConfigError::malformed_secret_ref(s));
        };
        let Some((secret_name, secret_key)) = secret_ref.split_once(':') else {
            return Err(ConfigError::malformed_secret_ref(s));
        };

        if env_var_name.is_empty() || secret_name.is_empty() || secret_key.is_empty() {
            return Err(ConfigError::malformed_secret_ref(s));
        }

        Ok(SecretEnvVar {
            env_var_name: env_var_name.into(),
            secret_name: secret_name.into(),
            secret_key: secret_key.into(),
        })
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.into()
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub tty: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<SecretEnvVar>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            kubeconfig: None,
            namespace: default_namespace(),
            name: String::new(),
            image: String::new(),
            tty: false,
            secrets: vec![],
        }
    }
}

impl RunConfig {
    pub fn load(filename: &str) -> anyhow::Result<RunConfig> {
        Ok(serde_yaml::from_reader(File::open(filename)?)?)
    }

    pub fn validate(&self) -> EmptyResult {
        if self.name.is_empty() {
            return Err(ConfigError::missing_field("name"));
        }
        if self.image.is_empty() {
            return Err(ConfigError::missing_field("image"));
        }
        Ok(())
    }
}
