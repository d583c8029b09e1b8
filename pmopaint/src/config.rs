//! # Configuration de pmopaint
//!
//! La configuration est lue depuis un fichier YAML, fusionnée avec la
//! configuration par défaut intégrée (`pmopaint.yaml`), puis surchargée par
//! les variables d'environnement `PMOPAINT_CONFIG__<SECTION>__<CLE>`.
//!
//! ```yaml
//! paint:
//!   username: "alice"
//!   password: "secret"
//!   endpoint: rpc_literal_unbranded
//! ```
//!
//! Le répertoire est cherché dans cet ordre :
//! 1. le répertoire passé en paramètre s'il n'est pas vide
//! 2. la variable d'environnement `PMOPAINT_CONFIG`
//! 3. `.pmopaint` dans le répertoire courant
//! 4. `.pmopaint` dans le répertoire personnel

use crate::constants::Endpoint;
use crate::error::{PaintError, Result};
use crate::soap;
use dirs::home_dir;
use serde::{Deserialize, Deserializer, de};
use serde_yaml::{Mapping, Value};
use std::{env, fmt, fs, path::Path};
use tracing::info;

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("pmopaint.yaml");

const ENV_CONFIG_DIR: &str = "PMOPAINT_CONFIG";
const ENV_PREFIX: &str = "PMOPAINT_CONFIG__";
const CONFIG_FILE: &str = "config.yaml";
const SECTION: &str = "paint";

/// Paramètres de connexion au service PAINT
#[derive(Clone, Deserialize)]
pub struct PaintConfig {
    #[serde(default, deserialize_with = "scalar_string")]
    pub username: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub password: String,
    #[serde(default)]
    pub endpoint: Endpoint,
    /// Surcharge de l'URL du service
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    soap::DEFAULT_NAMESPACE.to_string()
}

/// Accepte un scalaire YAML non quoté (`password: 12345`) comme chaîne
///
/// Un nombre est relu par YAML avant conversion : `007` devient `7`, il
/// faut le quoter.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a scalar, found {:?}",
            other
        ))),
    }
}

// Le mot de passe ne doit pas apparaître dans les logs
impl fmt::Debug for PaintConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaintConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("endpoint", &self.endpoint)
            .field("service_url", &self.service_url)
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl PaintConfig {
    /// Crée une configuration avec l'endpoint par défaut
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            endpoint: Endpoint::default(),
            service_url: None,
            namespace: default_namespace(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// URL effective du service
    pub fn service_url(&self) -> String {
        match &self.service_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => self.endpoint.service_url().to_string(),
        }
    }

    /// Charge la configuration depuis un répertoire
    ///
    /// # Arguments
    ///
    /// * `directory` - Répertoire contenant `config.yaml`, ou vide pour la recherche par défaut
    pub fn load_config(directory: &str) -> Result<Self> {
        let config_dir = Self::find_config_dir(directory);
        info!(config_dir=%config_dir, "Using config directory");

        let path = Path::new(&config_dir).join(CONFIG_FILE);
        match fs::read_to_string(&path) {
            Ok(data) => {
                info!(config_file=%path.display(), "Loaded config file");
                Self::from_yaml_str(&data)
            }
            Err(_) => {
                info!(config_file=%path.display(), "Config file not found, using default embedded config");
                Self::from_yaml_str("")
            }
        }
    }

    /// Charge la configuration depuis un texte YAML, avec les surcharges d'environnement
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::from_yaml_with_overrides(yaml, env::vars())
    }

    /// Comme [`from_yaml_str`](Self::from_yaml_str), avec une source de variables explicite
    pub fn from_yaml_with_overrides(
        yaml: &str,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        let mut value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        if !yaml.trim().is_empty() {
            let external: Value = serde_yaml::from_str(yaml)?;
            merge_yaml(&mut value, &lower_keys_value(external));
        }

        apply_env_overrides(&mut value, vars);

        let section = match value {
            Value::Mapping(mut map) => map
                .remove(Value::String(SECTION.to_string()))
                .unwrap_or(Value::Mapping(Mapping::new())),
            _ => {
                return Err(PaintError::Configuration(
                    "configuration root is not a map".to_string(),
                ));
            }
        };

        Ok(serde_yaml::from_value(section)?)
    }

    /// Cherche le répertoire de configuration
    fn find_config_dir(directory: &str) -> String {
        if !directory.is_empty() {
            return directory.to_string();
        }

        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var=ENV_CONFIG_DIR, path=%env_path, "Trying to load config from env");
            return env_path;
        }

        if Path::new(".pmopaint").exists() {
            return ".pmopaint".to_string();
        }

        if let Some(home) = home_dir() {
            let home_config = home.join(".pmopaint");
            if home_config.exists() {
                return home_config.to_string_lossy().to_string();
            }
        }

        ".pmopaint".to_string()
    }
}

fn apply_env_overrides(config: &mut Value, vars: impl IntoIterator<Item = (String, String)>) {
    for (key, value) in vars {
        if let Some(path) = key.strip_prefix(ENV_PREFIX) {
            let key_path = path
                .split("__")
                .map(str::to_lowercase)
                .collect::<Vec<_>>();
            set_value(config, &key_path, convert_env_value(&value));
        }
    }
}

fn set_value(data: &mut Value, path: &[String], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        *data = value;
        return;
    };

    if let Value::Mapping(map) = data {
        let entry = map
            .entry(Value::String(first.clone()))
            .or_insert(Value::Mapping(Mapping::new()));
        set_value(entry, rest, value);
    }
}

fn convert_env_value(value: &str) -> Value {
    // Les identifiants restent des chaînes, même s'ils ressemblent à des nombres
    Value::String(value.to_string())
}

fn lower_keys_value(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| {
                    let k = match k {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    (k, lower_keys_value(v))
                })
                .collect(),
        ),
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys_value).collect()),
        other => other,
    }
}

fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        // pour les scalaires ou séquences, on remplace
        (d, e) => *d = e.clone(),
    }
}
