/*
 * Copyright 2024 Thaddeus Treloar
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use std::{collections::HashMap, path::PathBuf, str::FromStr};

use tracing::{level_filters::LevelFilter, warn};

use super::{keys_file::KeysFileError, ExperimentConfig, LogFormat, ReportFormat};

pub(super) const PARTITION_COUNTS: &str = "partition.counts";
pub(super) const REPORT_FORMAT: &str = "report.format";
pub(super) const LOG_LEVEL: &str = "log.level";
pub(super) const LOG_FORMAT: &str = "log.format";
pub(super) const KEYS_FILE: &str = "keys.file";

const KNOWN_FIELDS: [&str; 5] = [
    PARTITION_COUNTS,
    REPORT_FORMAT,
    LOG_LEVEL,
    LOG_FORMAT,
    KEYS_FILE,
];

const REQUIRED_FIELDS: [&str; 2] = [PARTITION_COUNTS, REPORT_FORMAT];

const DEFAULT_FIELDS: [(&str, &str); 4] = [
    (PARTITION_COUNTS, "2,5,10"),
    (REPORT_FORMAT, "text"),
    (LOG_LEVEL, "info"),
    (LOG_FORMAT, "text"),
];

const ENV_FIELDS: [(&str, &str); 5] = [
    ("KEYSPREAD_PARTITION_COUNTS", PARTITION_COUNTS),
    ("KEYSPREAD_REPORT_FORMAT", REPORT_FORMAT),
    ("KEYSPREAD_LOG_LEVEL", LOG_LEVEL),
    ("KEYSPREAD_LOG_FORMAT", LOG_FORMAT),
    ("KEYSPREAD_KEYS_FILE", KEYS_FILE),
];

#[derive(Debug, Clone, Default, derive_more::From)]
pub struct ExperimentConfigBuilder {
    pub(crate) config_map: HashMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExperimentConfigError {
    #[error("ExperimentConfigError::MissingConfig: {configs:?}")]
    MissingConfig { configs: Vec<&'static str> },
    #[error("ExperimentConfigError::InvalidPartitionCount: '{value}' is not a positive integer")]
    InvalidPartitionCount { value: String },
    #[error("ExperimentConfigError::InvalidReportFormat: '{0}', expected 'text' or 'json'")]
    InvalidReportFormat(String),
    #[error("ExperimentConfigError::InvalidLogFormat: '{0}', expected 'text' or 'json'")]
    InvalidLogFormat(String),
    #[error("ExperimentConfigError::InvalidLogLevel: '{0}'")]
    InvalidLogLevel(String),
    #[error(transparent)]
    KeysFile(#[from] KeysFileError),
}

impl ExperimentConfigBuilder {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    /// Seeds a builder from `KEYSPREAD_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::new();

        ENV_FIELDS.into_iter().for_each(|(variable, key)| {
            if let Some(value) = lookup(variable) {
                builder.set(key, value);
            }
        });

        builder
    }

    pub fn contains<'a, K: Into<&'a str>>(&self, key: K) -> bool {
        self.config_map.contains_key(key.into())
    }

    pub fn get<'a, K: Into<&'a str>>(&self, key: K) -> Option<&str> {
        self.config_map.get(key.into()).map(String::as_str)
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.config_map.insert(key.into(), value.into());

        self
    }

    pub fn remove<'a, K: Into<&'a str>>(&mut self, key: K) -> &mut Self {
        self.config_map.remove(key.into());

        self
    }

    fn set_missing_defaults(mut self) -> Self {
        let missing_defaults = DEFAULT_FIELDS
            .into_iter()
            .filter(|(name, _)| !self.config_map.contains_key(*name))
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect::<Vec<_>>();

        self.config_map.extend(missing_defaults);

        self
    }

    fn check_missing_required(self) -> Result<Self, ExperimentConfigError> {
        let missing_fields: Vec<_> = REQUIRED_FIELDS
            .into_iter()
            .filter(|field| !self.config_map.contains_key(*field))
            .collect();

        if !missing_fields.is_empty() {
            return Err(ExperimentConfigError::MissingConfig {
                configs: missing_fields,
            });
        }

        Ok(self)
    }

    fn warn_unknown_fields(self) -> Self {
        self.config_map
            .keys()
            .filter(|key| !KNOWN_FIELDS.contains(&key.as_str()))
            .for_each(|key| warn!("Unknown config '{}' will be ignored.", key));

        self
    }

    fn field(&self, key: &'static str) -> Result<&str, ExperimentConfigError> {
        self.get(key)
            .ok_or_else(|| ExperimentConfigError::MissingConfig { configs: vec![key] })
    }

    pub fn build(self) -> Result<ExperimentConfig, ExperimentConfigError> {
        let builder = self
            .set_missing_defaults()
            .check_missing_required()?
            .warn_unknown_fields();

        let partition_counts = parse_partition_counts(builder.field(PARTITION_COUNTS)?)?;
        let report_format = builder.field(REPORT_FORMAT)?.parse::<ReportFormat>()?;
        let log_format = builder.field(LOG_FORMAT)?.parse::<LogFormat>()?;

        let raw_level = builder.field(LOG_LEVEL)?;
        let log_level = LevelFilter::from_str(raw_level)
            .map_err(|_| ExperimentConfigError::InvalidLogLevel(raw_level.to_owned()))?;

        let keys_file = builder.get(KEYS_FILE).map(PathBuf::from);

        Ok(ExperimentConfig {
            config_map: builder.config_map,
            partition_counts,
            report_format,
            log_level,
            log_format,
            keys_file,
        })
    }
}

fn parse_partition_counts(raw: &str) -> Result<Vec<i32>, ExperimentConfigError> {
    let invalid = |value: &str| ExperimentConfigError::InvalidPartitionCount {
        value: value.to_owned(),
    };

    if raw.trim().is_empty() {
        return Err(invalid(raw));
    }

    raw.split(',')
        .map(str::trim)
        .map(|value| match value.parse::<i32>() {
            Ok(count) if count > 0 => Ok(count),
            _ => Err(invalid(value)),
        })
        .collect()
}

impl From<&HashMap<String, String>> for ExperimentConfigBuilder {
    fn from(config_map: &HashMap<String, String>) -> Self {
        Self {
            config_map: config_map.clone(),
        }
    }
}
