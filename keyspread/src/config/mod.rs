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

use std::{
    collections::HashMap,
    fs::File,
    path::{Path, PathBuf},
    str::FromStr,
};

use tracing::level_filters::LevelFilter;

use crate::analysis::experiment::SAMPLE_RECORD_KEYS;

use self::builder::ExperimentConfigError;

pub mod builder;
pub mod keys_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = ExperimentConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ExperimentConfigError::InvalidReportFormat(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ExperimentConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ExperimentConfigError::InvalidLogFormat(s.to_owned())),
        }
    }
}

/// Validated settings for a skew experiment run.
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub(super) config_map: HashMap<String, String>,
    pub(super) partition_counts: Vec<i32>,
    pub(super) report_format: ReportFormat,
    pub(super) log_level: LevelFilter,
    pub(super) log_format: LogFormat,
    pub(super) keys_file: Option<PathBuf>,
}

impl ExperimentConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.config_map.get(key).map(String::as_str)
    }

    pub fn partition_counts(&self) -> &[i32] {
        &self.partition_counts
    }

    pub fn report_format(&self) -> ReportFormat {
        self.report_format
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    pub fn keys_file(&self) -> Option<&Path> {
        self.keys_file.as_deref()
    }

    /// Keys from `keys.file` when set, otherwise the built in sample keys.
    pub fn load_keys(&self) -> Result<Vec<String>, ExperimentConfigError> {
        match self.keys_file() {
            Some(path) => {
                let file = File::open(path).map_err(keys_file::KeysFileError::from)?;

                Ok(keys_file::read_keys(file)?)
            }
            None => Ok(SAMPLE_RECORD_KEYS
                .iter()
                .map(|key| key.to_string())
                .collect()),
        }
    }
}

impl TryFrom<&HashMap<String, String>> for ExperimentConfig {
    type Error = ExperimentConfigError;

    fn try_from(config_map: &HashMap<String, String>) -> Result<Self, Self::Error> {
        builder::ExperimentConfigBuilder::from(config_map).build()
    }
}
