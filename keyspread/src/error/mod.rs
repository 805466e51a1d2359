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

#[derive(Debug, thiserror::Error)]
pub enum PartitionError {
    #[error("Invalid partition count: {0}, must be greater than 0.")]
    InvalidPartitionCount(i32),
    #[error("Failed to serialise key: {0}")]
    KeySerialization(String),
}

impl PartitionError {
    pub(crate) fn serialization(err: impl std::error::Error) -> Self {
        PartitionError::KeySerialization(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TracingInitError {
    #[error("Failed to install global subscriber: {0}")]
    SetGlobalDefault(#[from] tracing::subscriber::SetGlobalDefaultError),
}
