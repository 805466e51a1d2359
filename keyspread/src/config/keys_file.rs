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

use std::io::{self, Read};

#[derive(Debug, thiserror::Error)]
pub enum KeysFileError {
    #[error("KeysFileError::Read: {0}")]
    Read(#[from] io::Error),
    #[error("KeysFileError::Parse: expected a JSON array of strings, {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reads a JSON array of record keys, e.g. `["event.one.core.drum.payment_processed"]`.
pub fn read_keys<R: Read>(mut reader: R) -> Result<Vec<String>, KeysFileError> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;

    Ok(serde_json::from_str(&buf)?)
}
