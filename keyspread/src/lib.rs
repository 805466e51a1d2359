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

//! Kafka compatible key partitioning and key distribution analysis.
//!
//! [`util::hash`] reproduces the Java client's default partitioner bit for
//! bit, [`analysis`] uses it to show how a key set spreads over a topic as
//! its partition count changes.

pub mod analysis;
pub mod config;
pub mod error;
pub mod init;
pub mod util;
pub mod wrapper;

pub use analysis::{analyze, analyze_with, DistributionReport, SkewSummary};
pub use error::PartitionError;
pub use util::hash::{get_partition_for_key, murmur2, to_positive};
