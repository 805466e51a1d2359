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

use std::{collections::HashMap, fmt::{Debug, Display}};

use serde::{ser::SerializeStruct, Serialize};

use crate::error::PartitionError;

/// Keys grouped by the partition they were assigned to.
///
/// Partitions are kept in the order they were first hit during the scan,
/// not in numeric order. Partitions that received no keys have no entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionReport<K> {
    partition_count: i32,
    #[serde(rename = "partitions")]
    entries: Vec<PartitionEntry<K>>,
    #[serde(skip)]
    index: HashMap<i32, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionEntry<K> {
    partition: i32,
    keys: Vec<K>,
}

impl<K> PartitionEntry<K> {
    pub fn partition(&self) -> i32 {
        self.partition
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn count(&self) -> usize {
        self.keys.len()
    }
}

impl<K> Serialize for PartitionEntry<K>
where
    K: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PartitionEntry", 3)?;
        state.serialize_field("partition", &self.partition)?;
        state.serialize_field("count", &self.keys.len())?;
        state.serialize_field("keys", &self.keys)?;
        state.end()
    }
}

impl<K> DistributionReport<K> {
    pub(crate) fn new(partition_count: i32) -> Result<Self, PartitionError> {
        if partition_count <= 0 {
            return Err(PartitionError::InvalidPartitionCount(partition_count));
        }

        Ok(Self {
            partition_count,
            entries: Vec::new(),
            index: HashMap::new(),
        })
    }

    pub(crate) fn insert(&mut self, partition: i32, key: K) {
        match self.index.get(&partition) {
            Some(position) => self.entries[*position].keys.push(key),
            None => {
                self.index.insert(partition, self.entries.len());
                self.entries.push(PartitionEntry {
                    partition,
                    keys: vec![key],
                });
            }
        }
    }

    pub fn partition_count(&self) -> i32 {
        self.partition_count
    }

    pub fn entries(&self) -> &[PartitionEntry<K>] {
        &self.entries
    }

    pub fn partitions(&self) -> impl Iterator<Item = (i32, &[K])> {
        self.entries
            .iter()
            .map(|entry| (entry.partition, entry.keys.as_slice()))
    }

    pub fn keys_for(&self, partition: i32) -> Option<&[K]> {
        self.index
            .get(&partition)
            .map(|position| self.entries[*position].keys.as_slice())
    }

    pub fn total_keys(&self) -> usize {
        self.entries.iter().map(PartitionEntry::count).sum()
    }

    /// Number of occupied partitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> SkewSummary {
        let total_keys = self.total_keys();
        let occupied_partitions = self.entries.len();
        let empty_partitions = self.partition_count as usize - occupied_partitions;

        let max_keys = self
            .entries
            .iter()
            .map(PartitionEntry::count)
            .max()
            .unwrap_or(0);
        let min_keys = if empty_partitions > 0 {
            0
        } else {
            self.entries
                .iter()
                .map(PartitionEntry::count)
                .min()
                .unwrap_or(0)
        };

        let mean_keys = total_keys as f64 / self.partition_count as f64;
        let skew_ratio = if total_keys == 0 {
            0.0
        } else {
            max_keys as f64 / mean_keys
        };

        SkewSummary {
            partition_count: self.partition_count,
            total_keys,
            occupied_partitions,
            empty_partitions,
            min_keys,
            max_keys,
            mean_keys,
            skew_ratio,
        }
    }

    /// Human readable lines: two per occupied partition, then a closing line.
    pub fn render(&self) -> impl Iterator<Item = String> + '_
    where
        K: Debug,
    {
        self.entries
            .iter()
            .flat_map(|entry| {
                [
                    format!(
                        "For partition {}: {} keys were assigned.",
                        entry.partition,
                        entry.keys.len()
                    ),
                    format!("{:?}", entry.keys),
                ]
            })
            .chain(std::iter::once_with(move || {
                format!("End experiment for {} partitions", self.partition_count)
            }))
    }
}

impl<K> Display for DistributionReport<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lines = self.render();

        if let Some(first) = lines.next() {
            write!(f, "{}", first)?;
        }

        for line in lines {
            write!(f, "\n{}", line)?;
        }

        Ok(())
    }
}

/// How far a report is from a uniform spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkewSummary {
    pub partition_count: i32,
    pub total_keys: usize,
    pub occupied_partitions: usize,
    pub empty_partitions: usize,
    pub min_keys: usize,
    pub max_keys: usize,
    pub mean_keys: f64,
    /// `max_keys / mean_keys`; 1.0 is a perfectly even spread.
    pub skew_ratio: f64,
}

impl Display for SkewSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "partitions: {}, keys: {}, occupied: {}, empty: {}, min: {}, max: {}, mean: {:.2}, skew: {:.2}",
            self.partition_count,
            self.total_keys,
            self.occupied_partitions,
            self.empty_partitions,
            self.min_keys,
            self.max_keys,
            self.mean_keys,
            self.skew_ratio
        )
    }
}
