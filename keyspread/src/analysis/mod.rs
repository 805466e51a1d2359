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

//! Measures how a set of keys spreads over a topic's partitions.
//!
//! [`analyze`] runs raw byte keys through the Kafka default partitioner and
//! groups them by partition, [`analyze_with`] does the same for typed keys
//! through [`DefaultPartitioner`]. Neither does any I/O.

use tracing::{debug, error, info};

use crate::{
    error::PartitionError,
    util::{
        common_format::key_partition,
        hash::{get_partition_for_key, partition_for_key_unchecked},
    },
    wrapper::{partitioner::DefaultPartitioner, serde::KeySerializer},
};

pub mod experiment;
pub mod report;

pub use report::{DistributionReport, PartitionEntry, SkewSummary};

/// A key and the partition it was routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<K> {
    pub key: K,
    pub partition: i32,
}

/// Lazily assigns each key to a partition, in input order.
pub fn assignments<I, K>(
    keys: I,
    partition_count: i32,
) -> impl Iterator<Item = Result<Assignment<K>, PartitionError>>
where
    I: IntoIterator<Item = K>,
    K: AsRef<[u8]>,
{
    keys.into_iter().map(move |key| {
        let partition = get_partition_for_key(key.as_ref(), partition_count)?;

        Ok(Assignment { key, partition })
    })
}

pub fn analyze<I, K>(
    keys: I,
    partition_count: i32,
) -> Result<DistributionReport<K>, PartitionError>
where
    I: IntoIterator<Item = K>,
    K: AsRef<[u8]>,
{
    let mut report = DistributionReport::new(partition_count)?;

    for key in keys {
        let partition = partition_for_key_unchecked(key.as_ref(), partition_count);

        debug!("{}", key_partition(key.as_ref(), partition, partition_count));

        report.insert(partition, key);
    }

    info!("Analysed distribution, {}", report.summary());

    Ok(report)
}

pub fn analyze_with<KS, I>(
    keys: I,
    partition_count: i32,
) -> Result<DistributionReport<KS::Input>, PartitionError>
where
    KS: KeySerializer,
    I: IntoIterator<Item = KS::Input>,
{
    let mut report = DistributionReport::new(partition_count)?;

    for (position, key) in keys.into_iter().enumerate() {
        let partition = DefaultPartitioner
            .partition_key_unchecked::<KS>(&key, partition_count)
            .map_err(|err| {
                error!(
                    "Failed to partition key at position: {}, partition_count: {}, caused by: {}",
                    position, partition_count, err
                );
                err
            })?;

        debug!(
            "position: {}, partition: {}, partition_count: {}",
            position, partition, partition_count
        );

        report.insert(partition, key);
    }

    info!("Analysed distribution, {}", report.summary());

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::wrapper::serde::json::Json;

    use super::{experiment::SAMPLE_RECORD_KEYS, *};

    fn sample_strings() -> Vec<String> {
        SAMPLE_RECORD_KEYS
            .iter()
            .map(|key| key.to_string())
            .collect()
    }

    #[test]
    fn test_sample_keys_over_two_partitions() {
        let report = analyze(SAMPLE_RECORD_KEYS, 2).unwrap();

        for (partition, _) in report.partitions() {
            assert!(partition == 0 || partition == 1);
        }

        assert_eq!(report.total_keys(), 10);
        assert_eq!(report.keys_for(0).map(<[_]>::len), Some(5));
        assert_eq!(report.keys_for(1).map(<[_]>::len), Some(5));
    }

    #[test]
    fn test_single_partition_collects_every_key() {
        let report = analyze(SAMPLE_RECORD_KEYS, 1).unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report.keys_for(0), Some(&SAMPLE_RECORD_KEYS[..]));
    }

    #[test]
    fn test_zero_partitions_is_rejected() {
        assert!(matches!(
            analyze(SAMPLE_RECORD_KEYS, 0),
            Err(PartitionError::InvalidPartitionCount(0))
        ));
        assert!(matches!(
            analyze(Vec::<&str>::new(), -1),
            Err(PartitionError::InvalidPartitionCount(-1))
        ));
    }

    #[test]
    fn test_invalid_count_fails_before_consuming_keys() {
        let sample = SAMPLE_RECORD_KEYS;
        let mut consumed = 0;
        let keys = sample.iter().inspect(|_| consumed += 1);

        assert!(analyze(keys, 0).is_err());
        assert_eq!(consumed, 0);
    }

    #[test]
    fn test_every_key_is_accounted_for() {
        let keys: Vec<String> = (0..1000)
            .map(|i| format!("event.app.ctx.entity-{}.created", i))
            .collect();

        for partition_count in [1, 2, 3, 5, 10, 16, 100, 2000] {
            let report = analyze(&keys, partition_count).unwrap();

            assert_eq!(report.total_keys(), keys.len());
            assert!(report.len() <= partition_count as usize);
        }
    }

    #[test]
    fn test_first_seen_order_and_input_order_within_partition() {
        let report = analyze(SAMPLE_RECORD_KEYS, 10).unwrap();

        let order: Vec<i32> = report
            .partitions()
            .map(|(partition, _)| partition)
            .collect();
        assert_eq!(order, vec![8, 3, 5, 4, 9, 7, 2]);

        assert_eq!(
            report.keys_for(8),
            Some(
                &[
                    "event.one.core.guitar.order_created",
                    "event.three.billing.cymbals.payment_approved",
                ][..]
            )
        );
    }

    #[test]
    fn test_analyze_consumes_lazy_keys() {
        let keys = (0..100).map(|i| format!("key-{}", i).into_bytes());

        let report = analyze(keys, 8).unwrap();

        assert_eq!(report.total_keys(), 100);
    }

    #[test]
    fn test_assignments_are_lazy_and_ordered() {
        let result: Vec<_> = assignments(["abc", ""], 1000)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            result,
            vec![
                Assignment {
                    key: "abc",
                    partition: 107
                },
                Assignment {
                    key: "",
                    partition: 681
                },
            ]
        );

        let mut failing = assignments(["abc"], 0);
        assert!(matches!(
            failing.next(),
            Some(Err(PartitionError::InvalidPartitionCount(0)))
        ));
    }

    #[test]
    fn test_analyze_with_uses_java_default_partitioner() {
        let report = analyze_with::<String, _>(sample_strings(), 10).unwrap();

        let assigned: Vec<i32> = SAMPLE_RECORD_KEYS
            .iter()
            .map(|key| {
                report
                    .partitions()
                    .find(|(_, keys)| keys.iter().any(|k| k == key))
                    .map(|(partition, _)| partition)
                    .unwrap()
            })
            .collect();

        assert_eq!(assigned, vec![8, 3, 5, 4, 9, 7, 9, 4, 8, 2]);

        let bytes: Vec<Vec<u8>> = vec![b"".to_vec(), b"a".to_vec(), b"123456789".to_vec()];
        let report = analyze_with::<Vec<u8>, _>(bytes, 1000).unwrap();

        let order: Vec<i32> = report
            .partitions()
            .map(|(partition, _)| partition)
            .collect();
        assert_eq!(order, vec![681, 524, 566]);
    }

    #[test]
    fn test_analyze_with_typed_keys_matches_raw_keys() {
        let typed = analyze_with::<String, _>(sample_strings(), 5).unwrap();
        let raw = analyze(SAMPLE_RECORD_KEYS, 5).unwrap();

        let typed_partitions: Vec<_> = typed
            .partitions()
            .map(|(partition, keys)| (partition, keys.len()))
            .collect();
        let raw_partitions: Vec<_> = raw
            .partitions()
            .map(|(partition, keys)| (partition, keys.len()))
            .collect();

        assert_eq!(typed_partitions, raw_partitions);
    }

    #[test]
    fn test_analyze_with_stops_on_serialisation_failure() {
        let mut bad = BTreeMap::new();
        bad.insert(vec![0u8], 0);

        let keys = vec![BTreeMap::new(), bad];
        let result = analyze_with::<Json<BTreeMap<Vec<u8>, i32>>, _>(keys, 3);

        assert!(matches!(result, Err(PartitionError::KeySerialization(_))));
    }

    #[test]
    fn test_analyze_with_rejects_zero_partitions() {
        let result = analyze_with::<String, _>(Vec::new(), 0);

        assert!(matches!(result, Err(PartitionError::InvalidPartitionCount(0))));
    }
}
