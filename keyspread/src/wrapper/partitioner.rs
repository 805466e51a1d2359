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

use crate::{
    error::PartitionError, util::hash::partition_for_key_unchecked,
    wrapper::serde::KeySerializer,
};

mod private {
    pub trait Sealed {}
}

/// Partitions typed keys. Sealed: [`DefaultPartitioner`] is the only
/// implementation, so every assignment goes through Kafka's murmur2.
pub trait KeyPartitioner: private::Sealed {
    fn partition_key<KS>(
        &self,
        key: &KS::Input,
        partition_count: i32,
    ) -> Result<i32, PartitionError>
    where
        KS: KeySerializer;
}

/// Kafka's Java default partitioner for keyed records.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPartitioner;

impl private::Sealed for DefaultPartitioner {}

impl DefaultPartitioner {
    /// Caller must have checked `partition_count > 0`.
    pub(crate) fn partition_key_unchecked<KS>(
        &self,
        key: &KS::Input,
        partition_count: i32,
    ) -> Result<i32, PartitionError>
    where
        KS: KeySerializer,
    {
        let key_bytes = KS::serialize(key).map_err(PartitionError::serialization)?;

        Ok(partition_for_key_unchecked(&key_bytes, partition_count))
    }
}

impl KeyPartitioner for DefaultPartitioner {
    fn partition_key<KS>(
        &self,
        key: &KS::Input,
        partition_count: i32,
    ) -> Result<i32, PartitionError>
    where
        KS: KeySerializer,
    {
        if partition_count <= 0 {
            return Err(PartitionError::InvalidPartitionCount(partition_count));
        }

        self.partition_key_unchecked::<KS>(key, partition_count)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{
        util::hash::get_partition_for_key,
        wrapper::serde::{json::Json, native::NativeBytes},
    };

    use super::*;

    #[test]
    fn test_string_key_matches_raw_bytes() {
        let key = String::from("event.one.core.guitar.order_created");

        let typed = DefaultPartitioner.partition_key::<String>(&key, 10).unwrap();
        let raw = get_partition_for_key(key.as_bytes(), 10).unwrap();

        assert_eq!(typed, raw);
        assert_eq!(typed, 8);
    }

    #[test]
    fn test_bytes_key_matches_java_partitioner() {
        let key = b"123456789".to_vec();

        assert_eq!(
            DefaultPartitioner.partition_key::<Vec<u8>>(&key, 1000).unwrap(),
            566
        );
    }

    #[test]
    fn test_json_key_hashes_encoded_document() {
        // "abc" as JSON is the five bytes "abc" including quotes.
        let key = String::from("abc");

        let typed = DefaultPartitioner.partition_key::<Json<String>>(&key, 7).unwrap();
        let raw = get_partition_for_key(br#""abc""#, 7).unwrap();

        assert_eq!(typed, raw);
    }

    #[test]
    fn test_native_key_hashes_bincode_bytes() {
        let typed = DefaultPartitioner
            .partition_key::<NativeBytes<u32>>(&0x00636261, 1000)
            .unwrap();

        // Little-endian 0x00636261 is "abc\0".
        assert_eq!(typed, get_partition_for_key(b"abc\0", 1000).unwrap());
    }

    #[test]
    fn test_invalid_partition_count_checked_before_serialising() {
        let mut key = BTreeMap::new();
        key.insert(vec![1u8], 1);

        let result = DefaultPartitioner.partition_key::<Json<BTreeMap<Vec<u8>, i32>>>(&key, 0);

        assert!(matches!(result, Err(PartitionError::InvalidPartitionCount(0))));
    }

    #[test]
    fn test_serialisation_failure_is_reported() {
        let mut key = BTreeMap::new();
        key.insert(vec![1u8], 1);

        let result = DefaultPartitioner.partition_key::<Json<BTreeMap<Vec<u8>, i32>>>(&key, 4);

        assert!(matches!(result, Err(PartitionError::KeySerialization(_))));
    }
}
