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

//! Kafka compatible key hashing.
//!
//! The Java client's default partitioner hashes record keys with a seeded
//! 32-bit MurmurHash2 and then picks `toPositive(hash) % partitions`.
//! librdkafka based clients default to CRC32-C instead, so they only agree
//! with this module when configured with the `murmur2` partitioner.

use crate::error::PartitionError;

const SEED: u32 = 0x9747b28c;
const M: u32 = 0x5bd1e995;
const R: u32 = 24;

/// Kafka's `Utils.murmur2`.
///
/// All arithmetic is done on `u32` with wrapping multiplication and
/// logical shifts; only the final value is reinterpreted as signed.
pub fn murmur2(data: &[u8]) -> i32 {
    let length = data.len();
    let mut h: u32 = SEED ^ (length as u32);

    let mut chunks = data.chunks_exact(4);

    for chunk in &mut chunks {
        let mut k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);

        h = h.wrapping_mul(M);
        h ^= k;
    }

    let tail = chunks.remainder();

    // Falls through from the longest tail, same as the Java switch.
    if tail.len() >= 3 {
        h ^= (tail[2] as u32) << 16;
    }
    if tail.len() >= 2 {
        h ^= (tail[1] as u32) << 8;
    }
    if !tail.is_empty() {
        h ^= tail[0] as u32;
        h = h.wrapping_mul(M);
    }

    h ^= h >> 13;
    h = h.wrapping_mul(M);
    h ^= h >> 15;

    h as i32
}

/// Kafka's `Utils.toPositive`. Masks off the sign bit, so `i32::MIN` maps to 0.
#[inline]
pub fn to_positive(number: i32) -> i32 {
    number & 0x7fffffff
}

pub fn get_partition_for_key(
    key_bytes: &[u8],
    partition_count: i32,
) -> Result<i32, PartitionError> {
    if partition_count <= 0 {
        return Err(PartitionError::InvalidPartitionCount(partition_count));
    }

    Ok(partition_for_key_unchecked(key_bytes, partition_count))
}

/// Caller must have checked `partition_count > 0`.
pub(crate) fn partition_for_key_unchecked(key_bytes: &[u8], partition_count: i32) -> i32 {
    to_positive(murmur2(key_bytes)) % partition_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_murmur2_matches_java_client_vectors() {
        // org.apache.kafka.common.utils.UtilsTest#testMurmur2
        let cases: [(&[u8], i32); 6] = [
            (b"21", -973932308),
            (b"foobar", -790332482),
            (b"a-little-bit-long-string", -985981536),
            (b"a-little-bit-longer-string", -1486304829),
            (b"lkjh234lh9fiuh90y23oiuhsafujhadof229phr9h19h89h8", -58897971),
            (b"abc", 479470107),
        ];

        for (input, expected) in cases {
            assert_eq!(
                murmur2(input),
                expected,
                "murmur2({:?})",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn test_murmur2_empty_input_is_finalised_seed() {
        let mut h: u32 = SEED;
        h ^= h >> 13;
        h = h.wrapping_mul(M);
        h ^= h >> 15;

        assert_eq!(murmur2(b""), h as i32);
        assert_eq!(murmur2(b""), 275646681);
    }

    #[test]
    fn test_partition_matches_java_partitioner_for_each_tail_length() {
        // Partition numbers produced by the Java producer with 1000 partitions.
        let cases: [(&[u8], i32); 6] = [
            (b"", 681),
            (b"a", 524),
            (b"ab", 434),
            (b"abc", 107),
            (b"123456789", 566),
            (b"\x00 ", 742),
        ];

        for (input, expected) in cases {
            assert_eq!(get_partition_for_key(input, 1000).unwrap(), expected);
        }
    }

    #[test]
    fn test_to_positive_masks_sign_bit() {
        assert_eq!(to_positive(i32::MIN), 0);
        assert_eq!(to_positive(-1), i32::MAX);
        assert_eq!(to_positive(i32::MAX), i32::MAX);
        assert_eq!(to_positive(0), 0);
        assert_eq!(to_positive(-973932308), -973932308 & 0x7fffffff);
    }

    #[test]
    fn test_partition_is_deterministic() {
        let key = b"event.one.core.guitar.order_created";

        let first = get_partition_for_key(key, 10).unwrap();
        let second = get_partition_for_key(key, 10).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, 8);
    }

    #[test]
    fn test_partition_is_within_range() {
        for partition_count in [1, 2, 3, 7, 10, 64, 1000, i32::MAX] {
            for i in 0..500 {
                let key = format!("key-{}", i);
                let partition = get_partition_for_key(key.as_bytes(), partition_count).unwrap();

                assert!(
                    (0..partition_count).contains(&partition),
                    "Partition {} out of range [0, {})",
                    partition,
                    partition_count
                );
            }
        }
    }

    #[test]
    fn test_single_partition_takes_every_key() {
        assert_eq!(get_partition_for_key(b"key1", 1).unwrap(), 0);
        assert_eq!(get_partition_for_key(b"key2", 1).unwrap(), 0);
        assert_eq!(get_partition_for_key(b"", 1).unwrap(), 0);
    }

    #[test]
    fn test_non_positive_partition_count_is_rejected() {
        let keys: [&[u8]; 3] = [b"", b"a", b"event.one.core.guitar.order_created"];

        for key in keys {
            assert!(matches!(
                get_partition_for_key(key, 0),
                Err(PartitionError::InvalidPartitionCount(0))
            ));
        }

        assert!(matches!(
            get_partition_for_key(b"key", -3),
            Err(PartitionError::InvalidPartitionCount(-3))
        ));
    }
}
