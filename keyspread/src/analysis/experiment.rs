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

//! Runs one key set against several partition counts so their skew can be
//! compared side by side.

use crate::error::PartitionError;

use super::{analyze, DistributionReport};

/// Topic keys shaped `event.app_name.context.entity.use_case`, where some
/// segments repeat far more often than others.
pub const SAMPLE_RECORD_KEYS: [&str; 10] = [
    "event.one.core.guitar.order_created",
    "event.one.core.keyboard.user_registered",
    "event.one.core.drum.payment_processed",
    "event.one.core.amplifier.product_added",
    "event.one.core.strings.transaction_completed",
    "event.one.core.microphone.customer_updated",
    "event.two.b2b.piano.order_created",
    "event.two.b2b.saxophone.user_registered",
    "event.three.billing.cymbals.payment_approved",
    "event.four.social.violin.product_removed",
];

pub const DEFAULT_PARTITION_COUNTS: [i32; 3] = [2, 5, 10];

/// One independent analysis per partition count, produced on demand.
pub fn experiments<'k, 'c, K>(
    keys: &'k [K],
    partition_counts: &'c [i32],
) -> impl Iterator<Item = Result<DistributionReport<&'k K>, PartitionError>> + 'c
where
    'k: 'c,
    K: AsRef<[u8]>,
{
    partition_counts
        .iter()
        .map(move |partition_count| analyze(keys, *partition_count))
}

pub fn run_experiments<'k, K>(
    keys: &'k [K],
    partition_counts: &[i32],
) -> Result<Vec<DistributionReport<&'k K>>, PartitionError>
where
    K: AsRef<[u8]>,
{
    experiments(keys, partition_counts).collect()
}
