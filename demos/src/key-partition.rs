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

use anyhow::Context;
use keyspread::analysis::assignments;
use keyspread::init::init_tracing;

use tracing::level_filters::LevelFilter;

fn main() -> anyhow::Result<()> {
    init_tracing(LevelFilter::WARN)?;

    let mut args = std::env::args().skip(1);

    let partition_count: i32 = args
        .next()
        .context("usage: key-partition <partition_count> <key>...")?
        .parse()
        .context("partition_count must be an integer")?;

    anyhow::ensure!(partition_count > 0, "partition_count must be greater than 0");

    let keys: Vec<String> = args.collect();

    for assignment in assignments(&keys, partition_count) {
        let assignment = assignment?;

        println!("{} -> {}", assignment.key, assignment.partition);
    }

    Ok(())
}
