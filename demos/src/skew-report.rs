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

use keyspread::analysis::experiment::experiments;
use keyspread::config::{builder::ExperimentConfigBuilder, ReportFormat};
use keyspread::init::init_tracing_with_format;

use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = ExperimentConfigBuilder::from_env().build()?;

    init_tracing_with_format(config.log_level(), config.log_format())?;

    let keys = config.load_keys()?;

    info!(
        "Running skew experiments, keys: {}, partition_counts: {:?}",
        keys.len(),
        config.partition_counts()
    );

    for report in experiments(&keys, config.partition_counts()) {
        let report = report?;

        match config.report_format() {
            ReportFormat::Text => report.render().for_each(|line| println!("{}", line)),
            ReportFormat::Json => println!("{}", serde_json::to_string(&report)?),
        }
    }

    Ok(())
}
