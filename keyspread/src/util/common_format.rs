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

pub(crate) fn key_partition(key: &[u8], partition: i32, partition_count: i32) -> String {
    format!(
        "key: {}, partition: {}, partition_count: {}",
        String::from_utf8_lossy(key),
        partition,
        partition_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_partition_format() {
        assert_eq!(
            key_partition(b"event.one", 3, 10),
            "key: event.one, partition: 3, partition_count: 10"
        );
    }
}
