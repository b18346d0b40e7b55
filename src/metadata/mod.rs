// Copyright (c) 2025 Wherobots Dialect Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Metadata introspection support: statement builders, `DESCRIBE` output
//! parsing, and the Wherobots → Arrow type mapping.

pub mod parse;
pub mod sql;
pub mod type_mapping;

pub use parse::{columns_from_describe, ColumnDescriptor};
pub use sql::OPEN_DATA_CATALOG;
pub use type_mapping::wherobots_type_to_arrow;
