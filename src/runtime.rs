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

//! Wherobots SQL session runtime sizes.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// The compute runtime a SQL session is provisioned with.
///
/// The variant name is what appears in connection URLs (`?runtime=SEDONA`);
/// [`Runtime::runtime_id`] is the identifier sent to the session API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Runtime {
    Sedona,
    NewYork,
    Cairo,
    Delhi,
    Tokyo,
    NewYorkHimem,
    CairoHimem,
    DelhiHimem,
    TokyoHimem,
}

impl Runtime {
    /// The runtime identifier understood by the session-provisioning API.
    pub fn runtime_id(&self) -> &'static str {
        match self {
            Runtime::Sedona => "TINY",
            Runtime::NewYork => "MEDIUM",
            Runtime::Cairo => "LARGE",
            Runtime::Delhi => "XLARGE",
            Runtime::Tokyo => "XXLARGE",
            Runtime::NewYorkHimem => "medium-himem",
            Runtime::CairoHimem => "large-himem",
            Runtime::DelhiHimem => "x-large-himem",
            Runtime::TokyoHimem => "2x-large-himem",
        }
    }

    /// The name used in connection URLs and configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Runtime::Sedona => "SEDONA",
            Runtime::NewYork => "NEW_YORK",
            Runtime::Cairo => "CAIRO",
            Runtime::Delhi => "DELHI",
            Runtime::Tokyo => "TOKYO",
            Runtime::NewYorkHimem => "NEW_YORK_HIMEM",
            Runtime::CairoHimem => "CAIRO_HIMEM",
            Runtime::DelhiHimem => "DELHI_HIMEM",
            Runtime::TokyoHimem => "TOKYO_HIMEM",
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::Sedona
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Runtime {
    type Err = Error;

    /// Total lookup: an unrecognized name returns [`Error::UnknownRuntime`]
    /// rather than panicking.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SEDONA" => Ok(Runtime::Sedona),
            "NEW_YORK" => Ok(Runtime::NewYork),
            "CAIRO" => Ok(Runtime::Cairo),
            "DELHI" => Ok(Runtime::Delhi),
            "TOKYO" => Ok(Runtime::Tokyo),
            "NEW_YORK_HIMEM" => Ok(Runtime::NewYorkHimem),
            "CAIRO_HIMEM" => Ok(Runtime::CairoHimem),
            "DELHI_HIMEM" => Ok(Runtime::DelhiHimem),
            "TOKYO_HIMEM" => Ok(Runtime::TokyoHimem),
            other => Err(Error::UnknownRuntime(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_from_str() {
        assert_eq!("SEDONA".parse::<Runtime>().unwrap(), Runtime::Sedona);
        assert_eq!("NEW_YORK".parse::<Runtime>().unwrap(), Runtime::NewYork);
        assert_eq!("TOKYO_HIMEM".parse::<Runtime>().unwrap(), Runtime::TokyoHimem);
    }

    #[test]
    fn test_runtime_from_str_unknown() {
        let err = "sedona".parse::<Runtime>().unwrap_err();
        assert!(matches!(err, Error::UnknownRuntime(ref s) if s == "sedona"));
    }

    #[test]
    fn test_runtime_ids() {
        assert_eq!(Runtime::Sedona.runtime_id(), "TINY");
        assert_eq!(Runtime::NewYork.runtime_id(), "MEDIUM");
        assert_eq!(Runtime::Cairo.runtime_id(), "LARGE");
        assert_eq!(Runtime::Tokyo.runtime_id(), "XXLARGE");
        assert_eq!(Runtime::DelhiHimem.runtime_id(), "x-large-himem");
    }

    #[test]
    fn test_runtime_display_round_trip() {
        for runtime in [
            Runtime::Sedona,
            Runtime::NewYork,
            Runtime::Cairo,
            Runtime::Delhi,
            Runtime::Tokyo,
            Runtime::NewYorkHimem,
            Runtime::CairoHimem,
            Runtime::DelhiHimem,
            Runtime::TokyoHimem,
        ] {
            assert_eq!(runtime.to_string().parse::<Runtime>().unwrap(), runtime);
        }
    }

    #[test]
    fn test_runtime_default() {
        assert_eq!(Runtime::default(), Runtime::Sedona);
    }
}
