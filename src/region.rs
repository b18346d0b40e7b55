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

//! Cloud regions where Wherobots SQL sessions can be provisioned.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// The cloud region a SQL session is provisioned in.
///
/// The variant name is what appears in connection URLs
/// (`?region=AWS_US_WEST_2`); [`Region::value`] is the identifier sent to
/// the session API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    AwsUsWest2,
    AwsUsEast1,
    AwsEuWest1,
}

impl Region {
    /// The region identifier understood by the session-provisioning API.
    pub fn value(&self) -> &'static str {
        match self {
            Region::AwsUsWest2 => "aws-us-west-2",
            Region::AwsUsEast1 => "aws-us-east-1",
            Region::AwsEuWest1 => "aws-eu-west-1",
        }
    }

    /// The name used in connection URLs and configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Region::AwsUsWest2 => "AWS_US_WEST_2",
            Region::AwsUsEast1 => "AWS_US_EAST_1",
            Region::AwsEuWest1 => "AWS_EU_WEST_1",
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::AwsUsWest2
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = Error;

    /// Total lookup: an unrecognized name returns [`Error::UnknownRegion`]
    /// rather than panicking.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AWS_US_WEST_2" => Ok(Region::AwsUsWest2),
            "AWS_US_EAST_1" => Ok(Region::AwsUsEast1),
            "AWS_EU_WEST_1" => Ok(Region::AwsEuWest1),
            other => Err(Error::UnknownRegion(other.to_string())),
        }
    }
}
