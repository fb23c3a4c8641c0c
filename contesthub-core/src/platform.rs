//! The fixed set of contest-hosting platforms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    CodeChef,
    Codeforces,
    GeeksforGeeks,
    LeetCode,
    HackerEarth,
    AtCoder,
}

impl Platform {
    /// All platforms, in display order.
    pub const ALL: [Platform; 6] = [
        Platform::CodeChef,
        Platform::Codeforces,
        Platform::GeeksforGeeks,
        Platform::LeetCode,
        Platform::HackerEarth,
        Platform::AtCoder,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Platform::CodeChef => "CodeChef",
            Platform::Codeforces => "Codeforces",
            Platform::GeeksforGeeks => "GeeksforGeeks",
            Platform::LeetCode => "LeetCode",
            Platform::HackerEarth => "HackerEarth",
            Platform::AtCoder => "AtCoder",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = String;

    /// Case-insensitive lookup by display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown platform '{}'", s))
    }
}
