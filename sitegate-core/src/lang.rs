//! Supported content languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SiteError;

/// A language the platform serves content in.
///
/// Parsing is exact and case-sensitive: `"hu"` is accepted, `"HU"` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Hu,
    En,
    De,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Hu, Lang::En, Lang::De];

    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Hu => "hu",
            Lang::En => "en",
            Lang::De => "de",
        }
    }
}

impl FromStr for Lang {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hu" => Ok(Lang::Hu),
            "en" => Ok(Lang::En),
            "de" => Ok(Lang::De),
            other => Err(SiteError::bad_request(format!("Unsupported language: {other}"))
                .with_data(serde_json::json!({ "lang": other }))),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
