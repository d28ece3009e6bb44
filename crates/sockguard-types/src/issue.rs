//! Closed vocabularies shared by policy documents and the emitted `socket.yml`.
//!
//! Adding an [`IssueKind`] is a backward-compatible change; removing one is breaking.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string is not part of a closed vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseEnumError {
    pub value: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized value: {}", self.value)
    }
}

impl std::error::Error for ParseEnumError {}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $s:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            JsonSchema,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $s)] $variant, )+
        }

        impl $name {
            /// Every value, in canonical (declaration) order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $s, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $s => Ok($name::$variant), )+
                    other => Err(ParseEnumError { value: other.to_string() }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Category of dependency risk reported by the downstream scanner.
    ///
    /// Declaration order is the order issue rules are written to `socket.yml`.
    pub enum IssueKind {
        // Supply chain
        KnownMalware => "knownMalware",
        CriticalCve => "criticalCVE",
        HighCve => "highCVE",
        MediumCve => "mediumCVE",
        LowCve => "lowCVE",
        Protestware => "protestware",
        PotentialTyposquat => "potentialTyposquat",
        HighEntropyStrings => "highEntropyStrings",
        InstallScripts => "installScripts",
        // Quality
        Deprecated => "deprecated",
        Unmaintained => "unmaintained",
        NoLicense => "noLicense",
        CopyleftLicense => "copyleftLicense",
        NonOssLicense => "nonOssLicense",
        UnstableOwnership => "unstableOwnership",
        // Behavior
        NetworkAccess => "networkAccess",
        FilesystemAccess => "filesystemAccess",
        ShellAccess => "shellAccess",
        EnvironmentAccess => "environmentAccess",
        NativeCode => "nativeCode",
        ObfuscatedCode => "obfuscatedCode",
        MinifiedCode => "minifiedCode",
        // Dependency shape
        TrivialPackage => "trivialPackage",
        FloatingDependency => "floatingDependency",
        UnpopularPackage => "unpopularPackage",
        NewAuthor => "newAuthor",
    }
}

string_enum! {
    /// Handling directive for an issue kind.
    pub enum Action {
        Error => "error",
        Warn => "warn",
        Ignore => "ignore",
        /// Repo-level only: inherit the organization value.
        Defer => "defer",
    }
}

string_enum! {
    /// Handling directive for a package rule. Package rules cannot defer.
    pub enum PackageAction {
        Error => "error",
        Warn => "warn",
        Ignore => "ignore",
    }
}

impl From<PackageAction> for Action {
    fn from(value: PackageAction) -> Self {
        match value {
            PackageAction::Error => Action::Error,
            PackageAction::Warn => Action::Warn,
            PackageAction::Ignore => Action::Ignore,
        }
    }
}
