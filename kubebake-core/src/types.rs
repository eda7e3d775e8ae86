//! Domain types for the bake pipeline.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::BakeError;

// ---------------------------------------------------------------------------
// EngineKind
// ---------------------------------------------------------------------------

/// All supported render backends.
///
/// Selected once per run from the required `renderEngine` input. The Helm
/// variant is selected by the literal `helm2` — the legacy Helm major
/// version this step supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Helm2,
    Kompose,
    Kustomize,
}

impl EngineKind {
    /// All engine variants in a stable order.
    pub fn all() -> &'static [EngineKind] {
        &[EngineKind::Helm2, EngineKind::Kompose, EngineKind::Kustomize]
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Helm2 => write!(f, "helm2"),
            EngineKind::Kompose => write!(f, "kompose"),
            EngineKind::Kustomize => write!(f, "kustomize"),
        }
    }
}

impl FromStr for EngineKind {
    type Err = BakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "helm2" => Ok(EngineKind::Helm2),
            "kompose" => Ok(EngineKind::Kompose),
            "kustomize" => Ok(EngineKind::Kustomize),
            other => Err(BakeError::UnknownEngine {
                name: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// OverridePair
// ---------------------------------------------------------------------------

/// A single Helm `--set` override, parsed from a `key:value` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverridePair {
    pub name: String,
    pub value: String,
}

impl OverridePair {
    /// Parse a `key:value` token, splitting on the FIRST colon only.
    ///
    /// The value may itself contain colons (`image.tag:v1:latest` yields
    /// value `v1:latest`). A token without a colon, or with an empty key,
    /// is rejected.
    pub fn parse(token: &str) -> Result<Self, BakeError> {
        let (name, value) = token
            .split_once(':')
            .ok_or_else(|| BakeError::InvalidOverride {
                token: token.to_string(),
            })?;
        if name.is_empty() {
            return Err(BakeError::InvalidOverride {
                token: token.to_string(),
            });
        }
        Ok(OverridePair {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Render as a Helm `--set` argument value (`name=value`).
    pub fn to_set_arg(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

// ---------------------------------------------------------------------------
// VersionInfo
// ---------------------------------------------------------------------------

/// Client version self-reported by `kubectl version --client=true -o json`.
///
/// Transient; used only for the kustomize version gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub major: u32,
    pub minor: u32,
}

#[derive(Debug, Deserialize)]
struct ClientVersionDoc {
    #[serde(rename = "clientVersion")]
    client_version: ClientVersionFields,
}

#[derive(Debug, Deserialize)]
struct ClientVersionFields {
    major: String,
    minor: String,
}

/// kubectl reports minor versions like `"14+"` on vendor builds; keep the
/// leading digits only.
fn parse_component(raw: &str) -> Option<u32> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

impl VersionInfo {
    /// Parse `clientVersion.major` / `clientVersion.minor` out of kubectl's
    /// JSON version document.
    pub fn from_client_json(json: &str) -> Result<Self, BakeError> {
        let doc: ClientVersionDoc =
            serde_json::from_str(json).map_err(|_| BakeError::VersionParse {
                output: json.trim().to_string(),
            })?;
        let major = parse_component(&doc.client_version.major);
        let minor = parse_component(&doc.client_version.minor);
        match (major, minor) {
            (Some(major), Some(minor)) => Ok(VersionInfo { major, minor }),
            _ => Err(BakeError::VersionParse {
                output: json.trim().to_string(),
            }),
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("helm2", EngineKind::Helm2)]
    #[case("kompose", EngineKind::Kompose)]
    #[case("kustomize", EngineKind::Kustomize)]
    fn engine_kind_parses_known_names(#[case] name: &str, #[case] expected: EngineKind) {
        assert_eq!(name.parse::<EngineKind>().unwrap(), expected);
    }

    #[rstest]
    #[case("helm")]
    #[case("helm3")]
    #[case("Kustomize")]
    #[case("")]
    fn engine_kind_rejects_unknown_names(#[case] name: &str) {
        match name.parse::<EngineKind>() {
            Err(BakeError::UnknownEngine { name: got }) => assert_eq!(got, name),
            other => panic!("expected UnknownEngine, got {other:?}"),
        }
    }

    #[test]
    fn engine_kind_display_roundtrips() {
        for kind in EngineKind::all() {
            assert_eq!(kind.to_string().parse::<EngineKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn override_splits_on_first_colon_only() {
        let pair = OverridePair::parse("image.tag:v1.2.3").unwrap();
        assert_eq!(pair.name, "image.tag");
        assert_eq!(pair.value, "v1.2.3");

        let pair = OverridePair::parse("registry:host:5000/img").unwrap();
        assert_eq!(pair.name, "registry");
        assert_eq!(pair.value, "host:5000/img");
    }

    #[test]
    fn override_simple_pair() {
        let pair = OverridePair::parse("replicaCount:3").unwrap();
        assert_eq!(pair.name, "replicaCount");
        assert_eq!(pair.value, "3");
        assert_eq!(pair.to_set_arg(), "replicaCount=3");
    }

    #[rstest]
    #[case("no-colon-here")]
    #[case(":value-without-key")]
    fn override_rejects_malformed_tokens(#[case] token: &str) {
        match OverridePair::parse(token) {
            Err(BakeError::InvalidOverride { token: got }) => assert_eq!(got, token),
            other => panic!("expected InvalidOverride, got {other:?}"),
        }
    }

    #[test]
    fn override_empty_value_is_allowed() {
        let pair = OverridePair::parse("flag:").unwrap();
        assert_eq!(pair.name, "flag");
        assert_eq!(pair.value, "");
    }

    #[test]
    fn version_info_parses_kubectl_json() {
        let json = r#"{"clientVersion":{"major":"1","minor":"14","gitVersion":"v1.14.0"}}"#;
        let v = VersionInfo::from_client_json(json).unwrap();
        assert_eq!(v, VersionInfo { major: 1, minor: 14 });
    }

    #[test]
    fn version_info_strips_vendor_suffix() {
        let json = r#"{"clientVersion":{"major":"1","minor":"21+"}}"#;
        let v = VersionInfo::from_client_json(json).unwrap();
        assert_eq!(v.minor, 21);
    }

    #[test]
    fn version_info_rejects_garbage() {
        assert!(matches!(
            VersionInfo::from_client_json("not json"),
            Err(BakeError::VersionParse { .. })
        ));
        assert!(matches!(
            VersionInfo::from_client_json(r#"{"clientVersion":{"major":"x","minor":"y"}}"#),
            Err(BakeError::VersionParse { .. })
        ));
    }
}
