//! Token categories and layers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::token::{TokenPath, TokenType};

/// Top-level token category; one source file and one remote collection each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    Colors,
    Typography,
    Spacing,
    Elevation,
    Motion,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 5] = [
        TokenCategory::Colors,
        TokenCategory::Typography,
        TokenCategory::Spacing,
        TokenCategory::Elevation,
        TokenCategory::Motion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Colors => "colors",
            TokenCategory::Typography => "typography",
            TokenCategory::Spacing => "spacing",
            TokenCategory::Elevation => "elevation",
            TokenCategory::Motion => "motion",
        }
    }

    /// Capitalized name used in generated constant names (`primitiveColors`)
    pub fn title(&self) -> &'static str {
        match self {
            TokenCategory::Colors => "Colors",
            TokenCategory::Typography => "Typography",
            TokenCategory::Spacing => "Spacing",
            TokenCategory::Elevation => "Elevation",
            TokenCategory::Motion => "Motion",
        }
    }

    /// Source file name under the tokens directory
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }

    /// First segment of remote variable names. Colors carry no prefix.
    pub fn remote_prefix(&self) -> Option<&'static str> {
        match self {
            TokenCategory::Colors => None,
            other => Some(other.as_str()),
        }
    }

    /// Prefix of CSS custom properties in generated code syntax
    pub fn css_prefix(&self) -> &'static str {
        match self {
            TokenCategory::Colors => "color",
            TokenCategory::Typography => "font",
            TokenCategory::Spacing => "space",
            TokenCategory::Elevation => "elevation",
            TokenCategory::Motion => "motion",
        }
    }

    /// Category owning a remote name prefix (`spacing`, `typography`, ...)
    pub fn from_remote_prefix(prefix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.remote_prefix() == Some(prefix))
    }

    /// Local group names renamed in remote variable names
    fn group_aliases(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            TokenCategory::Typography => &[("fontSize", "size"), ("fontWeight", "weight")],
            _ => &[],
        }
    }

    /// Map the first path segment to its remote name
    pub fn to_remote_path(&self, path: &TokenPath) -> TokenPath {
        self.rename_first(path, |local, remote, seg| (seg == local).then_some(remote))
    }

    /// Map the first remote path segment back to the local group name
    pub fn to_local_path(&self, path: &TokenPath) -> TokenPath {
        self.rename_first(path, |local, remote, seg| (seg == remote).then_some(local))
    }

    fn rename_first(
        &self,
        path: &TokenPath,
        rename: impl Fn(&'static str, &'static str, &str) -> Option<&'static str>,
    ) -> TokenPath {
        let Some(first) = path.first() else {
            return path.clone();
        };
        let renamed = self
            .group_aliases()
            .iter()
            .find_map(|(local, remote)| rename(local, remote, first));
        match renamed {
            Some(name) => {
                let mut segments = vec![name.to_string()];
                segments.extend(path.tail().segments().iter().cloned());
                TokenPath::new(segments)
            }
            None => path.clone(),
        }
    }

    /// Token type for a leaf at `path` within this category
    pub fn token_type_for(&self, path: &TokenPath) -> TokenType {
        let group = path.first().unwrap_or_default();
        match self {
            TokenCategory::Colors => TokenType::Color,
            TokenCategory::Spacing => match group {
                "maxWidth" | "container" | "sidebar" | "avatar" | "icon" => TokenType::Sizing,
                _ => TokenType::Spacing,
            },
            TokenCategory::Typography => match group {
                "fontFamily" => TokenType::FontFamilies,
                "fontSize" => TokenType::FontSizes,
                "fontWeight" => TokenType::FontWeights,
                "lineHeight" => TokenType::LineHeights,
                "letterSpacing" => TokenType::LetterSpacing,
                _ => TokenType::Other("typography".to_string()),
            },
            TokenCategory::Elevation => match group {
                "radius" | "borderRadius" => TokenType::BorderRadius,
                "shadow" | "glowShadow" => TokenType::BoxShadow,
                "opacity" => TokenType::Opacity,
                _ => TokenType::Other("other".to_string()),
            },
            TokenCategory::Motion => match group {
                "duration" => TokenType::Duration,
                "easing" => TokenType::CubicBezier,
                _ => TokenType::Other("other".to_string()),
            },
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown token category: {}", s))
    }
}

/// Token layer: primitives, semantic aliases, component-scoped tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenLayer {
    Primitive,
    Semantic,
    Component,
}

impl TokenLayer {
    pub const ALL: [TokenLayer; 3] = [
        TokenLayer::Primitive,
        TokenLayer::Semantic,
        TokenLayer::Component,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenLayer::Primitive => "primitive",
            TokenLayer::Semantic => "semantic",
            TokenLayer::Component => "component",
        }
    }

    /// Remote variable name prefix; primitives carry none
    pub fn remote_prefix(&self) -> Option<&'static str> {
        match self {
            TokenLayer::Primitive => None,
            other => Some(other.as_str()),
        }
    }

    /// Directory of the leaf-format files for this layer
    pub fn studio_dir(&self) -> &'static str {
        match self {
            TokenLayer::Primitive => "core",
            TokenLayer::Semantic => "semantic",
            TokenLayer::Component => "component",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == name)
    }
}

impl fmt::Display for TokenLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
