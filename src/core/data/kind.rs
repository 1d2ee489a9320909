use std::{fmt, str::FromStr};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Semantic category of a candidate string.
///
/// The kind is part of the Key Map signature and the middle segment of
/// synthesized keys (`<namespace>.<kind>.<slug>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Title,
    Label,
    Message,
    Toast,
    Text,
    Placeholder,
    Description,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Title => "title",
            Kind::Label => "label",
            Kind::Message => "message",
            Kind::Toast => "toast",
            Kind::Text => "text",
            Kind::Placeholder => "placeholder",
            Kind::Description => "description",
        }
    }

    /// Kind implied by an enclosing markup tag. Unknown tags are plain text.
    pub fn from_tag(tag: &str) -> Kind {
        match tag.to_ascii_lowercase().as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "title" | "caption" => Kind::Title,
            "label" | "legend" | "th" | "option" => Kind::Label,
            "small" | "figcaption" => Kind::Description,
            _ => Kind::Text,
        }
    }

    /// Kind implied by an attribute name.
    pub fn from_attribute(name: &str) -> Kind {
        match name.to_ascii_lowercase().as_str() {
            "placeholder" | "aria-placeholder" => Kind::Placeholder,
            "title" => Kind::Title,
            "label" | "aria-label" | "alt" | "aria-roledescription" => Kind::Label,
            "aria-description" | "description" | "aria-valuetext" => Kind::Description,
            other => Kind::from_identifier(other),
        }
    }

    /// Kind implied by a variable, property, or array key name.
    ///
    /// Matches are substring-based on the lowercased name and checked in
    /// table order, so `toastErrorMessage` is a toast and `errorMessage` a
    /// message.
    pub fn from_identifier(name: &str) -> Kind {
        let lower = name.to_ascii_lowercase();
        IDENTIFIER_KINDS
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
            .map(|(_, kind)| *kind)
            .unwrap_or(Kind::Text)
    }
}

const IDENTIFIER_KINDS: &[(&[&str], Kind)] = &[
    (&["toast", "notification", "notify", "snackbar"], Kind::Toast),
    (&["placeholder"], Kind::Placeholder),
    (&["label"], Kind::Label),
    (&["title", "heading", "header", "caption"], Kind::Title),
    (
        &[
            "message", "msg", "error", "warning", "success", "notice", "alert", "confirm",
            "prompt",
        ],
        Kind::Message,
    ),
    (
        &["description", "desc", "subtitle", "hint", "help", "tooltip", "summary"],
        Kind::Description,
    ),
];

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "title" => Kind::Title,
            "label" => Kind::Label,
            "message" => Kind::Message,
            "toast" => Kind::Toast,
            "text" => Kind::Text,
            "placeholder" => Kind::Placeholder,
            "description" => Kind::Description,
            other => bail!("Unknown kind: \"{}\"", other),
        })
    }
}
