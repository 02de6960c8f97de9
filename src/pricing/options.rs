//! Option selections - gauges, material variants, and rule flags

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Sheet-metal gauge. Every estimate is priced for both gauges side by side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum Gauge {
    /// 24 gauge (heavy)
    #[serde(rename = "24")]
    #[value(name = "24")]
    G24,
    /// 26 gauge (light)
    #[serde(rename = "26")]
    #[value(name = "26")]
    G26,
}

impl Gauge {
    /// Both gauges, heavy first
    pub const ALL: [Gauge; 2] = [Gauge::G24, Gauge::G26];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gauge::G24 => "24",
            Gauge::G26 => "26",
        }
    }

    /// Column heading, e.g. "24 Gauge"
    pub fn title(&self) -> String {
        format!("{} Gauge", self.as_str())
    }
}

impl std::fmt::Display for Gauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gauge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().trim_end_matches("ga").trim() {
            "24" | "heavy" => Ok(Gauge::G24),
            "26" | "light" => Ok(Gauge::G26),
            _ => Err(format!("Invalid gauge: {}. Use 24 or 26", s)),
        }
    }
}

/// Ice & water underlayment variant
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Underlayment {
    /// High Temp Ice & Water
    #[default]
    Standard,
    /// Butyl based High Temp Ice & Water
    Butyl,
    /// No underlayment purchased
    None,
}

impl std::fmt::Display for Underlayment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Underlayment::Standard => write!(f, "standard"),
            Underlayment::Butyl => write!(f, "butyl"),
            Underlayment::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for Underlayment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "standard" | "high-temp" => Ok(Underlayment::Standard),
            "butyl" => Ok(Underlayment::Butyl),
            "none" | "" => Ok(Underlayment::None),
            _ => Err(format!(
                "Invalid underlayment: {}. Use standard, butyl, or none",
                s
            )),
        }
    }
}

/// Underlayment fastener variant. Staples and cap nails are mutually exclusive.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Fastener {
    /// Crossfire staples, sold by the box
    #[default]
    Staples,
    /// Plastic cap nails, sold by the pail
    CapNails,
    /// No fastener purchased
    None,
}

impl std::fmt::Display for Fastener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fastener::Staples => write!(f, "staples"),
            Fastener::CapNails => write!(f, "cap-nails"),
            Fastener::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for Fastener {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "staples" | "crossfire-staples" => Ok(Fastener::Staples),
            "cap-nails" | "plastic-cap-nails" => Ok(Fastener::CapNails),
            "none" | "" => Ok(Fastener::None),
            _ => Err(format!(
                "Invalid fastener: {}. Use staples, cap-nails, or none",
                s
            )),
        }
    }
}

/// Standing-seam panel profile
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SeamStyle {
    #[default]
    SnapLock,
    MechanicalLock,
    /// Fastened through the nail flange; takes no panel clips
    NailStrip,
}

impl SeamStyle {
    /// Whether panels of this profile are held down with clips
    pub fn uses_clips(&self) -> bool {
        match self {
            SeamStyle::SnapLock | SeamStyle::MechanicalLock => true,
            SeamStyle::NailStrip => false,
        }
    }
}

impl std::fmt::Display for SeamStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeamStyle::SnapLock => write!(f, "snap-lock"),
            SeamStyle::MechanicalLock => write!(f, "mechanical-lock"),
            SeamStyle::NailStrip => write!(f, "nail-strip"),
        }
    }
}

impl std::str::FromStr for SeamStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "snap-lock" | "snaplock" => Ok(SeamStyle::SnapLock),
            "mechanical-lock" | "mechanical" => Ok(SeamStyle::MechanicalLock),
            "nail-strip" | "nail-flange" => Ok(SeamStyle::NailStrip),
            _ => Err(format!(
                "Invalid seam style: {}. Use snap-lock, mechanical-lock, or nail-strip",
                s
            )),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['_', ' '], "-")
}

/// User-selected options for one estimate
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSelections {
    pub underlayment: Underlayment,
    pub fastener: Fastener,
    pub seam_style: SeamStyle,
    /// Margin applied to the material subtotal before tax
    pub markup_pct: f64,
}

impl OptionSelections {
    /// Markup percentage with invalid or negative input coerced to 0
    pub fn effective_markup_pct(&self) -> f64 {
        super::measurements::coerce(self.markup_pct).min(super::measurements::MAX_PERCENT)
    }
}

/// Capability flags for quantity rules that differ between calculator revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Add sidewall, endwall and transition runs to the Z-metal count
    pub z_metal_wall_addend: bool,

    /// Buy the staple pack even when no fastener is selected
    pub staples_without_fastener: bool,
}
