//! Price book - unit prices and packaging ratios for every material category
//!
//! The built-in table is the shop's current list pricing. A YAML file with the
//! same shape can replace it; categories missing from the file are priced at
//! zero rather than rejected, so a partial book still produces an estimate.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::pricing::options::{Fastener, Gauge, Underlayment};
use crate::yaml::{parse_yaml, parse_yaml_file, YamlError};

/// Length of one stick of trim or Z-metal stock, in linear feet
pub const PIECE_LENGTH_LF: f64 = 10.0;

/// Square feet covered by one linear foot of panel
pub const PANEL_SQFT_PER_LF: f64 = 1.3333;

/// Sales tax, levied on the marked-up amount. Not user-editable.
pub const TAX_PCT: f64 = 7.25;

/// Per-piece trim prices for one gauge
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimPrices {
    pub hip: f64,
    pub ridge: f64,
    pub gable: f64,
    pub drip_edge: f64,
    pub valley: f64,
    pub sidewall: f64,
    pub endwall: f64,
    pub transition: f64,
}

/// Everything that varies by gauge
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugePrices {
    /// Price per linear foot of panel
    pub panel_lf: f64,
    pub trim: TrimPrices,
    /// Price per 10' piece
    pub z_metal: f64,
    /// Price per 10' piece
    pub perforated_z_metal: f64,
}

/// Membrane sold in rolls rated for a coverage area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollEntry {
    pub label: String,
    #[serde(default)]
    pub price: f64,
    pub coverage_sqft: f64,
}

/// Hardware sold in packages, consumed per linear foot of panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagedEntry {
    #[serde(default)]
    pub price: f64,
    pub pieces_per_package: f64,
    /// Linear feet of panel served by one piece
    pub lf_per_piece: f64,
}

/// Consumable sold in units rated for a coverage area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageEntry {
    pub label: String,
    #[serde(default)]
    pub price: f64,
    pub sqft_per_unit: f64,
}

/// Complete, immutable price table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBook {
    #[serde(default)]
    pub gauge_24: GaugePrices,
    #[serde(default)]
    pub gauge_26: GaugePrices,
    #[serde(default = "unpriced::underlayment_standard")]
    pub underlayment_standard: RollEntry,
    #[serde(default = "unpriced::underlayment_butyl")]
    pub underlayment_butyl: RollEntry,
    #[serde(default = "unpriced::clips")]
    pub clips: PackagedEntry,
    #[serde(default = "unpriced::screws")]
    pub screws: PackagedEntry,
    #[serde(default = "unpriced::staples")]
    pub staples: CoverageEntry,
    #[serde(default = "unpriced::cap_nails")]
    pub cap_nails: CoverageEntry,
}

impl PriceBook {
    /// The built-in list prices
    pub fn builtin() -> Self {
        Self {
            gauge_24: GaugePrices {
                panel_lf: 3.5,
                trim: TrimPrices {
                    hip: 39.08,
                    ridge: 39.08,
                    gable: 28.76,
                    drip_edge: 25.87,
                    valley: 69.01,
                    sidewall: 31.63,
                    endwall: 37.38,
                    transition: 43.14,
                },
                z_metal: 9.96,
                perforated_z_metal: 27.41,
            },
            gauge_26: GaugePrices {
                panel_lf: 2.5,
                trim: TrimPrices {
                    hip: 24.02,
                    ridge: 24.02,
                    gable: 23.98,
                    drip_edge: 21.68,
                    valley: 66.26,
                    sidewall: 23.85,
                    endwall: 29.63,
                    transition: 29.63,
                },
                z_metal: 9.74,
                perforated_z_metal: 26.43,
            },
            underlayment_standard: RollEntry {
                price: 64.29,
                ..unpriced::underlayment_standard()
            },
            underlayment_butyl: RollEntry {
                price: 129.60,
                ..unpriced::underlayment_butyl()
            },
            clips: PackagedEntry {
                price: 246.17,
                ..unpriced::clips()
            },
            screws: PackagedEntry {
                price: 18.91,
                ..unpriced::screws()
            },
            staples: CoverageEntry {
                price: 48.79,
                ..unpriced::staples()
            },
            cap_nails: CoverageEntry {
                price: 39.95,
                ..unpriced::cap_nails()
            },
        }
    }

    /// Parse a price book from YAML content
    pub fn from_yaml(content: &str, filename: &str) -> Result<Self, YamlError> {
        parse_yaml(content, filename)
    }

    /// Load a price book from a YAML file
    pub fn load(path: &Path) -> Result<Self, YamlError> {
        let book: Self = parse_yaml_file(path)?;
        tracing::debug!(path = %path.display(), "loaded price book");
        Ok(book)
    }

    /// Serialize to YAML (the format accepted by [`PriceBook::load`])
    pub fn to_yaml(&self) -> Result<String, serde_yml::Error> {
        serde_yml::to_string(self)
    }

    pub fn gauge(&self, gauge: Gauge) -> &GaugePrices {
        match gauge {
            Gauge::G24 => &self.gauge_24,
            Gauge::G26 => &self.gauge_26,
        }
    }

    /// Roll entry for an underlayment selection; `None` when nothing is bought
    pub fn underlayment(&self, variant: Underlayment) -> Option<&RollEntry> {
        match variant {
            Underlayment::Standard => Some(&self.underlayment_standard),
            Underlayment::Butyl => Some(&self.underlayment_butyl),
            Underlayment::None => None,
        }
    }

    /// Coverage entry for a fastener selection; `None` when nothing is bought
    pub fn fastener(&self, variant: Fastener) -> Option<&CoverageEntry> {
        match variant {
            Fastener::Staples => Some(&self.staples),
            Fastener::CapNails => Some(&self.cap_nails),
            Fastener::None => None,
        }
    }
}

impl Default for PriceBook {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Built-in packaging for entries absent from a price book file, at zero price
mod unpriced {
    use super::{CoverageEntry, PackagedEntry, RollEntry};

    pub fn underlayment_standard() -> RollEntry {
        RollEntry {
            label: "High Temp Ice & Water".to_string(),
            price: 0.0,
            coverage_sqft: 185.0,
        }
    }

    pub fn underlayment_butyl() -> RollEntry {
        RollEntry {
            label: "Butyl based High Temp Ice & Water".to_string(),
            price: 0.0,
            coverage_sqft: 185.0,
        }
    }

    pub fn clips() -> PackagedEntry {
        PackagedEntry {
            price: 0.0,
            pieces_per_package: 1000.0,
            lf_per_piece: 2.0,
        }
    }

    pub fn screws() -> PackagedEntry {
        PackagedEntry {
            price: 0.0,
            pieces_per_package: 250.0,
            lf_per_piece: 1.0,
        }
    }

    pub fn staples() -> CoverageEntry {
        CoverageEntry {
            label: "Staple Pack".to_string(),
            price: 0.0,
            sqft_per_unit: 1500.0,
        }
    }

    pub fn cap_nails() -> CoverageEntry {
        CoverageEntry {
            label: "Plastic Cap Nails".to_string(),
            price: 0.0,
            sqft_per_unit: 1500.0,
        }
    }
}
