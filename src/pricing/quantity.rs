//! Quantity derivation - measurements to purchasable units
//!
//! Every rule clamps its inputs to finite, non-negative values first and
//! always rounds up: partial packages cannot be bought.

use crate::pricing::measurements::{coerce, MeasurementSet};
use crate::pricing::options::{Fastener, OptionSelections, RuleSet};
use crate::pricing::price_book::{PriceBook, PANEL_SQFT_PER_LF, PIECE_LENGTH_LF};

/// Ceiling on any purchasable unit count
pub const MAX_UNITS: f64 = 1.0e15;

/// Whole units needed to cover `amount` at `per_unit` each.
///
/// Zero when either side is non-positive or not finite; never above `MAX_UNITS`.
pub fn ceil_units(amount: f64, per_unit: f64) -> f64 {
    let amount = coerce(amount);
    let per_unit = coerce(per_unit);
    if amount == 0.0 || per_unit == 0.0 {
        return 0.0;
    }
    (amount / per_unit).ceil().min(MAX_UNITS)
}

/// Trim pieces for a run, plus one spare piece for cutting loss
pub fn pieces_with_spare(length_lf: f64) -> f64 {
    let pieces = pieces_no_spare(length_lf);
    if pieces > 0.0 {
        pieces + 1.0
    } else {
        0.0
    }
}

/// Pieces of raw stock for a run, with no waste allowance
pub fn pieces_no_spare(length_lf: f64) -> f64 {
    ceil_units(length_lf, PIECE_LENGTH_LF)
}

/// Unrounded linear feet of panel for the roof, waste included
pub fn panel_length(measurements: &MeasurementSet) -> f64 {
    measurements.effective_area() / PANEL_SQFT_PER_LF
}

/// Purchasable quantities for one estimate.
///
/// None of these depend on the gauge: gauges differ in price only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quantities {
    /// Linear feet of panel, fractional
    pub panel_lf: f64,
    pub hip: f64,
    pub ridge: f64,
    pub gable: f64,
    pub drip_edge: f64,
    pub valley: f64,
    pub sidewall: f64,
    pub endwall: f64,
    pub transition: f64,
    /// Underlayment rolls
    pub underlayment: f64,
    /// Clip boxes
    pub clips: f64,
    /// Screw bags
    pub screws: f64,
    pub z_metal: f64,
    pub perforated_z_metal: f64,
    /// Staple boxes
    pub staples: f64,
    /// Cap nail pails
    pub cap_nails: f64,
}

impl Quantities {
    /// Apply every quantity rule to a measurement set
    pub fn derive(
        measurements: &MeasurementSet,
        options: &OptionSelections,
        book: &PriceBook,
        rules: &RuleSet,
    ) -> Self {
        let m = measurements.sanitized();
        let panel_lf = panel_length(&m);

        let underlayment = match book.underlayment(options.underlayment) {
            Some(entry) => underlayment_rolls(m.area, entry.coverage_sqft),
            None => 0.0,
        };

        let clips = if options.seam_style.uses_clips() {
            clip_boxes(panel_lf, book.clips.lf_per_piece, book.clips.pieces_per_package)
        } else {
            0.0
        };

        let screws = ceil_units(
            panel_lf,
            (coerce(book.screws.pieces_per_package) * coerce(book.screws.lf_per_piece))
                .min(f64::MAX),
        );

        let mut z_metal = pieces_no_spare(2.0 * m.hips);
        if rules.z_metal_wall_addend {
            z_metal += pieces_no_spare(m.sidewalls)
                + pieces_no_spare(m.endwalls)
                + pieces_no_spare(m.transitions);
        }

        let bought = match options.fastener {
            Fastener::None if rules.staples_without_fastener => Fastener::Staples,
            selected => selected,
        };
        let fastener_units = book
            .fastener(bought)
            .map(|entry| ceil_units(m.area, entry.sqft_per_unit))
            .unwrap_or(0.0);
        let (staples, cap_nails) = match bought {
            Fastener::Staples => (fastener_units, 0.0),
            Fastener::CapNails => (0.0, fastener_units),
            Fastener::None => (0.0, 0.0),
        };

        Self {
            panel_lf,
            hip: pieces_with_spare(m.hips),
            ridge: pieces_with_spare(m.ridges),
            gable: pieces_with_spare(m.gables),
            drip_edge: pieces_with_spare(m.eaves),
            valley: pieces_with_spare(m.valleys),
            sidewall: pieces_with_spare(m.sidewalls),
            endwall: pieces_with_spare(m.endwalls),
            transition: pieces_with_spare(m.transitions),
            underlayment,
            clips,
            screws,
            z_metal,
            perforated_z_metal: pieces_no_spare(2.0 * m.ridges),
            staples,
            cap_nails,
        }
    }
}

/// Rolls to cover the raw area, plus one spare roll
fn underlayment_rolls(area: f64, coverage_sqft: f64) -> f64 {
    let rolls = ceil_units(area, coverage_sqft);
    if rolls > 0.0 {
        rolls + 1.0
    } else {
        0.0
    }
}

fn clip_boxes(panel_lf: f64, lf_per_clip: f64, clips_per_box: f64) -> f64 {
    let lf_per_clip = coerce(lf_per_clip);
    if lf_per_clip == 0.0 {
        return 0.0;
    }
    ceil_units((panel_lf / lf_per_clip).min(MAX_UNITS), clips_per_box)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::options::{SeamStyle, Underlayment};

    fn derive(m: &MeasurementSet, o: &OptionSelections) -> Quantities {
        Quantities::derive(m, o, &PriceBook::builtin(), &RuleSet::default())
    }

    #[test]
    fn test_pieces_with_spare() {
        assert_eq!(pieces_with_spare(0.0), 0.0);
        assert_eq!(pieces_with_spare(0.1), 2.0);
        assert_eq!(pieces_with_spare(9.9), 2.0);
        assert_eq!(pieces_with_spare(10.0), 2.0);
        assert_eq!(pieces_with_spare(20.0), 3.0);
        assert_eq!(pieces_with_spare(-5.0), 0.0);
        assert_eq!(pieces_with_spare(f64::NAN), 0.0);
    }

    #[test]
    fn test_pieces_no_spare() {
        assert_eq!(pieces_no_spare(0.0), 0.0);
        assert_eq!(pieces_no_spare(19.0), 2.0);
        assert_eq!(pieces_no_spare(30.0), 3.0);
        assert_eq!(pieces_no_spare(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_ceil_units_guards_divisor() {
        assert_eq!(ceil_units(100.0, 0.0), 0.0);
        assert_eq!(ceil_units(100.0, -3.0), 0.0);
        assert_eq!(ceil_units(100.0, 30.0), 4.0);
    }

    #[test]
    fn test_panel_length_conversion() {
        let m = MeasurementSet::with_area(100.0);
        assert!((panel_length(&m) - 75.0075).abs() < 1e-4);
    }

    #[test]
    fn test_panel_length_includes_waste() {
        let m = MeasurementSet {
            area: 100.0,
            waste_pct: 10.0,
            ..Default::default()
        };
        assert!((panel_length(&m) - 110.0 / PANEL_SQFT_PER_LF).abs() < 1e-9);
    }

    #[test]
    fn test_underlayment_has_spare_roll() {
        let q = derive(&MeasurementSet::with_area(1000.0), &OptionSelections::default());
        assert_eq!(q.underlayment, 7.0);

        let q = derive(&MeasurementSet::with_area(185.0), &OptionSelections::default());
        assert_eq!(q.underlayment, 2.0);
    }

    #[test]
    fn test_no_underlayment_selected() {
        let opts = OptionSelections {
            underlayment: Underlayment::None,
            ..Default::default()
        };
        let q = derive(&MeasurementSet::with_area(1000.0), &opts);
        assert_eq!(q.underlayment, 0.0);
    }

    #[test]
    fn test_clips_and_screws_follow_panel_length() {
        // 3000 sqft -> ~2250 lf -> 1125 clips -> 2 boxes; 2250 screws -> 10 bags
        let q = derive(&MeasurementSet::with_area(3000.0), &OptionSelections::default());
        assert_eq!(q.clips, 2.0);
        assert_eq!(q.screws, 10.0);
    }

    #[test]
    fn test_nail_strip_needs_no_clips() {
        let opts = OptionSelections {
            seam_style: SeamStyle::NailStrip,
            ..Default::default()
        };
        let q = derive(&MeasurementSet::with_area(3000.0), &opts);
        assert_eq!(q.clips, 0.0);
        assert_eq!(q.screws, 10.0);
    }

    #[test]
    fn test_z_metal_doubles_hips_and_ridges() {
        let m = MeasurementSet {
            hips: 20.0,
            ridges: 15.0,
            sidewalls: 12.0,
            ..Default::default()
        };
        let q = derive(&m, &OptionSelections::default());
        assert_eq!(q.z_metal, 4.0);
        assert_eq!(q.perforated_z_metal, 3.0);
    }

    #[test]
    fn test_z_metal_wall_addend_flag() {
        let m = MeasurementSet {
            hips: 20.0,
            sidewalls: 12.0,
            endwalls: 5.0,
            transitions: 30.0,
            ..Default::default()
        };
        let rules = RuleSet {
            z_metal_wall_addend: true,
            ..Default::default()
        };
        let q = Quantities::derive(&m, &OptionSelections::default(), &PriceBook::builtin(), &rules);
        // 4 (hips) + 2 (sidewall) + 1 (endwall) + 3 (transition)
        assert_eq!(q.z_metal, 10.0);
    }

    #[test]
    fn test_fasteners_are_mutually_exclusive() {
        let m = MeasurementSet::with_area(2000.0);

        let staples = derive(&m, &OptionSelections::default());
        assert_eq!(staples.staples, 2.0);
        assert_eq!(staples.cap_nails, 0.0);

        let nails = derive(
            &m,
            &OptionSelections {
                fastener: Fastener::CapNails,
                ..Default::default()
            },
        );
        assert_eq!(nails.staples, 0.0);
        assert_eq!(nails.cap_nails, 2.0);
    }

    #[test]
    fn test_staples_without_fastener_flag() {
        let m = MeasurementSet::with_area(2000.0);
        let opts = OptionSelections {
            fastener: Fastener::None,
            ..Default::default()
        };
        assert_eq!(derive(&m, &opts).staples, 0.0);

        let rules = RuleSet {
            staples_without_fastener: true,
            ..Default::default()
        };
        let q = Quantities::derive(&m, &opts, &PriceBook::builtin(), &rules);
        assert_eq!(q.staples, 2.0);
        assert_eq!(q.cap_nails, 0.0);
    }

    #[test]
    fn test_waste_only_affects_panel_quantities() {
        let base = MeasurementSet::with_area(1000.0);
        let wasted = MeasurementSet {
            waste_pct: 15.0,
            ..base
        };
        let a = derive(&base, &OptionSelections::default());
        let b = derive(&wasted, &OptionSelections::default());
        assert!(b.panel_lf > a.panel_lf);
        assert_eq!(a.underlayment, b.underlayment);
        assert_eq!(a.staples, b.staples);
    }

    #[test]
    fn test_ceil_units_is_capped() {
        assert_eq!(ceil_units(1e300, 1e-300), MAX_UNITS);
        assert_eq!(ceil_units(f64::MAX, 0.5), MAX_UNITS);
    }

    #[test]
    fn test_huge_measurements_stay_finite() {
        let m = MeasurementSet {
            area: 1e308,
            waste_pct: 50.0,
            hips: 1e308,
            ridges: 1e308,
            ..Default::default()
        };
        let q = derive(&m, &OptionSelections::default());
        assert!(q.panel_lf.is_finite() && q.panel_lf > 0.0);
        assert!(q.z_metal > 0.0 && q.z_metal.is_finite());
        assert!(q.perforated_z_metal > 0.0);
        assert!(q.clips > 0.0 && q.screws > 0.0);
    }

    #[test]
    fn test_tiny_packaging_does_not_overflow() {
        let mut book = PriceBook::builtin();
        book.clips.lf_per_piece = 1e-300;
        book.screws.pieces_per_package = 1e300;
        book.screws.lf_per_piece = 1e300;
        let q = Quantities::derive(
            &MeasurementSet::with_area(3000.0),
            &OptionSelections::default(),
            &book,
            &RuleSet::default(),
        );
        assert!(q.clips.is_finite() && q.clips > 0.0);
        assert_eq!(q.screws, 1.0);
    }

    #[test]
    fn test_empty_measurements_yield_zero() {
        let q = derive(&MeasurementSet::default(), &OptionSelections::default());
        assert_eq!(q, Quantities::default());
    }
}
