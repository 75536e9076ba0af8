//! Physical constants — rack-unit conversions, tile sizing, ladder catalogue.
//!
//! Simple consts with no dependencies. Both the layout library and the
//! native simtest use these.

pub mod rack_units {
    /// Height of one rack unit in meters (1U = 44.45 mm).
    pub const HEIGHT_METERS: f32 = 0.04445;
    /// Height of one rack unit in inches (1U = 1.75 in).
    pub const HEIGHT_INCHES: f32 = 1.75;
    /// Nominal loaded weight of one rack unit in kilograms.
    pub const WEIGHT_KG: f32 = 4.5;
}

pub mod tiles {
    /// Default raised-floor tile edge length in meters.
    pub const DEFAULT_TILE_SIZE_M: f32 = 0.6;
}

pub mod ladders {
    /// Standard cable ladder widths in centimeters.
    pub const STANDARD_WIDTHS_CM: [f32; 4] = [30.0, 60.0, 90.0, 120.0];
    /// Default ladder width in centimeters.
    pub const DEFAULT_WIDTH_CM: f32 = 30.0;

    pub const MATERIAL_ALUMINUM: &str = "aluminum";
    pub const MATERIAL_STEEL: &str = "steel";

    /// Returns true if the width is one of the standard catalogue sizes.
    pub fn is_standard_width(width_cm: f32) -> bool {
        STANDARD_WIDTHS_CM
            .iter()
            .any(|w| (w - width_cm).abs() < f32::EPSILON)
    }

    /// Returns true if the material tag is one the catalogue stocks.
    pub fn is_stock_material(material: &str) -> bool {
        matches!(material, MATERIAL_ALUMINUM | MATERIAL_STEEL)
    }
}
