//! 原材料截面几何与长度/重量换算
//!
//! 尺寸单位为 mm，密度单位为 g/cm³，重量单位为 kg。
//! 1 g/cm³ = 10⁻⁶ kg/mm³，因此每毫米重量 = 截面积(mm²) × 密度 × 10⁻⁶。

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::OpsError;

const PI: Decimal = dec!(3.14159265358979323846);
/// √3 / 2，六角棒截面积系数
const HEX_FACTOR: Decimal = dec!(0.86602540378443864676);
const G_CM3_TO_KG_MM3: Decimal = dec!(0.000001);

/// 四舍五入到指定小数位（长度、重量、金额统一使用）
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// 原材料截面
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum CrossSection {
    /// 圆棒
    Round { diameter: Decimal },
    /// 方棒
    Square { side: Decimal },
    /// 扁钢 / 矩形棒 / 板
    Rectangular { width: Decimal, thickness: Decimal },
    /// 六角棒（对边距）
    Hexagonal { across_flats: Decimal },
    /// 管材
    Tube {
        outer_diameter: Decimal,
        wall_thickness: Decimal,
    },
}

impl CrossSection {
    pub fn validate(&self) -> Result<(), OpsError> {
        let dimensions: Vec<Decimal> = match self {
            Self::Round { diameter } => vec![*diameter],
            Self::Square { side } => vec![*side],
            Self::Rectangular { width, thickness } => vec![*width, *thickness],
            Self::Hexagonal { across_flats } => vec![*across_flats],
            Self::Tube {
                outer_diameter,
                wall_thickness,
            } => vec![*outer_diameter, *wall_thickness],
        };

        if dimensions.iter().any(|d| *d <= Decimal::ZERO) {
            return Err(OpsError::GeometryUnavailable(
                "all dimensions must be greater than zero".to_string(),
            ));
        }

        if let Self::Tube {
            outer_diameter,
            wall_thickness,
        } = self
            && *wall_thickness * Decimal::TWO >= *outer_diameter
        {
            return Err(OpsError::GeometryUnavailable(
                "tube wall thickness must be less than half the outer diameter".to_string(),
            ));
        }

        Ok(())
    }

    /// 截面积（mm²）
    pub fn area_mm2(&self) -> Decimal {
        match self {
            Self::Round { diameter } => PI * diameter * diameter / dec!(4),
            Self::Square { side } => side * side,
            Self::Rectangular { width, thickness } => width * thickness,
            Self::Hexagonal { across_flats } => HEX_FACTOR * across_flats * across_flats,
            Self::Tube {
                outer_diameter,
                wall_thickness,
            } => {
                let inner = outer_diameter - wall_thickness * Decimal::TWO;
                PI / dec!(4) * (outer_diameter * outer_diameter - inner * inner)
            }
        }
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Round { .. } => "round",
            Self::Square { .. } => "square",
            Self::Rectangular { .. } => "rectangular",
            Self::Hexagonal { .. } => "hexagonal",
            Self::Tube { .. } => "tube",
        }
    }
}

/// 原材料规格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub cross_section: CrossSection,
    /// 材质牌号（如 EN8、SS304）
    pub grade: String,
    pub density_g_cm3: Decimal,
}

impl MaterialSpec {
    pub fn new(
        cross_section: CrossSection,
        grade: impl Into<String>,
        density_g_cm3: Decimal,
    ) -> Self {
        Self {
            cross_section,
            grade: grade.into(),
            density_g_cm3,
        }
    }

    pub fn validate(&self) -> Result<(), OpsError> {
        self.cross_section.validate()?;
        if self.density_g_cm3 <= Decimal::ZERO {
            return Err(OpsError::GeometryUnavailable(
                "density must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// 每毫米重量（kg/mm）
    pub fn weight_per_mm(&self) -> Decimal {
        self.cross_section.area_mm2() * self.density_g_cm3 * G_CM3_TO_KG_MM3
    }

    /// 由重量推算长度（mm）
    pub fn length_for_weight(&self, weight_kg: Decimal) -> Result<Decimal, OpsError> {
        let per_mm = self.weight_per_mm();
        if per_mm <= Decimal::ZERO {
            return Err(OpsError::GeometryUnavailable(format!(
                "{} section of grade {} has no mass per length",
                self.cross_section.shape_name(),
                self.grade
            )));
        }
        Ok(weight_kg / per_mm)
    }

    /// 由长度推算重量（kg）
    pub fn weight_for_length(&self, length_mm: Decimal) -> Decimal {
        length_mm * self.weight_per_mm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(section: CrossSection) -> MaterialSpec {
        MaterialSpec::new(section, "EN8", dec!(7.85))
    }

    #[test]
    fn test_square_bar_length_from_weight() {
        let spec = spec(CrossSection::Square { side: dec!(50) });
        assert_eq!(spec.weight_per_mm(), dec!(0.019625));
        assert_eq!(spec.length_for_weight(dec!(19.625)).unwrap(), dec!(1000));
    }

    #[test]
    fn test_rectangular_weight_for_length() {
        let spec = spec(CrossSection::Rectangular {
            width: dec!(100),
            thickness: dec!(10),
        });
        assert_eq!(spec.weight_for_length(dec!(3000)), dec!(23.55));
    }

    #[test]
    fn test_round_bar_weight_per_metre() {
        let spec = spec(CrossSection::Round { diameter: dec!(32) });
        assert_eq!(spec.weight_for_length(dec!(1000)).round_dp(3), dec!(6.313));

        let length = spec.length_for_weight(dec!(6.313)).unwrap();
        assert_eq!(length.round_dp(0), dec!(1000));
    }

    #[test]
    fn test_hex_and_tube_areas() {
        let hex = CrossSection::Hexagonal {
            across_flats: dec!(20),
        };
        assert_eq!(hex.area_mm2().round_dp(2), dec!(346.41));

        let tube = CrossSection::Tube {
            outer_diameter: dec!(60),
            wall_thickness: dec!(5),
        };
        assert_eq!(tube.area_mm2().round_dp(2), dec!(863.94));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(dec!(6.3125), 3), dec!(6.313));
        assert_eq!(round_half_up(dec!(2.345), 2), dec!(2.35));
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let zero = CrossSection::Round {
            diameter: Decimal::ZERO,
        };
        assert!(zero.validate().is_err());

        let solid_tube = CrossSection::Tube {
            outer_diameter: dec!(20),
            wall_thickness: dec!(10),
        };
        assert!(solid_tube.validate().is_err());

        let no_density = MaterialSpec::new(
            CrossSection::Square { side: dec!(10) },
            "AL6061",
            Decimal::ZERO,
        );
        assert!(no_density.validate().is_err());
    }
}
