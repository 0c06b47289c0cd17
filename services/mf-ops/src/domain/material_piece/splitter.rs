//! 原材料拆件计算

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::domain::geometry::{MaterialSpec, round_half_up};
use crate::domain::inventory::StockDelta;
use crate::error::OpsError;

/// 数量为正整数时返回件数
pub fn whole_piece_count(quantity: Decimal) -> Option<u32> {
    if quantity > Decimal::ZERO && quantity.fract().is_zero() {
        quantity.to_u32()
    } else {
        None
    }
}

/// 单件尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceDimensions {
    pub length_mm: Decimal,
    pub weight_kg: Decimal,
}

/// 把一批原材料（件数 + 总重 / 单件长度）拆成单件尺寸
///
/// - 给了总重：单件重 = 总重 / 件数，最后一件吸收舍入差，保证合计等于总重；
///   单件长度取给定值，否则按截面几何由重量反推
/// - 只给单件长度：按几何由长度推算单件重量
pub struct PieceSplitter {
    length_scale: u32,
    weight_scale: u32,
}

impl PieceSplitter {
    pub fn new(length_scale: u32, weight_scale: u32) -> Self {
        Self {
            length_scale,
            weight_scale,
        }
    }

    pub fn split(
        &self,
        spec: &MaterialSpec,
        count: u32,
        total_weight_kg: Option<Decimal>,
        length_per_piece_mm: Option<Decimal>,
    ) -> Result<Vec<PieceDimensions>, OpsError> {
        if count == 0 {
            return Err(OpsError::GeometryUnavailable(
                "piece count must be greater than zero".to_string(),
            ));
        }

        let total_weight_kg = total_weight_kg.filter(|w| *w > Decimal::ZERO);
        let length_per_piece_mm = length_per_piece_mm.filter(|l| *l > Decimal::ZERO);

        match (total_weight_kg, length_per_piece_mm) {
            (Some(total), length) => self.split_by_weight(spec, count, total, length),
            (None, Some(length)) => {
                let length = round_half_up(length, self.length_scale);
                let weight = round_half_up(spec.weight_for_length(length), self.weight_scale);
                Ok(vec![
                    PieceDimensions {
                        length_mm: length,
                        weight_kg: weight,
                    };
                    count as usize
                ])
            }
            (None, None) => Err(OpsError::GeometryUnavailable(
                "total weight or length per piece is required for raw material".to_string(),
            )),
        }
    }

    fn split_by_weight(
        &self,
        spec: &MaterialSpec,
        count: u32,
        total: Decimal,
        length: Option<Decimal>,
    ) -> Result<Vec<PieceDimensions>, OpsError> {
        let total = round_half_up(total, self.weight_scale);
        let per_piece = round_half_up(total / Decimal::from(count), self.weight_scale);
        let last = total - per_piece * Decimal::from(count - 1);
        if last <= Decimal::ZERO {
            return Err(OpsError::GeometryUnavailable(format!(
                "total weight {} is too small to split into {} pieces",
                total, count
            )));
        }

        (0..count)
            .map(|index| {
                let weight_kg = if index + 1 == count { last } else { per_piece };
                let length_mm = match length {
                    Some(l) => round_half_up(l, self.length_scale),
                    None => round_half_up(spec.length_for_weight(weight_kg)?, self.length_scale),
                };
                Ok(PieceDimensions {
                    length_mm,
                    weight_kg,
                })
            })
            .collect()
    }

    /// 一批件的合计（入库变动）
    pub fn totals(pieces: &[PieceDimensions]) -> StockDelta {
        pieces.iter().fold(StockDelta::default(), |acc, p| {
            StockDelta::new(
                acc.quantity + Decimal::ONE,
                acc.weight_kg + p.weight_kg,
                acc.length_mm + p.length_mm,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::CrossSection;
    use rust_decimal_macros::dec;

    fn square_50() -> MaterialSpec {
        MaterialSpec::new(CrossSection::Square { side: dec!(50) }, "EN8", dec!(7.85))
    }

    fn splitter() -> PieceSplitter {
        PieceSplitter::new(2, 3)
    }

    #[test]
    fn test_whole_piece_count() {
        assert_eq!(whole_piece_count(dec!(4)), Some(4));
        assert_eq!(whole_piece_count(dec!(4.00)), Some(4));
        assert_eq!(whole_piece_count(dec!(2.5)), None);
        assert_eq!(whole_piece_count(Decimal::ZERO), None);
    }

    #[test]
    fn test_split_by_weight_derives_length() {
        let pieces = splitter()
            .split(&square_50(), 4, Some(dec!(78.5)), None)
            .unwrap();

        assert_eq!(pieces.len(), 4);
        assert!(pieces.iter().all(|p| p.weight_kg == dec!(19.625)));
        assert!(pieces.iter().all(|p| p.length_mm == dec!(1000)));
    }

    #[test]
    fn test_last_piece_absorbs_remainder() {
        let pieces = splitter()
            .split(&square_50(), 4, Some(dec!(25.25)), Some(dec!(320)))
            .unwrap();

        assert_eq!(pieces[0].weight_kg, dec!(6.313));
        assert_eq!(pieces[3].weight_kg, dec!(6.311));
        let totals = PieceSplitter::totals(&pieces);
        assert_eq!(totals.weight_kg, dec!(25.25));
        assert_eq!(totals.length_mm, dec!(1280));
        assert_eq!(totals.quantity, dec!(4));
    }

    #[test]
    fn test_split_by_length_derives_weight() {
        let pieces = splitter()
            .split(&square_50(), 3, None, Some(dec!(500)))
            .unwrap();

        assert!(pieces.iter().all(|p| p.weight_kg == dec!(9.813)));
        assert_eq!(PieceSplitter::totals(&pieces).weight_kg, dec!(29.439));
    }

    #[test]
    fn test_missing_dimensions_rejected() {
        let result = splitter().split(&square_50(), 2, None, Some(Decimal::ZERO));
        assert!(matches!(result, Err(OpsError::GeometryUnavailable(_))));
        assert!(splitter().split(&square_50(), 0, Some(dec!(10)), None).is_err());
    }
}
