//! Issuer weight breakdown and concentration analysis.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::issuers_model::{BondHolding, ConcentrationAnalysis, IssuerGroup, IssuerLabel};
use crate::constants::DECIMAL_PRECISION;

/// Issuers at or above this weight are flagged.
pub const DEFAULT_CONCENTRATION_THRESHOLD: Decimal = dec!(20);

/// Aggregate labelled holdings per issuer, ranked by market value descending.
///
/// `holdings` and `labels` are paired by index. Ties keep first-seen order.
pub fn group_by_issuer(holdings: &[BondHolding], labels: &[IssuerLabel]) -> Vec<IssuerGroup> {
    let mut groups: Vec<IssuerGroup> = Vec::new();
    let mut index_by_issuer: HashMap<&str, usize> = HashMap::new();

    for (holding, label) in holdings.iter().zip(labels) {
        let index = *index_by_issuer
            .entry(label.issuer.as_str())
            .or_insert_with(|| {
                groups.push(IssuerGroup {
                    rank: 0,
                    issuer: label.issuer.clone(),
                    market_value: Decimal::ZERO,
                    face_value: Decimal::ZERO,
                    bond_count: 0,
                    weight_percentage: Decimal::ZERO,
                    extraction_method: label.method,
                    bonds: Vec::new(),
                });
                groups.len() - 1
            });

        let group = &mut groups[index];
        group.market_value += holding.market_value;
        group.face_value += holding.face_value;
        group.bond_count += 1;
        group.extraction_method = label.method;
        group.bonds.push(holding.clone());
    }

    let total: Decimal = groups.iter().map(|g| g.market_value).sum();
    for group in groups.iter_mut() {
        group.weight_percentage = if total > Decimal::ZERO {
            (group.market_value / total * dec!(100)).round_dp(DECIMAL_PRECISION)
        } else {
            Decimal::ZERO
        };
    }

    groups.sort_by(|a, b| b.market_value.cmp(&a.market_value));
    for (position, group) in groups.iter_mut().enumerate() {
        group.rank = position + 1;
    }
    groups
}

/// Flag issuers whose weight reaches `threshold` percent. `groups` are
/// expected in rank order, as returned by [`group_by_issuer`].
pub fn analyze_concentration(groups: &[IssuerGroup], threshold: Decimal) -> ConcentrationAnalysis {
    let high_concentration_issuers = groups
        .iter()
        .filter(|g| g.weight_percentage >= threshold)
        .cloned()
        .collect();

    ConcentrationAnalysis {
        concentration_threshold: threshold,
        total_market_value: groups.iter().map(|g| g.market_value).sum(),
        high_concentration_issuers,
        max_concentration: groups.first().cloned(),
    }
}
