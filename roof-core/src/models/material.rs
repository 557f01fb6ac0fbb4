use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One catalog entry: a shingle or underlayment product with its reference
/// price per roofing square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialProduct {
    pub id: String,
    pub name: String,
    pub price_per_square: Decimal,
}
