use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::lab;
use crate::types::internal::{ResolvedRate, decimal_to_f64};

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LabDiscountResponse {
    pub lab_id: String,
    pub code: String,
    pub name: String,

    /// Lab-specific rate, absent when the lab defers to the global settings
    #[oai(skip_serializing_if_is_none)]
    pub discount_rate: Option<f64>,

    /// Rate actually applied to this lab's transactions
    pub effective_rate: f64,
}

/// Request model for setting or clearing a lab's rate
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateLabDiscountRequest {
    /// Percentage between 0 and 100; null clears the override
    pub discount_rate: Option<f64>,
}

impl LabDiscountResponse {
    pub fn new(lab: lab::Model, effective: ResolvedRate) -> Self {
        Self {
            lab_id: lab.id,
            code: lab.code,
            name: lab.name,
            discount_rate: lab.discount_rate,
            effective_rate: decimal_to_f64(effective.rate),
        }
    }
}
