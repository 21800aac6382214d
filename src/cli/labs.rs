// Lab management commands

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::discount_calculator;
use crate::types::db::lab;
use crate::types::internal::{RequestContext, decimal_from_f64};

/// Register a lab; the optional rate is validated like the API does
pub async fn create_lab(
    app_data: &AppData,
    code: &str,
    name: &str,
    discount_rate: Option<f64>,
) -> Result<lab::Model, InternalError> {
    let ctx = RequestContext::for_cli("create-lab");

    let rate = match discount_rate {
        Some(value) => {
            let rate = decimal_from_f64(value)?;
            discount_calculator::validate_rate(rate)?;
            Some(rate)
        }
        None => None,
    };

    let lab = app_data.lab_store.insert_lab(&app_data.db, code, name, rate).await?;

    tracing::info!(request_id = %ctx.request_id, lab_id = %lab.id, "Lab created from CLI");
    println!("Lab created");
    println!("  Id:   {}", lab.id);
    println!("  Code: {}", lab.code);
    println!("  Name: {}", lab.name);
    if let Some(rate) = lab.discount_rate {
        println!("  Rate: {}%", rate);
    }

    Ok(lab)
}
