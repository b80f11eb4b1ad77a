//! Structured trace of each NLU exchange. Observational only.

use crate::query::QueryResult;
use serde_json::{Map, Value};
use tracing::info;

const NO_INTENT: &str = "No intent matched.";

/// Logs the query, the fulfillment and every output context of a result.
pub fn log_query_result(result: &QueryResult) {
    info!(query = %result.query_text, "Query");
    info!(response = %result.fulfillment_text, "Response");
    match &result.intent {
        Some(intent) => info!(intent = %intent.display_name, "Intent"),
        None => info!("{}", NO_INTENT),
    }
    info!(parameters = %parameters_json(&result.parameters), "Parameters");

    if !result.output_contexts.is_empty() {
        info!(count = result.output_contexts.len(), "Output contexts");
        for context in &result.output_contexts {
            info!(
                context = %context.short_name(),
                lifespan = context.lifespan_count,
                parameters = %parameters_json(&context.parameters),
                "Output context"
            );
        }
    }
}

/// Renders a parameter map as compact JSON.
pub fn parameters_json(parameters: &Map<String, Value>) -> String {
    Value::Object(parameters.clone()).to_string()
}
