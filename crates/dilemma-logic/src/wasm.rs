//! WASM bindings for frontend match replay

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::observer::Quiet;
use crate::pairing::{pairing_count, pairing_for_match, round_robin_pairs};
use crate::{ConfigError, StrategyKind, TournamentConfig};

fn parse_config(config_json: &str) -> Result<TournamentConfig, JsError> {
    TournamentConfig::from_json(config_json)
        .map_err(|e: ConfigError| JsError::new(&format!("Invalid config: {}", e)))
}

/// Replay one scheduled pairing with full round-by-round details
///
/// # Arguments
/// * `config_json` - JSON serialized TournamentConfig (set `seed` for a
///   reproducible replay of probabilistic strategies)
/// * `first` - Index of the strategy in the first role
/// * `second` - Index of the strategy in the second role
///
/// # Returns
/// JSON serialized MatchResult
#[wasm_bindgen]
pub fn replay_match(config_json: &str, first: usize, second: usize) -> Result<JsValue, JsError> {
    let config = parse_config(config_json)?;
    let tournament = config
        .build_tournament()
        .map_err(|e| JsError::new(&e.to_string()))?;
    let rounds = config
        .iterations()
        .map_err(|e| JsError::new(&e.to_string()))?;

    let result = tournament
        .play(first, second, rounds, &mut Quiet)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Full round-robin schedule as `[first, second]` index pairs
#[wasm_bindgen]
pub fn round_robin_schedule(participant_count: usize) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&round_robin_pairs(participant_count))
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get total match count for a round robin
#[wasm_bindgen]
pub fn get_match_count(participant_count: usize) -> usize {
    pairing_count(participant_count)
}

/// Get the pairing for one match index, as a two-element array
#[wasm_bindgen]
pub fn get_pairing_for_match(
    participant_count: usize,
    match_index: usize,
) -> Result<js_sys::Array, JsError> {
    let (first, second) = pairing_for_match(participant_count, match_index)
        .ok_or_else(|| JsError::new("Match index out of range"))?;
    let pair = js_sys::Array::new();
    pair.push(&JsValue::from(first as u32));
    pair.push(&JsValue::from(second as u32));
    Ok(pair)
}

/// Describe a strategy kind given as JSON, e.g. `{"kind": "one_step_recall"}`
#[wasm_bindgen]
pub fn describe_strategy(kind_json: &str) -> Result<String, JsError> {
    let kind: StrategyKind = serde_json::from_str(kind_json)
        .map_err(|e| JsError::new(&format!("Invalid strategy: {}", e)))?;
    Ok(kind.describe())
}
