//! Query settings normalization
//!
//! Query configurations arrive sparse and loosely typed. They are normalized
//! eagerly into `QuerySettings`, where every field carries an explicit default.
//! A key that is missing or holds a value of the wrong type reads as its
//! default; nothing here can fail.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_NOTIFICATION_DURATION: f64 = 4.5;

/// Settings sourced from the `response` sub-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSettings {
    pub show_success_toaster: bool,
    pub show_failure_toaster: bool,
    pub success_message: String,
    /// Seconds a toast stays visible
    pub notification_duration: f64,
    pub enable_transformer: bool,
    pub transformer: String,
    pub enable_error_transformer: bool,
    pub error_transformer: String,
    pub show_update_set_value_dynamically_toggle: bool,
}

impl Default for ResponseSettings {
    fn default() -> Self {
        Self {
            show_success_toaster: false,
            show_failure_toaster: false,
            success_message: String::new(),
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
            enable_transformer: false,
            transformer: String::new(),
            enable_error_transformer: false,
            error_transformer: String::new(),
            show_update_set_value_dynamically_toggle: false,
        }
    }
}

/// Settings sourced from the `advanced` sub-section. Delays are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSettings {
    pub run_when_page_loads: bool,
    pub run_when_model_updates: bool,
    pub require_confirmation: bool,
    pub confirmation_message: String,
    pub query_disabled: bool,
    pub query_disabled_message: String,
    pub query_throttle_time: u64,
    pub query_timeout: u64,
    pub query_run_after_delay: u64,
    pub enable_caching: bool,
    pub cache_key_ttl: u64,
    pub watched_params: Vec<Value>,
    pub offline_only: bool,
    pub run_on_page_load_delay: u64,
    pub imported_query_inputs: Map<String, Value>,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            run_when_page_loads: false,
            run_when_model_updates: false,
            require_confirmation: false,
            confirmation_message: String::new(),
            query_disabled: false,
            query_disabled_message: String::new(),
            query_throttle_time: 0,
            query_timeout: 0,
            query_run_after_delay: 0,
            enable_caching: false,
            cache_key_ttl: 0,
            watched_params: Vec::new(),
            offline_only: false,
            run_on_page_load_delay: 0,
            imported_query_inputs: Map::new(),
        }
    }
}

/// Fully-populated query settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySettings {
    pub response: ResponseSettings,
    pub advanced: AdvancedSettings,
}

impl QuerySettings {
    /// Normalize a sparse configuration object
    pub fn from_config(config: Option<&Value>) -> Self {
        let response = Section::of(config, "response");
        let advanced = Section::of(config, "advanced");
        let r = ResponseSettings::default();
        let a = AdvancedSettings::default();

        Self {
            response: ResponseSettings {
                show_success_toaster: response.bool("showSuccessToaster", r.show_success_toaster),
                show_failure_toaster: response.bool("showFailureToaster", r.show_failure_toaster),
                success_message: response.string("successMessage", r.success_message),
                notification_duration: response
                    .seconds("notificationDuration", r.notification_duration),
                enable_transformer: response.bool("enableTransformer", r.enable_transformer),
                transformer: response.string("transformer", r.transformer),
                enable_error_transformer: response
                    .bool("enableErrorTransformer", r.enable_error_transformer),
                error_transformer: response.string("errorTransformer", r.error_transformer),
                show_update_set_value_dynamically_toggle: response.bool(
                    "showUpdateSetValueDynamicallyToggle",
                    r.show_update_set_value_dynamically_toggle,
                ),
            },
            advanced: AdvancedSettings {
                run_when_page_loads: advanced.bool("runWhenPageLoads", a.run_when_page_loads),
                run_when_model_updates: advanced
                    .bool("runWhenModelUpdates", a.run_when_model_updates),
                require_confirmation: advanced.bool("requireConfirmation", a.require_confirmation),
                confirmation_message: advanced
                    .string("confirmationMessage", a.confirmation_message),
                query_disabled: advanced.bool("queryDisabled", a.query_disabled),
                query_disabled_message: advanced
                    .string("queryDisabledMessage", a.query_disabled_message),
                query_throttle_time: advanced.millis("queryThrottleTime", a.query_throttle_time),
                query_timeout: advanced.millis("queryTimeout", a.query_timeout),
                query_run_after_delay: advanced
                    .millis("queryRunAfterDelay", a.query_run_after_delay),
                enable_caching: advanced.bool("enableCaching", a.enable_caching),
                cache_key_ttl: advanced.millis("cacheKeyTtl", a.cache_key_ttl),
                watched_params: advanced.array("watchedParams", a.watched_params),
                offline_only: advanced.bool("offlineOnly", a.offline_only),
                run_on_page_load_delay: advanced
                    .millis("runOnPageLoadDelay", a.run_on_page_load_delay),
                imported_query_inputs: advanced
                    .object("importedQueryInputs", a.imported_query_inputs),
            },
        }
    }
}

/// Lenient, typed view over one configuration sub-section
struct Section<'a>(Option<&'a Map<String, Value>>);

impl<'a> Section<'a> {
    fn of(config: Option<&'a Value>, name: &str) -> Self {
        Section(config.and_then(|c| c.get(name)).and_then(Value::as_object))
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|section| section.get(key))
    }

    fn bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    fn string(&self, key: &str, default: String) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(default)
    }

    fn seconds(&self, key: &str, default: f64) -> f64 {
        self.get(key)
            .and_then(number_like)
            .filter(|n| *n >= 0.0)
            .unwrap_or(default)
    }

    fn millis(&self, key: &str, default: u64) -> u64 {
        match self.get(key) {
            Some(Value::Number(n)) if n.is_u64() => n.as_u64().unwrap_or(default),
            Some(value) => number_like(value)
                .filter(|n| *n >= 0.0)
                .map(|n| n.trunc() as u64)
                .unwrap_or(default),
            None => default,
        }
    }

    fn array(&self, key: &str, default: Vec<Value>) -> Vec<Value> {
        self.get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or(default)
    }

    fn object(&self, key: &str, default: Map<String, Value>) -> Map<String, Value> {
        self.get(key)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or(default)
    }
}

/// JSON numbers and numeric strings
fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}
