//! Default values and functions for configuration

pub(crate) const DEFAULT_CATALOG_PROVIDER: &str = "rest";
pub(crate) const DEFAULT_CATALOG_BASE_URL: &str = "http://localhost:8080/api";
pub(crate) const DEFAULT_TARGET_CATEGORY: &str = "Load";

pub(crate) fn default_similarity_threshold() -> u8 {
    80
}

pub(crate) fn default_low_match_floor() -> u8 {
    50
}

pub(crate) fn default_min_confidence_for_action() -> u8 {
    60
}

pub(crate) fn default_price_tolerance() -> f64 {
    0.01
}

pub(crate) fn default_catalog_provider() -> String {
    DEFAULT_CATALOG_PROVIDER.to_string()
}

pub(crate) fn default_catalog_base_url() -> String {
    DEFAULT_CATALOG_BASE_URL.to_string()
}

pub(crate) fn default_catalog_page_size() -> usize {
    100
}

pub(crate) fn default_catalog_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_target_category() -> String {
    DEFAULT_TARGET_CATEGORY.to_string()
}

pub(crate) fn default_manufacturer() -> String {
    String::new()
}

pub(crate) fn default_product_status() -> i32 {
    1 // Enabled
}

pub(crate) fn default_product_quantity() -> i64 {
    0
}

pub(crate) fn default_server_port() -> u16 {
    3000
}

pub(crate) fn default_allowed_origins() -> Vec<String> {
    Vec::new() // Empty by default = CORS disabled
}
