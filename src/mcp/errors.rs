pub const INVALID_INPUT: &str = "invalid_input";
pub const NOT_FOUND: &str = "not_found";
pub const UNSUPPORTED_FORMAT: &str = "unsupported_format";
pub const ALREADY_EXISTS: &str = "already_exists";
pub const EXTERNAL_LIBRARY: &str = "external_library";
pub const TOO_LARGE: &str = "too_large";
pub const INTERNAL_ERROR: &str = "internal_error";
