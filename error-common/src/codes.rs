// Error codes implementation
// Stable codes surfaced in error responses; never renumber an existing code.

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
    pub const LIMIT_EXCEEDED: &str = "VALIDATION_1004";
}

pub mod authorization {
    pub const ACCESS_DENIED: &str = "AUTHZ_3001";
    pub const INSUFFICIENT_PERMISSIONS: &str = "AUTHZ_3002";
    pub const INVALID_RELATION: &str = "AUTHZ_3003";
    pub const INVALID_SELECTOR: &str = "AUTHZ_3004";
    pub const INVALID_PATCH_OBJECTS: &str = "AUTHZ_3005";
    pub const INVALID_TYPE: &str = "AUTHZ_3006";
    pub const INVALID_NAME: &str = "AUTHZ_3007";
    pub const INVALID_OBJECT: &str = "AUTHZ_3008";
    pub const INVALID_SUBJECT: &str = "AUTHZ_3009";
}

pub mod storage {
    pub const UNAVAILABLE: &str = "STORE_4001";
    pub const DEADLINE_EXCEEDED: &str = "STORE_4002";
}

pub mod internal {
    pub const INTERNAL: &str = "INTERNAL_5001";
    pub const CONTRACT_VIOLATION: &str = "INTERNAL_5002";
    pub const INVALID_CONFIG: &str = "INTERNAL_5003";
}
