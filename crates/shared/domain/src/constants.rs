//! Domain-level constants.
//!
//! These constants define business rules and the fixed messages clients see.

// =============================================================================
// Storage
// =============================================================================

/// Name of the single table backing the users resource
pub const USERS_TABLE: &str = "users";

/// Sample rows inserted when the table is empty at startup: (name, email, age)
pub const SEED_USERS: &[(&str, &str, i32)] = &[
    ("John Doe", "john@example.com", 30),
    ("Jane Smith", "jane@example.com", 25),
    ("Bob Johnson", "bob@example.com", 35),
];

// =============================================================================
// Validation
// =============================================================================

/// Returned when a create request lacks a name or an email
pub const MSG_NAME_EMAIL_REQUIRED: &str = "Name and email are required";

/// Returned when an update supplies an empty name
pub const MSG_NAME_EMPTY: &str = "Name cannot be empty";

/// Returned when an update supplies an empty email
pub const MSG_EMAIL_EMPTY: &str = "Email cannot be empty";

// =============================================================================
// Responses
// =============================================================================

pub const MSG_API_RUNNING: &str = "Users API is running!";
pub const MSG_USER_CREATED: &str = "User created successfully";
pub const MSG_USER_UPDATED: &str = "User updated successfully";
pub const MSG_USER_DELETED: &str = "User deleted successfully";
pub const MSG_DB_CONNECTED: &str = "Database connection successful";
pub const MSG_DB_CONNECTION_FAILED: &str = "Database connection failed";
pub const MSG_ROUTE_NOT_FOUND: &str = "Route not found";

// =============================================================================
// Entities
// =============================================================================

/// Entity label used in not-found messages ("User not found")
pub const ENTITY_USER: &str = "User";

/// Field label used in conflict messages ("Email already exists")
pub const FIELD_EMAIL: &str = "Email";
