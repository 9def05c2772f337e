// Re-export all items from the submodules
mod env_vars;
mod submission_config;

// Re-export submission config
pub use submission_config::{
    ApiConfig,
    SubmissionConfig,
    load_or_create_config,
};

// Re-export environment variable functions
pub use env_vars::{
    expand_env_vars,
    parse_windows_env_vars,
    parse_unix_env_vars,
};
