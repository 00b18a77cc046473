//! Configuration for the student portal API

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string (from the MONGO_URI environment variable)
    pub mongo_uri: String,

    /// Database holding the students collection
    pub database: String,

    /// Collection holding student documents
    pub collection: String,

    /// Origin allowed to make cross-origin requests to /api/*
    pub allowed_origin: String,

    /// HTTP server port
    pub port: u16,

    /// Timeout for MongoDB server selection, applied once at client setup
    pub server_selection_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongo_uri: default_mongo_uri(),
            database: default_database(),
            collection: default_collection(),
            allowed_origin: default_allowed_origin(),
            port: default_port(),
            server_selection_timeout: default_server_selection_timeout(),
        }
    }
}

impl Config {
    /// Build config from the process environment. MONGO_URI is the only
    /// external configuration surface; everything else is a fixed default.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(uri) = std::env::var("MONGO_URI") {
            config.mongo_uri = uri;
        }
        config
    }
}

// Default value functions

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "student_portal".to_string()
}

fn default_collection() -> String {
    "students".to_string()
}

fn default_allowed_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_server_selection_timeout() -> Duration {
    Duration::from_secs(5)
}
