//! JSON fixtures shaped like the Open Library responses

use serde_json::{json, Value};
use shelfdash::DashboardConfig;

/// Base URL every scripted test uses
pub const BASE: &str = "http://test.local";

/// Config pointed at the scripted base URL
pub fn test_config() -> DashboardConfig {
    DashboardConfig {
        base_url: BASE.to_string(),
        ..DashboardConfig::default()
    }
}

/// One fully populated search document
pub fn search_doc(title: &str, author: &str, author_key: &str) -> Value {
    json!({
        "title": title,
        "author_name": [author],
        "author_key": [author_key],
        "first_publish_year": 1970,
        "ratings_average": 4.0,
        "subject": ["Fiction"]
    })
}

/// Search response wrapping the given documents
pub fn search_response(docs: Vec<Value>) -> Value {
    json!({ "docs": docs })
}

/// Author profile body
pub fn author_profile(birth_date: &str) -> Value {
    json!({ "birth_date": birth_date })
}

/// Author works body with the given work titles
pub fn author_works(titles: &[&str]) -> Value {
    json!({
        "entries": titles.iter().map(|t| json!({ "title": t })).collect::<Vec<_>>()
    })
}

/// URL of the primary search fetch against [`BASE`]
pub fn search_url() -> String {
    format!("{}/search.json?q=books", BASE)
}

/// URL of an author profile fetch against [`BASE`]
pub fn author_url(key: &str) -> String {
    format!("{}/authors/{}.json", BASE, key)
}

/// URL of an author works fetch against [`BASE`]
pub fn works_url(key: &str) -> String {
    format!("{}/authors/{}/works.json", BASE, key)
}
