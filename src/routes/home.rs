//! Greeting endpoints.

pub const ROOT_MESSAGE: &str = "Hello World from Spring Boot!";
pub const HELLO_MESSAGE: &str = "Hello World! This is a CI/CD Pipeline Demo";

/// Handler for `/`.
pub async fn index() -> &'static str {
    ROOT_MESSAGE
}

/// Handler for `/hello`.
pub async fn hello() -> &'static str {
    HELLO_MESSAGE
}
