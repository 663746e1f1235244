//! Basic usage example for the EagleBirth client
//!
//! This example demonstrates:
//! - Creating a client from an API key or a config file
//! - Sending an OTP and validating it
//! - Handling classified errors

use eaglebirth::{ClientConfig, EagleBirth, Error, SendOtp};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = match std::env::var("EAGLEBIRTH_CONFIG") {
        Ok(path) => EagleBirth::from_config(ClientConfig::from_file(path)?)?,
        Err(_) => {
            let api_key = std::env::var("EAGLEBIRTH_API_KEY")
                .unwrap_or_else(|_| "eb_test_replace_me".to_string());
            EagleBirth::new(api_key)?
        }
    };

    println!("Using {:?} at {}", client.environment(), client.base_url());

    println!("\n=== Sending OTP ===");
    let recipient =
        std::env::var("EAGLEBIRTH_EMAIL").unwrap_or_else(|_| "ada@example.com".to_string());
    let response = match client.otp().send(&SendOtp::email(recipient)).await {
        Ok(response) => response,
        Err(Error::RateLimit { retry_after, .. }) => {
            eprintln!("Rate limited, retry after {retry_after:?} seconds");
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error sending OTP: {e}");
            return Ok(());
        }
    };
    println!("Response: {response}");

    let Some(code_id) = response
        .get("data")
        .and_then(|data| data.get("code_id"))
        .and_then(|id| id.as_str())
    else {
        println!("No code_id in response");
        return Ok(());
    };

    println!("\n=== Checking validation state ===");
    match client.otp().check_validated(code_id).await {
        Ok(state) => println!("Validated: {state}"),
        Err(e) => eprintln!("Error checking code: {e} ({:?})", e.kind()),
    }

    Ok(())
}
