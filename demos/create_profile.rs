//! Create Profile - register a device and read the answer back.
//!
//! This example demonstrates:
//! - Configuring a dispatcher with the builder pattern
//! - Passing a completion callback to a named operation
//! - Draining the origin context so the callback runs on this task
//!
//! # Running
//!
//! ```text
//! cargo run --example create_profile -- https://api.example.com/v1
//! ```
//!
//! Without a reachable backend the callback still runs, reporting the
//! transport failure status.

use exposure_api_client::{
    origin, DispatchOutcome, Dispatcher, HttpTransport, ProfileRequest, ProfileResponse,
    StaticIdentity,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:8080/api".to_string());

    let (mut origin, handle) = origin::channel();
    let dispatcher = Dispatcher::builder()
        .base_endpoint(&base)
        .origin(handle)
        .transport(HttpTransport::builder().user_agent("create-profile-demo").build()?)
        .identity(StaticIdentity::unregistered())
        .build()?;

    let request = ProfileRequest::new("device-uid", "push-token", "+421900000000", "sk_SK");
    dispatcher.create_profile(request, |outcome: DispatchOutcome| {
        if !outcome.is_success() {
            eprintln!("create profile failed: {} {}", outcome.status(), outcome.body());
            return;
        }
        match outcome.json::<ProfileResponse>() {
            Ok(profile) => println!("registered as profile {}", profile.profile_id),
            Err(e) => eprintln!("unexpected answer: {e}"),
        }
    });

    // Runs the callback above once the dispatch finishes.
    origin.next().await;
    Ok(())
}
