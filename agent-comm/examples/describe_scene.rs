//! Describe a camera frame with a hosted vision-language model.
//!
//! ```bash
//! cargo run --example describe_scene -- <api-key> <path/to/frame.jpg>
//! ```

#![allow(clippy::print_stdout, clippy::expect_used)]

use agent_comm::prelude::*;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let api_key = args.next().unwrap_or_default();
    let path = args.next().unwrap_or_else(|| "frame.jpg".to_owned());

    let jpeg = std::fs::read(&path).expect("failed to read image file");
    let image_b64 = STANDARD.encode(&jpeg);

    let config = VlmConfig::new("gpt-4o-mini", api_key).with_temperature(0.0);
    let vlm = Vlm::new(config)?;

    let answer = vlm
        .describe(
            "What is in this frame? Describe it concisely.",
            image_b64.as_bytes(),
            None,
        )
        .await?;
    println!("{answer}");

    Ok(())
}
