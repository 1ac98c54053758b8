//! Send a message through a pipeline and read it back in the same process.
//!
//! ```text
//! RUST_LOG=debug cargo run -p msgpipe --example in_memory_pipeline
//! ```

use msgpipe::{CipherConfig, HmacConfig, Pipeline, PipelineError};
use serde_json::json;

fn main() -> Result<(), PipelineError> {
    msgpipe::logging::init();

    let pipeline = Pipeline::builder()
        .json()
        .encrypted(CipherConfig::new("AES-256-CBC", "1234567890ABCDEF", "FEDCBA0987654321"))
        .signed(HmacConfig::new("sha256", "the messaging pipeline lives!"))
        .ascii_safe()
        .build()?;

    let message = json!({"hello": "world"});
    println!("Original message:");
    println!("{message:#}");

    let wire = pipeline.send(&message)?;
    println!("\nTransmitted message:\n{wire}");

    let received = pipeline.recv(&wire)?;
    println!("\nReceived message:");
    println!("{received:#}");

    Ok(())
}
