//! Inspect command implementation.

use serde_json::json;
use unf_canonical::{decode_digest, UnfDescriptor};

pub fn run(unf: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let descriptor = UnfDescriptor::parse(&unf)?;
    let version = descriptor.unf_version();
    let digest_bytes = decode_digest(&descriptor.digest).ok().map(|b| b.len());

    if json {
        let output = json!({
            "descriptor": descriptor,
            "supported": version.is_some(),
            "encoding": version.map(|v| v.text_encoding().to_string()),
            "digest_bytes": digest_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let version_label = match version {
        Some(v) => format!("{} ({})", v, v.text_encoding()),
        None => format!("{} (unsupported)", unf_canonical::descriptor::format_general(descriptor.version)),
    };
    println!("version:  {}", version_label);
    println!("ndigits:  {}", descriptor.ndigits);
    println!("cdigits:  {}", descriptor.cdigits);
    match digest_bytes {
        Some(n) => println!("digest:   {} ({} bytes)", descriptor.digest, n),
        None => println!("digest:   {} (not base64)", descriptor.digest),
    }
    Ok(())
}
