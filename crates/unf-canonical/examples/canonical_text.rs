use unf_canonical::{Canonicalizer, Rounder, UnfVersion, Value};

fn main() {
    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        eprintln!("usage: canonical_text <real> [ndigits] [version]");
        std::process::exit(2);
    };
    let ndigits = args.next().and_then(|d| d.parse().ok()).unwrap_or(7);
    let version: UnfVersion = args
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();

    let value = unf_canonical::numeric::parse_real_prefix(input.as_bytes()).value;
    let rounder = match Rounder::new(ndigits, 128) {
        Ok(rounder) => rounder,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    let text = rounder.round(Value::Real(value));
    print!("{}", String::from_utf8_lossy(text.as_bytes()));

    match Canonicalizer::new(version.text_encoding()).canonicalize(text.as_bytes()) {
        Ok(bytes) => {
            let hex: Vec<String> = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            println!("{} ({} bytes)", hex.join(" "), bytes.len());
        }
        Err(err) => {
            eprintln!("canonicalization failed: {}", err);
            std::process::exit(1);
        }
    }
}
