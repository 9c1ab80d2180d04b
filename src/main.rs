use segy_reader::{las, segy};
use std::env;
use std::fs::File;
use std::io::BufReader;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-segy-or-las-file> [--traces]", args[0]);
        std::process::exit(1);
    }

    let path = &args[1];
    let with_traces = args.iter().any(|arg| arg == "--traces");

    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    println!("Reading file: {}", path);
    println!("{}", "=".repeat(60));

    let file = match File::open(path) {
        Ok(f) => BufReader::new(f),
        Err(e) => {
            eprintln!("ERROR: cannot open {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let result = match extension.as_str() {
        "las" => las::extract(file).map(|record| (record, None)),
        "seg" | "segy" | "sgy" => {
            if with_traces {
                segy::extract_with_summary(file).map(|(record, summary)| (record, Some(summary)))
            } else {
                segy::extract(file).map(|record| (record, None))
            }
        }
        other => {
            eprintln!("ERROR: unsupported file extension '{}'", other);
            eprintln!("Supported: .seg .segy .sgy .las");
            std::process::exit(1);
        }
    };

    match result {
        Ok((record, summary)) => {
            println!("\nExtracted record:");
            println!("  MIME override: {}", record.mime_override);
            println!("  DCMI type: {}", record.dcmi_type);
            println!("  Content length: {} chars", record.content.chars().count());
            for line in record.content.lines().take(5) {
                println!("    {}", line);
            }

            if let Some(summary) = summary {
                println!("\nTrace summary:");
                println!("  Traces read: {}", summary.count);
                if let (Some(min), Some(max)) = (summary.min, summary.max) {
                    println!("  Sample min: {}", min);
                    println!("  Sample max: {}", max);
                }
                if summary.truncated {
                    println!("  NOTE: file is incomplete; trace iteration stopped early");
                }
            }
        }
        Err(e) => {
            eprintln!("\nERROR: extraction failed");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
