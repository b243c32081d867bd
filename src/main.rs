//! Purpose: `tritonbin` CLI for inspecting and decoding captured responses.
//! Role: Thin shell over the library; reads a body file, prints JSON to stdout.
//! Invariants: Diagnostics go to stderr through tracing; stdout is JSON only.
//! Invariants: Every requested output is attempted even if an earlier one fails.
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tritonbin::parser::parse_header_length_value;
use tritonbin::types::INFERENCE_HEADER_CONTENT_LENGTH;
use tritonbin::{DecodeError, Response, Tensor};

#[derive(Parser)]
#[command(
    name = "tritonbin",
    version,
    about = "Inspect and decode binary+JSON inference responses",
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        env = "TRITONBIN_CONTENT_TYPE",
        help = "Response content type carrying json-header-size"
    )]
    content_type: Option<String>,
    #[arg(
        long,
        help = format!(
            "JSON header length in bytes, as sent in {INFERENCE_HEADER_CONTENT_LENGTH}; overrides --content-type"
        )
    )]
    header_length: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Print header metadata and the binary index")]
    Inspect {
        #[arg(help = "File holding the raw response body")]
        file: PathBuf,
    },
    #[command(about = "Decode binary outputs as JSON lines")]
    Decode {
        #[arg(help = "File holding the raw response body")]
        file: PathBuf,
        #[arg(
            long = "output",
            help = "Output to decode; repeatable (default: every binary output)"
        )]
        outputs: Vec<String>,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let file = match &cli.command {
        Command::Inspect { file } | Command::Decode { file, .. } => file,
    };
    let body = match std::fs::read(file) {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(path = %file.display(), error = %err, "failed to read response body");
            return ExitCode::FAILURE;
        }
    };

    let response = match parse_response(&cli, &body) {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, "failed to parse response");
            return ExitCode::FAILURE;
        }
    };

    match &cli.command {
        Command::Inspect { .. } => {
            println!("{}", inspect_json(&response));
            ExitCode::SUCCESS
        }
        Command::Decode { outputs, .. } => decode(&response, outputs),
    }
}

fn parse_response<'a>(cli: &Cli, body: &'a [u8]) -> Result<Response<'a>, DecodeError> {
    match (&cli.header_length, &cli.content_type) {
        (Some(value), _) => Response::with_header_length(body, parse_header_length_value(value)?),
        (None, Some(content_type)) => Response::parse(body, content_type),
        (None, None) => Err(DecodeError::MalformedContentType {
            content_type: String::new(),
            reason: "pass --content-type or --header-length",
        }),
    }
}

fn decode(response: &Response<'_>, requested: &[String]) -> ExitCode {
    let names: Vec<&str> = if requested.is_empty() {
        response
            .metadata()
            .binary_outputs()
            .map(|o| o.name.as_str())
            .collect()
    } else {
        requested.iter().map(String::as_str).collect()
    };

    let mut failed = 0usize;
    for name in names {
        match response.decode(name) {
            Ok(tensor) => println!("{}", tensor_json(&tensor)),
            Err(err) => {
                tracing::error!(output = name, error = %err, "failed to decode output");
                failed += 1;
            }
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn tensor_json(tensor: &Tensor) -> Value {
    json!({
        "name": tensor.name,
        "datatype": tensor.dtype().tag(),
        "shape": tensor.shape,
        "data": tensor.data.to_json(),
    })
}

fn inspect_json(response: &Response<'_>) -> Value {
    let metadata = response.metadata();
    let outputs: Vec<Value> = metadata
        .outputs
        .iter()
        .map(|o| {
            let range = response
                .index()
                .get(&o.name)
                .map(|r| json!({"start": r.start, "length": r.length}));
            if o.binary_data() && range.is_none() {
                tracing::warn!(output = %o.name, "binary_data set without binary_data_size");
            }
            json!({
                "name": o.name,
                "datatype": o.datatype,
                "shape": o.shape,
                "binary_data": o.binary_data(),
                "binary": range,
            })
        })
        .collect();

    json!({
        "header_length": response.header_length(),
        "binary_length": response.binary_region().len(),
        "model_name": metadata.model_name,
        "model_version": metadata.model_version,
        "outputs": outputs,
        "layout_ok": response.check_layout().is_ok(),
        "shadowed": response.index().shadowed_names(),
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
