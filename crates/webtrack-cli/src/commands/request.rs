//! Raw request command implementation.

use std::io::Read;

use anyhow::{Context, Result, bail};
use clap::Args;

use webtrack_http::{ApiRequest, Method};

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PATCH, ...)
    pub method: String,

    /// Path relative to the API origin, e.g. /timesheets/
    pub path: String,

    /// JSON body, `@file` to read a file, or `-` for stdin
    #[arg(long, short)]
    pub data: Option<String>,

    /// Query parameter as key=value (repeatable)
    #[arg(long, short, value_parser = parse_pair)]
    pub query: Vec<(String, String)>,

    /// Pretty-print the JSON response
    #[arg(long)]
    pub pretty: bool,
}

fn parse_pair(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

fn read_body(data: &str) -> Result<serde_json::Value> {
    let raw = if data == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else if let Some(path) = data.strip_prefix('@') {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
    } else {
        data.to_string()
    };

    serde_json::from_str(&raw).context("Request body is not valid JSON")
}

pub async fn run(global: &GlobalArgs, args: RequestArgs) -> Result<()> {
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method: {}", args.method))?;

    let mut request = ApiRequest::new(method, &args.path);
    for (key, value) in args.query {
        request = request.query_pair(key, value);
    }
    if let Some(data) = &args.data {
        let body = read_body(data)?;
        request = request.with_json(&body)?;
    }

    let gateway = session::gateway(global)?;
    let response = gateway.send(&request).await.context("Request failed")?;

    match response.json::<serde_json::Value>() {
        Ok(serde_json::Value::Null) => {}
        Ok(body) => output::json(&body, args.pretty)?,
        Err(_) => println!("{}", response.text()),
    }

    if !response.is_success() {
        bail!("Server responded with {}", response.status());
    }

    Ok(())
}
