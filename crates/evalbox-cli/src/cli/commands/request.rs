//! Generic verb access to the request client.

use anyhow::{Context, Result, bail};
use evalbox_core::api::{ApiClient, Callbacks};
use serde_json::Value;

use super::{parse_query, print_outcome};

pub struct RequestOptions<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub query: &'a [String],
    pub body: Option<&'a str>,
    pub raw: bool,
}

pub async fn run(client: &ApiClient, opts: RequestOptions<'_>) -> Result<()> {
    let query = parse_query(opts.query)?;
    let method = opts.method.to_ascii_uppercase();

    if opts.raw && method != "POST" {
        bail!("--raw is only supported for POST");
    }

    let json_body = || -> Result<Value> {
        match opts.body {
            Some(text) => serde_json::from_str(text).context("parse --body as JSON"),
            None => Ok(Value::Null),
        }
    };

    let outcome = match method.as_str() {
        "GET" => {
            if opts.body.is_some() {
                bail!("GET requests do not take a body");
            }
            client.fetch(opts.path, &query, Callbacks::none()).await
        }
        "POST" if opts.raw => {
            let body = opts.body.unwrap_or_default();
            client
                .submit(opts.path, &query, body, Callbacks::none(), true)
                .await
        }
        "POST" => {
            client
                .submit(opts.path, &query, &json_body()?, Callbacks::none(), false)
                .await
        }
        "PUT" => {
            client
                .replace(opts.path, &query, &json_body()?, Callbacks::none())
                .await
        }
        "DELETE" => {
            client
                .remove(opts.path, &query, &json_body()?, Callbacks::none())
                .await
        }
        other => bail!("Unsupported method '{other}': use GET, POST, PUT or DELETE"),
    };

    print_outcome(outcome)
}
