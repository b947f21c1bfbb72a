//! Provision and wrap commands.
//!
//! Both accept the request as flags, as a JSON document, or a mix; flags
//! take precedence over fields read from the document.

use std::io::Read;
use std::path::Path;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::api::{KeyRequest, Reply, Response};
use crate::core::service::KeyService;
use crate::error::{Error, FieldError, Result, ValidationErrors};

/// Field name reported when the request document itself is unreadable.
const FIELD_REQUEST: &str = "request";

/// Generate and store a new key.
pub fn provision(
    config: Option<&Path>,
    key_name: Option<String>,
    request: Option<&str>,
    json: bool,
) -> Result<()> {
    let ctx = Context::load(config)?;
    let mut req = read_request(request)?;
    if key_name.is_some() {
        req.key_name = key_name;
    }

    let store = ctx.store();
    let service = KeyService::new(&store, ctx.config.policy);
    let result = service.provision(&req);

    if json {
        print_reply(&result)?;
    } else if let Ok(Response {
        message: Some(message),
        ..
    }) = &result
    {
        output::success(message);
    }
    result.map(|_| ())
}

/// Wrap a stored key for the given public key.
///
/// The wrapped key is printed alone on stdout so it can be piped.
pub fn wrap(
    config: Option<&Path>,
    key_name: Option<String>,
    public_key: Option<String>,
    request: Option<&str>,
    json: bool,
) -> Result<()> {
    let ctx = Context::load(config)?;
    let mut req = read_request(request)?;
    if key_name.is_some() {
        req.key_name = key_name;
    }
    if public_key.is_some() {
        req.client_public_key = public_key;
    }

    let store = ctx.store();
    let service = KeyService::new(&store, ctx.config.policy);
    let result = service.wrap_for_recipient(&req);

    if json {
        print_reply(&result)?;
    } else if let Ok(Response {
        wrapped_key: Some(wrapped),
        ..
    }) = &result
    {
        output::data(wrapped);
    }
    result.map(|_| ())
}

fn print_reply(result: &Result<Response>) -> Result<()> {
    let reply = Reply::from_result(result);
    output::data(&serde_json::to_string_pretty(&reply)?);
    Ok(())
}

/// Read a JSON request from a file, `-` for stdin, or nothing.
fn read_request(source: Option<&str>) -> Result<KeyRequest> {
    let Some(source) = source else {
        return Ok(KeyRequest::default());
    };

    let read = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(source)
    };
    let contents =
        read.map_err(|e| request_error(format!("cannot read request {}: {}", source, e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| request_error(format!("request is not a valid JSON object: {}", e)))
}

/// A caller-side problem with the request document itself.
fn request_error(message: String) -> Error {
    ValidationErrors(vec![FieldError::new(FIELD_REQUEST, message)]).into()
}
