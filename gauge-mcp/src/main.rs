//! Gauge MCP Server
//!
//! MCP Server implementing spec 2025-11-25 over line-delimited stdio
//!
//! Tools:
//! - convert: Convert a value between two unit expressions
//! - in_units: Convert using a "from -> to" string
//! - compatible: Check whether two unit expressions are convertible
//! - dimensions: Dimension signature of a unit expression
//! - explain: Step-by-step breakdown of a conversion
//! - list_units: List units, prefixes and constants

use std::env;
use std::io::{self, BufRead, Write};
use gauge_units::{Category, ConversionError, NumberFormat};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "gauge";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server settings read from the environment
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Config {
    /// Display format of converted values (`GAUGE_NUMBER_FORMAT`)
    number_format: NumberFormat,
}

impl Config {
    fn from_env() -> Self {
        let number_format = match env::var("GAUGE_NUMBER_FORMAT") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}; falling back to real", e);
                NumberFormat::Real
            }),
            Err(_) => NumberFormat::default(),
        };
        Config { number_format }
    }
}

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        McpError { code: -32602, message: message.into(), data: None }
    }
}

fn init_logging() {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn write_response(response: &McpResponse) -> io::Result<()> {
    let response_json = serde_json::to_string(response).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", response_json)?;
    stdout.flush()
}

fn main() {
    init_logging();
    let config = Config::from_env();

    info!("Gauge MCP Server v{} started", SERVER_VERSION);
    info!("Protocol: {}", PROTOCOL_VERSION);
    info!("Number format: {}", config.number_format);

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    info!("Server ready, waiting for requests...");

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("Client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                debug!("Received: {} bytes", line.len());

                let request: McpRequest = match serde_json::from_str(line) {
                    Ok(r) => r,
                    Err(e) => {
                        warn!("Error parsing request: {}", e);
                        let response = McpResponse {
                            jsonrpc: "2.0".to_string(),
                            id: None,
                            result: None,
                            error: Some(McpError {
                                code: -32700,
                                message: format!("Parse error: {}", e),
                                data: None,
                            }),
                        };
                        if let Err(e) = write_response(&response) {
                            error!("Error writing response: {}", e);
                            break;
                        }
                        continue;
                    }
                };

                debug!("Processing: {}", request.method);

                let response = handle_request(&config, &request);

                // Notifications (no id) should NOT receive a response
                if request.id.is_none() {
                    debug!("Notification processed (no response): {}", request.method);
                    continue;
                }

                if let Err(e) = write_response(&response) {
                    error!("Error writing response: {}", e);
                    break;
                }

                debug!("Sent response for: {}", request.method);
            }
            Err(e) => {
                error!("Error reading input: {}", e);
                break;
            }
        }
    }

    info!("Server shutting down");
}

fn handle_request(config: &Config, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(config, &request.params),

        _ => Err(McpError {
            code: -32601,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!("Client connected: {} (protocol: {})", client_info, client_protocol);

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Compound unit conversion engine"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Gauge converts values between compound unit expressions. Write units as dot-separated products: 'm.m./s' is m^2/s, '/' marks a denominator token and 's**2' repeats a symbol. Use 'list_units' to see the vocabulary and 'explain' to see how a conversion was resolved."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let category_names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();

    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value from one unit expression to another, e.g. 10 'm.m./s' to 'ft.ft./min'.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": "number",
                            "description": "Value to convert"
                        },
                        "input_unit": {
                            "type": "string",
                            "description": "Source unit expression (e.g., \"BTU./lb\")"
                        },
                        "output_unit": {
                            "type": "string",
                            "description": "Target unit expression (e.g., \"kJ./kg\")"
                        }
                    },
                    "required": ["value", "input_unit", "output_unit"]
                }
            },
            {
                "name": "in_units",
                "description": "Convert a value using a single string like \"degC -> degF\" (also '→', 'to', 'in').",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": "number",
                            "description": "Value to convert"
                        },
                        "conversion": {
                            "type": "string",
                            "description": "Conversion string, e.g. \"MPa -> psi\""
                        }
                    },
                    "required": ["value", "conversion"]
                }
            },
            {
                "name": "compatible",
                "description": "Check whether two unit expressions measure the same quantity.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "input_unit": { "type": "string" },
                        "output_unit": { "type": "string" }
                    },
                    "required": ["input_unit", "output_unit"]
                }
            },
            {
                "name": "dimensions",
                "description": "Dimension signature of a unit expression, e.g. 'N' is 'L M T^-2'.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "unit": {
                            "type": "string",
                            "description": "Unit expression"
                        }
                    },
                    "required": ["unit"]
                }
            },
            {
                "name": "explain",
                "description": "Show how a conversion is resolved: expanded tokens, prefixes, constants, aligned pairs and repairs.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "input_unit": { "type": "string" },
                        "output_unit": { "type": "string" }
                    },
                    "required": ["input_unit", "output_unit"]
                }
            },
            {
                "name": "list_units",
                "description": "List atomic units, derived units, prefixes and constants, optionally one category's atomic units.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Filter atomic units by category",
                            "enum": category_names
                        }
                    }
                }
            }
        ]
    }))
}

fn handle_tool_call(config: &Config, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "convert" => tool_convert(config, &args),
        "in_units" => tool_in_units(config, &args),
        "compatible" => tool_compatible(&args),
        "dimensions" => tool_dimensions(&args),
        "explain" => tool_explain(&args),
        "list_units" => tool_list_units(&args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn str_arg<'a>(args: &'a JsonValue, name: &str) -> Result<&'a str, McpError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", name)))
}

/// Numbers may arrive as JSON numbers or numeric strings
fn number_arg(args: &JsonValue, name: &str) -> Result<f64, McpError> {
    let value = args.get(name)
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", name)))?;

    let number = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| McpError::invalid_params(format!("{} must be a finite number", name)))
}

fn text_result(text: String, mut extra: JsonValue) -> JsonValue {
    extra["content"] = json!([{ "type": "text", "text": text }]);
    extra["isError"] = json!(false);
    extra
}

/// Conversion failures are tool results, not protocol errors
fn tool_error(err: &ConversionError) -> JsonValue {
    debug!("conversion failed: {}", err);
    json!({
        "content": [{ "type": "text", "text": err.to_string() }],
        "code": err.code(),
        "isError": true
    })
}

fn converted(config: &Config, value: f64, from: &str, to: &str, result: Result<f64, ConversionError>) -> JsonValue {
    match result {
        Ok(result) => {
            let display = config.number_format.format(result);
            text_result(
                format!("{} {} = {} {}", value, from, display, to),
                json!({ "result": result, "display": display }),
            )
        }
        Err(e) => tool_error(&e),
    }
}

fn tool_convert(config: &Config, args: &JsonValue) -> Result<JsonValue, McpError> {
    let value = number_arg(args, "value")?;
    let from = str_arg(args, "input_unit")?;
    let to = str_arg(args, "output_unit")?;

    Ok(converted(config, value, from, to, gauge_units::convert(value, from, to)))
}

fn tool_in_units(config: &Config, args: &JsonValue) -> Result<JsonValue, McpError> {
    let value = number_arg(args, "value")?;
    let conversion = str_arg(args, "conversion")?;

    let (from, to) = match gauge_units::parse_conversion(conversion) {
        Ok(sides) => sides,
        Err(e) => return Ok(tool_error(&e)),
    };

    Ok(converted(config, value, from, to, gauge_units::convert(value, from, to)))
}

fn tool_compatible(args: &JsonValue) -> Result<JsonValue, McpError> {
    let from = str_arg(args, "input_unit")?;
    let to = str_arg(args, "output_unit")?;

    Ok(match gauge_units::compatible(from, to) {
        Ok(compatible) => {
            let text = if compatible {
                format!("{} and {} are compatible", from, to)
            } else {
                format!("{} and {} are not compatible", from, to)
            };
            text_result(text, json!({ "compatible": compatible }))
        }
        Err(e) => tool_error(&e),
    })
}

fn tool_dimensions(args: &JsonValue) -> Result<JsonValue, McpError> {
    let unit = str_arg(args, "unit")?;

    Ok(match gauge_units::dimension(unit) {
        Ok(dimension) => {
            let signature = dimension.to_string();
            let text = match dimension.name() {
                Some(name) => format!("{}: {} ({})", unit, signature, name),
                None => format!("{}: {}", unit, signature),
            };
            let exponents: serde_json::Map<String, JsonValue> = Category::ALL
                .iter()
                .map(|c| (c.name().to_string(), json!(dimension.exponent(*c))))
                .collect();
            text_result(text, json!({
                "dimension": signature,
                "name": dimension.name(),
                "exponents": exponents
            }))
        }
        Err(e) => tool_error(&e),
    })
}

fn tool_explain(args: &JsonValue) -> Result<JsonValue, McpError> {
    let from = str_arg(args, "input_unit")?;
    let to = str_arg(args, "output_unit")?;

    let explanation = match gauge_units::explain(from, to) {
        Ok(explanation) => explanation,
        Err(e) => return Ok(tool_error(&e)),
    };

    let mut lines = vec![
        format!("{} -> {} [{}]", from, to, explanation.dimension),
        format!("input tokens: {}", gauge_units::join(&explanation.input.tokens)),
        format!("output tokens: {}", gauge_units::join(&explanation.output.tokens)),
    ];
    for pair in &explanation.pairs {
        lines.push(format!("  {} -> {}: {}", pair.input, pair.output, pair.factor));
    }
    lines.push(format!("scale: {} / {}", explanation.input_scale, explanation.output_scale));
    if explanation.affine {
        lines.push("absolute temperatures use the offset formula".to_string());
    }
    lines.push(format!("ratio: {}", explanation.ratio));

    let data = serde_json::to_value(&explanation)
        .map_err(|e| McpError { code: -32603, message: e.to_string(), data: None })?;

    Ok(text_result(lines.join("\n"), json!({ "explanation": data })))
}

fn tool_list_units(args: &JsonValue) -> Result<JsonValue, McpError> {
    let catalog = gauge_units::catalog();

    if let Some(name) = args.get("category").and_then(|v| v.as_str()) {
        let category = Category::from_name(name)
            .ok_or_else(|| McpError::invalid_params(format!("Unknown category: {}", name)))?;
        let symbols: Vec<&str> = catalog.atomic_in(category).map(|e| e.symbol).collect();
        return Ok(text_result(
            format!("{}: {}", category, symbols.join(", ")),
            json!({ "category": category, "units": symbols }),
        ));
    }

    let atomic: Vec<&str> = catalog.atomic.iter().map(|e| e.symbol).collect();
    let derived: Vec<&str> = catalog.derived.iter().map(|e| e.symbol).collect();
    let prefixes: Vec<&str> = catalog.prefixes.iter().map(|e| e.symbol).collect();
    let text = format!(
        "atomic: {}\nderived: {}\nprefixes: {}",
        atomic.join(", "),
        derived.join(", "),
        prefixes.join(", ")
    );

    let data = serde_json::to_value(&catalog)
        .map_err(|e| McpError { code: -32603, message: e.to_string(), data: None })?;

    Ok(text_result(text, json!({ "catalog": data })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: JsonValue) -> McpRequest {
        McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    fn call(tool: &str, arguments: JsonValue) -> McpResponse {
        let config = Config::default();
        handle_request(&config, &request("tools/call", json!({ "name": tool, "arguments": arguments })))
    }

    #[test]
    fn test_initialize() {
        let response = handle_request(
            &Config::default(),
            &request("initialize", json!({ "protocolVersion": "2025-06-18" })),
        );
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2025-06-18");
        assert_eq!(result["serverInfo"]["name"], "gauge");
    }

    #[test]
    fn test_tools_list() {
        let response = handle_request(&Config::default(), &request("tools/list", json!({})));
        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(
            names,
            vec!["convert", "in_units", "compatible", "dimensions", "explain", "list_units"]
        );
    }

    #[test]
    fn test_unknown_method() {
        let response = handle_request(&Config::default(), &request("resources/list", json!({})));
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn test_convert() {
        let result = call("convert", json!({ "value": 20, "input_unit": "degC", "output_unit": "degF" }))
            .result
            .unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["result"], 68.0);
        assert_eq!(result["display"], "68.000000");
        assert_eq!(result["content"][0]["text"], "20 degC = 68.000000 degF");
    }

    #[test]
    fn test_convert_string_value() {
        let result = call("convert", json!({ "value": "2", "input_unit": "k.g", "output_unit": "g" }))
            .result
            .unwrap();
        assert_eq!(result["result"], 2000.0);
    }

    #[test]
    fn test_sci_format() {
        let config = Config { number_format: NumberFormat::Sci };
        let response = handle_request(
            &config,
            &request("tools/call", json!({
                "name": "convert",
                "arguments": { "value": 10, "input_unit": "m.m./s", "output_unit": "ft.ft./min" }
            })),
        );
        assert_eq!(response.result.unwrap()["display"], "6.46e3");
    }

    #[test]
    fn test_conversion_error_is_tool_result() {
        let response = call("convert", json!({ "value": 1, "input_unit": "m", "output_unit": "kg" }));
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["code"], "INCOMPATIBLE_UNITS");
    }

    #[test]
    fn test_missing_argument() {
        let response = call("convert", json!({ "value": 1, "input_unit": "m" }));
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.message, "Missing output_unit argument");
    }

    #[test]
    fn test_in_units() {
        let result = call("in_units", json!({ "value": 1, "conversion": "ft -> in" })).result.unwrap();
        assert!((result["result"].as_f64().unwrap() - 12.0).abs() < 1e-9);

        let result = call("in_units", json!({ "value": 1, "conversion": "ft" })).result.unwrap();
        assert_eq!(result["code"], "INVALID_CONVERSION");
    }

    #[test]
    fn test_compatible() {
        let result = call("compatible", json!({ "input_unit": "N", "output_unit": "lbf" })).result.unwrap();
        assert_eq!(result["compatible"], true);

        let result = call("compatible", json!({ "input_unit": "m", "output_unit": "s" })).result.unwrap();
        assert_eq!(result["compatible"], false);
    }

    #[test]
    fn test_dimensions() {
        let result = call("dimensions", json!({ "unit": "N" })).result.unwrap();
        assert_eq!(result["dimension"], "L M T^-2");
        assert_eq!(result["name"], "force");
        assert_eq!(result["exponents"]["time"], -2);
    }

    #[test]
    fn test_explain() {
        let result = call("explain", json!({ "input_unit": "W./m./K", "output_unit": "BTU./hr./ft./degF" }))
            .result
            .unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["explanation"]["repairs"][0]["kind"], "restore");
    }

    #[test]
    fn test_list_units() {
        let result = call("list_units", json!({ "category": "time" })).result.unwrap();
        assert_eq!(result["units"], json!(["s", "min", "hr", "day", "week", "month", "year"]));

        let response = call("list_units", json!({ "category": "volume" }));
        assert_eq!(response.error.unwrap().code, -32602);

        let result = call("list_units", json!({})).result.unwrap();
        assert_eq!(result["catalog"]["prefixes"].as_array().unwrap().len(), 20);
    }
}
