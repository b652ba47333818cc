use std::io::{BufRead, Write};

use serde_json::Value;
use tracing::{info, warn};

use crate::jsonrpc::{self, JsonRpcRequest, JsonRpcResponse};
use crate::pages::PageContext;
use crate::router::PageRegistry;

/// Serve the dashboard protocol: one JSON-RPC request per line on
/// `reader`, one response per line on `writer`, strictly in order. The
/// loop is single-threaded and handles one request at a time; it ends
/// when the UI closes its end of the pipe.
pub fn serve<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    registry: &PageRegistry,
    ctx: &PageContext,
) -> Result<(), String> {
    for line in reader.lines() {
        let line = line.map_err(|e| format!("Failed to read request: {}", e))?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match JsonRpcRequest::from_line(&line) {
            Ok(request) => handle_request(registry, ctx, &request),
            Err(e) => {
                warn!(error = %e, "Discarding malformed request line");
                JsonRpcResponse::failure(0, jsonrpc::PARSE_ERROR, "Parse error")
            }
        };

        let out = response
            .to_line()
            .map_err(|e| format!("Failed to serialize response: {}", e))?;
        writer
            .write_all(out.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| format!("Failed to write response: {}", e))?;
    }
    info!("Request stream closed, shutting down");
    Ok(())
}

fn handle_request(
    registry: &PageRegistry,
    ctx: &PageContext,
    request: &JsonRpcRequest,
) -> JsonRpcResponse {
    info!(method = %request.method, id = request.id, "Handling request");
    match request.method.as_str() {
        "pages:list" => JsonRpcResponse::success(
            request.id,
            serde_json::json!({ "pages": registry.titles() }),
        ),
        "pages:run" => {
            let params = request.params.clone().unwrap_or(Value::Null);
            let title = match params.get("title").and_then(|t| t.as_str()) {
                Some(title) => title.to_string(),
                None => {
                    return JsonRpcResponse::failure(
                        request.id,
                        jsonrpc::PAGE_ERROR,
                        "Missing 'title' parameter",
                    )
                }
            };
            let input = params
                .get("input")
                .cloned()
                .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
            match registry.dispatch(ctx, &title, &input) {
                Ok(view) => match serde_json::to_value(&view) {
                    Ok(value) => JsonRpcResponse::success(request.id, value),
                    Err(e) => JsonRpcResponse::failure(
                        request.id,
                        jsonrpc::PAGE_ERROR,
                        &format!("Failed to serialize page view: {}", e),
                    ),
                },
                Err(e) => {
                    warn!(page = %title, error = %e, "Page handler failed");
                    JsonRpcResponse::failure(request.id, jsonrpc::PAGE_ERROR, &e)
                }
            }
        }
        other => {
            warn!(method = %other, "Unknown method");
            JsonRpcResponse::failure(request.id, jsonrpc::METHOD_NOT_FOUND, "Method not found")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::default_registry;
    use std::io::Cursor;

    fn run_lines(lines: &str) -> Vec<JsonRpcResponse> {
        let registry = default_registry();
        let ctx = PageContext::new();
        let mut output = Vec::new();
        serve(Cursor::new(lines.to_string()), &mut output, &registry, &ctx).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| JsonRpcResponse::from_line(line).unwrap())
            .collect()
    }

    #[test]
    fn pages_list_returns_titles() {
        let responses =
            run_lines("{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"pages:list\"}\n");
        assert_eq!(responses.len(), 1);
        let result = responses[0].result.clone().unwrap();
        assert_eq!(result["pages"][0], "Homepage");
        assert_eq!(result["pages"][2], "Realtime Tweets Analysis");
    }

    #[test]
    fn pages_run_returns_a_page_view() {
        let request = "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"pages:run\",\
                       \"params\":{\"title\":\"Homepage\",\"input\":{\"text\":\"what a great day\"}}}\n";
        let responses = run_lines(request);
        assert!(responses[0].is_success());
        let view = responses[0].result.clone().unwrap();
        assert_eq!(view["title"], "Homepage");
        let blocks = view["blocks"].as_array().unwrap();
        assert!(blocks
            .iter()
            .any(|block| block["type"] == "notice" && block["text"] == "Positive"));
    }

    #[test]
    fn pages_run_without_title_is_an_error() {
        let responses = run_lines(
            "{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"pages:run\",\"params\":{}}\n",
        );
        let error = responses[0].error.clone().unwrap();
        assert_eq!(error.code, jsonrpc::PAGE_ERROR);
    }

    #[test]
    fn unknown_page_title_is_an_error() {
        let responses = run_lines(
            "{\"jsonrpc\":\"2.0\",\"id\":4,\"method\":\"pages:run\",\
             \"params\":{\"title\":\"Nope\"}}\n",
        );
        let error = responses[0].error.clone().unwrap();
        assert_eq!(error.code, jsonrpc::PAGE_ERROR);
        assert!(error.message.contains("Unknown page"));
    }

    #[test]
    fn unknown_method_is_reported() {
        let responses =
            run_lines("{\"jsonrpc\":\"2.0\",\"id\":5,\"method\":\"nope\"}\n");
        let error = responses[0].error.clone().unwrap();
        assert_eq!(error.code, jsonrpc::METHOD_NOT_FOUND);
    }

    #[test]
    fn malformed_json_is_reported_not_fatal() {
        let lines = "this is not json\n\
                     {\"jsonrpc\":\"2.0\",\"id\":6,\"method\":\"pages:list\"}\n";
        let responses = run_lines(lines);
        assert_eq!(responses.len(), 2);
        let error = responses[0].error.clone().unwrap();
        assert_eq!(error.code, jsonrpc::PARSE_ERROR);
        assert!(responses[1].is_success());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let lines = "\n\n{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"pages:list\"}\n\n";
        let responses = run_lines(lines);
        assert_eq!(responses.len(), 1);
    }

    #[test]
    fn responses_match_request_ids_in_order() {
        let lines = "{\"jsonrpc\":\"2.0\",\"id\":10,\"method\":\"pages:list\"}\n\
                     {\"jsonrpc\":\"2.0\",\"id\":11,\"method\":\"pages:list\"}\n";
        let responses = run_lines(lines);
        assert_eq!(responses[0].id, 10);
        assert_eq!(responses[1].id, 11);
    }

    #[test]
    fn page_failure_does_not_stop_the_loop() {
        // The dataset page fails when the dataset file is absent, but the
        // server keeps serving subsequent requests.
        let registry = default_registry();
        let ctx = PageContext::new()
            .with_dataset_path(std::path::PathBuf::from("/nonexistent/train.csv"));
        let lines = "{\"jsonrpc\":\"2.0\",\"id\":20,\"method\":\"pages:run\",\
                     \"params\":{\"title\":\"Tweets Dataset Analysis\"}}\n\
                     {\"jsonrpc\":\"2.0\",\"id\":21,\"method\":\"pages:list\"}\n";
        let mut output = Vec::new();
        serve(
            Cursor::new(lines.to_string()),
            &mut output,
            &registry,
            &ctx,
        )
        .unwrap();
        let responses: Vec<JsonRpcResponse> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| JsonRpcResponse::from_line(line).unwrap())
            .collect();
        assert!(!responses[0].is_success());
        assert!(responses[1].is_success());
    }
}
