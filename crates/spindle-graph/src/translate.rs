//! Raw graph items to sourced stream events

use crate::graph::{GraphItemStream, GraphResult};
use futures::{Stream, StreamExt};
use serde_json::Value;
use spindle_core::{ChatStreamEvent, SourcedEvent, Usage};
use std::pin::Pin;
use tracing::debug;

/// Stream of translated, source-attributed events.
pub type SourcedEventStream = Pin<Box<dyn Stream<Item = GraphResult<SourcedEvent>> + Send>>;

/// Classify each raw graph item into the closed event set.
///
/// Node-keyed state deltas set the current source and emit nothing
/// themselves; tagged custom payloads become events attributed to the most
/// recently seen source (unset until the first delta arrives). Arrival
/// order is preserved. Unknown shapes are dropped, not errors.
pub fn translate(raw: GraphItemStream) -> SourcedEventStream {
    Box::pin(async_stream::stream! {
        let mut source: Option<String> = None;
        let mut raw = raw;

        while let Some(item) = raw.next().await {
            let item = match item {
                Ok(item) => item,
                Err(e) => {
                    yield Err(e);
                    continue;
                }
            };
            let Some(obj) = item.as_object() else {
                continue;
            };

            match obj.get("type") {
                None => {
                    // State delta: the node-name key becomes the source for
                    // subsequent custom payloads.
                    if let Some(node) = obj.keys().next() {
                        source = Some(node.clone());
                    }
                }
                Some(tag) => match tag.as_str() {
                    Some("token_delta") => {
                        let text = obj
                            .get("content")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string();
                        yield Ok(SourcedEvent {
                            source: source.clone(),
                            event: ChatStreamEvent::TokenDelta { text },
                        });
                    }
                    Some("stream_usage") => {
                        if let Some(usage) = obj.get("usage").and_then(parse_usage) {
                            yield Ok(SourcedEvent {
                                source: source.clone(),
                                event: ChatStreamEvent::StreamUsage { usage },
                            });
                        }
                    }
                    // "stone_done" is the misspelled tag older graphs emit.
                    Some("stream_done") | Some("stone_done") => {
                        let finish_reason = obj
                            .get("finish_reason")
                            .and_then(Value::as_str)
                            .map(str::to_string);
                        yield Ok(SourcedEvent {
                            source: source.clone(),
                            event: ChatStreamEvent::StreamDone { finish_reason },
                        });
                    }
                    other => {
                        debug!(tag = ?other, "dropping unknown stream item");
                    }
                },
            }
        }
    })
}

fn parse_usage(value: &Value) -> Option<Usage> {
    let map = value.as_object()?;
    let field = |key: &str| map.get(key).and_then(Value::as_u64).map(|v| v as u32);
    Some(Usage {
        prompt_tokens: field("prompt_tokens"),
        completion_tokens: field("completion_tokens"),
        total_tokens: field("total_tokens"),
    })
}
