//! Wire framing - sourced events to the outward event shape

use futures::{Stream, StreamExt};
use spindle_core::{ChatStreamEvent, SourcedEvent, WireEvent, EXECUTION_ERROR};
use spindle_graph::SourcedEventStream;
use tracing::debug;

/// Frame a turn's sourced events for the wire.
///
/// The first token chunk carries `is_first`; completion closes the frame
/// with an empty `is_last` chunk (only if any token flowed) followed by the
/// done event. Exactly one terminal event ends the stream and nothing is
/// consumed from the source after it.
pub fn frame(events: SourcedEventStream) -> impl Stream<Item = WireEvent> + Send {
    async_stream::stream! {
        let mut events = events;
        let mut emitted_token = false;

        while let Some(item) = events.next().await {
            match item {
                Ok(SourcedEvent {
                    event: ChatStreamEvent::TokenDelta { text },
                    ..
                }) => {
                    yield WireEvent::token(text, !emitted_token, false);
                    emitted_token = true;
                }
                Ok(SourcedEvent {
                    event: ChatStreamEvent::StreamUsage { usage },
                    source,
                }) => {
                    // Not forwarded; the hook is here if the wire ever
                    // grows a usage event.
                    debug!(?source, ?usage, "usage not forwarded to wire");
                }
                Ok(SourcedEvent {
                    event: ChatStreamEvent::StreamDone { .. },
                    ..
                }) => {
                    if emitted_token {
                        yield WireEvent::token("", false, true);
                    }
                    yield WireEvent::Done;
                    return;
                }
                Err(e) => {
                    yield WireEvent::error(EXECUTION_ERROR, e.to_string());
                    return;
                }
            }
        }

        // Source exhausted without a done event; close the frame anyway so
        // the stream still ends in exactly one terminal signal.
        if emitted_token {
            yield WireEvent::token("", false, true);
        }
        yield WireEvent::Done;
    }
}
