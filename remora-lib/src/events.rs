//! Plugin event stream.
//!
//! The backend pushes out-of-band plugin notifications over a long-lived
//! server-sent-event channel at `/api/plugins/events`. The stream here
//! reconnects internally after a fixed delay and never ends; there is no
//! backoff growth and no replay, matching the backend's contract.

use std::{collections::VecDeque, time::Duration};

use futures_util::{Stream, StreamExt, stream};
use reqwest::Method;
use serde::Deserialize;

use crate::api::{ApiClient, Result};

/// Notifications delivered over the event channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginEvent {
    /// The channel is established (sent by the server on connect).
    Connected,
    /// A plugin's config changed somewhere else; consumers re-fetch it.
    ConfigUpdated { name: String },
    /// The channel dropped; the stream will retry after the fixed delay.
    Disconnected,
}

/// Reconnect behaviour for the event stream. The delay is fixed: the
/// backend defines no backoff and no jitter.
#[derive(Debug, Clone, Copy)]
pub struct ReconnectPolicy {
    pub delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(5),
        }
    }
}

impl ApiClient {
    /// Open one SSE connection to the plugin event endpoint.
    pub async fn subscribe_plugin_events(&self) -> Result<reqwest::Response> {
        let request = self
            .request(Method::GET, "/api/plugins/events")
            .header("Accept", "text/event-stream");

        self.send(request).await
    }
}

/// An endless stream of [`PluginEvent`]s that reconnects internally.
pub fn plugin_events(
    client: ApiClient,
    policy: ReconnectPolicy,
) -> impl Stream<Item = PluginEvent> {
    stream::unfold(Pump::new(client, policy), |mut pump| async move {
        let event = pump.next_event().await;
        Some((event, pump))
    })
}

type ByteStream = stream::BoxStream<'static, reqwest::Result<bytes::Bytes>>;

struct Pump {
    client: ApiClient,
    policy: ReconnectPolicy,
    connection: Option<(ByteStream, EventBuffer)>,
    pending: VecDeque<PluginEvent>,
    ever_connected: bool,
}

impl Pump {
    fn new(client: ApiClient, policy: ReconnectPolicy) -> Self {
        Self {
            client,
            policy,
            connection: None,
            pending: VecDeque::new(),
            ever_connected: false,
        }
    }

    async fn next_event(&mut self) -> PluginEvent {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return event;
            }

            match &mut self.connection {
                None => {
                    if self.ever_connected {
                        tokio::time::sleep(self.policy.delay).await;
                    }
                    self.ever_connected = true;

                    match self.client.subscribe_plugin_events().await {
                        Ok(response) => {
                            self.connection =
                                Some((response.bytes_stream().boxed(), EventBuffer::default()));
                        }
                        Err(error) => {
                            tracing::warn!(%error, "plugin event stream connection failed");
                            return PluginEvent::Disconnected;
                        }
                    }
                }
                Some((bytes, buffer)) => match bytes.next().await {
                    Some(Ok(chunk)) => {
                        self.pending.extend(buffer.push(&chunk));
                    }
                    Some(Err(error)) => {
                        tracing::warn!(%error, "plugin event stream broke");
                        self.connection = None;
                        return PluginEvent::Disconnected;
                    }
                    None => {
                        tracing::debug!("plugin event stream ended");
                        self.connection = None;
                        return PluginEvent::Disconnected;
                    }
                },
            }
        }
    }
}

/// Incremental SSE parser. Blocks are separated by a blank line; each block
/// may carry an `event:` name and one or more `data:` lines.
#[derive(Debug, Default)]
pub struct EventBuffer {
    buffer: String,
    /// Trailing bytes of an unfinished UTF-8 sequence, carried over until
    /// the next chunk completes it. Chunk boundaries fall anywhere, also
    /// inside a multibyte character.
    partial: Vec<u8>,
}

impl EventBuffer {
    /// Feed one received chunk, draining every complete event block.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<PluginEvent> {
        self.decode(chunk);

        let mut events = Vec::new();
        while let Some(boundary) = self.buffer.find("\n\n") {
            let mut block: String = self.buffer.drain(..boundary + 2).collect();
            block.truncate(boundary);

            if let Some(event) = parse_block(&block) {
                events.push(event);
            }
        }

        events
    }

    fn decode(&mut self, chunk: &[u8]) {
        self.partial.extend_from_slice(chunk);
        let bytes = std::mem::take(&mut self.partial);

        match std::str::from_utf8(&bytes) {
            Ok(text) => self.append(text),
            // An unfinished sequence at the end; keep it for the next chunk.
            Err(error) if error.error_len().is_none() => {
                let (complete, rest) = bytes.split_at(error.valid_up_to());
                self.append(&String::from_utf8_lossy(complete));
                self.partial = rest.to_vec();
            }
            // Genuinely invalid bytes; replacement characters will do.
            Err(_) => self.append(&String::from_utf8_lossy(&bytes)),
        }
    }

    fn append(&mut self, text: &str) {
        // Dropping every CR normalizes CRLF delimiters even when the pair
        // is split across chunks.
        self.buffer.push_str(&text.replace('\r', ""));
    }
}

fn parse_block(block: &str) -> Option<PluginEvent> {
    let mut name = None;
    let mut data_parts = Vec::new();

    for line in block.lines() {
        if let Some(value) = line.strip_prefix("event:") {
            name = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("data:") {
            data_parts.push(value.trim_start());
        }
        // `id:` lines and comments are ignored.
    }

    match name.as_deref() {
        Some("connected") => Some(PluginEvent::Connected),
        Some("plugin-config-updated") => {
            let data = data_parts.join("\n");
            match serde_json::from_str::<ConfigUpdatedBody>(&data) {
                Ok(body) => Some(PluginEvent::ConfigUpdated { name: body.name }),
                Err(error) => {
                    tracing::trace!(%error, data, "unparseable plugin-config-updated payload");
                    None
                }
            }
        }
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct ConfigUpdatedBody {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_events_split_across_chunks() {
        let mut buffer = EventBuffer::default();

        let first = buffer.push(b"event: connected\ndata: {}\n\nevent: plugin-config-up");
        assert_eq!(first, vec![PluginEvent::Connected]);

        let second = buffer.push(b"dated\ndata: {\"name\": \"qq-voice\"}\n\n");
        assert_eq!(
            second,
            vec![PluginEvent::ConfigUpdated {
                name: "qq-voice".into()
            }]
        );
    }

    #[test]
    fn ignores_unknown_events_and_comments() {
        let mut buffer = EventBuffer::default();
        let events = buffer.push(b": keepalive\n\nevent: heartbeat\ndata: {}\n\n");
        assert!(events.is_empty());
    }

    #[test]
    fn handles_crlf_delimiters() {
        let mut buffer = EventBuffer::default();
        let events = buffer.push(b"event: connected\r\ndata: {}\r\n\r\n");
        assert_eq!(events, vec![PluginEvent::Connected]);
    }

    #[test]
    fn handles_crlf_split_across_chunks() {
        let mut buffer = EventBuffer::default();
        assert!(buffer.push(b"event: connected\r").is_empty());
        assert_eq!(buffer.push(b"\n\r\n"), vec![PluginEvent::Connected]);
    }

    #[test]
    fn multibyte_payload_split_across_chunks_stays_intact() {
        let mut buffer = EventBuffer::default();
        let payload = "event: plugin-config-updated\ndata: {\"name\": \"语音插件\"}\n\n";

        // Split inside the first multibyte character.
        let split = payload
            .bytes()
            .position(|byte| byte >= 0x80)
            .map(|index| index + 1)
            .unwrap();
        let (head, tail) = payload.as_bytes().split_at(split);

        assert!(buffer.push(head).is_empty());
        assert_eq!(
            buffer.push(tail),
            vec![PluginEvent::ConfigUpdated {
                name: "语音插件".into()
            }]
        );
    }

    #[test]
    fn incomplete_block_yields_nothing_until_terminated() {
        let mut buffer = EventBuffer::default();
        assert!(buffer.push(b"event: connected\n").is_empty());
        assert_eq!(buffer.push(b"\n"), vec![PluginEvent::Connected]);
    }

    #[test]
    fn bad_config_payload_is_skipped() {
        let mut buffer = EventBuffer::default();
        let events = buffer.push(b"event: plugin-config-updated\ndata: not json\n\n");
        assert!(events.is_empty());
    }
}
