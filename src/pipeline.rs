use tracing::{debug, info, warn};

use crate::adapters::{ParseError, adapter_for};
use crate::models::{CallEvent, CallId, ChannelId, ResolvedUtterance, Vendor};
use crate::registry::CallRegistry;
use crate::resolver::resolve;
use crate::segmenter::segment;

/// A dropped fragment, reported on the error side-channel.
///
/// Every variant is local and non-fatal; the stream keeps going and
/// other calls are never affected.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Transcription arrived for an id with no registry entry
    #[error("no active call {call_id} for {vendor} transcription")]
    UnknownCall { vendor: Vendor, call_id: CallId },

    /// Channel value outside the known channel-role table
    #[error("unrecognized {vendor} channel {channel} on call {call_id}")]
    UnrecognizedChannel {
        vendor: Vendor,
        call_id: CallId,
        channel: ChannelId,
    },

    /// Payload failed to parse against the vendor schema
    #[error("malformed {vendor} payload on call {call_id}: {source}")]
    MalformedPayload {
        vendor: Vendor,
        call_id: CallId,
        #[source]
        source: ParseError,
    },
}

impl StreamError {
    pub fn vendor(&self) -> Vendor {
        match self {
            StreamError::UnknownCall { vendor, .. }
            | StreamError::UnrecognizedChannel { vendor, .. }
            | StreamError::MalformedPayload { vendor, .. } => *vendor,
        }
    }

    pub fn call_id(&self) -> &str {
        match self {
            StreamError::UnknownCall { call_id, .. }
            | StreamError::UnrecognizedChannel { call_id, .. }
            | StreamError::MalformedPayload { call_id, .. } => call_id,
        }
    }
}

type UtteranceSink = Box<dyn FnMut(&ResolvedUtterance)>;
type ErrorSink = Box<dyn FnMut(&StreamError)>;

/// The processing engine: one registry, one event entry point, one
/// stream of resolved utterances out.
///
/// Each event is processed to completion before the next; the registry
/// is private, so lifecycle mutations cannot interleave with lookups.
/// Pipelines are independent, so a host can run one per tenant.
#[derive(Default)]
pub struct TranscriptPipeline {
    registry: CallRegistry,
    sinks: Vec<UtteranceSink>,
    error_sinks: Vec<ErrorSink>,
}

impl TranscriptPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an utterance sink; called once per utterance, in
    /// generation order, synchronously
    pub fn subscribe(&mut self, sink: impl FnMut(&ResolvedUtterance) + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Register the error side-channel for dropped fragments
    pub fn on_error(&mut self, sink: impl FnMut(&StreamError) + 'static) {
        self.error_sinks.push(Box::new(sink));
    }

    pub fn registry(&self) -> &CallRegistry {
        &self.registry
    }

    /// Single entry point for the event-delivery collaborator.
    ///
    /// Never fails: dropped fragments go to the error sinks and the log.
    pub fn handle_event(&mut self, event: CallEvent) {
        match event {
            CallEvent::CallStart {
                call_id,
                caller,
                callee,
            } => {
                info!(
                    "call started [{}]: {} ({}) -> {} ({})",
                    call_id, caller.name, caller.number, callee.name, callee.number
                );
                self.registry.start(call_id, caller, callee);
            }
            CallEvent::CallEnd { call_id } => {
                info!("call ended [{}]", call_id);
                self.registry.end(&call_id);
            }
            CallEvent::Transcription {
                call_id,
                vendor,
                payload,
            } => {
                self.handle_transcription(&call_id, vendor, &payload);
            }
        }
    }

    fn handle_transcription(&mut self, call_id: &str, vendor: Vendor, payload: &str) {
        let Some(record) = self.registry.lookup(call_id).cloned() else {
            self.report(StreamError::UnknownCall {
                vendor,
                call_id: call_id.to_string(),
            });
            return;
        };

        let fragments = match adapter_for(vendor).parse(payload) {
            Ok(fragments) => fragments,
            Err(source) => {
                self.report(StreamError::MalformedPayload {
                    vendor,
                    call_id: call_id.to_string(),
                    source,
                });
                return;
            }
        };

        for fragment in fragments {
            let Some(speaker) = resolve(&record, vendor, &fragment.channel) else {
                self.report(StreamError::UnrecognizedChannel {
                    vendor,
                    call_id: call_id.to_string(),
                    channel: fragment.channel.clone(),
                });
                continue;
            };

            for utterance in segment(&fragment, call_id, vendor, speaker) {
                debug!(
                    "emit [{}] {} {}: {}",
                    call_id, vendor, utterance.speaker.name, utterance.text
                );
                for sink in &mut self.sinks {
                    sink(&utterance);
                }
            }
        }
    }

    fn report(&mut self, error: StreamError) {
        warn!("dropping fragment: {}", error);
        for sink in &mut self.error_sinks {
            sink(&error);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::models::Party;

    fn started_pipeline() -> (TranscriptPipeline, Rc<RefCell<Vec<ResolvedUtterance>>>) {
        let mut pipeline = TranscriptPipeline::new();
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let sink = emitted.clone();
        pipeline.subscribe(move |u| sink.borrow_mut().push(u.clone()));

        pipeline.handle_event(CallEvent::CallStart {
            call_id: "c1".to_string(),
            caller: Party::new("John", "1002"),
            callee: Party::new("Svc", "1003"),
        });

        (pipeline, emitted)
    }

    #[test]
    fn test_azure_transcription_end_to_end() {
        let (mut pipeline, emitted) = started_pipeline();

        pipeline.handle_event(CallEvent::Transcription {
            call_id: "c1".to_string(),
            vendor: Vendor::Azure,
            payload: r#"{"Channel": 0, "DisplayText": "Hello.", "SpeakerId": "Guest-1", "RecognitionStatus": "Success"}"#.to_string(),
        });

        let emitted = emitted.borrow();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].speaker, Party::new("John", "1002"));
        assert_eq!(emitted[0].speaker_tag.as_deref(), Some("Guest-1"));
        assert_eq!(emitted[0].text, "Hello.");
        assert!(emitted[0].is_final);
    }

    #[test]
    fn test_unknown_call_goes_to_error_channel() {
        let mut pipeline = TranscriptPipeline::new();
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let errors = Rc::new(RefCell::new(Vec::new()));
        let sink = emitted.clone();
        pipeline.subscribe(move |u| sink.borrow_mut().push(u.clone()));
        let err_sink = errors.clone();
        pipeline.on_error(move |e| err_sink.borrow_mut().push(e.to_string()));

        pipeline.handle_event(CallEvent::Transcription {
            call_id: "ghost".to_string(),
            vendor: Vendor::Azure,
            payload: r#"{"Channel": 0, "DisplayText": "Hi.", "RecognitionStatus": "Success"}"#
                .to_string(),
        });

        assert!(emitted.borrow().is_empty());
        let errors = errors.borrow();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("no active call"));
    }

    #[test]
    fn test_non_results_deepgram_event_emits_nothing() {
        let (mut pipeline, emitted) = started_pipeline();
        let errors = Rc::new(RefCell::new(Vec::new()));
        let err_sink = errors.clone();
        pipeline.on_error(move |e| err_sink.borrow_mut().push(e.to_string()));

        pipeline.handle_event(CallEvent::Transcription {
            call_id: "c1".to_string(),
            vendor: Vendor::Deepgram,
            payload: r#"{"type": "Metadata"}"#.to_string(),
        });

        // Ignored subtype, not an error
        assert!(emitted.borrow().is_empty());
        assert!(errors.borrow().is_empty());
    }

    #[test]
    fn test_malformed_payload_is_dropped_and_reported() {
        let (mut pipeline, emitted) = started_pipeline();
        let errors = Rc::new(RefCell::new(Vec::new()));
        let err_sink = errors.clone();
        pipeline.on_error(move |e| err_sink.borrow_mut().push(e.to_string()));

        pipeline.handle_event(CallEvent::Transcription {
            call_id: "c1".to_string(),
            vendor: Vendor::Aws,
            payload: "{{{ not json".to_string(),
        });

        assert!(emitted.borrow().is_empty());
        assert_eq!(errors.borrow().len(), 1);

        // The stream keeps going after a bad fragment
        pipeline.handle_event(CallEvent::Transcription {
            call_id: "c1".to_string(),
            vendor: Vendor::Azure,
            payload: r#"{"Channel": 1, "DisplayText": "Still here.", "RecognitionStatus": "Success"}"#.to_string(),
        });
        assert_eq!(emitted.borrow().len(), 1);
        assert_eq!(emitted.borrow()[0].speaker.name, "Svc");
    }

    #[test]
    fn test_unrecognized_channel_skips_only_that_fragment() {
        let (mut pipeline, emitted) = started_pipeline();
        let errors = Rc::new(RefCell::new(Vec::new()));
        let err_sink = errors.clone();
        pipeline.on_error(move |e| err_sink.borrow_mut().push(e.to_string()));

        // One AWS event, two channel results, one unresolvable
        pipeline.handle_event(CallEvent::Transcription {
            call_id: "c1".to_string(),
            vendor: Vendor::Aws,
            payload: r#"[
                {"is_final": true, "channel_id": "ch_2", "alternatives": [{"transcript": "lost"}]},
                {"is_final": true, "channel_id": "ch_0", "alternatives": [{"transcript": "kept"}]}
            ]"#
            .to_string(),
        });

        let emitted = emitted.borrow();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].text, "kept");
        assert_eq!(errors.borrow().len(), 1);
        assert!(errors.borrow()[0].contains("ch_2"));
    }

    #[test]
    fn test_call_end_stops_attribution() {
        let (mut pipeline, emitted) = started_pipeline();

        pipeline.handle_event(CallEvent::CallEnd {
            call_id: "c1".to_string(),
        });
        pipeline.handle_event(CallEvent::Transcription {
            call_id: "c1".to_string(),
            vendor: Vendor::Azure,
            payload: r#"{"Channel": 0, "DisplayText": "Too late.", "RecognitionStatus": "Success"}"#.to_string(),
        });

        assert!(emitted.borrow().is_empty());
        assert!(pipeline.registry().lookup("c1").is_none());
    }

    #[test]
    fn test_utterance_order_matches_run_order() {
        let (mut pipeline, emitted) = started_pipeline();

        pipeline.handle_event(CallEvent::Transcription {
            call_id: "c1".to_string(),
            vendor: Vendor::Deepgram,
            payload: r#"{
                "type": "Results",
                "channel_index": [1],
                "is_final": true,
                "channel": {"alternatives": [{
                    "transcript": "a b c d e",
                    "words": [
                        {"word": "a", "speaker": 0},
                        {"word": "b", "speaker": 0},
                        {"word": "c", "speaker": 1},
                        {"word": "d", "speaker": 1},
                        {"word": "e", "speaker": 0}
                    ]
                }]}
            }"#
            .to_string(),
        });

        let emitted = emitted.borrow();
        let texts: Vec<&str> = emitted.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(texts, vec!["a b", "c d", "e"]);
        assert!(emitted.iter().all(|u| u.speaker.name == "Svc"));
    }
}
