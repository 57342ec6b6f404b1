use crate::models::{NormalizedFragment, Party, ResolvedUtterance, Vendor};

/// Turn a resolved fragment's runs into emitted utterances.
///
/// One utterance per run, source order preserved, text trimmed, runs
/// that trim to nothing dropped.
pub fn segment(
    fragment: &NormalizedFragment,
    call_id: &str,
    vendor: Vendor,
    speaker: &Party,
) -> Vec<ResolvedUtterance> {
    fragment
        .runs
        .iter()
        .filter_map(|run| {
            let text = run.text.trim();
            if text.is_empty() {
                return None;
            }
            Some(ResolvedUtterance {
                utterance_id: uuid::Uuid::new_v4().to_string(),
                call_id: call_id.to_string(),
                vendor,
                speaker: speaker.clone(),
                speaker_tag: run.speaker_tag.clone(),
                text: text.to_string(),
                is_final: fragment.is_final,
                start: run.start,
                end: run.end,
            })
        })
        .collect()
}
