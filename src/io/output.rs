use crate::models::ResolvedUtterance;

/// Console line for one utterance, in the event-socket tool's format:
/// `[vendor] Name (number) - Speaker-N: text` with a trailing finality
/// marker (`✓` final, `~` interim)
pub fn render_utterance(utterance: &ResolvedUtterance) -> String {
    let marker = if utterance.is_final { "✓" } else { "~" };

    match &utterance.speaker_tag {
        Some(tag) => format!(
            "[{}] {} ({}) - Speaker-{}: {} {}",
            utterance.vendor,
            utterance.speaker.name,
            utterance.speaker.number,
            tag,
            utterance.text,
            marker
        ),
        None => format!(
            "[{}] {} ({}): {} {}",
            utterance.vendor, utterance.speaker.name, utterance.speaker.number, utterance.text, marker
        ),
    }
}
