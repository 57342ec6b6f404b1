use crate::models::{CallRecord, ChannelId, Party, Vendor};

/// Which leg of the call a channel belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRole {
    Caller,
    Callee,
}

/// Channel key as it appears in the static table; `ChannelId` values
/// from payloads are compared against it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelKey {
    Index(u64),
    Label(&'static str),
}

/// The channel-to-role mapping is data: one row per known
/// (vendor, channel) pair. Anything outside the table is unresolvable.
const CHANNEL_ROLES: &[(Vendor, ChannelKey, ChannelRole)] = &[
    (Vendor::Aws, ChannelKey::Label("ch_0"), ChannelRole::Caller),
    (Vendor::Aws, ChannelKey::Label("ch_1"), ChannelRole::Callee),
    (Vendor::Deepgram, ChannelKey::Index(0), ChannelRole::Caller),
    (Vendor::Deepgram, ChannelKey::Index(1), ChannelRole::Callee),
    (Vendor::Azure, ChannelKey::Index(0), ChannelRole::Caller),
    (Vendor::Azure, ChannelKey::Index(1), ChannelRole::Callee),
];

fn key_matches(key: ChannelKey, channel: &ChannelId) -> bool {
    match (key, channel) {
        (ChannelKey::Index(k), ChannelId::Index(c)) => k == *c,
        (ChannelKey::Label(k), ChannelId::Label(c)) => k == c.as_str(),
        _ => false,
    }
}

/// Look up the role of a vendor channel; `None` for unknown channels
pub fn channel_role(vendor: Vendor, channel: &ChannelId) -> Option<ChannelRole> {
    CHANNEL_ROLES
        .iter()
        .find(|(v, key, _)| *v == vendor && key_matches(*key, channel))
        .map(|(_, _, role)| *role)
}

/// Resolve a vendor channel to the matching call party.
///
/// Returns `None` for channels outside the table; the caller decides
/// whether to drop or report.
pub fn resolve<'a>(
    record: &'a CallRecord,
    vendor: Vendor,
    channel: &ChannelId,
) -> Option<&'a Party> {
    match channel_role(vendor, channel)? {
        ChannelRole::Caller => Some(&record.caller),
        ChannelRole::Callee => Some(&record.callee),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Party;

    fn record() -> CallRecord {
        CallRecord {
            id: "c1".to_string(),
            caller: Party::new("John", "1002"),
            callee: Party::new("Svc", "1003"),
        }
    }

    #[test]
    fn test_aws_label_channels() {
        let record = record();
        let caller = resolve(&record, Vendor::Aws, &ChannelId::from("ch_0")).unwrap();
        assert_eq!(caller.number, "1002");
        let callee = resolve(&record, Vendor::Aws, &ChannelId::from("ch_1")).unwrap();
        assert_eq!(callee.number, "1003");
    }

    #[test]
    fn test_numeric_channels_for_deepgram_and_azure() {
        let record = record();
        for vendor in [Vendor::Deepgram, Vendor::Azure] {
            assert_eq!(
                resolve(&record, vendor, &ChannelId::Index(0)).unwrap().name,
                "John"
            );
            assert_eq!(
                resolve(&record, vendor, &ChannelId::Index(1)).unwrap().name,
                "Svc"
            );
        }
    }

    #[test]
    fn test_unknown_channels_resolve_to_none() {
        let record = record();
        assert!(resolve(&record, Vendor::Aws, &ChannelId::from("ch_2")).is_none());
        assert!(resolve(&record, Vendor::Deepgram, &ChannelId::Index(2)).is_none());
        // AWS channels are labels; a bare index never matches
        assert!(resolve(&record, Vendor::Aws, &ChannelId::Index(0)).is_none());
    }
}
