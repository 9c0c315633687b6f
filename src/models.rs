use serde::Deserialize;

/// Sleep status flag as tracked by the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SleepStatus {
    Awake,
    Sleeping,
}

impl SleepStatus {
    /// Parse the wire form ("0" = awake, "1" = sleeping)
    pub fn from_wire(s: &str) -> Option<SleepStatus> {
        match s {
            "0" => Some(SleepStatus::Awake),
            "1" => Some(SleepStatus::Sleeping),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            SleepStatus::Awake => "0",
            SleepStatus::Sleeping => "1",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SleepStatus::Awake => "Awake",
            SleepStatus::Sleeping => "Sleeping",
        }
    }

    pub fn toggled(&self) -> SleepStatus {
        match self {
            SleepStatus::Awake => SleepStatus::Sleeping,
            SleepStatus::Sleeping => SleepStatus::Awake,
        }
    }
}

/// Raw JSON body of `GET /sleepstatus`
#[derive(Clone, Debug, Deserialize)]
pub struct StatusPayload {
    #[serde(rename = "sleepStatus")]
    pub sleep_status: String,
    pub statement: String,
}

/// A snapshot of the backend status, replaced wholesale on every fetch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub sleep_status: SleepStatus,
    pub statement: String,
}

impl TryFrom<StatusPayload> for StatusSnapshot {
    type Error = anyhow::Error;

    fn try_from(payload: StatusPayload) -> Result<Self, Self::Error> {
        let sleep_status = SleepStatus::from_wire(&payload.sleep_status)
            .ok_or_else(|| anyhow::anyhow!("unexpected sleepStatus value: {:?}", payload.sleep_status))?;
        Ok(StatusSnapshot {
            sleep_status,
            statement: payload.statement,
        })
    }
}

/// Opaque device token issued by the notification stream
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushToken(pub String);

/// Raw JSON body of a pushed notification frame
#[derive(Clone, Debug, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

/// A notification received from the stream
#[derive(Clone, Debug)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub received_at: chrono::DateTime<chrono::Utc>,
}

impl From<NotificationPayload> for Notification {
    fn from(payload: NotificationPayload) -> Self {
        Notification {
            title: payload.title,
            body: payload.body,
            received_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_roundtrip() {
        assert_eq!(SleepStatus::from_wire("0"), Some(SleepStatus::Awake));
        assert_eq!(SleepStatus::from_wire("1"), Some(SleepStatus::Sleeping));
        assert_eq!(SleepStatus::Sleeping.as_wire(), "1");
        assert_eq!(SleepStatus::Awake.as_wire(), "0");
    }

    #[test]
    fn test_wire_rejects_junk() {
        assert_eq!(SleepStatus::from_wire("2"), None);
        assert_eq!(SleepStatus::from_wire(""), None);
        assert_eq!(SleepStatus::from_wire("sleeping"), None);
    }

    #[test]
    fn test_parse_status_payload() {
        let payload: StatusPayload =
            serde_json::from_str(r#"{"sleepStatus":"1","statement":"x"}"#).unwrap();
        let snapshot = StatusSnapshot::try_from(payload).unwrap();
        assert_eq!(snapshot.sleep_status, SleepStatus::Sleeping);
        assert_eq!(snapshot.statement, "x");
    }

    #[test]
    fn test_malformed_status_rejected() {
        let payload: StatusPayload =
            serde_json::from_str(r#"{"sleepStatus":"asleep","statement":"x"}"#).unwrap();
        assert!(StatusSnapshot::try_from(payload).is_err());
    }

    #[test]
    fn test_toggled() {
        assert_eq!(SleepStatus::Awake.toggled(), SleepStatus::Sleeping);
        assert_eq!(SleepStatus::Sleeping.toggled(), SleepStatus::Awake);
    }
}
