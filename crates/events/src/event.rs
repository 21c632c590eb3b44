use serde::{Deserialize, Serialize};

/// Kind of store lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreEvent {
    Created,
    Read,
    Updated,
    Deleted,
}

impl StoreEvent {
    pub const ALL: [StoreEvent; 4] = [
        StoreEvent::Created,
        StoreEvent::Read,
        StoreEvent::Updated,
        StoreEvent::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreEvent::Created => "created",
            StoreEvent::Read => "read",
            StoreEvent::Updated => "updated",
            StoreEvent::Deleted => "deleted",
        }
    }
}

impl core::fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde_name() {
        for kind in StoreEvent::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
