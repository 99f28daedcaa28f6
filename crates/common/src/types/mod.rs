use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Response envelope used by every endpoint: `{ success, message }`
/// plus endpoint-specific payload fields flattened next to it.
#[derive(Serialize, Deserialize, Debug)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::Ack;

    #[test]
    fn ack_round_trips() {
        let a = Ack::ok("Job status updated successfully");
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["success"], true);
        let b: Ack = serde_json::from_value(v).unwrap();
        assert!(b.success);
    }
}
