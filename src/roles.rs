//! WAMP roles: the closed set of client roles (`callee`, `caller`,
//! `publisher`, `subscriber`) and router roles (`dealer`, `broker`) used to
//! gate which message kinds a given component may send or receive.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A single WAMP role, client- or router-side.
pub enum Roles {
    Callee,
    Caller,
    Publisher,
    Subscriber,
    Dealer,
    Broker,
}

impl Roles {
    /// The four client roles a default Hello advertises.
    pub const CLIENT: [Roles; 4] = [
        Roles::Callee,
        Roles::Caller,
        Roles::Publisher,
        Roles::Subscriber,
    ];

    /// The two router roles a default Welcome advertises.
    pub const ROUTER: [Roles; 2] = [Roles::Dealer, Roles::Broker];

    pub fn as_str(&self) -> &'static str {
        match self {
            Roles::Callee => "callee",
            Roles::Caller => "caller",
            Roles::Publisher => "publisher",
            Roles::Subscriber => "subscriber",
            Roles::Dealer => "dealer",
            Roles::Broker => "broker",
        }
    }

    pub fn from_str(s: &str) -> Option<Roles> {
        match s {
            "callee" => Some(Roles::Callee),
            "caller" => Some(Roles::Caller),
            "publisher" => Some(Roles::Publisher),
            "subscriber" => Some(Roles::Subscriber),
            "dealer" => Some(Roles::Dealer),
            "broker" => Some(Roles::Broker),
            _ => None,
        }
    }
}

impl fmt::Display for Roles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the `roles` details object the Hello/Welcome messages carry:
/// `{"callee": {}, "caller": {}, ...}`, one empty feature-set object per role.
pub fn roles_to_value(roles: &[Roles]) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for role in roles {
        map.insert(role.as_str().to_string(), serde_json::json!({}));
    }
    serde_json::Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for role in Roles::CLIENT.iter().chain(Roles::ROUTER.iter()) {
            assert_eq!(Roles::from_str(role.as_str()), Some(*role));
        }
    }

    #[test]
    fn client_roles_value_has_four_entries() {
        let v = roles_to_value(&Roles::CLIENT);
        assert_eq!(v.as_object().unwrap().len(), 4);
    }
}
