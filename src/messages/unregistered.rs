use super::{validation, MessageDirection, WampMessage};
use crate::roles::Roles;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
/// # Unregistered - [wamp-proto](https://wamp-proto.org/wamp_latest_ietf.html#name-subscribed-2)
/// Represents an Unregistered message in the WAMP protocol.
/// ## Examples
/// ```
/// use wamp_core::messages::Unregistered;
/// use wamp_core::unregistered;
///
/// # let unregistered_message1 = unregistered!(1);
///
/// let unregistered_message = Unregistered {
///     request_id: 1
/// };
///
/// # assert_eq!(unregistered_message, unregistered_message1);
/// ```
/// ### Serializer
/// Implements serde Serialize trait for Unregistered
/// ```
/// use wamp_core::messages::Unregistered;
/// use serde_json::{json, to_string};
///
/// // Create an Unregistered message
/// let unregistered = Unregistered {
///     request_id: 1
/// };
///
/// // Establish raw json data string
/// let data = r#"[67,1]"#;
///
/// // Here we convert it from an `Unregistered` frame, to a string representation.
/// let unregistered = to_string(&unregistered).unwrap();
///
/// // Confirm that our Unregistered frame strings are equal to each other
/// assert_eq!(unregistered, data);
/// ```
/// ### Deserializer
/// Implements serde Deserialize trait for Unregistered
/// ```
/// use wamp_core::messages::Unregistered;
/// use serde_json::from_str;
///
/// // Here is our raw json data string
/// let data = r#"[67,1]"#;
///
/// // Here we convert it to an `Unregistered` frame
/// let unregistered = from_str::<Unregistered>(data).unwrap();
///
/// // Confirm that our request_id deserialized
/// assert_eq!(unregistered.request_id, 1);
/// ```
pub struct Unregistered {
    pub request_id: u64,
}

#[macro_export]
/// # Unregistered Macro - [wamp-proto](https://wamp-proto.org/wamp_latest_ietf.html#name-subscribed-2)
/// Quicly create unregistered message with this macro.
/// ## Examples
/// ```
/// use wamp_core::messages::Unregistered;
/// use wamp_core::unregistered;
///
/// # let unregistered_message1 = unregistered!(1);
///
/// let unregistered_message = Unregistered {
///     request_id: 1
/// };
///
/// # assert_eq!(unregistered_message, unregistered_message1);
/// ```
macro_rules! unregistered {
    ($request_id:expr) => {
        Unregistered {
            request_id: $request_id,
        }
    };
}

impl WampMessage for Unregistered {
    const ID: u64 = 67;

    fn direction(role: Roles) -> &'static MessageDirection {
        match role {
            Roles::Callee => &MessageDirection {
                receives: &true,
                sends: &false,
            },
            Roles::Caller => &MessageDirection {
                receives: &false,
                sends: &false,
            },
            Roles::Publisher => &MessageDirection {
                receives: &false,
                sends: &false,
            },
            Roles::Subscriber => &MessageDirection {
                receives: &false,
                sends: &false,
            },
            Roles::Dealer => &MessageDirection {
                receives: &false,
                sends: &true,
            },
            Roles::Broker => &MessageDirection {
                receives: &false,
                sends: &false,
            },
        }
    }
}

impl Serialize for Unregistered {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (Self::ID, &self.request_id).serialize(serializer)
    }
}

static UNREGISTERED_SPEC: validation::ValidationSpec = validation::ValidationSpec {
    min_length: 2,
    max_length: 2,
    text: "Unregistered",
    fields: &[(1, validation::validate_id)],
};

impl<'de> Deserialize<'de> for Unregistered {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let components: Vec<Value> = Deserialize::deserialize(deserializer)?;
        validation::sanity_check(&components, Self::ID, &UNREGISTERED_SPEC)
            .map_err(de::Error::custom)?;
        Ok(Unregistered {
            request_id: components[1].as_u64().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{from_str, to_string};

    use super::Unregistered;

    #[test]
    fn test() {
        let d1 = r#"[67,788923562]"#;
        let p1 = Unregistered {
            request_id: 788923562,
        };
        assert_eq!(d1, to_string(&p1).unwrap());
        assert_eq!(from_str::<Unregistered>(d1).unwrap(), p1);
    }
}
