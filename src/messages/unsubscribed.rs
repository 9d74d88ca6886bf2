use super::{validation, MessageDirection, WampMessage};
use crate::roles::Roles;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
/// # Unsubscribed - [wamp-proto](https://wamp-proto.org/wamp_latest_ietf.html#name-unsubscribed-2)
/// Represents an Unsubscribed message in the WAMP protocol.
/// ## Examples
/// ```
/// use wamp_core::messages::Unsubscribed;
/// use wamp_core::unsubscribed;
/// # let unsubscribed_message1 = unsubscribed!(1);
///
/// let unsubscribed_message = Unsubscribed {
///     request_id: 1
/// };
///
/// # assert_eq!(unsubscribed_message, unsubscribed_message1);
/// ```
///
/// ### Serializer
/// Implements serde Serialize trait for Unsubscribed
/// ```
/// use wamp_core::messages::Unsubscribed;
/// use serde_json::{json, to_string};
///
/// // Create an Unsubscribe message
/// let unsubscribed = Unsubscribed {
///     request_id: 1
/// };
///
/// // Establish raw json data string
/// let data = r#"[35,1]"#;
///
/// // Here we convert it from an `Unsubscribed` frame, to a string representation.
/// let unsubscribed = to_string(&unsubscribed).unwrap();
///
/// // Confirm that our Unsubscribed frame strings are equal to each other
/// assert_eq!(unsubscribed, data);
/// ```
/// ### Deserializer
/// Implements serde Deserialize trait for Unsubscribed
/// ```
/// use wamp_core::messages::Unsubscribed;
/// use serde_json::from_str;
///
/// // Here is our raw json data string
/// let data = r#"[35,1]"#;
///
/// // Here we convert it to an `Unsubscribed` frame
/// let unsubscribed = from_str::<Unsubscribed>(data).unwrap();
///
/// // Confirm that our request_id and subscription deserialized
/// assert_eq!(unsubscribed.request_id, 1);
/// ```
pub struct Unsubscribed {
    pub request_id: u64,
}

#[macro_export]
/// # Unsubscribed Macro - [wamp-proto](https://wamp-proto.org/wamp_latest_ietf.html#name-unsubscribed-2)
/// Quicly create Unsubscribed message with this macro.
/// ## Examples
/// ```
/// use wamp_core::messages::Unsubscribed;
/// use wamp_core::unsubscribed;
///
/// # let unsubscribed_message1 = unsubscribed!(1);
///
/// let unsubscribed_message = Unsubscribed {
///     request_id: 1
/// };
///
/// # assert_eq!(unsubscribed_message, unsubscribed_message1);
/// ```
macro_rules! unsubscribed {
    ($request_id:expr) => {
        Unsubscribed {
            request_id: $request_id,
        }
    };
}

impl WampMessage for Unsubscribed {
    const ID: u64 = 35;

    fn direction(role: Roles) -> &'static MessageDirection {
        match role {
            Roles::Callee => &MessageDirection {
                receives: &false,
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
                receives: &true,
                sends: &false,
            },
            Roles::Dealer => &MessageDirection {
                receives: &false,
                sends: &false,
            },
            Roles::Broker => &MessageDirection {
                receives: &false,
                sends: &true,
            },
        }
    }
}

impl Serialize for Unsubscribed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (Self::ID, &self.request_id).serialize(serializer)
    }
}

static UNSUBSCRIBED_SPEC: validation::ValidationSpec = validation::ValidationSpec {
    min_length: 2,
    max_length: 2,
    text: "Unsubscribed",
    fields: &[(1, validation::validate_id)],
};

impl<'de> Deserialize<'de> for Unsubscribed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let components: Vec<Value> = Deserialize::deserialize(deserializer)?;
        validation::sanity_check(&components, Self::ID, &UNSUBSCRIBED_SPEC)
            .map_err(de::Error::custom)?;
        Ok(Unsubscribed {
            request_id: components[1].as_u64().unwrap_or_default(),
        })
    }
}
